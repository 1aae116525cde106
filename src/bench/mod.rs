//! Benchmark harness around the tree algorithms.
//!
//! Every algorithm implements the common [`Algorithm`] contract: take a key
//! set, build something from it, validate it, report. The harness generates
//! one seeded data set per run and aggregates timings.

mod algorithms;
mod api;
mod config;
pub mod dataset;
mod registry;
mod stats;

pub use algorithms::{ScapegoatInsert, UnbalancedInsert};
pub use api::{Algorithm, RunReport};
pub use config::{BenchConfig, DatasetKind};
pub use registry::{AlgorithmInfo, AlgorithmRegistry};
pub use stats::TimingStats;

use thiserror::Error;
use tracing::{debug, info};

use crate::TreeError;

/// Errors raised by the harness
#[derive(Debug, Error)]
pub enum BenchError {
    /// Configuration invalid (e.g., zero array size)
    #[error("invalid benchmark configuration: {0}")]
    InvalidConfiguration(String),

    /// No algorithm registered under this name
    #[error("unknown algorithm '{0}'")]
    UnknownAlgorithm(String),

    /// Post-run check failed
    #[error("{algorithm} failed validation: {reason}")]
    Validation {
        /// Algorithm that produced the bad result
        algorithm: &'static str,
        /// What was wrong
        reason: String,
    },

    /// Tree operation failed for a reason other than a duplicate key
    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl BenchError {
    /// Helper for constructing validation failures.
    pub fn validation(algorithm: &'static str, reason: impl Into<String>) -> Self {
        BenchError::Validation {
            algorithm,
            reason: reason.into(),
        }
    }
}

/// Aggregate result of [`run_benchmark`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct BenchSummary {
    /// Algorithm name
    pub algorithm: &'static str,
    /// Configuration the runs used
    pub config: BenchConfig,
    /// One report per run, in run order
    pub reports: Vec<RunReport>,
    /// Timing statistics over all runs
    pub timing: TimingStats,
}

/// Run `algorithm` once per configured run, each on a fresh data set.
pub fn run_benchmark(
    algorithm: &dyn Algorithm,
    config: &BenchConfig,
) -> Result<BenchSummary, BenchError> {
    config.validate()?;

    let mut reports = Vec::with_capacity(config.runs);
    for run in 0..config.runs {
        let keys = dataset::generate(config.dataset, config.array_size, config.run_seed(run));
        let report = algorithm.run(&keys)?;

        if config.verbose {
            info!(
                run,
                algorithm = algorithm.name(),
                elapsed = ?report.elapsed,
                max_depth = report.max_depth,
                "run complete"
            );
        } else {
            debug!(
                run,
                algorithm = algorithm.name(),
                elapsed = ?report.elapsed,
                max_depth = report.max_depth,
                "run complete"
            );
        }
        reports.push(report);
    }

    let elapsed: Vec<_> = reports.iter().map(|report| report.elapsed).collect();
    let timing = TimingStats::from_durations(&elapsed).ok_or_else(|| {
        BenchError::InvalidConfiguration("run count must be > 0".to_string())
    })?;

    Ok(BenchSummary {
        algorithm: algorithm.name(),
        config: config.clone(),
        reports,
        timing,
    })
}
