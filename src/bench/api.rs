use std::time::Duration;

use crate::bench::BenchError;
use crate::Key;

/// Common contract for everything the harness can time.
///
/// An algorithm consumes one key set per run and reports what it built.
/// Runs must be independent: each call starts from fresh state.
pub trait Algorithm: Send + Sync + 'static {
    /// Unique algorithm name (used on the command line).
    fn name(&self) -> &'static str;

    /// Human-readable description.
    fn description(&self) -> &'static str;

    /// Process `keys` once, validate the result and report on it.
    fn run(&self, keys: &[Key]) -> Result<RunReport, BenchError>;
}

/// Outcome of a single timed run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct RunReport {
    /// Name of the algorithm that produced this report
    pub algorithm: &'static str,
    /// Keys offered to the algorithm
    pub keys: usize,
    /// Keys stored at the end of the run
    pub size: usize,
    /// Keys rejected because they were already present
    pub duplicates: usize,
    /// Edges on the longest root-to-leaf path
    pub max_depth: usize,
    /// Levels on the longest root-to-leaf path
    pub height: usize,
    /// Subtree rebuilds triggered (0 for unbalanced trees)
    pub rebuilds: usize,
    /// Time spent inserting, excluding validation
    pub elapsed: Duration,
}

impl RunReport {
    /// One-line rendering used by the CLI.
    pub fn line(&self) -> String {
        format!(
            "{}\tkeys={}\tsize={}\tdup={}\tdepth={}\theight={}\trebuilds={}\ttime={:?}",
            self.algorithm,
            self.keys,
            self.size,
            self.duplicates,
            self.max_depth,
            self.height,
            self.rebuilds,
            self.elapsed
        )
    }
}
