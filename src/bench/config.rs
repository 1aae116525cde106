//! Harness configuration
//!
//! One `BenchConfig` describes a benchmark: how many keys per data set,
//! how many runs, which data set shape and the base seed.

use std::fmt;
use std::str::FromStr;

use crate::bench::BenchError;
use crate::Key;

/// Shape of the generated key set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum DatasetKind {
    /// Pseudo-random permutation of `0..size`
    #[default]
    Unique,
    /// Values drawn from `0..size` with replacement
    Duplicates,
    /// `0..size` in order (degenerate for unbalanced trees)
    Ascending,
    /// `0..size` reversed
    Descending,
}

impl DatasetKind {
    /// All kinds, in CLI listing order
    pub const ALL: [DatasetKind; 4] = [
        DatasetKind::Unique,
        DatasetKind::Duplicates,
        DatasetKind::Ascending,
        DatasetKind::Descending,
    ];

    /// Name used on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            DatasetKind::Unique => "unique",
            DatasetKind::Duplicates => "duplicates",
            DatasetKind::Ascending => "ascending",
            DatasetKind::Descending => "descending",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetKind {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DatasetKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                BenchError::InvalidConfiguration(format!(
                    "unknown data set '{}' (expected one of: unique, duplicates, ascending, descending)",
                    s
                ))
            })
    }
}

/// Configuration parameters for a benchmark
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct BenchConfig {
    /// Keys per generated data set
    pub array_size: usize,

    /// Number of timed runs
    pub runs: usize,

    /// Data set shape
    pub dataset: DatasetKind,

    /// Base seed; run `i` uses `seed + i`
    pub seed: u64,

    /// Log every run at info level instead of debug
    pub verbose: bool,
}

impl BenchConfig {
    /// Default seed when none is given
    pub const DEFAULT_SEED: u64 = 0x5eed;

    /// Construct a validated configuration with default data set and seed.
    pub fn new(array_size: usize, runs: usize) -> Result<Self, BenchError> {
        let config = Self {
            array_size,
            runs,
            dataset: DatasetKind::default(),
            seed: Self::DEFAULT_SEED,
            verbose: false,
        };
        config.validate()?;
        Ok(config)
    }

    /// Set data set shape.
    pub fn with_dataset(mut self, dataset: DatasetKind) -> Self {
        self.dataset = dataset;
        self
    }

    /// Set base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enable verbose mode.
    pub fn with_verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    /// Check sizes are usable.
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.array_size == 0 {
            return Err(BenchError::InvalidConfiguration(
                "array size must be > 0".to_string(),
            ));
        }
        if self.runs == 0 {
            return Err(BenchError::InvalidConfiguration(
                "run count must be > 0".to_string(),
            ));
        }
        if Key::try_from(self.array_size).is_err() {
            return Err(BenchError::InvalidConfiguration(format!(
                "array size {} exceeds the key range",
                self.array_size
            )));
        }
        Ok(())
    }

    /// Seed for the data set of run `run` (0-indexed).
    pub fn run_seed(&self, run: usize) -> u64 {
        self.seed.wrapping_add(run as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_sizes() {
        assert!(BenchConfig::new(0, 1).is_err());
        assert!(BenchConfig::new(1, 0).is_err());
        assert!(BenchConfig::new(1, 1).is_ok());
    }

    #[test]
    fn test_builder() {
        let config = BenchConfig::new(100, 3)
            .unwrap()
            .with_dataset(DatasetKind::Ascending)
            .with_seed(7);
        assert_eq!(config.dataset, DatasetKind::Ascending);
        assert_eq!(config.run_seed(2), 9);
    }

    #[test]
    fn test_dataset_parsing() {
        assert_eq!("Duplicates".parse::<DatasetKind>().unwrap(), DatasetKind::Duplicates);
        for kind in DatasetKind::ALL {
            assert_eq!(kind.to_string().parse::<DatasetKind>().unwrap(), kind);
        }
        assert!("sorted".parse::<DatasetKind>().is_err());
    }
}
