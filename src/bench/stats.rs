use std::time::Duration;

/// Summary statistics over per-run durations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct TimingStats {
    /// Number of samples
    pub count: usize,
    /// Arithmetic mean (μ)
    pub mean: Duration,
    /// Population standard deviation (σ)
    pub std_dev: Duration,
    /// Fastest sample
    pub min: Duration,
    /// Slowest sample
    pub max: Duration,
}

impl TimingStats {
    /// Compute statistics; `None` when there are no samples.
    pub fn from_durations(samples: &[Duration]) -> Option<Self> {
        let min = samples.iter().copied().min()?;
        let max = samples.iter().copied().max()?;

        let n = samples.len() as f64;
        let secs: Vec<f64> = samples.iter().map(Duration::as_secs_f64).collect();
        let mean = secs.iter().sum::<f64>() / n;
        let variance = secs.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;

        Some(Self {
            count: samples.len(),
            mean: Duration::from_secs_f64(mean),
            std_dev: Duration::from_secs_f64(variance.sqrt()),
            min,
            max,
        })
    }

    /// Report line: `n=.. μ=.. σ=.. min=.. max=..`
    pub fn summary(&self) -> String {
        format!(
            "n={} \u{03BC}={:?} \u{03C3}={:?} min={:?} max={:?}",
            self.count, self.mean, self.std_dev, self.min, self.max
        )
    }
}
