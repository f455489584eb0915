//! Statistic Sets
//!
//! The four scalars every metric is reduced to:
//! - Mean and population standard deviation (divide by N, not N-1)
//! - Minimum and maximum of the derived sequence

use serde::{Deserialize, Serialize};

/// Mean, minimum, maximum and standard deviation of a derived sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatisticSet {
    /// Arithmetic mean
    pub mean: f64,
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

impl StatisticSet {
    /// Reduce a derived sequence to its statistic set.
    ///
    /// Returns `None` for an empty sequence.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;

        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            mean,
            min,
            max,
            std_dev: variance.sqrt(),
        })
    }

    /// Values in report column order: mean, min, max, stdev
    pub fn values(&self) -> [f64; 4] {
        [self.mean, self.min, self.max, self.std_dev]
    }
}
