//! Metric Reductions
//!
//! Four ways of turning a raw capture column into a [`StatisticSet`]:
//!
//! | Reduction              | Pre-processing                                  | Unit     |
//! |------------------------|-------------------------------------------------|----------|
//! | [`summarize_raw`]        | drop pre-roll sample                          | as-is    |
//! | [`summarize_memory`]     | drop pre-roll sample, bytes / 1024²           | MiB      |
//! | [`summarize_throughput`] | Δbytes / Δtime / 125 000                      | Mb/s     |
//! | [`summarize_counts`]     | Δcount / Δtime                                | per sec  |
//!
//! Every reduction derives `len(raw) - 1` values, so all metrics of one
//! capture are summarized over the same number of ticks.

use crate::summary::StatisticSet;
use thiserror::Error;

/// Bytes per binary megabyte (MiB)
pub const MEBIBYTE: f64 = 1024.0 * 1024.0;

/// Bytes per megabit (1 000 000 / 8)
pub const BYTES_PER_MEGABIT: f64 = 1_000_000.0 / 8.0;

/// Minimum raw length for gauge reductions ([`summarize_raw`], [`summarize_memory`])
pub const MIN_GAUGE_SAMPLES: usize = 2;

/// Minimum raw length for rate reductions ([`summarize_throughput`], [`summarize_counts`])
pub const MIN_RATE_SAMPLES: usize = 3;

/// Errors raised while reducing a sample sequence
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SummarizeError {
    /// Sequence shorter than the reduction's minimum
    #[error("insufficient data: {required} samples required, got {actual}")]
    InsufficientData {
        /// Minimum raw length for the reduction
        required: usize,
        /// Raw length supplied
        actual: usize,
    },

    /// Time delta ending at sample `index` is zero, negative or NaN
    #[error("malformed time sequence: non-positive delta {delta} at sample {index}")]
    MalformedTimeSequence {
        /// Raw index of the later sample of the interval
        index: usize,
        /// `time[index] - time[index - 1]`
        delta: f64,
    },

    /// Samples and timestamps are not index-aligned
    #[error("sample/time length mismatch: {samples} samples, {times} timestamps")]
    LengthMismatch {
        /// Number of samples
        samples: usize,
        /// Number of timestamps
        times: usize,
    },

    /// A derived value is NaN or infinite
    #[error("non-finite value {value} derived at sample {index}")]
    NonFiniteValue {
        /// Raw index the derived value belongs to
        index: usize,
        /// The offending value
        value: f64,
    },
}

/// Drop the pre-roll sample (index 0) from a gauge sequence.
pub fn drop_pre_roll(values: &[f64]) -> Result<&[f64], SummarizeError> {
    if values.len() < MIN_GAUGE_SAMPLES {
        return Err(SummarizeError::InsufficientData {
            required: MIN_GAUGE_SAMPLES,
            actual: values.len(),
        });
    }
    Ok(&values[1..])
}

/// Per-interval rates `(v[i] - v[i-1]) / (t[i] - t[i-1])` for `i >= 1`.
///
/// Fails on a time sequence of different length, on fewer than
/// [`MIN_RATE_SAMPLES`] samples, and on any time delta that is not
/// strictly positive.
pub fn interval_rates(values: &[f64], times: &[f64]) -> Result<Vec<f64>, SummarizeError> {
    if values.len() != times.len() {
        return Err(SummarizeError::LengthMismatch {
            samples: values.len(),
            times: times.len(),
        });
    }
    if values.len() < MIN_RATE_SAMPLES {
        return Err(SummarizeError::InsufficientData {
            required: MIN_RATE_SAMPLES,
            actual: values.len(),
        });
    }

    values
        .windows(2)
        .zip(times.windows(2))
        .enumerate()
        .map(|(i, (v, t))| {
            let delta = t[1] - t[0];
            // Also rejects NaN
            if !(delta > 0.0) {
                return Err(SummarizeError::MalformedTimeSequence {
                    index: i + 1,
                    delta,
                });
            }
            Ok((v[1] - v[0]) / delta)
        })
        .collect()
}

/// Summarize a gauge (CPU percentage, active connections).
///
/// The first sample is dropped to line up with the delta-based reductions.
pub fn summarize_raw(values: &[f64]) -> Result<StatisticSet, SummarizeError> {
    reduce(drop_pre_roll(values)?)
}

/// Summarize a memory gauge given in bytes, reporting MiB.
pub fn summarize_memory(values: &[f64]) -> Result<StatisticSet, SummarizeError> {
    let megabytes: Vec<f64> = drop_pre_roll(values)?
        .iter()
        .map(|bytes| bytes / MEBIBYTE)
        .collect();
    reduce(&megabytes)
}

/// Summarize a byte accumulator as megabits per second.
pub fn summarize_throughput(values: &[f64], times: &[f64]) -> Result<StatisticSet, SummarizeError> {
    let mbps: Vec<f64> = interval_rates(values, times)?
        .into_iter()
        .map(|bytes_per_sec| bytes_per_sec / BYTES_PER_MEGABIT)
        .collect();
    reduce(&mbps)
}

/// Summarize a count accumulator (connections established) as counts per second.
pub fn summarize_counts(values: &[f64], times: &[f64]) -> Result<StatisticSet, SummarizeError> {
    reduce(&interval_rates(values, times)?)
}

/// Reduce a derived sequence; derived index `i` belongs to raw sample `i + 1`.
fn reduce(derived: &[f64]) -> Result<StatisticSet, SummarizeError> {
    if let Some((i, &value)) = derived.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(SummarizeError::NonFiniteValue {
            index: i + 1,
            value,
        });
    }
    // Callers have already enforced their minimum; this guards the empty case only
    StatisticSet::from_samples(derived).ok_or(SummarizeError::InsufficientData {
        required: 1,
        actual: 0,
    })
}
