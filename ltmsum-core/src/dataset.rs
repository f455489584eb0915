//! Dataset Processing
//!
//! Turns one capture's raw columns into a [`DatasetSummary`]:
//!
//! ```text
//! RawDataset (run_time + 11 raw series)
//!       │
//!       ▼
//! ┌──────────────┐
//! │   validate   │  every series present, every length == run_time
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │    reduce    │  one Reduction per MetricKind, fail-fast
//! └──────┬───────┘
//!        │
//!        ▼
//! DatasetSummary (11 statistic sets)
//! ```

use crate::metric::{MetricKind, RawSeries, Reduction};
use ltmsum_stats::{
    StatisticSet, SummarizeError, summarize_counts, summarize_memory, summarize_raw,
    summarize_throughput,
};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::ops::Index;
use thiserror::Error;

/// Raw columns of a single capture, all aligned to `run_time`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDataset {
    /// Elapsed time of each tick, seconds
    pub run_time: Vec<f64>,
    /// Metric columns; a missing entry means the capture did not provide it
    pub series: BTreeMap<RawSeries, Vec<f64>>,
}

impl RawDataset {
    /// Start a dataset from its elapsed-time column
    pub fn new(run_time: Vec<f64>) -> Self {
        Self {
            run_time,
            series: BTreeMap::new(),
        }
    }

    /// Add or replace a metric column
    pub fn with_series(mut self, series: RawSeries, values: Vec<f64>) -> Self {
        self.series.insert(series, values);
        self
    }

    /// Samples of one column, if present
    pub fn get(&self, series: RawSeries) -> Option<&[f64]> {
        self.series.get(&series).map(Vec::as_slice)
    }

    /// Number of ticks captured
    pub fn len(&self) -> usize {
        self.run_time.len()
    }

    /// Whether no ticks were captured
    pub fn is_empty(&self) -> bool {
        self.run_time.is_empty()
    }

    /// Check that every column is present and aligned to `run_time`
    pub fn validate(&self) -> Result<(), SchemaMismatch> {
        for series in RawSeries::ALL {
            let values = self.get(series).ok_or(SchemaMismatch::MissingSeries(series))?;
            if values.len() != self.run_time.len() {
                return Err(SchemaMismatch::LengthMismatch {
                    series,
                    expected: self.run_time.len(),
                    actual: values.len(),
                });
            }
        }
        Ok(())
    }
}

/// Structural problem with a capture's columns
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaMismatch {
    /// A required series was not supplied
    #[error("series {0} is missing")]
    MissingSeries(RawSeries),

    /// A series is not aligned to `run_time`
    #[error("series {series} has {actual} samples, run_time has {expected}")]
    LengthMismatch {
        /// The misaligned series
        series: RawSeries,
        /// Length of `run_time`
        expected: usize,
        /// Length of the series
        actual: usize,
    },
}

/// Reasons a dataset cannot be summarized
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    /// A metric has too few samples for its reduction
    #[error("insufficient data for {metric}: {required} samples required, got {actual}")]
    InsufficientData {
        /// First metric that could not be reduced
        metric: MetricKind,
        /// Minimum raw length for its reduction
        required: usize,
        /// Raw length supplied
        actual: usize,
    },

    /// A rate metric hit a zero or negative time delta
    #[error("malformed time sequence for {metric}: non-positive delta {delta} at sample {index}")]
    MalformedTimeSequence {
        /// First rate metric that hit the bad interval
        metric: MetricKind,
        /// Raw index of the later sample of the interval
        index: usize,
        /// The offending time delta
        delta: f64,
    },

    /// A metric's derived sequence contains NaN or infinity
    #[error("non-finite value for {metric}: {value} at sample {index}")]
    NonFiniteValue {
        /// First metric with a non-finite value
        metric: MetricKind,
        /// Raw index the value was derived at
        index: usize,
        /// The offending value
        value: f64,
    },

    /// Series missing or misaligned
    #[error("schema mismatch: {0}")]
    SchemaMismatch(#[from] SchemaMismatch),
}

impl DatasetError {
    /// Short machine-readable error category
    pub fn kind(&self) -> &'static str {
        match self {
            DatasetError::InsufficientData { .. } => "insufficient_data",
            DatasetError::MalformedTimeSequence { .. } => "malformed_time_sequence",
            DatasetError::NonFiniteValue { .. } => "non_finite_value",
            DatasetError::SchemaMismatch(_) => "schema_mismatch",
        }
    }

    fn from_summarize(metric: MetricKind, err: SummarizeError) -> Self {
        match err {
            SummarizeError::InsufficientData { required, actual } => {
                DatasetError::InsufficientData {
                    metric,
                    required,
                    actual,
                }
            }
            SummarizeError::MalformedTimeSequence { index, delta } => {
                DatasetError::MalformedTimeSequence {
                    metric,
                    index,
                    delta,
                }
            }
            SummarizeError::NonFiniteValue { index, value } => DatasetError::NonFiniteValue {
                metric,
                index,
                value,
            },
            SummarizeError::LengthMismatch { samples, times } => {
                DatasetError::SchemaMismatch(SchemaMismatch::LengthMismatch {
                    series: metric.source(),
                    expected: times,
                    actual: samples,
                })
            }
        }
    }
}

/// The eleven statistic sets of one capture, indexed by [`MetricKind`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetSummary {
    stats: [StatisticSet; MetricKind::COUNT],
}

impl DatasetSummary {
    /// Statistic set of one metric
    pub fn get(&self, metric: MetricKind) -> &StatisticSet {
        &self.stats[metric.index()]
    }

    /// All metrics with their statistic sets, in report order
    pub fn iter(&self) -> impl Iterator<Item = (MetricKind, &StatisticSet)> {
        MetricKind::ALL.into_iter().zip(self.stats.iter())
    }
}

impl Index<MetricKind> for DatasetSummary {
    type Output = StatisticSet;

    fn index(&self, metric: MetricKind) -> &StatisticSet {
        self.get(metric)
    }
}

impl Serialize for DatasetSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(MetricKind::COUNT))?;
        for (metric, stats) in self.iter() {
            map.serialize_entry(metric.key(), stats)?;
        }
        map.end()
    }
}

/// Summarize one capture.
///
/// Validates the schema, then reduces every metric in report order. The
/// first failing reduction aborts the dataset; no partial summary is built.
pub fn process_dataset(dataset: &RawDataset) -> Result<DatasetSummary, DatasetError> {
    dataset.validate()?;

    let mut stats = [StatisticSet {
        mean: 0.0,
        min: 0.0,
        max: 0.0,
        std_dev: 0.0,
    }; MetricKind::COUNT];

    for metric in MetricKind::ALL {
        let values = dataset
            .get(metric.source())
            .ok_or(SchemaMismatch::MissingSeries(metric.source()))?;
        stats[metric.index()] = summarize_metric(metric, values, &dataset.run_time)?;
    }

    Ok(DatasetSummary { stats })
}

fn summarize_metric(
    metric: MetricKind,
    values: &[f64],
    run_time: &[f64],
) -> Result<StatisticSet, DatasetError> {
    let result = match metric.reduction() {
        Reduction::Raw => summarize_raw(values),
        Reduction::Memory => summarize_memory(values),
        Reduction::Throughput => summarize_throughput(values, run_time),
        Reduction::Counts => summarize_counts(values, run_time),
    };
    result.map_err(|e| DatasetError::from_summarize(metric, e))
}
