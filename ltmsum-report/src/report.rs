//! Report Data Structures
//!
//! A [`Report`] is one header plus one row per summarized dataset. Rows keep
//! the order they were handed in; sorting by identifier is the caller's job.
//! Datasets that failed processing are listed in [`Report::skipped`] and
//! never produce a row.

use chrono::{DateTime, Utc};
use ltmsum_core::{DatasetError, DatasetSummary, MetricKind};
use serde::ser::{Serialize, SerializeSeq, SerializeStruct, Serializer};

/// Label of the identifier column
pub const IDENTIFIER_LABEL: &str = "Test Name";

/// One of the four statistics expanded per metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Statistic {
    /// Arithmetic mean
    Mean,
    /// Minimum
    Min,
    /// Maximum
    Max,
    /// Population standard deviation
    StdDev,
}

impl Statistic {
    /// Column order within a metric
    pub const ALL: [Statistic; 4] = [
        Statistic::Mean,
        Statistic::Min,
        Statistic::Max,
        Statistic::StdDev,
    ];

    /// Column label suffix
    pub fn suffix(self) -> &'static str {
        match self {
            Statistic::Mean => "Avg",
            Statistic::Min => "Min",
            Statistic::Max => "Max",
            Statistic::StdDev => "StDev",
        }
    }

    /// Pick this statistic out of a statistic set
    pub fn of(self, stats: &ltmsum_stats::StatisticSet) -> f64 {
        match self {
            Statistic::Mean => stats.mean,
            Statistic::Min => stats.min,
            Statistic::Max => stats.max,
            Statistic::StdDev => stats.std_dev,
        }
    }
}

/// Fixed column layout of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    columns: Vec<(MetricKind, Statistic)>,
}

impl ColumnSchema {
    /// Every metric in report order, each expanded to mean/min/max/stdev
    pub fn standard() -> Self {
        let columns = MetricKind::ALL
            .into_iter()
            .flat_map(|metric| Statistic::ALL.into_iter().map(move |stat| (metric, stat)))
            .collect();
        Self { columns }
    }

    /// Metric columns, identifier column excluded
    pub fn metric_columns(&self) -> &[(MetricKind, Statistic)] {
        &self.columns
    }

    /// Header labels including the leading identifier column
    pub fn labels(&self) -> Vec<String> {
        std::iter::once(IDENTIFIER_LABEL.to_string())
            .chain(
                self.columns
                    .iter()
                    .map(|(metric, stat)| format!("{} {}", metric.label(), stat.suffix())),
            )
            .collect()
    }
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self::standard()
    }
}

impl Serialize for ColumnSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let labels = self.labels();
        let mut seq = serializer.serialize_seq(Some(labels.len()))?;
        for label in &labels {
            seq.serialize_element(label)?;
        }
        seq.end()
    }
}

/// One report row: a dataset identifier and its summary
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ReportRow {
    /// Dataset identifier, typically a capture path
    pub identifier: String,
    /// The dataset's statistic sets
    pub summary: DatasetSummary,
}

impl ReportRow {
    /// Numeric cells in schema order
    pub fn cells(&self, schema: &ColumnSchema) -> Vec<f64> {
        schema
            .metric_columns()
            .iter()
            .map(|(metric, stat)| stat.of(self.summary.get(*metric)))
            .collect()
    }
}

/// A dataset excluded from the report, with the reason
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedDataset {
    /// Dataset identifier
    pub identifier: String,
    /// Why processing failed
    pub error: DatasetError,
}

impl Serialize for SkippedDataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SkippedDataset", 3)?;
        state.serialize_field("identifier", &self.identifier)?;
        state.serialize_field("kind", self.error.kind())?;
        state.serialize_field("message", &self.error.to_string())?;
        state.end()
    }
}

/// Consolidated report across datasets
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Report {
    #[serde(rename = "columns")]
    schema: ColumnSchema,
    rows: Vec<ReportRow>,
    skipped: Vec<SkippedDataset>,
}

impl Report {
    /// Header labels (identifier + metric columns)
    pub fn header(&self) -> Vec<String> {
        self.schema.labels()
    }

    /// Data rows, in input order
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Rows expanded to `(identifier, cells)`
    pub fn data_rows(&self) -> impl Iterator<Item = (&str, Vec<f64>)> + '_ {
        self.rows
            .iter()
            .map(|row| (row.identifier.as_str(), row.cells(&self.schema)))
    }

    /// Datasets excluded from the report, in input order
    pub fn skipped(&self) -> &[SkippedDataset] {
        &self.skipped
    }

    /// Whether every dataset produced a row
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Assemble a report from per-dataset outcomes.
///
/// Outcomes must already be in the desired row order. Successful summaries
/// become rows and failures become [`SkippedDataset`] entries, both keeping
/// input order.
pub fn aggregate<I>(outcomes: I, schema: &ColumnSchema) -> Report
where
    I: IntoIterator<Item = (String, Result<DatasetSummary, DatasetError>)>,
{
    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for (identifier, outcome) in outcomes {
        match outcome {
            Ok(summary) => rows.push(ReportRow {
                identifier,
                summary,
            }),
            Err(error) => skipped.push(SkippedDataset { identifier, error }),
        }
    }

    Report {
        schema: schema.clone(),
        rows,
        skipped,
    }
}

/// Report metadata added at output time
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ReportMeta {
    /// ltmsum version
    pub version: String,
    /// Generation time
    pub timestamp: DateTime<Utc>,
    /// Directory datasets were discovered under
    pub source_root: String,
    /// Number of datasets fed to the aggregator
    pub dataset_count: usize,
}
