#![warn(missing_docs)]
//! ltmsum Core
//!
//! Per-dataset processing for performance-counter captures. A capture
//! holds one elapsed-time column plus eleven raw counter columns; this crate
//! validates their alignment and reduces them to eleven statistic sets,
//! one per [`MetricKind`].

mod dataset;
mod metric;

pub use dataset::{DatasetError, DatasetSummary, RawDataset, SchemaMismatch, process_dataset};
pub use metric::{MetricKind, RawSeries, Reduction};
