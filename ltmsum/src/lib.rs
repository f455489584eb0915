#![warn(missing_docs)]
//! # ltmsum
//!
//! Summarizes per-run performance-counter captures from a device under test
//! into one consolidated report comparing the runs.
//!
//! - **Gauge metrics** (CPU load, active connections) are summarized as-is
//! - **Memory** is reported in MiB
//! - **Byte accumulators** become per-interval throughput in Mb/s
//! - **Connection accumulators** become per-interval connections/s
//!
//! Each capture yields eleven statistic sets (mean, min, max, population
//! stddev). The report has one row per capture under a fixed 45-column
//! header; captures that cannot be summarized are listed separately and
//! never produce a row.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ltmsum::prelude::*;
//!
//! let dataset = RawDataset::new(run_time)
//!     .with_series(RawSeries::SysCpu, sys_cpu)
//!     // ... remaining series
//!     ;
//! let report = aggregate(
//!     vec![("run_a".to_string(), process_dataset(&dataset))],
//!     &ColumnSchema::standard(),
//! );
//! println!("{}", generate_csv_report(&report));
//! ```

// Re-export statistics
pub use ltmsum_stats::{
    BYTES_PER_MEGABIT, MEBIBYTE, StatisticSet, SummarizeError, summarize_counts,
    summarize_memory, summarize_raw, summarize_throughput,
};

// Re-export dataset processing
pub use ltmsum_core::{
    DatasetError, DatasetSummary, MetricKind, RawDataset, RawSeries, Reduction, SchemaMismatch,
    process_dataset,
};

// Re-export reporting
pub use ltmsum_report::{
    CaptureFailure, ColumnSchema, OutputFormat, Report, ReportMeta, ReportRow, SkippedDataset,
    Statistic, aggregate, generate_csv_report, generate_json_report,
};

// Re-export CLI entry points
pub use ltmsum_cli::{Cli, LtmsumConfig, run, run_with_cli};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        ColumnSchema, DatasetError, DatasetSummary, MetricKind, RawDataset, RawSeries, Report,
        StatisticSet, aggregate, generate_csv_report, process_dataset,
    };
}
