//! Report Executor
//!
//! Turns discovered captures into a report.
//!
//! ## Pipeline Overview
//!
//! ```text
//! capture paths (discovery)
//!       │
//!       ▼
//! ┌─────────────┐
//! │ processing  │  Load + summarize each capture (parallel)
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │  aggregate  │  One row per dataset, failures listed as skipped
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  CSV / JSON / human output
//! └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`processing`] - Parallel capture loading and dataset processing
//! - [`formatting`] - Human-readable output formatting
//! - [`metadata`] - Report metadata collection

mod formatting;
mod metadata;
mod processing;

// Re-export public API
pub use formatting::format_human_output;
pub use metadata::build_report_meta;
pub use processing::{DatasetOutcome, ProcessedBatch, process_captures};
