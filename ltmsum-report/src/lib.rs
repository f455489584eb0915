#![warn(missing_docs)]
//! ltmsum Report - Aggregation and Output
//!
//! Lays per-dataset summaries out as one row per dataset under a fixed
//! 45-column header, and renders the result as:
//! - CSV (spreadsheet-compatible)
//! - JSON (machine-readable, with metadata)

mod csv;
mod json;
mod report;

pub use csv::generate_csv_report;
pub use json::{CaptureFailure, ReportDocument, generate_json_report};
pub use report::{
    ColumnSchema, IDENTIFIER_LABEL, Report, ReportMeta, ReportRow, SkippedDataset, Statistic,
    aggregate,
};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// CSV for spreadsheets
    Csv,
    /// JSON with metadata
    Json,
    /// Human-readable terminal output
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
