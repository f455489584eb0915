//! JSON Output

use crate::report::{Report, ReportMeta};
use serde::Serialize;

/// A capture that could not be read, so never reached the aggregator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptureFailure {
    /// Capture identifier
    pub identifier: String,
    /// Why it could not be read
    pub message: String,
}

/// Report plus its generation metadata
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument<'a> {
    /// Generation metadata
    pub meta: &'a ReportMeta,
    /// Report contents
    pub report: &'a Report,
    /// Captures excluded before processing
    pub capture_errors: &'a [CaptureFailure],
}

/// Generate a prettified JSON report.
pub fn generate_json_report(
    report: &Report,
    meta: &ReportMeta,
    capture_errors: &[CaptureFailure],
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ReportDocument {
        meta,
        report,
        capture_errors,
    })
}
