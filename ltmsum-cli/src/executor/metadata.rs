//! Report Metadata
//!
//! Generation metadata attached to JSON output. Kept out of the report rows
//! so row contents stay identical between runs over the same captures.

use chrono::Utc;
use ltmsum_report::ReportMeta;
use std::path::Path;

/// Build report metadata for a run over `root`
pub fn build_report_meta(root: &Path, dataset_count: usize) -> ReportMeta {
    ReportMeta {
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        source_root: root.display().to_string(),
        dataset_count,
    }
}
