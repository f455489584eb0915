//! Output Formatting
//!
//! Human-readable output formatting for reports.
//!
//! Generates terminal-friendly output with:
//! - One block per dataset, one line per metric
//! - Mean, min, max and standard deviation with the metric's unit
//! - A trailing list of skipped datasets and their errors

use ltmsum_report::{CaptureFailure, Report};

/// Format a report for human-readable terminal display
pub fn format_human_output(report: &Report, capture_errors: &[CaptureFailure]) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("ltmsum Results\n");
    output.push_str(&"=".repeat(72));
    output.push_str("\n\n");

    for row in report.rows() {
        output.push_str(&format!("{}\n", row.identifier));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        for (metric, stats) in row.summary.iter() {
            output.push_str(&format!(
                "  {:<14} mean: {:>12.3}  min: {:>12.3}  max: {:>12.3}  stddev: {:>10.3} {}\n",
                metric.label(),
                stats.mean,
                stats.min,
                stats.max,
                stats.std_dev,
                metric.unit()
            ));
        }
        output.push('\n');
    }

    let skipped = report.skipped().len() + capture_errors.len();
    if skipped > 0 {
        output.push_str(&format!("Skipped ({})\n", skipped));
        output.push_str(&"-".repeat(72));
        output.push('\n');
        for entry in report.skipped() {
            output.push_str(&format!("  ✗ {}: {}\n", entry.identifier, entry.error));
        }
        for failure in capture_errors {
            output.push_str(&format!("  ✗ {}: {}\n", failure.identifier, failure.message));
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "Summary: {} summarized, {} skipped\n",
        report.rows().len(),
        skipped
    ));

    output
}
