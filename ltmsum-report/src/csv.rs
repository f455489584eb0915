//! CSV Output
//!
//! Header row plus one row per dataset, numeric cells in full precision.

use crate::report::Report;

/// Generate a CSV report.
///
/// Identifiers are quoted when they contain a delimiter, quote or newline.
pub fn generate_csv_report(report: &Report) -> String {
    let mut output = String::new();

    let header: Vec<String> = report.header().iter().map(|l| escape(l)).collect();
    output.push_str(&header.join(","));
    output.push('\n');

    for (identifier, cells) in report.data_rows() {
        output.push_str(&escape(identifier));
        for cell in cells {
            output.push(',');
            output.push_str(&cell.to_string());
        }
        output.push('\n');
    }

    output
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
