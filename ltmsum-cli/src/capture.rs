//! Capture Loading
//!
//! Reads the comma-separated export of a capture's `raw_data` sheet. The
//! layout is positional, one tick per line after a header line:
//!
//! ```text
//! col  A         B        C        D       E               F                I               J
//!      run_time  sys_cpu  tmm_cpu  memory  client_bytes_in client_bytes_out server_bytes_in server_bytes_out
//! col  M                  N                 O                  P
//!      client_conn_active client_conn_count server_conn_active server_conn_count
//! ```
//!
//! Columns G, H, K and L are present in exports but not summarized.

use ltmsum_core::{RawDataset, RawSeries};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Column holding elapsed time
pub const RUN_TIME_COLUMN: usize = 0;

/// Column of every summarized raw series
pub const CAPTURE_LAYOUT: [(RawSeries, usize); 11] = [
    (RawSeries::SysCpu, 1),
    (RawSeries::TmmCpu, 2),
    (RawSeries::Memory, 3),
    (RawSeries::ClientBytesIn, 4),
    (RawSeries::ClientBytesOut, 5),
    (RawSeries::ServerBytesIn, 8),
    (RawSeries::ServerBytesOut, 9),
    (RawSeries::ClientConnActive, 12),
    (RawSeries::ClientConnCount, 13),
    (RawSeries::ServerConnActive, 14),
    (RawSeries::ServerConnCount, 15),
];

/// Errors reading a capture export
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// Capture file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// No header line
    #[error("{path} is empty (no header line)")]
    Empty {
        /// Capture file
        path: PathBuf,
    },

    /// A cell is not a finite number
    #[error("{path}:{line}: column {column} is not a number: {value:?}")]
    InvalidNumber {
        /// Capture file
        path: PathBuf,
        /// One-based line number
        line: usize,
        /// Spreadsheet column letter
        column: String,
        /// Cell contents
        value: String,
    },

    /// A tick is missing a summarized cell
    #[error("{path}:{line}: column {column} is empty")]
    MissingCell {
        /// Capture file
        path: PathBuf,
        /// One-based line number
        line: usize,
        /// Spreadsheet column letter
        column: String,
    },
}

/// Load a capture export from disk
pub fn load_capture(path: &Path) -> Result<RawDataset, CaptureError> {
    let content = std::fs::read_to_string(path).map_err(|source| CaptureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_capture(&content, path)
}

/// Parse the text of a capture export.
///
/// A series is present when the header line reaches its column. Every
/// non-blank line after the header is one tick and must carry a finite
/// number in `run_time` and in each present series, so all series come out
/// aligned to `run_time`.
pub fn parse_capture(content: &str, path: &Path) -> Result<RawDataset, CaptureError> {
    let mut lines = content.lines().enumerate();

    let header_width = match lines.next() {
        Some((_, header)) if !header.trim().is_empty() => header.split(',').count(),
        _ => {
            return Err(CaptureError::Empty {
                path: path.to_path_buf(),
            });
        }
    };

    let mut run_time = Vec::new();
    let mut columns: Vec<(RawSeries, usize, Vec<f64>)> = CAPTURE_LAYOUT
        .iter()
        .filter(|(_, col)| *col < header_width)
        .map(|&(series, col)| (series, col, Vec::new()))
        .collect();

    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let cells: Vec<&str> = line.split(',').map(str::trim).collect();
        let line_no = idx + 1;

        run_time.push(parse_cell(&cells, RUN_TIME_COLUMN, line_no, path)?);
        for (_, col, values) in columns.iter_mut() {
            values.push(parse_cell(&cells, *col, line_no, path)?);
        }
    }

    Ok(columns
        .into_iter()
        .fold(RawDataset::new(run_time), |dataset, (series, _, values)| {
            dataset.with_series(series, values)
        }))
}

fn parse_cell(cells: &[&str], col: usize, line: usize, path: &Path) -> Result<f64, CaptureError> {
    let cell = match cells.get(col) {
        None | Some(&"") => {
            return Err(CaptureError::MissingCell {
                path: path.to_path_buf(),
                line,
                column: column_letter(col),
            });
        }
        Some(cell) => *cell,
    };
    // f64's parser also takes "NaN" and "inf"
    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CaptureError::InvalidNumber {
            path: path.to_path_buf(),
            line,
            column: column_letter(col),
            value: cell.to_string(),
        }),
    }
}

/// Spreadsheet column name for a zero-based index (0 -> A, 26 -> AA)
pub fn column_letter(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    String::from_utf8_lossy(&name).into_owned()
}
