//! Dataset Processing
//!
//! Parallel loading and summarization of captures.
//!
//! Uses Rayon to fan out across captures. Each capture is loaded and
//! processed independently, and results are re-keyed by identifier before
//! they reach the aggregator, so completion order never reorders rows.

use crate::capture::{CaptureError, load_capture};
use ltmsum_core::{DatasetError, DatasetSummary, process_dataset};
use ltmsum_report::CaptureFailure;
use rayon::prelude::*;
use std::path::PathBuf;

/// Outcome of one capture that could be read
pub type DatasetOutcome = (String, Result<DatasetSummary, DatasetError>);

/// Results of processing a batch of captures
#[derive(Debug, Default)]
pub struct ProcessedBatch {
    /// Per-dataset outcomes, sorted by identifier
    pub outcomes: Vec<DatasetOutcome>,
    /// Captures that could not be read at all, sorted by identifier
    pub capture_errors: Vec<(String, CaptureError)>,
}

impl ProcessedBatch {
    /// Number of datasets excluded for any reason
    pub fn excluded(&self) -> usize {
        self.capture_errors.len() + self.outcomes.iter().filter(|(_, r)| r.is_err()).count()
    }

    /// Unreadable captures as report entries
    pub fn capture_failures(&self) -> Vec<CaptureFailure> {
        self.capture_errors
            .iter()
            .map(|(identifier, error)| CaptureFailure {
                identifier: identifier.clone(),
                message: error.to_string(),
            })
            .collect()
    }
}

/// Load and summarize captures (parallelized with Rayon)
///
/// Identifiers are the capture paths as discovered.
pub fn process_captures(captures: &[PathBuf]) -> ProcessedBatch {
    let results: Vec<(String, Result<Result<DatasetSummary, DatasetError>, CaptureError>)> =
        captures
            .par_iter()
            .map(|path| {
                let identifier = path.display().to_string();
                let result = load_capture(path).map(|dataset| {
                    tracing::debug!(
                        dataset = %identifier,
                        ticks = dataset.len(),
                        "processing capture"
                    );
                    process_dataset(&dataset)
                });
                (identifier, result)
            })
            .collect();

    let mut batch = ProcessedBatch::default();
    for (identifier, result) in results {
        match result {
            Ok(outcome) => {
                if let Err(e) = &outcome {
                    tracing::warn!(dataset = %identifier, error = %e, "skipping dataset");
                }
                batch.outcomes.push((identifier, outcome));
            }
            Err(e) => {
                tracing::warn!(dataset = %identifier, error = %e, "skipping unreadable capture");
                batch.capture_errors.push((identifier, e));
            }
        }
    }

    // Key by identifier, not by the order work happened to finish
    batch.outcomes.sort_by(|a, b| a.0.cmp(&b.0));
    batch.capture_errors.sort_by(|a, b| a.0.cmp(&b.0));

    batch
}
