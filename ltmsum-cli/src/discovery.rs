//! Capture Discovery
//!
//! Builds the list of captures to summarize by walking a directory tree.
//!
//! Filtering options:
//! - File extension (case-insensitive)
//! - Regex pattern matching on the capture path
//! - Exclusion of the report file itself
//!
//! Ordering: captures are sorted lexicographically by path for deterministic rows.

use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Captures selected for processing
#[derive(Debug, Clone, Default)]
pub struct DiscoveryPlan {
    /// Ordered capture paths
    pub captures: Vec<PathBuf>,
}

impl DiscoveryPlan {
    /// Number of captures found
    pub fn len(&self) -> usize {
        self.captures.len()
    }

    /// Whether no capture was found
    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }
}

/// Walk `root` and collect capture files.
///
/// Unreadable directory entries are logged and skipped. `exclude` is
/// compared after canonicalization so the report being written is never
/// read back as a capture.
pub fn discover_captures(
    root: &Path,
    extension: &str,
    filter: Option<&Regex>,
    exclude: Option<&Path>,
) -> DiscoveryPlan {
    let excluded = exclude.and_then(|p| p.canonicalize().ok());

    let mut captures: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_extension(path, extension))
        .filter(|path| {
            // Apply regex filter on the path
            filter.is_none_or(|re| re.is_match(&path.to_string_lossy()))
        })
        .filter(|path| match &excluded {
            Some(out) => path.canonicalize().map(|p| &p != out).unwrap_or(true),
            None => true,
        })
        .collect();

    // Sort by path string so row order is stable across platforms and runs
    captures.sort_by(|a, b| a.to_string_lossy().cmp(&b.to_string_lossy()));

    tracing::debug!(root = %root.display(), count = captures.len(), "discovered captures");

    DiscoveryPlan { captures }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    let wanted = extension.trim_start_matches('.');
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(wanted))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "run_time\n").unwrap();
    }

    fn names(plan: &DiscoveryPlan, root: &Path) -> Vec<String> {
        plan.captures
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_recursive_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b/run2.csv");
        touch(dir.path(), "a.csv");
        touch(dir.path(), "b/run1.CSV");
        touch(dir.path(), "notes.txt");

        let plan = discover_captures(dir.path(), "csv", None, None);
        assert_eq!(names(&plan, dir.path()), vec!["a.csv", "b/run1.CSV", "b/run2.csv"]);
    }

    #[test]
    fn test_regex_filter() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "http_1k.csv");
        touch(dir.path(), "http_64k.csv");
        touch(dir.path(), "ssl_1k.csv");

        let re = Regex::new("http_").unwrap();
        let plan = discover_captures(dir.path(), "csv", Some(&re), None);
        assert_eq!(names(&plan, dir.path()), vec!["http_1k.csv", "http_64k.csv"]);
    }

    #[test]
    fn test_excludes_report_file() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "run.csv");
        touch(dir.path(), "summarized.csv");

        let out = dir.path().join("summarized.csv");
        let plan = discover_captures(dir.path(), ".csv", None, Some(&out));
        assert_eq!(names(&plan, dir.path()), vec!["run.csv"]);
    }

    #[test]
    fn test_empty_tree() {
        let dir = tempfile::tempdir().unwrap();
        let plan = discover_captures(dir.path(), "csv", None, None);
        assert!(plan.is_empty());
        assert_eq!(plan.len(), 0);
    }
}
