//! Configuration loading from ltmsum.toml
//!
//! ltmsum configuration can be specified in a `ltmsum.toml` file. The
//! configuration is automatically discovered by walking up from the current
//! directory. Command-line flags override file values.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file searched for
pub const CONFIG_FILE_NAME: &str = "ltmsum.toml";

/// ltmsum configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LtmsumConfig {
    /// Capture discovery configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Report policy configuration
    #[serde(default)]
    pub report: ReportConfig,
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
}

/// Which files are treated as captures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// File extension of capture exports (without the dot)
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Regex a capture path must match to be included
    #[serde(default)]
    pub filter: Option<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            filter: None,
        }
    }
}

fn default_extension() -> String {
    "csv".to_string()
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format: "csv", "json", "human"
    #[serde(default = "default_format")]
    pub format: String,
    /// Output file; "-" writes to stdout
    #[serde(default = "default_output_path")]
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            path: default_output_path(),
        }
    }
}

fn default_format() -> String {
    "csv".to_string()
}
fn default_output_path() -> String {
    "summarized.csv".to_string()
}

/// Report policy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Exit with an error when any dataset is skipped
    #[serde(default)]
    pub fail_on_skipped: bool,
}

/// Runner configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Threads for parallel processing (0 = all cores)
    #[serde(default)]
    pub threads: usize,
}

impl LtmsumConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => {
                        tracing::debug!(path = %config_path.display(), "loaded configuration");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %config_path.display(),
                            error = %e,
                            "ignoring unreadable configuration"
                        );
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# ltmsum Configuration

[input]
# Extension of capture exports to summarize
extension = "csv"
# Only include captures whose path matches this regex (uncomment to enable)
# filter = "throughput_.*"

[output]
# Output format: csv, json, human
format = "csv"
# Output file ("-" for stdout)
path = "summarized.csv"

[report]
# Exit with an error if any capture could not be summarized
fail_on_skipped = false

[runner]
# Threads for parallel processing (0 = all cores)
threads = 0
"#
        .to_string()
    }
}
