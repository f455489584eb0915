#![warn(missing_docs)]
//! ltmsum CLI Library
//!
//! Command-line driver around the summarization engine: discovers capture
//! exports under a directory, summarizes each one, and writes the
//! consolidated report.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     ltmsum_cli::run()
//! }
//! ```

mod capture;
mod config;
mod discovery;
mod executor;

pub use capture::{
    CAPTURE_LAYOUT, CaptureError, RUN_TIME_COLUMN, column_letter, load_capture, parse_capture,
};
pub use config::*;
pub use discovery::{DiscoveryPlan, discover_captures};
pub use executor::{
    DatasetOutcome, ProcessedBatch, build_report_meta, format_human_output, process_captures,
};

use clap::{Parser, Subcommand};
use ltmsum_report::{
    CaptureFailure, ColumnSchema, OutputFormat, Report, aggregate, generate_csv_report,
    generate_json_report,
};
use rayon::ThreadPoolBuilder;
use regex::Regex;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// ltmsum CLI arguments
#[derive(Parser, Debug)]
#[command(name = "ltmsum")]
#[command(
    author,
    version,
    about = "ltmsum - summarize performance-counter captures into one report"
)]
pub struct Cli {
    /// Optional subcommand (List, Run, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory to search for captures
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Only include captures whose path matches this regex
    #[arg(long)]
    pub filter: Option<String>,

    /// Capture file extension
    #[arg(long)]
    pub extension: Option<String>,

    /// Output format: csv, json, human
    #[arg(long)]
    pub format: Option<String>,

    /// Output file ("-" for stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exit with an error if any capture is skipped
    #[arg(long)]
    pub strict: bool,

    /// Number of threads for parallel processing
    /// 0 = use all available cores (default), 1 = single-threaded
    #[arg(long, short = 'j')]
    pub threads: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List discovered captures without processing them
    List,
    /// Summarize captures (default)
    Run,
    /// Print a default ltmsum.toml
    Init,
}

/// Run the ltmsum CLI with process arguments.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if something goes wrong.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the ltmsum CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Initialize logging; RUST_LOG wins when set
    let default_filter = if cli.verbose {
        "ltmsum=debug"
    } else {
        "ltmsum=info"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init();

    // Discover ltmsum.toml configuration (CLI flags override)
    let config = LtmsumConfig::discover().unwrap_or_default();

    match cli.command {
        Some(Commands::List) => list_captures(&cli, &config),
        Some(Commands::Init) => {
            print!("{}", LtmsumConfig::default_toml());
            Ok(())
        }
        Some(Commands::Run) | None => summarize(&cli, &config),
    }
}

/// Resolved settings: config file values with CLI overrides applied
#[derive(Debug, Clone)]
struct RunSettings {
    extension: String,
    filter: Option<Regex>,
    format: OutputFormat,
    output: PathBuf,
    fail_on_skipped: bool,
    threads: usize,
}

fn resolve_settings(cli: &Cli, config: &LtmsumConfig) -> anyhow::Result<RunSettings> {
    let filter = cli
        .filter
        .as_deref()
        .or(config.input.filter.as_deref())
        .map(Regex::new)
        .transpose()
        .map_err(|e| anyhow::anyhow!("Invalid filter pattern: {}", e))?;

    let format = cli
        .format
        .as_deref()
        .unwrap_or(&config.output.format)
        .parse::<OutputFormat>()
        .map_err(|e| anyhow::anyhow!(e))?;

    Ok(RunSettings {
        extension: cli
            .extension
            .clone()
            .unwrap_or_else(|| config.input.extension.clone()),
        filter,
        format,
        output: cli
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.output.path)),
        fail_on_skipped: cli.strict || config.report.fail_on_skipped,
        threads: cli.threads.unwrap_or(config.runner.threads),
    })
}

fn is_stdout(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn discover(cli: &Cli, settings: &RunSettings) -> DiscoveryPlan {
    let exclude = (!is_stdout(&settings.output)).then_some(settings.output.as_path());
    discover_captures(
        &cli.root,
        &settings.extension,
        settings.filter.as_ref(),
        exclude,
    )
}

fn list_captures(cli: &Cli, config: &LtmsumConfig) -> anyhow::Result<()> {
    let settings = resolve_settings(cli, config)?;
    let plan = discover(cli, &settings);

    println!("ltmsum Plan:");
    for path in &plan.captures {
        println!("├── {}", path.display());
    }
    println!("{} captures found.", plan.len());

    Ok(())
}

fn summarize(cli: &Cli, config: &LtmsumConfig) -> anyhow::Result<()> {
    let settings = resolve_settings(cli, config)?;

    // Configure Rayon thread pool for processing
    if settings.threads > 0 {
        ThreadPoolBuilder::new()
            .num_threads(settings.threads)
            .build_global()
            .ok();
    }

    let plan = discover(cli, &settings);
    if plan.is_empty() {
        tracing::warn!(
            root = %cli.root.display(),
            extension = %settings.extension,
            "no captures found"
        );
    }

    let start_time = Instant::now();
    let batch = process_captures(&plan.captures);
    let excluded = batch.excluded();
    let failures = batch.capture_failures();
    let report = aggregate(batch.outcomes, &ColumnSchema::standard());

    tracing::info!(
        summarized = report.rows().len(),
        skipped = excluded,
        elapsed_ms = start_time.elapsed().as_secs_f64() * 1000.0,
        "report built"
    );

    let output = render(&report, &failures, &settings, cli, plan.len())?;

    // Write output
    if is_stdout(&settings.output) {
        print!("{}", output);
    } else {
        let mut file = std::fs::File::create(&settings.output)?;
        file.write_all(output.as_bytes())?;
        tracing::info!(path = %settings.output.display(), "report written");
    }

    if settings.fail_on_skipped && excluded > 0 {
        return Err(anyhow::anyhow!(
            "{} capture(s) could not be summarized",
            excluded
        ));
    }

    Ok(())
}

fn render(
    report: &Report,
    failures: &[CaptureFailure],
    settings: &RunSettings,
    cli: &Cli,
    dataset_count: usize,
) -> anyhow::Result<String> {
    Ok(match settings.format {
        OutputFormat::Csv => generate_csv_report(report),
        OutputFormat::Json => {
            let meta = build_report_meta(&cli.root, dataset_count);
            generate_json_report(report, &meta, failures)?
        }
        OutputFormat::Human => format_human_output(report, failures),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("ltmsum").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults_come_from_config() {
        let settings = resolve_settings(&cli(&[]), &LtmsumConfig::default()).unwrap();

        assert_eq!(settings.extension, "csv");
        assert_eq!(settings.format, OutputFormat::Csv);
        assert_eq!(settings.output, PathBuf::from("summarized.csv"));
        assert!(settings.filter.is_none());
        assert!(!settings.fail_on_skipped);
        assert_eq!(settings.threads, 0);
    }

    #[test]
    fn test_cli_overrides_config() {
        let mut config = LtmsumConfig::default();
        config.input.filter = Some("config_only".to_string());
        config.runner.threads = 8;

        let settings = resolve_settings(
            &cli(&[
                "captures",
                "--format",
                "json",
                "--filter",
                "http_.*",
                "-o",
                "-",
                "--strict",
                "-j",
                "2",
            ]),
            &config,
        )
        .unwrap();

        assert_eq!(settings.format, OutputFormat::Json);
        assert!(settings.filter.unwrap().is_match("http_1k.csv"));
        assert!(is_stdout(&settings.output));
        assert!(settings.fail_on_skipped);
        assert_eq!(settings.threads, 2);
    }

    #[test]
    fn test_bad_format_rejected() {
        assert!(resolve_settings(&cli(&["--format", "xlsx"]), &LtmsumConfig::default()).is_err());
    }

    #[test]
    fn test_bad_filter_rejected() {
        assert!(resolve_settings(&cli(&["--filter", "("]), &LtmsumConfig::default()).is_err());
    }

    #[test]
    fn test_subcommand_parsing() {
        assert!(matches!(cli(&["list"]).command, Some(Commands::List)));
        assert!(matches!(cli(&["init"]).command, Some(Commands::Init)));
        assert!(cli(&[]).command.is_none());
    }
}
