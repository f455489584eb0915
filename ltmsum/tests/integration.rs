//! Integration tests for ltmsum
//!
//! These tests verify the end-to-end behavior from raw captures to report.

use ltmsum::{
    Cli, ColumnSchema, DatasetError, MetricKind, OutputFormat, RawDataset, RawSeries,
    aggregate, generate_csv_report, process_dataset, run_with_cli, summarize_counts,
    summarize_throughput,
};
use std::path::{Path, PathBuf};

/// Build a well-formed dataset of `ticks` samples, one second apart
fn dataset(ticks: usize) -> RawDataset {
    let run_time: Vec<f64> = (0..ticks).map(|i| i as f64).collect();
    let mut dataset = RawDataset::new(run_time);
    for series in RawSeries::ALL {
        let values: Vec<f64> = (0..ticks).map(|i| (i * 250_000) as f64).collect();
        dataset = dataset.with_series(series, values);
    }
    dataset
}

fn capture_text(run_time: &[f64]) -> String {
    let mut text = String::from(
        "run_time,sys_cpu,tmm_cpu,memory,cbi,cbo,cpi,cpo,sbi,sbo,spi,spo,cca,ccc,sca,scc\n",
    );
    for (i, t) in run_time.iter().enumerate() {
        let v = (i * 125_000) as f64;
        let mut cells = vec![t.to_string()];
        cells.extend((1..16).map(|_| v.to_string()));
        text.push_str(&cells.join(","));
        text.push('\n');
    }
    text
}

fn cli_for(root: &Path, output: PathBuf, format: OutputFormat) -> Cli {
    let format = match format {
        OutputFormat::Csv => "csv",
        OutputFormat::Json => "json",
        OutputFormat::Human => "human",
    };
    Cli {
        command: None,
        root: root.to_path_buf(),
        filter: None,
        extension: Some("csv".to_string()),
        format: Some(format.to_string()),
        output: Some(output),
        strict: false,
        threads: None,
        verbose: false,
    }
}

/// Scenario from the documentation: throughput of exactly 1 Mb/s
#[test]
fn test_throughput_one_mbps() {
    let stats = summarize_throughput(&[0.0, 125_000.0, 250_000.0], &[0.0, 1.0, 2.0]).unwrap();
    assert_eq!(stats.mean, 1.0);
    assert_eq!(stats.min, 1.0);
    assert_eq!(stats.max, 1.0);
    assert_eq!(stats.std_dev, 0.0);
}

/// Scenario from the documentation: connection rates 5 and 10 per second
#[test]
fn test_count_rates() {
    let stats = summarize_counts(&[10.0, 15.0, 25.0], &[0.0, 1.0, 2.0]).unwrap();
    assert_eq!(stats.mean, 7.5);
    assert_eq!(stats.min, 5.0);
    assert_eq!(stats.max, 10.0);
}

/// A malformed dataset is skipped, never rendered as a row of placeholders
#[test]
fn test_malformed_dataset_is_skipped() {
    let good = dataset(5);
    let mut bad = dataset(5);
    bad.run_time = vec![0.0, 1.0, 2.0, 2.0, 3.0];

    let report = aggregate(
        vec![
            ("good".to_string(), process_dataset(&good)),
            ("stalled".to_string(), process_dataset(&bad)),
        ],
        &ColumnSchema::standard(),
    );

    assert_eq!(report.rows().len(), 1);
    assert_eq!(report.rows()[0].identifier, "good");
    assert_eq!(report.skipped().len(), 1);
    assert_eq!(report.skipped()[0].identifier, "stalled");
    assert!(matches!(
        report.skipped()[0].error,
        DatasetError::MalformedTimeSequence { index: 3, .. }
    ));

    for (_, cells) in report.data_rows() {
        assert_eq!(cells.len(), 44);
        assert!(cells.iter().all(|c| c.is_finite()));
    }
}

/// Row order is the caller's order, not re-sorted
#[test]
fn test_row_order_preserved() {
    let report = aggregate(
        vec![
            ("b".to_string(), process_dataset(&dataset(4))),
            ("a".to_string(), process_dataset(&dataset(4))),
        ],
        &ColumnSchema::standard(),
    );

    let csv = generate_csv_report(&report);
    let ids: Vec<&str> = csv
        .lines()
        .skip(1)
        .map(|l| l.split(',').next().unwrap())
        .collect();
    assert_eq!(ids, vec!["b", "a"]);
}

/// Every metric derives from the same number of ticks
#[test]
fn test_dataset_summary_values() {
    let summary = process_dataset(&dataset(4)).unwrap();

    // 250 000 bytes/s = 2 Mb/s on every interval
    for metric in [
        MetricKind::ClientMbIn,
        MetricKind::ClientMbOut,
        MetricKind::ServerMbIn,
        MetricKind::ServerMbOut,
    ] {
        assert_eq!(summary[metric].mean, 2.0);
        assert_eq!(summary[metric].std_dev, 0.0);
    }
    assert_eq!(summary[MetricKind::ClientCps].mean, 250_000.0);
    // Gauge: [250000, 500000, 750000] after dropping the pre-roll value
    assert_eq!(summary[MetricKind::SysCpu].min, 250_000.0);
    assert_eq!(summary[MetricKind::SysCpu].max, 750_000.0);
}

/// Full CLI run: discovery, loading, processing, CSV output
#[test]
fn test_cli_csv_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let captures = dir.path().join("captures");
    std::fs::create_dir_all(captures.join("nested")).unwrap();
    std::fs::write(captures.join("b_run.csv"), capture_text(&[0.0, 1.0, 2.0, 3.0])).unwrap();
    std::fs::write(
        captures.join("nested").join("a_run.csv"),
        capture_text(&[0.0, 2.0, 4.0]),
    )
    .unwrap();
    std::fs::write(
        captures.join("c_stalled.csv"),
        capture_text(&[0.0, 1.0, 1.0, 2.0]),
    )
    .unwrap();
    std::fs::write(captures.join("notes.txt"), "not a capture").unwrap();

    let out = dir.path().join("summary.csv");
    run_with_cli(cli_for(&captures, out.clone(), OutputFormat::Csv)).unwrap();

    let csv = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    // Header + two good captures; the stalled one is skipped
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Test Name,Sys CPU Avg"));
    assert!(lines[1].contains("b_run.csv"));
    assert!(lines[2].contains("a_run.csv"));
    assert!(!csv.contains("c_stalled.csv"));
    assert!(!csv.contains("NaN"));

    // b_run: 125 000 bytes per 1s interval = 1 Mb/s
    let b_cells: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(b_cells[13], "1");
    // a_run: 125 000 bytes per 2s interval = 0.5 Mb/s
    let a_cells: Vec<&str> = lines[2].split(',').collect();
    assert_eq!(a_cells[13], "0.5");
}

/// Strict mode fails the run when a capture is skipped, after writing the report
#[test]
fn test_cli_strict_mode() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ok.csv"), capture_text(&[0.0, 1.0, 2.0])).unwrap();
    std::fs::write(dir.path().join("short.csv"), capture_text(&[0.0, 1.0])).unwrap();
    let broken = capture_text(&[0.0, 1.0, 2.0]).replacen("\n1,", "\nnot_a_time,", 1);
    std::fs::write(dir.path().join("broken.csv"), broken).unwrap();

    let out = dir.path().join("report.json");
    let mut cli = cli_for(dir.path(), out.clone(), OutputFormat::Json);
    cli.strict = true;

    assert!(run_with_cli(cli).is_err());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["meta"]["dataset_count"], 3);
    assert_eq!(json["report"]["rows"].as_array().unwrap().len(), 1);
    assert_eq!(json["report"]["skipped"][0]["kind"], "insufficient_data");

    let capture_errors = json["capture_errors"].as_array().unwrap();
    assert_eq!(capture_errors.len(), 1);
    assert!(
        capture_errors[0]["identifier"]
            .as_str()
            .unwrap()
            .ends_with("broken.csv")
    );
    assert!(
        capture_errors[0]["message"]
            .as_str()
            .unwrap()
            .contains("not a number")
    );
}

/// NaN and inf cells never reach the report, and strict mode notices
#[test]
fn test_cli_non_finite_cells_are_excluded() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ok.csv"), capture_text(&[0.0, 1.0, 2.0])).unwrap();

    // Last row: sys_cpu is NaN, client_bytes_in is inf
    let mut lines: Vec<String> = capture_text(&[0.0, 1.0, 2.0])
        .lines()
        .map(str::to_string)
        .collect();
    let last = lines.len() - 1;
    let mut cells: Vec<String> = lines[last].split(',').map(str::to_string).collect();
    cells[1] = "NaN".to_string();
    cells[4] = "inf".to_string();
    lines[last] = cells.join(",");
    std::fs::write(dir.path().join("nan.csv"), lines.join("\n")).unwrap();

    let out = dir.path().join("summary.csv");
    run_with_cli(cli_for(dir.path(), out.clone(), OutputFormat::Csv)).unwrap();

    let csv = std::fs::read_to_string(&out).unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert!(!csv.contains("nan.csv"));
    for line in csv.lines().skip(1) {
        for cell in line.split(',').skip(1) {
            assert!(cell.parse::<f64>().unwrap().is_finite(), "cell {cell:?}");
        }
    }

    let mut cli = cli_for(dir.path(), out, OutputFormat::Csv);
    cli.strict = true;
    assert!(run_with_cli(cli).is_err());
}

/// Library callers get the same guarantee without the loader
#[test]
fn test_non_finite_dataset_is_skipped() {
    let mut bad = dataset(4);
    bad.series.get_mut(&RawSeries::ServerConnActive).unwrap()[2] = f64::NAN;

    let report = aggregate(
        vec![
            ("good".to_string(), process_dataset(&dataset(4))),
            ("nan".to_string(), process_dataset(&bad)),
        ],
        &ColumnSchema::standard(),
    );

    assert_eq!(report.rows().len(), 1);
    assert!(matches!(
        report.skipped()[0].error,
        DatasetError::NonFiniteValue {
            metric: MetricKind::ServerCc,
            index: 2,
            ..
        }
    ));
    assert!(!generate_csv_report(&report).contains("NaN"));
}
