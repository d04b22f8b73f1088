//! Tests for CLI argument parsing and the binary end-to-end

use assert_cmd::Command;
use clap::Parser;
use predicates::prelude::*;
use readmit::cli::Cli;
use std::path::PathBuf;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["readmit"]);

    assert_eq!(cli.input, PathBuf::from("diabetic_data.csv"));
    assert_eq!(cli.charts_dir, PathBuf::from("."));
    assert_eq!(cli.infer_schema_length, 10000);
    assert!(cli.iqr_multiplier.is_none());
    assert!(cli.missing_threshold.is_none());
    assert!(!cli.no_charts);
    assert!(cli.export.is_none(), "Export should be disabled by default");
    assert!(cli.report.is_none(), "Run report should be disabled by default");
}

#[test]
fn test_cli_defaults_resolve_to_dataset_contract() {
    let cli = Cli::parse_from(["readmit"]);
    let config = cli.pipeline_config().unwrap();

    assert_eq!(config.iqr_multiplier, 1.5);
    assert_eq!(config.missing_threshold, 0.9);
    assert_eq!(config.target_column, "readmitted");
}

#[test]
fn test_cli_threshold_overrides() {
    let cli = Cli::parse_from([
        "readmit",
        "--iqr-multiplier",
        "3.0",
        "--missing-threshold",
        "0.5",
    ]);
    let config = cli.pipeline_config().unwrap();

    assert_eq!(config.iqr_multiplier, 3.0);
    assert_eq!(config.missing_threshold, 0.5);
}

#[test]
fn test_cli_rejects_out_of_range_threshold() {
    let result = Cli::try_parse_from(["readmit", "--missing-threshold", "1.5"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_bare_export_flag_uses_default_path() {
    let cli = Cli::parse_from(["readmit", "--export"]);
    assert_eq!(cli.export, Some(PathBuf::from("processed_data.csv")));
}

#[test]
fn test_cli_export_with_explicit_path() {
    let cli = Cli::parse_from(["readmit", "--export", "out/table.csv"]);
    assert_eq!(cli.export, Some(PathBuf::from("out/table.csv")));
}

#[test]
fn test_cli_bare_report_flag_uses_default_path() {
    let cli = Cli::parse_from(["readmit", "--report"]);
    assert_eq!(cli.report, Some(PathBuf::from("readmit_report.json")));
}

#[test]
fn test_cli_config_file_overrides() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");
    std::fs::write(
        &config_path,
        r#"{"target_column": "label", "iqr_multiplier": 2.5}"#,
    )
    .unwrap();

    let cli = Cli::parse_from([
        "readmit",
        "--config",
        config_path.to_str().unwrap(),
        "--iqr-multiplier",
        "4.0",
    ]);
    let config = cli.pipeline_config().unwrap();

    assert_eq!(config.target_column, "label");
    // CLI flags win over the config file
    assert_eq!(config.iqr_multiplier, 4.0);
    // Fields absent from the file keep the built-in contract
    assert_eq!(config.id_column, "encounter_id");
}

#[test]
fn test_binary_full_run_produces_outputs() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("encounters.csv");
    common::write_contract_csv(&input, 24);

    let charts = dir.path().join("charts");
    let export = dir.path().join("processed.csv");
    let report = dir.path().join("report.json");

    let mut cmd = Command::cargo_bin("readmit").unwrap();
    cmd.current_dir(dir.path())
        .arg("-i")
        .arg(&input)
        .arg("--charts-dir")
        .arg(&charts)
        .arg("--export")
        .arg(&export)
        .arg("--report")
        .arg(&report);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Readmit preparation complete"));

    assert!(charts.join("class_distribution.svg").exists());
    assert!(charts.join("readmissions_by_age.svg").exists());
    assert!(charts.join("numeric_boxplots.svg").exists());
    assert!(export.exists());

    let report_json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert!(report_json.get("metadata").is_some());
    assert!(report_json.get("cleaning").is_some());
    assert_eq!(
        report_json["metadata"]["iqr_multiplier"],
        serde_json::json!(1.5)
    );
}

#[test]
fn test_binary_missing_input_fails_with_path() {
    let dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("readmit").unwrap();
    cmd.current_dir(dir.path())
        .arg("-i")
        .arg("no_such_file.csv")
        .arg("--no-charts");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no_such_file.csv"));
}

#[test]
fn test_binary_no_charts_skips_rendering() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("encounters.csv");
    common::write_contract_csv(&input, 24);

    let mut cmd = Command::cargo_bin("readmit").unwrap();
    cmd.current_dir(dir.path())
        .arg("-i")
        .arg(&input)
        .arg("--no-charts");

    cmd.assert().success();

    assert!(!dir.path().join("class_distribution.svg").exists());
    assert!(!dir.path().join("numeric_boxplots.svg").exists());
}
