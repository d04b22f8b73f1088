//! Tests for the cleaning stage

use polars::prelude::*;
use readmit::pipeline::{
    clean, drop_denylist, drop_high_missing, load_dataset, replace_placeholder,
};

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_placeholder_cells_become_missing_markers() {
    // 5 placeholder cells spread over two string columns
    let mut df = df! {
        "a" => ["?", "x", "?", "y"],
        "b" => ["?", "?", "z", "?"],
        "n" => [1i64, 2, 3, 4],
    }
    .unwrap();

    let nulls_before: usize = df.get_columns().iter().map(|c| c.null_count()).sum();
    let replaced = replace_placeholder(&mut df, "?").unwrap();
    let nulls_after: usize = df.get_columns().iter().map(|c| c.null_count()).sum();

    assert_eq!(replaced, 5);
    assert_eq!(nulls_after - nulls_before, 5);

    // No literal token survives anywhere
    for column in df.get_columns() {
        if let Ok(ca) = column.str() {
            assert!(ca.into_iter().all(|v| v != Some("?")));
        }
    }
}

#[test]
fn test_target_is_binary_after_cleaning() {
    // Round-trip the fixture through a real CSV file first
    let mut df = common::create_encounter_dataframe();
    let (_temp_dir, csv_path) = common::create_temp_csv(&mut df);
    let df = load_dataset(&csv_path, 100).unwrap();

    let (cleaned, _) = clean(df, &common::test_config()).unwrap();

    let target = cleaned.column("readmitted").unwrap();
    assert_eq!(target.dtype(), &DataType::Int32);
    for value in target.i32().unwrap().into_iter().flatten() {
        assert!(value == 0 || value == 1, "unexpected target value {}", value);
    }
}

#[test]
fn test_clean_reports_placeholder_and_drops() {
    let df = common::create_encounter_dataframe();

    let (cleaned, report) = clean(df, &common::test_config()).unwrap();

    // 3 placeholder cells in payer_code
    assert_eq!(report.placeholder_cells, 3);
    assert_eq!(report.dropped_denylist, vec!["payer_code".to_string()]);
    common::assert_missing_columns(&cleaned, &["encounter_id", "payer_code"]);
    assert_eq!(report.shape_before, (6, 5));
    assert_eq!(report.shape_after, (6, 4));
}

#[test]
fn test_high_missing_columns_dropped_from_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("data.csv");
    common::write_contract_csv(&path, 24);

    let df = load_dataset(&path, 100).unwrap();
    let (cleaned, report) = clean(df, &readmit::pipeline::PipelineConfig::default()).unwrap();

    // `weight` is all placeholders: 100% missing after replacement
    assert_eq!(report.dropped_high_missing.len(), 1);
    assert_eq!(report.dropped_high_missing[0].0, "weight");
    common::assert_missing_columns(&cleaned, &["weight", "payer_code", "encounter_id"]);

    // No surviving column exceeds the threshold
    let height = cleaned.height() as f64;
    for column in cleaned.get_columns() {
        assert!(
            column.null_count() as f64 / height <= 0.9,
            "column '{}' still exceeds the missing threshold",
            column.name()
        );
    }
}

#[test]
fn test_cleaning_drop_steps_are_idempotent() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("data.csv");
    common::write_contract_csv(&path, 24);

    let config = readmit::pipeline::PipelineConfig::default();
    let df = load_dataset(&path, 100).unwrap();
    let (mut cleaned, _) = clean(df, &config).unwrap();

    // Running the two drop steps again on already-cleaned data is a no-op
    let shape = cleaned.shape();
    let dropped_missing = drop_high_missing(&mut cleaned, config.missing_threshold);
    let dropped_denylist = drop_denylist(&mut cleaned, &config.drop_columns);

    assert!(dropped_missing.is_empty());
    assert!(dropped_denylist.is_empty());
    assert_eq!(cleaned.shape(), shape);
}

#[test]
fn test_fully_missing_rows_dropped_partial_rows_kept() {
    let df = df! {
        "encounter_id" => [1i64, 2, 3],
        "readmitted" => [None::<&str>, Some("<30"), Some("NO")],
        "age" => [None::<&str>, None, Some("[50-60)")],
        "num_visits" => [None::<i64>, Some(2), Some(3)],
        "num_meds" => [None::<i64>, Some(4), Some(5)],
        "payer_code" => [None::<&str>, Some("MC"), Some("SP")],
    }
    .unwrap();

    let (cleaned, report) = clean(df, &common::test_config()).unwrap();

    // Row 1 is null everywhere once the identifier is gone; row 2 is only
    // partially missing and survives
    assert_eq!(report.empty_rows_dropped, 1);
    assert_eq!(cleaned.height(), 2);
}

#[test]
fn test_unknown_target_category_fails_with_value() {
    let df = df! {
        "encounter_id" => [1i64, 2],
        "readmitted" => ["<30", "LATER"],
        "age" => ["[50-60)", "[60-70)"],
        "num_visits" => [1i64, 2],
        "num_meds" => [3i64, 4],
        "payer_code" => ["MC", "SP"],
    }
    .unwrap();

    let err = clean(df, &common::test_config()).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("LATER"));
    assert!(message.contains("readmitted"));
}

#[test]
fn test_missing_target_column_fails() {
    let df = df! {
        "encounter_id" => [1i64, 2],
        "age" => ["[50-60)", "[60-70)"],
    }
    .unwrap();

    let err = clean(df, &common::test_config()).unwrap_err();
    assert!(format!("{:#}", err).contains("'readmitted' not found"));
}
