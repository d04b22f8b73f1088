//! Shared test utilities and fixture generators

use std::path::PathBuf;

use polars::prelude::*;
use readmit::pipeline::PipelineConfig;
use tempfile::TempDir;

/// Pipeline configuration matched to the synthetic encounter fixtures below.
pub fn test_config() -> PipelineConfig {
    PipelineConfig {
        id_column: "encounter_id".to_string(),
        target_column: "readmitted".to_string(),
        age_column: "age".to_string(),
        drop_columns: vec!["payer_code".to_string()],
        numeric_columns: vec!["num_visits".to_string(), "num_meds".to_string()],
        ..PipelineConfig::default()
    }
}

/// A small in-memory encounter table with known characteristics:
/// a placeholder-laden string column, a denylisted column, the three-valued
/// target and two numeric feature columns.
pub fn create_encounter_dataframe() -> DataFrame {
    df! {
        "encounter_id" => [100i64, 101, 102, 103, 104, 105],
        "readmitted" => ["<30", ">30", "NO", "NO", "<30", "NO"],
        "age" => ["[50-60)", "[60-70)", "[50-60)", "[70-80)", "[60-70)", "[50-60)"],
        "num_visits" => [1i64, 2, 3, 2, 4, 3],
        "num_meds" => [10i64, 12, 9, 11, 14, 10],
        "payer_code" => ["MC", "?", "SP", "?", "MC", "?"],
    }
    .unwrap()
}

/// Write a DataFrame to a CSV file inside a fresh temporary directory.
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Write a CSV honoring the full built-in dataset contract: the encounter
/// identifier, the three-valued target, the age groups and all 8 numeric
/// columns, plus a denylisted column and a mostly-missing column.
pub fn write_contract_csv(path: &std::path::Path, rows: usize) {
    let mut contents = String::from(
        "encounter_id,readmitted,age,time_in_hospital,num_lab_procedures,num_procedures,\
         num_medications,number_outpatient,number_emergency,number_inpatient,number_diagnoses,\
         payer_code,weight\n",
    );

    let targets = ["NO", "<30", ">30", "NO"];
    let ages = ["[50-60)", "[60-70)", "[70-80)"];
    for i in 0..rows {
        contents.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{},{},{},?\n",
            1000 + i,
            targets[i % targets.len()],
            ages[i % ages.len()],
            1 + i % 7,
            20 + i % 10,
            i % 4,
            5 + i % 9,
            i % 3,
            i % 2,
            i % 2,
            3 + i % 6,
            if i % 2 == 0 { "MC" } else { "?" },
        ));
    }

    std::fs::write(path, contents).unwrap();
}

/// Assert that a DataFrame has the expected shape.
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(
        rows, expected_rows,
        "Row count mismatch: expected {}, got {}",
        expected_rows, rows
    );
    assert_eq!(
        cols, expected_cols,
        "Column count mismatch: expected {}, got {}",
        expected_cols, cols
    );
}

/// Assert that a DataFrame contains specific columns.
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns.
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}
