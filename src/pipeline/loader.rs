//! Dataset loader and writer for delimited files

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

/// Load a dataset from a CSV file with a header row. Column types are
/// inferred from the first `infer_schema_length` rows (0 = full scan).
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let schema_window = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = LazyCsvReader::new(path)
        .with_infer_schema_length(schema_window)
        .finish()
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let df = lf
        .collect()
        .with_context(|| format!("Failed to read CSV file: {}", path.display()))?;

    Ok(df)
}

/// Write the processed table as CSV, header included, no index column.
pub fn save_dataset(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    CsvWriter::new(&mut file)
        .finish(df)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;

    Ok(())
}
