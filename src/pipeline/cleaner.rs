//! Cleaning stage
//!
//! Structural column drops, placeholder normalization, target recoding,
//! missingness-based column pruning and empty-row removal, applied in a
//! fixed order (later steps depend on earlier ones). The cleaner performs
//! no I/O; everything an operator needs to see is captured in the
//! [`CleanReport`] and rendered by the report module.

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use crate::pipeline::config::PipelineConfig;
use crate::pipeline::error::SchemaError;
use crate::pipeline::stats::{summarize_numeric_columns, ColumnSummary};

/// Diagnostics recorded while cleaning.
#[derive(Debug, Clone, Serialize)]
pub struct CleanReport {
    /// Shape once the identifier column is gone, before any other step
    pub shape_before: (usize, usize),
    pub shape_after: (usize, usize),
    /// Per-column null counts before placeholder replacement
    pub missing_before: Vec<(String, usize)>,
    /// Per-column null counts after placeholder replacement
    pub missing_after: Vec<(String, usize)>,
    /// Number of cells holding the placeholder token that were nulled
    pub placeholder_cells: usize,
    /// Column dtypes after target recoding
    pub dtypes: Vec<(String, String)>,
    /// Columns dropped for exceeding the missing-fraction threshold
    pub dropped_high_missing: Vec<(String, f64)>,
    /// Denylisted columns that were present and removed
    pub dropped_denylist: Vec<String>,
    /// Rows removed for being null in every remaining column
    pub empty_rows_dropped: usize,
    /// Descriptive statistics of the surviving numeric columns
    pub numeric_summaries: Vec<ColumnSummary>,
}

/// Run the full cleaning sequence and return the cleaned table together
/// with its diagnostics record.
pub fn clean(df: DataFrame, config: &PipelineConfig) -> Result<(DataFrame, CleanReport)> {
    // 1. The encounter identifier carries no signal
    let mut df = df
        .drop(&config.id_column)
        .map_err(|_| SchemaError::MissingColumn(config.id_column.clone()))?;

    let shape_before = df.shape();

    // 2-4. Missing counts straddle the placeholder replacement so the
    // operator can see what the token was hiding
    let missing_before = missing_counts(&df);
    let placeholder_cells = replace_placeholder(&mut df, &config.missing_placeholder)?;
    let missing_after = missing_counts(&df);

    // 5. Binarize the target before anything else inspects it
    recode_target(&mut df, config)?;
    let dtypes = column_dtypes(&df);

    // 6-7. Column pruning: missingness threshold, then the fixed denylist
    let dropped_high_missing = drop_high_missing(&mut df, config.missing_threshold);
    let dropped_denylist = drop_denylist(&mut df, &config.drop_columns);

    // 8. Rows with no remaining values at all
    let empty_rows_dropped = drop_empty_rows(&mut df)?;

    let numeric_summaries = summarize_numeric_columns(&df)?;
    let shape_after = df.shape();

    let report = CleanReport {
        shape_before,
        shape_after,
        missing_before,
        missing_after,
        placeholder_cells,
        dtypes,
        dropped_high_missing,
        dropped_denylist,
        empty_rows_dropped,
        numeric_summaries,
    };

    Ok((df, report))
}

/// Per-column null counts, in column order.
pub fn missing_counts(df: &DataFrame) -> Vec<(String, usize)> {
    df.get_columns()
        .iter()
        .map(|column| (column.name().to_string(), column.null_count()))
        .collect()
}

/// Per-column dtypes, in column order.
pub fn column_dtypes(df: &DataFrame) -> Vec<(String, String)> {
    df.get_columns()
        .iter()
        .map(|column| (column.name().to_string(), column.dtype().to_string()))
        .collect()
}

/// Null every cell holding the placeholder token, uniformly across all
/// string columns. Returns the number of cells replaced.
pub fn replace_placeholder(df: &mut DataFrame, placeholder: &str) -> Result<usize> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut replaced = 0usize;
    for name in names {
        let column = df.column(&name)?;
        if !matches!(column.dtype(), DataType::String) {
            continue;
        }

        let ca = column.str()?;
        let hits = ca
            .into_iter()
            .filter(|v| matches!(v, Some(s) if *s == placeholder))
            .count();
        if hits == 0 {
            continue;
        }

        let cleaned: StringChunked = ca
            .into_iter()
            .map(|opt| opt.filter(|v| *v != placeholder))
            .collect();
        df.with_column(cleaned.with_name(name.as_str().into()).into_series())?;
        replaced += hits;
    }

    Ok(replaced)
}

/// Recode the target column to a binary 0/1 indicator (Int32). Nulls stay
/// null; a non-null value outside the configured vocabulary is a fatal
/// schema error.
pub fn recode_target(df: &mut DataFrame, config: &PipelineConfig) -> Result<()> {
    let target = &config.target_column;
    let column = df
        .column(target)
        .map_err(|_| SchemaError::MissingColumn(target.clone()))?;

    let ca = column.str().map_err(|_| SchemaError::UnexpectedType {
        column: target.clone(),
        expected: "str".to_string(),
        found: column.dtype().to_string(),
    })?;

    let mut recoded: Vec<Option<i32>> = Vec::with_capacity(ca.len());
    for opt in ca.into_iter() {
        let mapped = match opt {
            None => None,
            Some(v) if v == config.event_value => Some(1),
            Some(v) if config.non_event_values.iter().any(|n| n == v) => Some(0),
            Some(v) => {
                return Err(SchemaError::UnexpectedCategory {
                    column: target.clone(),
                    value: v.to_string(),
                }
                .into())
            }
        };
        recoded.push(mapped);
    }

    df.with_column(Column::new(target.as_str().into(), recoded))?;
    Ok(())
}

/// Drop every column whose missing fraction strictly exceeds the threshold.
/// Returns the dropped columns with their fractions.
pub fn drop_high_missing(df: &mut DataFrame, threshold: f64) -> Vec<(String, f64)> {
    if df.height() == 0 {
        return Vec::new();
    }

    let height = df.height() as f64;
    let dropped: Vec<(String, f64)> = df
        .get_columns()
        .iter()
        .filter_map(|column| {
            let fraction = column.null_count() as f64 / height;
            (fraction > threshold).then(|| (column.name().to_string(), fraction))
        })
        .collect();

    if !dropped.is_empty() {
        let names: Vec<String> = dropped.iter().map(|(name, _)| name.clone()).collect();
        *df = df.drop_many(&names);
    }

    dropped
}

/// Drop the denylisted columns unconditionally, tolerating names that are
/// already gone. Returns the names that were actually present.
pub fn drop_denylist(df: &mut DataFrame, denylist: &[String]) -> Vec<String> {
    let present: Vec<String> = denylist
        .iter()
        .filter(|name| df.column(name).is_ok())
        .cloned()
        .collect();

    if !present.is_empty() {
        *df = df.drop_many(&present);
    }

    present
}

/// Drop rows that are null in every column. Partially missing rows are
/// retained. Returns the number of rows removed.
pub fn drop_empty_rows(df: &mut DataFrame) -> Result<usize> {
    if df.width() == 0 || df.height() == 0 {
        return Ok(0);
    }

    let before = df.height();
    let mut mask = BooleanChunked::full("mask".into(), false, df.height());
    for column in df.get_columns() {
        mask = &mask | &column.as_materialized_series().is_not_null();
    }

    *df = df.filter(&mask)?;
    Ok(before - df.height())
}
