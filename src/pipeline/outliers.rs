//! Interquartile-range outlier filtering
//!
//! Filters are applied sequentially and cumulatively: each column's bounds
//! are computed on the table as already filtered by the previous columns.
//! Final row retention therefore depends on column order, which is part of
//! the pipeline configuration.

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use crate::pipeline::error::SchemaError;
use crate::pipeline::stats::{quantile_sorted, sorted_numeric_values};

/// Bounds and effect of one column's filtering pass
#[derive(Debug, Clone, Serialize)]
pub struct ColumnBounds {
    pub column: String,
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
    pub rows_removed: usize,
}

/// Remove rows outside `[Q1 - k*IQR, Q3 + k*IQR]` per numeric column, in
/// the given order. Rows with a null in the filtered column fail the bound
/// comparison and are removed. A column with no non-null values leaves the
/// table unchanged for that step.
pub fn filter_outliers(
    mut df: DataFrame,
    columns: &[String],
    multiplier: f64,
) -> Result<(DataFrame, Vec<ColumnBounds>)> {
    let mut steps = Vec::with_capacity(columns.len());

    for name in columns {
        let column = df
            .column(name)
            .map_err(|_| SchemaError::MissingColumn(name.clone()))?;

        if !column.dtype().is_primitive_numeric() {
            return Err(SchemaError::UnexpectedType {
                column: name.clone(),
                expected: "numeric".to_string(),
                found: column.dtype().to_string(),
            }
            .into());
        }

        let sorted = sorted_numeric_values(column.as_materialized_series())?;
        if sorted.is_empty() {
            steps.push(ColumnBounds {
                column: name.clone(),
                q1: f64::NAN,
                q3: f64::NAN,
                lower: f64::NAN,
                upper: f64::NAN,
                rows_removed: 0,
            });
            continue;
        }

        let q1 = quantile_sorted(&sorted, 0.25);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let lower = q1 - multiplier * iqr;
        let upper = q3 + multiplier * iqr;

        let float = column.as_materialized_series().cast(&DataType::Float64)?;
        let mask_values: Vec<bool> = float
            .f64()?
            .into_iter()
            .map(|opt| opt.map_or(false, |v| v >= lower && v <= upper))
            .collect();
        let mask = BooleanChunked::from_slice("mask".into(), &mask_values);

        let before = df.height();
        df = df.filter(&mask)?;

        steps.push(ColumnBounds {
            column: name.clone(),
            q1,
            q3,
            lower,
            upper,
            rows_removed: before - df.height(),
        });
    }

    Ok((df, steps))
}
