//! Descriptive statistics helpers for numeric columns

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

/// Descriptive statistics for a single numeric column
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Linear-interpolation quantile over a pre-sorted slice.
pub fn quantile_sorted(values: &[f64], quantile: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let pos = quantile.clamp(0.0, 1.0) * (values.len() as f64 - 1.0);
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return values[lower];
    }
    let weight = pos - lower as f64;
    values[lower] * (1.0 - weight) + values[upper] * weight
}

/// Non-null values of a series as f64, in row order.
pub fn numeric_values(series: &Series) -> Result<Vec<f64>> {
    let float = series.cast(&DataType::Float64)?;
    Ok(float.f64()?.into_iter().flatten().collect())
}

/// Non-null values of a series as f64, sorted ascending.
pub fn sorted_numeric_values(series: &Series) -> Result<Vec<f64>> {
    let mut values = numeric_values(series)?;
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Ok(values)
}

/// Compute descriptive statistics for every numeric column of the table.
/// Standard deviation uses the n-1 denominator. Columns without any
/// non-null value are skipped.
pub fn summarize_numeric_columns(df: &DataFrame) -> Result<Vec<ColumnSummary>> {
    let mut summaries = Vec::new();

    for column in df.get_columns() {
        if !column.dtype().is_primitive_numeric() {
            continue;
        }

        let sorted = sorted_numeric_values(column.as_materialized_series())?;
        if sorted.is_empty() {
            continue;
        }

        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };

        summaries.push(ColumnSummary {
            column: column.name().to_string(),
            count: n,
            mean,
            std: variance.sqrt(),
            min: sorted[0],
            q25: quantile_sorted(&sorted, 0.25),
            median: quantile_sorted(&sorted, 0.5),
            q75: quantile_sorted(&sorted, 0.75),
            max: sorted[n - 1],
        });
    }

    Ok(summaries)
}
