//! Min-max feature scaling
//!
//! Each configured column is rescaled onto [0,1] using the current table's
//! own observed minimum and maximum; there is no external reference range.

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use crate::pipeline::error::SchemaError;

/// Observed range used to rescale one column
#[derive(Debug, Clone, Serialize)]
pub struct ScalingInfo {
    pub column: String,
    pub min: f64,
    pub max: f64,
    /// True when max == min; every non-null value was mapped to 0.0
    pub constant: bool,
}

/// Rescale the given numeric columns in place to [0,1]. Columns become
/// Float64; nulls stay null. A zero-variance column maps every non-null
/// value to 0.0 and is flagged in the diagnostics; a column with no
/// non-null values is left untouched.
pub fn normalize_min_max(
    mut df: DataFrame,
    columns: &[String],
) -> Result<(DataFrame, Vec<ScalingInfo>)> {
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

        let float = column.as_materialized_series().cast(&DataType::Float64)?;
        let ca = float.f64()?;

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in ca.into_iter().flatten() {
            min = min.min(v);
            max = max.max(v);
        }

        if min > max {
            // No non-null values to fit on
            steps.push(ScalingInfo {
                column: name.clone(),
                min: f64::NAN,
                max: f64::NAN,
                constant: false,
            });
            continue;
        }

        let range = max - min;
        let scaled: Float64Chunked = if range == 0.0 {
            ca.into_iter().map(|opt| opt.map(|_| 0.0)).collect()
        } else {
            ca.into_iter()
                .map(|opt| opt.map(|v| (v - min) / range))
                .collect()
        };

        df.with_column(scaled.with_name(name.as_str().into()).into_series())?;
        steps.push(ScalingInfo {
            column: name.clone(),
            min,
            max,
            constant: range == 0.0,
        });
    }

    Ok((df, steps))
}
