//! Run report export
//!
//! Serializes the diagnostics of a complete run as JSON so the result of a
//! batch invocation can be archived or inspected by other tooling.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{CleanReport, ColumnBounds, PipelineConfig, ScalingInfo};

/// Metadata about the run
#[derive(Serialize)]
pub struct RunMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    /// Readmit version
    pub readmit_version: String,
    /// Input file path
    pub input_file: String,
    /// IQR multiplier used for outlier bounds
    pub iqr_multiplier: f64,
    /// Missing-fraction threshold for column drops
    pub missing_threshold: f64,
}

/// Complete run report with metadata and per-stage diagnostics
#[derive(Serialize)]
pub struct RunReport<'a> {
    pub metadata: RunMetadata,
    pub cleaning: &'a CleanReport,
    pub outlier_bounds: &'a [ColumnBounds],
    pub scaling: &'a [ScalingInfo],
    pub final_shape: (usize, usize),
}

/// Parameters for the run report export
pub struct ExportParams<'a> {
    pub input_file: &'a Path,
    pub config: &'a PipelineConfig,
    pub cleaning: &'a CleanReport,
    pub outlier_bounds: &'a [ColumnBounds],
    pub scaling: &'a [ScalingInfo],
    pub final_shape: (usize, usize),
}

/// Write the run report as pretty-printed JSON.
pub fn export_run_report(params: &ExportParams, path: &Path) -> Result<()> {
    let report = RunReport {
        metadata: RunMetadata {
            timestamp: Utc::now().to_rfc3339(),
            readmit_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: params.input_file.display().to_string(),
            iqr_multiplier: params.config.iqr_multiplier,
            missing_threshold: params.config.missing_threshold,
        },
        cleaning: params.cleaning,
        outlier_bounds: params.outlier_bounds,
        scaling: params.scaling,
        final_shape: params.final_shape,
    };

    let json = serde_json::to_string_pretty(&report).context("Failed to serialize run report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write run report: {}", path.display()))?;

    Ok(())
}
