//! Command-line argument definitions using clap

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::pipeline::PipelineConfig;

/// Readmit - prepare hospital readmission encounter data
#[derive(Parser, Debug)]
#[command(name = "readmit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV with a header row)
    #[arg(short, long, default_value = "diabetic_data.csv")]
    pub input: PathBuf,

    /// JSON file overriding the built-in pipeline configuration.
    /// Fields that are absent keep the built-in dataset contract.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// IQR multiplier for outlier bounds.
    /// Defaults to the pipeline configuration value (1.5).
    #[arg(long)]
    pub iqr_multiplier: Option<f64>,

    /// Missing-fraction threshold - drop columns with a higher missing share.
    /// Defaults to the pipeline configuration value (0.9).
    #[arg(long, value_parser = validate_threshold)]
    pub missing_threshold: Option<f64>,

    /// Number of rows to use for schema inference.
    /// Use 0 for a full table scan (slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Directory where chart files are written
    #[arg(long, default_value = ".")]
    pub charts_dir: PathBuf,

    /// Skip chart rendering
    #[arg(long, default_value = "false")]
    pub no_charts: bool,

    /// Export the processed table as CSV.
    /// A bare flag writes processed_data.csv in the working directory.
    #[arg(long, num_args = 0..=1, default_missing_value = "processed_data.csv")]
    pub export: Option<PathBuf>,

    /// Write a JSON run report with per-stage diagnostics.
    /// A bare flag writes readmit_report.json in the working directory.
    #[arg(long, num_args = 0..=1, default_missing_value = "readmit_report.json")]
    pub report: Option<PathBuf>,
}

impl Cli {
    /// Resolve the effective pipeline configuration: the config file (or the
    /// built-in dataset contract) with CLI overrides applied on top.
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_file(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(multiplier) = self.iqr_multiplier {
            config.iqr_multiplier = multiplier;
        }
        if let Some(threshold) = self.missing_threshold {
            config.missing_threshold = threshold;
        }

        Ok(config)
    }
}

/// Validator for the missing-fraction threshold
fn validate_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !(0.0..=1.0).contains(&value) {
        Err(format!(
            "missing-threshold must be between 0.0 and 1.0, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}
