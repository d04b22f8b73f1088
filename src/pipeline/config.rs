//! Shared pipeline configuration
//!
//! Both the outlier filter and the normalizer operate on the same ordered
//! list of numeric columns; keeping that list (and the other dataset
//! contract values) in one structure removes any chance of the stages
//! drifting apart.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Dataset contract and tuning knobs shared by every pipeline stage.
///
/// `Default` carries the diabetic encounter dataset contract: column names,
/// the `readmitted` vocabulary and the `"?"` placeholder are matched
/// bit-for-bit against the data source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Encounter identifier column, dropped before any analysis
    pub id_column: String,
    /// Target column recoded to a binary 0/1 indicator
    pub target_column: String,
    /// Categorical age-group column used by the reporting stage
    pub age_column: String,
    /// Literal token that marks a missing value in the source file
    pub missing_placeholder: String,
    /// Target value that maps to 1 (early readmission)
    pub event_value: String,
    /// Target values that map to 0
    pub non_event_values: Vec<String>,
    /// Drop columns whose missing fraction strictly exceeds this value
    pub missing_threshold: f64,
    /// Columns removed unconditionally, regardless of missingness
    pub drop_columns: Vec<String>,
    /// Ordered numeric columns filtered for outliers and then rescaled.
    /// Outlier filtering is cumulative, so this order changes the result
    /// and must not be reordered casually.
    pub numeric_columns: Vec<String>,
    /// IQR multiplier for outlier bounds
    pub iqr_multiplier: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            id_column: "encounter_id".to_string(),
            target_column: "readmitted".to_string(),
            age_column: "age".to_string(),
            missing_placeholder: "?".to_string(),
            event_value: "<30".to_string(),
            non_event_values: vec![">30".to_string(), "NO".to_string()],
            missing_threshold: 0.9,
            drop_columns: vec![
                "repaglinide".to_string(),
                "nateglinide".to_string(),
                "chlorpropamide".to_string(),
                "glimepiride".to_string(),
                "acetohexamide".to_string(),
                "tolbutamide".to_string(),
                "acarbose".to_string(),
                "miglitol".to_string(),
                "troglitazone".to_string(),
                "tolazamide".to_string(),
                "examide".to_string(),
                "citoglipton".to_string(),
                "glyburide-metformin".to_string(),
                "glipizide-metformin".to_string(),
                "glimepiride-pioglitazone".to_string(),
                "metformin-rosiglitazone".to_string(),
                "metformin-pioglitazone".to_string(),
                "payer_code".to_string(),
                "patient_nbr".to_string(),
            ],
            numeric_columns: vec![
                "time_in_hospital".to_string(),
                "num_lab_procedures".to_string(),
                "num_procedures".to_string(),
                "num_medications".to_string(),
                "number_outpatient".to_string(),
                "number_emergency".to_string(),
                "number_inpatient".to_string(),
                "number_diagnoses".to_string(),
            ],
            iqr_multiplier: 1.5,
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file. Fields that are absent fall
    /// back to the built-in dataset contract.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }
}
