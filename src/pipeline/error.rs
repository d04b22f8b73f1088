//! Typed errors raised while applying the dataset contract

use thiserror::Error;

/// A mismatch between the configured dataset contract and the loaded table.
/// These are fatal: the run terminates with the offending column or value.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("column '{0}' not found in dataset")]
    MissingColumn(String),

    #[error("unexpected value '{value}' in column '{column}'")]
    UnexpectedCategory { column: String, value: String },

    #[error("column '{column}' has dtype {found}, expected {expected}")]
    UnexpectedType {
        column: String,
        expected: String,
        found: String,
    },
}
