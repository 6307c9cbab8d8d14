//! Error types for the row filter pipeline.

use thiserror::Error;

/// Errors raised while configuring or running the filter pipeline.
#[derive(Debug, Error)]
pub enum FilterError {
    // === Configuration Errors ===
    /// The layout or field roles are inconsistent.
    #[error("invalid layout: {message}")]
    InvalidLayout { message: String },

    /// A role or override names a field that the layout does not define.
    #[error("unknown field '{field}' (known fields: {known})")]
    UnknownField { field: String, known: String },

    /// A `NAME=POSITION` override could not be parsed.
    #[error("invalid column override '{spec}': expected NAME=POSITION (e.g. Q=16 or Q=Q)")]
    InvalidColumnSpec { spec: String },

    // === Input Shape Errors ===
    /// Input table has fewer columns than the layout addresses.
    #[error("input table has {actual} columns but the layout requires at least {required}")]
    InputTooNarrow { required: usize, actual: usize },

    /// Master table cannot supply any reference identifiers.
    #[error("master table is empty: {reason}")]
    EmptyMaster { reason: String },

    /// Column expected by a stage is missing from the working table.
    #[error("column '{column}' not found in working table")]
    ColumnNotFound { column: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for FilterError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for filter operations.
pub type Result<T> = std::result::Result<T, FilterError>;
