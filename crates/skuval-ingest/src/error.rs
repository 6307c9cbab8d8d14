//! Error types for workbook ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a workbook into a DataFrame.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source file does not exist.
    #[error("file '{path}' not found")]
    FileNotFound { path: PathBuf },

    /// Path exists but is not a regular file.
    #[error("'{path}' is not a file")]
    NotAFile { path: PathBuf },

    // === Workbook Errors ===
    /// The workbook could not be opened or parsed.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// The workbook has no worksheets.
    #[error("workbook {path} contains no worksheets")]
    NoWorksheet { path: PathBuf },

    /// The first worksheet has no cells, not even a header row.
    #[error("worksheet '{sheet}' in {path} is empty")]
    EmptySheet { path: PathBuf, sheet: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("input.xlsx"),
        };
        assert_eq!(err.to_string(), "file 'input.xlsx' not found");
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("Q".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
