//! Custom error types for the cleaning engine.
//!
//! This module provides the error hierarchy using `thiserror`. Note that
//! per-cell parse failures and whole-column "not applicable" outcomes are
//! *not* errors: normalizers model them as `Option` returns and the pipeline
//! falls through to the next candidate type. Only genuine failures (missing
//! columns, invalid configuration, backend errors) surface here.

use thiserror::Error;

/// The main error type for the cleaning engine.
#[derive(Error, Debug)]
pub enum CleaningError {
    /// Column was not found in the table.
    #[error("Column '{0}' not found in table")]
    ColumnNotFound(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A cleaning step failed in a way that cannot be recovered per-cell.
    #[error("Failed to clean data: {0}")]
    CleaningFailed(String),

    /// Imputation failed.
    #[error("Failed to impute missing values in column '{column}': {reason}")]
    ImputationFailed { column: String, reason: String },

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error (report output).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Boundary interop with callers that work in `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CleaningError>,
    },
}

impl CleaningError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CleaningError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, CleaningError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CleaningError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_context() {
        let error = CleaningError::ColumnNotFound("age".to_string())
            .with_context("During type inference");
        assert!(error.to_string().contains("During type inference"));
        assert!(error.to_string().contains("age"));
    }

    #[test]
    fn test_result_ext_context() {
        let result: Result<()> = Err(CleaningError::CleaningFailed("boom".to_string()));
        let err = result.context("outer").unwrap_err();
        assert!(err.to_string().starts_with("outer"));
    }
}
