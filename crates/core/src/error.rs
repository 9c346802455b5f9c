//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only structural problems surface here (a sheet that lacks a column the
/// calculator cannot work without, a bad setting). Malformed numbers and
/// degenerate divisions are absorbed as zeros and never become errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. a non-positive coverage window).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A required column is absent from a sheet's header row.
    #[error("sheet '{sheet}' is missing required column '{column}'")]
    MissingColumn { sheet: String, column: String },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn missing_column(sheet: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            sheet: sheet.into(),
            column: column.into(),
        }
    }
}
