//! Chart of accounts error types.

use ledgerlab_shared::AppError;
use thiserror::Error;

/// Errors raised while building account records at the input boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    /// Account code is empty.
    #[error("Account code cannot be empty")]
    EmptyCode,

    /// Account name is empty.
    #[error("Account name cannot be empty (code {0})")]
    EmptyName(String),

    /// Group label is not recognised.
    #[error("Unknown account group: {0}")]
    UnknownGroup(String),

    /// Nature label is not recognised.
    #[error("Unknown account nature: {0}")]
    UnknownNature(String),
}

impl ChartError {
    /// Returns the error code for machine-readable output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyCode => "EMPTY_ACCOUNT_CODE",
            Self::EmptyName(_) => "EMPTY_ACCOUNT_NAME",
            Self::UnknownGroup(_) => "UNKNOWN_ACCOUNT_GROUP",
            Self::UnknownNature(_) => "UNKNOWN_ACCOUNT_NATURE",
        }
    }
}

impl From<ChartError> for AppError {
    fn from(err: ChartError) -> Self {
        Self::Validation(err.to_string())
    }
}
