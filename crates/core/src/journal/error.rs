//! Journal error types.
//!
//! Raised at the input boundary only. Report derivation never fails.

use ledgerlab_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

use super::entry::{EntrySide, MAX_ENTRY_AMOUNT};

/// Errors that can occur while recording a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JournalError {
    /// Entry amount is zero or negative.
    #[error("Entry amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Entry amount is above `MAX_ENTRY_AMOUNT`.
    #[error("Entry amount {0} exceeds the maximum of {max}", max = MAX_ENTRY_AMOUNT)]
    AmountTooLarge(Decimal),

    /// Account code on one side is blank.
    #[error("The {0} account code cannot be empty")]
    EmptyAccountCode(EntrySide),

    /// Account code does not exist in the chart.
    #[error("The {side} account {code} is not in the chart of accounts")]
    UnknownAccount {
        /// Side carrying the unknown code.
        side: EntrySide,
        /// The unknown code.
        code: String,
    },

    /// No entry can be posted before the chart has accounts.
    #[error("The chart of accounts is empty")]
    EmptyChart,
}

impl JournalError {
    /// Returns the error code for machine-readable output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::AmountTooLarge(_) => "AMOUNT_TOO_LARGE",
            Self::EmptyAccountCode(_) => "EMPTY_ACCOUNT_CODE",
            Self::UnknownAccount { .. } => "UNKNOWN_ACCOUNT",
            Self::EmptyChart => "EMPTY_CHART",
        }
    }
}

impl From<JournalError> for AppError {
    fn from(err: JournalError) -> Self {
        match err {
            JournalError::NonPositiveAmount(_)
            | JournalError::AmountTooLarge(_)
            | JournalError::EmptyAccountCode(_) => {
                Self::Validation(err.to_string())
            }
            JournalError::UnknownAccount { .. } => Self::NotFound(err.to_string()),
            JournalError::EmptyChart => Self::BusinessRule(err.to_string()),
        }
    }
}
