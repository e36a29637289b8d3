//! Journal of simple double-entry postings.
//!
//! Each entry posts one amount to exactly one debit account and one credit
//! account, so debits equal credits by construction.

pub mod entry;
pub mod error;

pub use entry::{EntrySide, JournalEntry, MAX_ENTRY_AMOUNT};
pub use error::JournalError;
