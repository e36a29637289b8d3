//! Chart of accounts.
//!
//! This module defines the account records the engine folds the journal against:
//! - Account groups and natures (sign conventions)
//! - Account records with boundary validation
//! - The seeded default chart
//! - A code index built once per computation

pub mod defaults;
pub mod error;
pub mod index;
pub mod types;

pub use defaults::default_chart;
pub use error::ChartError;
pub use index::ChartIndex;
pub use types::{Account, AccountGroup, AccountNature, account_code_from_label};
