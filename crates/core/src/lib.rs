//! Accounting derivation engine for LedgerLab.
//!
//! This crate contains pure business logic with ZERO file, terminal or network
//! dependencies. Account and entry types, boundary validation and the report
//! pipeline live here.
//!
//! # Modules
//!
//! - `chart` - Chart of accounts, groups and sign conventions
//! - `journal` - Simple double-entry journal entries
//! - `reports` - Trial balance, income statement, balance sheet and cash flow
//! - `workbook` - Session state feeding the report pipeline

pub mod chart;
pub mod journal;
pub mod reports;
pub mod workbook;

pub use chart::{Account, AccountGroup, AccountNature};
pub use journal::{EntrySide, JournalEntry};
pub use reports::{FinancialStatements, ReportService, ReportSettings};
pub use workbook::Workbook;
