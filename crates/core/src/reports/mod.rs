//! Financial report derivation.
//!
//! Pure functions folding a journal against a chart of accounts:
//! - Trial Balance
//! - Income Statement
//! - Balance Sheet
//! - Cash Flow (direct method and simplified indirect method)
//!
//! Builders never fail. Unresolved account codes and unbalanced books are
//! reported as values (diagnostics and flags) on the reports themselves.

pub mod balance_sheet;
pub mod cash_flow;
pub mod income_statement;
pub mod service;
pub mod trial_balance;
pub mod types;


pub use balance_sheet::BalanceSheetBuilder;
pub use cash_flow::CashFlowBuilder;
pub use income_statement::IncomeStatementBuilder;
pub use service::ReportService;
pub use trial_balance::TrialBalanceBuilder;
pub use types::*;
