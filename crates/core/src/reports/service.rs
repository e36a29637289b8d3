//! Report generation service.

use tracing::info_span;

use super::balance_sheet::BalanceSheetBuilder;
use super::cash_flow::CashFlowBuilder;
use super::income_statement::IncomeStatementBuilder;
use super::trial_balance::TrialBalanceBuilder;
use super::types::{FinancialStatements, ReportSettings};
use crate::chart::Account;
use crate::journal::JournalEntry;

/// Service for generating the full set of financial reports.
pub struct ReportService;

impl ReportService {
    /// Runs the whole derivation pipeline over one chart and journal snapshot.
    ///
    /// The trial balance is built first; the income statement and balance
    /// sheet read it, and the cash-flow reports read the journal, the trial
    /// balance and net income.
    #[must_use]
    pub fn generate(
        chart: &[Account],
        journal: &[JournalEntry],
        settings: &ReportSettings,
    ) -> FinancialStatements {
        let _span = info_span!("generate_reports", accounts = chart.len(), entries = journal.len())
            .entered();

        let trial_balance = TrialBalanceBuilder::build_with(chart, journal, settings);
        let income_statement = IncomeStatementBuilder::build(&trial_balance);
        let balance_sheet = BalanceSheetBuilder::build(&trial_balance);
        let direct_cash_flow = CashFlowBuilder::build_direct(chart, journal);
        let indirect_cash_flow = CashFlowBuilder::build_indirect(
            &trial_balance,
            &direct_cash_flow,
            income_statement.net_income,
        );

        FinancialStatements {
            trial_balance,
            income_statement,
            balance_sheet,
            direct_cash_flow,
            indirect_cash_flow,
        }
    }
}
