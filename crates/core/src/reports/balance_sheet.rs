//! Balance sheet derivation.

use rust_decimal::Decimal;
use tracing::debug;

use super::types::{BalanceSheet, BalanceSheetLine, BalanceSheetSection, TrialBalance, TrialBalanceRow};
use crate::chart::AccountGroup;

/// Classifies balance-sheet accounts of a trial balance into three sections.
pub struct BalanceSheetBuilder;

impl BalanceSheetBuilder {
    /// Builds the balance sheet.
    ///
    /// Assets are valued at their debit balance, liabilities and equity at
    /// their credit balance. Zero-valued accounts are kept.
    #[must_use]
    pub fn build(trial_balance: &TrialBalance) -> BalanceSheet {
        let mut sheet = BalanceSheet::default();

        for row in &trial_balance.rows {
            match row.group {
                AccountGroup::Asset => Self::add_to_section(&mut sheet.assets, row, row.debit_balance),
                AccountGroup::Liability => {
                    Self::add_to_section(&mut sheet.liabilities, row, row.credit_balance);
                }
                AccountGroup::Equity => {
                    Self::add_to_section(&mut sheet.equity, row, row.credit_balance);
                }
                AccountGroup::Revenue | AccountGroup::Expense => {}
            }
        }

        debug!(
            total_assets = %sheet.total_assets(),
            total_liabilities_and_equity = %sheet.total_liabilities_and_equity(),
            "balance sheet built"
        );

        sheet
    }

    fn add_to_section(section: &mut BalanceSheetSection, row: &TrialBalanceRow, value: Decimal) {
        section.total += value;
        section.lines.push(BalanceSheetLine {
            code: row.code.clone(),
            name: row.name.clone(),
            value,
        });
    }
}
