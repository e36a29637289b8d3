//! Trial balance derivation.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::types::{Diagnostic, ReportSettings, TrialBalance, TrialBalanceRow, TrialBalanceTotals};
use crate::chart::{Account, ChartIndex};
use crate::journal::{EntrySide, JournalEntry};

/// Folds a journal against a chart into per-account totals and balances.
pub struct TrialBalanceBuilder;

impl TrialBalanceBuilder {
    /// Builds the trial balance with default settings.
    #[must_use]
    pub fn build(chart: &[Account], journal: &[JournalEntry]) -> TrialBalance {
        Self::build_with(chart, journal, &ReportSettings::default())
    }

    /// Builds the trial balance.
    ///
    /// 1. One zeroed row per chart account, in chart order
    /// 2. Each entry adds its amount to the debit total of its debit account
    ///    and to the credit total of its credit account
    /// 3. A side whose code is not in the chart is dropped and reported
    /// 4. Balances are signed and split by account nature
    #[must_use]
    pub fn build_with(
        chart: &[Account],
        journal: &[JournalEntry],
        settings: &ReportSettings,
    ) -> TrialBalance {
        let index = ChartIndex::new(chart);
        let mut debits = vec![Decimal::ZERO; chart.len()];
        let mut credits = vec![Decimal::ZERO; chart.len()];
        let mut diagnostics = Vec::new();

        for (entry_index, entry) in journal.iter().enumerate() {
            for side in [EntrySide::Debit, EntrySide::Credit] {
                let code = entry.account(side);
                let Some(position) = index.position(code) else {
                    warn!(entry_index, %side, code, "journal entry references unknown account");
                    diagnostics.push(Diagnostic::UnresolvedAccountReference {
                        entry_index,
                        side,
                        code: code.to_string(),
                    });
                    continue;
                };

                match side {
                    EntrySide::Debit => debits[position] += entry.amount,
                    EntrySide::Credit => credits[position] += entry.amount,
                }
            }
        }

        let rows: Vec<TrialBalanceRow> = chart
            .iter()
            .zip(debits.into_iter().zip(credits))
            .map(|(account, (total_debit, total_credit))| {
                Self::row(account, total_debit, total_credit)
            })
            .collect();

        let total_debit: Decimal = rows.iter().map(|row| row.total_debit).sum();
        let total_credit: Decimal = rows.iter().map(|row| row.total_credit).sum();
        let totals = TrialBalanceTotals::new(total_debit, total_credit, settings.balance_tolerance);

        debug!(
            accounts = rows.len(),
            entries = journal.len(),
            %total_debit,
            %total_credit,
            is_balanced = totals.is_balanced,
            unresolved = diagnostics.len(),
            "trial balance built"
        );

        TrialBalance {
            rows,
            totals,
            diagnostics,
        }
    }

    fn row(account: &Account, total_debit: Decimal, total_credit: Decimal) -> TrialBalanceRow {
        let signed_balance = account.nature.signed_balance(total_debit, total_credit);
        let (debit_balance, credit_balance) = account.nature.split_balance(signed_balance);

        TrialBalanceRow {
            code: account.code.clone(),
            name: account.name.clone(),
            group: account.group,
            nature: account.nature,
            is_cash: account.is_cash,
            total_debit,
            total_credit,
            signed_balance,
            debit_balance,
            credit_balance,
        }
    }
}
