//! Cash-flow derivation: direct method and simplified indirect method.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::types::{
    CashFlowDirection, CashFlowLine, Diagnostic, DirectCashFlow, IndirectCashFlow,
    IndirectCashFlowLine, IndirectLineKind, TrialBalance,
};
use crate::chart::{Account, ChartIndex};
use crate::journal::{EntrySide, JournalEntry};

/// Derives cash-flow reports.
pub struct CashFlowBuilder;

impl CashFlowBuilder {
    /// Builds the direct-method report from the journal.
    ///
    /// An entry counts only when exactly one side is a cash account:
    /// - cash debited: inflow against the credit account's group
    /// - cash credited: outflow against the debit account's group
    ///
    /// Transfers between cash accounts and entries without a cash side are
    /// left out. Lines are grouped by `(direction, counterpart group)` and
    /// sorted by direction label, then by the group's source label
    /// (Ativo, Passivo, Patrimônio Líquido, Resultado - Despesa, Resultado - Receita).
    #[must_use]
    pub fn build_direct(chart: &[Account], journal: &[JournalEntry]) -> DirectCashFlow {
        let index = ChartIndex::new(chart);
        let cash_codes = index.cash_codes();
        let mut grouped: BTreeMap<(&'static str, &'static str), CashFlowLine> = BTreeMap::new();
        let mut diagnostics = Vec::new();

        for (entry_index, entry) in journal.iter().enumerate() {
            let debit_is_cash = cash_codes.contains(entry.debit_account.as_str());
            let credit_is_cash = cash_codes.contains(entry.credit_account.as_str());

            let (direction, counterpart_side) = match (debit_is_cash, credit_is_cash) {
                (true, false) => (CashFlowDirection::Inflow, EntrySide::Credit),
                (false, true) => (CashFlowDirection::Outflow, EntrySide::Debit),
                _ => continue,
            };

            let counterpart_code = entry.account(counterpart_side);
            let Some(counterpart) = index.get(counterpart_code) else {
                warn!(
                    entry_index,
                    side = %counterpart_side,
                    code = counterpart_code,
                    "cash movement against unknown account left out of cash flow"
                );
                diagnostics.push(Diagnostic::UnresolvedAccountReference {
                    entry_index,
                    side: counterpart_side,
                    code: counterpart_code.to_string(),
                });
                continue;
            };

            let line = grouped
                .entry((direction.label(), counterpart.group.source_label()))
                .or_insert(CashFlowLine {
                    direction,
                    counterpart_group: counterpart.group,
                    inflow: Decimal::ZERO,
                    outflow: Decimal::ZERO,
                });
            match direction {
                CashFlowDirection::Inflow => line.inflow += entry.amount,
                CashFlowDirection::Outflow => line.outflow += entry.amount,
            }
        }

        let report = DirectCashFlow {
            lines: grouped.into_values().collect(),
            diagnostics,
        };

        debug!(
            lines = report.lines.len(),
            net_operating_cash = %report.net_operating_cash(),
            "direct cash flow built"
        );

        report
    }

    /// Builds the simplified indirect-method report.
    ///
    /// 1. Cash variation: sum of signed balances of cash accounts
    /// 2. Operating cash: net of the direct-method lines
    /// 3. Working-capital adjustment: operating cash minus net income
    ///
    /// All cash variation is treated as operational; operating cash and cash
    /// variation are not forced to agree.
    #[must_use]
    pub fn build_indirect(
        trial_balance: &TrialBalance,
        direct: &DirectCashFlow,
        net_income: Decimal,
    ) -> IndirectCashFlow {
        let cash_variation: Decimal = trial_balance
            .cash_rows()
            .map(|row| row.signed_balance)
            .sum();
        let operating_cash = direct.net_operating_cash();
        let working_capital_adjustment = operating_cash - net_income;

        if operating_cash != cash_variation {
            debug!(
                %operating_cash,
                %cash_variation,
                "operating cash differs from cash variation"
            );
        }

        IndirectCashFlow {
            lines: vec![
                IndirectCashFlowLine {
                    kind: IndirectLineKind::NetIncome,
                    value: net_income,
                },
                IndirectCashFlowLine {
                    kind: IndirectLineKind::WorkingCapitalAdjustment,
                    value: working_capital_adjustment,
                },
                IndirectCashFlowLine {
                    kind: IndirectLineKind::NetOperatingCash,
                    value: operating_cash,
                },
                IndirectCashFlowLine {
                    kind: IndirectLineKind::PeriodCashVariation,
                    value: cash_variation,
                },
            ],
            net_income,
            working_capital_adjustment,
            operating_cash,
            cash_variation,
        }
    }
}
