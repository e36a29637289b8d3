//! Income statement derivation.

use rust_decimal::Decimal;
use tracing::debug;

use super::types::{IncomeStatement, IncomeStatementLine, IncomeStatementLineKind, TrialBalance};
use crate::chart::AccountGroup;

/// Computes group totals and net income from a trial balance.
pub struct IncomeStatementBuilder;

impl IncomeStatementBuilder {
    /// Builds the income statement.
    ///
    /// Revenues are taken at their credit balance and expenses at their debit
    /// balance. Only group totals are emitted.
    #[must_use]
    pub fn build(trial_balance: &TrialBalance) -> IncomeStatement {
        let revenue_total: Decimal = trial_balance
            .rows_in(AccountGroup::Revenue)
            .map(|row| row.credit_balance)
            .sum();
        let expense_total: Decimal = trial_balance
            .rows_in(AccountGroup::Expense)
            .map(|row| row.debit_balance)
            .sum();
        let net_income = revenue_total - expense_total;

        debug!(%revenue_total, %expense_total, %net_income, "income statement built");

        IncomeStatement {
            lines: vec![
                IncomeStatementLine {
                    kind: IncomeStatementLineKind::Revenues,
                    value: revenue_total,
                },
                IncomeStatementLine {
                    kind: IncomeStatementLineKind::Expenses,
                    value: -expense_total,
                },
                IncomeStatementLine {
                    kind: IncomeStatementLineKind::NetIncome,
                    value: net_income,
                },
            ],
            revenue_total,
            expense_total,
            net_income,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Account, AccountNature, default_chart};
    use crate::journal::JournalEntry;
    use crate::reports::TrialBalanceBuilder;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn entry(debit: &str, credit: &str, amount: Decimal) -> JournalEntry {
        JournalEntry::new(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            "",
            debit,
            credit,
            amount,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_trial_balance() {
        let statement = IncomeStatementBuilder::build(&TrialBalanceBuilder::build(&[], &[]));
        assert_eq!(statement.revenue_total, Decimal::ZERO);
        assert_eq!(statement.expense_total, Decimal::ZERO);
        assert_eq!(statement.net_income, Decimal::ZERO);
        assert_eq!(statement.lines.len(), 3);
    }

    #[test]
    fn test_profit() {
        let chart = default_chart();
        let journal = vec![
            entry("1.1.1", "3.1.1", dec!(2500)),
            entry("1.1.3", "3.1.2", dec!(500)),
            entry("4.1.2", "1.1.1", dec!(900)),
            entry("4.1.3", "2.1.1", dec!(100)),
        ];
        let statement = IncomeStatementBuilder::build(&TrialBalanceBuilder::build(&chart, &journal));

        assert_eq!(statement.revenue_total, dec!(3000));
        assert_eq!(statement.expense_total, dec!(1000));
        assert_eq!(statement.net_income, dec!(2000));

        let kinds: Vec<IncomeStatementLineKind> = statement.lines.iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IncomeStatementLineKind::Revenues,
                IncomeStatementLineKind::Expenses,
                IncomeStatementLineKind::NetIncome,
            ]
        );
        let values: Vec<Decimal> = statement.lines.iter().map(|l| l.value).collect();
        assert_eq!(values, vec![dec!(3000), dec!(-1000), dec!(2000)]);
    }

    #[test]
    fn test_loss() {
        let chart = default_chart();
        let journal = vec![
            entry("1.1.1", "3.1.1", dec!(100)),
            entry("4.1.4", "1.1.1", dec!(350)),
        ];
        let statement = IncomeStatementBuilder::build(&TrialBalanceBuilder::build(&chart, &journal));
        assert_eq!(statement.net_income, dec!(-250));
    }

    #[test]
    fn test_abnormal_balances_are_ignored() {
        // A revenue account with a debit balance contributes nothing to revenues.
        let chart = vec![
            Account::new("3.1.1", "Receita", AccountGroup::Revenue, AccountNature::Credit, false)
                .unwrap(),
            Account::new("1.1.1", "Caixa", AccountGroup::Asset, AccountNature::Debit, true).unwrap(),
        ];
        let journal = vec![entry("3.1.1", "1.1.1", dec!(40))];
        let statement = IncomeStatementBuilder::build(&TrialBalanceBuilder::build(&chart, &journal));
        assert_eq!(statement.revenue_total, Decimal::ZERO);
        assert_eq!(statement.net_income, Decimal::ZERO);
    }

    #[test]
    fn test_line_labels() {
        assert_eq!(IncomeStatementLineKind::Revenues.label(), "Revenues");
        assert_eq!(IncomeStatementLineKind::Expenses.label(), "(-) Expenses");
        assert_eq!(IncomeStatementLineKind::NetIncome.label(), "= Net Income / Loss");
    }
}
