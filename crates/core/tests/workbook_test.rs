//! Integration tests for the workbook report pipeline.
//!
//! Posts journals through the public API and checks every derived report.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use ledgerlab_core::Workbook;
use ledgerlab_core::chart::AccountGroup;
use ledgerlab_core::journal::{EntrySide, JournalEntry, JournalError};
use ledgerlab_core::reports::{CashFlowDirection, Diagnostic, IndirectLineKind};

fn entry(day: u32, memo: &str, debit: &str, credit: &str, amount: Decimal) -> JournalEntry {
    JournalEntry::new(
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
        memo,
        debit,
        credit,
        amount,
    )
    .unwrap()
}

fn post_all(workbook: &mut Workbook, entries: Vec<JournalEntry>) {
    for e in entries {
        workbook.post_entry(e).unwrap();
    }
}

/// A month of trading: capital, a purchase on credit, a sale on credit,
/// collection, payroll, a transfer between cash accounts and a supplier payment.
fn trading_month() -> Vec<JournalEntry> {
    vec![
        entry(1, "Capital paid in", "1.1.2", "2.3.1", dec!(10000)),
        entry(3, "Goods bought on credit", "1.1.4", "2.1.1", dec!(4000)),
        entry(10, "Sale on credit", "1.1.3", "3.1.1", dec!(6000)),
        entry(10, "Cost of goods sold", "4.1.1", "1.1.4", dec!(2500)),
        entry(20, "Customer collection", "1.1.2", "1.1.3", dec!(3500)),
        entry(25, "Payroll", "4.1.2", "1.1.1", dec!(1200)),
        entry(26, "Cash withdrawal", "1.1.1", "1.1.2", dec!(2000)),
        entry(28, "Supplier payment", "2.1.1", "1.1.2", dec!(1500)),
    ]
}

#[test]
fn test_reference_scenario_on_default_chart() {
    let mut workbook = Workbook::with_default_chart();
    post_all(
        &mut workbook,
        vec![
            entry(1, "Sale", "1.1.1", "3.1.1", dec!(1000)),
            entry(2, "Wages", "4.1.2", "1.1.1", dec!(300)),
        ],
    );

    let statements = workbook.statements();

    let caixa = &statements.trial_balance.rows[0];
    assert_eq!(caixa.code, "1.1.1");
    assert_eq!(caixa.total_debit, dec!(1000));
    assert_eq!(caixa.total_credit, dec!(300));
    assert_eq!(caixa.debit_balance, dec!(700));
    assert_eq!(statements.trial_balance.totals.total_debit, dec!(1300));
    assert!(statements.trial_balance.totals.is_balanced);

    assert_eq!(statements.income_statement.revenue_total, dec!(1000));
    assert_eq!(statements.income_statement.expense_total, dec!(300));
    assert_eq!(statements.income_statement.net_income, dec!(700));

    assert_eq!(statements.direct_cash_flow.total_inflow(), dec!(1000));
    assert_eq!(statements.direct_cash_flow.total_outflow(), dec!(300));
    assert_eq!(statements.indirect_cash_flow.cash_variation, dec!(700));
    assert_eq!(statements.indirect_cash_flow.working_capital_adjustment, dec!(0));
    assert!(statements.diagnostics().is_empty());
}

#[test]
fn test_trading_month_trial_balance() {
    let mut workbook = Workbook::with_default_chart();
    post_all(&mut workbook, trading_month());

    let tb = workbook.statements().trial_balance;

    assert_eq!(tb.rows.len(), 17);
    assert_eq!(tb.totals.total_debit, dec!(30700));
    assert_eq!(tb.totals.total_credit, dec!(30700));
    assert!(tb.totals.is_balanced);

    let cash: Decimal = tb.cash_rows().map(|row| row.signed_balance).sum();
    assert_eq!(cash, dec!(10800));

    let untouched = tb.rows.iter().find(|row| row.code == "1.2.1").unwrap();
    assert_eq!(untouched.total_debit, Decimal::ZERO);
    assert_eq!(untouched.debit_balance, Decimal::ZERO);
    assert_eq!(untouched.credit_balance, Decimal::ZERO);
}

#[test]
fn test_trading_month_statements() {
    let mut workbook = Workbook::with_default_chart();
    post_all(&mut workbook, trading_month());

    let statements = workbook.statements();

    let income = &statements.income_statement;
    assert_eq!(income.revenue_total, dec!(6000));
    assert_eq!(income.expense_total, dec!(3700));
    assert_eq!(income.net_income, dec!(2300));

    let sheet = &statements.balance_sheet;
    assert_eq!(sheet.assets.total, dec!(14800));
    assert_eq!(sheet.liabilities.total, dec!(2500));
    assert_eq!(sheet.equity.total, dec!(10000));
    assert_eq!(sheet.equation_gap(), income.net_income);
    assert_eq!(sheet.assets.lines.len(), 5);
    assert_eq!(sheet.assets.non_zero_lines().count(), 4);
}

#[test]
fn test_trading_month_cash_flow() {
    let mut workbook = Workbook::with_default_chart();
    post_all(&mut workbook, trading_month());

    let statements = workbook.statements();

    let direct: Vec<_> = statements
        .direct_cash_flow
        .lines
        .iter()
        .map(|l| (l.direction, l.counterpart_group, l.net()))
        .collect();
    assert_eq!(
        direct,
        vec![
            (CashFlowDirection::Inflow, AccountGroup::Asset, dec!(3500)),
            (CashFlowDirection::Inflow, AccountGroup::Equity, dec!(10000)),
            (CashFlowDirection::Outflow, AccountGroup::Liability, dec!(-1500)),
            (CashFlowDirection::Outflow, AccountGroup::Expense, dec!(-1200)),
        ]
    );

    let indirect = &statements.indirect_cash_flow;
    let kinds: Vec<_> = indirect.lines.iter().map(|l| l.kind).collect();
    assert_eq!(
        kinds,
        vec![
            IndirectLineKind::NetIncome,
            IndirectLineKind::WorkingCapitalAdjustment,
            IndirectLineKind::NetOperatingCash,
            IndirectLineKind::PeriodCashVariation,
        ]
    );
    assert_eq!(indirect.net_income, dec!(2300));
    assert_eq!(indirect.working_capital_adjustment, dec!(8500));
    assert_eq!(indirect.operating_cash, dec!(10800));
    assert_eq!(indirect.cash_variation, dec!(10800));
    assert_eq!(indirect.unexplained_cash_variation(), Decimal::ZERO);
}

#[test]
fn test_chart_replacement_surfaces_diagnostics() {
    let mut workbook = Workbook::with_default_chart();
    post_all(&mut workbook, trading_month());

    let trimmed: Vec<_> = workbook
        .chart()
        .iter()
        .filter(|account| account.code != "2.3.1")
        .cloned()
        .collect();
    workbook.replace_chart(trimmed);

    let statements = workbook.statements();
    assert_eq!(
        statements.diagnostics(),
        vec![Diagnostic::UnresolvedAccountReference {
            entry_index: 0,
            side: EntrySide::Credit,
            code: "2.3.1".to_string(),
        }]
    );
    assert!(!statements.trial_balance.totals.is_balanced);
    assert_eq!(statements.trial_balance.totals.difference, dec!(10000));
    // The capital inflow is dropped from the direct method.
    assert_eq!(statements.direct_cash_flow.lines.len(), 3);
    assert_eq!(statements.indirect_cash_flow.unexplained_cash_variation(), dec!(10000));
}

#[test]
fn test_rejected_entry_leaves_reports_unchanged() {
    let mut workbook = Workbook::with_default_chart();
    post_all(&mut workbook, trading_month());
    let before = workbook.statements();

    let err = workbook
        .post_entry(entry(30, "Typo", "1.1.9", "3.1.1", dec!(50)))
        .unwrap_err();
    assert_eq!(
        err,
        JournalError::UnknownAccount {
            side: EntrySide::Debit,
            code: "1.1.9".to_string(),
        }
    );
    assert_eq!(err.error_code(), "UNKNOWN_ACCOUNT");
    assert_eq!(workbook.statements(), before);
}
