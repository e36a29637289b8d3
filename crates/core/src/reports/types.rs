//! Report data types.
//!
//! Every report is a projection recomputed from the chart and the journal;
//! none of these values is ever stored or patched in place.

use std::fmt;

use ledgerlab_shared::ReportsConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::chart::{AccountGroup, AccountNature};
use crate::journal::EntrySide;

/// Settings shared by the report builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Debit/credit totals closer than this are treated as balanced.
    pub balance_tolerance: Decimal,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            balance_tolerance: Decimal::new(1, 2),
        }
    }
}

impl From<&ReportsConfig> for ReportSettings {
    fn from(config: &ReportsConfig) -> Self {
        Self {
            balance_tolerance: config.balance_tolerance.abs(),
        }
    }
}

/// Something the engine skipped while deriving a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A journal entry names an account code missing from the chart.
    UnresolvedAccountReference {
        /// Zero-based position of the entry in the journal.
        entry_index: usize,
        /// Side carrying the unresolved code.
        side: EntrySide,
        /// The unresolved code.
        code: String,
    },
}

impl Diagnostic {
    /// Returns the diagnostic code for machine-readable output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnresolvedAccountReference { .. } => "UNRESOLVED_ACCOUNT_REFERENCE",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedAccountReference {
                entry_index,
                side,
                code,
            } => write!(
                f,
                "entry #{} references unknown {side} account {code}",
                entry_index + 1
            ),
        }
    }
}

/// One account row of the trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account group.
    pub group: AccountGroup,
    /// Account nature.
    pub nature: AccountNature,
    /// Whether the account is cash.
    pub is_cash: bool,
    /// Sum of amounts debited to the account.
    pub total_debit: Decimal,
    /// Sum of amounts credited to the account.
    pub total_credit: Decimal,
    /// Balance signed by nature; positive is the natural side.
    pub signed_balance: Decimal,
    /// Balance shown in the debit column.
    pub debit_balance: Decimal,
    /// Balance shown in the credit column.
    pub credit_balance: Decimal,
}

/// Trial balance totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Total debit.
    pub total_debit: Decimal,
    /// Total credit.
    pub total_credit: Decimal,
    /// Total debit minus total credit.
    pub difference: Decimal,
    /// Whether debits equal credits within the tolerance.
    pub is_balanced: bool,
}

impl TrialBalanceTotals {
    /// Creates totals, flagging imbalance beyond `tolerance`.
    #[must_use]
    pub fn new(total_debit: Decimal, total_credit: Decimal, tolerance: Decimal) -> Self {
        let difference = total_debit - total_credit;
        Self {
            total_debit,
            total_credit,
            difference,
            is_balanced: difference.abs() < tolerance || difference.is_zero(),
        }
    }
}

/// Trial balance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalance {
    /// One row per chart account, in chart order.
    pub rows: Vec<TrialBalanceRow>,
    /// Column totals.
    pub totals: TrialBalanceTotals,
    /// Journal references that could not be resolved.
    pub diagnostics: Vec<Diagnostic>,
}

impl TrialBalance {
    /// Rows belonging to `group`, in chart order.
    pub fn rows_in(&self, group: AccountGroup) -> impl Iterator<Item = &TrialBalanceRow> {
        self.rows.iter().filter(move |row| row.group == group)
    }

    /// Rows flagged as cash, in chart order.
    pub fn cash_rows(&self) -> impl Iterator<Item = &TrialBalanceRow> {
        self.rows.iter().filter(|row| row.is_cash)
    }
}

/// Fixed lines of the income statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeStatementLineKind {
    /// Revenue group total.
    Revenues,
    /// Expense group total, negated for display.
    Expenses,
    /// Net income (loss when negative).
    NetIncome,
}

impl IncomeStatementLineKind {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Revenues => "Revenues",
            Self::Expenses => "(-) Expenses",
            Self::NetIncome => "= Net Income / Loss",
        }
    }
}

/// One line of the income statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatementLine {
    /// Which line this is.
    pub kind: IncomeStatementLineKind,
    /// Displayed value.
    pub value: Decimal,
}

/// Income statement report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatement {
    /// Revenues, expenses and net income, in that order.
    pub lines: Vec<IncomeStatementLine>,
    /// Sum of revenue credit balances.
    pub revenue_total: Decimal,
    /// Sum of expense debit balances.
    pub expense_total: Decimal,
    /// Revenue total minus expense total.
    pub net_income: Decimal,
}

/// Account line of a balance sheet section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetLine {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Value on the section's side.
    pub value: Decimal,
}

/// Balance sheet section (assets, liabilities, equity).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetSection {
    /// Account lines, zero values included.
    pub lines: Vec<BalanceSheetLine>,
    /// Section total.
    pub total: Decimal,
}

impl BalanceSheetSection {
    /// Lines with a non-zero value, for callers that hide empty accounts.
    pub fn non_zero_lines(&self) -> impl Iterator<Item = &BalanceSheetLine> {
        self.lines.iter().filter(|line| !line.value.is_zero())
    }
}

/// Balance sheet report.
///
/// The accounting equation is not asserted here; a malformed journal can
/// leave it unbalanced and callers decide how to show that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// Assets at debit balance.
    pub assets: BalanceSheetSection,
    /// Liabilities at credit balance.
    pub liabilities: BalanceSheetSection,
    /// Equity at credit balance.
    pub equity: BalanceSheetSection,
}

impl BalanceSheet {
    /// Total assets.
    #[must_use]
    pub fn total_assets(&self) -> Decimal {
        self.assets.total
    }

    /// Liabilities plus equity.
    #[must_use]
    pub fn total_liabilities_and_equity(&self) -> Decimal {
        self.liabilities.total + self.equity.total
    }

    /// Assets minus liabilities and equity.
    ///
    /// Before closing, this equals the period's net income.
    #[must_use]
    pub fn equation_gap(&self) -> Decimal {
        self.total_assets() - self.total_liabilities_and_equity()
    }
}

/// Direction of a cash movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashFlowDirection {
    /// Cash account debited.
    Inflow,
    /// Cash account credited.
    Outflow,
}

impl CashFlowDirection {
    /// Display label. Cash-flow lines are sorted on this label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Inflow => "Inflow",
            Self::Outflow => "Outflow",
        }
    }
}

impl fmt::Display for CashFlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Direct-method line: cash moved against one counterpart group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowLine {
    /// Inflow or outflow.
    pub direction: CashFlowDirection,
    /// Group of the non-cash side of the entries.
    pub counterpart_group: AccountGroup,
    /// Cash received.
    pub inflow: Decimal,
    /// Cash paid.
    pub outflow: Decimal,
}

impl CashFlowLine {
    /// Inflow minus outflow.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.inflow - self.outflow
    }
}

/// Direct-method cash-flow report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectCashFlow {
    /// Lines grouped by direction and counterpart group, sorted.
    pub lines: Vec<CashFlowLine>,
    /// Entries left out because their counterpart did not resolve.
    pub diagnostics: Vec<Diagnostic>,
}

impl DirectCashFlow {
    /// Total cash received.
    #[must_use]
    pub fn total_inflow(&self) -> Decimal {
        self.lines.iter().map(|line| line.inflow).sum()
    }

    /// Total cash paid.
    #[must_use]
    pub fn total_outflow(&self) -> Decimal {
        self.lines.iter().map(|line| line.outflow).sum()
    }

    /// Net operating cash, zero when there are no lines.
    #[must_use]
    pub fn net_operating_cash(&self) -> Decimal {
        self.lines.iter().map(CashFlowLine::net).sum()
    }
}

/// Fixed lines of the simplified indirect method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndirectLineKind {
    /// Net income for the period.
    NetIncome,
    /// Plug between operating cash and net income.
    WorkingCapitalAdjustment,
    /// Net operating cash from the direct method.
    NetOperatingCash,
    /// Change in cash account balances.
    PeriodCashVariation,
}

impl IndirectLineKind {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NetIncome => "Net Income / Loss",
            Self::WorkingCapitalAdjustment => "(+/-) Working-Capital Adjustment (simplified)",
            Self::NetOperatingCash => "= Net Operating Cash",
            Self::PeriodCashVariation => "Period Cash Variation",
        }
    }
}

/// One descriptive line of the indirect method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndirectCashFlowLine {
    /// Which line this is.
    pub kind: IndirectLineKind,
    /// Line value.
    pub value: Decimal,
}

/// Simplified indirect-method cash-flow report.
///
/// All cash variation is assumed to be operational. Operating cash and cash
/// variation are reported side by side and are allowed to differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndirectCashFlow {
    /// The four lines, in display order.
    pub lines: Vec<IndirectCashFlowLine>,
    /// Net income for the period.
    pub net_income: Decimal,
    /// Operating cash minus net income.
    pub working_capital_adjustment: Decimal,
    /// Net operating cash from the direct method.
    pub operating_cash: Decimal,
    /// Sum of signed balances of cash accounts.
    pub cash_variation: Decimal,
}

impl IndirectCashFlow {
    /// Cash variation not explained by operating cash.
    ///
    /// Non-zero when cash moved between cash accounts and something outside
    /// the direct method (e.g. an unresolved counterpart).
    #[must_use]
    pub fn unexplained_cash_variation(&self) -> Decimal {
        self.cash_variation - self.operating_cash
    }
}

/// Every report derived from one chart and journal snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialStatements {
    /// Trial balance.
    pub trial_balance: TrialBalance,
    /// Income statement.
    pub income_statement: IncomeStatement,
    /// Balance sheet.
    pub balance_sheet: BalanceSheet,
    /// Direct-method cash flow.
    pub direct_cash_flow: DirectCashFlow,
    /// Indirect-method cash flow.
    pub indirect_cash_flow: IndirectCashFlow,
}

impl FinancialStatements {
    /// Diagnostics from every report, without duplicates, in journal order.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut all: Vec<Diagnostic> = self.trial_balance.diagnostics.clone();
        for diagnostic in &self.direct_cash_flow.diagnostics {
            if !all.contains(diagnostic) {
                all.push(diagnostic.clone());
            }
        }
        all.sort_by_key(|diagnostic| match diagnostic {
            Diagnostic::UnresolvedAccountReference {
                entry_index, side, ..
            } => (*entry_index, *side == EntrySide::Credit),
        });
        all
    }
}
