//! Plain-text rendering of the reports.

use std::io::{self, Write};

use rust_decimal::Decimal;

use ledgerlab_core::journal::JournalEntry;
use ledgerlab_core::reports::{
    BalanceSheet, BalanceSheetSection, Diagnostic, DirectCashFlow, FinancialStatements,
    IncomeStatement, IndirectCashFlow, TrialBalance,
};

/// Text rendering switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Skip accounts without movement or balance.
    pub hide_zero: bool,
}

fn money(value: Decimal) -> String {
    let mut rounded = value.round_dp(2);
    rounded.rescale(2);
    rounded.to_string()
}

fn heading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(title.chars().count()))
}

/// Renders the trial balance with its totals.
pub fn trial_balance<W: Write>(out: &mut W, tb: &TrialBalance, options: RenderOptions) -> io::Result<()> {
    heading(out, "TRIAL BALANCE")?;
    writeln!(
        out,
        "{:<8} {:<32} {:>14} {:>14} {:>14} {:>14}",
        "Code", "Account", "Debits", "Credits", "Debit bal.", "Credit bal."
    )?;

    for row in &tb.rows {
        if options.hide_zero && row.total_debit.is_zero() && row.total_credit.is_zero() {
            continue;
        }
        writeln!(
            out,
            "{:<8} {:<32} {:>14} {:>14} {:>14} {:>14}",
            row.code,
            row.name,
            money(row.total_debit),
            money(row.total_credit),
            money(row.debit_balance),
            money(row.credit_balance)
        )?;
    }

    writeln!(
        out,
        "{:<41} {:>14} {:>14}",
        "Totals",
        money(tb.totals.total_debit),
        money(tb.totals.total_credit)
    )?;
    if !tb.totals.is_balanced {
        writeln!(
            out,
            "WARNING: books are unbalanced (difference {})",
            money(tb.totals.difference)
        )?;
    }
    Ok(())
}

/// Renders the income statement.
pub fn income_statement<W: Write>(out: &mut W, statement: &IncomeStatement) -> io::Result<()> {
    heading(out, "INCOME STATEMENT")?;
    for line in &statement.lines {
        writeln!(out, "{:<48} {:>14}", line.kind.label(), money(line.value))?;
    }
    Ok(())
}

fn section<W: Write>(
    out: &mut W,
    title: &str,
    section: &BalanceSheetSection,
    options: RenderOptions,
) -> io::Result<()> {
    writeln!(out, "{title}")?;
    let lines: Vec<_> = if options.hide_zero {
        section.non_zero_lines().collect()
    } else {
        section.lines.iter().collect()
    };
    for line in lines {
        writeln!(out, "  {:<8} {:<37} {:>14}", line.code, line.name, money(line.value))?;
    }
    writeln!(out, "  {:<46} {:>14}", format!("Total {}", title.to_lowercase()), money(section.total))
}

/// Renders the balance sheet and the equation check.
pub fn balance_sheet<W: Write>(out: &mut W, sheet: &BalanceSheet, options: RenderOptions) -> io::Result<()> {
    heading(out, "BALANCE SHEET")?;
    section(out, "Assets", &sheet.assets, options)?;
    section(out, "Liabilities", &sheet.liabilities, options)?;
    section(out, "Equity", &sheet.equity, options)?;
    writeln!(
        out,
        "{:<48} {:>14}",
        "Liabilities + Equity",
        money(sheet.total_liabilities_and_equity())
    )?;

    let gap = sheet.equation_gap();
    if !gap.is_zero() {
        // Before closing, the gap equals net income.
        writeln!(out, "{:<48} {:>14}", "Unclosed result (Assets - L&E)", money(gap))?;
    }
    Ok(())
}

/// Renders both cash-flow methods.
pub fn cash_flow<W: Write>(out: &mut W, direct: &DirectCashFlow, indirect: &IndirectCashFlow) -> io::Result<()> {
    heading(out, "CASH FLOW - DIRECT METHOD")?;
    writeln!(out, "{:<10} {:<20} {:>14} {:>14}", "Direction", "Counterpart", "Inflow", "Outflow")?;
    for line in &direct.lines {
        writeln!(
            out,
            "{:<10} {:<20} {:>14} {:>14}",
            line.direction.label(),
            line.counterpart_group.label(),
            money(line.inflow),
            money(line.outflow)
        )?;
    }
    writeln!(
        out,
        "{:<31} {:>14} {:>14}",
        "Totals",
        money(direct.total_inflow()),
        money(direct.total_outflow())
    )?;
    writeln!(out, "{:<46} {:>14}", "Net operating cash", money(direct.net_operating_cash()))?;
    writeln!(out)?;

    heading(out, "CASH FLOW - INDIRECT METHOD (SIMPLIFIED)")?;
    for line in &indirect.lines {
        writeln!(out, "{:<48} {:>14}", line.kind.label(), money(line.value))?;
    }
    let unexplained = indirect.unexplained_cash_variation();
    if !unexplained.is_zero() {
        writeln!(
            out,
            "NOTE: cash variation differs from operating cash by {}",
            money(unexplained)
        )?;
    }
    Ok(())
}

/// Renders the diagnostics list; nothing when there are none.
pub fn diagnostics<W: Write>(out: &mut W, diagnostics: &[Diagnostic]) -> io::Result<()> {
    if diagnostics.is_empty() {
        return Ok(());
    }
    heading(out, "DIAGNOSTICS")?;
    for diagnostic in diagnostics {
        writeln!(out, "[{}] {diagnostic}", diagnostic.code())?;
    }
    Ok(())
}

/// Renders the journal in posting order, numbered from 1.
pub fn journal<W: Write>(out: &mut W, entries: &[JournalEntry]) -> io::Result<()> {
    heading(out, "JOURNAL")?;
    if entries.is_empty() {
        return writeln!(out, "No entries.");
    }
    writeln!(
        out,
        "{:>4} {:<10} {:<24} {:<8} {:<8} {:>14}",
        "#", "Date", "Memo", "Debit", "Credit", "Amount"
    )?;
    for (number, entry) in entries.iter().enumerate() {
        writeln!(
            out,
            "{:>4} {:<10} {:<24} {:<8} {:<8} {:>14}",
            number + 1,
            entry.date,
            entry.memo,
            entry.debit_account,
            entry.credit_account,
            money(entry.amount)
        )?;
    }
    let total: Decimal = entries.iter().map(|entry| entry.amount).sum();
    writeln!(out, "{:<58} {:>14}", format!("{} entries", entries.len()), money(total))
}

/// Renders the account picker labels.
pub fn account_labels<W: Write>(out: &mut W, labels: &[String]) -> io::Result<()> {
    heading(out, "ACCOUNTS")?;
    for label in labels {
        writeln!(out, "{label}")?;
    }
    Ok(())
}

/// Renders every report, separated by blank lines.
pub fn all<W: Write>(out: &mut W, statements: &FinancialStatements, options: RenderOptions) -> io::Result<()> {
    trial_balance(out, &statements.trial_balance, options)?;
    writeln!(out)?;
    income_statement(out, &statements.income_statement)?;
    writeln!(out)?;
    balance_sheet(out, &statements.balance_sheet, options)?;
    writeln!(out)?;
    cash_flow(out, &statements.direct_cash_flow, &statements.indirect_cash_flow)?;

    let diagnostics_list = statements.diagnostics();
    if !diagnostics_list.is_empty() {
        writeln!(out)?;
        diagnostics(out, &diagnostics_list)?;
    }
    Ok(())
}
