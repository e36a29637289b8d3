//! LedgerLab command line
//!
//! Loads the chart and the journal from CSV, records and lists entries, and
//! renders every report as text or JSON.

mod io;
mod render;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use ledgerlab_core::Workbook;
use ledgerlab_core::chart::{account_code_from_label, default_chart};
use ledgerlab_core::journal::JournalEntry;
use ledgerlab_core::reports::{
    Diagnostic, DirectCashFlow, FinancialStatements, IndirectCashFlow, ReportSettings,
};
use ledgerlab_shared::{AppConfig, AppError, LoggingConfig};

use crate::render::RenderOptions;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ReportKind {
    All,
    TrialBalance,
    IncomeStatement,
    BalanceSheet,
    CashFlow,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "ledgerlab", version, about = "Double-entry bookkeeping and financial statements")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the seeded chart of accounts as CSV
    Chart {
        /// Output file (stdout by default)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
        /// Use the Brazilian group and nature labels
        #[arg(long)]
        source_labels: bool,
    },

    /// Record one journal entry
    Post {
        /// Journal CSV, created if missing
        #[arg(short = 'j', long)]
        journal: PathBuf,
        /// Chart CSV (seeded chart by default)
        #[arg(short = 'c', long)]
        chart: Option<PathBuf>,
        /// Posting date, YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        /// Description
        #[arg(long, default_value = "")]
        memo: String,
        /// Account debited (code or "code - name")
        #[arg(long)]
        debit: String,
        /// Account credited (code or "code - name")
        #[arg(long)]
        credit: String,
        /// Amount, strictly positive
        #[arg(long)]
        amount: Decimal,
    },

    /// List the journal entries, or clear them
    Journal {
        /// Journal CSV
        #[arg(short = 'j', long)]
        journal: PathBuf,
        /// Chart CSV (seeded chart by default)
        #[arg(short = 'c', long)]
        chart: Option<PathBuf>,
        /// Also list the accounts available for posting
        #[arg(long)]
        accounts: bool,
        /// Remove every entry, keeping the header
        #[arg(long, conflicts_with = "accounts")]
        clear: bool,
    },

    /// Render reports
    Report {
        /// Journal CSV
        #[arg(short = 'j', long)]
        journal: PathBuf,
        /// Chart CSV (seeded chart by default)
        #[arg(short = 'c', long)]
        chart: Option<PathBuf>,
        /// Which report to render
        #[arg(short = 'k', long, value_enum, default_value_t = ReportKind::All)]
        kind: ReportKind,
        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Hide accounts without movement or balance (text output)
        #[arg(long)]
        hide_zero: bool,
    },
}

#[derive(Serialize)]
struct AllReports<'a> {
    #[serde(flatten)]
    statements: &'a FinancialStatements,
    diagnostics: Vec<Diagnostic>,
}

#[derive(Serialize)]
struct CashFlowReports<'a> {
    direct: &'a DirectCashFlow,
    indirect: &'a IndirectCashFlow,
}

fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr; stdout is for reports.
    if config.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

fn exit_status(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<AppError>()
        .map_or(1, |app| u8::try_from(app.exit_code()).unwrap_or(1))
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            let err = AppError::from(err);
            eprintln!("error: {err}");
            return ExitCode::from(exit_status(&err.into()));
        }
    };

    init_tracing(&config.logging);

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err
                .downcast_ref::<AppError>()
                .map_or("INTERNAL_ERROR", AppError::error_code);
            error!(code, "command failed");
            eprintln!("error: {err:#}");
            ExitCode::from(exit_status(&err))
        }
    }
}

fn run(command: Command, config: &AppConfig) -> anyhow::Result<()> {
    match command {
        Command::Chart { output, source_labels } => {
            io::export_chart(output.as_deref(), &default_chart(), source_labels)
                .context("exporting the chart of accounts")
        }

        Command::Post {
            journal,
            chart,
            date,
            memo,
            debit,
            credit,
            amount,
        } => {
            let entry = JournalEntry::new(
                date,
                memo,
                account_code_from_label(&debit),
                account_code_from_label(&credit),
                amount,
            )
            .map_err(AppError::from)?;
            post(&journal, chart.as_deref(), entry)
        }

        Command::Journal {
            journal,
            chart,
            accounts,
            clear,
        } => {
            if clear {
                let removed = clear_journal_file(&journal, chart.as_deref())?;
                println!("Cleared {removed} entries from {}", journal.display());
                return Ok(());
            }
            let workbook = open_workbook(&journal, chart.as_deref(), ReportSettings::from(&config.reports))?;
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            list_journal(&mut out, &workbook, accounts)?;
            out.flush()?;
            Ok(())
        }

        Command::Report {
            journal,
            chart,
            kind,
            format,
            hide_zero,
        } => {
            let options = RenderOptions {
                hide_zero: hide_zero || config.reports.hide_zero_balances,
            };
            report(
                &journal,
                chart.as_deref(),
                ReportSettings::from(&config.reports),
                kind,
                format,
                options,
            )
        }
    }
}

fn load_workbook(chart: Option<&Path>) -> anyhow::Result<Workbook> {
    let accounts = io::load_chart(chart).context("loading the chart of accounts")?;
    Ok(Workbook::new(accounts))
}

fn open_workbook(journal: &Path, chart: Option<&Path>, settings: ReportSettings) -> anyhow::Result<Workbook> {
    let mut workbook = load_workbook(chart)?.with_settings(settings);
    workbook.extend_journal(io::load_journal(journal).context("loading the journal")?);
    Ok(workbook)
}

fn list_journal<W: Write>(out: &mut W, workbook: &Workbook, accounts: bool) -> std::io::Result<()> {
    render::journal(out, workbook.journal())?;
    if accounts {
        writeln!(out)?;
        render::account_labels(out, &workbook.account_labels())?;
    }
    Ok(())
}

/// Empties the journal file down to its header; returns how many entries it held.
fn clear_journal_file(journal: &Path, chart: Option<&Path>) -> anyhow::Result<usize> {
    let mut workbook = load_workbook(chart)?;
    workbook.extend_journal(io::load_journal(journal).context("loading the journal")?);

    let removed = workbook.journal().len();
    workbook.clear_journal();
    io::save_journal(journal, workbook.journal()).context("rewriting the journal")?;
    Ok(removed)
}

fn post(journal: &Path, chart: Option<&Path>, entry: JournalEntry) -> anyhow::Result<()> {
    let mut workbook = load_workbook(chart)?;
    workbook.extend_journal(io::load_journal_or_empty(journal).context("loading the journal")?);

    workbook.post_entry(entry).map_err(AppError::from)?;
    let Some(posted) = workbook.journal().last() else {
        return Err(AppError::Internal("posted entry missing from journal".to_string()).into());
    };
    io::append_entry(journal, posted).context("appending to the journal")?;

    info!(
        entries = workbook.journal().len(),
        debit = %posted.debit_account,
        credit = %posted.credit_account,
        amount = %posted.amount,
        "entry recorded"
    );
    println!(
        "Recorded entry #{}: {} {} -> {} {}",
        workbook.journal().len(),
        posted.date,
        posted.debit_account,
        posted.credit_account,
        posted.amount
    );
    Ok(())
}

fn report(
    journal: &Path,
    chart: Option<&Path>,
    settings: ReportSettings,
    kind: ReportKind,
    format: OutputFormat,
    options: RenderOptions,
) -> anyhow::Result<()> {
    let workbook = open_workbook(journal, chart, settings)?;
    let statements = workbook.statements();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Text => render_text(&mut out, &statements, kind, options)?,
        OutputFormat::Json => render_json(&mut out, &statements, kind)?,
    }
    out.flush()?;
    Ok(())
}

fn render_text<W: Write>(
    out: &mut W,
    statements: &FinancialStatements,
    kind: ReportKind,
    options: RenderOptions,
) -> std::io::Result<()> {
    match kind {
        ReportKind::All => render::all(out, statements, options),
        ReportKind::TrialBalance => {
            render::trial_balance(out, &statements.trial_balance, options)?;
            render::diagnostics(out, &statements.trial_balance.diagnostics)
        }
        ReportKind::IncomeStatement => render::income_statement(out, &statements.income_statement),
        ReportKind::BalanceSheet => render::balance_sheet(out, &statements.balance_sheet, options),
        ReportKind::CashFlow => {
            render::cash_flow(out, &statements.direct_cash_flow, &statements.indirect_cash_flow)?;
            render::diagnostics(out, &statements.direct_cash_flow.diagnostics)
        }
    }
}

fn render_json<W: Write>(out: &mut W, statements: &FinancialStatements, kind: ReportKind) -> anyhow::Result<()> {
    match kind {
        ReportKind::All => serde_json::to_writer_pretty(
            &mut *out,
            &AllReports {
                statements,
                diagnostics: statements.diagnostics(),
            },
        )?,
        ReportKind::TrialBalance => serde_json::to_writer_pretty(&mut *out, &statements.trial_balance)?,
        ReportKind::IncomeStatement => {
            serde_json::to_writer_pretty(&mut *out, &statements.income_statement)?;
        }
        ReportKind::BalanceSheet => serde_json::to_writer_pretty(&mut *out, &statements.balance_sheet)?,
        ReportKind::CashFlow => serde_json::to_writer_pretty(
            &mut *out,
            &CashFlowReports {
                direct: &statements.direct_cash_flow,
                indirect: &statements.indirect_cash_flow,
            },
        )?,
    }
    writeln!(out)?;
    Ok(())
}
