//! CSV import and export of the chart and the journal.
//!
//! Chart header: `code,name,group,nature,is_cash`
//! Journal header: `date,memo,debit_account,credit_account,amount`
//!
//! Every row goes through the core constructors, so a table that loads is a
//! table the engine accepts. Errors name the 1-based line of the bad row.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use ledgerlab_core::chart::{Account, AccountGroup, AccountNature, default_chart};
use ledgerlab_core::journal::JournalEntry;
use ledgerlab_shared::{AppError, AppResult};

const DATE_FORMAT: &str = "%Y-%m-%d";
const JOURNAL_HEADER: [&str; 5] = ["date", "memo", "debit_account", "credit_account", "amount"];

#[derive(Debug, Deserialize)]
struct ChartRow {
    code: String,
    name: String,
    group: String,
    nature: String,
    is_cash: bool,
}

#[derive(Debug, Serialize)]
struct ChartOutRow<'a> {
    code: &'a str,
    name: &'a str,
    group: &'static str,
    nature: &'static str,
    is_cash: bool,
}

#[derive(Debug, Deserialize)]
struct JournalRow {
    date: String,
    #[serde(default)]
    memo: String,
    debit_account: String,
    credit_account: String,
    amount: String,
}

#[derive(Debug, Serialize)]
struct JournalOutRow<'a> {
    date: String,
    memo: &'a str,
    debit_account: &'a str,
    credit_account: &'a str,
    amount: String,
}

impl<'a> From<&'a JournalEntry> for JournalOutRow<'a> {
    fn from(entry: &'a JournalEntry) -> Self {
        Self {
            date: entry.date.format(DATE_FORMAT).to_string(),
            memo: &entry.memo,
            debit_account: &entry.debit_account,
            credit_account: &entry.credit_account,
            amount: entry.amount.to_string(),
        }
    }
}

// The header is line 1.
fn line_of(index: usize) -> usize {
    index + 2
}

fn row_error(line: usize, message: impl std::fmt::Display) -> AppError {
    AppError::Validation(format!("line {line}: {message}"))
}

fn csv_error(err: &csv::Error) -> AppError {
    AppError::Io(err.to_string())
}

fn io_error(path: &Path, err: &io::Error) -> AppError {
    if err.kind() == io::ErrorKind::NotFound {
        AppError::NotFound(path.display().to_string())
    } else {
        AppError::Io(format!("{}: {err}", path.display()))
    }
}

/// Reads a chart of accounts from CSV.
pub fn read_chart<R: Read>(reader: R) -> AppResult<Vec<Account>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut accounts = Vec::new();

    for (index, rec) in rdr.deserialize::<ChartRow>().enumerate() {
        let line = line_of(index);
        let row = rec.map_err(|e| row_error(line, e))?;

        let group: AccountGroup = row.group.parse().map_err(|e| row_error(line, e))?;
        let nature: AccountNature = row.nature.parse().map_err(|e| row_error(line, e))?;
        let account = Account::new(row.code, row.name, group, nature, row.is_cash)
            .map_err(|e| row_error(line, e))?;
        accounts.push(account);
    }

    Ok(accounts)
}

/// Writes a chart of accounts as CSV, header included.
///
/// With `source_labels`, groups and natures use the Brazilian chart labels
/// ("Ativo", "Devedora") instead of the English ones.
pub fn write_chart<W: Write>(writer: W, accounts: &[Account], source_labels: bool) -> AppResult<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    for account in accounts {
        let (group, nature) = if source_labels {
            (account.group.source_label(), account.nature.source_label())
        } else {
            (account.group.label(), account.nature.label())
        };
        wtr.serialize(ChartOutRow {
            code: &account.code,
            name: &account.name,
            group,
            nature,
            is_cash: account.is_cash,
        })
        .map_err(|e| csv_error(&e))?;
    }
    wtr.flush().map_err(|e| AppError::Io(e.to_string()))
}

/// Reads a journal from CSV.
///
/// Codes are not checked against any chart here; the reports flag stale ones.
pub fn read_journal<R: Read>(reader: R) -> AppResult<Vec<JournalEntry>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut entries = Vec::new();

    for (index, rec) in rdr.deserialize::<JournalRow>().enumerate() {
        let line = line_of(index);
        let row = rec.map_err(|e| row_error(line, e))?;

        let date = NaiveDate::parse_from_str(&row.date, DATE_FORMAT)
            .map_err(|e| row_error(line, format!("date {:?}: {e}", row.date)))?;
        let amount: Decimal = row
            .amount
            .parse()
            .map_err(|e| row_error(line, format!("amount {:?}: {e}", row.amount)))?;
        let entry = JournalEntry::new(date, row.memo, row.debit_account, row.credit_account, amount)
            .map_err(|e| row_error(line, e))?;
        entries.push(entry);
    }

    Ok(entries)
}

/// Writes journal entries as CSV rows, with or without the header.
///
/// The header is written even when there are no entries.
pub fn write_journal<W: Write>(writer: W, entries: &[JournalEntry], with_header: bool) -> AppResult<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    if with_header {
        wtr.write_record(JOURNAL_HEADER).map_err(|e| csv_error(&e))?;
    }
    for entry in entries {
        wtr.serialize(JournalOutRow::from(entry))
            .map_err(|e| csv_error(&e))?;
    }
    wtr.flush().map_err(|e| AppError::Io(e.to_string()))
}

/// Loads the chart from `path`, or the seeded chart when no path is given.
pub fn load_chart(path: Option<&Path>) -> AppResult<Vec<Account>> {
    let Some(path) = path else {
        return Ok(default_chart());
    };
    let file = File::open(path).map_err(|e| io_error(path, &e))?;
    let accounts = read_chart(file)?;
    for account in accounts.iter().filter(|account| !account.has_conventional_nature()) {
        warn!(
            code = %account.code,
            nature = account.nature.label(),
            "account nature differs from its group's convention"
        );
    }
    info!(path = %path.display(), accounts = accounts.len(), "chart loaded");
    Ok(accounts)
}

/// Loads the journal at `path`.
pub fn load_journal(path: &Path) -> AppResult<Vec<JournalEntry>> {
    let file = File::open(path).map_err(|e| io_error(path, &e))?;
    let entries = read_journal(file)?;
    info!(path = %path.display(), entries = entries.len(), "journal loaded");
    Ok(entries)
}

/// Loads the journal at `path`, treating a missing file as an empty journal.
pub fn load_journal_or_empty(path: &Path) -> AppResult<Vec<JournalEntry>> {
    if path.exists() {
        load_journal(path)
    } else {
        Ok(Vec::new())
    }
}

/// Appends one entry to the journal at `path`, creating it with a header if needed.
pub fn append_entry(path: &Path, entry: &JournalEntry) -> AppResult<()> {
    let needs_header = std::fs::metadata(path).map_or(true, |meta| meta.len() == 0);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| io_error(path, &e))?;
    write_journal(file, std::slice::from_ref(entry), needs_header)?;
    info!(path = %path.display(), "journal entry appended");
    Ok(())
}

/// Rewrites the journal at `path` with exactly `entries`, header included.
pub fn save_journal(path: &Path, entries: &[JournalEntry]) -> AppResult<()> {
    let file = File::create(path).map_err(|e| io_error(path, &e))?;
    write_journal(file, entries, true)?;
    info!(path = %path.display(), entries = entries.len(), "journal saved");
    Ok(())
}

/// Writes the chart to `path`, or to stdout when no path is given.
pub fn export_chart(path: Option<&Path>, accounts: &[Account], source_labels: bool) -> AppResult<()> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| io_error(path, &e))?;
            write_chart(file, accounts, source_labels)?;
            info!(path = %path.display(), accounts = accounts.len(), "chart exported");
            Ok(())
        }
        None => write_chart(io::stdout().lock(), accounts, source_labels),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_read_chart_accepts_source_labels() {
        let csv = "code,name,group,nature,is_cash\n\
                   1.1.1,Caixa,Ativo,Devedora,true\n\
                   3.1.1, Receita de Vendas ,Resultado - Receita,Credora,false\n\
                   4.1.2,Despesas,expense,debit,false\n";

        let accounts = read_chart(csv.as_bytes()).unwrap();

        assert_eq!(accounts.len(), 3);
        assert_eq!(accounts[0].group, AccountGroup::Asset);
        assert!(accounts[0].is_cash);
        assert_eq!(accounts[1].name, "Receita de Vendas");
        assert_eq!(accounts[1].nature, AccountNature::Credit);
        assert_eq!(accounts[2].group, AccountGroup::Expense);
    }

    #[test]
    fn test_read_chart_reports_line_of_bad_group() {
        let csv = "code,name,group,nature,is_cash\n\
                   1.1.1,Caixa,Ativo,Devedora,true\n\
                   9.9.9,Mystery,Limbo,Devedora,false\n";

        let err = read_chart(csv.as_bytes()).unwrap_err();
        assert!(matches!(&err, AppError::Validation(msg) if msg.starts_with("line 3:")));
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_read_chart_rejects_blank_name() {
        let csv = "code,name,group,nature,is_cash\n1.1.1,  ,Ativo,Devedora,true\n";
        let err = read_chart(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.starts_with("line 2:")));
    }

    #[test]
    fn test_chart_export_reimports() {
        let mut buffer = Vec::new();
        write_chart(&mut buffer, &default_chart(), false).unwrap();

        let text = String::from_utf8(buffer.clone()).unwrap();
        assert!(text.starts_with("code,name,group,nature,is_cash\n1.1.1,Caixa,Asset,Debit,true\n"));
        assert_eq!(read_chart(buffer.as_slice()).unwrap(), default_chart());
    }

    #[test]
    fn test_chart_export_with_source_labels() {
        let mut buffer = Vec::new();
        write_chart(&mut buffer, &default_chart(), true).unwrap();

        let text = String::from_utf8(buffer.clone()).unwrap();
        assert!(text.contains("1.1.1,Caixa,Ativo,Devedora,true\n"));
        assert!(text.contains("2.3.1,Capital Social,Patrimônio Líquido,Credora,false\n"));
        assert!(text.contains("3.1.1,Receita de Vendas,Resultado - Receita,Credora,false\n"));
        assert_eq!(read_chart(buffer.as_slice()).unwrap(), default_chart());
    }

    #[test]
    fn test_read_journal() {
        let csv = "date,memo,debit_account,credit_account,amount\n\
                   2024-03-01,Venda à vista,1.1.1,3.1.1,1000.00\n\
                   2024-03-02,,4.1.2,1.1.1,300\n";

        let entries = read_journal(csv.as_bytes()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(entries[0].amount, dec!(1000.00));
        assert_eq!(entries[1].memo, "");
        assert_eq!(entries[1].credit_account, "1.1.1");
    }

    #[test]
    fn test_read_journal_rejects_non_positive_amount() {
        let csv = "date,memo,debit_account,credit_account,amount\n\
                   2024-03-01,ok,1.1.1,3.1.1,10\n\
                   2024-03-02,refund,1.1.1,3.1.1,-5\n";

        let err = read_journal(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.starts_with("line 3:")));
    }

    #[test]
    fn test_read_journal_rejects_oversized_amount() {
        let csv = "date,memo,debit_account,credit_account,amount\n\
                   2024-03-01,x,1.1.1,3.1.1,79228162514264337593543950335\n";
        let err = read_journal(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.starts_with("line 2:") && msg.contains("exceeds")));
    }

    #[test]
    fn test_read_journal_rejects_bad_date() {
        let csv = "date,memo,debit_account,credit_account,amount\n01/03/2024,x,1.1.1,3.1.1,10\n";
        let err = read_journal(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("01/03/2024")));
    }

    #[test]
    fn test_write_journal_without_header() {
        let entry = JournalEntry::new(
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            "Aluguel, março",
            "4.1.3",
            "1.1.2",
            dec!(1500.50),
        )
        .unwrap();

        let mut buffer = Vec::new();
        write_journal(&mut buffer, &[entry.clone()], false).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "2024-03-05,\"Aluguel, março\",4.1.3,1.1.2,1500.50\n");

        let mut with_header = Vec::new();
        write_journal(&mut with_header, &[entry.clone()], true).unwrap();
        assert_eq!(read_journal(with_header.as_slice()).unwrap(), vec![entry]);
    }

    #[test]
    fn test_empty_journal_keeps_header() {
        let mut buffer = Vec::new();
        write_journal(&mut buffer, &[], true).unwrap();
        assert_eq!(
            String::from_utf8(buffer.clone()).unwrap(),
            "date,memo,debit_account,credit_account,amount\n"
        );
        assert!(read_journal(buffer.as_slice()).unwrap().is_empty());
    }

    #[test]
    fn test_load_chart_defaults_without_path() {
        assert_eq!(load_chart(None).unwrap().len(), 17);
    }

    #[test]
    fn test_load_journal_missing_file_is_not_found() {
        let path = Path::new("definitely/not/here/journal.csv");
        assert!(matches!(load_journal(path), Err(AppError::NotFound(_))));
        assert!(load_journal_or_empty(path).unwrap().is_empty());
    }
}
