//! Workbook state and mutations.

use tracing::{debug, info};

use crate::chart::{Account, ChartIndex, default_chart};
use crate::journal::{EntrySide, JournalEntry, JournalError};
use crate::reports::{FinancialStatements, ReportService, ReportSettings};

/// Chart, journal and settings edited during a session.
#[derive(Debug, Clone)]
pub struct Workbook {
    chart: Vec<Account>,
    journal: Vec<JournalEntry>,
    settings: ReportSettings,
}

impl Workbook {
    /// Creates a workbook over `chart` with an empty journal.
    #[must_use]
    pub fn new(chart: Vec<Account>) -> Self {
        Self {
            chart,
            journal: Vec::new(),
            settings: ReportSettings::default(),
        }
    }

    /// Creates a workbook over the seeded default chart.
    #[must_use]
    pub fn with_default_chart() -> Self {
        Self::new(default_chart())
    }

    /// Replaces the report settings.
    #[must_use]
    pub fn with_settings(mut self, settings: ReportSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Current chart of accounts.
    #[must_use]
    pub fn chart(&self) -> &[Account] {
        &self.chart
    }

    /// Current journal, in posting order.
    #[must_use]
    pub fn journal(&self) -> &[JournalEntry] {
        &self.journal
    }

    /// Picker labels for every account, in chart order.
    #[must_use]
    pub fn account_labels(&self) -> Vec<String> {
        self.chart.iter().map(Account::label).collect()
    }

    /// Appends an entry after checking both codes against the chart.
    ///
    /// # Errors
    ///
    /// - `JournalError::EmptyChart` if the chart has no accounts
    /// - `JournalError::UnknownAccount` if either code is not in the chart
    pub fn post_entry(&mut self, entry: JournalEntry) -> Result<(), JournalError> {
        if self.chart.is_empty() {
            return Err(JournalError::EmptyChart);
        }

        let index = ChartIndex::new(&self.chart);
        for side in [EntrySide::Debit, EntrySide::Credit] {
            let code = entry.account(side);
            if !index.contains(code) {
                return Err(JournalError::UnknownAccount {
                    side,
                    code: code.to_string(),
                });
            }
        }

        debug!(
            debit = %entry.debit_account,
            credit = %entry.credit_account,
            amount = %entry.amount,
            "journal entry posted"
        );
        self.journal.push(entry);
        Ok(())
    }

    /// Appends entries that were validated elsewhere, such as an imported journal.
    ///
    /// Codes are not checked; unknown ones surface as report diagnostics.
    pub fn extend_journal(&mut self, entries: impl IntoIterator<Item = JournalEntry>) {
        self.journal.extend(entries);
    }

    /// Replaces the whole chart. The journal is kept as-is.
    pub fn replace_chart(&mut self, chart: Vec<Account>) {
        info!(accounts = chart.len(), "chart of accounts replaced");
        self.chart = chart;
    }

    /// Removes every journal entry.
    pub fn clear_journal(&mut self) {
        info!(entries = self.journal.len(), "journal cleared");
        self.journal.clear();
    }

    /// Derives every report from the current chart and journal.
    #[must_use]
    pub fn statements(&self) -> FinancialStatements {
        ReportService::generate(&self.chart, &self.journal, &self.settings)
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::with_default_chart()
    }
}
