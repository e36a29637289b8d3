//! Code lookup over a chart snapshot.

use std::collections::{HashMap, HashSet};

use super::types::Account;

/// Maps account codes to their position in a chart slice.
///
/// Built once per computation. If a code appears twice the first row wins.
#[derive(Debug, Clone)]
pub struct ChartIndex<'a> {
    accounts: &'a [Account],
    positions: HashMap<&'a str, usize>,
}

impl<'a> ChartIndex<'a> {
    /// Indexes the given chart.
    #[must_use]
    pub fn new(accounts: &'a [Account]) -> Self {
        let mut positions = HashMap::with_capacity(accounts.len());
        for (position, account) in accounts.iter().enumerate() {
            positions.entry(account.code.as_str()).or_insert(position);
        }
        Self {
            accounts,
            positions,
        }
    }

    /// Position of the account with this code in the chart.
    #[must_use]
    pub fn position(&self, code: &str) -> Option<usize> {
        self.positions.get(code).copied()
    }

    /// Account with this code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&'a Account> {
        self.position(code).map(|position| &self.accounts[position])
    }

    /// Whether the code resolves.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.positions.contains_key(code)
    }

    /// Whether the code resolves to a cash account. Unknown codes are not cash.
    #[must_use]
    pub fn is_cash(&self, code: &str) -> bool {
        self.get(code).is_some_and(|account| account.is_cash)
    }

    /// Codes of every cash account.
    #[must_use]
    pub fn cash_codes(&self) -> HashSet<&'a str> {
        self.accounts
            .iter()
            .filter(|account| account.is_cash)
            .map(|account| account.code.as_str())
            .collect()
    }
}
