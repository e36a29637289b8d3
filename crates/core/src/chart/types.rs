//! Account domain types.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ChartError;

/// Financial statement group an account belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountGroup {
    /// Asset ("Ativo").
    Asset,
    /// Liability ("Passivo").
    Liability,
    /// Equity ("Patrimônio Líquido").
    Equity,
    /// Revenue ("Resultado - Receita").
    Revenue,
    /// Expense ("Resultado - Despesa").
    Expense,
}

impl AccountGroup {
    /// Every group, in statement order.
    pub const ALL: [Self; 5] = [
        Self::Asset,
        Self::Liability,
        Self::Equity,
        Self::Revenue,
        Self::Expense,
    ];

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Asset => "Asset",
            Self::Liability => "Liability",
            Self::Equity => "Equity",
            Self::Revenue => "Revenue",
            Self::Expense => "Expense",
        }
    }

    /// Label used by the Brazilian chart the seeded accounts come from.
    ///
    /// Cash-flow lines are sorted on this label.
    #[must_use]
    pub const fn source_label(self) -> &'static str {
        match self {
            Self::Asset => "Ativo",
            Self::Liability => "Passivo",
            Self::Equity => "Patrimônio Líquido",
            Self::Revenue => "Resultado - Receita",
            Self::Expense => "Resultado - Despesa",
        }
    }

    /// Nature a well-formed chart gives accounts of this group.
    ///
    /// - Asset/Expense: debit-natured
    /// - Liability/Equity/Revenue: credit-natured
    #[must_use]
    pub const fn conventional_nature(self) -> AccountNature {
        match self {
            Self::Asset | Self::Expense => AccountNature::Debit,
            Self::Liability | Self::Equity | Self::Revenue => AccountNature::Credit,
        }
    }
}

impl fmt::Display for AccountGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AccountGroup {
    type Err = ChartError;

    /// Accepts English labels and the source-domain labels, ignoring case and
    /// whitespace ("Resultado - Receita" and "Resultado-Receita" are the same).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "asset" | "ativo" => Ok(Self::Asset),
            "liability" | "passivo" => Ok(Self::Liability),
            "equity" | "patrimôniolíquido" | "patrimonioliquido" => Ok(Self::Equity),
            "revenue" | "resultado-receita" => Ok(Self::Revenue),
            "expense" | "resultado-despesa" => Ok(Self::Expense),
            _ => Err(ChartError::UnknownGroup(s.to_string())),
        }
    }
}

/// Account nature: decides which side of the ledger increases the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountNature {
    /// Debit-natured ("Devedora"): balance = debits - credits.
    Debit,
    /// Credit-natured ("Credora"): balance = credits - debits.
    Credit,
}

impl AccountNature {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Debit => "Debit",
            Self::Credit => "Credit",
        }
    }

    /// Label used by the Brazilian chart ("Devedora", "Credora").
    #[must_use]
    pub const fn source_label(self) -> &'static str {
        match self {
            Self::Debit => "Devedora",
            Self::Credit => "Credora",
        }
    }

    /// Signed balance for the given totals.
    ///
    /// Positive means the account carries a balance on its natural side.
    #[must_use]
    pub fn signed_balance(self, total_debit: Decimal, total_credit: Decimal) -> Decimal {
        match self {
            Self::Debit => total_debit - total_credit,
            Self::Credit => total_credit - total_debit,
        }
    }

    /// Splits a signed balance into `(debit_balance, credit_balance)`.
    ///
    /// The natural side absorbs a positive balance, the other side a negative one.
    /// At most one of the two is non-zero.
    #[must_use]
    pub fn split_balance(self, signed_balance: Decimal) -> (Decimal, Decimal) {
        let natural = signed_balance.max(Decimal::ZERO);
        let contrary = (-signed_balance).max(Decimal::ZERO);
        match self {
            Self::Debit => (natural, contrary),
            Self::Credit => (contrary, natural),
        }
    }
}

impl fmt::Display for AccountNature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AccountNature {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "debit" | "devedora" => Ok(Self::Debit),
            "credit" | "credora" => Ok(Self::Credit),
            _ => Err(ChartError::UnknownNature(s.to_string())),
        }
    }
}

fn normalize_label(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// One row of the chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Hierarchical dotted code (e.g. "1.1.1"), unique within the chart.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Statement group.
    pub group: AccountGroup,
    /// Nature used for all sign math.
    pub nature: AccountNature,
    /// Whether the account counts as cash or a cash equivalent.
    pub is_cash: bool,
}

impl Account {
    /// Creates an account, trimming and validating code and name.
    ///
    /// # Errors
    ///
    /// Returns `ChartError::EmptyCode` or `ChartError::EmptyName` for blank fields.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        group: AccountGroup,
        nature: AccountNature,
        is_cash: bool,
    ) -> Result<Self, ChartError> {
        let code = code.into().trim().to_string();
        if code.is_empty() {
            return Err(ChartError::EmptyCode);
        }

        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ChartError::EmptyName(code));
        }

        Ok(Self {
            code,
            name,
            group,
            nature,
            is_cash,
        })
    }

    /// Picker label, `"<code> - <name>"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }

    /// Whether the nature matches the group's convention.
    #[must_use]
    pub fn has_conventional_nature(&self) -> bool {
        self.nature == self.group.conventional_nature()
    }
}

/// Extracts the account code from a picker label built by [`Account::label`].
///
/// Text without the `" - "` separator is taken to be a bare code.
#[must_use]
pub fn account_code_from_label(label: &str) -> &str {
    label
        .split_once(" - ")
        .map_or(label, |(code, _)| code)
        .trim()
}
