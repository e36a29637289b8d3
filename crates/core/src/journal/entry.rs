//! Journal entry domain types.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::JournalError;

/// Largest amount one entry may carry (10^15).
///
/// Report folds sum amounts in `Decimal`, which panics past `Decimal::MAX`;
/// with this bound a journal would need tens of trillions of entries to get there.
pub const MAX_ENTRY_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Side of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySide {
    /// Debit side (increases debit-natured accounts).
    Debit,
    /// Credit side (increases credit-natured accounts).
    Credit,
}

impl fmt::Display for EntrySide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debit => f.write_str("debit"),
            Self::Credit => f.write_str("credit"),
        }
    }
}

/// One row of the journal.
///
/// Account codes are weak references: they are resolved against the chart
/// each time a report is derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Posting date.
    pub date: NaiveDate,
    /// Free-text description.
    pub memo: String,
    /// Code of the account debited.
    pub debit_account: String,
    /// Code of the account credited.
    pub credit_account: String,
    /// Amount posted to both sides.
    pub amount: Decimal,
}

impl JournalEntry {
    /// Creates an entry, validating it at the input boundary.
    ///
    /// Codes are trimmed. Debiting and crediting the same account is allowed.
    ///
    /// # Errors
    ///
    /// - `JournalError::NonPositiveAmount` if `amount <= 0`
    /// - `JournalError::AmountTooLarge` if `amount > MAX_ENTRY_AMOUNT`
    /// - `JournalError::EmptyAccountCode` if either code is blank
    pub fn new(
        date: NaiveDate,
        memo: impl Into<String>,
        debit_account: impl Into<String>,
        credit_account: impl Into<String>,
        amount: Decimal,
    ) -> Result<Self, JournalError> {
        if amount <= Decimal::ZERO {
            return Err(JournalError::NonPositiveAmount(amount));
        }
        if amount > MAX_ENTRY_AMOUNT {
            return Err(JournalError::AmountTooLarge(amount));
        }

        let debit_account = debit_account.into().trim().to_string();
        if debit_account.is_empty() {
            return Err(JournalError::EmptyAccountCode(EntrySide::Debit));
        }

        let credit_account = credit_account.into().trim().to_string();
        if credit_account.is_empty() {
            return Err(JournalError::EmptyAccountCode(EntrySide::Credit));
        }

        Ok(Self {
            date,
            memo: memo.into(),
            debit_account,
            credit_account,
            amount,
        })
    }

    /// Account code on the given side.
    #[must_use]
    pub fn account(&self, side: EntrySide) -> &str {
        match side {
            EntrySide::Debit => &self.debit_account,
            EntrySide::Credit => &self.credit_account,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_new_entry() {
        let entry = JournalEntry::new(date(), "Venda à vista", " 1.1.1", "3.1.1 ", dec!(1000)).unwrap();
        assert_eq!(entry.debit_account, "1.1.1");
        assert_eq!(entry.credit_account, "3.1.1");
        assert_eq!(entry.account(EntrySide::Debit), "1.1.1");
        assert_eq!(entry.account(EntrySide::Credit), "3.1.1");
        assert_eq!(entry.amount, dec!(1000));
    }

    #[test]
    fn test_zero_amount_rejected() {
        assert_eq!(
            JournalEntry::new(date(), "", "1.1.1", "3.1.1", dec!(0)),
            Err(JournalError::NonPositiveAmount(dec!(0)))
        );
    }

    #[test]
    fn test_negative_amount_rejected() {
        assert_eq!(
            JournalEntry::new(date(), "", "1.1.1", "3.1.1", dec!(-0.01)),
            Err(JournalError::NonPositiveAmount(dec!(-0.01)))
        );
    }

    #[test]
    fn test_amount_bound() {
        assert_eq!(MAX_ENTRY_AMOUNT, Decimal::from(1_000_000_000_000_000_i64));
        assert!(JournalEntry::new(date(), "", "1.1.1", "3.1.1", MAX_ENTRY_AMOUNT).is_ok());
        assert_eq!(
            JournalEntry::new(date(), "", "1.1.1", "3.1.1", Decimal::MAX),
            Err(JournalError::AmountTooLarge(Decimal::MAX))
        );
        assert_eq!(
            JournalEntry::new(date(), "", "1.1.1", "3.1.1", MAX_ENTRY_AMOUNT + dec!(0.01)),
            Err(JournalError::AmountTooLarge(MAX_ENTRY_AMOUNT + dec!(0.01)))
        );
    }

    #[test]
    fn test_blank_codes_rejected() {
        assert_eq!(
            JournalEntry::new(date(), "", "", "3.1.1", dec!(1)),
            Err(JournalError::EmptyAccountCode(EntrySide::Debit))
        );
        assert_eq!(
            JournalEntry::new(date(), "", "1.1.1", "  ", dec!(1)),
            Err(JournalError::EmptyAccountCode(EntrySide::Credit))
        );
    }

    #[test]
    fn test_same_account_both_sides_allowed() {
        let entry = JournalEntry::new(date(), "Estorno", "1.1.1", "1.1.1", dec!(10)).unwrap();
        assert_eq!(entry.debit_account, entry.credit_account);
    }

    #[test]
    fn test_side_display() {
        assert_eq!(EntrySide::Debit.to_string(), "debit");
        assert_eq!(EntrySide::Credit.to_string(), "credit");
    }
}
