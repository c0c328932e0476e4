//! Transaction model
//!
//! A realized income or expense. The shared payload ([`TransactionEntry`]) is
//! also embedded by forecasts, so aggregation code only ever needs the entry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;
use super::period::MonthPeriod;

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Parse a kind tag ("income" / "expense"), case-insensitive
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Some(Self::Income),
            "expense" | "out" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// Fields shared by realized transactions and forecasts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEntry {
    pub name: String,

    /// Always positive; the direction is carried by `kind`
    pub amount: Money,

    #[serde(alias = "transaction_type")]
    pub kind: TransactionKind,

    /// Only the year and month are meaningful
    #[serde(with = "super::dates")]
    pub date: NaiveDate,

    /// Free-form category name, not checked against the registry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl TransactionEntry {
    pub fn new(
        name: impl Into<String>,
        amount: Money,
        kind: TransactionKind,
        date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            kind,
            date,
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn period(&self) -> MonthPeriod {
        MonthPeriod::of(self.date)
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Category name used for grouping, with a label for uncategorized entries
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }
}

/// Grouping label for entries without a category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A realized financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    #[serde(flatten)]
    pub entry: TransactionEntry,
}

impl Transaction {
    /// Create a transaction with a fresh id
    pub fn new(entry: TransactionEntry) -> Self {
        Self {
            id: TransactionId::new(),
            entry,
        }
    }

    pub fn period(&self) -> MonthPeriod {
        self.entry.period()
    }
}

impl AsRef<TransactionEntry> for Transaction {
    fn as_ref(&self) -> &TransactionEntry {
        &self.entry
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.entry.date.format("%Y-%m-%d"),
            self.entry.name,
            self.entry.amount,
            self.entry.kind
        )
    }
}

/// Partial update for a transaction entry; `None` fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionUpdate {
    pub name: Option<String>,
    pub amount: Option<Money>,
    pub kind: Option<TransactionKind>,
    pub date: Option<NaiveDate>,
    /// `Some(None)` clears the category
    pub category: Option<Option<String>>,
}

impl TransactionUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.amount.is_none()
            && self.kind.is_none()
            && self.date.is_none()
            && self.category.is_none()
    }

    /// Amounts must stay positive
    pub fn is_valid(&self) -> bool {
        self.amount.map_or(true, |amount| amount.is_positive())
    }

    pub fn apply_to(&self, entry: &mut TransactionEntry) {
        if let Some(name) = &self.name {
            entry.name = name.clone();
        }
        if let Some(amount) = self.amount {
            entry.amount = amount;
        }
        if let Some(kind) = self.kind {
            entry.kind = kind;
        }
        if let Some(date) = self.date {
            entry.date = date;
        }
        if let Some(category) = &self.category {
            entry.category = category.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn test_entry_period() {
        let entry = TransactionEntry::new(
            "Rent",
            Money::from_units(900),
            TransactionKind::Expense,
            march(28),
        );
        assert_eq!(entry.period(), MonthPeriod::new(2024, 3));
        assert!(entry.is_expense());
        assert_eq!(entry.category_label(), UNCATEGORIZED);
    }

    #[test]
    fn test_record_layout() {
        let txn = Transaction::new(
            TransactionEntry::new("Pay", Money::from_units(1000), TransactionKind::Income, march(1))
                .with_category("Salary"),
        );
        let value = serde_json::to_value(&txn).unwrap();

        assert_eq!(value["id"], txn.id.as_uuid().to_string());
        assert_eq!(value["name"], "Pay");
        assert_eq!(value["amount"], 100000);
        assert_eq!(value["kind"], "income");
        assert_eq!(value["date"], "2024-03-01");
        assert_eq!(value["category"], "Salary");
    }

    #[test]
    fn test_missing_category_omitted_and_defaulted() {
        let txn = Transaction::new(TransactionEntry::new(
            "Coffee",
            Money::from_cents(350),
            TransactionKind::Expense,
            march(3),
        ));
        let json = serde_json::to_string(&txn).unwrap();
        assert!(!json.contains("category"));

        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, txn);
    }

    #[test]
    fn test_legacy_record_accepted() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "name": "Groceries",
            "amount": 45.2,
            "transaction_type": "expense",
            "date": "2024-03-09T10:30:00"
        }"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(txn.entry.amount, Money::from_cents(4520));
        assert_eq!(txn.entry.kind, TransactionKind::Expense);
        assert_eq!(txn.entry.date, march(9));
        assert_eq!(txn.entry.category, None);
    }

    #[test]
    fn test_update_only_touches_given_fields() {
        let mut entry = TransactionEntry::new(
            "Groceries",
            Money::from_units(45),
            TransactionKind::Expense,
            march(9),
        )
        .with_category("Food");

        let update = TransactionUpdate {
            amount: Some(Money::from_units(50)),
            category: Some(None),
            ..Default::default()
        };
        assert!(update.is_valid());
        update.apply_to(&mut entry);

        assert_eq!(entry.name, "Groceries");
        assert_eq!(entry.amount, Money::from_units(50));
        assert_eq!(entry.category, None);
        assert_eq!(entry.date, march(9));
    }

    #[test]
    fn test_update_rejects_non_positive_amount() {
        let update = TransactionUpdate {
            amount: Some(Money::zero()),
            ..Default::default()
        };
        assert!(!update.is_valid());
        assert!(TransactionUpdate::default().is_empty());
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(TransactionKind::parse("Income"), Some(TransactionKind::Income));
        assert_eq!(TransactionKind::parse("expense"), Some(TransactionKind::Expense));
        assert_eq!(TransactionKind::parse("transfer"), None);
    }
}
