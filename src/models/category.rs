//! Category model
//!
//! Categories classify transactions by name. Transactions refer to them by a
//! plain string, so renaming or removing a category never touches them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::transaction::TransactionKind;

/// A named transaction category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique, case-sensitive key
    pub name: String,

    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl Category {
    pub fn new(name: impl Into<String>, kind: TransactionKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Categories seeded into an empty registry
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("Salary", TransactionKind::Income),
            Self::new("Bank Loan", TransactionKind::Expense),
            Self::new("Debt to Person", TransactionKind::Expense),
            Self::new("Parental Expenses", TransactionKind::Expense),
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
