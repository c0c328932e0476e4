//! Forecast transaction model
//!
//! A forecast is a predicted transaction. It embeds the same entry payload as
//! a realized [`Transaction`] and adds notes plus an optional link to the
//! transaction that fulfilled it. A forecast is realized exactly when that
//! link is set, so the persisted `realized` flag is derived, never stored
//! independently in memory.

use serde::{Deserialize, Serialize};

use super::ids::{ForecastId, TransactionId};
use super::period::MonthPeriod;
use super::transaction::{Transaction, TransactionEntry};

/// A predicted transaction awaiting confirmation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ForecastRecord", into = "ForecastRecord")]
pub struct ForecastTransaction {
    pub id: ForecastId,
    pub entry: TransactionEntry,
    pub notes: String,
    linked_transaction_id: Option<TransactionId>,
}

impl ForecastTransaction {
    /// Create an unrealized forecast with a fresh id
    pub fn new(entry: TransactionEntry, notes: impl Into<String>) -> Self {
        Self {
            id: ForecastId::new(),
            entry,
            notes: notes.into(),
            linked_transaction_id: None,
        }
    }

    /// Derive a forecast from a realized transaction.
    ///
    /// The name gets `prefix`, the notes record where it came from, and the
    /// new forecast starts unrealized.
    pub fn from_transaction(txn: &Transaction, prefix: &str) -> Self {
        let mut entry = txn.entry.clone();
        entry.name = format!("{}{}", prefix, txn.entry.name);
        let notes = format!(
            "Created from transaction {} ({})",
            txn.id.as_uuid(),
            txn.entry.date.format("%Y-%m-%d")
        );
        Self::new(entry, notes)
    }

    pub fn period(&self) -> MonthPeriod {
        self.entry.period()
    }

    pub fn is_realized(&self) -> bool {
        self.linked_transaction_id.is_some()
    }

    pub fn linked_transaction_id(&self) -> Option<TransactionId> {
        self.linked_transaction_id
    }

    /// Link this forecast to the transaction that fulfilled it
    pub fn mark_realized(&mut self, transaction_id: TransactionId) {
        self.linked_transaction_id = Some(transaction_id);
    }
}

impl AsRef<TransactionEntry> for ForecastTransaction {
    fn as_ref(&self) -> &TransactionEntry {
        &self.entry
    }
}

/// Flat on-disk shape of a forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ForecastRecord {
    id: ForecastId,

    #[serde(flatten)]
    entry: TransactionEntry,

    #[serde(default)]
    notes: String,

    #[serde(default)]
    realized: bool,

    #[serde(
        default,
        alias = "actual_transaction_id",
        skip_serializing_if = "Option::is_none"
    )]
    linked_transaction_id: Option<TransactionId>,
}

impl From<ForecastRecord> for ForecastTransaction {
    fn from(record: ForecastRecord) -> Self {
        if record.realized && record.linked_transaction_id.is_none() {
            tracing::warn!(
                forecast = %record.id,
                "forecast marked realized without a linked transaction; treating as unrealized"
            );
        }
        Self {
            id: record.id,
            entry: record.entry,
            notes: record.notes,
            linked_transaction_id: record.linked_transaction_id,
        }
    }
}

impl From<ForecastTransaction> for ForecastRecord {
    fn from(forecast: ForecastTransaction) -> Self {
        Self {
            id: forecast.id,
            realized: forecast.is_realized(),
            entry: forecast.entry,
            notes: forecast.notes,
            linked_transaction_id: forecast.linked_transaction_id,
        }
    }
}
