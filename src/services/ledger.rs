//! Transaction ledger
//!
//! Stores realized transactions in insertion order and computes monthly,
//! yearly, cumulative and per-category aggregates over them. Every mutation
//! is flushed to the backing store before it returns.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::FinTrackResult;
use crate::models::{
    Money, MonthPeriod, Transaction, TransactionEntry, TransactionId, TransactionKind,
    TransactionUpdate,
};
use crate::storage::RecordStore;

use super::summary::{
    self, CategoryBreakdown, CumulativePoint, DistributionSlice, MonthlySummary,
};

/// Number of named slices in an expense distribution before the rest is
/// folded into "Other"
pub const DEFAULT_DISTRIBUTION_SLICES: usize = 5;

/// The set of realized transactions
pub struct TransactionLedger {
    store: Box<dyn RecordStore<Transaction>>,
    transactions: Vec<Transaction>,
}

impl TransactionLedger {
    pub fn load(store: Box<dyn RecordStore<Transaction>>) -> FinTrackResult<Self> {
        let transactions = store.load()?;
        Ok(Self {
            store,
            transactions,
        })
    }

    // === Mutations ===

    /// Record a transaction under a fresh id.
    ///
    /// Returns `None` without storing anything when the amount is not positive.
    pub fn add(&mut self, entry: TransactionEntry) -> FinTrackResult<Option<Transaction>> {
        if !entry.amount.is_positive() {
            tracing::debug!(name = %entry.name, amount = %entry.amount, "rejected non-positive amount");
            return Ok(None);
        }

        let txn = Transaction::new(entry);
        self.transactions.push(txn.clone());
        self.flush()?;

        tracing::debug!(id = %txn.id, "added transaction");
        Ok(Some(txn))
    }

    pub fn remove(&mut self, id: TransactionId) -> FinTrackResult<bool> {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        if self.transactions.len() == before {
            return Ok(false);
        }

        self.flush()?;
        Ok(true)
    }

    /// Apply a partial update. False if the id is unknown or the update would
    /// make the amount non-positive.
    pub fn update(&mut self, id: TransactionId, update: &TransactionUpdate) -> FinTrackResult<bool> {
        if !update.is_valid() {
            return Ok(false);
        }
        let Some(txn) = self.transactions.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };

        update.apply_to(&mut txn.entry);
        self.flush()?;
        Ok(true)
    }

    // === Queries ===

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// All transactions in storage order
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Transactions in one month, in storage order
    pub fn list_by_month(&self, period: MonthPeriod) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.period() == period)
            .collect()
    }

    pub fn monthly_summary(&self, period: MonthPeriod) -> MonthlySummary {
        MonthlySummary::from_entries(self.entries_in(period))
    }

    /// One summary per month of `year`, keyed 1 through 12
    pub fn monthly_series(&self, year: i32) -> BTreeMap<u32, MonthlySummary> {
        (1..=12)
            .map(|month| (month, self.monthly_summary(MonthPeriod::new(year, month))))
            .collect()
    }

    /// Running totals, one point per transaction in date order.
    ///
    /// Transactions sharing a date keep their storage order.
    pub fn cumulative_series(&self) -> Vec<CumulativePoint> {
        let mut ordered: Vec<&Transaction> = self.transactions.iter().collect();
        ordered.sort_by_key(|t| t.entry.date);

        let mut income = Money::zero();
        let mut expenses = Money::zero();
        ordered
            .into_iter()
            .map(|t| {
                match t.entry.kind {
                    TransactionKind::Income => income += t.entry.amount,
                    TransactionKind::Expense => expenses += t.entry.amount,
                }
                CumulativePoint {
                    date: t.entry.date,
                    cumulative_income: income,
                    cumulative_expenses: expenses,
                    cumulative_net: income - expenses,
                }
            })
            .collect()
    }

    /// Years with at least one transaction, ascending.
    ///
    /// An empty ledger reports the current year so there is always one to pick.
    pub fn distinct_years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self.transactions.iter().map(|t| t.period().year).collect();
        if years.is_empty() {
            return vec![MonthPeriod::current().year];
        }
        years.into_iter().collect()
    }

    pub fn category_breakdown(&self, period: MonthPeriod) -> CategoryBreakdown {
        CategoryBreakdown::from_entries(self.entries_in(period))
    }

    /// Expense share per category for a month, largest first, with
    /// categories past `top_n` folded into "Other"
    pub fn expense_distribution(&self, period: MonthPeriod, top_n: usize) -> Vec<DistributionSlice> {
        let breakdown = self.category_breakdown(period);
        summary::expense_distribution(&breakdown.expense_by_category, top_n)
    }

    fn entries_in(&self, period: MonthPeriod) -> impl Iterator<Item = &TransactionEntry> {
        self.transactions
            .iter()
            .filter(move |t| t.period() == period)
            .map(|t| &t.entry)
    }

    fn flush(&self) -> FinTrackResult<()> {
        self.store.save(&self.transactions)
    }
}
