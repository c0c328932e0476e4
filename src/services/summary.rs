//! Aggregations over transaction entries
//!
//! Shared by the transaction ledger and the forecast ledger. Everything here
//! works on [`TransactionEntry`] so realized and forecast data aggregate the
//! same way.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{Money, TransactionEntry, TransactionKind};

/// Income, expenses and net for one month
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthlySummary {
    pub total_income: Money,
    pub total_expenses: Money,
    /// Income minus expenses
    pub net: Money,
}

impl MonthlySummary {
    pub fn new(total_income: Money, total_expenses: Money) -> Self {
        Self {
            total_income,
            total_expenses,
            net: total_income - total_expenses,
        }
    }

    /// Sum a set of entries
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a TransactionEntry>,
    {
        let mut income = Money::zero();
        let mut expenses = Money::zero();
        for entry in entries {
            match entry.kind {
                TransactionKind::Income => income += entry.amount,
                TransactionKind::Expense => expenses += entry.amount,
            }
        }
        Self::new(income, expenses)
    }
}

/// Running totals after one transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CumulativePoint {
    pub date: NaiveDate,
    pub cumulative_income: Money,
    pub cumulative_expenses: Money,
    pub cumulative_net: Money,
}

/// Totals per category name, split by direction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryBreakdown {
    pub income_by_category: BTreeMap<String, Money>,
    pub expense_by_category: BTreeMap<String, Money>,
}

impl CategoryBreakdown {
    /// Group-sum entries by category label
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a TransactionEntry>,
    {
        let mut breakdown = Self::default();
        for entry in entries {
            let bucket = match entry.kind {
                TransactionKind::Income => &mut breakdown.income_by_category,
                TransactionKind::Expense => &mut breakdown.expense_by_category,
            };
            *bucket
                .entry(entry.category_label().to_string())
                .or_insert_with(Money::zero) += entry.amount;
        }
        breakdown
    }

    pub fn is_empty(&self) -> bool {
        self.income_by_category.is_empty() && self.expense_by_category.is_empty()
    }
}

/// One slice of a month's expense distribution
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionSlice {
    pub category: String,
    pub amount: Money,
    /// Share of the month's total expenses
    pub percentage: f64,
}

/// Label for the slice that collects categories beyond the top N
pub const OTHER_SLICE: &str = "Other";

/// Build an expense distribution from per-category totals.
///
/// Slices are sorted by amount, largest first (ties by name). Categories past
/// `top_n` are folded into one [`OTHER_SLICE`].
pub fn expense_distribution(
    expense_by_category: &BTreeMap<String, Money>,
    top_n: usize,
) -> Vec<DistributionSlice> {
    let total: Money = expense_by_category.values().sum();
    if !total.is_positive() {
        return Vec::new();
    }

    let mut ranked: Vec<(&String, Money)> = expense_by_category
        .iter()
        .map(|(name, amount)| (name, *amount))
        .collect();
    // BTreeMap iteration is by name and sort_by is stable, so ties stay alphabetical
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let mut slices: Vec<DistributionSlice> = ranked
        .iter()
        .take(top_n)
        .map(|(name, amount)| DistributionSlice {
            category: (*name).clone(),
            amount: *amount,
            percentage: amount.percent_of(total),
        })
        .collect();

    if ranked.len() > top_n {
        let other: Money = ranked.iter().skip(top_n).map(|(_, amount)| *amount).sum();
        slices.push(DistributionSlice {
            category: OTHER_SLICE.to_string(),
            amount: other,
            percentage: other.percent_of(total),
        });
    }

    slices
}
