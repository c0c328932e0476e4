//! Report formatting
//!
//! Monthly and yearly summaries, running totals and expense distribution.

use std::collections::BTreeMap;

use tabled::Tabled;

use crate::models::MonthPeriod;
use crate::services::{CumulativePoint, DistributionSlice, MonthlySummary};

use super::render_table;

pub fn format_monthly_summary(period: MonthPeriod, summary: &MonthlySummary) -> String {
    let mut output = String::new();
    output.push_str(&format!("Summary: {} {}\n", period.month_name(), period.year));
    output.push_str(&format!("  Income:   {:>14}\n", summary.total_income.to_string()));
    output.push_str(&format!("  Expenses: {:>14}\n", summary.total_expenses.to_string()));
    output.push_str(&format!("  Net:      {:>14}\n", summary.net.to_string()));
    output
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: &'static str,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Net")]
    net: String,
}

/// Format a year of monthly summaries, January through December
pub fn format_year_series(year: i32, series: &BTreeMap<u32, MonthlySummary>) -> String {
    let rows = series
        .iter()
        .map(|(month, summary)| MonthRow {
            month: MonthPeriod::new(year, *month).month_name(),
            income: summary.total_income.to_string(),
            expenses: summary.total_expenses.to_string(),
            net: summary.net.to_string(),
        })
        .collect();

    let income = series.values().map(|s| s.total_income).sum();
    let expenses = series.values().map(|s| s.total_expenses).sum();
    let total = MonthlySummary::new(income, expenses);

    format!(
        "Year {}\n{}Total: income {}, expenses {}, net {}\n",
        year,
        render_table(rows),
        total.total_income,
        total.total_expenses,
        total.net
    )
}

#[derive(Tabled)]
struct CumulativeRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Net")]
    net: String,
}

pub fn format_cumulative_series(points: &[CumulativePoint]) -> String {
    if points.is_empty() {
        return "No transactions recorded yet.\n".to_string();
    }

    let rows = points
        .iter()
        .map(|p| CumulativeRow {
            date: p.date.format("%Y-%m-%d").to_string(),
            income: p.cumulative_income.to_string(),
            expenses: p.cumulative_expenses.to_string(),
            net: p.cumulative_net.to_string(),
        })
        .collect();
    render_table(rows)
}

#[derive(Tabled)]
struct SliceRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Share")]
    share: String,
}

pub fn format_distribution(period: MonthPeriod, slices: &[DistributionSlice]) -> String {
    if slices.is_empty() {
        return format!("No expenses in {}.\n", period);
    }

    let rows = slices
        .iter()
        .map(|s| SliceRow {
            category: s.category.clone(),
            amount: s.amount.to_string(),
            share: format!("{:.1}%", s.percentage),
        })
        .collect();

    format!("Expense distribution: {}\n{}", period, render_table(rows))
}

pub fn format_years(years: &[i32]) -> String {
    let listed: Vec<String> = years.iter().map(|y| y.to_string()).collect();
    format!("{}\n", listed.join("\n"))
}
