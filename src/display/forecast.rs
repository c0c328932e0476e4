//! Forecast display formatting
//!
//! Forecast lists, forecast-versus-actual comparisons, category breakdowns
//! and trend projections.

use std::collections::BTreeMap;

use tabled::Tabled;

use crate::models::{ForecastTransaction, MonthPeriod};
use crate::services::{CategoryBreakdown, ForecastComparison, ProjectedPeriod, VarianceLine};

use super::{render_table, signed, signed_pct, truncate};

#[derive(Tabled)]
struct ForecastRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    status: String,
}

pub fn format_forecast_list(forecasts: &[&ForecastTransaction]) -> String {
    if forecasts.is_empty() {
        return "No forecasts found.\n".to_string();
    }

    let rows = forecasts
        .iter()
        .map(|f| ForecastRow {
            id: f.id.to_string(),
            date: f.entry.date.format("%Y-%m-%d").to_string(),
            name: truncate(&f.entry.name, 30),
            kind: f.entry.kind.to_string(),
            category: f.entry.category_label().to_string(),
            amount: f.entry.amount.to_string(),
            status: match f.linked_transaction_id() {
                Some(txn_id) => format!("realized ({})", txn_id),
                None => "pending".to_string(),
            },
        })
        .collect();
    render_table(rows)
}

#[derive(Tabled)]
struct VarianceRow {
    #[tabled(rename = "")]
    label: String,
    #[tabled(rename = "Forecast")]
    forecast: String,
    #[tabled(rename = "Actual")]
    actual: String,
    #[tabled(rename = "Variance")]
    variance: String,
    #[tabled(rename = "%")]
    pct: String,
}

impl VarianceRow {
    fn new(label: &str, line: &VarianceLine) -> Self {
        Self {
            label: label.to_string(),
            forecast: line.forecast.to_string(),
            actual: line.actual.to_string(),
            variance: signed(line.variance),
            pct: signed_pct(line.variance_pct),
        }
    }
}

/// Format a forecast-versus-actual comparison
pub fn format_comparison(comparison: &ForecastComparison) -> String {
    let mut output = format!(
        "Forecast vs Actual: {} {}\n\n",
        comparison.period.month_name(),
        comparison.period.year
    );

    output.push_str(&render_table(vec![
        VarianceRow::new("Income", &comparison.income),
        VarianceRow::new("Expenses", &comparison.expenses),
        VarianceRow::new("Net", &comparison.net),
    ]));

    push_category_section(&mut output, "Income by category", &comparison.income_categories);
    push_category_section(&mut output, "Expenses by category", &comparison.expense_categories);

    output
}

fn push_category_section(output: &mut String, title: &str, lines: &BTreeMap<String, VarianceLine>) {
    if lines.is_empty() {
        return;
    }
    output.push_str(&format!("\n{}:\n", title));
    let rows = lines
        .iter()
        .map(|(name, line)| VarianceRow::new(name, line))
        .collect();
    output.push_str(&render_table(rows));
}

#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format forecast totals per category for a month
pub fn format_forecast_breakdown(period: MonthPeriod, breakdown: &CategoryBreakdown) -> String {
    if breakdown.is_empty() {
        return format!("No forecasts for {}.\n", period);
    }

    let income = breakdown
        .income_by_category
        .iter()
        .map(|(name, amount)| (name, "Income", amount));
    let expense = breakdown
        .expense_by_category
        .iter()
        .map(|(name, amount)| (name, "Expense", amount));

    let rows = income
        .chain(expense)
        .map(|(name, kind, amount)| BreakdownRow {
            category: name.clone(),
            kind,
            amount: amount.to_string(),
        })
        .collect();

    format!("Forecast by category: {}\n{}", period, render_table(rows))
}

#[derive(Tabled)]
struct ProjectionRow {
    #[tabled(rename = "Month")]
    period: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Net")]
    net: String,
}

/// Format a trend projection
pub fn format_projection(anchor: MonthPeriod, projected: &[ProjectedPeriod]) -> String {
    if projected.is_empty() {
        return "Nothing to project.\n".to_string();
    }

    let rows = projected
        .iter()
        .map(|p| ProjectionRow {
            period: p.period.to_string(),
            income: p.income.to_string(),
            expenses: p.expenses.to_string(),
            net: p.net.to_string(),
        })
        .collect();

    format!("Projection from {}\n{}", anchor, render_table(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionEntry, TransactionId, TransactionKind};
    use crate::services::MonthlySummary;
    use chrono::NaiveDate;

    #[test]
    fn test_forecast_list_status() {
        let entry = TransactionEntry::new(
            "Rent",
            Money::from_units(900),
            TransactionKind::Expense,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        );
        let pending = ForecastTransaction::new(entry.clone(), "");
        let mut realized = ForecastTransaction::new(entry, "");
        realized.mark_realized(TransactionId::new());

        let output = format_forecast_list(&[&pending, &realized]);
        assert!(output.contains("pending"));
        assert!(output.contains("realized (txn-"));
    }

    #[test]
    fn test_comparison_output() {
        let period = MonthPeriod::new(2024, 3);
        let mut actual_categories = CategoryBreakdown::default();
        actual_categories
            .expense_by_category
            .insert("Travel".into(), Money::from_units(40));

        let comparison = ForecastComparison::build(
            period,
            &MonthlySummary::new(Money::from_units(1000), Money::zero()),
            &CategoryBreakdown::default(),
            &MonthlySummary::new(Money::from_units(1100), Money::from_units(40)),
            &actual_categories,
        );
        let output = format_comparison(&comparison);

        assert!(output.contains("March 2024"));
        assert!(output.contains("+$100.00"));
        assert!(output.contains("+10.0%"));
        assert!(output.contains("Expenses by category"));
        assert!(output.contains("Travel"));
        assert!(!output.contains("Income by category"));
    }

    #[test]
    fn test_projection_output() {
        let anchor = MonthPeriod::new(2024, 6);
        let projected = vec![ProjectedPeriod {
            period: MonthPeriod::new(2024, 7),
            income: Money::from_units(1600),
            expenses: Money::from_units(600),
            net: Money::from_units(1000),
        }];
        let output = format_projection(anchor, &projected);

        assert!(output.contains("2024-07"));
        assert!(output.contains("$1000.00"));
    }

    #[test]
    fn test_breakdown_empty() {
        let output = format_forecast_breakdown(MonthPeriod::new(2024, 3), &CategoryBreakdown::default());
        assert_eq!(output, "No forecasts for 2024-03.\n");
    }
}
