//! Forecast versus actual comparison
//!
//! Variance is always `actual - forecast`. Percentages are relative to the
//! forecast and are zero when there is nothing forecast to compare against.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Money, MonthPeriod};

use super::summary::{CategoryBreakdown, MonthlySummary};

/// One compared figure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceLine {
    pub forecast: Money,
    pub actual: Money,
    pub variance: Money,
    pub variance_pct: f64,
}

impl VarianceLine {
    /// Compare two amounts; the percentage is 0 when `forecast` is zero
    pub fn new(forecast: Money, actual: Money) -> Self {
        let variance = actual - forecast;
        Self {
            forecast,
            actual,
            variance,
            variance_pct: variance.percent_of(forecast),
        }
    }

    /// Compare net figures, which may be negative. The percentage is taken
    /// against the magnitude of the forecast.
    pub fn net(forecast: Money, actual: Money) -> Self {
        let variance = actual - forecast;
        Self {
            forecast,
            actual,
            variance,
            variance_pct: variance.percent_of(forecast.abs()),
        }
    }

    /// A category that only shows up on the actual side
    pub fn unforecast(actual: Money) -> Self {
        Self {
            forecast: Money::zero(),
            actual,
            variance: actual,
            variance_pct: 100.0,
        }
    }
}

/// Forecast versus actual report for one month
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastComparison {
    pub period: MonthPeriod,
    pub income: VarianceLine,
    pub expenses: VarianceLine,
    pub net: VarianceLine,
    pub income_categories: BTreeMap<String, VarianceLine>,
    pub expense_categories: BTreeMap<String, VarianceLine>,
}

impl ForecastComparison {
    pub fn build(
        period: MonthPeriod,
        forecast: &MonthlySummary,
        forecast_categories: &CategoryBreakdown,
        actual: &MonthlySummary,
        actual_categories: &CategoryBreakdown,
    ) -> Self {
        Self {
            period,
            income: VarianceLine::new(forecast.total_income, actual.total_income),
            expenses: VarianceLine::new(forecast.total_expenses, actual.total_expenses),
            net: VarianceLine::net(forecast.net, actual.net),
            income_categories: compare_categories(
                &forecast_categories.income_by_category,
                &actual_categories.income_by_category,
            ),
            expense_categories: compare_categories(
                &forecast_categories.expense_by_category,
                &actual_categories.expense_by_category,
            ),
        }
    }
}

fn compare_categories(
    forecast: &BTreeMap<String, Money>,
    actual: &BTreeMap<String, Money>,
) -> BTreeMap<String, VarianceLine> {
    let names: BTreeSet<&String> = forecast.keys().chain(actual.keys()).collect();

    names
        .into_iter()
        .map(|name| {
            let actual_amount = actual.get(name).copied().unwrap_or_default();
            let line = match forecast.get(name) {
                Some(&forecast_amount) => VarianceLine::new(forecast_amount, actual_amount),
                None => VarianceLine::unforecast(actual_amount),
            };
            (name.clone(), line)
        })
        .collect()
}
