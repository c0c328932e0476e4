//! Argument parsers shared by the subcommands
//!
//! Used as clap `value_parser`s, so they return `Result<_, String>`.

use chrono::NaiveDate;

use crate::models::dates::parse_iso_date;
use crate::models::{GoalKind, Money, MonthPeriod, TransactionKind};

/// "12.50", "$12.50", "1,200"
pub fn parse_money_arg(s: &str) -> Result<Money, String> {
    Money::parse(s).map_err(|e| e.to_string())
}

/// "income" or "expense"
pub fn parse_kind_arg(s: &str) -> Result<TransactionKind, String> {
    TransactionKind::parse(s).ok_or_else(|| format!("expected 'income' or 'expense', got '{}'", s))
}

/// "income", "expense" or "savings"
pub fn parse_goal_kind_arg(s: &str) -> Result<GoalKind, String> {
    GoalKind::parse(s)
        .ok_or_else(|| format!("expected 'income', 'expense' or 'savings', got '{}'", s))
}

/// ISO date, YYYY-MM-DD
pub fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_iso_date(s.trim()).ok_or_else(|| format!("expected a date like 2024-03-15, got '{}'", s))
}

/// Calendar month, YYYY-MM
pub fn parse_month_arg(s: &str) -> Result<MonthPeriod, String> {
    MonthPeriod::parse(s).map_err(|e| e.to_string())
}

/// The given date, or today
pub fn date_or_today(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| chrono::Local::now().date_naive())
}

/// The given month, or the current one
pub fn month_or_current(month: Option<MonthPeriod>) -> MonthPeriod {
    month.unwrap_or_else(MonthPeriod::current)
}
