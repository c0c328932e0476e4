//! Financial goal model
//!
//! A goal targets one calendar month: earn at least, spend at most, or save
//! at least a given amount.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::money::Money;
use super::period::MonthPeriod;

/// What a goal measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalKind {
    /// Total income for the month
    Income,
    /// Total expenses for the month (a budget ceiling)
    Expense,
    /// Income minus expenses for the month
    Savings,
}

impl GoalKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" | "budget" => Some(Self::Expense),
            "savings" | "saving" => Some(Self::Savings),
            _ => None,
        }
    }
}

impl fmt::Display for GoalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
            Self::Savings => write!(f, "Savings"),
        }
    }
}

/// A monthly financial goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialGoal {
    pub id: GoalId,
    pub name: String,

    #[serde(rename = "amount")]
    pub target_amount: Money,

    #[serde(alias = "goal_type")]
    pub kind: GoalKind,

    pub year: i32,
    pub month: u32,

    /// Inactive goals are kept but no longer listed for their month
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl FinancialGoal {
    /// Create an active goal with a fresh id
    pub fn new(
        name: impl Into<String>,
        target_amount: Money,
        kind: GoalKind,
        year: i32,
        month: u32,
    ) -> Self {
        Self {
            id: GoalId::new(),
            name: name.into(),
            target_amount,
            kind,
            year,
            month,
            active: true,
        }
    }

    pub fn period(&self) -> MonthPeriod {
        MonthPeriod::new(self.year, self.month)
    }

    /// Human-readable description, e.g. "Expense budget for March 2024"
    pub fn description(&self) -> String {
        let label = match self.kind {
            GoalKind::Income => "Income goal",
            GoalKind::Expense => "Expense budget",
            GoalKind::Savings => "Savings target",
        };
        format!(
            "{} for {} {}",
            label,
            self.period().month_name(),
            self.year
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_goal_is_active() {
        let goal = FinancialGoal::new("Rainy day", Money::from_units(300), GoalKind::Savings, 2024, 3);
        assert!(goal.active);
        assert_eq!(goal.period(), MonthPeriod::new(2024, 3));
    }

    #[test]
    fn test_description() {
        let goal = FinancialGoal::new("Food", Money::from_units(400), GoalKind::Expense, 2024, 3);
        assert_eq!(goal.description(), "Expense budget for March 2024");
    }

    #[test]
    fn test_record_layout() {
        let goal = FinancialGoal::new("Earn", Money::from_units(2000), GoalKind::Income, 2024, 7);
        let value = serde_json::to_value(&goal).unwrap();

        assert_eq!(value["amount"], 200000);
        assert_eq!(value["kind"], "income");
        assert_eq!(value["year"], 2024);
        assert_eq!(value["month"], 7);
        assert_eq!(value["active"], true);

        let back: FinancialGoal = serde_json::from_value(value).unwrap();
        assert_eq!(back, goal);
    }

    #[test]
    fn test_active_defaults_true() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "name": "Save",
            "amount": 500.0,
            "goal_type": "savings",
            "year": 2024,
            "month": 2
        }"#;
        let goal: FinancialGoal = serde_json::from_str(json).unwrap();
        assert!(goal.active);
        assert_eq!(goal.kind, GoalKind::Savings);
        assert_eq!(goal.target_amount, Money::from_units(500));
    }
}
