//! Goal display formatting

use tabled::Tabled;

use crate::models::GoalKind;
use crate::services::{BudgetStatus, GoalProgress};

use super::{render_table, truncate};

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Goal")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
}

fn progress_bar(percentage: f64) -> String {
    let filled = ((percentage / 10.0).round() as usize).min(10);
    format!("[{}{}] {:.0}%", "#".repeat(filled), "-".repeat(10 - filled), percentage)
}

fn status_label(status: BudgetStatus) -> &'static str {
    match status {
        BudgetStatus::UnderBudget => "under budget",
        BudgetStatus::Approaching => "approaching limit",
        BudgetStatus::AtOrOverBudget => "at or over budget",
    }
}

/// Format progress for a month's goals
pub fn format_goal_progress_list(progress: &[GoalProgress]) -> String {
    let rows: Vec<GoalRow> = progress
        .iter()
        .filter_map(|p| {
            let goal = p.goal.as_ref()?;
            Some(GoalRow {
                id: goal.id.to_string(),
                name: truncate(&goal.name, 24),
                kind: goal.kind.to_string(),
                target: goal.target_amount.to_string(),
                current: p.current_amount.to_string(),
                progress: progress_bar(p.percentage),
                remaining: p.remaining.to_string(),
            })
        })
        .collect();

    if rows.is_empty() {
        return "No active goals for this month.\n".to_string();
    }
    render_table(rows)
}

/// Format one goal with its progress
pub fn format_goal_details(progress: &GoalProgress) -> String {
    let Some(goal) = &progress.goal else {
        return "Goal not found.\n".to_string();
    };

    let mut output = String::new();
    output.push_str(&format!("Goal: {}\n", goal.name));
    output.push_str(&format!("  ID:        {}\n", goal.id));
    output.push_str(&format!("  About:     {}\n", goal.description()));
    output.push_str(&format!("  Target:    {}\n", goal.target_amount));
    output.push_str(&format!("  Current:   {}\n", progress.current_amount));
    output.push_str(&format!("  Progress:  {}\n", progress_bar(progress.percentage)));
    output.push_str(&format!("  Remaining: {}\n", progress.remaining));

    if goal.kind == GoalKind::Expense {
        let overage = progress.overage();
        if overage.is_positive() {
            output.push_str(&format!("  Over by:   {}\n", overage));
        }
    }
    if let Some(status) = progress.budget_status() {
        output.push_str(&format!("  Status:    {}\n", status_label(status)));
    }
    if !goal.active {
        output.push_str("  (inactive)\n");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FinancialGoal, Money};

    fn progress(kind: GoalKind, current: i64, percentage: f64) -> GoalProgress {
        let goal = FinancialGoal::new("Food", Money::from_units(500), kind, 2024, 3);
        let current = Money::from_units(current);
        GoalProgress {
            remaining: (goal.target_amount - current).max(Money::zero()),
            goal: Some(goal),
            current_amount: current,
            percentage,
        }
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0), "[----------] 0%");
        assert_eq!(progress_bar(55.0), "[######----] 55%");
        assert_eq!(progress_bar(100.0), "[##########] 100%");
    }

    #[test]
    fn test_details_show_overage_and_status() {
        let output = format_goal_details(&progress(GoalKind::Expense, 800, 100.0));
        assert!(output.contains("Expense budget for March 2024"));
        assert!(output.contains("Over by:   $300.00"));
        assert!(output.contains("at or over budget"));
    }

    #[test]
    fn test_details_missing_goal() {
        let missing = GoalProgress {
            goal: None,
            current_amount: Money::zero(),
            percentage: 0.0,
            remaining: Money::zero(),
        };
        assert_eq!(format_goal_details(&missing), "Goal not found.\n");
    }

    #[test]
    fn test_list_empty() {
        assert!(format_goal_progress_list(&[]).contains("No active goals"));
        let output = format_goal_progress_list(&[progress(GoalKind::Income, 250, 50.0)]);
        assert!(output.contains("Food"));
    }
}
