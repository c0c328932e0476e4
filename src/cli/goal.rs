//! Goal CLI commands

use clap::Subcommand;

use crate::display::goal::{format_goal_details, format_goal_progress_list};
use crate::error::{FinTrackError, FinTrackResult};
use crate::models::{GoalId, GoalKind, Money, MonthPeriod};
use crate::services::{FinanceTracker, GoalUpdate};

use super::args::{month_or_current, parse_goal_kind_arg, parse_money_arg, parse_month_arg};
use super::{ensure, resolve_id};

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Add a monthly goal
    Add {
        name: String,
        /// Target amount
        #[arg(value_parser = parse_money_arg)]
        amount: Money,
        /// income, expense or savings
        #[arg(short, long, value_parser = parse_goal_kind_arg)]
        kind: GoalKind,
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long, value_parser = parse_month_arg)]
        month: Option<MonthPeriod>,
    },

    /// List active goals for a month with their progress
    List {
        #[arg(short, long, value_parser = parse_month_arg)]
        month: Option<MonthPeriod>,
    },

    /// Show one goal's progress
    Progress {
        /// Goal ID (or unique prefix)
        id: String,
    },

    /// Edit a goal
    Edit {
        /// Goal ID (or unique prefix)
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long, value_parser = parse_money_arg)]
        amount: Option<Money>,
        #[arg(short, long, value_parser = parse_goal_kind_arg)]
        kind: Option<GoalKind>,
        #[arg(short, long, value_parser = parse_month_arg)]
        month: Option<MonthPeriod>,
    },

    /// Stop listing a goal without deleting it
    Deactivate {
        id: String,
    },

    /// Delete a goal
    Remove {
        id: String,
    },
}

fn find_goal(tracker: &FinanceTracker, input: &str) -> FinTrackResult<GoalId> {
    resolve_id(tracker.goals().all().iter().map(|g| g.id), input, "Goal")
}

/// Handle a goal command
pub fn handle_goal_command(tracker: &mut FinanceTracker, cmd: GoalCommands) -> FinTrackResult<()> {
    match cmd {
        GoalCommands::Add {
            name,
            amount,
            kind,
            month,
        } => {
            let goal = tracker
                .goals_mut()
                .add(&name, amount, kind, month_or_current(month))?
                .ok_or_else(|| {
                    FinTrackError::Validation("Target amount must be greater than zero".into())
                })?;
            println!("Added goal: {}", goal.name);
            println!("  {}", goal.description());
            println!("  ID: {}", goal.id);
        }

        GoalCommands::List { month } => {
            let period = month_or_current(month);
            println!("Goals for {} {}", period.month_name(), period.year);
            print!("{}", format_goal_progress_list(&tracker.goal_progress_for_month(period)));
        }

        GoalCommands::Progress { id } => {
            let id = find_goal(tracker, &id)?;
            print!("{}", format_goal_details(&tracker.goal_progress(id)));
        }

        GoalCommands::Edit {
            id,
            name,
            amount,
            kind,
            month,
        } => {
            let id = find_goal(tracker, &id)?;
            let update = GoalUpdate {
                name,
                target_amount: amount,
                kind,
                year: month.map(|m| m.year),
                month: month.map(|m| m.month),
                active: None,
            };
            ensure(tracker.goals_mut().update(id, &update)?, || {
                FinTrackError::Validation("Target amount must be greater than zero".into())
            })?;
            println!("Updated goal {}", id);
        }

        GoalCommands::Deactivate { id } => {
            let id = find_goal(tracker, &id)?;
            ensure(tracker.goals_mut().deactivate(id)?, || {
                FinTrackError::goal_not_found(id.to_string())
            })?;
            println!("Deactivated goal {}", id);
        }

        GoalCommands::Remove { id } => {
            let id = find_goal(tracker, &id)?;
            ensure(tracker.goals_mut().remove(id)?, || {
                FinTrackError::goal_not_found(id.to_string())
            })?;
            println!("Removed goal {}", id);
        }
    }

    Ok(())
}
