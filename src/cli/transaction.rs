//! Transaction CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::display::transaction::{format_transaction_details, format_transaction_list};
use crate::error::{FinTrackError, FinTrackResult};
use crate::models::{
    Money, MonthPeriod, Transaction, TransactionEntry, TransactionId, TransactionKind,
    TransactionUpdate,
};
use crate::services::FinanceTracker;

use super::args::{
    date_or_today, month_or_current, parse_date_arg, parse_kind_arg, parse_money_arg,
    parse_month_arg,
};
use super::{ensure, resolve_id};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a transaction (and realize a matching forecast)
    Add {
        /// Description
        name: String,
        /// Amount (e.g., "45.20")
        #[arg(value_parser = parse_money_arg)]
        amount: Money,
        /// income or expense
        #[arg(short, long, default_value = "expense", value_parser = parse_kind_arg)]
        kind: TransactionKind,
        /// Category name
        #[arg(short, long)]
        category: Option<String>,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },

    /// List transactions for a month
    List {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long, value_parser = parse_month_arg)]
        month: Option<MonthPeriod>,
        /// List every transaction instead
        #[arg(long, conflicts_with = "month")]
        all: bool,
    },

    /// Show transaction details
    Show {
        /// Transaction ID (or unique prefix)
        id: String,
    },

    /// Edit a transaction
    Edit {
        /// Transaction ID (or unique prefix)
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long, value_parser = parse_money_arg)]
        amount: Option<Money>,
        #[arg(short, long, value_parser = parse_kind_arg)]
        kind: Option<TransactionKind>,
        #[arg(short, long, conflicts_with = "clear_category")]
        category: Option<String>,
        /// Remove the category
        #[arg(long)]
        clear_category: bool,
        #[arg(short, long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },

    /// Remove a transaction
    Remove {
        /// Transaction ID (or unique prefix)
        id: String,
    },
}

fn find_transaction(tracker: &FinanceTracker, input: &str) -> FinTrackResult<TransactionId> {
    resolve_id(tracker.ledger().all().iter().map(|t| t.id), input, "Transaction")
}

/// Handle a transaction command
pub fn handle_transaction_command(
    tracker: &mut FinanceTracker,
    cmd: TransactionCommands,
) -> FinTrackResult<()> {
    match cmd {
        TransactionCommands::Add {
            name,
            amount,
            kind,
            category,
            date,
        } => {
            let mut entry = TransactionEntry::new(name, amount, kind, date_or_today(date));
            entry.category = category;

            let outcome = tracker.record_transaction(entry)?.ok_or_else(|| {
                FinTrackError::Validation("Amount must be greater than zero".into())
            })?;

            println!("Recorded transaction: {}", outcome.transaction);
            println!("  ID: {}", outcome.transaction.id);
            if let Some(forecast_id) = outcome.matched_forecast {
                println!("  Realized forecast: {}", forecast_id);
            }
        }

        TransactionCommands::List { month, all } => {
            let transactions: Vec<&Transaction> = if all {
                tracker.ledger().all().iter().collect()
            } else {
                tracker.ledger().list_by_month(month_or_current(month))
            };
            print!("{}", format_transaction_list(&transactions));
        }

        TransactionCommands::Show { id } => {
            let id = find_transaction(tracker, &id)?;
            let txn = tracker
                .ledger()
                .get(id)
                .ok_or_else(|| FinTrackError::transaction_not_found(id.to_string()))?;
            print!("{}", format_transaction_details(txn));
        }

        TransactionCommands::Edit {
            id,
            name,
            amount,
            kind,
            category,
            clear_category,
            date,
        } => {
            let id = find_transaction(tracker, &id)?;
            let update = TransactionUpdate {
                name,
                amount,
                kind,
                date,
                category: if clear_category {
                    Some(None)
                } else {
                    category.map(Some)
                },
            };
            if update.is_empty() {
                println!("Nothing to change.");
                return Ok(());
            }

            ensure(tracker.ledger_mut().update(id, &update)?, || {
                FinTrackError::Validation("Amount must be greater than zero".into())
            })?;
            println!("Updated transaction {}", id);
        }

        TransactionCommands::Remove { id } => {
            let id = find_transaction(tracker, &id)?;
            ensure(tracker.ledger_mut().remove(id)?, || {
                FinTrackError::transaction_not_found(id.to_string())
            })?;
            println!("Removed transaction {}", id);
        }
    }

    Ok(())
}
