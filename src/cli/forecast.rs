//! Forecast CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::display::forecast::{
    format_comparison, format_forecast_breakdown, format_forecast_list, format_projection,
};
use crate::error::{FinTrackError, FinTrackResult};
use crate::models::{
    ForecastId, ForecastTransaction, Money, MonthPeriod, Transaction, TransactionEntry,
    TransactionKind, TransactionUpdate,
};
use crate::services::{FinanceTracker, ForecastUpdate};

use super::args::{
    date_or_today, month_or_current, parse_date_arg, parse_kind_arg, parse_money_arg,
    parse_month_arg,
};
use super::{ensure, resolve_id};

/// Forecast subcommands
#[derive(Subcommand)]
pub enum ForecastCommands {
    /// Add a forecast
    Add {
        name: String,
        #[arg(value_parser = parse_money_arg)]
        amount: Money,
        #[arg(short, long, default_value = "expense", value_parser = parse_kind_arg)]
        kind: TransactionKind,
        #[arg(short, long)]
        category: Option<String>,
        /// Expected date (YYYY-MM-DD), defaults to today
        #[arg(short, long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// List forecasts for a month
    List {
        #[arg(short, long, value_parser = parse_month_arg)]
        month: Option<MonthPeriod>,
        /// Only forecasts not yet realized, across all months
        #[arg(long, conflicts_with = "month")]
        pending: bool,
    },

    /// Edit a forecast
    Edit {
        /// Forecast ID (or unique prefix)
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long, value_parser = parse_money_arg)]
        amount: Option<Money>,
        #[arg(short, long, value_parser = parse_kind_arg)]
        kind: Option<TransactionKind>,
        #[arg(short, long, conflicts_with = "clear_category")]
        category: Option<String>,
        #[arg(long)]
        clear_category: bool,
        #[arg(short, long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Remove a forecast
    Remove {
        id: String,
    },

    /// Copy transactions into forecasts: one by id, or a whole month
    Convert {
        /// Transaction ID (or unique prefix)
        #[arg(required_unless_present = "month", conflicts_with = "month")]
        transaction: Option<String>,
        /// Convert every transaction of this month (YYYY-MM)
        #[arg(short, long, value_parser = parse_month_arg)]
        month: Option<MonthPeriod>,
    },

    /// Link a forecast to the transaction that realized it
    Link {
        /// Forecast ID (or unique prefix)
        forecast: String,
        /// Transaction ID (or unique prefix)
        transaction: String,
    },

    /// Match a month's transactions against pending forecasts
    Reconcile {
        #[arg(short, long, value_parser = parse_month_arg)]
        month: Option<MonthPeriod>,
    },

    /// Compare a month's forecasts with actual transactions
    Compare {
        #[arg(short, long, value_parser = parse_month_arg)]
        month: Option<MonthPeriod>,
    },

    /// Project income and expenses from recent months
    Project {
        /// Last month of history (YYYY-MM), defaults to the current month
        #[arg(short, long, value_parser = parse_month_arg)]
        month: Option<MonthPeriod>,
        /// Number of months to project
        #[arg(long)]
        horizon: Option<u32>,
    },

    /// Forecast totals per category for a month
    Breakdown {
        #[arg(short, long, value_parser = parse_month_arg)]
        month: Option<MonthPeriod>,
    },
}

fn find_forecast(tracker: &FinanceTracker, input: &str) -> FinTrackResult<ForecastId> {
    resolve_id(tracker.forecasts().all().iter().map(|f| f.id), input, "Forecast")
}

fn find_transaction(tracker: &FinanceTracker, input: &str) -> FinTrackResult<Transaction> {
    let id = resolve_id(tracker.ledger().all().iter().map(|t| t.id), input, "Transaction")?;
    tracker
        .ledger()
        .get(id)
        .cloned()
        .ok_or_else(|| FinTrackError::transaction_not_found(input))
}

/// Handle a forecast command
pub fn handle_forecast_command(
    tracker: &mut FinanceTracker,
    cmd: ForecastCommands,
) -> FinTrackResult<()> {
    match cmd {
        ForecastCommands::Add {
            name,
            amount,
            kind,
            category,
            date,
            notes,
        } => {
            let mut entry = TransactionEntry::new(name, amount, kind, date_or_today(date));
            entry.category = category;

            let forecast = tracker
                .forecasts_mut()
                .add(entry, &notes)?
                .ok_or_else(|| FinTrackError::Validation("Amount must be greater than zero".into()))?;
            println!("Added forecast: {} {}", forecast.entry.name, forecast.entry.amount);
            println!("  ID: {}", forecast.id);
        }

        ForecastCommands::List { month, pending } => {
            let forecasts: Vec<&ForecastTransaction> = if pending {
                tracker.forecasts().unrealized()
            } else {
                tracker.forecasts().list_by_month(month_or_current(month))
            };
            print!("{}", format_forecast_list(&forecasts));
        }

        ForecastCommands::Edit {
            id,
            name,
            amount,
            kind,
            category,
            clear_category,
            date,
            notes,
        } => {
            let id = find_forecast(tracker, &id)?;
            let update = ForecastUpdate {
                entry: TransactionUpdate {
                    name,
                    amount,
                    kind,
                    date,
                    category: if clear_category {
                        Some(None)
                    } else {
                        category.map(Some)
                    },
                },
                notes,
            };
            ensure(tracker.forecasts_mut().update(id, &update)?, || {
                FinTrackError::Validation("Amount must be greater than zero".into())
            })?;
            println!("Updated forecast {}", id);
        }

        ForecastCommands::Remove { id } => {
            let id = find_forecast(tracker, &id)?;
            ensure(tracker.forecasts_mut().remove(id)?, || {
                FinTrackError::forecast_not_found(id.to_string())
            })?;
            println!("Removed forecast {}", id);
        }

        ForecastCommands::Convert { transaction, month } => match (transaction, month) {
            (Some(input), _) => {
                let txn = find_transaction(tracker, &input)?;
                let forecast = tracker.forecasts_mut().create_from_transaction(&txn)?;
                println!("Created forecast: {}", forecast.entry.name);
                println!("  ID: {}", forecast.id);
            }
            (None, Some(period)) => {
                let transactions: Vec<Transaction> = tracker
                    .ledger()
                    .list_by_month(period)
                    .into_iter()
                    .cloned()
                    .collect();
                let created = tracker.forecasts_mut().bulk_convert(&transactions)?;
                println!("Created {} forecast(s) from {}", created, period);
            }
            (None, None) => {
                return Err(FinTrackError::Validation(
                    "Give a transaction ID or --month".into(),
                ));
            }
        },

        ForecastCommands::Link {
            forecast,
            transaction,
        } => {
            let forecast_id = find_forecast(tracker, &forecast)?;
            let txn = find_transaction(tracker, &transaction)?;
            ensure(tracker.forecasts_mut().link_to_actual(forecast_id, txn.id)?, || {
                FinTrackError::forecast_not_found(forecast_id.to_string())
            })?;
            println!("Linked forecast {} to transaction {}", forecast_id, txn.id);
        }

        ForecastCommands::Reconcile { month } => {
            let period = month_or_current(month);
            let outcome = tracker.reconcile_month(period)?;
            println!(
                "Reconciled {}: {} forecast(s) matched, {} were pending",
                period, outcome.matched_count, outcome.unrealized_before
            );
        }

        ForecastCommands::Compare { month } => {
            let comparison = tracker.compare(month_or_current(month));
            print!("{}", format_comparison(&comparison));
        }

        ForecastCommands::Project { month, horizon } => {
            let anchor = month_or_current(month);
            let projected = tracker.project(anchor, horizon);
            print!("{}", format_projection(anchor, &projected));
        }

        ForecastCommands::Breakdown { month } => {
            let period = month_or_current(month);
            let breakdown = tracker.forecasts().category_breakdown(period);
            print!("{}", format_forecast_breakdown(period, &breakdown));
        }
    }

    Ok(())
}
