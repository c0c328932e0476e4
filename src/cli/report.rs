//! Report CLI commands

use clap::Subcommand;

use crate::display::report::{
    format_cumulative_series, format_distribution, format_monthly_summary, format_year_series,
    format_years,
};
use crate::error::FinTrackResult;
use crate::models::MonthPeriod;
use crate::services::{FinanceTracker, DEFAULT_DISTRIBUTION_SLICES};

use super::args::{month_or_current, parse_month_arg};

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Income, expenses and net for a month
    Summary {
        #[arg(short, long, value_parser = parse_month_arg)]
        month: Option<MonthPeriod>,
    },

    /// Month-by-month totals for a year
    Year {
        /// Defaults to the current year
        year: Option<i32>,
    },

    /// Running totals over every transaction
    Cumulative,

    /// Years that have transactions
    Years,

    /// Expense share per category for a month
    Distribution {
        #[arg(short, long, value_parser = parse_month_arg)]
        month: Option<MonthPeriod>,
        /// Categories shown before the rest is grouped as "Other"
        #[arg(long, default_value_t = DEFAULT_DISTRIBUTION_SLICES)]
        top: usize,
    },
}

/// Handle a report command
pub fn handle_report_command(tracker: &FinanceTracker, cmd: ReportCommands) -> FinTrackResult<()> {
    let ledger = tracker.ledger();

    match cmd {
        ReportCommands::Summary { month } => {
            let period = month_or_current(month);
            print!("{}", format_monthly_summary(period, &ledger.monthly_summary(period)));
        }

        ReportCommands::Year { year } => {
            let year = year.unwrap_or_else(|| MonthPeriod::current().year);
            print!("{}", format_year_series(year, &ledger.monthly_series(year)));
        }

        ReportCommands::Cumulative => {
            print!("{}", format_cumulative_series(&ledger.cumulative_series()));
        }

        ReportCommands::Years => {
            print!("{}", format_years(&ledger.distinct_years()));
        }

        ReportCommands::Distribution { month, top } => {
            let period = month_or_current(month);
            print!(
                "{}",
                format_distribution(period, &ledger.expense_distribution(period, top))
            );
        }
    }

    Ok(())
}
