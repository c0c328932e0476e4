//! Display formatting for terminal output
//!
//! List views are rendered as tables with `tabled`; detail and summary views
//! are plain formatted text.

pub mod category;
pub mod forecast;
pub mod goal;
pub mod report;
pub mod transaction;

pub use category::format_category_list;
pub use forecast::{
    format_comparison, format_forecast_breakdown, format_forecast_list, format_projection,
};
pub use goal::{format_goal_details, format_goal_progress_list};
pub use report::{
    format_cumulative_series, format_distribution, format_monthly_summary, format_year_series,
    format_years,
};
pub use transaction::{format_transaction_details, format_transaction_list};

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Money;

/// Render rows as a table in the shared style
pub(crate) fn render_table<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Money with an explicit sign, e.g. "+$50.00" / "-$20.00"
pub(crate) fn signed(amount: Money) -> String {
    if amount.is_negative() {
        amount.to_string()
    } else {
        format!("+{}", amount)
    }
}

/// Percentage with an explicit sign and one decimal, e.g. "+12.5%"
pub(crate) fn signed_pct(value: f64) -> String {
    format!("{:+.1}%", value)
}

/// Shorten `s` to at most `max` characters, marking the cut with "..."
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
