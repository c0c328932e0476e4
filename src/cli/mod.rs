//! CLI command handlers
//!
//! Each subcommand group lives in its own module: a clap `Subcommand` enum
//! and a handler that runs it against a [`crate::services::FinanceTracker`].
//! Collections report "not found" and rejected input as `false` / `None`;
//! the handlers turn those into errors so the user gets a message and a
//! non-zero exit status.

pub mod args;
pub mod category;
pub mod forecast;
pub mod goal;
pub mod report;
pub mod transaction;

pub use category::{handle_category_command, CategoryCommands};
pub use forecast::{handle_forecast_command, ForecastCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use crate::error::{FinTrackError, FinTrackResult};
use crate::models::{ForecastId, GoalId, TransactionId};

/// Ids the user may abbreviate on the command line
pub(crate) trait ShortId: Copy {
    fn matches_input(&self, input: &str) -> bool;
}

macro_rules! impl_short_id {
    ($($id:ty),*) => {
        $(impl ShortId for $id {
            fn matches_input(&self, input: &str) -> bool {
                self.matches_prefix(input)
            }
        })*
    };
}

impl_short_id!(TransactionId, ForecastId, GoalId);

/// Resolve user input (full id, display form or unique prefix) to one id
pub(crate) fn resolve_id<Id, I>(ids: I, input: &str, entity_type: &'static str) -> FinTrackResult<Id>
where
    Id: ShortId,
    I: IntoIterator<Item = Id>,
{
    let mut found = ids.into_iter().filter(|id| id.matches_input(input));

    match (found.next(), found.next()) {
        (Some(id), None) => Ok(id),
        (None, _) => Err(FinTrackError::NotFound {
            entity_type,
            identifier: input.to_string(),
        }),
        (Some(_), Some(_)) => Err(FinTrackError::Validation(format!(
            "'{}' matches more than one {}; use more of the id",
            input,
            entity_type.to_lowercase()
        ))),
    }
}

/// Turn a rejected mutation into an error
pub(crate) fn ensure(applied: bool, error: impl FnOnce() -> FinTrackError) -> FinTrackResult<()> {
    if applied {
        Ok(())
    } else {
        Err(error())
    }
}
