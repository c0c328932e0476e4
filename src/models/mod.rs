//! Core data models for fintrack
//!
//! Transactions, forecasts, goals and categories, plus the value types they
//! are built from (ids, money, calendar months).

pub mod category;
pub mod dates;
pub mod forecast;
pub mod goal;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use category::Category;
pub use forecast::ForecastTransaction;
pub use goal::{FinancialGoal, GoalKind};
pub use ids::{ForecastId, GoalId, TransactionId};
pub use money::Money;
pub use period::MonthPeriod;
pub use transaction::{
    Transaction, TransactionEntry, TransactionKind, TransactionUpdate, UNCATEGORIZED,
};
