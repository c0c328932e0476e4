//! Service layer for fintrack
//!
//! In-memory collections over record stores, the aggregations computed from
//! them, and the tracker that ties them together.

pub mod category;
pub mod comparison;
pub mod forecast;
pub mod goal;
pub mod ledger;
pub mod projection;
pub mod summary;
pub mod tracker;

pub use category::CategoryRegistry;
pub use comparison::{ForecastComparison, VarianceLine};
pub use forecast::{ForecastLedger, ForecastUpdate, ReconcileOutcome};
pub use goal::{BudgetStatus, GoalProgress, GoalTracker, GoalUpdate};
pub use ledger::{TransactionLedger, DEFAULT_DISTRIBUTION_SLICES};
pub use projection::ProjectedPeriod;
pub use summary::{CategoryBreakdown, CumulativePoint, DistributionSlice, MonthlySummary};
pub use tracker::{FinanceTracker, RecordOutcome, TrackerStores};
