//! Finance tracker
//!
//! Owns every collection and wires them together. Recording a transaction
//! goes through here so it can realize a matching forecast straight away.
//!
//! Operations that touch more than one collection always take the ledger
//! first and the forecasts second.

use crate::config::{FinTrackPaths, Settings};
use crate::error::FinTrackResult;
use crate::models::{
    Category, FinancialGoal, ForecastId, ForecastTransaction, GoalId, MonthPeriod, Transaction,
    TransactionEntry,
};
use crate::storage::{RecordStore, Storage};

use super::category::CategoryRegistry;
use super::comparison::ForecastComparison;
use super::forecast::{ForecastLedger, ReconcileOutcome};
use super::goal::{GoalProgress, GoalTracker};
use super::ledger::TransactionLedger;
use super::projection::ProjectedPeriod;

/// The four backing stores a tracker is built from
pub struct TrackerStores {
    pub transactions: Box<dyn RecordStore<Transaction>>,
    pub forecasts: Box<dyn RecordStore<ForecastTransaction>>,
    pub goals: Box<dyn RecordStore<FinancialGoal>>,
    pub categories: Box<dyn RecordStore<Category>>,
}

impl From<Storage> for TrackerStores {
    fn from(storage: Storage) -> Self {
        Self {
            transactions: Box::new(storage.transactions),
            forecasts: Box::new(storage.forecasts),
            goals: Box::new(storage.goals),
            categories: Box::new(storage.categories),
        }
    }
}

/// What happened when a transaction was recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    pub transaction: Transaction,
    /// The forecast this transaction realized, if one matched
    pub matched_forecast: Option<ForecastId>,
}

/// Entry point to the ledger, forecasts, goals and categories
pub struct FinanceTracker {
    settings: Settings,
    categories: CategoryRegistry,
    ledger: TransactionLedger,
    goals: GoalTracker,
    forecasts: ForecastLedger,
}

impl FinanceTracker {
    /// Open the JSON files under `paths`, creating directories as needed
    pub fn open(paths: &FinTrackPaths, settings: Settings) -> FinTrackResult<Self> {
        let storage = Storage::new(paths.clone())?;
        Self::with_stores(settings, storage.into())
    }

    pub fn with_stores(settings: Settings, stores: TrackerStores) -> FinTrackResult<Self> {
        let categories = CategoryRegistry::load(stores.categories)?;
        let ledger = TransactionLedger::load(stores.transactions)?;
        let goals = GoalTracker::load(stores.goals)?;
        let forecasts = ForecastLedger::load(stores.forecasts, &settings)?;

        tracing::debug!(
            transactions = ledger.len(),
            forecasts = forecasts.all().len(),
            goals = goals.all().len(),
            categories = categories.all().len(),
            "tracker opened"
        );

        Ok(Self {
            settings,
            categories,
            ledger,
            goals,
            forecasts,
        })
    }

    /// Add a realized transaction and realize the forecast it fulfils.
    ///
    /// Returns `None` if the ledger rejected the entry.
    pub fn record_transaction(
        &mut self,
        entry: TransactionEntry,
    ) -> FinTrackResult<Option<RecordOutcome>> {
        let Some(transaction) = self.ledger.add(entry)? else {
            return Ok(None);
        };

        let matched_forecast = self.forecasts.find_match(&transaction).map(|f| f.id);
        if let Some(forecast_id) = matched_forecast {
            self.forecasts.mark_realized(forecast_id, transaction.id)?;
            tracing::info!(
                forecast = %forecast_id,
                transaction = %transaction.id,
                "recorded transaction realized a forecast"
            );
        }

        Ok(Some(RecordOutcome {
            transaction,
            matched_forecast,
        }))
    }

    /// Reconcile one month's ledger transactions against the forecasts
    pub fn reconcile_month(&mut self, period: MonthPeriod) -> FinTrackResult<ReconcileOutcome> {
        let actual = self.ledger.list_by_month(period);
        self.forecasts.reconcile(actual)
    }

    pub fn compare(&self, period: MonthPeriod) -> ForecastComparison {
        self.forecasts.compare_with_actual(&self.ledger, period)
    }

    /// Projection past `anchor`; `horizon` falls back to the configured default
    pub fn project(&self, anchor: MonthPeriod, horizon: Option<u32>) -> Vec<ProjectedPeriod> {
        let horizon = horizon.unwrap_or_else(|| self.forecasts.default_horizon());
        self.forecasts
            .forecast_next_periods(&self.ledger, anchor, horizon)
    }

    pub fn goal_progress(&self, id: GoalId) -> GoalProgress {
        self.goals.progress(id, &self.ledger)
    }

    pub fn goal_progress_for_month(&self, period: MonthPeriod) -> Vec<GoalProgress> {
        self.goals.progress_for_month(period, &self.ledger)
    }

    // === Accessors ===

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    pub fn categories_mut(&mut self) -> &mut CategoryRegistry {
        &mut self.categories
    }

    pub fn ledger(&self) -> &TransactionLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut TransactionLedger {
        &mut self.ledger
    }

    pub fn goals(&self) -> &GoalTracker {
        &self.goals
    }

    pub fn goals_mut(&mut self) -> &mut GoalTracker {
        &mut self.goals
    }

    pub fn forecasts(&self) -> &ForecastLedger {
        &self.forecasts
    }

    pub fn forecasts_mut(&mut self) -> &mut ForecastLedger {
        &mut self.forecasts
    }
}
