//! Forecast ledger
//!
//! Stores forecast transactions and links them to the realized transactions
//! that fulfil them.
//!
//! A realized transaction matches a forecast when both fall in the same
//! month, share kind and category, the forecast is still unrealized, and the
//! amounts differ by at most the configured tolerance (a percentage of the
//! forecast's amount). Among candidates the closest amount wins; on a tie the
//! forecast stored first wins.

use crate::config::{MatchingSettings, ProjectionSettings, Settings};
use crate::error::FinTrackResult;
use crate::models::{
    ForecastId, ForecastTransaction, Money, MonthPeriod, Transaction, TransactionEntry,
    TransactionId, TransactionUpdate,
};
use crate::storage::RecordStore;

use super::comparison::ForecastComparison;
use super::ledger::TransactionLedger;
use super::projection::{self, ProjectedPeriod};
use super::summary::{CategoryBreakdown, MonthlySummary};

/// Partial update for a forecast; `None` fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForecastUpdate {
    pub entry: TransactionUpdate,
    pub notes: Option<String>,
}

/// Result of a reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Forecasts newly linked by this pass
    pub matched_count: usize,
    /// Forecasts that were unrealized before the pass started
    pub unrealized_before: usize,
}

/// The set of forecast transactions
pub struct ForecastLedger {
    store: Box<dyn RecordStore<ForecastTransaction>>,
    forecasts: Vec<ForecastTransaction>,
    matching: MatchingSettings,
    projection: ProjectionSettings,
    name_prefix: String,
}

impl ForecastLedger {
    pub fn load(
        store: Box<dyn RecordStore<ForecastTransaction>>,
        settings: &Settings,
    ) -> FinTrackResult<Self> {
        let forecasts = store.load()?;
        Ok(Self {
            store,
            forecasts,
            matching: settings.matching.clone(),
            projection: settings.projection.clone(),
            name_prefix: settings.forecast_name_prefix.clone(),
        })
    }

    // === CRUD ===

    /// Add an unrealized forecast. `None` when the amount is not positive.
    pub fn add(
        &mut self,
        entry: TransactionEntry,
        notes: &str,
    ) -> FinTrackResult<Option<ForecastTransaction>> {
        if !entry.amount.is_positive() {
            return Ok(None);
        }

        let forecast = ForecastTransaction::new(entry, notes);
        self.forecasts.push(forecast.clone());
        self.flush()?;
        Ok(Some(forecast))
    }

    pub fn remove(&mut self, id: ForecastId) -> FinTrackResult<bool> {
        let before = self.forecasts.len();
        self.forecasts.retain(|f| f.id != id);
        if self.forecasts.len() == before {
            return Ok(false);
        }

        self.flush()?;
        Ok(true)
    }

    /// Apply a partial update. Realized forecasts stay realized.
    pub fn update(&mut self, id: ForecastId, update: &ForecastUpdate) -> FinTrackResult<bool> {
        if !update.entry.is_valid() {
            return Ok(false);
        }
        let Some(forecast) = self.forecasts.iter_mut().find(|f| f.id == id) else {
            return Ok(false);
        };

        update.entry.apply_to(&mut forecast.entry);
        if let Some(notes) = &update.notes {
            forecast.notes = notes.clone();
        }
        self.flush()?;
        Ok(true)
    }

    pub fn get(&self, id: ForecastId) -> Option<&ForecastTransaction> {
        self.forecasts.iter().find(|f| f.id == id)
    }

    pub fn all(&self) -> &[ForecastTransaction] {
        &self.forecasts
    }

    pub fn unrealized(&self) -> Vec<&ForecastTransaction> {
        self.forecasts.iter().filter(|f| !f.is_realized()).collect()
    }

    pub fn list_by_month(&self, period: MonthPeriod) -> Vec<&ForecastTransaction> {
        self.forecasts
            .iter()
            .filter(|f| f.period() == period)
            .collect()
    }

    // === Aggregates ===

    pub fn monthly_summary(&self, period: MonthPeriod) -> MonthlySummary {
        MonthlySummary::from_entries(self.entries_in(period))
    }

    pub fn category_breakdown(&self, period: MonthPeriod) -> CategoryBreakdown {
        CategoryBreakdown::from_entries(self.entries_in(period))
    }

    /// Compare this month's forecasts with what the ledger actually recorded
    pub fn compare_with_actual(
        &self,
        ledger: &TransactionLedger,
        period: MonthPeriod,
    ) -> ForecastComparison {
        ForecastComparison::build(
            period,
            &self.monthly_summary(period),
            &self.category_breakdown(period),
            &ledger.monthly_summary(period),
            &ledger.category_breakdown(period),
        )
    }

    /// Trend projection of the ledger's actuals past `anchor`
    pub fn forecast_next_periods(
        &self,
        ledger: &TransactionLedger,
        anchor: MonthPeriod,
        horizon: u32,
    ) -> Vec<ProjectedPeriod> {
        projection::project(ledger, anchor, horizon, &self.projection)
    }

    /// Default number of months for [`Self::forecast_next_periods`]
    pub fn default_horizon(&self) -> u32 {
        self.projection.horizon
    }

    // === Matching ===

    /// The unrealized forecast `txn` fulfils, if any
    pub fn find_match(&self, txn: &Transaction) -> Option<&ForecastTransaction> {
        self.match_index(txn).map(|index| &self.forecasts[index])
    }

    /// Link a forecast to a realized transaction. False if the forecast is unknown.
    pub fn mark_realized(
        &mut self,
        forecast_id: ForecastId,
        transaction_id: TransactionId,
    ) -> FinTrackResult<bool> {
        let Some(forecast) = self.forecasts.iter_mut().find(|f| f.id == forecast_id) else {
            return Ok(false);
        };

        forecast.mark_realized(transaction_id);
        self.flush()?;
        Ok(true)
    }

    /// Same as [`Self::mark_realized`]
    pub fn link_to_actual(
        &mut self,
        forecast_id: ForecastId,
        transaction_id: TransactionId,
    ) -> FinTrackResult<bool> {
        self.mark_realized(forecast_id, transaction_id)
    }

    /// Match each transaction against the unrealized forecasts and link the
    /// hits.
    ///
    /// Transactions already linked to a forecast are skipped, so running the
    /// same input twice matches nothing the second time.
    pub fn reconcile<'a, I>(&mut self, actual: I) -> FinTrackResult<ReconcileOutcome>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let unrealized_before = self.forecasts.iter().filter(|f| !f.is_realized()).count();
        let mut matched_count = 0;

        for txn in actual {
            if self.is_linked(txn.id) {
                continue;
            }
            if let Some(index) = self.match_index(txn) {
                let forecast = &mut self.forecasts[index];
                forecast.mark_realized(txn.id);
                tracing::info!(forecast = %forecast.id, transaction = %txn.id, "forecast realized");
                matched_count += 1;
            }
        }

        if matched_count > 0 {
            self.flush()?;
        }

        Ok(ReconcileOutcome {
            matched_count,
            unrealized_before,
        })
    }

    // === Conversion ===

    /// Store a new unrealized forecast copied from a realized transaction
    pub fn create_from_transaction(&mut self, txn: &Transaction) -> FinTrackResult<ForecastTransaction> {
        let forecast = ForecastTransaction::from_transaction(txn, &self.name_prefix);
        self.forecasts.push(forecast.clone());
        self.flush()?;
        Ok(forecast)
    }

    /// Convert every given transaction into a forecast. Returns how many were created.
    pub fn bulk_convert<'a, I>(&mut self, transactions: I) -> FinTrackResult<usize>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let before = self.forecasts.len();
        for txn in transactions {
            self.forecasts
                .push(ForecastTransaction::from_transaction(txn, &self.name_prefix));
        }

        let created = self.forecasts.len() - before;
        if created > 0 {
            self.flush()?;
        }
        Ok(created)
    }

    fn is_linked(&self, transaction_id: TransactionId) -> bool {
        self.forecasts
            .iter()
            .any(|f| f.linked_transaction_id() == Some(transaction_id))
    }

    fn match_index(&self, txn: &Transaction) -> Option<usize> {
        let period = txn.period();
        let mut best: Option<(usize, Money)> = None;

        for (index, forecast) in self.forecasts.iter().enumerate() {
            if forecast.is_realized()
                || forecast.period() != period
                || forecast.entry.kind != txn.entry.kind
                || forecast.entry.category != txn.entry.category
            {
                continue;
            }

            let diff = (forecast.entry.amount - txn.entry.amount).abs();
            if best.map_or(true, |(_, best_diff)| diff < best_diff) {
                best = Some((index, diff));
            }
        }

        let (index, diff) = best?;
        within_tolerance(diff, self.forecasts[index].entry.amount, self.matching.tolerance_percent)
            .then_some(index)
    }

    fn entries_in(&self, period: MonthPeriod) -> impl Iterator<Item = &TransactionEntry> {
        self.forecasts
            .iter()
            .filter(move |f| f.period() == period)
            .map(|f| &f.entry)
    }

    fn flush(&self) -> FinTrackResult<()> {
        self.store.save(&self.forecasts)
    }
}

/// `diff <= tolerance_percent% of forecast`, in exact integer arithmetic
fn within_tolerance(diff: Money, forecast: Money, tolerance_percent: u32) -> bool {
    i128::from(diff.cents()) * 100 <= i128::from(tolerance_percent) * i128::from(forecast.cents())
}
