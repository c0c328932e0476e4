//! Storage layer for fintrack
//!
//! Each collection is persisted through a [`RecordStore`]. On disk that is a
//! JSON file holding an array of flat records, written atomically.

pub mod file_io;
pub mod store;

pub use file_io::{read_json, write_json_atomic};
pub use store::{JsonFileStore, MemoryStore, RecordStore};

use crate::config::paths::FinTrackPaths;
use crate::error::FinTrackError;
use crate::models::{Category, FinancialGoal, ForecastTransaction, Transaction};

/// File-backed stores for every collection
pub struct Storage {
    paths: FinTrackPaths,
    pub transactions: JsonFileStore<Transaction>,
    pub forecasts: JsonFileStore<ForecastTransaction>,
    pub goals: JsonFileStore<FinancialGoal>,
    pub categories: JsonFileStore<Category>,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: FinTrackPaths) -> Result<Self, FinTrackError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: JsonFileStore::new(paths.transactions_file()),
            forecasts: JsonFileStore::new(paths.forecasts_file()),
            goals: JsonFileStore::new(paths.goals_file()),
            categories: JsonFileStore::new(paths.categories_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &FinTrackPaths {
        &self.paths
    }
}
