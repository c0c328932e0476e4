//! User settings for fintrack
//!
//! Tunables for forecast matching and trend projection, persisted as
//! `config.json` in the base directory. Every field has a default so older or
//! partial files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::FinTrackPaths;
use crate::error::FinTrackError;

/// Settings for matching realized transactions to forecasts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingSettings {
    /// Accepted distance between a transaction and a forecast, as a percentage
    /// of the forecast's amount
    pub tolerance_percent: u32,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            tolerance_percent: 10,
        }
    }
}

/// How the weighted month-over-month delta is normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeightNormalization {
    /// Divide by the sum of the weights actually applied
    #[default]
    WeightSum,
    /// Divide by `(n - 1) + min(recent_transitions, n - 1)`
    Legacy,
}

/// Settings for trend projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionSettings {
    /// Number of trailing months (anchor included) used as history
    pub history_months: u32,
    /// Default number of months projected forward
    pub horizon: u32,
    /// Number of most recent month-over-month transitions that get `recent_weight`
    pub recent_transitions: u32,
    pub recent_weight: f64,
    pub older_weight: f64,
    pub normalization: WeightNormalization,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            history_months: 6,
            horizon: 6,
            recent_transitions: 3,
            recent_weight: 2.0,
            older_weight: 1.0,
            normalization: WeightNormalization::WeightSum,
        }
    }
}

/// User settings for fintrack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub matching: MatchingSettings,

    #[serde(default)]
    pub projection: ProjectionSettings,

    /// Prefix given to forecasts derived from realized transactions
    #[serde(default = "default_forecast_prefix")]
    pub forecast_name_prefix: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_forecast_prefix() -> String {
    "[Forecast] ".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            matching: MatchingSettings::default(),
            projection: ProjectionSettings::default(),
            forecast_name_prefix: default_forecast_prefix(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FinTrackPaths) -> Result<Self, FinTrackError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                FinTrackError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinTrackError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinTrackPaths) -> Result<(), FinTrackError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            FinTrackError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            FinTrackError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
