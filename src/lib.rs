//! fintrack - personal finance tracker
//!
//! Records income and expense transactions, tracks monthly goals, and keeps a
//! ledger of forecast transactions that is reconciled against what actually
//! happened.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory resolution and user settings
//! - `error`: Custom error types
//! - `logging`: Tracing subscriber setup
//! - `models`: Core data models (transactions, forecasts, goals, categories)
//! - `storage`: JSON file storage layer
//! - `services`: Collections and the `FinanceTracker` that ties them together
//! - `display`: Terminal formatting
//! - `cli`: Command definitions and handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::config::{FinTrackPaths, Settings};
//! use fintrack::services::FinanceTracker;
//!
//! let paths = FinTrackPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let tracker = FinanceTracker::open(&paths, settings)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{FinTrackError, FinTrackResult};
