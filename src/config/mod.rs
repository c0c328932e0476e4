//! Configuration module for fintrack
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence (matching tolerance, projection weights)

pub mod paths;
pub mod settings;

pub use paths::FinTrackPaths;
pub use settings::{MatchingSettings, ProjectionSettings, Settings, WeightNormalization};
