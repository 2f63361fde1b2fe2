//! # Airsense
//!
//! Local air-quality and asthma risk assistant.
//!
//! This crate provides:
//! - AQI category lookup over compiled-in city readings
//! - Two rule-based asthma risk classifiers
//! - A rolling history of logged AQI values for the trend chart
//! - Recommendations from the last persisted reading
//! - Terminal UI for local-only use
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types and rules (categories, classifiers, history)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (SQLite, log sanitizing)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{categorize, AqiCategory, RiskAssessment, RiskTier};

/// Result type for Airsense operations
pub type Result<T> = std::result::Result<T, AirsenseError>;

/// Main error type for Airsense
#[derive(Debug, thiserror::Error)]
pub enum AirsenseError {
    #[error("Storage operation failed: {0}")]
    Storage(#[from] adapters::StorageError),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
