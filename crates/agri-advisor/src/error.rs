//! Error Types for the Agri Advisor

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdvisorError>;

/// Errors terminal for the current advisory request. There is no retry
/// logic beyond the optional single re-fetch on refresh.
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("No market data available: {0}")]
    DataUnavailable(String),

    #[error("Insufficient price data: need at least {needed} points, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("Advisory unavailable: {0}")]
    OpinionUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
