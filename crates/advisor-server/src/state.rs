//! Application State

use std::sync::Arc;

use agri_advisor::{Advisor, AdvisorConfig};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Full advisory pipeline (data provider + analyzers + LLM)
    pub advisor: Arc<Advisor>,

    /// Crop profiles and analysis thresholds
    pub config: Arc<AdvisorConfig>,

    /// Whether the LLM backend answered the startup health check
    pub llm_connected: bool,
}
