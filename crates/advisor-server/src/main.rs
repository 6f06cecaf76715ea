//! agri-advisor HTTP Server
//!
//! Axum-based server exposing the advisory pipeline as a REST API.
//!
//! A live market data feed and the Groq API key are read from the
//! environment; without a feed the server runs on deterministic
//! synthetic market data.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{routing::{get, post}, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use advisor_core::{GenerationOptions, LlmProvider};
use advisor_runtime::GroqProvider;
use agri_advisor::{Advisor, AdvisorConfig};

use crate::handlers::{advisory_handler, health_check, list_crops};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    // Load crop profiles and analysis thresholds
    let config = match std::env::var("ADVISOR_CONFIG") {
        Ok(path) => AdvisorConfig::load(&path)?,
        Err(_) => AdvisorConfig::default(),
    };

    // Initialize LLM provider
    let provider: Arc<dyn LlmProvider> = Arc::new(GroqProvider::from_env()?);

    // Verify Groq connection
    let llm_connected = match provider.health_check().await {
        Ok(true) => {
            tracing::info!("✓ Connected to Groq");
            true
        }
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ Groq not reachable - advisory requests will fail");
            tracing::warn!("  Check GROQ_API_KEY and network access");
            false
        }
    };

    if config.feed.is_some() {
        tracing::info!("✓ Live market data feed configured");
    } else {
        tracing::warn!("⚠ No market data feed configured - using synthetic data");
        tracing::warn!("  Set a feed URL in the config file to use live data");
    }

    let advisor = Advisor::new(&config, provider, GenerationOptions::default())?;

    // Build application state
    let state = AppState {
        advisor: Arc::new(advisor),
        config: Arc::new(config),
        llm_connected,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health & info
        .route("/health", get(health_check))
        .route("/api/crops", get(list_crops))

        // Advisory API
        .route("/api/advisory", post(advisory_handler))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🌾 agri-advisor server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health        - Health check");
    tracing::info!("  GET  /api/crops     - Supported crops and timeframes");
    tracing::info!("  POST /api/advisory  - Run an advisory request");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
