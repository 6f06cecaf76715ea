//! HTTP Handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use agri_advisor::{AdvisorError, AdvisoryResponse, Timeframe};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub llm_connected: bool,
    pub data_source: &'static str,
}

#[derive(Serialize)]
pub struct CropsResponse {
    pub crops: Vec<String>,
    pub timeframes: Vec<String>,
    pub default_region: String,
}

#[derive(Debug, Deserialize)]
pub struct AdvisoryApiRequest {
    pub crop: String,
    #[serde(default)]
    pub timeframe: Option<String>,
    pub query: String,
    #[serde(default)]
    pub refresh: bool,
}

#[derive(Debug, Serialize)]
pub struct AdvisoryApiResponse {
    pub request_id: String,
    #[serde(flatten)]
    pub advisory: AdvisoryResponse,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(err: &AdvisorError) -> ApiError {
    let (status, code) = match err {
        AdvisorError::DataUnavailable(_) => (StatusCode::NOT_FOUND, "DATA_UNAVAILABLE"),
        AdvisorError::InsufficientData { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "INSUFFICIENT_DATA")
        }
        AdvisorError::OpinionUnavailable(_) => (StatusCode::BAD_GATEWAY, "OPINION_UNAVAILABLE"),
        AdvisorError::Config(_) => (StatusCode::BAD_REQUEST, "CONFIG_ERROR"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: code.into(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        llm_connected: state.llm_connected,
        data_source: if state.advisor.has_live_feed() {
            "live"
        } else {
            "synthetic"
        },
    })
}

/// List supported crops and timeframes
pub async fn list_crops(State(state): State<AppState>) -> Json<CropsResponse> {
    Json(CropsResponse {
        crops: state.config.crop_names(),
        timeframes: Timeframe::all().iter().map(|t| t.label().into()).collect(),
        default_region: state.config.default_region.clone(),
    })
}

/// Run one advisory request end-to-end
pub async fn advisory_handler(
    State(state): State<AppState>,
    Json(payload): Json<AdvisoryApiRequest>,
) -> Result<Json<AdvisoryApiResponse>, ApiError> {
    let timeframe = match payload.timeframe.as_deref() {
        Some(raw) => raw.parse::<Timeframe>().map_err(|e| error_response(&e))?,
        None => Timeframe::default(),
    };

    if payload.query.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "query must not be empty".into(),
                code: "CONFIG_ERROR".into(),
            }),
        ));
    }

    let advisory = state
        .advisor
        .advise(&payload.crop, timeframe, &payload.query, payload.refresh)
        .await
        .map_err(|e| {
            tracing::error!("Advisory error: {}", e);
            error_response(&e)
        })?;

    Ok(Json(AdvisoryApiResponse {
        request_id: uuid::Uuid::new_v4().to_string(),
        advisory,
    }))
}
