//! Health, Schema and Metrics Routes

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use feature_encoder::{Answer, FurnishingStatus, FEATURE_NAMES};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub model_loaded: bool,
    pub model: Option<&'static str>,
    pub load_error: Option<String>,
}

/// Feature layout response
#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub features: Vec<&'static str>,
    pub answers: Vec<&'static str>,
    pub furnishing: Vec<&'static str>,
}

/// Health check handler
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let model = state.predictor().ok().map(|p| p.model_name());

    Json(HealthResponse {
        status: if model.is_some() { "healthy" } else { "degraded" },
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model_loaded: model.is_some(),
        model,
        load_error: state.load_error().map(str::to_string),
    })
}

/// Column order and categorical labels
pub async fn schema() -> Json<SchemaResponse> {
    Json(SchemaResponse {
        features: FEATURE_NAMES.to_vec(),
        answers: Answer::LABELS.to_vec(),
        furnishing: FurnishingStatus::ALL.iter().map(|s| s.label()).collect(),
    })
}

/// Prometheus exposition
pub async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::NOT_FOUND, "metrics disabled").into_response(),
    }
}
