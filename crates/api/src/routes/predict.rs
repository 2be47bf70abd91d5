//! Prediction Routes

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use feature_encoder::{FeatureVector, RawFeatureRecord};
use inference_engine::Prediction;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::format::format_currency;
use crate::AppState;

/// Response for the prediction endpoint
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub price: f64,
    pub formatted: String,
    pub features: FeatureVector,
    pub latency_us: u64,
}

/// Count and log a request that produced no price
pub(crate) fn record_failure(error: &ApiError) {
    metrics::counter!("prediction_failures_total", "kind" => error.kind()).increment(1);
    warn!("Prediction error: {}", error);
}

/// Run one prediction and record its metrics
pub(crate) fn run_prediction(
    state: &AppState,
    raw: &RawFeatureRecord,
) -> Result<Prediction, ApiError> {
    let result = state
        .predictor()
        .and_then(|predictor| predictor.predict_raw(raw).map_err(ApiError::from));

    match &result {
        Ok(prediction) => {
            metrics::counter!("predictions_total").increment(1);
            metrics::histogram!("prediction_latency_seconds")
                .record(prediction.latency.as_secs_f64());
            debug!("Prediction succeeded: {:.2}", prediction.price);
        }
        Err(e) => record_failure(e),
    }

    result
}

/// Predict a price from a JSON record
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RawFeatureRecord>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let Json(raw) = body.map_err(|rejection| {
        let error = ApiError::InvalidBody(rejection.body_text());
        record_failure(&error);
        error
    })?;

    let prediction = run_prediction(&state, &raw)?;

    Ok(Json(PredictionResponse {
        price: prediction.price,
        formatted: format_currency(&state.display.currency_symbol, prediction.price),
        latency_us: prediction.latency.as_micros() as u64,
        features: prediction.features,
    }))
}
