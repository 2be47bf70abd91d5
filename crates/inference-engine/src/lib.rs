//! House Price Inference Engine
//!
//! Loads the fitted scaler and regression model once, checks that both match
//! the 13-column feature layout, and runs encode -> scale -> predict.

mod artifacts;
mod engine;
mod model;
mod onnx;
mod scaler;

pub use artifacts::{ArtifactPaths, ModelArtifact, ScalerArtifact};
pub use engine::{Prediction, PricePredictor};
pub use model::{Kernel, LinearRegressor, Regressor, SupportVectorRegressor};
pub use onnx::OnnxRegressor;
pub use scaler::{MinMaxScaler, Scaler, StandardScaler};

use feature_encoder::EncodingError;
use thiserror::Error;

/// Errors during loading or inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Artifact schema mismatch: {0}")]
    SchemaMismatch(String),
    #[error("Invalid input: {0}")]
    EncodingError(#[from] EncodingError),
    #[error("Scaling failed: {0}")]
    ScalingError(String),
    #[error("Prediction failed: {0}")]
    PredictionError(String),
}

impl InferenceError {
    /// Short machine-readable name of the failure
    pub fn kind(&self) -> &'static str {
        match self {
            InferenceError::ModelLoadError(_) => "model_load",
            InferenceError::SchemaMismatch(_) => "schema_mismatch",
            InferenceError::EncodingError(_) => "encoding",
            InferenceError::ScalingError(_) => "scaling",
            InferenceError::PredictionError(_) => "prediction",
        }
    }
}
