//! Artifact Loading
//!
//! Scalers and JSON models are stored as their fitted parameters, tagged by
//! `"kind"`. Files ending in `.onnx` are loaded as ONNX graphs instead.

use crate::model::{LinearRegressor, Regressor, SupportVectorRegressor};
use crate::onnx::OnnxRegressor;
use crate::scaler::{MinMaxScaler, Scaler, StandardScaler};
use crate::InferenceError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Where the two artifacts live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactPaths {
    pub scaler_path: PathBuf,
    pub model_path: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            scaler_path: PathBuf::from("artifacts/scaler.json"),
            model_path: PathBuf::from("artifacts/model.json"),
        }
    }
}

/// Serialized scaler parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerArtifact {
    Standard(StandardScaler),
    MinMax(MinMaxScaler),
}

impl ScalerArtifact {
    pub fn from_json(json: &str) -> Result<Self, InferenceError> {
        serde_json::from_str(json)
            .map_err(|e| InferenceError::ModelLoadError(format!("invalid scaler artifact: {}", e)))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, InferenceError> {
        Self::from_json(&read_artifact(path.as_ref())?)
    }

    /// Check the parameters and box the scaler
    pub fn into_scaler(self) -> Result<Box<dyn Scaler>, InferenceError> {
        Ok(match self {
            ScalerArtifact::Standard(scaler) => Box::new(scaler.validated()?),
            ScalerArtifact::MinMax(scaler) => Box::new(scaler.validated()?),
        })
    }
}

/// Serialized regression model parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearRegressor),
    Svr(SupportVectorRegressor),
}

impl ModelArtifact {
    pub fn from_json(json: &str) -> Result<Self, InferenceError> {
        serde_json::from_str(json)
            .map_err(|e| InferenceError::ModelLoadError(format!("invalid model artifact: {}", e)))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, InferenceError> {
        Self::from_json(&read_artifact(path.as_ref())?)
    }

    /// Check the parameters and box the model
    pub fn into_regressor(self) -> Result<Box<dyn Regressor>, InferenceError> {
        Ok(match self {
            ModelArtifact::Linear(model) => Box::new(model.validated()?),
            ModelArtifact::Svr(model) => Box::new(model.validated()?),
        })
    }
}

fn read_artifact(path: &Path) -> Result<String, InferenceError> {
    std::fs::read_to_string(path)
        .map_err(|e| InferenceError::ModelLoadError(format!("{}: {}", path.display(), e)))
}

/// Load a scaler from a JSON artifact
pub(crate) fn load_scaler(path: &Path) -> Result<Box<dyn Scaler>, InferenceError> {
    info!("Loading scaler from {}", path.display());
    ScalerArtifact::load(path)?.into_scaler()
}

/// Load a model, choosing the format by file extension
pub(crate) fn load_model(
    path: &Path,
    n_features: usize,
) -> Result<Box<dyn Regressor>, InferenceError> {
    let is_onnx = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("onnx"));

    if is_onnx {
        return Ok(Box::new(OnnxRegressor::load(path, n_features)?));
    }

    info!("Loading model from {}", path.display());
    ModelArtifact::load(path)?.into_regressor()
}
