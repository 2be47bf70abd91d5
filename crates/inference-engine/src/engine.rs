//! Price Predictor

use crate::artifacts::{load_model, load_scaler, ArtifactPaths};
use crate::model::Regressor;
use crate::scaler::Scaler;
use crate::InferenceError;
use feature_encoder::{
    FeatureEncoder, FeatureRecord, FeatureVector, RawFeatureRecord, FEATURE_DIMENSION,
    FEATURE_NAMES,
};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Result of one prediction
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    /// Predicted price
    pub price: f64,
    /// The encoded row the price was computed from
    pub features: FeatureVector,
    /// Time spent in scale + predict
    #[serde(skip)]
    pub latency: Duration,
}

/// Loaded scaler/model pair, built once and shared read-only
pub struct PricePredictor {
    encoder: FeatureEncoder,
    scaler: Box<dyn Scaler>,
    model: Box<dyn Regressor>,
}

impl std::fmt::Debug for PricePredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PricePredictor")
            .field("scaler_features", &self.scaler.n_features())
            .field("model", &self.model.name())
            .finish()
    }
}

impl PricePredictor {
    /// Pair a scaler with a model, rejecting artifacts fit on another layout
    pub fn new(scaler: Box<dyn Scaler>, model: Box<dyn Regressor>) -> Result<Self, InferenceError> {
        if scaler.n_features() != FEATURE_DIMENSION {
            return Err(InferenceError::SchemaMismatch(format!(
                "scaler was fit on {} features, expected {}",
                scaler.n_features(),
                FEATURE_DIMENSION
            )));
        }

        if let Some(names) = scaler.feature_names() {
            if names.len() != FEATURE_DIMENSION {
                return Err(InferenceError::SchemaMismatch(format!(
                    "scaler records {} column names, expected {}",
                    names.len(),
                    FEATURE_DIMENSION
                )));
            }
            if let Some((idx, (got, want))) = names
                .iter()
                .zip(FEATURE_NAMES)
                .enumerate()
                .find(|(_, (got, want))| got.as_str() != *want)
            {
                return Err(InferenceError::SchemaMismatch(format!(
                    "scaler column {} is {:?}, expected {:?}",
                    idx, got, want
                )));
            }
        }

        match model.n_features() {
            Some(width) if width != FEATURE_DIMENSION => {
                return Err(InferenceError::SchemaMismatch(format!(
                    "{} model takes {} features, expected {}",
                    model.name(),
                    width,
                    FEATURE_DIMENSION
                )));
            }
            _ => {}
        }

        // One dry run so a model with a bad output shape fails here, not on
        // the first request.
        let probe = model
            .predict(&[0.0; FEATURE_DIMENSION])
            .map_err(|e| InferenceError::SchemaMismatch(format!("model probe failed: {}", e)))?;
        if probe.is_empty() {
            return Err(InferenceError::SchemaMismatch(
                "model probe returned no values".to_string(),
            ));
        }

        info!(
            "Predictor ready: {} model over {} features",
            model.name(),
            FEATURE_DIMENSION
        );

        Ok(Self {
            encoder: FeatureEncoder::new(),
            scaler,
            model,
        })
    }

    /// Load both artifacts from disk and validate them
    pub fn load(paths: &ArtifactPaths) -> Result<Self, InferenceError> {
        let scaler = load_scaler(&paths.scaler_path)?;
        let model = load_model(&paths.model_path, FEATURE_DIMENSION)?;
        Self::new(scaler, model)
    }

    /// Name of the loaded model family
    pub fn model_name(&self) -> &'static str {
        self.model.name()
    }

    /// Get the encoder used for records
    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    /// Scale an encoded row and run the model
    pub fn predict_vector(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let scaled = self.scaler.transform(features.as_slice())?;
        let output = self.model.predict(&scaled)?;

        let price = output.first().copied().ok_or_else(|| {
            InferenceError::PredictionError("model returned an empty result".to_string())
        })?;
        if !price.is_finite() {
            return Err(InferenceError::PredictionError(format!(
                "model returned non-finite value {}",
                price
            )));
        }
        Ok(price)
    }

    /// Encode a typed record and predict its price
    pub fn predict(&self, record: &FeatureRecord) -> Result<Prediction, InferenceError> {
        let features = self.encoder.encode_checked(record)?;
        self.finish(features)
    }

    /// Parse, encode and predict a submitted record
    pub fn predict_raw(&self, raw: &RawFeatureRecord) -> Result<Prediction, InferenceError> {
        let features = self.encoder.encode_raw(raw)?;
        self.finish(features)
    }

    fn finish(&self, features: FeatureVector) -> Result<Prediction, InferenceError> {
        let start = Instant::now();
        let price = self.predict_vector(&features)?;
        let latency = start.elapsed();

        debug!("Predicted {:.2} in {}us", price, latency.as_micros());

        Ok(Prediction {
            price,
            features,
            latency,
        })
    }
}
