//! ONNX Regressor backed by tract

use crate::model::Regressor;
use crate::InferenceError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tract_onnx::prelude::*;

/// Regression graph exported to ONNX, run on one `f32[1, n]` row
pub struct OnnxRegressor {
    plan: TypedRunnableModel<TypedModel>,
    n_features: usize,
    path: PathBuf,
}

impl OnnxRegressor {
    /// Load, optimize and plan the graph with a fixed input width
    pub fn load(path: impl AsRef<Path>, n_features: usize) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        info!("Loading ONNX model from {}", path.display());

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, n_features]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| {
                InferenceError::ModelLoadError(format!("{}: {:#}", path.display(), e))
            })?;

        Ok(Self {
            plan,
            n_features,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Regressor for OnnxRegressor {
    fn name(&self) -> &'static str {
        "onnx"
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.n_features)
    }

    fn predict(&self, row: &[f64]) -> Result<Vec<f64>, InferenceError> {
        if row.len() != self.n_features {
            return Err(InferenceError::PredictionError(format!(
                "model expects {} features, got {}",
                self.n_features,
                row.len()
            )));
        }

        let data: Vec<f32> = row.iter().map(|v| *v as f32).collect();
        let input = Tensor::from_shape(&[1, self.n_features], &data)
            .map_err(|e| InferenceError::PredictionError(format!("{:#}", e)))?;

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| InferenceError::PredictionError(format!("{:#}", e)))?;

        let first = outputs.first().ok_or_else(|| {
            InferenceError::PredictionError("model produced no outputs".to_string())
        })?;
        let view = first
            .to_array_view::<f32>()
            .map_err(|e| InferenceError::PredictionError(format!("{:#}", e)))?;

        debug!("ONNX output shape: {:?}", view.shape());
        Ok(view.iter().map(|v| f64::from(*v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `price = [1, 2, ..., 13] . x + 0.5`
    fn fixture() -> OnnxRegressor {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/linear13.onnx");
        OnnxRegressor::load(path, 13).unwrap()
    }

    #[test]
    fn test_predict_linear_graph() {
        let model = fixture();
        let output = model.predict(&[1.0; 13]).unwrap();
        assert_eq!(output.len(), 1);
        assert!((output[0] - 91.5).abs() < 1e-4);

        let mut row = [0.0; 13];
        row[12] = 2.0;
        assert!((model.predict(&row).unwrap()[0] - 26.5).abs() < 1e-4);
    }

    #[test]
    fn test_wrong_width_is_prediction_error() {
        let err = fixture().predict(&[1.0; 12]).unwrap_err();
        assert!(matches!(err, InferenceError::PredictionError(_)));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let result = OnnxRegressor::load("/nonexistent/model.onnx", 13);
        assert!(matches!(result, Err(InferenceError::ModelLoadError(_))));
    }
}
