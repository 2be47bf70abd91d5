//! Fitted Feature Scalers

use crate::InferenceError;
use serde::{Deserialize, Serialize};

/// A transform fit on training data, applied unchanged at inference
pub trait Scaler: Send + Sync {
    /// Number of columns the scaler was fit on
    fn n_features(&self) -> usize;

    /// Column names recorded at fit time, if the artifact carries them
    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    /// Transform one row
    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, InferenceError>;
}

fn check_width(expected: usize, row: &[f64]) -> Result<(), InferenceError> {
    if row.len() != expected {
        return Err(InferenceError::ScalingError(format!(
            "expected {} features, got {}",
            expected,
            row.len()
        )));
    }
    Ok(())
}

fn check_finite(values: Vec<f64>) -> Result<Vec<f64>, InferenceError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(InferenceError::ScalingError(format!(
            "non-finite value at column {}",
            idx
        ))),
        None => Ok(values),
    }
}

/// Standardization: `(x - mean) / scale`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    feature_names: Option<Vec<String>>,
}

impl StandardScaler {
    /// Create a scaler from fitted parameters
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, InferenceError> {
        Self {
            mean,
            scale,
            feature_names: None,
        }
        .validated()
    }

    /// Attach the column names recorded at fit time
    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = Some(names);
        self
    }

    /// Check parameter consistency after deserialization
    pub(crate) fn validated(self) -> Result<Self, InferenceError> {
        if self.mean.len() != self.scale.len() {
            return Err(InferenceError::ModelLoadError(format!(
                "standard scaler has {} means but {} scales",
                self.mean.len(),
                self.scale.len()
            )));
        }
        if self.mean.iter().chain(&self.scale).any(|v| !v.is_finite()) {
            return Err(InferenceError::ModelLoadError(
                "standard scaler parameters must be finite".to_string(),
            ));
        }
        Ok(self)
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }
}

impl Scaler for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, InferenceError> {
        check_width(self.mean.len(), row)?;

        let scaled = row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| {
                // Constant columns are stored with scale 0 and left unscaled
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / scale
            })
            .collect();

        check_finite(scaled)
    }
}

/// Min-max scaling in the fitted form `x * scale + min`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinMaxScaler {
    min: Vec<f64>,
    scale: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    feature_names: Option<Vec<String>>,
}

impl MinMaxScaler {
    /// Create a scaler from fitted parameters
    pub fn new(min: Vec<f64>, scale: Vec<f64>) -> Result<Self, InferenceError> {
        Self {
            min,
            scale,
            feature_names: None,
        }
        .validated()
    }

    pub(crate) fn validated(self) -> Result<Self, InferenceError> {
        if self.min.len() != self.scale.len() {
            return Err(InferenceError::ModelLoadError(format!(
                "min-max scaler has {} offsets but {} scales",
                self.min.len(),
                self.scale.len()
            )));
        }
        if self.min.iter().chain(&self.scale).any(|v| !v.is_finite()) {
            return Err(InferenceError::ModelLoadError(
                "min-max scaler parameters must be finite".to_string(),
            ));
        }
        Ok(self)
    }
}

impl Scaler for MinMaxScaler {
    fn n_features(&self) -> usize {
        self.min.len()
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, InferenceError> {
        check_width(self.min.len(), row)?;

        let scaled = row
            .iter()
            .zip(self.min.iter().zip(&self.scale))
            .map(|(x, (min, scale))| x * scale + min)
            .collect();

        check_finite(scaled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_transform() {
        let scaler = StandardScaler::new(vec![10.0, 0.5], vec![2.0, 0.5]).unwrap();
        let scaled = scaler.transform(&[14.0, 1.0]).unwrap();
        assert!((scaled[0] - 2.0).abs() < 1e-12);
        assert!((scaled[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_scale_passes_through_centered() {
        let scaler = StandardScaler::new(vec![3.0], vec![0.0]).unwrap();
        assert_eq!(scaler.transform(&[5.0]).unwrap(), vec![2.0]);
    }

    #[test]
    fn test_wrong_width_is_scaling_error() {
        let scaler = StandardScaler::new(vec![0.0; 13], vec![1.0; 13]).unwrap();
        let err = scaler.transform(&[1.0; 12]).unwrap_err();
        assert!(matches!(err, InferenceError::ScalingError(_)));
        assert!(err.to_string().contains("expected 13 features, got 12"));
    }

    #[test]
    fn test_mismatched_parameters_rejected() {
        assert!(matches!(
            StandardScaler::new(vec![0.0; 3], vec![1.0; 2]),
            Err(InferenceError::ModelLoadError(_))
        ));
        assert!(MinMaxScaler::new(vec![0.0], vec![f64::NAN]).is_err());
    }

    #[test]
    fn test_min_max_transform() {
        // Fit on [0, 200] -> scale 1/200, min 0
        let scaler = MinMaxScaler::new(vec![0.0, -1.0], vec![0.005, 0.5]).unwrap();
        let scaled = scaler.transform(&[100.0, 4.0]).unwrap();
        assert!((scaled[0] - 0.5).abs() < 1e-12);
        assert!((scaled[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_input_rejected() {
        let scaler = StandardScaler::new(vec![0.0], vec![1.0]).unwrap();
        assert!(matches!(
            scaler.transform(&[f64::INFINITY]),
            Err(InferenceError::ScalingError(_))
        ));
    }
}
