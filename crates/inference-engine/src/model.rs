//! Regression Models

use crate::InferenceError;
use serde::{Deserialize, Serialize};

/// A fitted regression function over one scaled row
pub trait Regressor: Send + Sync {
    /// Short model family name, for logs and health output
    fn name(&self) -> &'static str;

    /// Input width, when the model can tell without running
    fn n_features(&self) -> Option<usize>;

    /// Predict for one row; a well-formed model returns one value
    fn predict(&self, row: &[f64]) -> Result<Vec<f64>, InferenceError>;
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn check_width(expected: usize, row: &[f64]) -> Result<(), InferenceError> {
    if row.len() != expected {
        return Err(InferenceError::PredictionError(format!(
            "model expects {} features, got {}",
            expected,
            row.len()
        )));
    }
    Ok(())
}

/// `y = w . x + b`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegressor {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearRegressor {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, InferenceError> {
        Self {
            coefficients,
            intercept,
        }
        .validated()
    }

    pub(crate) fn validated(self) -> Result<Self, InferenceError> {
        if self.coefficients.is_empty() {
            return Err(InferenceError::ModelLoadError(
                "linear model has no coefficients".to_string(),
            ));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(InferenceError::ModelLoadError(
                "linear model parameters must be finite".to_string(),
            ));
        }
        Ok(self)
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Regressor for LinearRegressor {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.coefficients.len())
    }

    fn predict(&self, row: &[f64]) -> Result<Vec<f64>, InferenceError> {
        check_width(self.coefficients.len(), row)?;
        Ok(vec![dot(&self.coefficients, row) + self.intercept])
    }
}

/// SVM kernel function
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Kernel {
    /// `<a, b>`
    Linear,
    /// `exp(-gamma * |a - b|^2)`
    Rbf { gamma: f64 },
    /// `(gamma * <a, b> + coef0)^degree`
    Poly { gamma: f64, coef0: f64, degree: u32 },
    /// `tanh(gamma * <a, b> + coef0)`
    Sigmoid { gamma: f64, coef0: f64 },
}

impl Kernel {
    /// Evaluate the kernel for two rows of equal width
    pub fn evaluate(&self, a: &[f64], b: &[f64]) -> f64 {
        match *self {
            Kernel::Linear => dot(a, b),
            Kernel::Rbf { gamma } => {
                let squared: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
                (-gamma * squared).exp()
            }
            Kernel::Poly {
                gamma,
                coef0,
                degree,
            } => match i32::try_from(degree) {
                Ok(degree) => (gamma * dot(a, b) + coef0).powi(degree),
                Err(_) => f64::NAN,
            },
            Kernel::Sigmoid { gamma, coef0 } => (gamma * dot(a, b) + coef0).tanh(),
        }
    }
}

/// Epsilon-SVR decision function: `sum(dual_coef_i * K(sv_i, x)) + intercept`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportVectorRegressor {
    kernel: Kernel,
    support_vectors: Vec<Vec<f64>>,
    dual_coef: Vec<f64>,
    intercept: f64,
}

impl SupportVectorRegressor {
    pub fn new(
        kernel: Kernel,
        support_vectors: Vec<Vec<f64>>,
        dual_coef: Vec<f64>,
        intercept: f64,
    ) -> Result<Self, InferenceError> {
        Self {
            kernel,
            support_vectors,
            dual_coef,
            intercept,
        }
        .validated()
    }

    pub(crate) fn validated(self) -> Result<Self, InferenceError> {
        let Some(first) = self.support_vectors.first() else {
            return Err(InferenceError::ModelLoadError(
                "SVR has no support vectors".to_string(),
            ));
        };
        let width = first.len();
        if let Some(idx) = self.support_vectors.iter().position(|sv| sv.len() != width) {
            return Err(InferenceError::ModelLoadError(format!(
                "support vector {} has {} features, expected {}",
                idx,
                self.support_vectors[idx].len(),
                width
            )));
        }
        if self.dual_coef.len() != self.support_vectors.len() {
            return Err(InferenceError::ModelLoadError(format!(
                "SVR has {} dual coefficients for {} support vectors",
                self.dual_coef.len(),
                self.support_vectors.len()
            )));
        }
        if let Kernel::Poly { degree, .. } = self.kernel {
            if i32::try_from(degree).is_err() {
                return Err(InferenceError::ModelLoadError(format!(
                    "polynomial degree {} is too large",
                    degree
                )));
            }
        }
        Ok(self)
    }

    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    pub fn support_vector_count(&self) -> usize {
        self.support_vectors.len()
    }
}

impl Regressor for SupportVectorRegressor {
    fn name(&self) -> &'static str {
        "svr"
    }

    fn n_features(&self) -> Option<usize> {
        self.support_vectors.first().map(Vec::len)
    }

    fn predict(&self, row: &[f64]) -> Result<Vec<f64>, InferenceError> {
        if let Some(width) = self.n_features() {
            check_width(width, row)?;
        }

        let decision = self
            .support_vectors
            .iter()
            .zip(&self.dual_coef)
            .map(|(sv, coef)| coef * self.kernel.evaluate(sv, row))
            .sum::<f64>()
            + self.intercept;

        Ok(vec![decision])
    }
}
