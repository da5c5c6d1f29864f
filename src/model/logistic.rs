use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::Classifier;
use crate::predict::{PredictError, FEATURE_COUNT};

/// Binary logistic-regression classifier exported to JSON.
///
/// `classes` mirrors the training labels and must be `[0, 1]` so that index 1
/// of [`Classifier::predict_proba`] is "team 1 wins".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_classes")]
    pub classes: Vec<i64>,
}

fn default_classes() -> Vec<i64> {
    vec![0, 1]
}

impl LogisticModel {
    #[cfg(test)]
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        LogisticModel {
            coefficients,
            intercept,
            classes: default_classes(),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read model file {}", path.display()))?;
        let model: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse model file {}", path.display()))?;
        model
            .validate(FEATURE_COUNT)
            .with_context(|| format!("Invalid model in {}", path.display()))?;
        Ok(model)
    }

    pub fn validate(&self, expected: usize) -> Result<()> {
        if self.coefficients.len() != expected {
            anyhow::bail!(
                "model has {} coefficients, feature vector has {}",
                self.coefficients.len(),
                expected
            );
        }
        if self.classes != [0, 1] {
            anyhow::bail!("model classes must be [0, 1], got {:?}", self.classes);
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            anyhow::bail!("model has non-finite parameters");
        }
        Ok(())
    }

    /// Linear predictor `w·x + b` before the logistic link.
    pub fn decision_function(&self, features: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>()
    }
}

/// Logistic link, split on sign so neither branch overflows `exp`.
fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

impl Classifier for LogisticModel {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], PredictError> {
        if features.len() != self.n_features() {
            return Err(PredictError::DimensionMismatch {
                stage: "model",
                expected: self.n_features(),
                got: features.len(),
            });
        }
        let p = sigmoid(self.decision_function(features));
        if !p.is_finite() {
            return Err(PredictError::NonFinite("model probability"));
        }
        Ok([1.0 - p, p])
    }
}
