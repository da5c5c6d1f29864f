use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::predict::{PredictError, FEATURE_COUNT};

/// Per-feature standardisation: `(x - mean) / scale`.
///
/// JSON export of a fitted standard scaler. `scale` is the per-feature
/// standard deviation; zero-variance features are expected to have been
/// exported with a scale of 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
    #[serde(default)]
    pub n_features_in: Option<usize>,
}

impl StandardScaler {
    /// Mean 0, scale 1 for every feature.
    #[cfg(test)]
    pub fn identity(n: usize) -> Self {
        StandardScaler {
            mean: vec![0.0; n],
            scale: vec![1.0; n],
            n_features_in: Some(n),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scaler file {}", path.display()))?;
        let scaler: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse scaler file {}", path.display()))?;
        scaler
            .validate(FEATURE_COUNT)
            .with_context(|| format!("Invalid scaler in {}", path.display()))?;
        Ok(scaler)
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub fn validate(&self, expected: usize) -> Result<()> {
        let declared = self.n_features_in.unwrap_or(self.mean.len());
        if declared != expected || self.mean.len() != expected || self.scale.len() != expected {
            anyhow::bail!(
                "scaler expects {} features (mean={}, scale={}), feature vector has {}",
                declared,
                self.mean.len(),
                self.scale.len(),
                expected
            );
        }
        if let Some(i) = self.scale.iter().position(|s| !s.is_finite() || *s == 0.0) {
            anyhow::bail!("scaler has unusable scale {} for feature {}", self.scale[i], i);
        }
        if self.mean.iter().any(|m| !m.is_finite()) {
            anyhow::bail!("scaler has a non-finite mean");
        }
        Ok(())
    }

    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>, PredictError> {
        if features.len() != self.n_features() {
            return Err(PredictError::DimensionMismatch {
                stage: "scaler",
                expected: self.n_features(),
                got: features.len(),
            });
        }
        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| (x - m) / s)
            .collect())
    }
}
