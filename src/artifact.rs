//! Model artifacts and the loader capability.
//!
//! The registry does not care how a backend is produced from an external
//! reference; it only needs something implementing [`ModelLoader`].
//! [`JsonModelLoader`] is the default and reads files shaped like:
//!
//! ```json
//! {
//!   "n_features": 2,
//!   "predict_proba": { "weight": 0.01, "bias": 0.0 },
//!   "predict": { "coefficients": [0.1, 0.2], "intercept": 0.0 }
//! }
//! ```
//!
//! At least one capability block must be present. When both are, the
//! probability distribution wins over the point estimate.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::backend::{sigmoid, PointEstimateModel, ProbabilityModel, ScoringBackend};
use crate::error::PredictError;

/// Builds a backend from an external artifact reference.
pub trait ModelLoader: Send + Sync {
    fn load(&self, source: &Path) -> Result<ScoringBackend, PredictError>;
}

/// Reads JSON artifacts from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonModelLoader;

impl ModelLoader for JsonModelLoader {
    fn load(&self, source: &Path) -> Result<ScoringBackend, PredictError> {
        if !source.exists() {
            return Err(PredictError::ArtifactNotFound {
                path: source.to_path_buf(),
            });
        }
        let corrupt = |reason: String| PredictError::ArtifactCorrupt {
            path: source.to_path_buf(),
            reason,
        };
        let bytes = fs::read(source).map_err(|e| corrupt(e.to_string()))?;
        let artifact: ModelArtifact =
            serde_json::from_slice(&bytes).map_err(|e| corrupt(e.to_string()))?;
        artifact.into_backend().map_err(corrupt)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelArtifact {
    pub n_features: usize,
    #[serde(default)]
    pub predict_proba: Option<ProbaSpec>,
    #[serde(default)]
    pub predict: Option<PointSpec>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbaSpec {
    pub weight: f64,
    #[serde(default)]
    pub bias: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PointSpec {
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

impl ModelArtifact {
    /// Picks the backend variant from the capabilities the artifact exposes.
    pub fn into_backend(self) -> Result<ScoringBackend, String> {
        if self.n_features == 0 {
            return Err("n_features must be at least 1".to_string());
        }
        if let Some(spec) = self.predict_proba {
            if !spec.weight.is_finite() || !spec.bias.is_finite() {
                return Err("predict_proba parameters must be finite".to_string());
            }
            return Ok(ScoringBackend::probabilistic(WeightedSumClassifier {
                n_features: self.n_features,
                weight: spec.weight,
                bias: spec.bias,
            }));
        }
        if let Some(spec) = self.predict {
            if spec.coefficients.len() != self.n_features {
                return Err(format!(
                    "predict has {} coefficients, n_features is {}",
                    spec.coefficients.len(),
                    self.n_features
                ));
            }
            if spec.coefficients.iter().any(|c| !c.is_finite()) || !spec.intercept.is_finite() {
                return Err("predict parameters must be finite".to_string());
            }
            return Ok(ScoringBackend::point_estimate(LinearEstimator {
                coefficients: spec.coefficients,
                intercept: spec.intercept,
            }));
        }
        Err("artifact exposes neither predict_proba nor predict".to_string())
    }
}

/// `p = sigmoid(bias + weight · Σ row)`, returned as `[1 - p, p]`.
#[derive(Debug, Clone, Copy)]
pub struct WeightedSumClassifier {
    n_features: usize,
    weight: f64,
    bias: f64,
}

impl ProbabilityModel for WeightedSumClassifier {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, row: &[f64]) -> [f64; 2] {
        let p = sigmoid(self.bias + row.iter().sum::<f64>() * self.weight);
        [1.0 - p, p]
    }
}

/// `intercept + Σ cᵢ·xᵢ`; the artifact author owns keeping it inside `[0, 1]`.
#[derive(Debug, Clone)]
pub struct LinearEstimator {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl PointEstimateModel for LinearEstimator {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, row: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(row)
            .fold(self.intercept, |acc, (c, x)| acc + c * x)
    }
}
