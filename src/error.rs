//! Error taxonomy shared by the registry, the backends and the HTTP layer.
//!
//! Startup errors (`ArtifactNotFound`, `ArtifactCorrupt`) abort bootstrap.
//! Request errors (`KeyNotRegistered`, `FeatureMismatch`, `NonFiniteFeature`)
//! are turned into a 500 by the API layer.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    #[error("model artifact not found: {}", .path.display())]
    ArtifactNotFound { path: PathBuf },

    #[error("model artifact {} is corrupt: {reason}", .path.display())]
    ArtifactCorrupt { path: PathBuf, reason: String },

    #[error("model not loaded: {0}")]
    KeyNotRegistered(String),

    #[error("feature vector has {actual} values, backend expects {expected}")]
    FeatureMismatch { expected: usize, actual: usize },

    #[error("feature at index {index} is not a finite number")]
    NonFiniteFeature { index: usize },
}

impl PredictError {
    /// Short, stable label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PredictError::ArtifactNotFound { .. } => "artifact_not_found",
            PredictError::ArtifactCorrupt { .. } => "artifact_corrupt",
            PredictError::KeyNotRegistered(_) => "key_not_registered",
            PredictError::FeatureMismatch { .. } => "feature_mismatch",
            PredictError::NonFiniteFeature { .. } => "non_finite_feature",
        }
    }
}
