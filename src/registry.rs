//! # Model registry
//!
//! Maps a model key to a [`ScoringBackend`]. Populated once during startup
//! through `&mut self` methods, then frozen behind an `Arc` and only read.
//! There is no unregister: a key, once bound, stays bound for the life of
//! the process (a second `register` just replaces the backend).

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::artifact::{JsonModelLoader, ModelLoader};
use crate::backend::ScoringBackend;
use crate::error::PredictError;

/// Registry-level decision boundary for the binary label.
pub const LABEL_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub probability: f64,
    pub label: bool,
}

impl PredictionResult {
    pub fn from_probability(probability: f64) -> Self {
        Self {
            probability,
            label: probability >= LABEL_THRESHOLD,
        }
    }
}

#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: HashMap<String, ScoringBackend>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `backend`. Last write wins.
    pub fn register(&mut self, key: impl Into<String>, backend: ScoringBackend) {
        let key = key.into();
        if self.models.insert(key.clone(), backend).is_some() {
            warn!(model = %key, "model re-registered; previous backend replaced");
        }
    }

    /// Load an artifact with the default JSON loader and bind it to `key`.
    pub fn load(&mut self, key: &str, source: &Path) -> Result<(), PredictError> {
        self.load_with(key, source, &JsonModelLoader)
    }

    /// Load an artifact with an explicit loader and bind it to `key`.
    pub fn load_with(
        &mut self,
        key: &str,
        source: &Path,
        loader: &dyn ModelLoader,
    ) -> Result<(), PredictError> {
        let backend = loader.load(source)?;
        info!(
            model = key,
            kind = backend.kind(),
            source = %source.display(),
            "loaded model"
        );
        self.register(key, backend);
        Ok(())
    }

    /// Score `features` with the backend bound to `key`.
    pub fn predict(&self, key: &str, features: &[f64]) -> Result<PredictionResult, PredictError> {
        let backend = self
            .models
            .get(key)
            .ok_or_else(|| PredictError::KeyNotRegistered(key.to_string()))?;
        let probability = backend.score(features)?;
        if !(0.0..=1.0).contains(&probability) {
            warn!(model = key, probability, "backend returned a value outside [0, 1]");
        }
        Ok(PredictionResult::from_probability(probability))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.models.contains_key(key)
    }

    pub fn backend_kind(&self, key: &str) -> Option<&'static str> {
        self.models.get(key).map(ScoringBackend::kind)
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.models.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
