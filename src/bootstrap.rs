// src/bootstrap.rs
use anyhow::{bail, Context};
use tracing::info;

use crate::artifact::{JsonModelLoader, ModelLoader};
use crate::backend::{LogisticFormula, ScoringBackend};
use crate::config::{ModelSource, ServiceConfig};
use crate::registry::ModelRegistry;

/// Populate a registry from config with the default JSON loader.
/// Any load failure or unconfigured domain aborts; a partial registry is
/// never returned.
pub fn build_registry(cfg: &ServiceConfig) -> anyhow::Result<ModelRegistry> {
    build_registry_with(cfg, &JsonModelLoader)
}

pub fn build_registry_with(
    cfg: &ServiceConfig,
    loader: &dyn ModelLoader,
) -> anyhow::Result<ModelRegistry> {
    cfg.validate()?;

    let missing = cfg.missing_domains();
    if !missing.is_empty() {
        bail!("no model configured for: {}", missing.join(", "));
    }

    let mut registry = ModelRegistry::new();
    for (key, source) in &cfg.models {
        match source {
            ModelSource::Artifact { file } => {
                let path = cfg.resolve(file);
                registry
                    .load_with(key, &path, loader)
                    .with_context(|| format!("loading model '{key}'"))?;
            }
            ModelSource::ClosedForm => {
                let formula = LogisticFormula::for_key(key)
                    .with_context(|| format!("no built-in closed-form model for '{key}'"))?;
                registry.register(key.as_str(), ScoringBackend::closed_form(formula));
                info!(model = %key, kind = "closed_form", "registered built-in model");
            }
        }
    }

    info!(models = ?registry.keys(), "model registry ready");
    Ok(registry)
}
