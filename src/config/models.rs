// src/config/models.rs
//! Which backend serves which model key.
//!
//! TOML shape:
//! ```toml
//! models_dir = "models"
//!
//! [models.appointment]
//! kind = "artifact"
//! file = "appointment_model.json"
//!
//! [models.payment]
//! kind = "closed_form"
//! ```
//!
//! Lookup order: `$PREDICT_CONFIG_PATH` (must exist), then
//! `config/models.toml`, then the built-in closed-form setup.
//! `$MODELS_DIR` overrides `models_dir`.

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::backend::LogisticFormula;
use crate::domains::DOMAIN_KEYS;

pub const DEFAULT_CONFIG_PATH: &str = "config/models.toml";
pub const ENV_CONFIG_PATH: &str = "PREDICT_CONFIG_PATH";
pub const ENV_MODELS_DIR: &str = "MODELS_DIR";

fn default_models_dir() -> PathBuf {
    PathBuf::from("models")
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSource {
    /// JSON artifact, resolved against `models_dir`.
    Artifact { file: PathBuf },
    /// Built-in logistic formula for the key's domain.
    ClosedForm,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,
    #[serde(default)]
    pub models: BTreeMap<String, ModelSource>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            models_dir: default_models_dir(),
            models: DOMAIN_KEYS
                .iter()
                .map(|k| (k.to_string(), ModelSource::ClosedForm))
                .collect(),
        }
    }
}

impl ServiceConfig {
    /// Parse and validate one TOML file. No env overrides.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading model config from {}", path.display()))?;
        Self::parse(&data).with_context(|| format!("parsing model config {}", path.display()))
    }

    pub fn parse(s: &str) -> Result<Self> {
        let cfg: ServiceConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Resolve the config from the environment and fallbacks.
    pub fn from_env() -> Result<Self> {
        let mut cfg = match std::env::var(ENV_CONFIG_PATH) {
            Ok(p) => {
                let pb = PathBuf::from(p);
                if !pb.exists() {
                    return Err(anyhow!(
                        "{ENV_CONFIG_PATH} points to non-existent path {}",
                        pb.display()
                    ));
                }
                Self::load_from_file(&pb)?
            }
            Err(_) => {
                let default = PathBuf::from(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::load_from_file(&default)?
                } else {
                    info!("no model config found; using built-in closed-form models");
                    Self::default()
                }
            }
        };
        if let Ok(dir) = std::env::var(ENV_MODELS_DIR) {
            if !dir.trim().is_empty() {
                cfg.models_dir = PathBuf::from(dir);
            }
        }
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        for (key, source) in &self.models {
            if key.trim().is_empty() {
                bail!("model key must not be empty");
            }
            if *source == ModelSource::ClosedForm && LogisticFormula::for_key(key).is_none() {
                bail!("no built-in closed-form model for key '{key}'");
            }
        }
        Ok(())
    }

    /// Absolute or `models_dir`-relative path of an artifact file.
    pub fn resolve(&self, file: &Path) -> PathBuf {
        self.models_dir.join(file)
    }

    /// Domain keys with no configured source.
    pub fn missing_domains(&self) -> Vec<&'static str> {
        DOMAIN_KEYS
            .iter()
            .copied()
            .filter(|k| !self.models.contains_key(*k))
            .collect()
    }
}
