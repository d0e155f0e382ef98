// src/config/mod.rs
pub mod models;

pub use models::{ModelSource, ServiceConfig, DEFAULT_CONFIG_PATH, ENV_CONFIG_PATH, ENV_MODELS_DIR};
