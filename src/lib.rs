// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod artifact;
pub mod backend;
pub mod bootstrap;
pub mod config;
pub mod domains;
pub mod error;
pub mod metrics;
pub mod registry;
pub mod service;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router as router, AppState};
pub use crate::backend::{LogisticFormula, ScoringBackend};
pub use crate::config::ServiceConfig;
pub use crate::error::PredictError;
pub use crate::registry::{ModelRegistry, PredictionResult};

use axum::Router;

/// Build the full router from a config: load every model, freeze the
/// registry, wire the routes. Fails before any route exists if a model
/// cannot be loaded.
pub fn app(cfg: &ServiceConfig) -> anyhow::Result<Router> {
    let registry = bootstrap::build_registry(cfg)?;
    Ok(api::create_router(AppState::new(registry)))
}
