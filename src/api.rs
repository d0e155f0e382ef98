use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use metrics::{counter, histogram};
use serde::Serialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::domains::{Appointment, Payment, Treatment};
use crate::error::PredictError;
use crate::metrics::{DURATION_MS, FAILURES_TOTAL, REQUESTS_TOTAL};
use crate::registry::ModelRegistry;
use crate::service::{Domain, PredictionService};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ModelRegistry>,
}

impl AppState {
    /// Freezes the registry; nothing can register models after this point.
    pub fn new(registry: ModelRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/models", get(list_models))
        .route("/predict/appointment", post(predict::<Appointment>))
        .route("/predict/payment", post(predict::<Payment>))
        .route("/predict/treatment", post(predict::<Treatment>))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Core failure surfaced to the caller as a generic 500.
#[derive(Debug)]
pub struct ApiError(pub PredictError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": self.0.to_string() })),
        )
            .into_response()
    }
}

async fn predict<D: Domain>(
    State(state): State<AppState>,
    body: Result<Json<D::Payload>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => {
            warn!(endpoint = D::KEY, reason = %rejection.body_text(), "rejected payload");
            return (
                rejection.status(),
                Json(json!({ "detail": rejection.body_text() })),
            )
                .into_response();
        }
    };

    let started = Instant::now();
    counter!(REQUESTS_TOTAL, "domain" => D::KEY).increment(1);

    let service = PredictionService::<D>::new();
    match service.predict(&state.registry, &body) {
        Ok(resp) => {
            histogram!(DURATION_MS, "domain" => D::KEY)
                .record(started.elapsed().as_secs_f64() * 1000.0);
            info!(target: "predict", endpoint = D::KEY, request = ?body, response = ?resp, "served");
            Json(resp).into_response()
        }
        Err(e) => {
            counter!(FAILURES_TOTAL, "domain" => D::KEY, "kind" => e.kind()).increment(1);
            error!(
                target: "predict",
                endpoint = D::KEY,
                kind = e.kind(),
                request = ?body,
                error = %e,
                "prediction failed"
            );
            ApiError(e).into_response()
        }
    }
}

#[derive(Serialize)]
struct HealthResp {
    status: &'static str,
}

async fn health() -> Json<HealthResp> {
    Json(HealthResp { status: "ok" })
}

#[derive(Serialize)]
struct ModelInfo {
    key: String,
    kind: &'static str,
}

#[derive(Serialize)]
struct ModelsResp {
    models: Vec<ModelInfo>,
}

async fn list_models(State(state): State<AppState>) -> Json<ModelsResp> {
    let models = state
        .registry
        .keys()
        .into_iter()
        .filter_map(|k| {
            state.registry.backend_kind(k).map(|kind| ModelInfo {
                key: k.to_string(),
                kind,
            })
        })
        .collect();
    Json(ModelsResp { models })
}
