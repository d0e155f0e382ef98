//! DentalLink prediction service — binary entrypoint.
//! Loads every configured model, then boots the Axum HTTP server.
//! A model that fails to load aborts startup; nothing is served.

use dentalink_ai::{api, bootstrap, metrics::Metrics, AppState, ServiceConfig};
use shuttle_axum::ShuttleAxum;
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Console logs; `LOG_FORMAT=json` switches to JSON lines.
/// `try_init` so a subscriber installed by the host runtime wins.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dentalink_ai=info,predict=info,warn"));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let _ = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .try_init()
    };
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = ServiceConfig::from_env()?;
    let registry = bootstrap::build_registry(&cfg)?;
    let registry_size = registry.len();

    let mut router = api::create_router(AppState::new(registry));
    match Metrics::init(registry_size) {
        Ok(m) => router = router.merge(m.router()),
        Err(e) => warn!(error = %e, "metrics recorder not installed; /metrics disabled"),
    }

    Ok(router.into())
}
