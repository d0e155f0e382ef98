// tests/metrics.rs
//
// One test only: the Prometheus recorder is process-global.

use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use dentalink_ai::metrics::Metrics;
use dentalink_ai::ServiceConfig;

#[tokio::test]
async fn metrics_endpoint_contains_expected_series() {
    let metrics = Metrics::init(3).expect("install recorder once");
    let app: Router = dentalink_ai::app(&ServiceConfig::default())
        .expect("default app")
        .merge(metrics.router());

    let req = Request::post("/predict/payment")
        .header("content-type", "application/json")
        .body(Body::from(
            r#"{"amount": 100, "days_overdue": 0, "method": "card"}"#,
        ))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // axum::body::to_bytes requires an explicit limit
    let body = body::to_bytes(resp.into_body(), 1_048_576).await.unwrap(); // 1 MiB
    let text = String::from_utf8(body.to_vec()).unwrap();

    for needle in [
        "prediction_requests_total",
        "prediction_duration_ms",
        "model_registry_size",
        "domain=\"payment\"",
    ] {
        assert!(
            text.contains(needle),
            "metrics output missing `{needle}`:\n{text}"
        );
    }
}
