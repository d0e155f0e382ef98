// tests/registry_startup.rs
//
// Startup barrier: the service only comes up with a complete registry.
// Plus range/idempotence checks over the registry itself.

use std::fs;
use std::path::PathBuf;

use rand::Rng;

use dentalink_ai::config::ModelSource;
use dentalink_ai::{bootstrap, LogisticFormula, ModelRegistry, PredictError, ScoringBackend, ServiceConfig};

fn artifact_config(dir: &std::path::Path, file: &str) -> ServiceConfig {
    ServiceConfig {
        models_dir: dir.to_path_buf(),
        models: [
            (
                "appointment".to_string(),
                ModelSource::Artifact {
                    file: PathBuf::from(file),
                },
            ),
            ("payment".to_string(), ModelSource::ClosedForm),
            ("treatment".to_string(), ModelSource::ClosedForm),
        ]
        .into_iter()
        .collect(),
    }
}

#[test]
fn missing_artifact_prevents_serving() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = artifact_config(dir.path(), "appointment_model.json");

    let err = dentalink_ai::app(&cfg)
        .err()
        .expect("app must not build without its model");
    assert!(matches!(
        err.downcast_ref::<PredictError>(),
        Some(PredictError::ArtifactNotFound { .. })
    ));
}

#[test]
fn corrupt_artifact_prevents_serving() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("appointment_model.json"), b"not json at all").unwrap();
    let cfg = artifact_config(dir.path(), "appointment_model.json");

    let err = dentalink_ai::app(&cfg)
        .err()
        .expect("corrupt model must abort");
    assert!(matches!(
        err.downcast_ref::<PredictError>(),
        Some(PredictError::ArtifactCorrupt { .. })
    ));
}

#[test]
fn config_without_treatment_prevents_serving() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("appointment_model.json"),
        r#"{"n_features": 2, "predict_proba": {"weight": 0.01}}"#,
    )
    .unwrap();
    let mut cfg = artifact_config(dir.path(), "appointment_model.json");
    cfg.models.remove("treatment");

    let err = dentalink_ai::app(&cfg)
        .err()
        .expect("app must not come up with a domain unbound");
    assert!(err.to_string().contains("treatment"), "{err}");
}

#[test]
fn shipped_config_loads_every_domain() {
    // cargo runs integration tests from the package root
    let cfg = ServiceConfig::load_from_file("config/models.toml").expect("shipped config");
    let registry = bootstrap::build_registry(&cfg).expect("shipped artifacts load");

    assert_eq!(registry.keys(), vec!["appointment", "payment", "treatment"]);
    for key in registry.keys() {
        assert_eq!(registry.backend_kind(key), Some("probabilistic"));
    }
    let r = registry.predict("treatment", &[100.0]).unwrap();
    let want = 1.0 / (1.0 + (-(100.0_f64 * 0.03)).exp());
    assert!((r.probability - want).abs() < 1e-12);
}

fn builtin_registry() -> ModelRegistry {
    bootstrap::build_registry(&ServiceConfig::default()).unwrap()
}

#[test]
fn probabilities_stay_in_unit_interval() {
    let registry = builtin_registry();
    let mut rng = rand::rng();

    // saturating extremes first, then random magnitudes
    let extremes = [-1e12, -1e6, -1.0, 0.0, 1.0, 1e6, 1e12];
    for &a in &extremes {
        for &b in &extremes {
            for (key, features) in [
                ("appointment", vec![a, b]),
                ("payment", vec![a, b]),
                ("treatment", vec![a]),
            ] {
                let p = registry.predict(key, &features).unwrap().probability;
                assert!((0.0..=1.0).contains(&p), "{key} {features:?} -> {p}");
            }
        }
    }

    for _ in 0..1_000 {
        let a: f64 = rng.random_range(-1e5..1e5);
        let b: f64 = rng.random_range(-1e5..1e5);
        let p = registry.predict("payment", &[a, b]).unwrap().probability;
        assert!((0.0..=1.0).contains(&p), "payment [{a}, {b}] -> {p}");
    }
}

#[test]
fn identical_inputs_give_bit_identical_results() {
    let registry = builtin_registry();
    let a = registry.predict("appointment", &[1.0, 500.0]).unwrap();
    let b = registry.predict("appointment", &[1.0, 500.0]).unwrap();
    assert_eq!(a.probability.to_bits(), b.probability.to_bits());
    assert_eq!(a, b);
}

#[test]
fn unknown_key_never_defaults() {
    let registry = builtin_registry();
    assert_eq!(
        registry.predict("nonexistent", &[1.0, 2.0]),
        Err(PredictError::KeyNotRegistered("nonexistent".to_string()))
    );
}

#[test]
fn manual_registration_matches_bootstrap() {
    let mut manual = ModelRegistry::new();
    manual.register(
        "payment",
        ScoringBackend::closed_form(LogisticFormula::PAYMENT),
    );
    let boot = builtin_registry();
    assert_eq!(
        manual.predict("payment", &[250.0, 12.0]),
        boot.predict("payment", &[250.0, 12.0])
    );
}
