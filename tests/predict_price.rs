//! End-to-end: artifacts on disk -> PricePredictor -> PredictionResult.

use std::fs;
use std::path::PathBuf;

use carvalue::config::{Config, FEATURE_COLUMNS};
use carvalue::{AppError, CarForm, PricePredictor};

/// Scratch directory unique to one test.
fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("carvalue-{}-{name}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_artifacts(dir: &PathBuf, scaler: &str, model: &str) -> (PathBuf, PathBuf) {
    let model_path = dir.join("model.json");
    let scaler_path = dir.join("scaler.json");
    fs::write(&model_path, model).unwrap();
    fs::write(&scaler_path, scaler).unwrap();
    (model_path, scaler_path)
}

fn schema() -> String {
    serde_json::to_string(&FEATURE_COLUMNS).unwrap()
}

/// Centres the Maruti reference car on zero except for brand and engine.
fn scaler_json() -> String {
    format!(
        r#"{{
            "features": {},
            "mean":  [0, 2015, 50000, 4, 2, 0, 5, 20, 1000, 100, 5],
            "scale": [1, 4, 25000, 1, 1, 1, 1, 4, 250, 40, 1]
        }}"#,
        schema()
    )
}

fn model_json() -> String {
    format!(
        r#"{{
            "kind": "ridge",
            "features": {},
            "coefficients": [-1000, 80000, -30000, 20000, 0, 150000, 10000, 5000, 60000, 90000, -2000],
            "intercept": 400000
        }}"#,
        schema()
    )
}

fn form() -> CarForm {
    CarForm {
        brand: "Maruti".to_string(),
        year: 2015,
        km_driven: 50_000,
        fuel: "Diesel".to_string(),
        seller_type: "Individual".to_string(),
        transmission: "Manual".to_string(),
        owner: "First Owner".to_string(),
        mileage: 20.0,
        engine: 1500.0,
        max_power: 100.0,
        seats: 5,
    }
}

#[test]
fn loads_artifacts_and_predicts() {
    let dir = scratch("predicts");
    let (model, scaler) = write_artifacts(&dir, &scaler_json(), &model_json());
    let predictor = PricePredictor::load_from_paths(model, scaler, 2025).unwrap();

    // brand 1 * -1000, engine z = 2.0 * 60000, all other columns centred
    let r = predictor.predict_price(&form()).unwrap();
    assert_eq!(r.price, 519_000.0);
    assert_eq!(r.price_per_km, 519_000.0 / 50_000.0);
    assert_eq!(r.condition_percent, 25.0);
}

#[test]
fn config_paths_are_used() {
    let dir = scratch("config");
    let (model, scaler) = write_artifacts(&dir, &scaler_json(), &model_json());
    let cfg = Config {
        model_path: model.display().to_string(),
        scaler_path: scaler.display().to_string(),
        current_year: 2020,
        ..Config::default()
    };
    let predictor = PricePredictor::load(&cfg).unwrap();
    assert_eq!(predictor.current_year(), 2020);
    assert_eq!(predictor.predict_price(&form()).unwrap().condition_percent, 50.0);
}

#[test]
fn repeated_calls_are_bit_identical() {
    let dir = scratch("determinism");
    let (model, scaler) = write_artifacts(&dir, &scaler_json(), &model_json());
    let predictor = PricePredictor::load_from_paths(model, scaler, 2025).unwrap();

    let mut f = form();
    f.brand = "Toyota".to_string();
    f.km_driven = 73_210;
    f.mileage = 17.3;
    let first = predictor.predict_price(&f).unwrap();
    for _ in 0..100 {
        let again = predictor.predict_price(&f).unwrap();
        assert_eq!(again.price.to_bits(), first.price.to_bits());
        assert_eq!(again.price_per_km.to_bits(), first.price_per_km.to_bits());
    }
}

#[test]
fn missing_model_fails_construction() {
    let dir = scratch("missing");
    let scaler = dir.join("scaler.json");
    fs::write(&scaler, scaler_json()).unwrap();
    let res = PricePredictor::load_from_paths(dir.join("nope.json"), scaler, 2025);
    assert!(matches!(res, Err(AppError::ArtifactLoad(_))));
}

#[test]
fn scaler_width_mismatch_fails_construction() {
    let dir = scratch("width");
    let narrow = r#"{"mean": [0,0,0,0,0,0,0,0,0,0,0,0], "scale": [1,1,1,1,1,1,1,1,1,1,1,1]}"#;
    let (model, scaler) = write_artifacts(&dir, narrow, &model_json());
    let err = PricePredictor::load_from_paths(model, scaler, 2025).unwrap_err();
    assert!(matches!(err, AppError::ArtifactLoad(_)));
}

#[test]
fn request_errors_surface_from_the_boundary() {
    let dir = scratch("errors");
    let (model, scaler) = write_artifacts(&dir, &scaler_json(), &model_json());
    let predictor = PricePredictor::load_from_paths(model, scaler, 2025).unwrap();

    let mut unknown = form();
    unknown.brand = "Tesla".to_string();
    assert!(matches!(
        predictor.predict_price(&unknown),
        Err(AppError::UnknownCategory { .. })
    ));

    let mut old = form();
    old.year = 1999;
    assert!(matches!(
        predictor.predict_price(&old),
        Err(AppError::Validation { field: "year", .. })
    ));
}

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

#[test]
fn demo_artifacts_price_the_demo_request() {
    let predictor =
        PricePredictor::load_from_paths(demo("model.json"), demo("scaler.json"), 2025).unwrap();
    let request: CarForm =
        serde_json::from_str(&fs::read_to_string(demo("request.json")).unwrap()).unwrap();

    let r = predictor.predict_price(&request).unwrap();
    assert!((r.price - 815_140.5).abs() < 1.0, "price {}", r.price);
    assert_eq!(r.condition_percent, 25.0);
    assert_eq!(predictor.predict_price(&request).unwrap().price.to_bits(), r.price.to_bits());
}
