use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::{check_schema, parse_artifact, read_artifact, to_columns};
use crate::config::FEATURE_COUNT;
use crate::error::{AppError, Result};
use crate::features::FeatureVector;

#[derive(Deserialize)]
struct ModelArtifact {
    /// Estimator family, e.g. "ridge". Informational.
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    features: Option<Vec<String>>,
    coefficients: Vec<f64>,
    intercept: f64,
}

/// Linear regression over standardized features.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl LinearModel {
    pub fn new(coefficients: [f64; FEATURE_COUNT], intercept: f64) -> Result<Self> {
        if !intercept.is_finite() {
            return Err(AppError::ArtifactLoad("model: intercept is not finite".to_string()));
        }
        Ok(Self {
            coefficients,
            intercept,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let artifact: ModelArtifact = read_artifact(path)?;
        let kind = artifact.kind.clone().unwrap_or_else(|| "linear".to_string());
        let model = Self::from_artifact(artifact)?;
        info!(
            path = %path.display(),
            kind = %kind,
            intercept = model.intercept,
            "loaded regression artifact"
        );
        Ok(model)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_artifact(parse_artifact(text, "model artifact")?)
    }

    fn from_artifact(a: ModelArtifact) -> Result<Self> {
        check_schema("model", a.features.as_deref())?;
        let coefficients = to_columns("model", "coefficients", a.coefficients)?;
        Self::new(coefficients, a.intercept)
    }

    /// `coefficients · x + intercept`.
    pub fn predict(&self, x: &FeatureVector) -> f64 {
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(x.as_slice())
            .map(|(c, v)| c * v)
            .sum();
        dot + self.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::year_only_model_json;

    #[test]
    fn applies_coefficients_and_intercept() {
        let model = LinearModel::from_json_str(&year_only_model_json()).unwrap();
        let mut x = [7.0; FEATURE_COUNT];
        x[1] = 2015.0;
        assert_eq!(model.predict(&FeatureVector(x)), 1500.0);
    }

    #[test]
    fn zero_input_yields_intercept() {
        let model = LinearModel::new([3.5; FEATURE_COUNT], 42.0).unwrap();
        assert_eq!(model.predict(&FeatureVector([0.0; FEATURE_COUNT])), 42.0);
    }

    #[test]
    fn missing_intercept_is_rejected() {
        let json = r#"{"coefficients": [0,0,0,0,0,0,0,0,0,0,0]}"#;
        assert!(matches!(
            LinearModel::from_json_str(json),
            Err(AppError::ArtifactLoad(_))
        ));
    }

    #[test]
    fn wrong_coefficient_count_is_rejected() {
        let json = r#"{"coefficients": [1,2,3], "intercept": 0}"#;
        let err = LinearModel::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("3 values"));
    }

    #[test]
    fn schema_mismatch_is_rejected() {
        let json = r#"{
            "features": ["name","km_driven","year","fuel","seller_type","transmission","owner","mileage","engine","max_power","seats"],
            "coefficients": [0,0,0,0,0,0,0,0,0,0,0],
            "intercept": 0
        }"#;
        assert!(matches!(
            LinearModel::from_json_str(json),
            Err(AppError::ArtifactLoad(_))
        ));
    }
}
