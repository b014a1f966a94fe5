use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::{check_schema, parse_artifact, read_artifact, to_columns};
use crate::config::FEATURE_COUNT;
use crate::error::{AppError, Result};
use crate::features::FeatureVector;

#[derive(Deserialize)]
struct ScalerArtifact {
    #[serde(default)]
    features: Option<Vec<String>>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

/// Per-column standardization fitted at training time.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    pub fn new(mean: [f64; FEATURE_COUNT], scale: [f64; FEATURE_COUNT]) -> Result<Self> {
        if let Some(i) = scale.iter().position(|s| *s == 0.0 || !s.is_finite()) {
            return Err(AppError::ArtifactLoad(format!(
                "scaler: scale[{i}] must be finite and non-zero"
            )));
        }
        if let Some(i) = mean.iter().position(|m| !m.is_finite()) {
            return Err(AppError::ArtifactLoad(format!("scaler: mean[{i}] is not finite")));
        }
        Ok(Self { mean, scale })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let scaler = Self::from_artifact(read_artifact(path)?)?;
        info!(path = %path.display(), width = FEATURE_COUNT, "loaded scaler artifact");
        Ok(scaler)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_artifact(parse_artifact(text, "scaler artifact")?)
    }

    fn from_artifact(a: ScalerArtifact) -> Result<Self> {
        check_schema("scaler", a.features.as_deref())?;
        let mean = to_columns("scaler", "mean", a.mean)?;
        let scale = to_columns("scaler", "scale", a.scale)?;
        Self::new(mean, scale)
    }

    /// `(x - mean) / scale`, column by column.
    pub fn transform(&self, x: &FeatureVector) -> FeatureVector {
        let mut out = [0.0; FEATURE_COUNT];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = (x.0[i] - self.mean[i]) / self.scale[i];
        }
        FeatureVector(out)
    }
}
