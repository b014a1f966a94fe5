//! Pre-fitted artifacts produced by the offline training run.
//!
//! Both artifacts are JSON documents carrying `f64` arrays exactly
//! `FEATURE_COUNT` wide, plus an optional `features` list naming the columns
//! they were fitted on. The list is checked against `FEATURE_COLUMNS` so a
//! reordered training frame fails at load time instead of skewing prices.

pub mod regression;
pub mod scaler;

pub use regression::LinearModel;
pub use scaler::StandardScaler;

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::config::{FEATURE_COLUMNS, FEATURE_COUNT};
use crate::error::{AppError, Result};

/// Read and parse an artifact file. Every failure becomes `ArtifactLoad`.
fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        AppError::ArtifactLoad(format!("failed to read {}: {e}", path.display()))
    })?;
    parse_artifact(&text, &path.display().to_string())
}

fn parse_artifact<T: DeserializeOwned>(text: &str, origin: &str) -> Result<T> {
    serde_json::from_str(text)
        .map_err(|e| AppError::ArtifactLoad(format!("failed to parse {origin}: {e}")))
}

/// Compare the artifact's column names with the builder's order.
fn check_schema(artifact: &str, features: Option<&[String]>) -> Result<()> {
    let Some(features) = features else {
        warn!(artifact, "artifact has no feature schema; only its width is checked");
        return Ok(());
    };
    if features.len() != FEATURE_COUNT {
        return Err(AppError::ArtifactLoad(format!(
            "{artifact}: schema lists {} features, expected {FEATURE_COUNT}",
            features.len()
        )));
    }
    for (i, (got, want)) in features.iter().zip(FEATURE_COLUMNS.iter()).enumerate() {
        if got != want {
            return Err(AppError::ArtifactLoad(format!(
                "{artifact}: column {i} is {got:?}, expected {want:?}"
            )));
        }
    }
    Ok(())
}

/// Convert a parsed array into a fixed-width column array, rejecting wrong
/// widths and non-finite values.
fn to_columns(artifact: &str, name: &str, values: Vec<f64>) -> Result<[f64; FEATURE_COUNT]> {
    let len = values.len();
    let columns: [f64; FEATURE_COUNT] = values.try_into().map_err(|_| {
        AppError::ArtifactLoad(format!(
            "{artifact}: {name} has {len} values, expected {FEATURE_COUNT}"
        ))
    })?;
    if let Some(i) = columns.iter().position(|v| !v.is_finite()) {
        return Err(AppError::ArtifactLoad(format!(
            "{artifact}: {name}[{i}] is not finite"
        )));
    }
    Ok(columns)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::config::FEATURE_COLUMNS;

    pub fn schema_json() -> String {
        serde_json::to_string(&FEATURE_COLUMNS).unwrap()
    }

    /// Identity scaler: mean 0, scale 1 on every column.
    pub fn identity_scaler_json() -> String {
        format!(
            r#"{{"features": {}, "mean": [0,0,0,0,0,0,0,0,0,0,0], "scale": [1,1,1,1,1,1,1,1,1,1,1]}}"#,
            schema_json()
        )
    }

    /// Price = 100 * year - 200000, everything else ignored.
    pub fn year_only_model_json() -> String {
        format!(
            r#"{{"kind": "ridge", "features": {}, "coefficients": [0,100,0,0,0,0,0,0,0,0,0], "intercept": -200000}}"#,
            schema_json()
        )
    }
}
