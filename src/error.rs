use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Model or scaler artifact missing, unreadable, or dimensionally inconsistent.
    #[error("Artifact load error: {0}")]
    ArtifactLoad(String),

    #[error("Unknown {field} category: {value:?}")]
    UnknownCategory { field: &'static str, value: String },

    #[error("Validation error: {field} = {value} is outside [{min}, {max}]")]
    Validation {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Dataset error: {0}")]
    Dataset(#[from] csv::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
