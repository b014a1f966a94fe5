use crate::error::{AppError, Result};

pub const MODEL_PATH: &str = "artifacts/model.json";
pub const SCALER_PATH: &str = "artifacts/scaler.json";
pub const DATASET_PATH: &str = "Cardetails.csv";

/// Width of the encoded feature vector. Both artifacts must match it.
pub const FEATURE_COUNT: usize = 11;

/// Column names the artifacts were fitted against, in feature-vector order.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "name",
    "year",
    "km_driven",
    "fuel",
    "seller_type",
    "transmission",
    "owner",
    "mileage",
    "engine",
    "max_power",
    "seats",
];

/// Year the condition heuristic measures age against.
pub const DEFAULT_CURRENT_YEAR: i32 = 2025;

/// Accepted CURRENT_YEAR values, inclusive.
pub const CURRENT_YEAR_RANGE: (i32, i32) = (input_ranges::YEAR.0, 9999);

/// Listings shown in a brand comparison.
pub const DEFAULT_COMPARISON_LIMIT: usize = 20;

/// Rows used for the comparison when the brand has no listings.
pub const FALLBACK_SAMPLE_SIZE: usize = 10;

/// Inclusive ranges accepted for numeric inputs, `(min, max)`.
pub mod input_ranges {
    pub const YEAR: (i32, i32) = (2000, 2025);
    pub const KM_DRIVEN: (u32, u32) = (10, 200_000);
    pub const MILEAGE: (f64, f64) = (10.0, 100.0);
    pub const ENGINE: (f64, f64) = (700.0, 5000.0);
    pub const MAX_POWER: (f64, f64) = (0.0, 500.0);
    pub const SEATS: (u8, u8) = (2, 10);
}

/// Cosmetic condition heuristic: `max(0, (HORIZON_YEARS - age) * PERCENT_PER_YEAR)`.
pub mod condition {
    pub const HORIZON_YEARS: i32 = 15;
    pub const PERCENT_PER_YEAR: i32 = 5;
}

#[derive(Debug, Clone)]
pub struct Config {
    pub model_path: String,
    pub scaler_path: String,
    pub dataset_path: String,
    pub log_level: String,
    /// Reference year for the condition metric (CURRENT_YEAR)
    pub current_year: i32,
    /// Max listings in the brand comparison (COMPARISON_LIMIT)
    pub comparison_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            model_path: std::env::var("MODEL_PATH").unwrap_or_else(|_| MODEL_PATH.to_string()),
            scaler_path: std::env::var("SCALER_PATH")
                .unwrap_or_else(|_| SCALER_PATH.to_string()),
            dataset_path: std::env::var("DATASET_PATH")
                .unwrap_or_else(|_| DATASET_PATH.to_string()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            current_year: match std::env::var("CURRENT_YEAR") {
                Ok(raw) => parse_current_year(&raw)?,
                Err(_) => DEFAULT_CURRENT_YEAR,
            },
            comparison_limit: std::env::var("COMPARISON_LIMIT")
                .unwrap_or_else(|_| DEFAULT_COMPARISON_LIMIT.to_string())
                .parse::<usize>()
                .unwrap_or(DEFAULT_COMPARISON_LIMIT),
        })
    }
}

/// Parse the condition reference year. It must be a plain integer year no
/// earlier than the oldest accepted model year.
pub fn parse_current_year(raw: &str) -> Result<i32> {
    let (min, max) = CURRENT_YEAR_RANGE;
    match raw.trim().parse::<i32>() {
        Ok(year) if (min..=max).contains(&year) => Ok(year),
        _ => Err(AppError::Config(format!(
            "CURRENT_YEAR must be an integer year in {min}..={max}, got {raw:?}"
        ))),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: MODEL_PATH.to_string(),
            scaler_path: SCALER_PATH.to_string(),
            dataset_path: DATASET_PATH.to_string(),
            log_level: "info".to_string(),
            current_year: DEFAULT_CURRENT_YEAR,
            comparison_limit: DEFAULT_COMPARISON_LIMIT,
        }
    }
}
