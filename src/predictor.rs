use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::features::FeatureVector;
use crate::insight;
use crate::model::{LinearModel, StandardScaler};
use crate::types::{CarForm, PredictionResult, RawCarInput};

/// Owns the loaded artifacts. Immutable after construction, so one instance
/// can serve any number of callers by shared reference.
#[derive(Debug, Clone)]
pub struct PricePredictor {
    model: LinearModel,
    scaler: StandardScaler,
    current_year: i32,
}

impl PricePredictor {
    pub fn new(model: LinearModel, scaler: StandardScaler, current_year: i32) -> Self {
        Self {
            model,
            scaler,
            current_year,
        }
    }

    /// Load both artifacts named by the config. Fails before any request is
    /// served if either is missing or malformed.
    pub fn load(cfg: &Config) -> Result<Self> {
        Self::load_from_paths(&cfg.model_path, &cfg.scaler_path, cfg.current_year)
    }

    pub fn load_from_paths(
        model_path: impl AsRef<Path>,
        scaler_path: impl AsRef<Path>,
        current_year: i32,
    ) -> Result<Self> {
        let scaler = StandardScaler::load(scaler_path)?;
        let model = LinearModel::load(model_path)?;
        Ok(Self::new(model, scaler, current_year))
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Raw model output for one request.
    pub fn predict(&self, input: &RawCarInput) -> Result<f64> {
        input.validate()?;
        let features = FeatureVector::build(input);
        let scaled = self.scaler.transform(&features);
        Ok(self.model.predict(&scaled))
    }

    /// Price plus the derived display metrics.
    pub fn evaluate(&self, input: &RawCarInput) -> Result<PredictionResult> {
        let price = self.predict(input)?;
        let insights = insight::derive(price, input.km_driven, input.year, self.current_year);
        Ok(PredictionResult {
            price,
            price_per_km: insights.price_per_km,
            condition_percent: insights.condition_percent,
        })
    }

    /// Entry point for front ends: parse, validate, predict.
    ///
    /// Errors with `UnknownCategory` for a categorical value outside the
    /// tables and `Validation` for a numeric field out of range.
    pub fn predict_price(&self, form: &CarForm) -> Result<PredictionResult> {
        let input = RawCarInput::from_form(form)?;
        self.evaluate(&input)
    }
}
