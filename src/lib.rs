//! Car resale price estimation over a pre-trained linear model.
//!
//! Front ends build a [`types::CarForm`], hand it to
//! [`predictor::PricePredictor::predict_price`], and render the result next to
//! a [`dataset::Comparison`] of historical listings.

pub mod codec;
pub mod config;
pub mod dataset;
pub mod error;
pub mod features;
pub mod insight;
pub mod latency;
pub mod model;
pub mod predictor;
pub mod types;

pub use error::{AppError, Result};
pub use predictor::PricePredictor;
pub use types::{CarForm, PredictionResult, RawCarInput};
