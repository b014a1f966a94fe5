use crate::config::condition::{HORIZON_YEARS, PERCENT_PER_YEAR};
use crate::types::Insights;

/// Display metrics for a predicted price. Neither feeds back into the model.
///
/// `condition_percent` clamps at 0 once the car is `HORIZON_YEARS` old but
/// has no upper bound, so a year after `current_year` reads above 75%.
pub fn derive(price: f64, km_driven: u32, year: i32, current_year: i32) -> Insights {
    let price_per_km = price / f64::from(km_driven.max(1));
    let age = i64::from(current_year) - i64::from(year);
    let condition = ((i64::from(HORIZON_YEARS) - age) * i64::from(PERCENT_PER_YEAR)).max(0);
    Insights {
        price_per_km,
        condition_percent: condition as f64,
    }
}
