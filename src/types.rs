use serde::{Deserialize, Serialize};

use crate::codec::{Brand, FuelType, OwnerType, SellerType, Transmission};
use crate::config::input_ranges;
use crate::error::{AppError, Result};

// ---------------------------------------------------------------------------
// Request records
// ---------------------------------------------------------------------------

/// A form submission as the presentation layer collects it. Categorical
/// fields are free text until parsed; keys follow the dataset columns.
/// Integers are kept wide so any out-of-range number reaches the range
/// check instead of failing to deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarForm {
    pub brand: String,
    pub year: i64,
    pub km_driven: i64,
    pub fuel: String,
    pub seller_type: String,
    pub transmission: String,
    pub owner: String,
    pub mileage: f64,
    pub engine: f64,
    pub max_power: f64,
    pub seats: i64,
}

/// A typed, range-checked prediction request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawCarInput {
    pub brand: Brand,
    pub year: i32,
    pub km_driven: u32,
    pub fuel: FuelType,
    pub seller_type: SellerType,
    pub transmission: Transmission,
    pub owner: OwnerType,
    /// km/l
    pub mileage: f64,
    /// CC
    pub engine: f64,
    /// bhp
    pub max_power: f64,
    pub seats: u8,
}

impl RawCarInput {
    /// Parse the categorical fields and range-check the numeric ones.
    pub fn from_form(form: &CarForm) -> Result<Self> {
        use input_ranges::*;
        let input = Self {
            brand: form.brand.parse()?,
            year: narrow("year", form.year, YEAR)?,
            km_driven: narrow("km_driven", form.km_driven, KM_DRIVEN)?,
            fuel: form.fuel.parse()?,
            seller_type: form.seller_type.parse()?,
            transmission: form.transmission.parse()?,
            owner: form.owner.parse()?,
            mileage: form.mileage,
            engine: form.engine,
            max_power: form.max_power,
            seats: narrow("seats", form.seats, SEATS)?,
        };
        input.validate()?;
        Ok(input)
    }

    /// Reject numeric fields outside their accepted ranges.
    pub fn validate(&self) -> Result<()> {
        use input_ranges::*;
        check("year", self.year as f64, YEAR.0 as f64, YEAR.1 as f64)?;
        check(
            "km_driven",
            self.km_driven as f64,
            KM_DRIVEN.0 as f64,
            KM_DRIVEN.1 as f64,
        )?;
        check("mileage", self.mileage, MILEAGE.0, MILEAGE.1)?;
        check("engine", self.engine, ENGINE.0, ENGINE.1)?;
        check("max_power", self.max_power, MAX_POWER.0, MAX_POWER.1)?;
        check("seats", self.seats as f64, SEATS.0 as f64, SEATS.1 as f64)?;
        Ok(())
    }
}

/// Range-check a wire integer, then convert it to the typed field's width.
fn narrow<T>(field: &'static str, value: i64, (min, max): (T, T)) -> Result<T>
where
    T: Copy + Into<i64> + TryFrom<i64>,
{
    let (lo, hi): (i64, i64) = (min.into(), max.into());
    let out_of_range = || AppError::Validation {
        field,
        value: value as f64,
        min: lo as f64,
        max: hi as f64,
    };
    if !(lo..=hi).contains(&value) {
        return Err(out_of_range());
    }
    T::try_from(value).map_err(|_| out_of_range())
}

/// NaN fails the range test too.
fn check(field: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(AppError::Validation {
            field,
            value,
            min,
            max,
        })
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Display-only metrics derived from a predicted price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Insights {
    pub price_per_km: f64,
    pub condition_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Not clamped: a linear model can go negative for extreme inputs.
    pub price: f64,
    pub price_per_km: f64,
    pub condition_percent: f64,
}
