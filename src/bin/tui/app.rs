use std::time::Instant;

use carvalue::codec::{Brand, FuelType, OwnerType, SellerType, Transmission};
use carvalue::config::input_ranges;
use carvalue::dataset::{Comparison, Dataset};
use carvalue::latency::PredictionLatency;
use carvalue::{CarForm, PredictionResult, PricePredictor, Result};

// ---------------------------------------------------------------------------
// Form fields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Brand,
    Year,
    KmDriven,
    Fuel,
    SellerType,
    Transmission,
    Owner,
    Mileage,
    Engine,
    MaxPower,
    Seats,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::Brand,
        Field::Year,
        Field::KmDriven,
        Field::Fuel,
        Field::SellerType,
        Field::Transmission,
        Field::Owner,
        Field::Mileage,
        Field::Engine,
        Field::MaxPower,
        Field::Seats,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Brand => "Car Brand",
            Field::Year => "Manufacturing Year",
            Field::KmDriven => "Kilometers Driven",
            Field::Fuel => "Fuel Type",
            Field::SellerType => "Seller Type",
            Field::Transmission => "Transmission Type",
            Field::Owner => "Owner Type",
            Field::Mileage => "Mileage (km/l)",
            Field::Engine => "Engine Capacity (CC)",
            Field::MaxPower => "Max Power (bhp)",
            Field::Seats => "Seating Capacity",
        }
    }
}

/// Current form values. Selectors hold an index into the category's `ALL`.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub brand: usize,
    pub year: i32,
    pub km_driven: u32,
    pub fuel: usize,
    pub seller_type: usize,
    pub transmission: usize,
    pub owner: usize,
    pub mileage: f64,
    pub engine: f64,
    pub max_power: f64,
    pub seats: u8,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            brand: 0,
            year: 2015,
            km_driven: 50_000,
            fuel: 0,
            seller_type: 0,
            transmission: 0,
            owner: 0,
            mileage: 20.0,
            engine: 1500.0,
            max_power: 100.0,
            seats: 5,
        }
    }
}

impl FormState {
    /// Move a field by `steps` slider steps (or selector entries). Numbers
    /// clamp to their range, selectors wrap.
    pub fn adjust(&mut self, field: Field, steps: i32) {
        use input_ranges::*;
        match field {
            Field::Brand => self.brand = cycle(self.brand, Brand::ALL.len(), steps),
            Field::Fuel => self.fuel = cycle(self.fuel, FuelType::ALL.len(), steps),
            Field::SellerType => {
                self.seller_type = cycle(self.seller_type, SellerType::ALL.len(), steps)
            }
            Field::Transmission => {
                self.transmission = cycle(self.transmission, Transmission::ALL.len(), steps)
            }
            Field::Owner => self.owner = cycle(self.owner, OwnerType::ALL.len(), steps),
            Field::Year => {
                self.year = (self.year + steps).clamp(YEAR.0, YEAR.1);
            }
            Field::KmDriven => {
                let km = i64::from(self.km_driven) + i64::from(steps) * 1000;
                self.km_driven = km.clamp(i64::from(KM_DRIVEN.0), i64::from(KM_DRIVEN.1)) as u32;
            }
            Field::Mileage => {
                self.mileage = (self.mileage + f64::from(steps)).clamp(MILEAGE.0, MILEAGE.1);
            }
            Field::Engine => {
                self.engine = (self.engine + f64::from(steps) * 100.0).clamp(ENGINE.0, ENGINE.1);
            }
            Field::MaxPower => {
                self.max_power =
                    (self.max_power + f64::from(steps)).clamp(MAX_POWER.0, MAX_POWER.1);
            }
            Field::Seats => {
                let seats = i32::from(self.seats) + steps;
                self.seats = seats.clamp(i32::from(SEATS.0), i32::from(SEATS.1)) as u8;
            }
        }
    }

    pub fn brand(&self) -> Brand {
        Brand::ALL[self.brand]
    }

    pub fn value_text(&self, field: Field) -> String {
        match field {
            Field::Brand => self.brand().to_string(),
            Field::Year => self.year.to_string(),
            Field::KmDriven => self.km_driven.to_string(),
            Field::Fuel => FuelType::ALL[self.fuel].to_string(),
            Field::SellerType => SellerType::ALL[self.seller_type].to_string(),
            Field::Transmission => Transmission::ALL[self.transmission].to_string(),
            Field::Owner => OwnerType::ALL[self.owner].to_string(),
            Field::Mileage => format!("{:.0}", self.mileage),
            Field::Engine => format!("{:.0}", self.engine),
            Field::MaxPower => format!("{:.0}", self.max_power),
            Field::Seats => self.seats.to_string(),
        }
    }

    /// The submission a web form would have sent.
    pub fn to_form(&self) -> CarForm {
        CarForm {
            brand: self.value_text(Field::Brand),
            year: i64::from(self.year),
            km_driven: i64::from(self.km_driven),
            fuel: self.value_text(Field::Fuel),
            seller_type: self.value_text(Field::SellerType),
            transmission: self.value_text(Field::Transmission),
            owner: self.value_text(Field::Owner),
            mileage: self.mileage,
            engine: self.engine,
            max_power: self.max_power,
            seats: i64::from(self.seats),
        }
    }
}

fn cycle(idx: usize, len: usize, steps: i32) -> usize {
    let len = len as i64;
    (idx as i64 + i64::from(steps)).rem_euclid(len) as usize
}

// ---------------------------------------------------------------------------
// App state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Idle,
    Predicted {
        result: PredictionResult,
        comparison: Option<Comparison>,
    },
    Failed(String),
}

pub struct AppState {
    pub form: FormState,
    pub selected: usize,
    pub outcome: Outcome,
    pub latency: PredictionLatency,
    predictor: PricePredictor,
    dataset: Option<Dataset>,
    comparison_limit: usize,
}

impl AppState {
    pub fn new(
        predictor: PricePredictor,
        dataset: Option<Dataset>,
        comparison_limit: usize,
    ) -> Result<Self> {
        Ok(Self {
            form: FormState::default(),
            selected: 0,
            outcome: Outcome::Idle,
            latency: PredictionLatency::new()?,
            predictor,
            dataset,
            comparison_limit,
        })
    }

    pub fn selected_field(&self) -> Field {
        Field::ALL[self.selected]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1).min(Field::ALL.len() - 1);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn adjust_selected(&mut self, steps: i32) {
        let field = self.selected_field();
        self.form.adjust(field, steps);
    }

    pub fn reset(&mut self) {
        self.form = FormState::default();
        self.outcome = Outcome::Idle;
    }

    pub fn has_dataset(&self) -> bool {
        self.dataset.is_some()
    }

    /// Run the form through the predictor and keep the outcome for rendering.
    pub fn submit(&mut self) {
        let started = Instant::now();
        let result = self.predictor.predict_price(&self.form.to_form());
        self.latency.observe(started.elapsed());

        self.outcome = match result {
            Ok(result) => {
                let comparison = self.dataset.as_ref().map(|d| {
                    d.comparison(self.form.brand(), result.price, self.comparison_limit)
                });
                Outcome::Predicted { result, comparison }
            }
            Err(e) => Outcome::Failed(e.to_string()),
        };
    }
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Whole rupees with comma thousands separators: `₹ 1,234,567`.
pub fn format_price(v: f64) -> String {
    let rounded = v.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("₹ -{grouped}")
    } else {
        format!("₹ {grouped}")
    }
}

pub fn format_price_per_km(v: f64) -> String {
    format!("₹ {v:.1}")
}

pub fn format_condition(pct: f64) -> String {
    format!("{pct:.0}% Value")
}

pub fn format_delta(delta: f64) -> String {
    if delta >= 0.0 {
        format!("+{}", format_price(delta))
    } else {
        format!("-{}", format_price(-delta))
    }
}

/// Comparison panel title with the market average and how many listings
/// sold below the estimate.
pub fn comparison_title(c: &Comparison) -> String {
    let head = if c.fallback {
        format!("MARKET SAMPLE (no {} listings)", c.brand)
    } else {
        format!("Price Trends for {} Cars", c.brand)
    };
    match c.summary() {
        Some(s) => format!(
            " {head} · avg {} · {:.0}% below yours ",
            format_price(s.mean_price),
            s.share_below_predicted * 100.0
        ),
        None => format!(" {head} "),
    }
}
