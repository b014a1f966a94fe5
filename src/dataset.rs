//! Historical listings used to put a prediction in context.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::codec::Brand;
use crate::config::FALLBACK_SAMPLE_SIZE;
use crate::error::Result;

/// One CSV row. Columns other than these are ignored.
#[derive(Debug, Deserialize)]
struct ListingRow {
    name: String,
    year: i32,
    selling_price: f64,
    km_driven: u64,
    fuel: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    /// First word of the listing name, e.g. "Maruti" for "Maruti Swift Dzire VDI".
    pub brand: String,
    pub year: i32,
    pub selling_price: f64,
    pub km_driven: u64,
    pub fuel: String,
}

impl From<ListingRow> for Listing {
    fn from(row: ListingRow) -> Self {
        let brand = row
            .name
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            brand,
            year: row.year,
            selling_price: row.selling_price,
            km_driven: row.km_driven,
            fuel: row.fuel,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    listings: Vec<Listing>,
}

impl Dataset {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let dataset = Self::from_reader(file)?;
        info!(path = %path.display(), rows = dataset.len(), "loaded historical listings");
        Ok(dataset)
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut listings = Vec::new();
        for row in rdr.deserialize::<ListingRow>() {
            listings.push(Listing::from(row?));
        }
        Ok(Self { listings })
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Listings to compare a prediction against: the first `limit` of the
    /// same brand, or the first `FALLBACK_SAMPLE_SIZE` rows when the brand
    /// has none.
    pub fn comparison(&self, brand: Brand, predicted_price: f64, limit: usize) -> Comparison {
        let same_brand: Vec<&Listing> = self
            .listings
            .iter()
            .filter(|l| l.brand == brand.label())
            .take(limit)
            .collect();

        let fallback = same_brand.is_empty();
        let picked = if fallback {
            self.listings
                .iter()
                .take(FALLBACK_SAMPLE_SIZE.min(limit))
                .collect()
        } else {
            same_brand
        };

        let listings = picked
            .into_iter()
            .map(|l| ComparedListing {
                year: l.year,
                selling_price: l.selling_price,
                km_driven: l.km_driven,
                fuel: l.fuel.clone(),
                delta: l.selling_price - predicted_price,
            })
            .collect();

        Comparison {
            brand: brand.label(),
            predicted_price,
            fallback,
            listings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparedListing {
    pub year: i32,
    pub selling_price: f64,
    pub km_driven: u64,
    pub fuel: String,
    /// `selling_price - predicted_price`
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub brand: &'static str,
    pub predicted_price: f64,
    /// True when the brand had no listings and generic rows were used.
    pub fallback: bool,
    pub listings: Vec<ComparedListing>,
}

impl Comparison {
    pub fn mean_price(&self) -> Option<f64> {
        if self.listings.is_empty() {
            return None;
        }
        let total: f64 = self.listings.iter().map(|l| l.selling_price).sum();
        Some(total / self.listings.len() as f64)
    }

    /// Fraction of compared listings that sold below the predicted price.
    pub fn share_below_predicted(&self) -> Option<f64> {
        if self.listings.is_empty() {
            return None;
        }
        let below = self.listings.iter().filter(|l| l.delta < 0.0).count();
        Some(below as f64 / self.listings.len() as f64)
    }

    /// Headline numbers for the panel title and the CLI report.
    pub fn summary(&self) -> Option<MarketSummary> {
        Some(MarketSummary {
            listings: self.listings.len(),
            mean_price: self.mean_price()?,
            share_below_predicted: self.share_below_predicted()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketSummary {
    pub listings: usize,
    pub mean_price: f64,
    pub share_below_predicted: f64,
}
