use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use carvalue::config::Config;
use carvalue::dataset::{Comparison, Dataset, MarketSummary};
use carvalue::error::Result;
use carvalue::{CarForm, PredictionResult, PricePredictor, RawCarInput};

#[derive(Serialize)]
struct Report {
    prediction: PredictionResult,
    comparison: Option<Comparison>,
    market: Option<MarketSummary>,
}

fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    // stdout carries the JSON report.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cfg) {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

fn run(cfg: Config) -> Result<()> {
    // --- Artifacts: must load before any request is read ---
    let predictor = PricePredictor::load(&cfg)?;
    info!(current_year = predictor.current_year(), "Predictor ready");

    // --- Historical listings: optional, only feed the comparison ---
    let dataset = if Path::new(&cfg.dataset_path).exists() {
        Some(Dataset::load(&cfg.dataset_path)?)
    } else {
        warn!("Dataset {} not found; comparison disabled", cfg.dataset_path);
        None
    };

    // --- Request: path argument or stdin ---
    let form = read_request(std::env::args().nth(1))?;
    let input = RawCarInput::from_form(&form)?;
    let prediction = predictor.evaluate(&input)?;

    info!(
        event = "PREDICTION",
        brand = %input.brand,
        year = input.year,
        km_driven = input.km_driven,
        price = prediction.price,
        "PREDICTION | {} {} | price: {:.0} | per km: {:.1} | condition: {}%",
        input.brand,
        input.year,
        prediction.price,
        prediction.price_per_km,
        prediction.condition_percent,
    );

    let comparison = dataset
        .as_ref()
        .map(|d| d.comparison(input.brand, prediction.price, cfg.comparison_limit));
    if let Some(c) = &comparison {
        if c.fallback {
            info!("No {} listings in dataset; comparing against a generic sample", c.brand);
        }
    }
    let market = comparison.as_ref().and_then(Comparison::summary);

    let report = Report {
        prediction,
        comparison,
        market,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn read_request(path: Option<String>) -> Result<CarForm> {
    let text = match path {
        Some(p) if p != "-" => std::fs::read_to_string(p)?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&text)?)
}
