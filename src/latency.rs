//! Timing of `predict_price` calls, summarised for the TUI footer.

use std::sync::Mutex;
use std::time::Duration;

use hdrhistogram::Histogram;

use crate::error::{AppError, Result};

/// Slowest prediction the histogram can hold, in microseconds.
const MAX_PREDICTION_US: u64 = 10_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencySummary {
    pub samples: u64,
    pub p50_us: u64,
    pub p99_us: u64,
}

pub struct PredictionLatency {
    histogram: Mutex<Histogram<u64>>,
}

impl PredictionLatency {
    pub fn new() -> Result<Self> {
        let histogram = Histogram::new_with_bounds(1, MAX_PREDICTION_US, 3)
            .map_err(|e| AppError::Config(format!("latency histogram: {e}")))?;
        Ok(Self {
            histogram: Mutex::new(histogram),
        })
    }

    /// Slower-than-range predictions are saturated to the ceiling; a call
    /// faster than a microsecond is counted as one.
    pub fn observe(&self, elapsed: Duration) {
        let us = u64::try_from(elapsed.as_micros())
            .unwrap_or(u64::MAX)
            .clamp(1, MAX_PREDICTION_US);
        if let Ok(mut h) = self.histogram.lock() {
            h.saturating_record(us);
        }
    }

    pub fn summary(&self) -> Option<LatencySummary> {
        let h = self.histogram.lock().ok()?;
        let samples = h.len();
        if samples == 0 {
            return None;
        }
        Some(LatencySummary {
            samples,
            p50_us: h.value_at_quantile(0.5),
            p99_us: h.value_at_quantile(0.99),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_predictions_no_summary() {
        let l = PredictionLatency::new().unwrap();
        assert_eq!(l.summary(), None);
    }

    #[test]
    fn summary_reports_median_and_tail() {
        let l = PredictionLatency::new().unwrap();
        for us in [10, 20, 30, 40, 1000] {
            l.observe(Duration::from_micros(us));
        }
        let s = l.summary().unwrap();
        assert_eq!(s.samples, 5);
        assert_eq!(s.p50_us, 30);
        assert!(s.p99_us >= 999);
    }

    #[test]
    fn instant_and_stalled_predictions_are_kept() {
        let l = PredictionLatency::new().unwrap();
        l.observe(Duration::ZERO);
        l.observe(Duration::from_secs(3600));
        let s = l.summary().unwrap();
        assert_eq!(s.samples, 2);
        assert!(s.p99_us >= MAX_PREDICTION_US - MAX_PREDICTION_US / 1000);
    }
}
