//! Analysis engines run over a frame window

mod anomaly;
mod difference;
mod noise;
mod stability;

pub use anomaly::AnomalyDetector;
pub use difference::DifferenceEngine;
pub use noise::{NoiseAnalyzer, MIN_POWER_SAMPLES, MIN_SPECTRUM_SAMPLES};
pub use stability::StabilityEngine;

/// Arithmetic mean, 0 for an empty slice
fn mean_of(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Largest value, 0 for an empty input
fn max_of<'a, I: IntoIterator<Item = &'a f64>>(values: I) -> f64 {
    values
        .into_iter()
        .copied()
        .reduce(f64::max)
        .unwrap_or(0.0)
}
