//! Weighted 0-10 consistency score
//!
//! [`consistency_score`] starts from 10 and walks the four components in a
//! fixed order. For each component present it removes that weight's full
//! share (`weight * 10`) and adds back the share the component earned. A
//! missing component is skipped, so its full share stays in the score. The
//! anomaly penalty is subtracted last and the total is clamped to `[0, 10]`.
//!
//! The steps are order-sensitive in floating point and are kept as literal
//! sequential updates.

use crate::config::ConsistencyWeights;
use crate::types::{AnomalyRecord, FrameDifferenceResult, NoiseResult, StabilityResult};
use serde::Serialize;
use std::fmt;

/// Upper bound of the score scale
pub const MAX_SCORE: f64 = 10.0;

/// Scale applied to mean differences and noise power before subtracting
const MAGNITUDE_SCALE: f64 = 1000.0;

/// Penalty per anomalous frame, capped at the anomaly weight's share
const ANOMALY_PENALTY: f64 = 0.2;

/// Raw metrics the score is computed from
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreInputs {
    pub mean_abs_diff: Option<f64>,
    pub mean_stability: Option<f64>,
    pub mean_noise_power: Option<f64>,
    pub anomaly_count: usize,
}

impl ScoreInputs {
    /// Collect the metrics from component results
    pub fn from_results(
        differences: Option<&FrameDifferenceResult>,
        stability: Option<&StabilityResult>,
        noise: Option<&NoiseResult>,
        anomalies: &[AnomalyRecord],
    ) -> Self {
        Self {
            mean_abs_diff: differences.map(|d| d.mean_abs_diff),
            mean_stability: stability.map(|s| s.mean_stability),
            mean_noise_power: noise.map(|n| n.mean_noise_power),
            anomaly_count: anomalies.len(),
        }
    }
}

/// Combine the component metrics into one score
pub fn consistency_score(inputs: &ScoreInputs, weights: &ConsistencyWeights) -> ConsistencyScore {
    let mut score = MAX_SCORE;

    if let Some(mean_diff) = inputs.mean_abs_diff {
        let diff_score = (weights.frame_difference * 10.0 - mean_diff * MAGNITUDE_SCALE).max(0.0);
        score = score - weights.frame_difference * 10.0 + diff_score;
    }

    if let Some(stability) = inputs.mean_stability {
        let stability_score = stability * weights.stability * 10.0;
        score = score - weights.stability * 10.0 + stability_score;
    }

    if let Some(noise_power) = inputs.mean_noise_power {
        let noise_score = (weights.noise * 10.0 - noise_power * MAGNITUDE_SCALE).max(0.0);
        score = score - weights.noise * 10.0 + noise_score;
    }

    let anomaly_penalty =
        (weights.anomaly * 10.0).min(inputs.anomaly_count as f64 * ANOMALY_PENALTY);
    score -= anomaly_penalty;

    ConsistencyScore::new(score)
}

/// A score in `[0, 10]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ConsistencyScore(f64);

impl ConsistencyScore {
    pub const ZERO: Self = Self(0.0);

    /// Clamp `raw` into `[0, 10]`; NaN maps to 0
    pub fn new(raw: f64) -> Self {
        if raw.is_nan() {
            return Self::ZERO;
        }
        Self(raw.clamp(0.0, MAX_SCORE))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn grade(self) -> ConsistencyGrade {
        ConsistencyGrade::from_score(self.0)
    }
}

impl Default for ConsistencyScore {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<ConsistencyScore> for f64 {
    fn from(score: ConsistencyScore) -> Self {
        score.0
    }
}

impl fmt::Display for ConsistencyScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}/10", self.0)
    }
}

/// Qualitative band of a consistency score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ConsistencyGrade {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl ConsistencyGrade {
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            Self::Excellent
        } else if score >= 6.0 {
            Self::Good
        } else if score >= 4.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }
}

impl fmt::Display for ConsistencyGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
