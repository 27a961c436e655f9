//! Analysis configuration
//!
//! [`AnalysisConfig`] is a plain value: an analyzer owns its copy and only
//! replaces it wholesale. Partial changes go through [`ConfigUpdate`], which
//! is merged field by field into a new config and validated before the
//! analyzer adopts it.

use frame_core::numeric::ensure_non_negative;
use frame_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Weights of the four score components, expected to sum to about 1.0
///
/// The weights are used exactly as given; they are never renormalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsistencyWeights {
    pub frame_difference: f64,
    pub stability: f64,
    pub noise: f64,
    pub anomaly: f64,
}

impl Default for ConsistencyWeights {
    fn default() -> Self {
        Self {
            frame_difference: 0.4,
            stability: 0.3,
            noise: 0.2,
            anomaly: 0.1,
        }
    }
}

impl ConsistencyWeights {
    /// Sum of all four weights
    pub fn total(&self) -> f64 {
        self.frame_difference + self.stability + self.noise + self.anomaly
    }

    fn validate(&self) -> Result<()> {
        ensure_non_negative("consistency_weights.frame_difference", self.frame_difference)?;
        ensure_non_negative("consistency_weights.stability", self.stability)?;
        ensure_non_negative("consistency_weights.noise", self.noise)?;
        ensure_non_negative("consistency_weights.anomaly", self.anomaly)?;
        Ok(())
    }
}

/// Parameters for frame-consistency analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Capacity of the history window
    pub max_history_size: usize,

    /// Anomaly score above which a frame is reported
    pub anomaly_threshold: f64,

    /// Coefficient of variation above which a cell counts as unstable
    pub stability_threshold: f64,

    /// Multiple of the mean noise power above which a cell counts as noisy
    pub noise_threshold: f64,

    /// Frames required before any analysis is produced
    pub min_frames_for_analysis: usize,

    /// Frames required for the stability analysis
    pub min_frames_for_stability: usize,

    /// Frames required for anomaly detection
    pub min_frames_for_anomaly: usize,

    /// Frames required for the noise analysis
    pub min_frames_for_noise: usize,

    pub consistency_weights: ConsistencyWeights,

    /// Assumed spacing between frames, used to back-date anomaly timestamps
    pub frame_interval: Duration,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_history_size: 100,
            anomaly_threshold: 3.0,
            stability_threshold: 0.1,
            noise_threshold: 0.3,
            min_frames_for_analysis: 2,
            min_frames_for_stability: 3,
            min_frames_for_anomaly: 5,
            min_frames_for_noise: 3,
            consistency_weights: ConsistencyWeights::default(),
            frame_interval: Duration::from_secs(1),
        }
    }
}

impl AnalysisConfig {
    /// Check every field, returning the first violation
    pub fn validate(&self) -> Result<()> {
        if self.max_history_size == 0 {
            return Err(Error::InvalidParameter(
                "max_history_size must be at least 1".to_string(),
            ));
        }
        ensure_non_negative("anomaly_threshold", self.anomaly_threshold)?;
        ensure_non_negative("stability_threshold", self.stability_threshold)?;
        ensure_non_negative("noise_threshold", self.noise_threshold)?;
        self.consistency_weights.validate()?;
        if self.frame_interval.is_zero() {
            return Err(Error::InvalidParameter(
                "frame_interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// New validated config with `update` applied on top of `self`
    ///
    /// `self` is left untouched whether or not the merge succeeds.
    pub fn merged(&self, update: &ConfigUpdate) -> Result<Self> {
        let mut next = self.clone();

        if let Some(v) = update.max_history_size {
            next.max_history_size = v;
        }
        if let Some(v) = update.anomaly_threshold {
            next.anomaly_threshold = v;
        }
        if let Some(v) = update.stability_threshold {
            next.stability_threshold = v;
        }
        if let Some(v) = update.noise_threshold {
            next.noise_threshold = v;
        }
        if let Some(v) = update.min_frames_for_analysis {
            next.min_frames_for_analysis = v;
        }
        if let Some(v) = update.min_frames_for_stability {
            next.min_frames_for_stability = v;
        }
        if let Some(v) = update.min_frames_for_anomaly {
            next.min_frames_for_anomaly = v;
        }
        if let Some(v) = update.min_frames_for_noise {
            next.min_frames_for_noise = v;
        }
        if let Some(weights) = &update.consistency_weights {
            let w = &mut next.consistency_weights;
            if let Some(v) = weights.frame_difference {
                w.frame_difference = v;
            }
            if let Some(v) = weights.stability {
                w.stability = v;
            }
            if let Some(v) = weights.noise {
                w.noise = v;
            }
            if let Some(v) = weights.anomaly {
                w.anomaly = v;
            }
        }
        if let Some(v) = update.frame_interval {
            next.frame_interval = v;
        }

        next.validate()?;
        Ok(next)
    }
}

/// Partial override of [`ConsistencyWeights`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeightsUpdate {
    pub frame_difference: Option<f64>,
    pub stability: Option<f64>,
    pub noise: Option<f64>,
    pub anomaly: Option<f64>,
}

/// Partial override of [`AnalysisConfig`]; unset fields keep their value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigUpdate {
    pub max_history_size: Option<usize>,
    pub anomaly_threshold: Option<f64>,
    pub stability_threshold: Option<f64>,
    pub noise_threshold: Option<f64>,
    pub min_frames_for_analysis: Option<usize>,
    pub min_frames_for_stability: Option<usize>,
    pub min_frames_for_anomaly: Option<usize>,
    pub min_frames_for_noise: Option<usize>,
    pub consistency_weights: Option<WeightsUpdate>,
    pub frame_interval: Option<Duration>,
}

impl ConfigUpdate {
    /// Parse an update from JSON such as `{"anomaly_threshold": 2.5}`
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::InvalidParameter(format!("config update: {e}")))
    }

    pub fn with_max_history_size(mut self, size: usize) -> Self {
        self.max_history_size = Some(size);
        self
    }

    pub fn with_anomaly_threshold(mut self, threshold: f64) -> Self {
        self.anomaly_threshold = Some(threshold);
        self
    }

    pub fn with_stability_threshold(mut self, threshold: f64) -> Self {
        self.stability_threshold = Some(threshold);
        self
    }

    pub fn with_noise_threshold(mut self, threshold: f64) -> Self {
        self.noise_threshold = Some(threshold);
        self
    }

    /// Set all four minimum-frame floors at once
    pub fn with_min_frames(
        mut self,
        analysis: usize,
        stability: usize,
        anomaly: usize,
        noise: usize,
    ) -> Self {
        self.min_frames_for_analysis = Some(analysis);
        self.min_frames_for_stability = Some(stability);
        self.min_frames_for_anomaly = Some(anomaly);
        self.min_frames_for_noise = Some(noise);
        self
    }

    pub fn with_weights(mut self, weights: ConsistencyWeights) -> Self {
        self.consistency_weights = Some(WeightsUpdate {
            frame_difference: Some(weights.frame_difference),
            stability: Some(weights.stability),
            noise: Some(weights.noise),
            anomaly: Some(weights.anomaly),
        });
        self
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = Some(interval);
        self
    }
}
