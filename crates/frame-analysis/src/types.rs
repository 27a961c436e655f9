//! Result types produced by the analysis engines

use crate::scoring::ConsistencyScore;
use frame_core::FrameShape;
use ndarray::{Array2, Array3};
use serde::Serialize;
use std::time::SystemTime;

/// Consecutive-pair differences across the window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameDifferenceResult {
    /// `|frame[i] - frame[i-1]|`, one slice per pair
    pub absolute_differences: Array3<f64>,

    /// Absolute difference over the earlier frame, 0 where that frame is near zero
    pub relative_differences: Array3<f64>,

    /// Mean absolute difference of each pair
    pub pair_mean_abs_diffs: Vec<f64>,

    /// Mean relative difference of each pair
    pub pair_mean_rel_diffs: Vec<f64>,

    /// Mean over pairs of the per-pair mean absolute difference
    pub mean_abs_diff: f64,

    /// Largest single-cell absolute difference
    pub max_abs_diff: f64,

    /// Largest per-pair mean absolute difference
    pub max_pair_mean_abs_diff: f64,

    /// Mean over pairs of the per-pair mean relative difference
    pub mean_rel_diff: f64,

    /// Largest single-cell relative difference
    pub max_rel_diff: f64,

    /// Largest per-pair mean relative difference
    pub max_pair_mean_rel_diff: f64,
}

impl FrameDifferenceResult {
    /// Number of consecutive pairs analyzed
    pub fn pair_count(&self) -> usize {
        self.pair_mean_abs_diffs.len()
    }
}

/// Per-cell temporal stability
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StabilityResult {
    /// `max(0, 1 - cv)` per cell
    pub stability_map: Array2<f64>,

    /// Temporal variance per cell (population)
    pub variance_map: Array2<f64>,

    /// Coefficient of variation per cell, 0 where the mean is near zero
    pub cv_map: Array2<f64>,

    pub mean_stability: f64,
    pub mean_variance: f64,
    pub mean_cv: f64,

    /// Cells whose cv exceeds the stability threshold
    pub unstable_sensors: usize,
}

/// Per-cell noise power and dominant frequency
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoiseResult {
    /// Temporal variance per cell
    pub noise_power_map: Array2<f64>,

    /// Dominant frequency per cell in cycles per frame, 0 for short windows
    pub noise_frequency_map: Array2<f64>,

    pub mean_noise_power: f64,
    pub mean_noise_frequency: f64,

    /// Cells whose noise power exceeds the mean power times the noise threshold
    pub high_noise_sensors: usize,
}

/// A frame that changed sharply and uniformly relative to its predecessor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyRecord {
    /// Position of the frame in the window, oldest = 0
    pub frame_index: usize,

    /// `mean / (std + ε)` of the difference to the previous frame
    pub anomaly_score: f64,

    pub mean_difference: f64,
    pub max_difference: f64,

    /// Approximate capture time, back-dated by the configured frame
    /// interval; reliable only as an ordering
    pub timestamp: SystemTime,
}

/// Flat scalar view of one analysis, for reporting
///
/// Components that were not computed report zeros.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_frames: usize,
    pub consistency_score: f64,
    pub analysis_time: SystemTime,
    pub mean_frame_difference: f64,
    pub max_frame_difference: f64,
    pub mean_relative_difference: f64,
    pub mean_stability: f64,
    pub mean_variance: f64,
    pub unstable_sensors: usize,
    pub mean_noise_power: f64,
    pub high_noise_sensors: usize,
    pub anomaly_frame_count: usize,

    /// Anomalies per frame in the window
    pub anomaly_rate: f64,
}

impl SummaryStats {
    /// Flatten the component results of one analysis
    pub fn from_components(
        total_frames: usize,
        consistency_score: ConsistencyScore,
        analysis_time: SystemTime,
        differences: Option<&FrameDifferenceResult>,
        stability: Option<&StabilityResult>,
        noise: Option<&NoiseResult>,
        anomalies: &[AnomalyRecord],
    ) -> Self {
        Self {
            total_frames,
            consistency_score: consistency_score.value(),
            analysis_time,
            mean_frame_difference: differences.map_or(0.0, |d| d.mean_abs_diff),
            max_frame_difference: differences.map_or(0.0, |d| d.max_abs_diff),
            mean_relative_difference: differences.map_or(0.0, |d| d.mean_rel_diff),
            mean_stability: stability.map_or(0.0, |s| s.mean_stability),
            mean_variance: stability.map_or(0.0, |s| s.mean_variance),
            unstable_sensors: stability.map_or(0, |s| s.unstable_sensors),
            mean_noise_power: noise.map_or(0.0, |n| n.mean_noise_power),
            high_noise_sensors: noise.map_or(0, |n| n.high_noise_sensors),
            anomaly_frame_count: anomalies.len(),
            anomaly_rate: anomalies.len() as f64 / total_frames.max(1) as f64,
        }
    }
}

/// Everything one analysis pass produced
///
/// Each component is `None` when its minimum-frame floor was not met.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub frame_differences: Option<FrameDifferenceResult>,
    pub stability_metrics: Option<StabilityResult>,
    pub anomaly_frames: Vec<AnomalyRecord>,
    pub noise_characteristics: Option<NoiseResult>,
    pub consistency_score: ConsistencyScore,
    pub summary_stats: Option<SummaryStats>,
}

impl AnalysisResult {
    /// Result for a window below the overall analysis floor
    pub fn empty() -> Self {
        Self {
            frame_differences: None,
            stability_metrics: None,
            anomaly_frames: Vec::new(),
            noise_characteristics: None,
            consistency_score: ConsistencyScore::ZERO,
            summary_stats: None,
        }
    }

    /// Whether no analysis ran at all
    pub fn is_empty(&self) -> bool {
        self.summary_stats.is_none()
    }
}

/// Window size and memory footprint of an analyzer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceStats {
    pub frame_history_size: usize,

    /// `frames * height * width * 8` bytes
    pub memory_usage_estimate: usize,

    /// Completed analyses since construction or the last history clear
    pub analysis_count: u64,

    pub last_analysis_time: Option<SystemTime>,

    /// Present once a frame is stored
    pub frame_shape: Option<FrameShape>,

    /// Element type of stored frames, present once a frame is stored
    pub data_type: Option<&'static str>,
}
