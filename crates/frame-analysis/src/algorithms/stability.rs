//! Per-cell temporal stability

use crate::config::AnalysisConfig;
use crate::traits::{WindowAnalyzer, WindowAnalyzerProperties};
use crate::types::StabilityResult;
use crate::window::FrameWindow;
use frame_core::{guarded_ratio, Error, Result, RATIO_EPSILON};
use ndarray::{Axis, Zip};

/// Temporal mean, spread and coefficient of variation of every cell
///
/// All statistics are taken along the time axis of the stacked window in
/// one pass over the tensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityEngine {
    pub min_frames: usize,

    /// cv above which a cell counts as unstable
    pub stability_threshold: f64,
}

impl StabilityEngine {
    pub fn new(min_frames: usize, stability_threshold: f64) -> Self {
        Self {
            min_frames,
            stability_threshold,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.min_frames_for_stability, config.stability_threshold)
    }
}

impl Default for StabilityEngine {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl WindowAnalyzerProperties for StabilityEngine {
    fn minimum_frames(&self) -> usize {
        self.min_frames
    }

    fn method_name(&self) -> &str {
        "stability"
    }
}

impl WindowAnalyzer for StabilityEngine {
    type Output = StabilityResult;

    fn analyze_window(&self, window: &FrameWindow) -> Result<Option<StabilityResult>> {
        if window.is_empty() || !self.can_handle_len(window.len()) {
            return Ok(None);
        }

        let stack = window.stack();
        let mean_map = stack
            .mean_axis(Axis(0))
            .ok_or_else(|| Error::Computation("temporal mean of an empty window".to_string()))?;
        let variance_map = stack.var_axis(Axis(0), 0.0);

        let cv_map = Zip::from(&variance_map)
            .and(&mean_map)
            .map_collect(|&var, &mean| guarded_ratio(var.sqrt(), mean, RATIO_EPSILON));
        let stability_map = cv_map.mapv(|cv| (1.0 - cv).max(0.0));

        let threshold = self.stability_threshold;
        let unstable_sensors = cv_map.iter().filter(|&&cv| cv > threshold).count();

        Ok(Some(StabilityResult {
            mean_stability: stability_map.mean().unwrap_or(0.0),
            mean_variance: variance_map.mean().unwrap_or(0.0),
            mean_cv: cv_map.mean().unwrap_or(0.0),
            unstable_sensors,
            stability_map,
            variance_map,
            cv_map,
        }))
    }
}
