//! Consecutive frame-to-frame differences

use super::{max_of, mean_of};
use crate::traits::{WindowAnalyzer, WindowAnalyzerProperties};
use crate::types::FrameDifferenceResult;
use crate::window::FrameWindow;
use frame_core::{guarded_ratio, Result, RATIO_EPSILON};
use ndarray::{s, Zip};

/// Absolute and relative differences between each frame and its predecessor
#[derive(Debug, Clone, Copy, Default)]
pub struct DifferenceEngine;

impl DifferenceEngine {
    pub fn new() -> Self {
        Self
    }
}

impl WindowAnalyzerProperties for DifferenceEngine {
    fn minimum_frames(&self) -> usize {
        2
    }

    fn method_name(&self) -> &str {
        "frame_difference"
    }
}

impl WindowAnalyzer for DifferenceEngine {
    type Output = FrameDifferenceResult;

    fn analyze_window(&self, window: &FrameWindow) -> Result<Option<FrameDifferenceResult>> {
        if !self.can_handle_len(window.len()) {
            return Ok(None);
        }

        let absolute = window.abs_differences();
        let stack = window.stack();
        let previous = stack.slice(s![..-1, .., ..]);
        let relative = Zip::from(&absolute)
            .and(&previous)
            .map_collect(|&diff, &prev| guarded_ratio(diff, prev, RATIO_EPSILON));

        let pair_mean_abs_diffs: Vec<f64> = absolute
            .outer_iter()
            .map(|pair| pair.mean().unwrap_or(0.0))
            .collect();
        let pair_mean_rel_diffs: Vec<f64> = relative
            .outer_iter()
            .map(|pair| pair.mean().unwrap_or(0.0))
            .collect();

        Ok(Some(FrameDifferenceResult {
            mean_abs_diff: mean_of(&pair_mean_abs_diffs),
            max_abs_diff: max_of(absolute.iter()),
            max_pair_mean_abs_diff: max_of(&pair_mean_abs_diffs),
            mean_rel_diff: mean_of(&pair_mean_rel_diffs),
            max_rel_diff: max_of(relative.iter()),
            max_pair_mean_rel_diff: max_of(&pair_mean_rel_diffs),
            absolute_differences: absolute.to_owned(),
            relative_differences: relative,
            pair_mean_abs_diffs,
            pair_mean_rel_diffs,
        }))
    }
}
