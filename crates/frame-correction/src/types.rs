//! Parameter and statistics types for frame correction

use frame_core::numeric::clamp_checked;
use frame_core::Result;
use serde::{Deserialize, Serialize};

/// Parameters of the correction filter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionParameters {
    /// Pass-through when false
    pub enabled: bool,

    /// Weight of the previous frame in `[0, 1]`
    pub smoothing_factor: f64,

    /// Mean absolute change above which a frame is smoothed
    pub correction_threshold: f64,
}

impl Default for CorrectionParameters {
    fn default() -> Self {
        Self {
            enabled: false,
            smoothing_factor: 0.7,
            correction_threshold: 0.001,
        }
    }
}

impl CorrectionParameters {
    /// Enabled filter with the given smoothing and threshold
    pub fn enabled(smoothing_factor: f64, correction_threshold: f64) -> Self {
        Self {
            enabled: true,
            smoothing_factor,
            correction_threshold,
        }
    }

    /// Clamp both numeric fields into range, rejecting NaN
    pub fn sanitized(self) -> Result<Self> {
        Ok(Self {
            enabled: self.enabled,
            smoothing_factor: clamp_checked("smoothing_factor", self.smoothing_factor, 0.0, 1.0)?,
            correction_threshold: clamp_checked(
                "correction_threshold",
                self.correction_threshold,
                0.0,
                f64::INFINITY,
            )?,
        })
    }
}

/// Snapshot of the filter's settings and counters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrectionStats {
    pub correction_enabled: bool,
    pub smoothing_factor: f64,
    pub correction_threshold: f64,

    /// Whether a previous frame is held
    pub initialized: bool,

    /// Frames passed through `correct_frame` since the last reset
    pub frames_processed: u64,

    /// Frames that were smoothed since the last reset
    pub frames_corrected: u64,
}
