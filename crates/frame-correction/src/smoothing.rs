//! One-step exponential smoothing of a frame stream
//!
//! The filter holds only the last frame it returned. When enabled, a frame
//! whose mean absolute change from that frame exceeds the threshold is
//! replaced by
//!
//! ```text
//! corrected = s * previous + (1 - s) * frame
//! ```
//!
//! where `s` is the smoothing factor. Smaller changes pass through untouched.

use crate::traits::OnlineFrameFilter;
use crate::types::{CorrectionParameters, CorrectionStats};
use frame_core::numeric::clamp_checked;
use frame_core::{Frame, IntoFrame, Result};
use ndarray::Zip;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
enum CorrectionState {
    Uninitialized,
    Initialized { previous_frame: Frame },
}

/// Stateful exponential-smoothing filter for a stream of frames
///
/// Independent of the analysis pipeline: frames are fed in one at a time and
/// a corrected frame comes straight back.
#[derive(Debug, Clone)]
pub struct FrameCorrectionSystem {
    params: CorrectionParameters,
    state: CorrectionState,
    frames_processed: u64,
    frames_corrected: u64,
}

impl FrameCorrectionSystem {
    /// Disabled filter with default smoothing and threshold
    pub fn new() -> Self {
        Self {
            params: CorrectionParameters::default(),
            state: CorrectionState::Uninitialized,
            frames_processed: 0,
            frames_corrected: 0,
        }
    }

    /// Filter with `params`, clamped into range
    pub fn with_parameters(params: CorrectionParameters) -> Result<Self> {
        Ok(Self {
            params: params.sanitized()?,
            ..Self::new()
        })
    }

    /// Correct one frame
    ///
    /// While disabled, or before any frame has been seen, `frame` is stored
    /// and returned unchanged. Otherwise it is smoothed against the stored
    /// frame if it changed by more than the threshold, and the result is
    /// stored for the next call. A frame shaped differently from the stored
    /// one is rejected and the state is left as it was.
    pub fn correct_frame<F: IntoFrame>(&mut self, frame: F) -> Result<Frame> {
        let frame = frame.into_frame()?;

        let previous = match &self.state {
            CorrectionState::Initialized { previous_frame } if self.params.enabled => {
                previous_frame
            }
            _ => {
                self.store(frame.clone());
                return Ok(frame);
            }
        };

        let change = frame.mean_abs_diff(previous)?;
        let corrected = if change > self.params.correction_threshold {
            let s = self.params.smoothing_factor;
            let smoothed = Zip::from(previous.data())
                .and(frame.data())
                .map_collect(|&prev, &curr| s * prev + (1.0 - s) * curr);
            self.frames_corrected += 1;
            debug!(change, smoothing_factor = s, "frame smoothed");
            Frame::new(smoothed)?
        } else {
            frame
        };

        self.store(corrected.clone());
        Ok(corrected)
    }

    fn store(&mut self, frame: Frame) {
        self.frames_processed += 1;
        self.state = CorrectionState::Initialized {
            previous_frame: frame,
        };
    }

    /// Turn smoothing on or off; the stored frame is kept either way
    pub fn enable_correction(&mut self, enabled: bool) {
        self.params.enabled = enabled;
        info!(enabled, "frame correction toggled");
    }

    /// Set the smoothing factor, clamped to `[0, 1]`
    pub fn set_smoothing_factor(&mut self, factor: f64) -> Result<()> {
        self.params.smoothing_factor = clamp_checked("smoothing_factor", factor, 0.0, 1.0)?;
        Ok(())
    }

    /// Set the correction threshold, clamped to be non-negative
    pub fn set_correction_threshold(&mut self, threshold: f64) -> Result<()> {
        self.params.correction_threshold =
            clamp_checked("correction_threshold", threshold, 0.0, f64::INFINITY)?;
        Ok(())
    }

    /// Drop the stored frame and counters; settings are kept
    pub fn reset(&mut self) {
        self.state = CorrectionState::Uninitialized;
        self.frames_processed = 0;
        self.frames_corrected = 0;
        info!("frame correction reset");
    }

    pub fn correction_stats(&self) -> CorrectionStats {
        CorrectionStats {
            correction_enabled: self.params.enabled,
            smoothing_factor: self.params.smoothing_factor,
            correction_threshold: self.params.correction_threshold,
            initialized: self.is_initialized(),
            frames_processed: self.frames_processed,
            frames_corrected: self.frames_corrected,
        }
    }

    pub fn parameters(&self) -> &CorrectionParameters {
        &self.params
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.state, CorrectionState::Initialized { .. })
    }

    /// Frame the next call is compared against
    pub fn previous_frame(&self) -> Option<&Frame> {
        match &self.state {
            CorrectionState::Initialized { previous_frame } => Some(previous_frame),
            CorrectionState::Uninitialized => None,
        }
    }
}

impl Default for FrameCorrectionSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl OnlineFrameFilter for FrameCorrectionSystem {
    fn process_frame<F: IntoFrame>(&mut self, frame: F) -> Result<Frame> {
        self.correct_frame(frame)
    }

    fn reset(&mut self) {
        FrameCorrectionSystem::reset(self);
    }

    fn frames_processed(&self) -> u64 {
        self.frames_processed
    }
}
