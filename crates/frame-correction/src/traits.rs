//! Streaming frame filter trait

use frame_core::{Frame, IntoFrame, Result};

/// A filter fed one frame at a time that keeps state between frames
pub trait OnlineFrameFilter {
    /// Filter one frame, updating the internal state
    fn process_frame<F: IntoFrame>(&mut self, frame: F) -> Result<Frame>;

    /// Forget all state accumulated from earlier frames
    fn reset(&mut self);

    /// Frames processed since construction or the last reset
    fn frames_processed(&self) -> u64;
}
