//! Core traits for window analysis engines
//!
//! Each engine reads one [`FrameWindow`] and produces its own result type.
//! An engine whose minimum-frame floor is not met returns `Ok(None)`: too
//! little data is an ordinary outcome, not an error.

use crate::window::FrameWindow;
use frame_core::Result;

/// Intrinsic properties of an engine that don't depend on the data
pub trait WindowAnalyzerProperties {
    /// Minimum number of frames required for analysis
    fn minimum_frames(&self) -> usize;

    /// Name of the analysis, used in logs
    fn method_name(&self) -> &str;

    /// Check if the engine can analyze a window of `frames` frames
    fn can_handle_len(&self, frames: usize) -> bool {
        frames >= self.minimum_frames()
    }
}

/// An analysis over a stacked window of frames
pub trait WindowAnalyzer: WindowAnalyzerProperties {
    type Output;

    /// Analyze `window`, or `Ok(None)` when it holds too few frames
    fn analyze_window(&self, window: &FrameWindow) -> Result<Option<Self::Output>>;
}
