//! Stacked snapshot of the history window
//!
//! Every engine reads the same [`FrameWindow`], a `(time, height, width)`
//! tensor built once per analysis, so all of them see one consistent view of
//! the history.

use frame_core::{Error, Frame, FrameShape, Result};
use ndarray::{s, Array3, ArrayView1, ArrayView2, ArrayView3, Axis};
use std::cell::OnceCell;
use std::time::SystemTime;

/// Frames of one analysis pass, stacked along the time axis
#[derive(Debug, Clone)]
pub struct FrameWindow {
    stack: Array3<f64>,
    captured_at: SystemTime,
    abs_diffs: OnceCell<Array3<f64>>,
}

impl FrameWindow {
    /// Stack `frames`, oldest first
    ///
    /// Fails if there are no frames or their shapes differ.
    pub fn from_frames<'a, I>(frames: I, captured_at: SystemTime) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Frame>,
    {
        let views: Vec<ArrayView2<'_, f64>> = frames.into_iter().map(Frame::view).collect();
        if views.is_empty() {
            return Err(Error::InvalidParameter(
                "a frame window needs at least one frame".to_string(),
            ));
        }
        let stack = ndarray::stack(Axis(0), &views)
            .map_err(|e| Error::Computation(format!("stacking frames: {e}")))?;
        Ok(Self::from_stack(stack, captured_at))
    }

    /// Wrap an existing `(time, height, width)` tensor
    pub fn from_stack(stack: Array3<f64>, captured_at: SystemTime) -> Self {
        Self {
            stack,
            captured_at,
            abs_diffs: OnceCell::new(),
        }
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.stack.len_of(Axis(0))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shape of each frame
    pub fn frame_shape(&self) -> FrameShape {
        let (_, height, width) = self.stack.dim();
        FrameShape::new(height, width)
    }

    /// When the window was taken; anomaly timestamps are back-dated from it
    pub fn captured_at(&self) -> SystemTime {
        self.captured_at
    }

    pub fn stack(&self) -> ArrayView3<'_, f64> {
        self.stack.view()
    }

    /// Frames from oldest to newest
    pub fn frames(&self) -> impl ExactSizeIterator<Item = ArrayView2<'_, f64>> + '_ {
        self.stack.outer_iter()
    }

    /// `|frame[i] - frame[i-1]|` for every consecutive pair, shape `(len-1, h, w)`
    ///
    /// Computed on first use and shared by every engine reading this window.
    /// Empty along the time axis for a single-frame window.
    pub fn abs_differences(&self) -> ArrayView3<'_, f64> {
        self.abs_diffs
            .get_or_init(|| {
                if self.len() < 2 {
                    let (_, height, width) = self.stack.dim();
                    return Array3::zeros((0, height, width));
                }
                let current = self.stack.slice(s![1.., .., ..]);
                let previous = self.stack.slice(s![..-1, .., ..]);
                (&current - &previous).mapv_into(f64::abs)
            })
            .view()
    }

    /// Each cell's time series, in row-major cell order
    pub fn cell_series(&self) -> impl Iterator<Item = ArrayView1<'_, f64>> + '_ {
        self.stack.lanes(Axis(0)).into_iter()
    }

    /// All cell time series back to back, cell-major, time fastest
    pub fn cell_major_samples(&self) -> Vec<f64> {
        self.stack.view().permuted_axes([1, 2, 0]).iter().copied().collect()
    }
}
