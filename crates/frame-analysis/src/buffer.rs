//! Bounded FIFO history of frames

use crate::window::FrameWindow;
use frame_core::{Error, Frame, FrameShape, IntoFrame, Result};
use std::collections::VecDeque;
use std::time::SystemTime;
use tracing::debug;

/// Insertion-ordered window of the most recent frames
///
/// The first accepted frame fixes the shape for every later frame until
/// [`FrameBuffer::clear`] is called. Once the buffer is full each insert
/// evicts the single oldest frame.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    frames: VecDeque<Frame>,
    capacity: usize,
    shape: Option<FrameShape>,
}

impl FrameBuffer {
    /// Create an empty buffer holding at most `capacity` frames
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidParameter(
                "frame buffer capacity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            frames: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            shape: None,
        })
    }

    /// Validate and store an owned copy of `frame`
    ///
    /// Returns the evicted frame, if the insert pushed the buffer over
    /// capacity. On error the buffer is unchanged.
    pub fn push<F: IntoFrame>(&mut self, frame: F) -> Result<Option<Frame>> {
        let frame = frame.into_frame()?;
        if let Some(expected) = self.shape {
            frame.ensure_shape(expected)?;
        }

        self.shape.get_or_insert(frame.shape());
        self.frames.push_back(frame);

        let evicted = if self.frames.len() > self.capacity {
            self.frames.pop_front()
        } else {
            None
        };
        debug!(
            len = self.frames.len(),
            evicted = evicted.is_some(),
            "frame added to history"
        );
        Ok(evicted)
    }

    /// Drop every frame and forget the established shape
    pub fn clear(&mut self) {
        self.frames.clear();
        self.shape = None;
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity, evicting the oldest frames if now over it
    ///
    /// Returns the number of frames evicted.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<usize> {
        if capacity == 0 {
            return Err(Error::InvalidParameter(
                "frame buffer capacity must be at least 1".to_string(),
            ));
        }
        self.capacity = capacity;
        let excess = self.frames.len().saturating_sub(capacity);
        self.frames.drain(..excess);
        if excess > 0 {
            debug!(evicted = excess, capacity, "history shrunk");
        }
        Ok(excess)
    }

    /// Shape shared by all stored frames, once one has been accepted
    pub fn shape(&self) -> Option<FrameShape> {
        self.shape
    }

    /// Frames from oldest to newest
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Frame> + '_ {
        self.frames.iter()
    }

    pub fn oldest(&self) -> Option<&Frame> {
        self.frames.front()
    }

    pub fn latest(&self) -> Option<&Frame> {
        self.frames.back()
    }

    /// Stack the current contents into an analysis window
    ///
    /// Fails for an empty buffer.
    pub fn window(&self, captured_at: SystemTime) -> Result<FrameWindow> {
        FrameWindow::from_frames(self.frames.iter(), captured_at)
    }
}
