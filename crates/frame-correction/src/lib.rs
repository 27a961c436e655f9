//! Streaming frame correction
//!
//! [`FrameCorrectionSystem`] is a small stateful filter that suppresses
//! abrupt frame-to-frame jumps by blending each jumping frame with the last
//! frame it returned. It keeps a single previous frame and nothing else.
//!
//! # Usage
//!
//! ```rust
//! use frame_correction::{CorrectionParameters, FrameCorrectionSystem};
//! use ndarray::Array2;
//!
//! let mut filter =
//!     FrameCorrectionSystem::with_parameters(CorrectionParameters::enabled(0.5, 0.01)).unwrap();
//!
//! filter.correct_frame(Array2::from_elem((4, 4), 1.0)).unwrap();
//! let corrected = filter.correct_frame(Array2::from_elem((4, 4), 3.0)).unwrap();
//! assert_eq!(corrected.mean(), 2.0);
//! ```

pub mod smoothing;
pub mod traits;
pub mod types;

pub use smoothing::FrameCorrectionSystem;
pub use traits::OnlineFrameFilter;
pub use types::{CorrectionParameters, CorrectionStats};
