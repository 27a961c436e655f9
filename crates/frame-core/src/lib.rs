//! Core types for frame-consistency analysis
//!
//! This crate provides the pieces every other crate in the workspace builds on:
//!
//! - [`Frame`]: a validated, non-empty 2D sensor reading
//! - [`IntoFrame`]: conversion from arrays, row lists and optional inputs
//! - [`Error`] / [`ValidationError`]: the shared error vocabulary
//! - [`numeric`]: epsilon-guarded ratios and parameter checks
//!
//! # Example
//!
//! ```rust
//! use frame_core::{Frame, FrameShape, IntoFrame};
//!
//! let frame = vec![vec![0.0, 0.5], vec![1.0, 1.5]].into_frame().unwrap();
//! assert_eq!(frame.shape(), FrameShape::new(2, 2));
//! assert_eq!(frame.mean(), 0.75);
//! ```

pub mod error;
pub mod frame;
pub mod numeric;

pub use error::{Error, Result, ValidationError};
pub use frame::{Frame, FrameShape, IntoFrame};
pub use numeric::{guarded_ratio, ANOMALY_EPSILON, RATIO_EPSILON};
