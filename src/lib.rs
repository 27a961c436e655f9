//! # Frame Consistency
//!
//! Temporal-consistency diagnostics and streaming correction for grid
//! pressure sensors.
//!
//! This crate re-exports the workspace crates:
//!
//! - [`frame_core`]: validated frames, errors and numeric guards
//! - [`frame_spectrum`]: planned and batched FFT power spectra
//! - [`frame_analysis`]: sliding-window analysis and the 0-10 consistency score
//! - [`frame_correction`]: the exponential-smoothing correction filter
//!
//! ## Quick Start
//!
//! ```rust
//! use frame_consistency::prelude::*;
//! use ndarray::Array2;
//!
//! let mut analyzer = FrameConsistencyAnalyzer::with_defaults().unwrap();
//! let mut filter =
//!     FrameCorrectionSystem::with_parameters(CorrectionParameters::enabled(0.7, 0.001)).unwrap();
//!
//! for i in 0..12 {
//!     let raw = Array2::from_elem((8, 8), 0.1 + 0.01 * (i % 2) as f64);
//!     let corrected = filter.correct_frame(raw).unwrap();
//!     analyzer.add_frame(corrected).unwrap();
//! }
//!
//! let result = analyzer.analyze().unwrap();
//! let score = result.consistency_score;
//! assert!(score.value() > 0.0 && score.value() <= 10.0);
//! assert!(result.summary_stats.is_some());
//! ```

pub use frame_analysis;
pub use frame_core;
pub use frame_correction;
pub use frame_spectrum;

/// The types most callers need
pub mod prelude {
    pub use frame_analysis::{
        AnalysisConfig, AnalysisResult, AnomalyRecord, ConfigUpdate, ConsistencyGrade,
        ConsistencyScore, ConsistencyWeights, FrameConsistencyAnalyzer, PerformanceStats,
        SharedAnalyzer, SummaryStats,
    };
    pub use frame_core::{Error, Frame, FrameShape, IntoFrame, Result};
    pub use frame_correction::{CorrectionParameters, CorrectionStats, FrameCorrectionSystem};
}
