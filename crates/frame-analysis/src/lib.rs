//! # Frame Consistency Analysis
//!
//! Sliding-window diagnostics for a grid sensor that produces one 2D frame
//! per sampling tick. Frames are pushed into a bounded history; each
//! analysis stacks the history into a `(time, height, width)` tensor and
//! derives:
//!
//! - **Frame differences**: absolute and relative change between
//!   consecutive frames
//! - **Stability**: per-cell temporal coefficient of variation
//! - **Anomalies**: frames whose change against their predecessor is uniform
//!   and large relative to its own spread
//! - **Noise**: per-cell temporal variance and dominant frequency, with all
//!   cell spectra computed in one batched FFT
//! - **Consistency score**: a weighted 0-10 summary of the above
//!
//! Each component has its own minimum-frame floor. A component whose floor
//! is not met is simply absent from the result.
//!
//! ## Example
//!
//! ```rust
//! use frame_analysis::{AnalysisConfig, FrameConsistencyAnalyzer};
//! use ndarray::Array2;
//!
//! let mut analyzer = FrameConsistencyAnalyzer::new(AnalysisConfig::default()).unwrap();
//! for _ in 0..12 {
//!     analyzer.add_frame(Array2::from_elem((16, 16), 0.25)).unwrap();
//! }
//!
//! let result = analyzer.analyze().unwrap();
//! assert!(result.anomaly_frames.is_empty());
//! assert!((result.consistency_score.value() - 10.0).abs() < 1e-9);
//! ```

pub mod algorithms;
pub mod analyzer;
pub mod buffer;
pub mod config;
pub mod scoring;
pub mod shared;
pub mod traits;
pub mod types;
pub mod window;

// Re-exports
pub use algorithms::{AnomalyDetector, DifferenceEngine, NoiseAnalyzer, StabilityEngine};
pub use analyzer::{analyze_window, FrameConsistencyAnalyzer};
pub use buffer::FrameBuffer;
pub use config::{AnalysisConfig, ConfigUpdate, ConsistencyWeights, WeightsUpdate};
pub use scoring::{consistency_score, ConsistencyGrade, ConsistencyScore, ScoreInputs};
pub use shared::SharedAnalyzer;
pub use traits::{WindowAnalyzer, WindowAnalyzerProperties};
pub use types::{
    AnalysisResult, AnomalyRecord, FrameDifferenceResult, NoiseResult, PerformanceStats,
    StabilityResult, SummaryStats,
};
pub use window::FrameWindow;
