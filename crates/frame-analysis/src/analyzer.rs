//! Frame-consistency analyzer
//!
//! [`FrameConsistencyAnalyzer`] owns the history window and the active
//! configuration. Each analysis stacks the window once and runs the
//! difference, stability, anomaly and noise engines over that snapshot, then
//! scores the combined result.

use crate::algorithms::{AnomalyDetector, DifferenceEngine, NoiseAnalyzer, StabilityEngine};
use crate::buffer::FrameBuffer;
use crate::config::{AnalysisConfig, ConfigUpdate};
use crate::scoring::{consistency_score, ScoreInputs};
use crate::traits::WindowAnalyzer;
use crate::types::{AnalysisResult, PerformanceStats, SummaryStats};
use crate::window::FrameWindow;
use frame_core::{FrameShape, IntoFrame, Result};
use std::time::SystemTime;
use tracing::{debug, info, instrument};

/// Sliding-window consistency analysis of a stream of frames
#[derive(Debug, Clone)]
pub struct FrameConsistencyAnalyzer {
    config: AnalysisConfig,
    buffer: FrameBuffer,
    analysis_count: u64,
    last_analysis_time: Option<SystemTime>,
}

impl FrameConsistencyAnalyzer {
    /// Create an analyzer with an empty history
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let buffer = FrameBuffer::new(config.max_history_size)?;
        info!(
            max_history_size = config.max_history_size,
            anomaly_threshold = config.anomaly_threshold,
            stability_threshold = config.stability_threshold,
            noise_threshold = config.noise_threshold,
            "frame consistency analyzer created"
        );
        Ok(Self {
            config,
            buffer,
            analysis_count: 0,
            last_analysis_time: None,
        })
    }

    /// Create an analyzer with the default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(AnalysisConfig::default())
    }

    /// Append a copy of `frame` to the history
    ///
    /// Fails, leaving the history untouched, if the frame is missing, not 2D
    /// or shaped differently from the frames already held.
    pub fn add_frame<F: IntoFrame>(&mut self, frame: F) -> Result<()> {
        self.buffer.push(frame)?;
        Ok(())
    }

    /// Optionally append `current_frame`, then analyze the history
    ///
    /// The minimum-frame check runs on the history as it stands before the
    /// call. Below the floor the result is empty and `current_frame` is
    /// dropped without being stored.
    pub fn analyze_frame_consistency<F: IntoFrame>(
        &mut self,
        current_frame: Option<F>,
    ) -> Result<AnalysisResult> {
        if self.below_floor() {
            debug!(
                frames = self.buffer.len(),
                required = self.config.min_frames_for_analysis,
                "not enough frames for analysis, current frame dropped"
            );
            return Ok(AnalysisResult::empty());
        }
        if let Some(frame) = current_frame {
            self.add_frame(frame)?;
        }
        self.analyze()
    }

    fn below_floor(&self) -> bool {
        self.buffer.is_empty() || self.buffer.len() < self.config.min_frames_for_analysis
    }

    /// Analyze the current history
    pub fn analyze(&mut self) -> Result<AnalysisResult> {
        self.analyze_at(SystemTime::now())
    }

    /// Analyze the current history as of `now`
    ///
    /// `now` is the reference anomaly timestamps are back-dated from and the
    /// reported analysis time. A history shorter than
    /// `min_frames_for_analysis` yields [`AnalysisResult::empty`].
    #[instrument(skip_all, fields(frames = self.buffer.len()))]
    pub fn analyze_at(&mut self, now: SystemTime) -> Result<AnalysisResult> {
        if self.below_floor() {
            debug!(
                required = self.config.min_frames_for_analysis,
                "not enough frames for analysis"
            );
            return Ok(AnalysisResult::empty());
        }

        let window = self.buffer.window(now)?;
        let result = analyze_window(&self.config, &window)?;

        self.analysis_count += 1;
        self.last_analysis_time = Some(now);
        Ok(result)
    }

    /// Drop every stored frame and reset the analysis counters
    pub fn clear_history(&mut self) {
        self.buffer.clear();
        self.analysis_count = 0;
        self.last_analysis_time = None;
        info!("frame history cleared");
    }

    /// Active configuration
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Merge `update` into the configuration
    ///
    /// The merged config is validated before it replaces the current one; on
    /// error nothing changes. A smaller `max_history_size` evicts the oldest
    /// frames straight away.
    pub fn update_config(&mut self, update: &ConfigUpdate) -> Result<()> {
        let next = self.config.merged(update)?;
        let evicted = self.buffer.set_capacity(next.max_history_size)?;
        self.config = next;
        info!(?update, evicted, "analysis config updated");
        Ok(())
    }

    /// Window size and estimated memory held by the history
    pub fn performance_stats(&self) -> PerformanceStats {
        let shape = self.buffer.shape();
        let cells = shape.map_or(0, |s| s.cells());
        PerformanceStats {
            frame_history_size: self.buffer.len(),
            memory_usage_estimate: self.buffer.len() * cells * std::mem::size_of::<f64>(),
            analysis_count: self.analysis_count,
            last_analysis_time: self.last_analysis_time,
            frame_shape: shape,
            data_type: shape.map(|_| "f64"),
        }
    }

    /// Number of frames in the history
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Shape of the stored frames, if any are stored
    pub fn frame_shape(&self) -> Option<FrameShape> {
        self.buffer.shape()
    }

    /// Read-only view of the history
    pub fn history(&self) -> &FrameBuffer {
        &self.buffer
    }
}

/// Run every engine over `window` and score the combined result
///
/// Pure in `config` and `window`; the analyzer's minimum-frame check for the
/// whole analysis is not applied here.
pub fn analyze_window(config: &AnalysisConfig, window: &FrameWindow) -> Result<AnalysisResult> {
    let frame_differences = DifferenceEngine::new().analyze_window(window)?;
    let stability_metrics = StabilityEngine::from_config(config).analyze_window(window)?;
    let anomaly_frames = AnomalyDetector::from_config(config)
        .analyze_window(window)?
        .unwrap_or_default();
    let noise_characteristics = NoiseAnalyzer::from_config(config).analyze_window(window)?;

    let inputs = ScoreInputs::from_results(
        frame_differences.as_ref(),
        stability_metrics.as_ref(),
        noise_characteristics.as_ref(),
        &anomaly_frames,
    );
    let score = consistency_score(&inputs, &config.consistency_weights);

    let summary = SummaryStats::from_components(
        window.len(),
        score,
        window.captured_at(),
        frame_differences.as_ref(),
        stability_metrics.as_ref(),
        noise_characteristics.as_ref(),
        &anomaly_frames,
    );

    debug!(
        frames = window.len(),
        score = score.value(),
        anomalies = anomaly_frames.len(),
        stability = stability_metrics.is_some(),
        noise = noise_characteristics.is_some(),
        "analysis complete"
    );

    Ok(AnalysisResult {
        frame_differences,
        stability_metrics,
        anomaly_frames,
        noise_characteristics,
        consistency_score: score,
        summary_stats: Some(summary),
    })
}
