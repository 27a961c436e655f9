//! Frame-level anomaly detection

use super::max_of;
use crate::config::AnalysisConfig;
use crate::traits::{WindowAnalyzer, WindowAnalyzerProperties};
use crate::types::AnomalyRecord;
use crate::window::FrameWindow;
use frame_core::{Result, ANOMALY_EPSILON};
use std::time::{Duration, SystemTime};
use tracing::debug;

/// Flags frames whose change from the previous frame is large relative to
/// the spread of that change
///
/// A frame shifted uniformly against its predecessor has a large mean
/// difference and a small spread, so `mean / (std + ε)` is high. Ordinary
/// sensor noise produces differences whose mean and spread are comparable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyDetector {
    pub min_frames: usize,

    /// Score above which a frame is reported
    pub anomaly_threshold: f64,

    /// Spacing used to back-date the reported timestamps
    pub frame_interval: Duration,
}

impl AnomalyDetector {
    pub fn new(min_frames: usize, anomaly_threshold: f64, frame_interval: Duration) -> Self {
        Self {
            min_frames,
            anomaly_threshold,
            frame_interval,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(
            config.min_frames_for_anomaly,
            config.anomaly_threshold,
            config.frame_interval,
        )
    }

    /// `captured_at` minus `steps` frame intervals, saturating at the epoch
    fn back_date(&self, captured_at: SystemTime, steps: usize) -> SystemTime {
        u32::try_from(steps)
            .ok()
            .and_then(|steps| self.frame_interval.checked_mul(steps))
            .and_then(|offset| captured_at.checked_sub(offset))
            .filter(|t| *t >= SystemTime::UNIX_EPOCH)
            .unwrap_or(SystemTime::UNIX_EPOCH)
    }
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl WindowAnalyzerProperties for AnomalyDetector {
    fn minimum_frames(&self) -> usize {
        self.min_frames
    }

    fn method_name(&self) -> &str {
        "anomaly"
    }
}

impl WindowAnalyzer for AnomalyDetector {
    type Output = Vec<AnomalyRecord>;

    fn analyze_window(&self, window: &FrameWindow) -> Result<Option<Vec<AnomalyRecord>>> {
        if !self.can_handle_len(window.len()) {
            return Ok(None);
        }

        let total = window.len();
        let captured_at = window.captured_at();
        let mut anomalies = Vec::new();

        for (pair, diff) in window.abs_differences().outer_iter().enumerate() {
            let frame_index = pair + 1;
            let mean_difference = diff.mean().unwrap_or(0.0);
            // Unchanged frames are never anomalous
            if mean_difference.is_nan() || mean_difference <= 0.0 {
                continue;
            }

            let anomaly_score = mean_difference / (diff.std(0.0) + ANOMALY_EPSILON);
            if anomaly_score > self.anomaly_threshold {
                debug!(frame_index, anomaly_score, "anomalous frame");
                anomalies.push(AnomalyRecord {
                    frame_index,
                    anomaly_score,
                    mean_difference,
                    max_difference: max_of(diff.iter()),
                    timestamp: self.back_date(captured_at, total - frame_index),
                });
            }
        }

        Ok(Some(anomalies))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use frame_core::{Frame, FrameShape};
    use ndarray::Array2;

    fn frame(value: f64) -> Frame {
        Frame::filled(FrameShape::new(4, 4), value).unwrap()
    }

    fn window(frames: &[Frame], at: SystemTime) -> FrameWindow {
        FrameWindow::from_frames(frames, at).unwrap()
    }

    #[test]
    fn test_floor_not_met() {
        let frames: Vec<Frame> = (0..4).map(|i| frame(i as f64)).collect();
        let detector = AnomalyDetector::default();
        assert!(detector
            .analyze_window(&window(&frames, SystemTime::now()))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_uniform_jump_is_flagged() {
        let mut frames: Vec<Frame> = (0..6).map(|_| frame(1.0)).collect();
        // Frame 3 steps up by 0.5 everywhere except one cell
        let mut jumped = Array2::from_elem((4, 4), 1.5);
        jumped[[0, 0]] = 1.4;
        frames[3] = Frame::new(jumped).unwrap();

        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);
        let anomalies = AnomalyDetector::default()
            .analyze_window(&window(&frames, now))
            .unwrap()
            .unwrap();

        // Frame 3 (jump up) and frame 4 (jump back) both change uniformly
        let indices: Vec<usize> = anomalies.iter().map(|a| a.frame_index).collect();
        assert_eq!(indices, vec![3, 4]);

        let record = &anomalies[0];
        assert!(record.anomaly_score > 3.0);
        assert_relative_eq!(record.max_difference, 0.5, epsilon = 1e-12);
        assert_relative_eq!(
            record.mean_difference,
            (15.0 * 0.5 + 0.4) / 16.0,
            epsilon = 1e-12
        );
        assert_eq!(record.timestamp, now - Duration::from_secs(3));
        assert_eq!(anomalies[1].timestamp, now - Duration::from_secs(2));
    }

    #[test]
    fn test_identical_frames_yield_nothing() {
        let frames: Vec<Frame> = (0..8).map(|_| frame(2.0)).collect();
        let anomalies = AnomalyDetector::default()
            .analyze_window(&window(&frames, SystemTime::now()))
            .unwrap()
            .unwrap();
        assert!(anomalies.is_empty());
    }

    #[test]
    fn test_back_dating_uses_frame_interval() {
        let detector = AnomalyDetector::new(5, 3.0, Duration::from_millis(100));
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(10);
        assert_eq!(detector.back_date(now, 4), now - Duration::from_millis(400));
        assert_eq!(
            detector.back_date(SystemTime::UNIX_EPOCH, 1),
            SystemTime::UNIX_EPOCH
        );
        // Never earlier than the epoch, even part way through an interval
        let early = SystemTime::UNIX_EPOCH + Duration::from_millis(50);
        assert_eq!(detector.back_date(early, 1), SystemTime::UNIX_EPOCH);
        assert_eq!(detector.back_date(now, 1_000), SystemTime::UNIX_EPOCH);
    }
}
