//! Thread-safe handle to one analyzer
//!
//! All operations lock the same mutex, so every analysis sees the window as
//! a whole and frames are never added halfway through one.

use crate::analyzer::FrameConsistencyAnalyzer;
use crate::config::{AnalysisConfig, ConfigUpdate};
use crate::types::{AnalysisResult, PerformanceStats};
use frame_core::{Error, IntoFrame, Result};
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable, `Send + Sync` wrapper around a [`FrameConsistencyAnalyzer`]
#[derive(Debug, Clone)]
pub struct SharedAnalyzer {
    inner: Arc<Mutex<FrameConsistencyAnalyzer>>,
}

impl SharedAnalyzer {
    pub fn new(analyzer: FrameConsistencyAnalyzer) -> Self {
        Self {
            inner: Arc::new(Mutex::new(analyzer)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, FrameConsistencyAnalyzer>> {
        self.inner
            .lock()
            .map_err(|_| Error::Execution("frame analyzer lock poisoned".to_string()))
    }

    pub fn add_frame<F: IntoFrame>(&self, frame: F) -> Result<()> {
        self.lock()?.add_frame(frame)
    }

    pub fn analyze(&self) -> Result<AnalysisResult> {
        self.lock()?.analyze()
    }

    pub fn analyze_frame_consistency<F: IntoFrame>(
        &self,
        current_frame: Option<F>,
    ) -> Result<AnalysisResult> {
        self.lock()?.analyze_frame_consistency(current_frame)
    }

    pub fn clear_history(&self) -> Result<()> {
        self.lock()?.clear_history();
        Ok(())
    }

    /// Copy of the active configuration
    pub fn config(&self) -> Result<AnalysisConfig> {
        Ok(self.lock()?.config().clone())
    }

    pub fn update_config(&self, update: &ConfigUpdate) -> Result<()> {
        self.lock()?.update_config(update)
    }

    pub fn performance_stats(&self) -> Result<PerformanceStats> {
        Ok(self.lock()?.performance_stats())
    }
}

impl From<FrameConsistencyAnalyzer> for SharedAnalyzer {
    fn from(analyzer: FrameConsistencyAnalyzer) -> Self {
        Self::new(analyzer)
    }
}
