//! Per-cell noise power and dominant frequency

use crate::config::AnalysisConfig;
use crate::traits::{WindowAnalyzer, WindowAnalyzerProperties};
use crate::types::NoiseResult;
use crate::window::FrameWindow;
use frame_core::{Error, Result};
use frame_spectrum::{PowerSpectrum, SpectrumError};
use ndarray::{Array2, Axis};

/// Shortest cell series whose variance is reported as noise power
pub const MIN_POWER_SAMPLES: usize = 3;

/// Shortest cell series whose dominant frequency is estimated
pub const MIN_SPECTRUM_SAMPLES: usize = 11;

/// Temporal variance and dominant frequency of every cell
///
/// The frequency map needs one FFT per cell. [`NoiseAnalyzer`] lays all cell
/// series out back to back and runs them through one planned transform;
/// [`NoiseAnalyzer::per_cell_frequency_map`] keeps the one-series-at-a-time
/// path for comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseAnalyzer {
    pub min_frames: usize,

    /// Multiple of the mean power above which a cell counts as noisy
    pub noise_threshold: f64,
}

impl NoiseAnalyzer {
    pub fn new(min_frames: usize, noise_threshold: f64) -> Self {
        Self {
            min_frames,
            noise_threshold,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.min_frames_for_noise, config.noise_threshold)
    }

    /// Dominant frequency of every cell, all cells transformed in one batch
    pub fn frequency_map(&self, window: &FrameWindow) -> Result<Array2<f64>> {
        let shape = window.frame_shape();
        let spectrum = PowerSpectrum::new(window.len());
        let frequencies = spectrum
            .dominant_frequencies(&window.cell_major_samples())
            .map_err(spectrum_error)?;
        Array2::from_shape_vec(shape.as_tuple(), frequencies)
            .map_err(|e| Error::Computation(format!("frequency map: {e}")))
    }

    /// Dominant frequency of every cell, one transform call per cell
    pub fn per_cell_frequency_map(&self, window: &FrameWindow) -> Result<Array2<f64>> {
        let shape = window.frame_shape();
        let spectrum = PowerSpectrum::new(window.len());
        let mut frequencies = Vec::with_capacity(shape.cells());
        for series in window.cell_series() {
            let samples = series.to_vec();
            frequencies.push(spectrum.dominant_frequency(&samples).map_err(spectrum_error)?);
        }
        Array2::from_shape_vec(shape.as_tuple(), frequencies)
            .map_err(|e| Error::Computation(format!("frequency map: {e}")))
    }
}

impl Default for NoiseAnalyzer {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

fn spectrum_error(e: SpectrumError) -> Error {
    Error::Computation(format!("noise spectrum: {e}"))
}

impl WindowAnalyzerProperties for NoiseAnalyzer {
    fn minimum_frames(&self) -> usize {
        self.min_frames
    }

    fn method_name(&self) -> &str {
        "noise"
    }
}

impl WindowAnalyzer for NoiseAnalyzer {
    type Output = NoiseResult;

    fn analyze_window(&self, window: &FrameWindow) -> Result<Option<NoiseResult>> {
        if window.is_empty() || !self.can_handle_len(window.len()) {
            return Ok(None);
        }

        let len = window.len();
        let cells = window.frame_shape().as_tuple();

        let noise_power_map = if len >= MIN_POWER_SAMPLES {
            window.stack().var_axis(Axis(0), 0.0)
        } else {
            Array2::zeros(cells)
        };
        let noise_frequency_map = if len >= MIN_SPECTRUM_SAMPLES {
            self.frequency_map(window)?
        } else {
            Array2::zeros(cells)
        };

        let mean_noise_power = noise_power_map.mean().unwrap_or(0.0);
        let cutoff = mean_noise_power * self.noise_threshold;
        let high_noise_sensors = noise_power_map.iter().filter(|&&p| p > cutoff).count();

        Ok(Some(NoiseResult {
            mean_noise_power,
            mean_noise_frequency: noise_frequency_map.mean().unwrap_or(0.0),
            high_noise_sensors,
            noise_power_map,
            noise_frequency_map,
        }))
    }
}
