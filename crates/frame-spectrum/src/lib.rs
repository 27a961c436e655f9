//! # Frame Spectrum
//!
//! FFT-based power spectra for the per-cell time series of a sensor window,
//! built on RustFFT.
//!
//! The noise analysis of a frame window needs, for every cell, the index of
//! the strongest non-DC frequency bin of that cell's time series. Done one
//! series at a time this means one FFT call per cell. [`PowerSpectrum`]
//! plans the transform once for a given series length and can then run it
//! over a single contiguous buffer holding every series back to back, which
//! is what [`PowerSpectrum::dominant_frequencies`] does.
//!
//! ## Conventions
//!
//! - The power spectrum of `x` is `|FFT(x)|²`, unnormalized.
//! - The dominant bin is searched over `1..len/2`, so the DC term and the
//!   upper half of the spectrum are never selected. Ties resolve to the
//!   lowest bin.
//! - A dominant frequency is reported in cycles per sample: `bin / len`.
//!
//! ## Basic Usage
//!
//! ```rust
//! use frame_spectrum::PowerSpectrum;
//!
//! let n = 64;
//! let signal: Vec<f64> = (0..n)
//!     .map(|i| (2.0 * std::f64::consts::PI * 8.0 * i as f64 / n as f64).sin())
//!     .collect();
//!
//! let spectrum = PowerSpectrum::new(n);
//! assert_eq!(spectrum.dominant_bin(&signal).unwrap(), 8);
//! assert_eq!(spectrum.dominant_frequency(&signal).unwrap(), 0.125);
//! ```
//!
//! ## Batched Usage
//!
//! ```rust
//! use frame_spectrum::PowerSpectrum;
//!
//! // Three series of length 16, stored back to back
//! let mut series = vec![0.0; 48];
//! for i in 0..16 {
//!     series[16 + i] = (2.0 * std::f64::consts::PI * 2.0 * i as f64 / 16.0).cos();
//!     series[32 + i] = (2.0 * std::f64::consts::PI * 5.0 * i as f64 / 16.0).cos();
//! }
//!
//! let spectrum = PowerSpectrum::new(16);
//! let frequencies = spectrum.dominant_frequencies(&series).unwrap();
//! assert_eq!(frequencies[1], 2.0 / 16.0);
//! assert_eq!(frequencies[2], 5.0 / 16.0);
//! ```

use num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;
use thiserror::Error;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Shortest series with a non-empty dominant-bin search range (`1..len/2`)
pub const MIN_DOMINANT_LENGTH: usize = 4;

/// Error types for spectrum operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpectrumError {
    /// Signal length doesn't match the planned length
    #[error("Signal length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Signal is too short to have a non-DC search range
    #[error("Signal too short for analysis: {length} samples")]
    SignalTooShort { length: usize },

    /// Batched input is not a whole number of series
    #[error("Batch of {total} samples is not a non-empty multiple of series length {length}")]
    BatchLength { length: usize, total: usize },
}

/// Result type for spectrum operations
pub type SpectrumResult<T> = Result<T, SpectrumError>;

/// Forward-FFT power spectrum processor for series of one fixed length
///
/// The FFT plan is built once in [`PowerSpectrum::new`] and reused by every
/// call, including the batched ones.
#[derive(Clone)]
pub struct PowerSpectrum {
    length: usize,
    fft: Arc<dyn Fft<f64>>,
}

impl std::fmt::Debug for PowerSpectrum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PowerSpectrum")
            .field("length", &self.length)
            .finish()
    }
}

impl PowerSpectrum {
    /// Plan a forward transform for series of `length` samples
    pub fn new(length: usize) -> Self {
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(length);
        Self { length, fft }
    }

    /// Series length this processor was planned for
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Full power spectrum `|FFT(signal)|²` of one series
    pub fn power(&self, signal: &[f64]) -> SpectrumResult<Vec<f64>> {
        self.check_length(signal)?;
        let spectrum = self.transform(signal);
        Ok(spectrum.iter().map(|c| c.norm_sqr()).collect())
    }

    /// Index of the strongest bin in `1..len/2`
    pub fn dominant_bin(&self, signal: &[f64]) -> SpectrumResult<usize> {
        self.check_length(signal)?;
        self.check_searchable()?;
        Ok(dominant_bin_of(&self.transform(signal)))
    }

    /// Dominant bin divided by the series length
    pub fn dominant_frequency(&self, signal: &[f64]) -> SpectrumResult<f64> {
        Ok(self.dominant_bin(signal)? as f64 / self.length as f64)
    }

    /// Dominant frequency of every series in a back-to-back buffer
    ///
    /// `series` holds `k` series of `len()` samples each, series-major. The
    /// whole buffer is transformed through the single planned FFT, and the
    /// result has one frequency per series, in input order. Each value is
    /// identical to what [`PowerSpectrum::dominant_frequency`] returns for
    /// that series alone.
    pub fn dominant_frequencies(&self, series: &[f64]) -> SpectrumResult<Vec<f64>> {
        if self.length == 0 || series.is_empty() || series.len() % self.length != 0 {
            return Err(SpectrumError::BatchLength {
                length: self.length,
                total: series.len(),
            });
        }
        self.check_searchable()?;

        let mut buffer: Vec<Complex<f64>> =
            series.iter().map(|&x| Complex::new(x, 0.0)).collect();

        // RustFFT treats a buffer of k * len samples as k independent transforms
        #[cfg(not(feature = "parallel"))]
        self.fft.process(&mut buffer);

        #[cfg(feature = "parallel")]
        buffer
            .par_chunks_mut(self.length)
            .for_each(|chunk| self.fft.process(chunk));

        let norm = self.length as f64;
        Ok(buffer
            .chunks(self.length)
            .map(|spectrum| dominant_bin_of(spectrum) as f64 / norm)
            .collect())
    }

    fn transform(&self, signal: &[f64]) -> Vec<Complex<f64>> {
        let mut buffer: Vec<Complex<f64>> =
            signal.iter().map(|&x| Complex::new(x, 0.0)).collect();
        self.fft.process(&mut buffer);
        buffer
    }

    fn check_length(&self, signal: &[f64]) -> SpectrumResult<()> {
        if signal.len() != self.length {
            return Err(SpectrumError::LengthMismatch {
                expected: self.length,
                actual: signal.len(),
            });
        }
        Ok(())
    }

    fn check_searchable(&self) -> SpectrumResult<()> {
        if self.length < MIN_DOMINANT_LENGTH {
            return Err(SpectrumError::SignalTooShort {
                length: self.length,
            });
        }
        Ok(())
    }
}

/// First bin of maximal power in `1..len/2`
fn dominant_bin_of(spectrum: &[Complex<f64>]) -> usize {
    let half = spectrum.len() / 2;
    let mut best_bin = 1;
    let mut best_power = f64::NEG_INFINITY;
    for (bin, value) in spectrum.iter().enumerate().take(half).skip(1) {
        let power = value.norm_sqr();
        if power > best_power {
            best_power = power;
            best_bin = bin;
        }
    }
    best_bin
}
