//! Error types for frame-consistency analysis
//!
//! Provides a unified error type for all frame-consistency crates.

use crate::frame::FrameShape;
use thiserror::Error;

/// Reasons a frame is rejected before it can enter a window or filter
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// No frame was supplied
    #[error("frame data is missing")]
    MissingFrame,

    /// Frame is not a 2D grid
    #[error("frame data must be a 2D array, got {ndim}D")]
    NotTwoDimensional { ndim: usize },

    /// Frame has no cells
    #[error("frame data must contain at least one cell")]
    EmptyFrame,

    /// Row-based input with rows of differing length
    #[error("row {row} has {actual} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Flat input whose length does not fill the requested shape
    #[error("expected {expected} cells, got {actual}")]
    CellCount { expected: usize, actual: usize },

    /// A cell could not be represented as f64
    #[error("cell ({row}, {col}) is not representable as f64")]
    NonNumeric { row: usize, col: usize },

    /// Frame shape differs from the established shape
    #[error("frame shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        expected: FrameShape,
        actual: FrameShape,
    },
}

/// Core error type for frame-consistency operations
#[derive(Error, Debug)]
pub enum Error {
    /// Frame failed validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Shared-access or threading error
    #[error("Execution error: {0}")]
    Execution(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a parameter that must be finite and non-negative
    pub fn negative_or_non_finite(name: &str, value: f64) -> Self {
        Self::InvalidParameter(format!(
            "{name} must be finite and non-negative, got {value}"
        ))
    }

    /// Create an error for a shape mismatch
    pub fn shape_mismatch(expected: FrameShape, actual: FrameShape) -> Self {
        Self::Validation(ValidationError::ShapeMismatch { expected, actual })
    }

    /// Whether this error is a frame validation failure
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::from(ValidationError::MissingFrame);
        assert_eq!(err.to_string(), "Validation error: frame data is missing");

        let err = Error::from(ValidationError::NotTwoDimensional { ndim: 3 });
        assert_eq!(
            err.to_string(),
            "Validation error: frame data must be a 2D array, got 3D"
        );

        let err = Error::InvalidParameter("smoothing_factor is NaN".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: smoothing_factor is NaN");

        let err = Error::Computation("spectrum failed".to_string());
        assert_eq!(err.to_string(), "Computation error: spectrum failed");

        let err = Error::Execution("analyzer lock poisoned".to_string());
        assert_eq!(err.to_string(), "Execution error: analyzer lock poisoned");
    }

    #[test]
    fn test_shape_mismatch_display() {
        let err = Error::shape_mismatch(FrameShape::new(64, 64), FrameShape::new(32, 64));
        assert_eq!(
            err.to_string(),
            "Validation error: frame shape mismatch: expected 64x64, got 32x64"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_ragged_rows_display() {
        let err = ValidationError::RaggedRows {
            row: 2,
            expected: 4,
            actual: 3,
        };
        assert_eq!(err.to_string(), "row 2 has 3 columns, expected 4");
    }

    #[test]
    fn test_parameter_helper() {
        let err = Error::negative_or_non_finite("noise_threshold", -1.0);
        assert_eq!(
            err.to_string(),
            "Invalid parameter: noise_threshold must be finite and non-negative, got -1"
        );
        assert!(!err.is_validation());
    }

    #[test]
    fn test_error_from_anyhow() {
        let anyhow_err = anyhow::anyhow!("custom error message");
        let err: Error = anyhow_err.into();

        match err {
            Error::Other(_) => {
                assert!(err.to_string().contains("custom error message"));
            }
            _ => panic!("Wrong error type"),
        }
    }
}
