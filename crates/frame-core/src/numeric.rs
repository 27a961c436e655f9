//! Numeric guards shared by the analysis engines
//!
//! Every ratio taken against sensor readings goes through these helpers so
//! that a near-zero denominator yields zero instead of a blow-up.

use crate::error::{Error, Result};

/// Denominator floor for ratios against readings (relative difference, CV)
pub const RATIO_EPSILON: f64 = 1e-3;

/// Added to the spread of frame differences when scoring anomalies
pub const ANOMALY_EPSILON: f64 = 1e-6;

/// `numerator / denominator` where `denominator > floor`, else 0
#[inline]
pub fn guarded_ratio(numerator: f64, denominator: f64, floor: f64) -> f64 {
    if denominator > floor {
        numerator / denominator
    } else {
        0.0
    }
}

/// Accept `value` if finite and non-negative
pub fn ensure_non_negative(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::negative_or_non_finite(name, value))
    }
}

/// Clamp `value` into `[lo, hi]`, rejecting NaN
pub fn clamp_checked(name: &str, value: f64, lo: f64, hi: f64) -> Result<f64> {
    if value.is_nan() {
        return Err(Error::InvalidParameter(format!("{name} must not be NaN")));
    }
    Ok(value.clamp(lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guarded_ratio() {
        assert_eq!(guarded_ratio(1.0, 2.0, RATIO_EPSILON), 0.5);
        assert_eq!(guarded_ratio(1.0, RATIO_EPSILON, RATIO_EPSILON), 0.0);
        assert_eq!(guarded_ratio(1.0, 0.0, RATIO_EPSILON), 0.0);
        assert_eq!(guarded_ratio(1.0, -5.0, RATIO_EPSILON), 0.0);
    }

    #[test]
    fn test_ensure_non_negative() {
        assert_eq!(ensure_non_negative("x", 0.0).unwrap(), 0.0);
        assert!(ensure_non_negative("x", -0.1).is_err());
        assert!(ensure_non_negative("x", f64::NAN).is_err());
        assert!(ensure_non_negative("x", f64::INFINITY).is_err());
    }

    #[test]
    fn test_clamp_checked() {
        assert_eq!(clamp_checked("s", 1.5, 0.0, 1.0).unwrap(), 1.0);
        assert_eq!(clamp_checked("s", -0.5, 0.0, 1.0).unwrap(), 0.0);
        assert_eq!(clamp_checked("s", f64::INFINITY, 0.0, f64::INFINITY).unwrap(), f64::INFINITY);
        assert!(clamp_checked("s", f64::NAN, 0.0, 1.0).is_err());
    }
}
