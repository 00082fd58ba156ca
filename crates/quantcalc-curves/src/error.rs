//! Error types for curve construction.

use quantcalc_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Errors raised while building or querying a zero curve.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Bootstrap called with no bonds.
    #[error("No instruments provided for bootstrap")]
    NoInstruments,

    /// Bonds do not share one coupon frequency.
    #[error("Heterogeneous frequency: bond maturing at {maturity} pays {found}x a year, expected {expected}x")]
    HeterogeneousFrequency {
        /// Frequency of the first bond.
        expected: u32,
        /// Offending frequency.
        found: u32,
        /// Maturity of the offending bond.
        maturity: f64,
    },

    /// Two bonds mature at the same tenor.
    #[error("Duplicate maturity: more than one bond matures at {maturity}")]
    DuplicateMaturity {
        /// The shared maturity.
        maturity: f64,
    },

    /// The short rate is not a finite number.
    #[error("Invalid rate: {rate}")]
    InvalidRate {
        /// The rejected rate.
        rate: f64,
    },

    /// Curve points are empty or not strictly increasing in tenor.
    #[error("Invalid curve: {reason}")]
    InvalidCurve {
        /// What was wrong.
        reason: String,
    },

    /// The solve for one bond failed; no partial curve is returned.
    #[error("Bootstrap failed at maturity {maturity}: {source}")]
    BootstrapFailed {
        /// Maturity of the bond that could not be fitted.
        maturity: f64,
        /// Underlying solver error.
        source: MathError,
    },

    /// Requested tenor is outside the curve.
    #[error("Tenor {requested:.4} out of range [{min:.4}, {max:.4}]")]
    TenorOutOfRange {
        /// The requested tenor in years.
        requested: f64,
        /// First tenor.
        min: f64,
        /// Last tenor.
        max: f64,
    },

    /// Numerical error outside a bootstrap solve.
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

impl CurveError {
    /// Creates an invalid curve error.
    #[must_use]
    pub fn invalid_curve(reason: impl Into<String>) -> Self {
        Self::InvalidCurve {
            reason: reason.into(),
        }
    }
}
