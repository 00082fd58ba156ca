//! Error types for numerical operations.

use thiserror::Error;

/// A specialized Result type for numerical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during numerical operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Iteration cap exhausted before the stopping criterion was met.
    #[error("No convergence after {iterations} iterations (residual: {residual:.2e})")]
    NonConvergence {
        /// Number of iterations attempted.
        iterations: u32,
        /// Last residual observed.
        residual: f64,
    },

    /// Newton step requested with a (near) zero derivative.
    #[error("Degenerate derivative f'({x}) = {derivative:.2e}")]
    DegenerateDerivative {
        /// Point at which the derivative was evaluated.
        x: f64,
        /// The offending derivative value.
        derivative: f64,
    },

    /// Secant line is flat: consecutive function values coincide.
    #[error("Divergent secant: f({x_prev}) == f({x_curr}) == {fx:.2e}")]
    DivergentSecant {
        /// Previous iterate.
        x_prev: f64,
        /// Current iterate.
        x_curr: f64,
        /// Shared function value.
        fx: f64,
    },

    /// Invalid bracket for root-finding.
    #[error("Invalid bracket: f({a}) = {fa:.2e} and f({b}) = {fb:.2e} have same sign")]
    InvalidBracket {
        /// Lower bound of bracket.
        a: f64,
        /// Upper bound of bracket.
        b: f64,
        /// Function value at a.
        fa: f64,
        /// Function value at b.
        fb: f64,
    },

    /// Function or derivative evaluated to NaN or infinity.
    #[error("Non-finite value encountered at x = {x}")]
    NonFiniteValue {
        /// Point at which the evaluation failed.
        x: f64,
    },

    /// Vectors that must line up have different lengths.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Caller requested a solver this crate does not provide.
    #[error("Unsupported solver method: {name}")]
    UnsupportedMethod {
        /// The unrecognized method name.
        name: String,
    },

    /// Interpolation point is outside the valid range.
    #[error("Extrapolation not allowed: {x} is outside [{min}, {max}]")]
    ExtrapolationNotAllowed {
        /// The query point.
        x: f64,
        /// Minimum valid value.
        min: f64,
        /// Maximum valid value.
        max: f64,
    },

    /// Insufficient data points for operation.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates a non-convergence error.
    #[must_use]
    pub fn non_convergence(iterations: u32, residual: f64) -> Self {
        Self::NonConvergence {
            iterations,
            residual,
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Creates a dimension mismatch error.
    #[must_use]
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Creates an unsupported method error.
    #[must_use]
    pub fn unsupported_method(name: impl Into<String>) -> Self {
        Self::UnsupportedMethod { name: name.into() }
    }

    /// Returns true if the error is an exhausted iteration cap.
    #[must_use]
    pub fn is_non_convergence(&self) -> bool {
        matches!(self, Self::NonConvergence { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::non_convergence(100, 1e-6);
        assert!(err.to_string().contains("100 iterations"));
        assert!(err.is_non_convergence());
    }

    #[test]
    fn test_unsupported_method_display() {
        let err = MathError::unsupported_method("brent");
        assert_eq!(err.to_string(), "Unsupported solver method: brent");
    }
}
