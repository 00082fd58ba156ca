//! Error types for pricing entities.

use quantcalc_math::MathError;
use thiserror::Error;

/// A specialized Result type for pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;

/// Errors raised while constructing, mutating or solving a pricing entity.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Neither or both of a direct value and its implied-target value were given.
    #[error("Invalid construction: {reason}")]
    InvalidConstruction {
        /// What was wrong with the supplied inputs.
        reason: String,
    },

    /// A primary input is outside its valid domain.
    #[error("Invalid {name} = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
        /// Why it was rejected.
        reason: String,
    },

    /// A parameter name that the entity does not recognise.
    #[error("Unknown parameter: {name}")]
    UnknownParameter {
        /// The name as supplied.
        name: String,
    },

    /// An implied solve failed.
    #[error("Solver failure: {0}")]
    Solver(#[from] MathError),

    /// The metric exists but is undefined for this entity.
    #[error("{metric} is not applicable: {reason}")]
    NotApplicable {
        /// Metric name.
        metric: &'static str,
        /// Why it is undefined.
        reason: String,
    },
}

impl PricingError {
    /// Creates an invalid construction error.
    #[must_use]
    pub fn invalid_construction(reason: impl Into<String>) -> Self {
        Self::InvalidConstruction {
            reason: reason.into(),
        }
    }

    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(name: &'static str, value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason: reason.into(),
        }
    }

    /// Creates an unknown parameter error.
    #[must_use]
    pub fn unknown_parameter(name: impl Into<String>) -> Self {
        Self::UnknownParameter { name: name.into() }
    }

    /// Creates a not-applicable error.
    #[must_use]
    pub fn not_applicable(metric: &'static str, reason: impl Into<String>) -> Self {
        Self::NotApplicable {
            metric,
            reason: reason.into(),
        }
    }

    /// Returns true if the error is an exhausted iteration cap.
    pub fn is_non_convergence(&self) -> bool {
        matches!(self, Self::Solver(MathError::NonConvergence { .. }))
    }
}

/// Returns `value` if it is finite.
pub fn ensure_finite(name: &'static str, value: f64) -> PricingResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::invalid_parameter(name, value, "must be finite"))
    }
}

/// Returns `value` if it is finite and strictly positive.
pub fn ensure_positive(name: &'static str, value: f64) -> PricingResult<f64> {
    if ensure_finite(name, value)? > 0.0 {
        Ok(value)
    } else {
        Err(PricingError::invalid_parameter(name, value, "must be positive"))
    }
}
