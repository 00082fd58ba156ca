//! Configuration sections.

use serde::{Deserialize, Serialize};

use quantcalc_core::implied::DEFAULT_INITIAL_GUESS;
use quantcalc_curves::bootstrap::DEFAULT_INITIAL_GUESS as DEFAULT_BOOTSTRAP_GUESS;
use quantcalc_math::integration::{DEFAULT_INTEGRATION_TOLERANCE, DEFAULT_MAX_REFINEMENTS};
use quantcalc_math::solvers::{
    SolverConfig, SolverMethod, DEFAULT_FUNCTION_TOLERANCE, DEFAULT_MAX_ITERATIONS,
    DEFAULT_STEP_TOLERANCE,
};

use crate::error::{Validate, ValidationError};

/// Upper bound on any solver tolerance.
const MAX_TOLERANCE: f64 = 1e-2;

/// Upper bound on the iteration cap.
const MAX_ITERATIONS: u32 = 10_000;

/// Upper bound on partition doublings.
const MAX_REFINEMENTS: u32 = 40;

// =============================================================================
// SOLVER
// =============================================================================

/// Root-finder settings shared by every solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverSection {
    /// Method name: `newton`, `secant` or `bisection`.
    #[serde(default = "default_method")]
    pub method: String,

    /// Distance between consecutive iterates below which a solve may stop.
    #[serde(default = "default_step_tolerance")]
    pub step_tolerance: f64,

    /// Change in function value below which a solve may stop.
    #[serde(default = "default_function_tolerance")]
    pub function_tolerance: f64,

    /// Iteration cap.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

fn default_method() -> String {
    SolverMethod::Newton.as_str().to_string()
}

fn default_step_tolerance() -> f64 {
    DEFAULT_STEP_TOLERANCE
}

fn default_function_tolerance() -> f64 {
    DEFAULT_FUNCTION_TOLERANCE
}

fn default_max_iterations() -> u32 {
    DEFAULT_MAX_ITERATIONS
}

impl Default for SolverSection {
    fn default() -> Self {
        Self {
            method: default_method(),
            step_tolerance: default_step_tolerance(),
            function_tolerance: default_function_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl SolverSection {
    /// Tolerances and iteration cap as a [`SolverConfig`].
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(
            self.step_tolerance,
            self.function_tolerance,
            self.max_iterations,
        )
    }
}

impl Validate for SolverSection {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if let Err(err) = self.method.parse::<SolverMethod>() {
            errors.push(ValidationError::with_rule(
                "solver.method",
                err.to_string(),
                "known_method",
            ));
        }

        for (field, value) in [
            ("solver.step_tolerance", self.step_tolerance),
            ("solver.function_tolerance", self.function_tolerance),
        ] {
            if !(value > 0.0 && value <= MAX_TOLERANCE) {
                errors.push(ValidationError::with_rule(
                    field,
                    format!("Tolerance must be in (0, {MAX_TOLERANCE}], got {value}"),
                    "valid_tolerance",
                ));
            }
        }

        if self.max_iterations == 0 || self.max_iterations > MAX_ITERATIONS {
            errors.push(ValidationError::with_rule(
                "solver.max_iterations",
                format!("Max iterations must be between 1 and {MAX_ITERATIONS}"),
                "valid_iterations",
            ));
        }

        errors
    }
}

// =============================================================================
// IMPLIED
// =============================================================================

/// Starting points and brackets for implied-parameter solves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpliedSection {
    /// Initial guess for implied yield.
    #[serde(default = "default_implied_guess")]
    pub yield_guess: f64,

    /// Initial guess for implied volatility.
    #[serde(default = "default_implied_guess")]
    pub volatility_guess: f64,

    /// Bracket for bisection (and secant start points) on yield.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yield_bracket: Option<(f64, f64)>,

    /// Bracket for bisection (and secant start points) on volatility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volatility_bracket: Option<(f64, f64)>,
}

fn default_implied_guess() -> f64 {
    DEFAULT_INITIAL_GUESS
}

impl Default for ImpliedSection {
    fn default() -> Self {
        Self {
            yield_guess: default_implied_guess(),
            volatility_guess: default_implied_guess(),
            yield_bracket: None,
            volatility_bracket: None,
        }
    }
}

fn check_bracket(
    errors: &mut Vec<ValidationError>,
    field: &str,
    bracket: Option<(f64, f64)>,
    lower_bound: f64,
) {
    if let Some((lo, hi)) = bracket {
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            errors.push(ValidationError::with_rule(
                field,
                format!("Bracket must be finite and increasing, got ({lo}, {hi})"),
                "valid_bracket",
            ));
        } else if lo <= lower_bound {
            errors.push(ValidationError::with_rule(
                field,
                format!("Bracket must lie above {lower_bound}, got ({lo}, {hi})"),
                "bracket_domain",
            ));
        }
    }
}

impl Validate for ImpliedSection {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !self.yield_guess.is_finite() {
            errors.push(ValidationError::new(
                "implied.yield_guess",
                "Yield guess must be finite",
            ));
        }
        if !(self.volatility_guess.is_finite() && self.volatility_guess > 0.0) {
            errors.push(ValidationError::with_rule(
                "implied.volatility_guess",
                format!(
                    "Volatility guess must be positive, got {}",
                    self.volatility_guess
                ),
                "positive_volatility",
            ));
        }

        check_bracket(
            &mut errors,
            "implied.yield_bracket",
            self.yield_bracket,
            f64::NEG_INFINITY,
        );
        check_bracket(
            &mut errors,
            "implied.volatility_bracket",
            self.volatility_bracket,
            0.0,
        );

        errors
    }
}

// =============================================================================
// INTEGRATION
// =============================================================================

/// Adaptive Simpson settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegrationSection {
    /// Absolute tolerance between successive estimates.
    #[serde(default = "default_integration_tolerance")]
    pub tolerance: f64,

    /// Cap on partition doublings.
    #[serde(default = "default_max_refinements")]
    pub max_refinements: u32,
}

fn default_integration_tolerance() -> f64 {
    DEFAULT_INTEGRATION_TOLERANCE
}

fn default_max_refinements() -> u32 {
    DEFAULT_MAX_REFINEMENTS
}

impl Default for IntegrationSection {
    fn default() -> Self {
        Self {
            tolerance: default_integration_tolerance(),
            max_refinements: default_max_refinements(),
        }
    }
}

impl Validate for IntegrationSection {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !(self.tolerance > 0.0 && self.tolerance <= MAX_TOLERANCE) {
            errors.push(ValidationError::with_rule(
                "integration.tolerance",
                format!(
                    "Tolerance must be in (0, {MAX_TOLERANCE}], got {}",
                    self.tolerance
                ),
                "valid_tolerance",
            ));
        }
        if self.max_refinements == 0 || self.max_refinements > MAX_REFINEMENTS {
            errors.push(ValidationError::with_rule(
                "integration.max_refinements",
                format!("Max refinements must be between 1 and {MAX_REFINEMENTS}"),
                "valid_refinements",
            ));
        }

        errors
    }
}

// =============================================================================
// BOOTSTRAP
// =============================================================================

/// Zero-curve bootstrap settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BootstrapSection {
    /// Starting rate of each end-point solve.
    #[serde(default = "default_bootstrap_guess")]
    pub initial_guess: f64,
}

fn default_bootstrap_guess() -> f64 {
    DEFAULT_BOOTSTRAP_GUESS
}

impl Default for BootstrapSection {
    fn default() -> Self {
        Self {
            initial_guess: default_bootstrap_guess(),
        }
    }
}

impl Validate for BootstrapSection {
    fn validate(&self) -> Vec<ValidationError> {
        if self.initial_guess.is_finite() {
            Vec::new()
        } else {
            vec![ValidationError::new(
                "bootstrap.initial_guess",
                "Initial guess must be finite",
            )]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SolverSection::default().is_valid());
        assert!(ImpliedSection::default().is_valid());
        assert!(IntegrationSection::default().is_valid());
        assert!(BootstrapSection::default().is_valid());
    }

    #[test]
    fn test_solver_section_validation() {
        let mut section = SolverSection::default();
        section.method = "golden-section".to_string();
        section.step_tolerance = 0.0;
        section.max_iterations = 0;

        let fields: Vec<_> = section.validate().into_iter().map(|e| e.field).collect();

        assert_eq!(
            fields,
            vec![
                "solver.method",
                "solver.step_tolerance",
                "solver.max_iterations"
            ]
        );
    }

    #[test]
    fn test_solver_config_conversion() {
        let section = SolverSection {
            step_tolerance: 1e-8,
            function_tolerance: 1e-9,
            max_iterations: 25,
            ..SolverSection::default()
        };

        let config = section.solver_config();

        assert_eq!(config, SolverConfig::new(1e-8, 1e-9, 25));
    }

    #[test]
    fn test_volatility_bracket_must_be_positive() {
        let section = ImpliedSection {
            volatility_bracket: Some((0.0, 2.0)),
            yield_bracket: Some((-0.05, 0.2)),
            ..ImpliedSection::default()
        };

        let errors = section.validate();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "implied.volatility_bracket");
        assert_eq!(errors[0].rule.as_deref(), Some("bracket_domain"));
    }

    #[test]
    fn test_reversed_bracket() {
        let section = ImpliedSection {
            yield_bracket: Some((0.2, 0.1)),
            ..ImpliedSection::default()
        };

        assert!(!section.is_valid());
    }

    #[test]
    fn test_integration_validation() {
        let section = IntegrationSection {
            tolerance: f64::NAN,
            max_refinements: 100,
        };

        assert_eq!(section.validate().len(), 2);
    }

    #[test]
    fn test_bootstrap_validation() {
        let section = BootstrapSection {
            initial_guess: f64::INFINITY,
        };

        assert!(!section.is_valid());
    }
}
