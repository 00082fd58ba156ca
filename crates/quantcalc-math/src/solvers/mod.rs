//! Root-finding algorithms.
//!
//! This module provides numerical solvers for finding roots of scalar equations:
//!
//! - [`newton_raphson`]: Fast quadratic convergence when an analytic derivative is available
//! - [`secant`]: Derivative-free method using divided differences
//! - [`bisection`]: Slow but reliable bracketing method, an explicit fallback
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Newton-Raphson | Fastest (quadratic) | May diverge | Derivative |
//! | Secant | Fast (superlinear) | May diverge | Two guesses |
//! | Bisection | Slow (linear) | Guaranteed | Bracket |
//!
//! # Stopping Rule
//!
//! Newton-Raphson and secant stop only when **both** the step
//! `|x_{n+1} - x_n|` is below `step_tolerance` **and** the change in function
//! value `|f(x_n) - f(x_{n+1})|` is below `function_tolerance`. A small step on
//! a flat but wrong region is therefore not mistaken for convergence.
//!
//! # Example: Continuously Compounded YTM
//!
//! ```rust
//! use quantcalc_math::solvers::{newton_raphson, SolverConfig};
//!
//! // 2-year bond, 5% annual coupon, price 101
//! let flows = [(1.0, 5.0), (2.0, 105.0)];
//! let f = |y: f64| flows.iter().map(|(t, c)| c * (-y * t).exp()).sum::<f64>() - 101.0;
//! let df = |y: f64| flows.iter().map(|(t, c)| -t * c * (-y * t).exp()).sum::<f64>();
//!
//! let result = newton_raphson(f, df, 0.1, &SolverConfig::default()).unwrap();
//! assert!(f(result.root).abs() < 1e-9);
//! ```

mod bisection;
mod newton;
mod observer;
mod secant;

use std::fmt;
use std::str::FromStr;

pub use bisection::{bisection, bisection_observed};
pub use newton::{newton_raphson, newton_raphson_observed};
pub use observer::{IterationEvent, LogObserver, Silent, SolverObserver};
pub use secant::{secant, secant_observed};

use crate::error::{MathError, MathResult};

/// Default step tolerance for root-finding algorithms.
pub const DEFAULT_STEP_TOLERANCE: f64 = 1e-10;

/// Default function-value tolerance for root-finding algorithms.
pub const DEFAULT_FUNCTION_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Derivative magnitudes below this are treated as zero by Newton-Raphson.
pub const DEGENERATE_DERIVATIVE: f64 = 1e-14;

/// Offset of the second secant guess when only one guess is supplied.
pub const SECANT_OFFSET: f64 = 0.1;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Convergence threshold on the distance between consecutive iterates.
    pub step_tolerance: f64,
    /// Convergence threshold on the change in function value.
    pub function_tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            step_tolerance: DEFAULT_STEP_TOLERANCE,
            function_tolerance: DEFAULT_FUNCTION_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(step_tolerance: f64, function_tolerance: f64, max_iterations: u32) -> Self {
        Self {
            step_tolerance,
            function_tolerance,
            max_iterations,
        }
    }

    /// Sets both tolerances to the same value.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.step_tolerance = tolerance;
        self.function_tolerance = tolerance;
        self
    }

    /// Sets the step tolerance.
    #[must_use]
    pub fn with_step_tolerance(mut self, tolerance: f64) -> Self {
        self.step_tolerance = tolerance;
        self
    }

    /// Sets the function-value tolerance.
    #[must_use]
    pub fn with_function_tolerance(mut self, tolerance: f64) -> Self {
        self.function_tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Returns true when both halves of the dual stopping rule hold.
    #[inline]
    pub(crate) fn converged(&self, step: f64, function_change: f64) -> bool {
        step.abs() < self.step_tolerance && function_change.abs() < self.function_tolerance
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

/// Named root-finding method, as requested by configuration or callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SolverMethod {
    /// Newton-Raphson with an analytic derivative.
    #[default]
    Newton,
    /// Secant method.
    Secant,
    /// Bisection on a bracket.
    Bisection,
}

impl SolverMethod {
    /// Canonical lower-case name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SolverMethod::Newton => "newton",
            SolverMethod::Secant => "secant",
            SolverMethod::Bisection => "bisection",
        }
    }

    /// Solves `f(x) = 0` with this method.
    ///
    /// `derivative` is required by Newton and ignored otherwise. `bounds` is
    /// required by bisection and supplies the two starting points of the
    /// secant method.
    pub fn solve<F, D>(
        &self,
        f: F,
        derivative: Option<D>,
        initial_guess: f64,
        bounds: Option<(f64, f64)>,
        config: &SolverConfig,
        observer: &dyn SolverObserver,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        match self {
            SolverMethod::Newton => {
                NewtonSolver.solve_observed(f, derivative, initial_guess, bounds, config, observer)
            }
            SolverMethod::Secant => {
                SecantSolver.solve_observed(f, derivative, initial_guess, bounds, config, observer)
            }
            SolverMethod::Bisection => BisectionSolver.solve_observed(
                f,
                derivative,
                initial_guess,
                bounds,
                config,
                observer,
            ),
        }
    }
}

impl fmt::Display for SolverMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolverMethod {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newton" | "newton-raphson" | "newton_raphson" => Ok(SolverMethod::Newton),
            "secant" => Ok(SolverMethod::Secant),
            "bisection" | "bisect" => Ok(SolverMethod::Bisection),
            _ => Err(MathError::unsupported_method(s)),
        }
    }
}

/// Trait for root-finding solvers with optional derivative.
///
/// This trait provides a unified interface for all solvers.
///
/// # Example
///
/// ```rust
/// use quantcalc_math::solvers::{Solver, NewtonSolver, SolverConfig};
///
/// let solver = NewtonSolver;
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = solver.solve(f, Some(df), 1.5, None, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub trait Solver {
    /// Solves for a root, reporting progress to `observer`.
    fn solve_observed<F, D>(
        &self,
        f: F,
        derivative: Option<D>,
        initial_guess: f64,
        bounds: Option<(f64, f64)>,
        config: &SolverConfig,
        observer: &dyn SolverObserver,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64;

    /// Solves for a root without progress reporting.
    fn solve<F, D>(
        &self,
        f: F,
        derivative: Option<D>,
        initial_guess: f64,
        bounds: Option<(f64, f64)>,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        self.solve_observed(f, derivative, initial_guess, bounds, config, &Silent)
    }

    /// Returns the name of the solver.
    fn name(&self) -> &'static str;
}

/// Newton-Raphson solver implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewtonSolver;

impl Solver for NewtonSolver {
    fn solve_observed<F, D>(
        &self,
        f: F,
        derivative: Option<D>,
        initial_guess: f64,
        _bounds: Option<(f64, f64)>,
        config: &SolverConfig,
        observer: &dyn SolverObserver,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        match derivative {
            Some(df) => newton_raphson_observed(f, df, initial_guess, config, observer),
            None => Err(MathError::invalid_input(
                "Newton-Raphson requires an analytic derivative",
            )),
        }
    }

    fn name(&self) -> &'static str {
        "Newton-Raphson"
    }
}

/// Secant method solver implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecantSolver;

impl Solver for SecantSolver {
    fn solve_observed<F, D>(
        &self,
        f: F,
        _derivative: Option<D>,
        initial_guess: f64,
        bounds: Option<(f64, f64)>,
        config: &SolverConfig,
        observer: &dyn SolverObserver,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        let (x0, x1) = bounds.unwrap_or((initial_guess, initial_guess + SECANT_OFFSET));
        secant_observed(f, x0, x1, config, observer)
    }

    fn name(&self) -> &'static str {
        "Secant"
    }
}

/// Bisection solver implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BisectionSolver;

impl Solver for BisectionSolver {
    fn solve_observed<F, D>(
        &self,
        f: F,
        _derivative: Option<D>,
        _initial_guess: f64,
        bounds: Option<(f64, f64)>,
        config: &SolverConfig,
        observer: &dyn SolverObserver,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        let (a, b) =
            bounds.ok_or_else(|| MathError::invalid_input("Bisection requires a bracket"))?;
        bisection_observed(f, a, b, config, observer)
    }

    fn name(&self) -> &'static str {
        "Bisection"
    }
}
