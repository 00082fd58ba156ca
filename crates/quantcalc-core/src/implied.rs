//! Implied-parameter solving.
//!
//! [`ImpliedSolver`] finds the value of an entity's target input (yield,
//! volatility) at which its model value matches an observed market value.
//! The entity supplies its own analytic derivative with respect to the
//! target, so there is no numerical differentiation.
//!
//! The solve runs against a private copy of the entity: only the primary
//! cache tier is refreshed per iteration, the secondary tier once at the
//! end. A failed solve returns an error and leaves the caller's entity as
//! it was.

use std::cell::RefCell;

use quantcalc_math::solvers::{
    Silent, SolverConfig, SolverMethod, SolverObserver, SolverResult,
};

use crate::cache::TieredCache;
use crate::error::{ensure_finite, PricingError, PricingResult};

/// Default starting point for implied solves.
pub const DEFAULT_INITIAL_GUESS: f64 = 0.1;

/// Valid domain of a target parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetDomain {
    /// Any finite real (yields).
    Real,
    /// Strictly positive reals (volatilities).
    Positive,
}

impl TargetDomain {
    /// Returns true if `x` lies in the domain.
    pub fn contains(self, x: f64) -> bool {
        match self {
            TargetDomain::Real => x.is_finite(),
            TargetDomain::Positive => x.is_finite() && x > 0.0,
        }
    }
}

/// An entity whose model value can be inverted for one input.
///
/// `model_value` must be monotonic in the target over [`domain`](Self::domain).
pub trait ImpliedTarget: TieredCache + Clone {
    /// Name of the target input, used in error messages.
    const TARGET: &'static str;

    /// Domain the target must stay in.
    fn domain(&self) -> TargetDomain;

    /// Current target value.
    fn target(&self) -> f64;

    /// Stores `x` as the target and refreshes the primary tier only.
    fn load_target(&mut self, x: f64);

    /// Model value from the primary tier.
    fn model_value(&self) -> f64;

    /// Analytic derivative of [`model_value`](Self::model_value) with
    /// respect to the target, from the primary tier.
    fn model_sensitivity(&self) -> f64;
}

/// A solved entity together with solver diagnostics.
#[derive(Debug, Clone)]
pub struct ImpliedSolution<T> {
    /// Fully refreshed entity carrying the implied target.
    pub entity: T,
    /// Raw solver output.
    pub result: SolverResult,
}

impl<T> ImpliedSolution<T> {
    /// The implied target value.
    pub fn value(&self) -> f64 {
        self.result.root
    }
}

/// Inverts entity pricing functions against market values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpliedSolver {
    config: SolverConfig,
    initial_guess: f64,
    method: SolverMethod,
    bracket: Option<(f64, f64)>,
}

impl Default for ImpliedSolver {
    fn default() -> Self {
        Self {
            config: SolverConfig::default(),
            initial_guess: DEFAULT_INITIAL_GUESS,
            method: SolverMethod::Newton,
            bracket: None,
        }
    }
}

impl ImpliedSolver {
    /// Newton-Raphson from [`DEFAULT_INITIAL_GUESS`] with default tolerances.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the solver tolerances and iteration cap.
    #[must_use]
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the starting point.
    #[must_use]
    pub fn with_initial_guess(mut self, guess: f64) -> Self {
        self.initial_guess = guess;
        self
    }

    /// Sets the root-finding method.
    #[must_use]
    pub fn with_method(mut self, method: SolverMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the bracket used by bisection and as secant start points.
    #[must_use]
    pub fn with_bracket(mut self, lower: f64, upper: f64) -> Self {
        self.bracket = Some((lower, upper));
        self
    }

    /// Solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Starting point.
    pub fn initial_guess(&self) -> f64 {
        self.initial_guess
    }

    /// Root-finding method.
    pub fn method(&self) -> SolverMethod {
        self.method
    }

    /// Solves `entity.model_value(x) = market` for `x`.
    pub fn solve<T: ImpliedTarget>(
        &self,
        entity: &T,
        market: f64,
    ) -> PricingResult<ImpliedSolution<T>> {
        self.solve_observed(entity, market, &Silent)
    }

    /// Like [`solve`](Self::solve), reporting solver progress to `observer`.
    pub fn solve_observed<T: ImpliedTarget>(
        &self,
        entity: &T,
        market: f64,
        observer: &dyn SolverObserver,
    ) -> PricingResult<ImpliedSolution<T>> {
        ensure_finite("market value", market)?;
        let domain = entity.domain();
        if !domain.contains(self.initial_guess) {
            return Err(PricingError::invalid_parameter(
                T::TARGET,
                self.initial_guess,
                "initial guess lies outside the target domain",
            ));
        }

        let working = RefCell::new(entity.clone());

        let objective = |x: f64| {
            // NaN makes the solver stop with NonFiniteValue.
            if !domain.contains(x) {
                return f64::NAN;
            }
            let mut copy = working.borrow_mut();
            copy.load_target(x);
            copy.model_value() - market
        };
        let sensitivity = |x: f64| {
            let mut copy = working.borrow_mut();
            if copy.target() != x {
                copy.load_target(x);
            }
            copy.model_sensitivity()
        };

        let result = self.method.solve(
            objective,
            Some(sensitivity),
            self.initial_guess,
            self.bracket,
            &self.config,
            observer,
        )?;

        let mut solved = working.into_inner();
        if solved.target() != result.root {
            solved.load_target(result.root);
        }
        solved.refresh_secondary();

        log::debug!(
            "implied {} = {:.10} after {} iterations",
            T::TARGET,
            result.root,
            result.iterations
        );

        Ok(ImpliedSolution {
            entity: solved,
            result,
        })
    }
}
