//! Newton-Raphson root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{
    IterationEvent, Silent, SolverConfig, SolverObserver, SolverResult, DEGENERATE_DERIVATIVE,
};

const METHOD: &str = "Newton-Raphson";

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration:
/// `x_{n+1} = x_n - f(x_n) / f'(x_n)`
///
/// This method has quadratic convergence near the root but requires
/// the derivative of the function. There is deliberately no
/// finite-difference variant: callers pass the analytic derivative.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `df` - The derivative of the function
/// * `initial_guess` - Starting point for the iteration
/// * `config` - Solver configuration
///
/// # Errors
///
/// * [`MathError::DegenerateDerivative`] if `|f'(x_n)|` falls below
///   [`DEGENERATE_DERIVATIVE`]
/// * [`MathError::NonFiniteValue`] if `f` or `f'` evaluates to NaN/inf
/// * [`MathError::NonConvergence`] if the iteration cap is exhausted
///
/// # Example
///
/// ```rust
/// use quantcalc_math::solvers::{newton_raphson, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    newton_raphson_observed(f, df, initial_guess, config, &Silent)
}

/// Newton-Raphson reporting each iteration to `observer`.
///
/// `df` is always evaluated at the point `f` was last evaluated at, so
/// callers backed by a cache can serve the derivative from that evaluation.
pub fn newton_raphson_observed<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
    observer: &dyn SolverObserver,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let outcome = iterate(f, df, initial_guess, config, observer);
    observer.on_finish(METHOD, &outcome);
    outcome
}

fn iterate<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
    observer: &dyn SolverObserver,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = initial_guess;
    let mut fx = f(x);
    if !fx.is_finite() {
        return Err(MathError::NonFiniteValue { x });
    }

    for iteration in 0..config.max_iterations {
        let dfx = df(x);
        if !dfx.is_finite() {
            return Err(MathError::NonFiniteValue { x });
        }
        if dfx.abs() < DEGENERATE_DERIVATIVE {
            return Err(MathError::DegenerateDerivative { x, derivative: dfx });
        }

        let x_next = x - fx / dfx;
        let f_next = f(x_next);
        if !x_next.is_finite() || !f_next.is_finite() {
            return Err(MathError::NonFiniteValue { x: x_next });
        }

        observer.on_iteration(&IterationEvent {
            method: METHOD,
            iteration,
            x: x_next,
            fx: f_next,
        });

        if config.converged(x_next - x, fx - f_next) {
            return Ok(SolverResult {
                root: x_next,
                iterations: iteration + 1,
                residual: f_next,
            });
        }

        x = x_next;
        fx = f_next;
    }

    Err(MathError::non_convergence(config.max_iterations, fx.abs()))
}
