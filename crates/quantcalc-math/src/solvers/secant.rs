//! Secant root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{IterationEvent, Silent, SolverConfig, SolverObserver, SolverResult};

const METHOD: &str = "Secant";

/// Secant root-finding algorithm.
///
/// Similar to Newton-Raphson but replaces the derivative with the divided
/// difference of the two most recent iterates:
///
/// `x_{n+1} = x_n - f(x_n) (x_n - x_{n-1}) / (f(x_n) - f(x_{n-1}))`
///
/// Convergence rate is superlinear (order ~1.618, the golden ratio).
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `x0` - First initial guess
/// * `x1` - Second initial guess (should be different from x0)
/// * `config` - Solver configuration
///
/// # Errors
///
/// * [`MathError::DivergentSecant`] if two consecutive function values
///   coincide before the stopping rule is met
/// * [`MathError::NonFiniteValue`] if `f` evaluates to NaN/inf
/// * [`MathError::NonConvergence`] if the iteration cap is exhausted
///
/// # Example
///
/// ```rust
/// use quantcalc_math::solvers::{secant, SolverConfig};
///
/// let f = |x: f64| x - 5.0;
///
/// let result = secant(f, 0.0, 10.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - 5.0).abs() < 1e-10);
/// ```
pub fn secant<F>(f: F, x0: f64, x1: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    secant_observed(f, x0, x1, config, &Silent)
}

/// Secant method reporting each iteration to `observer`.
pub fn secant_observed<F>(
    f: F,
    x0: f64,
    x1: f64,
    config: &SolverConfig,
    observer: &dyn SolverObserver,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let outcome = iterate(f, x0, x1, config, observer);
    observer.on_finish(METHOD, &outcome);
    outcome
}

fn iterate<F>(
    f: F,
    x0: f64,
    x1: f64,
    config: &SolverConfig,
    observer: &dyn SolverObserver,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut x_prev = x0;
    let mut x_curr = x1;
    let mut f_prev = f(x_prev);
    let mut f_curr = f(x_curr);
    if !f_prev.is_finite() {
        return Err(MathError::NonFiniteValue { x: x_prev });
    }
    if !f_curr.is_finite() {
        return Err(MathError::NonFiniteValue { x: x_curr });
    }

    for iteration in 0..config.max_iterations {
        let denom = f_curr - f_prev;
        if denom == 0.0 {
            // A flat secant is only acceptable when the iterates have already met.
            if config.converged(x_curr - x_prev, denom) {
                return Ok(SolverResult {
                    root: x_curr,
                    iterations: iteration,
                    residual: f_curr,
                });
            }
            return Err(MathError::DivergentSecant {
                x_prev,
                x_curr,
                fx: f_curr,
            });
        }

        let x_next = x_curr - f_curr * (x_curr - x_prev) / denom;
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

        if config.converged(x_next - x_curr, f_curr - f_next) {
            return Ok(SolverResult {
                root: x_next,
                iterations: iteration + 1,
                residual: f_next,
            });
        }

        x_prev = x_curr;
        f_prev = f_curr;
        x_curr = x_next;
        f_curr = f_next;
    }

    Err(MathError::non_convergence(
        config.max_iterations,
        f_curr.abs(),
    ))
}
