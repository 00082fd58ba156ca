//! Bisection root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{IterationEvent, Silent, SolverConfig, SolverObserver, SolverResult};

const METHOD: &str = "Bisection";

/// Bisection root-finding algorithm.
///
/// A simple and reliable bracketing method that works by repeatedly
/// halving the interval and selecting the subinterval containing the root.
/// It is the slowest of the three solvers and is meant as an explicit
/// fallback, never as a silent default.
///
/// Requires `f(a)` and `f(b)` to have opposite signs. If either endpoint is
/// an exact root it is returned immediately. Iteration stops when the
/// bracket is narrower than `step_tolerance` **or** the function values at
/// its ends differ by less than `function_tolerance`.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `a` - One end of the bracket
/// * `b` - The other end of the bracket
/// * `config` - Solver configuration
///
/// # Errors
///
/// * [`MathError::InvalidBracket`] if the endpoints share a sign
/// * [`MathError::NonConvergence`] if the iteration cap is exhausted
///
/// # Example
///
/// ```rust
/// use quantcalc_math::solvers::{bisection, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    bisection_observed(f, a, b, config, &Silent)
}

/// Bisection reporting each halving to `observer`.
pub fn bisection_observed<F>(
    f: F,
    a: f64,
    b: f64,
    config: &SolverConfig,
    observer: &dyn SolverObserver,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let outcome = iterate(f, a, b, config, observer);
    observer.on_finish(METHOD, &outcome);
    outcome
}

fn iterate<F>(
    f: F,
    a: f64,
    b: f64,
    config: &SolverConfig,
    observer: &dyn SolverObserver,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let fa = f(a);
    let fb = f(b);
    if !fa.is_finite() {
        return Err(MathError::NonFiniteValue { x: a });
    }
    if !fb.is_finite() {
        return Err(MathError::NonFiniteValue { x: b });
    }

    if fa == 0.0 {
        return Ok(SolverResult {
            root: a,
            iterations: 0,
            residual: fa,
        });
    }
    if fb == 0.0 {
        return Ok(SolverResult {
            root: b,
            iterations: 0,
            residual: fb,
        });
    }
    if fa.signum() == fb.signum() {
        return Err(MathError::InvalidBracket { a, b, fa, fb });
    }

    // Orient the bracket so that g = sign * f is increasing from lo to hi.
    let sign = if fa < 0.0 { 1.0 } else { -1.0 };
    let (mut lo, mut hi) = (a, b);
    let (mut g_lo, mut g_hi) = (sign * fa, sign * fb);

    for iteration in 0..config.max_iterations {
        if (hi - lo).abs() < config.step_tolerance
            || (g_hi - g_lo).abs() < config.function_tolerance
        {
            let mid = 0.5 * (lo + hi);
            return Ok(SolverResult {
                root: mid,
                iterations: iteration,
                residual: f(mid),
            });
        }

        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid);
        if !f_mid.is_finite() {
            return Err(MathError::NonFiniteValue { x: mid });
        }

        observer.on_iteration(&IterationEvent {
            method: METHOD,
            iteration,
            x: mid,
            fx: f_mid,
        });

        let g_mid = sign * f_mid;
        if g_mid == 0.0 {
            return Ok(SolverResult {
                root: mid,
                iterations: iteration + 1,
                residual: f_mid,
            });
        }
        if g_mid < 0.0 {
            lo = mid;
            g_lo = g_mid;
        } else {
            hi = mid;
            g_hi = g_mid;
        }
    }

    Err(MathError::non_convergence(
        config.max_iterations,
        (g_hi - g_lo).abs(),
    ))
}
