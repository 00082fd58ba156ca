//! Diagnostic hooks for root-finding progress.

use crate::error::MathResult;
use crate::solvers::SolverResult;

/// One solver iteration, as reported to a [`SolverObserver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationEvent {
    /// Solver name.
    pub method: &'static str,
    /// Zero-based iteration index.
    pub iteration: u32,
    /// Iterate produced by this step.
    pub x: f64,
    /// Function value at `x`.
    pub fx: f64,
}

/// Receives progress and outcome reports from the solvers.
///
/// Solvers never log on their own; callers that want diagnostics inject an
/// observer. Both hooks default to no-ops.
pub trait SolverObserver {
    /// Called after every iteration.
    fn on_iteration(&self, _event: &IterationEvent) {}

    /// Called once with the final outcome.
    fn on_finish(&self, _method: &'static str, _outcome: &MathResult<SolverResult>) {}
}

/// Observer that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl SolverObserver for Silent {}

/// Observer that forwards to the `log` facade.
///
/// Iterations go to `trace`, convergence to `debug`, failures to `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl SolverObserver for LogObserver {
    fn on_iteration(&self, event: &IterationEvent) {
        log::trace!(
            "{} iteration {}: x = {:.12}, f(x) = {:.3e}",
            event.method,
            event.iteration,
            event.x,
            event.fx
        );
    }

    fn on_finish(&self, method: &'static str, outcome: &MathResult<SolverResult>) {
        match outcome {
            Ok(result) => log::debug!(
                "{} converged to {:.12} in {} iterations (residual {:.3e})",
                method,
                result.root,
                result.iterations,
                result.residual
            ),
            Err(err) => log::warn!("{} failed: {}", method, err),
        }
    }
}
