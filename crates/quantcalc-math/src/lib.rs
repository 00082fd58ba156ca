//! # Quantcalc Math
//!
//! Numerical building blocks for the Quantcalc analytics library.
//!
//! This crate provides:
//!
//! - **Solvers**: Root-finding algorithms (Newton-Raphson, secant, bisection)
//! - **Integration**: Composite and adaptive Simpson's rule
//! - **Interpolation**: Linear interpolation used by zero curves
//!
//! ## Design Philosophy
//!
//! - **Typed failure**: every solver returns a [`MathError`] instead of looping
//!   forever or propagating a raw arithmetic fault
//! - **Deterministic**: identical inputs and tolerances give identical outputs
//! - **No hidden side effects**: progress reporting goes to an injected
//!   [`solvers::SolverObserver`], never to a global sink

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod integration;
pub mod interpolation;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::integration::{integrate, simpsons, IntegrationConfig};
    pub use crate::interpolation::{Interpolator, LinearInterpolator};
    pub use crate::solvers::{
        bisection, newton_raphson, secant, BisectionSolver, LogObserver, NewtonSolver,
        SecantSolver, Silent, Solver, SolverConfig, SolverMethod, SolverObserver, SolverResult,
    };
}

pub use error::{MathError, MathResult};
