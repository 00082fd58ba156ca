//! # Quantcalc Core
//!
//! Shared pieces used by every pricing entity in Quantcalc:
//!
//! - [`error`]: the [`PricingError`] taxonomy
//! - [`cache`]: the two-tier [`TieredCache`] recompute discipline
//! - [`implied`]: [`ImpliedSolver`], which inverts an entity's pricing
//!   function against a market value using the entity's analytic derivative
//! - [`cashflow`] and [`tvm`]: present value, internal rate of return and
//!   related time-value-of-money helpers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::float_cmp)]

pub mod cache;
pub mod cashflow;
pub mod error;
pub mod implied;
pub mod tvm;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cache::TieredCache;
    pub use crate::cashflow::CashFlows;
    pub use crate::error::{PricingError, PricingResult};
    pub use crate::implied::{ImpliedSolution, ImpliedSolver, ImpliedTarget, TargetDomain};
    pub use crate::tvm::Compounding;
}

pub use error::{PricingError, PricingResult};
