//! # Quantcalc Curves
//!
//! Sequential bootstrapping of a piecewise-linear zero curve from bond
//! prices.
//!
//! The bootstrapper walks the bonds in maturity order. Payment times the
//! working curve already covers are read off it; the remaining ones are
//! placed on a straight line from the last known point to an unknown rate
//! at the bond's maturity, which Newton-Raphson solves for so that the
//! bond reprices exactly.
//!
//! ```rust
//! use quantcalc_bonds::Bond;
//! use quantcalc_curves::bootstrap;
//!
//! let bonds = vec![
//!     Bond::builder().maturity(1.0).coupon_percent(3.0).price(101.25).build().unwrap(),
//!     Bond::builder().maturity(1.5).coupon_percent(2.0).price(99.95).build().unwrap(),
//! ];
//!
//! let curve = bootstrap(&bonds, 0.015).unwrap();
//! assert_eq!(curve.short_rate(), 0.015);
//! assert_eq!(curve.tenors(), vec![0.0, 0.5, 1.0, 1.5]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]

pub mod bootstrap;
pub mod error;
pub mod zero_curve;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{bootstrap, Bootstrapper, DEFAULT_INITIAL_GUESS};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::zero_curve::{YieldCurve, ZeroPoint};
}

pub use bootstrap::{bootstrap, Bootstrapper};
pub use error::{CurveError, CurveResult};
pub use zero_curve::{YieldCurve, ZeroPoint};
