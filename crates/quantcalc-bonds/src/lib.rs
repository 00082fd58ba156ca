//! # Quantcalc Bonds
//!
//! Coupon-bearing bonds under a continuously compounded yield.
//!
//! - **Schedule**: payment times counted back from maturity, last payment
//!   carrying the face value
//! - **Pricing**: price, dB/dy, duration, convexity, DV01
//! - **Yields**: yield to maturity from price, current yield, bank discount
//!   and money-market yields for zero-coupon bonds
//!
//! ## Example
//!
//! ```rust
//! use quantcalc_bonds::prelude::*;
//!
//! // 18-month 2% semi-annual bond quoted at 99.95
//! let bond = Bond::builder()
//!     .maturity(1.5)
//!     .coupon_rate(0.02)
//!     .price(99.95)
//!     .build()
//!     .unwrap();
//!
//! assert!((bond.price() - 99.95).abs() < 1e-9);
//! assert!(bond.yield_rate() > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::return_self_not_must_use)]

pub mod bond;
pub mod parameter;
pub mod schedule;
mod yields;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bond::{Bond, BondAnalytics, BondBuilder};
    pub use crate::parameter::BondParameter;
    pub use crate::schedule::{cash_amounts, payment_times};
    pub use quantcalc_core::{PricingError, PricingResult};
}

pub use bond::{Bond, BondAnalytics, BondBuilder};
pub use parameter::BondParameter;
