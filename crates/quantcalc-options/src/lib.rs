//! # Quantcalc Options
//!
//! Plain vanilla European options under continuous-dividend
//! Black-Scholes-Merton.
//!
//! - [`VanillaOption`]: premium, vega and the full [`Greeks`] set, kept
//!   consistent with the inputs on every update
//! - Implied volatility: build with a market price instead of a volatility,
//!   or call [`VanillaOption::with_price`]
//!
//! Time sensitivities (theta, charm, veta, color) are calendar-time
//! derivatives, i.e. `-∂/∂T`.
//!
//! ## Example
//!
//! ```rust
//! use quantcalc_options::prelude::*;
//!
//! let call = VanillaOption::builder()
//!     .spot(100.0)
//!     .strike(100.0)
//!     .maturity(1.0)
//!     .rate(0.05)
//!     .price(8.0)
//!     .build()
//!     .unwrap();
//!
//! assert!((call.premium() - 8.0).abs() < 1e-6);
//! assert!(call.volatility() > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::return_self_not_must_use)]

pub mod greeks;
pub mod normal;
pub mod option;
pub mod parameter;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::greeks::Greeks;
    pub use crate::option::{OptionBuilder, OptionType, VanillaOption};
    pub use crate::parameter::OptionParameter;
    pub use quantcalc_core::{PricingError, PricingResult};
}

pub use greeks::Greeks;
pub use option::{OptionBuilder, OptionType, VanillaOption};
pub use parameter::OptionParameter;
