//! Quantcalc Configuration Layer
//!
//! Default tolerances, iteration caps and starting points for every solve
//! the library performs, loadable from TOML or JSON.
//!
//! # Example
//!
//! ```rust
//! use quantcalc_config::{CalcConfig, Validate};
//!
//! let config = CalcConfig::from_toml_str(
//!     r#"
//!     [solver]
//!     method = "secant"
//!     max_iterations = 50
//!
//!     [bootstrap]
//!     initial_guess = 0.03
//!     "#,
//! )
//! .unwrap();
//!
//! assert!(config.is_valid());
//! assert_eq!(config.solver.max_iterations, 50);
//! assert_eq!(config.solver.step_tolerance, 1e-10);
//! assert_eq!(config.bootstrapper().initial_guess(), 0.03);
//! ```
//!
//! # Sections
//!
//! - `[solver]`: method, tolerances and iteration cap shared by every solve
//! - `[implied]`: starting points and optional brackets for implied yield and
//!   implied volatility
//! - `[integration]`: adaptive Simpson tolerance and refinement cap
//! - `[bootstrap]`: starting rate of each curve segment solve

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod calc;
mod error;
mod sections;

pub use calc::{CalcConfig, ConfigFormat};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use sections::{BootstrapSection, ImpliedSection, IntegrationSection, SolverSection};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calc::CalcConfig;
    pub use crate::error::{ConfigError, ConfigResult, Validate};
}
