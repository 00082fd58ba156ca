//! Numerical integration.
//!
//! - [`simpsons`]: composite Simpson's rule on a fixed, even partition
//! - [`integrate`]: adaptive wrapper that doubles the partition until two
//!   successive estimates agree
//!
//! Used wherever a closed form is unavailable, e.g. integrating a density
//! against a payoff.
//!
//! ```rust
//! use quantcalc_math::integration::{integrate, IntegrationConfig};
//!
//! let area = integrate(|x: f64| x.sin(), 0.0, std::f64::consts::PI, &IntegrationConfig::default()).unwrap();
//! assert!((area - 2.0).abs() < 1e-8);
//! ```

mod simpson;

pub use simpson::{integrate, simpsons};

/// Partition count of the first adaptive estimate.
pub const INITIAL_PARTITIONS: usize = 4;

/// Default absolute tolerance between successive estimates.
pub const DEFAULT_INTEGRATION_TOLERANCE: f64 = 1e-8;

/// Default cap on partition doublings.
pub const DEFAULT_MAX_REFINEMENTS: u32 = 24;

/// Configuration for adaptive integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationConfig {
    /// Stop once two successive estimates differ by less than this.
    pub tolerance: f64,
    /// Maximum number of partition doublings.
    pub max_refinements: u32,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_INTEGRATION_TOLERANCE,
            max_refinements: DEFAULT_MAX_REFINEMENTS,
        }
    }
}

impl IntegrationConfig {
    /// Creates a new integration configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_refinements: u32) -> Self {
        Self {
            tolerance,
            max_refinements,
        }
    }
}
