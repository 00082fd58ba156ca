//! Interpolation on strictly increasing abscissae.
//!
//! Zero curves in this library are piecewise linear in time, so the only
//! scheme provided is [`LinearInterpolator`]. Queries outside the data range
//! fail with `ExtrapolationNotAllowed`.

mod linear;

pub use linear::LinearInterpolator;

use crate::error::MathResult;

/// Common interface for one-dimensional interpolators.
pub trait Interpolator: Send + Sync {
    /// Value at `x`.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Smallest abscissa in the data.
    fn min_x(&self) -> f64;

    /// Largest abscissa in the data.
    fn max_x(&self) -> f64;

    /// Returns true if `x` lies inside the data range (inclusive).
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_trait_object_usage() {
        let interp: Box<dyn Interpolator> = Box::new(
            LinearInterpolator::new(vec![0.0, 0.5, 1.0], vec![0.015, 0.016, 0.017]).unwrap(),
        );

        assert!(interp.in_range(0.25));
        assert!(!interp.in_range(1.5));
        assert!(!interp.in_range(f64::NAN));
        assert_relative_eq!(interp.interpolate(0.25).unwrap(), 0.0155, epsilon = 1e-12);
    }
}
