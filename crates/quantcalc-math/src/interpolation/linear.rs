//! Piecewise-linear interpolation.

use crate::error::{MathError, MathResult};
use crate::interpolation::Interpolator;

/// Straight lines between consecutive knots.
///
/// ```rust
/// use quantcalc_math::interpolation::{Interpolator, LinearInterpolator};
///
/// let curve = LinearInterpolator::new(vec![0.0, 1.0, 3.0], vec![0.01, 0.02, 0.03]).unwrap();
/// assert!((curve.interpolate(2.0).unwrap() - 0.025).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl LinearInterpolator {
    /// Builds an interpolator over the knots `(xs[i], ys[i])`.
    ///
    /// # Errors
    ///
    /// * [`MathError::DimensionMismatch`] if `xs` and `ys` differ in length
    /// * [`MathError::InsufficientData`] for fewer than two knots
    /// * [`MathError::InvalidInput`] if `xs` is not strictly increasing
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        if xs.len() != ys.len() {
            return Err(MathError::dimension_mismatch(xs.len(), ys.len()));
        }
        if xs.len() < 2 {
            return Err(MathError::insufficient_data(2, xs.len()));
        }
        if let Some(pair) = xs.windows(2).find(|w| w[1] <= w[0]) {
            return Err(MathError::invalid_input(format!(
                "abscissae must be strictly increasing, found {} then {}",
                pair[0], pair[1]
            )));
        }

        Ok(Self { xs, ys })
    }

    /// Knot abscissae.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Knot ordinates.
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    fn last(&self) -> usize {
        self.xs.len() - 1
    }

    /// Index `i` of the segment `[xs[i], xs[i + 1]]` holding `x`.
    fn segment(&self, x: f64) -> usize {
        let upper = self.xs.partition_point(|&knot| knot <= x);
        upper.saturating_sub(1).min(self.last() - 1)
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        if !self.in_range(x) {
            return Err(MathError::ExtrapolationNotAllowed {
                x,
                min: self.min_x(),
                max: self.max_x(),
            });
        }

        let i = self.segment(x);
        let slope = (self.ys[i + 1] - self.ys[i]) / (self.xs[i + 1] - self.xs[i]);
        Ok(self.ys[i] + (x - self.xs[i]) * slope)
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.last()]
    }
}
