//! Standard normal density and distribution function.

use std::f64::consts::SQRT_2;

use statrs::function::erf::erfc;

/// `1 / sqrt(2π)`.
const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Standard normal density.
#[inline]
pub fn pdf(x: f64) -> f64 {
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Standard normal cumulative distribution, `0.5 * erfc(-x / √2)`.
///
/// Using `erfc` keeps full relative precision in the lower tail, so
/// `cdf(-d)` is preferred over `1 - cdf(d)`.
#[inline]
pub fn cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}
