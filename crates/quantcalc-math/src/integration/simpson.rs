//! Composite and adaptive Simpson's rule.

use crate::error::{MathError, MathResult};
use crate::integration::{IntegrationConfig, INITIAL_PARTITIONS};

/// Composite Simpson's rule over `n` equal sub-intervals of `[a, b]`.
///
/// Endpoints carry weight 1, odd interior nodes weight 4 and even interior
/// nodes weight 2; the sum is scaled by `(b - a) / (3n)`.
///
/// # Errors
///
/// Returns [`MathError::InvalidInput`] if `n` is zero or odd.
pub fn simpsons<F>(f: F, a: f64, b: f64, n: usize) -> MathResult<f64>
where
    F: Fn(f64) -> f64,
{
    if n == 0 || n % 2 != 0 {
        return Err(MathError::invalid_input(format!(
            "Simpson's rule needs a positive even partition count, got {n}"
        )));
    }

    let h = (b - a) / n as f64;
    let mut sum = f(a) + f(b);
    for i in 1..n {
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += weight * f(a + i as f64 * h);
    }

    Ok(sum * (b - a) / (3.0 * n as f64))
}

/// Adaptive Simpson integration of `f` over `[a, b]`.
///
/// Starts from [`INITIAL_PARTITIONS`] and doubles the partition count until
/// two successive estimates differ by less than `config.tolerance`.
///
/// # Errors
///
/// Returns [`MathError::NonConvergence`] once `config.max_refinements`
/// doublings have been spent, and [`MathError::NonFiniteValue`] if an
/// estimate is NaN or infinite.
pub fn integrate<F>(f: F, a: f64, b: f64, config: &IntegrationConfig) -> MathResult<f64>
where
    F: Fn(f64) -> f64,
{
    let mut n = INITIAL_PARTITIONS;
    let mut previous = simpsons(&f, a, b, n)?;
    if !previous.is_finite() {
        return Err(MathError::NonFiniteValue { x: a });
    }

    let mut gap = f64::INFINITY;
    for _ in 0..config.max_refinements {
        n *= 2;
        let current = simpsons(&f, a, b, n)?;
        if !current.is_finite() {
            return Err(MathError::NonFiniteValue { x: a });
        }
        gap = (current - previous).abs();
        if gap < config.tolerance {
            return Ok(current);
        }
        previous = current;
    }

    Err(MathError::non_convergence(config.max_refinements, gap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_simpsons_exact_on_cubics() {
        // Simpson's rule integrates polynomials up to degree 3 exactly
        let f = |x: f64| x * x * x - 2.0 * x + 1.0;

        let value = simpsons(f, 0.0, 2.0, 2).unwrap();

        assert_relative_eq!(value, 4.0 - 4.0 + 2.0, epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn test_simpsons_exact_on_random_cubics(
            c in prop::array::uniform4(-5.0f64..5.0),
            a in -3.0f64..0.0,
            b in 0.1f64..3.0,
            half_n in 1usize..20,
        ) {
            let f = |x: f64| c[0] + c[1] * x + c[2] * x * x + c[3] * x * x * x;
            let antiderivative = |x: f64| {
                c[0] * x + c[1] * x * x / 2.0 + c[2] * x.powi(3) / 3.0 + c[3] * x.powi(4) / 4.0
            };
            let exact = antiderivative(b) - antiderivative(a);

            let value = simpsons(f, a, b, 2 * half_n).unwrap();

            prop_assert!((value - exact).abs() < 1e-9 * (1.0 + exact.abs()));
        }
    }

    #[test]
    fn test_simpsons_weights() {
        // n = 4 on [0, 4]: (1*f0 + 4*f1 + 2*f2 + 4*f3 + 1*f4) * 4 / 12
        let f = |x: f64| if x == 2.0 { 1.0 } else { 0.0 };

        let value = simpsons(f, 0.0, 4.0, 4).unwrap();

        assert_relative_eq!(value, 2.0 * 4.0 / 12.0, epsilon = 1e-15);
    }

    #[test]
    fn test_simpsons_rejects_odd_partitions() {
        assert!(matches!(
            simpsons(|x| x, 0.0, 1.0, 3),
            Err(MathError::InvalidInput { .. })
        ));
        assert!(matches!(
            simpsons(|x| x, 0.0, 1.0, 0),
            Err(MathError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_integrate_sin() {
        let value = integrate(
            |x: f64| x.sin(),
            0.0,
            std::f64::consts::PI,
            &IntegrationConfig::default(),
        )
        .unwrap();

        assert_relative_eq!(value, 2.0, epsilon = 1e-8);
    }

    #[test]
    fn test_integrate_standard_normal_density() {
        let pdf = |x: f64| (-0.5 * x * x).exp() / (2.0 * std::f64::consts::PI).sqrt();

        let value = integrate(pdf, -8.0, 8.0, &IntegrationConfig::new(1e-12, 30)).unwrap();

        assert_relative_eq!(value, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_integrate_reversed_limits() {
        let value = integrate(|x: f64| x.exp(), 1.0, 0.0, &IntegrationConfig::default()).unwrap();

        assert_relative_eq!(value, 1.0 - std::f64::consts::E, epsilon = 1e-8);
    }

    #[test]
    fn test_integrate_refinement_cap() {
        // A tolerance of zero can only be met by exact agreement
        let config = IntegrationConfig::new(0.0, 3);

        let result = integrate(|x: f64| x.sqrt(), 0.0, 1.0, &config);

        assert!(matches!(
            result,
            Err(MathError::NonConvergence { iterations: 3, .. })
        ));
    }
}
