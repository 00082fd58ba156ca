//! Bullet coupon bond with continuously compounded yield.

use serde::Serialize;

use quantcalc_core::cache::TieredCache;
use quantcalc_core::error::{ensure_finite, ensure_positive};
use quantcalc_core::implied::{ImpliedSolver, ImpliedTarget, TargetDomain};
use quantcalc_core::{PricingError, PricingResult};

use crate::schedule::{cash_amounts, payment_times};

/// Default coupon payments per year.
pub const DEFAULT_FREQUENCY: u32 = 2;

/// Default face value.
pub const DEFAULT_FACE_VALUE: f64 = 100.0;

/// A bullet bond paying `coupon_rate * face_value / frequency` each period
/// and the face value at maturity.
///
/// Cash flows are discounted as `exp(-y t)`. Every constructor and mutator
/// returns a fully refreshed bond: price, dB/dy, duration and convexity are
/// consistent with the current inputs whenever a `Bond` is observable.
#[derive(Debug, Clone)]
pub struct Bond {
    maturity: f64,
    frequency: u32,
    coupon_rate: f64,
    face_value: f64,
    yield_rate: f64,
    solver: ImpliedSolver,

    // Primary tier
    times: Vec<f64>,
    cash_flows: Vec<f64>,
    discounted: Vec<f64>,
    price: f64,
    price_sensitivity: f64,

    // Secondary tier
    second_derivative: f64,
    duration: f64,
    convexity: f64,
}

impl Bond {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> BondBuilder {
        BondBuilder::new()
    }

    /// Years to maturity.
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Coupon payments per year.
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    /// Annual coupon rate as a decimal.
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Face value.
    pub fn face_value(&self) -> f64 {
        self.face_value
    }

    /// Continuously compounded yield to maturity.
    pub fn yield_rate(&self) -> f64 {
        self.yield_rate
    }

    /// Solver used when a price is set.
    pub fn solver(&self) -> &ImpliedSolver {
        &self.solver
    }

    /// Payment times in years, ascending.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Cash amounts, last one including the face value.
    pub fn cash_flows(&self) -> &[f64] {
        &self.cash_flows
    }

    /// Cash amounts discounted at the current yield.
    pub fn discounted_cash_flows(&self) -> &[f64] {
        &self.discounted
    }

    /// Price, the sum of the discounted cash flows.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// dB/dy.
    pub fn price_sensitivity(&self) -> f64 {
        self.price_sensitivity
    }

    /// d²B/dy².
    pub fn second_derivative(&self) -> f64 {
        self.second_derivative
    }

    /// Duration, `-(dB/dy) / B`.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Convexity, `(d²B/dy²) / B`.
    pub fn convexity(&self) -> f64 {
        self.convexity
    }

    /// Returns true if the bond pays no coupon.
    pub fn is_zero_coupon(&self) -> bool {
        self.coupon_rate == 0.0
    }

    /// Price at yield `y` without touching the cache.
    pub fn price_at(&self, y: f64) -> f64 {
        self.times
            .iter()
            .zip(&self.cash_flows)
            .map(|(t, c)| c * (-y * t).exp())
            .sum()
    }

    /// Returns a copy repriced at yield `y`.
    pub fn with_yield(&self, y: f64) -> PricingResult<Self> {
        let mut bond = self.clone();
        bond.yield_rate = ensure_finite("yield", y)?;
        bond.refresh();
        Ok(bond)
    }

    /// Returns a copy whose yield reproduces `price`.
    pub fn with_price(&self, price: f64) -> PricingResult<Self> {
        ensure_positive("price", price)?;
        Ok(self.solver.solve(self, price)?.entity)
    }

    /// Yield that reproduces `price`, leaving `self` unchanged.
    pub fn implied_yield(&self, price: f64) -> PricingResult<f64> {
        Ok(self.with_price(price)?.yield_rate)
    }

    /// Snapshot of the headline analytics.
    pub fn analytics(&self) -> BondAnalytics {
        BondAnalytics {
            maturity: self.maturity,
            frequency: self.frequency,
            coupon_rate: self.coupon_rate,
            face_value: self.face_value,
            yield_rate: self.yield_rate,
            price: self.price,
            price_sensitivity: self.price_sensitivity,
            duration: self.duration,
            convexity: self.convexity,
            dv01: self.dv01(),
            current_yield: self.current_yield(),
        }
    }

    pub(crate) fn set_maturity(&mut self, maturity: f64) -> PricingResult<()> {
        self.maturity = ensure_positive("maturity", maturity)?;
        self.times.clear();
        Ok(())
    }

    pub(crate) fn set_frequency(&mut self, frequency: u32) -> PricingResult<()> {
        if frequency == 0 {
            return Err(PricingError::invalid_parameter(
                "frequency",
                0.0,
                "at least one payment per year is required",
            ));
        }
        self.frequency = frequency;
        self.times.clear();
        Ok(())
    }

    pub(crate) fn set_coupon_rate(&mut self, coupon_rate: f64) -> PricingResult<()> {
        if ensure_finite("coupon", coupon_rate)? < 0.0 {
            return Err(PricingError::invalid_parameter(
                "coupon",
                coupon_rate,
                "cannot be negative",
            ));
        }
        self.coupon_rate = coupon_rate;
        self.times.clear();
        Ok(())
    }

    pub(crate) fn set_face_value(&mut self, face_value: f64) -> PricingResult<()> {
        self.face_value = ensure_positive("face", face_value)?;
        self.times.clear();
        Ok(())
    }
}

impl TieredCache for Bond {
    fn refresh_primary(&mut self) {
        // Schedule setters clear `times`; yield-only changes keep it.
        if self.times.is_empty() {
            self.times = payment_times(self.maturity, self.frequency);
            self.cash_flows = cash_amounts(
                self.times.len(),
                self.coupon_rate,
                self.face_value,
                self.frequency,
            );
        }

        let y = self.yield_rate;
        self.discounted = self
            .times
            .iter()
            .zip(&self.cash_flows)
            .map(|(t, c)| c * (-y * t).exp())
            .collect();
        self.price = self.discounted.iter().sum();
        self.price_sensitivity = -self
            .times
            .iter()
            .zip(&self.discounted)
            .map(|(t, pv)| t * pv)
            .sum::<f64>();
    }

    fn refresh_secondary(&mut self) {
        self.second_derivative = self
            .times
            .iter()
            .zip(&self.discounted)
            .map(|(t, pv)| t * t * pv)
            .sum();
        self.duration = -self.price_sensitivity / self.price;
        self.convexity = self.second_derivative / self.price;
    }
}

impl ImpliedTarget for Bond {
    const TARGET: &'static str = "yield";

    fn domain(&self) -> TargetDomain {
        TargetDomain::Real
    }

    fn target(&self) -> f64 {
        self.yield_rate
    }

    fn load_target(&mut self, x: f64) {
        self.yield_rate = x;
        self.refresh_primary();
    }

    fn model_value(&self) -> f64 {
        self.price
    }

    fn model_sensitivity(&self) -> f64 {
        self.price_sensitivity
    }
}

/// Serializable summary of a bond's analytics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BondAnalytics {
    /// Years to maturity.
    pub maturity: f64,
    /// Payments per year.
    pub frequency: u32,
    /// Annual coupon rate.
    pub coupon_rate: f64,
    /// Face value.
    pub face_value: f64,
    /// Continuously compounded yield.
    #[serde(rename = "yield")]
    pub yield_rate: f64,
    /// Price.
    pub price: f64,
    /// dB/dy.
    pub price_sensitivity: f64,
    /// Duration.
    pub duration: f64,
    /// Convexity.
    pub convexity: f64,
    /// Price change for a one basis point fall in yield.
    pub dv01: f64,
    /// Annual coupon over price.
    pub current_yield: f64,
}

/// Builder for [`Bond`].
///
/// Exactly one of [`yield_rate`](Self::yield_rate) and
/// [`price`](Self::price) must be supplied.
#[derive(Debug, Clone, Default)]
pub struct BondBuilder {
    maturity: Option<f64>,
    frequency: Option<u32>,
    coupon_rate: Option<f64>,
    face_value: Option<f64>,
    yield_rate: Option<f64>,
    price: Option<f64>,
    solver: Option<ImpliedSolver>,
}

impl BondBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Years to maturity (required).
    #[must_use]
    pub fn maturity(mut self, years: f64) -> Self {
        self.maturity = Some(years);
        self
    }

    /// Payments per year; defaults to 2.
    #[must_use]
    pub fn frequency(mut self, frequency: u32) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Annual coupon rate as a decimal; defaults to zero.
    #[must_use]
    pub fn coupon_rate(mut self, rate: f64) -> Self {
        self.coupon_rate = Some(rate);
        self
    }

    /// Annual coupon rate in percent.
    #[must_use]
    pub fn coupon_percent(mut self, percent: f64) -> Self {
        self.coupon_rate = Some(percent / 100.0);
        self
    }

    /// Face value; defaults to 100.
    #[must_use]
    pub fn face_value(mut self, face: f64) -> Self {
        self.face_value = Some(face);
        self
    }

    /// Continuously compounded yield.
    #[must_use]
    pub fn yield_rate(mut self, y: f64) -> Self {
        self.yield_rate = Some(y);
        self
    }

    /// Market price; the yield is implied from it.
    #[must_use]
    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Solver used to imply the yield from a price.
    #[must_use]
    pub fn solver(mut self, solver: ImpliedSolver) -> Self {
        self.solver = Some(solver);
        self
    }

    /// Validates the inputs and builds a fully refreshed bond.
    pub fn build(self) -> PricingResult<Bond> {
        let maturity = self
            .maturity
            .ok_or_else(|| PricingError::invalid_construction("maturity is required"))?;

        let (yield_rate, price) = match (self.yield_rate, self.price) {
            (Some(y), None) => (ensure_finite("yield", y)?, None),
            (None, Some(p)) => (0.0, Some(ensure_positive("price", p)?)),
            (None, None) => {
                return Err(PricingError::invalid_construction(
                    "supply either a yield or a price",
                ))
            }
            (Some(_), Some(_)) => {
                return Err(PricingError::invalid_construction(
                    "supply a yield or a price, not both",
                ))
            }
        };

        let mut bond = Bond {
            maturity: 0.0,
            frequency: DEFAULT_FREQUENCY,
            coupon_rate: 0.0,
            face_value: DEFAULT_FACE_VALUE,
            yield_rate,
            solver: self.solver.unwrap_or_default(),
            times: Vec::new(),
            cash_flows: Vec::new(),
            discounted: Vec::new(),
            price: 0.0,
            price_sensitivity: 0.0,
            second_derivative: 0.0,
            duration: 0.0,
            convexity: 0.0,
        };
        bond.set_maturity(maturity)?;
        bond.set_frequency(self.frequency.unwrap_or(DEFAULT_FREQUENCY))?;
        bond.set_coupon_rate(self.coupon_rate.unwrap_or(0.0))?;
        bond.set_face_value(self.face_value.unwrap_or(DEFAULT_FACE_VALUE))?;
        bond.refresh();

        match price {
            Some(p) => bond.with_price(p),
            None => Ok(bond),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use quantcalc_math::MathError;

    fn two_percent() -> Bond {
        Bond::builder()
            .maturity(1.5)
            .coupon_rate(0.02)
            .yield_rate(0.03)
            .build()
            .unwrap()
    }

    #[test]
    fn test_price_from_yield() {
        let bond = two_percent();

        let expected = (-0.015_f64).exp() + (-0.03_f64).exp() + 101.0 * (-0.045_f64).exp();
        assert_relative_eq!(bond.price(), expected, epsilon = 1e-12);
        assert_eq!(bond.times(), &[0.5, 1.0, 1.5]);
        assert_eq!(bond.cash_flows(), &[1.0, 1.0, 101.0]);
    }

    #[test]
    fn test_price_equals_sum_of_discounted_flows() {
        let bond = two_percent();

        let sum: f64 = bond.discounted_cash_flows().iter().sum();
        assert_relative_eq!(bond.price(), sum, epsilon = 1e-9);
    }

    #[test]
    fn test_sensitivities() {
        let bond = two_percent();
        let h = 1e-5;

        let up = bond.price_at(0.03 + h);
        let down = bond.price_at(0.03 - h);

        assert_relative_eq!(bond.price_sensitivity(), (up - down) / (2.0 * h), epsilon = 1e-6);
        assert_relative_eq!(
            bond.second_derivative(),
            (up - 2.0 * bond.price() + down) / (h * h),
            max_relative = 1e-4
        );
        assert_relative_eq!(bond.duration(), -bond.price_sensitivity() / bond.price());
        assert_relative_eq!(bond.convexity(), bond.second_derivative() / bond.price());
    }

    #[test]
    fn test_zero_coupon_duration_is_maturity() {
        let bond = Bond::builder().maturity(4.0).yield_rate(0.05).build().unwrap();

        assert_relative_eq!(bond.duration(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(bond.convexity(), 16.0, epsilon = 1e-12);
        assert_relative_eq!(bond.price(), 100.0 * (-0.2_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_price_round_trip() {
        let bond = Bond::builder()
            .maturity(3.0)
            .coupon_percent(5.0)
            .price(110.3)
            .build()
            .unwrap();

        assert_relative_eq!(bond.price(), 110.3, epsilon = 1e-6);
        let repriced = bond.with_yield(bond.yield_rate()).unwrap();
        assert_relative_eq!(repriced.price(), 110.3, epsilon = 1e-6);
        assert!(bond.duration() > 0.0);
    }

    #[test]
    fn test_construction_requires_exactly_one_of_yield_and_price() {
        let neither = Bond::builder().maturity(1.0).build();
        let both = Bond::builder()
            .maturity(1.0)
            .yield_rate(0.02)
            .price(99.0)
            .build();

        assert!(matches!(neither, Err(PricingError::InvalidConstruction { .. })));
        assert!(matches!(both, Err(PricingError::InvalidConstruction { .. })));
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        let zero_frequency = Bond::builder()
            .maturity(1.0)
            .frequency(0)
            .yield_rate(0.02)
            .build();
        let negative_maturity = Bond::builder().maturity(-1.0).yield_rate(0.02).build();
        let negative_price = Bond::builder().maturity(1.0).price(-5.0).build();

        assert!(matches!(
            zero_frequency,
            Err(PricingError::InvalidParameter { name: "frequency", .. })
        ));
        assert!(matches!(
            negative_maturity,
            Err(PricingError::InvalidParameter { name: "maturity", .. })
        ));
        assert!(matches!(
            negative_price,
            Err(PricingError::InvalidParameter { name: "price", .. })
        ));
    }

    #[test]
    fn test_failed_price_solve_is_typed() {
        let solver = ImpliedSolver::new()
            .with_config(quantcalc_math::solvers::SolverConfig::default().with_max_iterations(1));
        let strict = Bond::builder()
            .maturity(1.5)
            .coupon_rate(0.02)
            .yield_rate(0.03)
            .solver(solver)
            .build()
            .unwrap();

        let result = strict.with_price(80.0);

        assert!(matches!(
            result,
            Err(PricingError::Solver(MathError::NonConvergence { .. }))
        ));
        assert_eq!(strict.yield_rate(), 0.03);
    }

    #[test]
    fn test_reads_are_idempotent() {
        let bond = two_percent();

        assert_eq!(bond.price().to_bits(), bond.price().to_bits());
        assert_eq!(bond.duration().to_bits(), bond.duration().to_bits());
        assert_eq!(bond.analytics(), bond.analytics());
    }

    #[test]
    fn test_analytics_serialize() {
        let json = serde_json::to_value(two_percent().analytics()).unwrap();

        assert_eq!(json["frequency"], 2);
        assert!(json["yield"].as_f64().is_some());
        assert!(json["dv01"].as_f64().unwrap() > 0.0);
    }
}
