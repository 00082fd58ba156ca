//! Piecewise-linear zero curve.

use quantcalc_bonds::Bond;
use quantcalc_math::interpolation::{Interpolator, LinearInterpolator};
use serde::Serialize;

use crate::error::{CurveError, CurveResult};

/// One curve pillar: a continuously compounded zero rate at a tenor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZeroPoint {
    /// Tenor in years.
    pub tenor: f64,
    /// Continuously compounded zero rate.
    pub rate: f64,
}

impl ZeroPoint {
    /// Creates a new pillar.
    #[must_use]
    pub fn new(tenor: f64, rate: f64) -> Self {
        Self { tenor, rate }
    }

    /// Discount factor `e^{-r t}` at this pillar.
    #[must_use]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.tenor).exp()
    }
}

/// Zero rates at strictly increasing tenors, linear in time between them.
///
/// Queries outside `[first tenor, last tenor]` are rejected rather than
/// extrapolated.
#[derive(Debug, Clone, Serialize)]
pub struct YieldCurve {
    points: Vec<ZeroPoint>,
    #[serde(skip)]
    interpolator: Option<LinearInterpolator>,
}

impl PartialEq for YieldCurve {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

impl YieldCurve {
    /// Builds a curve from its pillars.
    ///
    /// # Errors
    ///
    /// [`CurveError::InvalidCurve`] if `points` is empty, holds a
    /// non-finite value or a negative tenor, or is not strictly increasing
    /// in tenor.
    pub fn new(points: Vec<ZeroPoint>) -> CurveResult<Self> {
        if points.is_empty() {
            return Err(CurveError::invalid_curve("a curve needs at least one point"));
        }
        if let Some(p) = points
            .iter()
            .find(|p| !p.tenor.is_finite() || !p.rate.is_finite() || p.tenor < 0.0)
        {
            return Err(CurveError::invalid_curve(format!(
                "bad point (tenor {}, rate {})",
                p.tenor, p.rate
            )));
        }
        if let Some(pair) = points.windows(2).find(|w| w[1].tenor <= w[0].tenor) {
            return Err(CurveError::invalid_curve(format!(
                "tenors must be strictly increasing, found {} then {}",
                pair[0].tenor, pair[1].tenor
            )));
        }

        let interpolator = if points.len() > 1 {
            Some(LinearInterpolator::new(
                points.iter().map(|p| p.tenor).collect(),
                points.iter().map(|p| p.rate).collect(),
            )?)
        } else {
            None
        };

        Ok(Self {
            points,
            interpolator,
        })
    }

    /// Curve pillars in tenor order.
    pub fn points(&self) -> &[ZeroPoint] {
        &self.points
    }

    /// Pillar tenors.
    pub fn tenors(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.tenor).collect()
    }

    /// Pillar rates.
    pub fn rates(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.rate).collect()
    }

    /// Number of pillars.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a curve has at least one pillar.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Rate at the first pillar.
    pub fn short_rate(&self) -> f64 {
        self.first().rate
    }

    /// First pillar tenor.
    pub fn min_tenor(&self) -> f64 {
        self.first().tenor
    }

    /// Last pillar tenor.
    pub fn max_tenor(&self) -> f64 {
        self.points.last().map_or(self.first().tenor, |p| p.tenor)
    }

    fn first(&self) -> &ZeroPoint {
        &self.points[0]
    }

    /// Zero rate at tenor `t`, linear between pillars.
    ///
    /// # Errors
    ///
    /// [`CurveError::TenorOutOfRange`] outside the pillar range.
    pub fn zero_rate(&self, t: f64) -> CurveResult<f64> {
        let (min, max) = (self.min_tenor(), self.max_tenor());
        if !(t >= min && t <= max) {
            return Err(CurveError::TenorOutOfRange {
                requested: t,
                min,
                max,
            });
        }

        match &self.interpolator {
            Some(interp) => Ok(interp.interpolate(t)?),
            None => Ok(self.short_rate()),
        }
    }

    /// Discount factor `e^{-r(t) t}`.
    pub fn discount_factor(&self, t: f64) -> CurveResult<f64> {
        Ok((-self.zero_rate(t)? * t).exp())
    }

    /// Prices a bond by discounting each flow at the curve's zero rate.
    pub fn price(&self, bond: &Bond) -> CurveResult<f64> {
        bond.times()
            .iter()
            .zip(bond.cash_flows())
            .try_fold(0.0, |pv, (&t, &c)| Ok(pv + c * self.discount_factor(t)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn curve() -> YieldCurve {
        YieldCurve::new(vec![
            ZeroPoint::new(0.0, 0.01),
            ZeroPoint::new(1.0, 0.02),
            ZeroPoint::new(3.0, 0.03),
        ])
        .unwrap()
    }

    #[test]
    fn test_accessors() {
        let c = curve();

        assert_eq!(c.len(), 3);
        assert!(!c.is_empty());
        assert_eq!(c.tenors(), vec![0.0, 1.0, 3.0]);
        assert_eq!(c.rates(), vec![0.01, 0.02, 0.03]);
        assert_eq!(c.short_rate(), 0.01);
        assert_eq!(c.max_tenor(), 3.0);
    }

    #[test]
    fn test_linear_between_pillars() {
        let c = curve();

        assert_relative_eq!(c.zero_rate(0.5).unwrap(), 0.015, epsilon = 1e-15);
        assert_relative_eq!(c.zero_rate(2.0).unwrap(), 0.025, epsilon = 1e-15);
        assert_eq!(c.zero_rate(1.0).unwrap(), 0.02);
    }

    #[test]
    fn test_out_of_range() {
        let c = curve();

        assert!(matches!(
            c.zero_rate(3.5),
            Err(CurveError::TenorOutOfRange { requested, min, max })
                if requested == 3.5 && min == 0.0 && max == 3.0
        ));
        assert!(c.zero_rate(-0.1).is_err());
        assert!(c.zero_rate(f64::NAN).is_err());
    }

    #[test]
    fn test_discount_factor() {
        let c = curve();

        assert_relative_eq!(c.discount_factor(2.0).unwrap(), (-0.05_f64).exp(), epsilon = 1e-15);
        assert_eq!(c.discount_factor(0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_single_point_curve() {
        let c = YieldCurve::new(vec![ZeroPoint::new(0.0, 0.015)]).unwrap();

        assert_eq!(c.zero_rate(0.0).unwrap(), 0.015);
        assert!(c.zero_rate(0.5).is_err());
    }

    #[test]
    fn test_rejects_bad_points() {
        assert!(matches!(
            YieldCurve::new(vec![]),
            Err(CurveError::InvalidCurve { .. })
        ));
        assert!(YieldCurve::new(vec![ZeroPoint::new(1.0, 0.02), ZeroPoint::new(1.0, 0.03)]).is_err());
        assert!(YieldCurve::new(vec![ZeroPoint::new(0.0, f64::NAN)]).is_err());
        assert!(YieldCurve::new(vec![ZeroPoint::new(-1.0, 0.01)]).is_err());
    }

    #[test]
    fn test_prices_bond_off_flat_curve() {
        // On a flat continuous curve the bond price equals its price at that yield
        let flat = YieldCurve::new(vec![ZeroPoint::new(0.0, 0.04), ZeroPoint::new(5.0, 0.04)]).unwrap();
        let bond = Bond::builder()
            .maturity(5.0)
            .coupon_percent(5.0)
            .yield_rate(0.04)
            .build()
            .unwrap();

        assert_relative_eq!(flat.price(&bond).unwrap(), bond.price(), epsilon = 1e-10);
    }

    #[test]
    fn test_serializes_points_only() {
        let json = serde_json::to_value(curve()).unwrap();

        assert_eq!(json["points"][1]["tenor"], 1.0);
        assert_eq!(json["points"][2]["rate"], 0.03);
        assert!(json.get("interpolator").is_none());
    }
}
