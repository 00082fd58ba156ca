//! Yield measures and basis-point risk.

use quantcalc_core::{PricingError, PricingResult};

use crate::bond::Bond;

/// Money-market day basis.
const MONEY_MARKET_DAYS: f64 = 360.0;

/// Calendar days per year.
const DAYS_PER_YEAR: f64 = 365.0;

/// One basis point.
const BASIS_POINT: f64 = 1e-4;

impl Bond {
    /// Price change for a one basis point fall in yield, `-(dB/dy) * 1e-4`.
    pub fn dv01(&self) -> f64 {
        -self.price_sensitivity() * BASIS_POINT
    }

    /// Annual coupon divided by price.
    pub fn current_yield(&self) -> f64 {
        self.coupon_rate() * self.face_value() / self.price()
    }

    /// Bank discount yield, `(F - B) / F * 360 / days`.
    ///
    /// Only defined for zero-coupon bonds.
    pub fn bank_discount_yield(&self) -> PricingResult<f64> {
        self.require_zero_coupon("bank discount yield")?;
        let discount = self.face_value() - self.price();
        Ok(discount / self.face_value() * MONEY_MARKET_DAYS / self.days_to_maturity())
    }

    /// Money-market (CD) equivalent yield, `(F - B) / B * 360 / days`.
    ///
    /// Only defined for zero-coupon bonds.
    pub fn money_market_yield(&self) -> PricingResult<f64> {
        self.require_zero_coupon("money market yield")?;
        let discount = self.face_value() - self.price();
        Ok(discount / self.price() * MONEY_MARKET_DAYS / self.days_to_maturity())
    }

    fn days_to_maturity(&self) -> f64 {
        self.maturity() * DAYS_PER_YEAR
    }

    fn require_zero_coupon(&self, metric: &'static str) -> PricingResult<()> {
        if self.is_zero_coupon() {
            Ok(())
        } else {
            Err(PricingError::not_applicable(
                metric,
                format!("bond pays a {} coupon", self.coupon_rate()),
            ))
        }
    }
}
