//! Named bond inputs and snapshot updates.

use std::fmt;
use std::str::FromStr;

use quantcalc_core::cache::TieredCache;
use quantcalc_core::error::ensure_finite;
use quantcalc_core::{PricingError, PricingResult};

use crate::bond::Bond;

/// A settable bond input.
///
/// `Price` is a solved quantity: setting it implies a new yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondParameter {
    /// Years to maturity.
    Maturity,
    /// Payments per year.
    Frequency,
    /// Annual coupon rate (decimal).
    Coupon,
    /// Face value.
    Face,
    /// Continuously compounded yield.
    Yield,
    /// Market price.
    Price,
}

impl BondParameter {
    /// All parameters.
    pub const ALL: [BondParameter; 6] = [
        BondParameter::Maturity,
        BondParameter::Frequency,
        BondParameter::Coupon,
        BondParameter::Face,
        BondParameter::Yield,
        BondParameter::Price,
    ];

    /// Canonical lower-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            BondParameter::Maturity => "maturity",
            BondParameter::Frequency => "frequency",
            BondParameter::Coupon => "coupon",
            BondParameter::Face => "face",
            BondParameter::Yield => "yield",
            BondParameter::Price => "price",
        }
    }
}

impl fmt::Display for BondParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BondParameter {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "maturity" | "t" => Ok(BondParameter::Maturity),
            "frequency" | "m" => Ok(BondParameter::Frequency),
            "coupon" | "coupon_rate" | "r" => Ok(BondParameter::Coupon),
            "face" | "face_value" | "f" => Ok(BondParameter::Face),
            "yield" | "y" => Ok(BondParameter::Yield),
            "price" | "b" => Ok(BondParameter::Price),
            _ => Err(PricingError::unknown_parameter(s)),
        }
    }
}

impl Bond {
    /// Current value of `param`.
    pub fn parameter(&self, param: BondParameter) -> f64 {
        match param {
            BondParameter::Maturity => self.maturity(),
            BondParameter::Frequency => f64::from(self.frequency()),
            BondParameter::Coupon => self.coupon_rate(),
            BondParameter::Face => self.face_value(),
            BondParameter::Yield => self.yield_rate(),
            BondParameter::Price => self.price(),
        }
    }

    /// Returns a fully refreshed copy with `param` set to `value`.
    ///
    /// Schedule inputs hold the yield fixed and reprice. Setting the price
    /// implies a new yield. On error `self` is unaffected.
    pub fn with_parameter(&self, param: BondParameter, value: f64) -> PricingResult<Self> {
        let mut bond = self.clone();
        match param {
            BondParameter::Maturity => bond.set_maturity(value)?,
            BondParameter::Frequency => bond.set_frequency(whole_frequency(value)?)?,
            BondParameter::Coupon => bond.set_coupon_rate(value)?,
            BondParameter::Face => bond.set_face_value(value)?,
            BondParameter::Yield => return self.with_yield(value),
            BondParameter::Price => return self.with_price(value),
        }
        bond.refresh();
        Ok(bond)
    }

    /// In-place [`with_parameter`](Self::with_parameter); all or nothing.
    pub fn set_parameter(&mut self, param: BondParameter, value: f64) -> PricingResult<()> {
        *self = self.with_parameter(param, value)?;
        Ok(())
    }
}

fn whole_frequency(value: f64) -> PricingResult<u32> {
    ensure_finite("frequency", value)?;
    if value < 1.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(PricingError::invalid_parameter(
            "frequency",
            value,
            "must be a positive whole number",
        ));
    }
    Ok(value as u32)
}
