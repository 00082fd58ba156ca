//! Named option inputs and snapshot updates.

use std::fmt;
use std::str::FromStr;

use quantcalc_core::cache::TieredCache;
use quantcalc_core::{PricingError, PricingResult};

use crate::option::VanillaOption;

/// A settable option input. `Price` implies a new volatility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionParameter {
    /// Spot price.
    Spot,
    /// Strike price.
    Strike,
    /// Years to expiry.
    Maturity,
    /// Risk-free rate.
    Rate,
    /// Dividend yield.
    Dividend,
    /// Volatility.
    Volatility,
    /// Market price.
    Price,
}

impl OptionParameter {
    /// All parameters.
    pub const ALL: [OptionParameter; 7] = [
        OptionParameter::Spot,
        OptionParameter::Strike,
        OptionParameter::Maturity,
        OptionParameter::Rate,
        OptionParameter::Dividend,
        OptionParameter::Volatility,
        OptionParameter::Price,
    ];

    /// Canonical lower-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionParameter::Spot => "spot",
            OptionParameter::Strike => "strike",
            OptionParameter::Maturity => "maturity",
            OptionParameter::Rate => "rate",
            OptionParameter::Dividend => "dividend",
            OptionParameter::Volatility => "volatility",
            OptionParameter::Price => "price",
        }
    }
}

impl fmt::Display for OptionParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionParameter {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spot" | "s" => Ok(OptionParameter::Spot),
            "strike" | "k" => Ok(OptionParameter::Strike),
            "maturity" | "t" => Ok(OptionParameter::Maturity),
            "rate" | "r" => Ok(OptionParameter::Rate),
            "dividend" | "q" => Ok(OptionParameter::Dividend),
            "volatility" | "vol" | "sigma" => Ok(OptionParameter::Volatility),
            "price" | "premium" => Ok(OptionParameter::Price),
            _ => Err(PricingError::unknown_parameter(s)),
        }
    }
}

impl VanillaOption {
    /// Current value of `param`.
    pub fn parameter(&self, param: OptionParameter) -> f64 {
        match param {
            OptionParameter::Spot => self.spot(),
            OptionParameter::Strike => self.strike(),
            OptionParameter::Maturity => self.maturity(),
            OptionParameter::Rate => self.rate(),
            OptionParameter::Dividend => self.dividend(),
            OptionParameter::Volatility => self.volatility(),
            OptionParameter::Price => self.premium(),
        }
    }

    /// Returns a fully refreshed copy with `param` set to `value`.
    ///
    /// Market inputs hold the volatility fixed and reprice. Setting the
    /// price implies a new volatility. On error `self` is unaffected.
    pub fn with_parameter(&self, param: OptionParameter, value: f64) -> PricingResult<Self> {
        let mut option = self.clone();
        match param {
            OptionParameter::Spot => option.set_spot(value)?,
            OptionParameter::Strike => option.set_strike(value)?,
            OptionParameter::Maturity => option.set_maturity(value)?,
            OptionParameter::Rate => option.set_rate(value)?,
            OptionParameter::Dividend => option.set_dividend(value)?,
            OptionParameter::Volatility => return self.with_volatility(value),
            OptionParameter::Price => return self.with_price(value),
        }
        option.refresh();
        Ok(option)
    }

    /// In-place [`with_parameter`](Self::with_parameter); all or nothing.
    pub fn set_parameter(&mut self, param: OptionParameter, value: f64) -> PricingResult<()> {
        *self = self.with_parameter(param, value)?;
        Ok(())
    }
}
