//! Plain vanilla European option.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use quantcalc_core::cache::TieredCache;
use quantcalc_core::error::{ensure_finite, ensure_positive};
use quantcalc_core::implied::{ImpliedSolver, ImpliedTarget, TargetDomain};
use quantcalc_core::{PricingError, PricingResult};

use crate::greeks::Greeks;
use crate::normal::{cdf, pdf};

/// Exercise direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Right to buy.
    #[default]
    Call,
    /// Right to sell.
    Put,
}

impl OptionType {
    /// Lower-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            _ => Err(PricingError::invalid_construction(format!(
                "unknown option type '{s}', expected call or put"
            ))),
        }
    }
}

/// Values recomputed on every input change, including inside implied
/// volatility iterations.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Primary {
    pub sqrt_t: f64,
    pub d1: f64,
    pub d2: f64,
    /// ∂d1/∂T
    pub d1_dt: f64,
    /// exp(-qT)
    pub df_dividend: f64,
    /// exp(-rT)
    pub df_rate: f64,
    pub pv_spot: f64,
    pub pv_strike: f64,
    pub pdf_d1: f64,
    pub pdf_d2: f64,
    pub cdf_d1: f64,
    pub cdf_d2: f64,
    pub cdf_neg_d1: f64,
    pub cdf_neg_d2: f64,
    pub premium: f64,
    pub vega: f64,
}

/// European option on an asset paying a continuous dividend yield.
///
/// Constructed through [`OptionBuilder`] with exactly one of a volatility
/// or a market price. Every update returns a fully refreshed option.
#[derive(Debug, Clone)]
pub struct VanillaOption {
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    dividend: f64,
    volatility: f64,
    option_type: OptionType,
    solver: ImpliedSolver,
    primary: Primary,
    greeks: Greeks,
}

impl VanillaOption {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> OptionBuilder {
        OptionBuilder::new()
    }

    /// Spot price of the underlying.
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Strike price.
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Years to expiry.
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Continuously compounded risk-free rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Continuous dividend yield.
    pub fn dividend(&self) -> f64 {
        self.dividend
    }

    /// Black-Scholes volatility.
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Call or put.
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Solver used when a price is set.
    pub fn solver(&self) -> &ImpliedSolver {
        &self.solver
    }

    /// d1.
    pub fn d1(&self) -> f64 {
        self.primary.d1
    }

    /// d2.
    pub fn d2(&self) -> f64 {
        self.primary.d2
    }

    /// Option value.
    pub fn premium(&self) -> f64 {
        self.primary.premium
    }

    /// ∂V/∂σ.
    pub fn vega(&self) -> f64 {
        self.primary.vega
    }

    /// All sensitivities.
    pub fn greeks(&self) -> &Greeks {
        &self.greeks
    }

    pub(crate) fn primary(&self) -> &Primary {
        &self.primary
    }

    /// No-arbitrage price bounds `(lower, upper)` for the current inputs.
    ///
    /// A call is worth at least `max(S e^{-qT} - K e^{-rT}, 0)` and at most
    /// `S e^{-qT}`; a put at least `max(K e^{-rT} - S e^{-qT}, 0)` and at most
    /// `K e^{-rT}`.
    pub fn price_bounds(&self) -> (f64, f64) {
        let (pv_s, pv_k) = (self.primary.pv_spot, self.primary.pv_strike);
        match self.option_type {
            OptionType::Call => ((pv_s - pv_k).max(0.0), pv_s),
            OptionType::Put => ((pv_k - pv_s).max(0.0), pv_k),
        }
    }

    /// Returns a copy with volatility `sigma`.
    pub fn with_volatility(&self, sigma: f64) -> PricingResult<Self> {
        let mut option = self.clone();
        option.volatility = ensure_positive("volatility", sigma)?;
        option.refresh();
        Ok(option)
    }

    /// Returns a copy whose volatility reproduces `price`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `price` lies outside the open no-arbitrage
    /// interval, otherwise any solver failure.
    pub fn with_price(&self, price: f64) -> PricingResult<Self> {
        ensure_finite("price", price)?;
        let (lower, upper) = self.price_bounds();
        if price <= lower || price >= upper {
            return Err(PricingError::invalid_parameter(
                "price",
                price,
                format!("outside no-arbitrage bounds ({lower:.6}, {upper:.6})"),
            ));
        }
        Ok(self.solver.solve(self, price)?.entity)
    }

    /// Volatility that reproduces `price`, leaving `self` unchanged.
    pub fn implied_volatility(&self, price: f64) -> PricingResult<f64> {
        Ok(self.with_price(price)?.volatility)
    }

    /// Returns a copy with the other exercise direction.
    pub fn with_option_type(&self, option_type: OptionType) -> Self {
        let mut option = self.clone();
        option.option_type = option_type;
        option.refresh();
        option
    }

    pub(crate) fn set_spot(&mut self, spot: f64) -> PricingResult<()> {
        self.spot = ensure_positive("spot", spot)?;
        Ok(())
    }

    pub(crate) fn set_strike(&mut self, strike: f64) -> PricingResult<()> {
        self.strike = ensure_positive("strike", strike)?;
        Ok(())
    }

    pub(crate) fn set_maturity(&mut self, maturity: f64) -> PricingResult<()> {
        self.maturity = ensure_positive("maturity", maturity)?;
        Ok(())
    }

    pub(crate) fn set_rate(&mut self, rate: f64) -> PricingResult<()> {
        self.rate = ensure_finite("rate", rate)?;
        Ok(())
    }

    pub(crate) fn set_dividend(&mut self, dividend: f64) -> PricingResult<()> {
        self.dividend = ensure_finite("dividend", dividend)?;
        Ok(())
    }
}

impl TieredCache for VanillaOption {
    fn refresh_primary(&mut self) {
        let (s, k, t) = (self.spot, self.strike, self.maturity);
        let (r, q, sigma) = (self.rate, self.dividend, self.volatility);

        let sqrt_t = t.sqrt();
        let sigma_sqrt_t = sigma * sqrt_t;
        let log_moneyness = (s / k).ln();
        let drift = r - q + 0.5 * sigma * sigma;
        let d1 = (log_moneyness + drift * t) / sigma_sqrt_t;
        let d2 = d1 - sigma_sqrt_t;

        let df_dividend = (-q * t).exp();
        let df_rate = (-r * t).exp();
        let pv_spot = s * df_dividend;
        let pv_strike = k * df_rate;

        let p = &mut self.primary;
        p.sqrt_t = sqrt_t;
        p.d1 = d1;
        p.d2 = d2;
        p.d1_dt = (drift * t - log_moneyness) / (2.0 * t * sigma_sqrt_t);
        p.df_dividend = df_dividend;
        p.df_rate = df_rate;
        p.pv_spot = pv_spot;
        p.pv_strike = pv_strike;
        p.pdf_d1 = pdf(d1);
        p.pdf_d2 = pdf(d2);
        p.cdf_d1 = cdf(d1);
        p.cdf_d2 = cdf(d2);
        p.cdf_neg_d1 = cdf(-d1);
        p.cdf_neg_d2 = cdf(-d2);
        p.premium = match self.option_type {
            OptionType::Call => pv_spot * p.cdf_d1 - pv_strike * p.cdf_d2,
            OptionType::Put => pv_strike * p.cdf_neg_d2 - pv_spot * p.cdf_neg_d1,
        };
        p.vega = pv_spot * p.pdf_d1 * sqrt_t;
    }

    fn refresh_secondary(&mut self) {
        self.greeks = Greeks::compute(self);
    }
}

impl ImpliedTarget for VanillaOption {
    const TARGET: &'static str = "volatility";

    fn domain(&self) -> TargetDomain {
        TargetDomain::Positive
    }

    fn target(&self) -> f64 {
        self.volatility
    }

    fn load_target(&mut self, x: f64) {
        self.volatility = x;
        self.refresh_primary();
    }

    fn model_value(&self) -> f64 {
        self.primary.premium
    }

    fn model_sensitivity(&self) -> f64 {
        self.primary.vega
    }
}

/// Builder for [`VanillaOption`].
///
/// Spot, strike, maturity and rate are required; the dividend yield
/// defaults to zero and the direction to [`OptionType::Call`]. Exactly one
/// of [`volatility`](Self::volatility) and [`price`](Self::price) must be
/// supplied.
#[derive(Debug, Clone, Default)]
pub struct OptionBuilder {
    spot: Option<f64>,
    strike: Option<f64>,
    maturity: Option<f64>,
    rate: Option<f64>,
    dividend: Option<f64>,
    volatility: Option<f64>,
    price: Option<f64>,
    option_type: OptionType,
    solver: Option<ImpliedSolver>,
}

impl OptionBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spot price.
    #[must_use]
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Strike price.
    #[must_use]
    pub fn strike(mut self, strike: f64) -> Self {
        self.strike = Some(strike);
        self
    }

    /// Years to expiry.
    #[must_use]
    pub fn maturity(mut self, years: f64) -> Self {
        self.maturity = Some(years);
        self
    }

    /// Risk-free rate.
    #[must_use]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Continuous dividend yield.
    #[must_use]
    pub fn dividend(mut self, dividend: f64) -> Self {
        self.dividend = Some(dividend);
        self
    }

    /// Volatility.
    #[must_use]
    pub fn volatility(mut self, sigma: f64) -> Self {
        self.volatility = Some(sigma);
        self
    }

    /// Market price; the volatility is implied from it.
    #[must_use]
    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Exercise direction.
    #[must_use]
    pub fn option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = option_type;
        self
    }

    /// Shorthand for `option_type(OptionType::Call)`.
    #[must_use]
    pub fn call(self) -> Self {
        self.option_type(OptionType::Call)
    }

    /// Shorthand for `option_type(OptionType::Put)`.
    #[must_use]
    pub fn put(self) -> Self {
        self.option_type(OptionType::Put)
    }

    /// Solver used to imply the volatility from a price.
    #[must_use]
    pub fn solver(mut self, solver: ImpliedSolver) -> Self {
        self.solver = Some(solver);
        self
    }

    /// Validates the inputs and builds a fully refreshed option.
    pub fn build(self) -> PricingResult<VanillaOption> {
        let solver = self.solver.unwrap_or_default();
        let (volatility, price) = match (self.volatility, self.price) {
            (Some(sigma), None) => (ensure_positive("volatility", sigma)?, None),
            (None, Some(p)) => (solver.initial_guess(), Some(p)),
            (None, None) => {
                return Err(PricingError::invalid_construction(
                    "supply either a volatility or a price",
                ))
            }
            (Some(_), Some(_)) => {
                return Err(PricingError::invalid_construction(
                    "supply a volatility or a price, not both",
                ))
            }
        };

        let mut option = VanillaOption {
            spot: 0.0,
            strike: 0.0,
            maturity: 0.0,
            rate: 0.0,
            dividend: 0.0,
            volatility,
            option_type: self.option_type,
            solver,
            primary: Primary::default(),
            greeks: Greeks::default(),
        };
        option.set_spot(required(self.spot, "spot")?)?;
        option.set_strike(required(self.strike, "strike")?)?;
        option.set_maturity(required(self.maturity, "maturity")?)?;
        option.set_rate(required(self.rate, "rate")?)?;
        option.set_dividend(self.dividend.unwrap_or(0.0))?;
        option.refresh();

        match price {
            Some(p) => option.with_price(p),
            None => Ok(option),
        }
    }
}

fn required(value: Option<f64>, name: &str) -> PricingResult<f64> {
    value.ok_or_else(|| PricingError::invalid_construction(format!("{name} is required")))
}
