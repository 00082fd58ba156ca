//! Continuously discounted cash-flow streams.

use quantcalc_math::solvers::{newton_raphson, SolverConfig};
use quantcalc_math::MathError;

use crate::error::{ensure_finite, PricingResult};
use crate::implied::DEFAULT_INITIAL_GUESS;

/// A stream of cash amounts received at given times, each discounted at
/// its own continuously compounded rate.
#[derive(Debug, Clone, PartialEq)]
pub struct CashFlows {
    amounts: Vec<f64>,
    times: Vec<f64>,
    rates: Vec<f64>,
}

impl CashFlows {
    /// Creates a stream from matching amount, time and rate vectors.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the vectors differ in length.
    pub fn new(amounts: Vec<f64>, times: Vec<f64>, rates: Vec<f64>) -> PricingResult<Self> {
        if times.len() != amounts.len() {
            return Err(MathError::dimension_mismatch(amounts.len(), times.len()).into());
        }
        if rates.len() != amounts.len() {
            return Err(MathError::dimension_mismatch(amounts.len(), rates.len()).into());
        }
        for value in amounts.iter().chain(&times).chain(&rates) {
            ensure_finite("cash flow input", *value)?;
        }

        Ok(Self {
            amounts,
            times,
            rates,
        })
    }

    /// Creates a stream discounted at a single flat rate.
    pub fn flat(amounts: Vec<f64>, times: Vec<f64>, rate: f64) -> PricingResult<Self> {
        let rates = vec![rate; amounts.len()];
        Self::new(amounts, times, rates)
    }

    /// Cash amounts.
    pub fn amounts(&self) -> &[f64] {
        &self.amounts
    }

    /// Receipt times in years.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Discount rates.
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// `Σ c_i exp(-r_i t_i)`.
    pub fn present_value(&self) -> f64 {
        self.amounts
            .iter()
            .zip(&self.times)
            .zip(&self.rates)
            .map(|((c, t), r)| c * (-r * t).exp())
            .sum()
    }

    /// Present value with every flow discounted at the flat rate `y`.
    pub fn present_value_at(&self, y: f64) -> f64 {
        self.amounts
            .iter()
            .zip(&self.times)
            .map(|(c, t)| c * (-y * t).exp())
            .sum()
    }

    /// Flat continuously compounded rate that discounts the stream to
    /// `target_pv`, or to its own present value when `None`.
    ///
    /// Solved by Newton-Raphson from 0.1 with the analytic derivative
    /// `-Σ t_i c_i exp(-y t_i)`.
    pub fn internal_rate_of_return(&self, target_pv: Option<f64>) -> PricingResult<f64> {
        self.internal_rate_of_return_with(target_pv, &SolverConfig::default())
    }

    /// [`internal_rate_of_return`](Self::internal_rate_of_return) with
    /// explicit solver settings.
    pub fn internal_rate_of_return_with(
        &self,
        target_pv: Option<f64>,
        config: &SolverConfig,
    ) -> PricingResult<f64> {
        let target = match target_pv {
            Some(pv) => ensure_finite("present value", pv)?,
            None => self.present_value(),
        };

        let f = |y: f64| self.present_value_at(y) - target;
        let df = |y: f64| {
            self.amounts
                .iter()
                .zip(&self.times)
                .map(|(c, t)| -t * c * (-y * t).exp())
                .sum::<f64>()
        };

        Ok(newton_raphson(f, df, DEFAULT_INITIAL_GUESS, config)?.root)
    }
}
