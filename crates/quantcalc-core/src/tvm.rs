//! Time value of money with discrete compounding.

use std::fmt;

use crate::error::{ensure_finite, ensure_positive, PricingError, PricingResult};

/// Compounding convention of a quoted rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compounding {
    /// Compounded `n` times per year.
    Periodic(u32),
    /// Continuously compounded.
    Continuous,
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compounding::Periodic(n) => write!(f, "{n}x per year"),
            Compounding::Continuous => f.write_str("continuous"),
        }
    }
}

/// Present value of per-period `flows` at per-period rate `rate`.
///
/// With `due` the first flow is received now; otherwise one period from now.
pub fn present_value(rate: f64, flows: &[f64], due: bool) -> f64 {
    let offset = if due { 0 } else { 1 };
    flows
        .iter()
        .enumerate()
        .map(|(k, c)| c * (1.0 + rate).powi(-((k + offset) as i32)))
        .sum()
}

/// Value at the last period of per-period `flows` grown at `rate`.
pub fn future_value(rate: f64, flows: &[f64]) -> f64 {
    let last = flows.len().saturating_sub(1);
    flows
        .iter()
        .enumerate()
        .map(|(k, c)| c * (1.0 + rate).powi((last - k) as i32))
        .sum()
}

/// Converts an annual rate between compounding conventions.
///
/// # Errors
///
/// Returns `InvalidParameter` for a zero periodic frequency or a rate whose
/// growth factor `1 + r/m` is not positive.
pub fn convert_rate(rate: f64, from: Compounding, to: Compounding) -> PricingResult<f64> {
    ensure_finite("rate", rate)?;
    if from == to {
        return Ok(rate);
    }

    let continuous = match from {
        Compounding::Continuous => rate,
        Compounding::Periodic(m) => {
            let m = periods("source frequency", m)?;
            let growth = 1.0 + rate / m;
            if growth <= 0.0 {
                return Err(PricingError::invalid_parameter(
                    "rate",
                    rate,
                    "periodic growth factor must be positive",
                ));
            }
            m * growth.ln()
        }
    };

    Ok(match to {
        Compounding::Continuous => continuous,
        Compounding::Periodic(n) => {
            let n = periods("target frequency", n)?;
            n * ((continuous / n).exp() - 1.0)
        }
    })
}

fn periods(side: &'static str, n: u32) -> PricingResult<f64> {
    if n == 0 {
        return Err(PricingError::invalid_parameter(
            side,
            0.0,
            "periodic compounding needs at least one period per year",
        ));
    }
    Ok(f64::from(n))
}

/// Level payment that fully amortises `principal` over `years` at
/// `annual_rate` compounded `periods_per_year` times.
pub fn level_payment(
    principal: f64,
    years: f64,
    annual_rate: f64,
    periods_per_year: u32,
) -> PricingResult<f64> {
    ensure_finite("principal", principal)?;
    ensure_positive("years", years)?;
    ensure_finite("annual rate", annual_rate)?;
    let m = periods("periods per year", periods_per_year)?;

    let periods = m * years;
    if annual_rate == 0.0 {
        return Ok(principal / periods);
    }

    let r = annual_rate / m;
    Ok(principal * r / (1.0 - (1.0 + r).powf(-periods)))
}
