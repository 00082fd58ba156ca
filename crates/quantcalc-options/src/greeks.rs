//! Black-Scholes-Merton sensitivities.
//!
//! Notation: `S` spot, `K` strike, `T` years to expiry, `r` rate, `q`
//! dividend yield, `σ` volatility, `n` and `N` the standard normal density
//! and distribution. Time sensitivities are calendar-time (`-∂/∂T`).

use serde::Serialize;

use crate::option::{OptionType, VanillaOption};

/// Every sensitivity of a [`VanillaOption`], computed once per refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Greeks {
    /// ∂V/∂S. Call `e^{-qT} N(d1)`, put `-e^{-qT} N(-d1)`.
    pub delta: f64,
    /// ∂²V/∂S², `e^{-qT} n(d1) / (S σ √T)`.
    pub gamma: f64,
    /// ∂V/∂σ, `S e^{-qT} n(d1) √T`.
    pub vega: f64,
    /// -∂V/∂T, per year.
    pub theta: f64,
    /// ∂V/∂r. Call `K T e^{-rT} N(d2)`, put `-K T e^{-rT} N(-d2)`.
    pub rho: f64,
    /// ∂V/∂q. Call `-T S e^{-qT} N(d1)`, put `T S e^{-qT} N(-d1)`.
    pub epsilon: f64,
    /// Delta times spot over premium.
    pub elasticity: f64,
    /// ∂²V/∂S∂σ, `-e^{-qT} n(d1) d2 / σ`.
    pub vanna: f64,
    /// -∂Δ/∂T.
    pub charm: f64,
    /// ∂²V/∂σ², `vega d1 d2 / σ`.
    pub vomma: f64,
    /// -∂vega/∂T.
    pub veta: f64,
    /// ∂³V/∂S³.
    pub speed: f64,
    /// ∂Γ/∂σ.
    pub zomma: f64,
    /// -∂Γ/∂T.
    pub color: f64,
    /// ∂³V/∂σ³.
    pub ultima: f64,
    /// ∂V/∂K. Call `-e^{-rT} N(d2)`, put `e^{-rT} N(-d2)`.
    pub dual_delta: f64,
    /// ∂²V/∂K², `e^{-rT} n(d2) / (K σ √T)`.
    pub dual_gamma: f64,
}

impl Greeks {
    /// Computes all sensitivities from the option's primary cache tier.
    pub(crate) fn compute(option: &VanillaOption) -> Self {
        let p = option.primary();
        let (s, k, t) = (option.spot(), option.strike(), option.maturity());
        let (r, q, sigma) = (option.rate(), option.dividend(), option.volatility());
        let is_call = option.option_type() == OptionType::Call;

        let (d1, d2, d1_dt) = (p.d1, p.d2, p.d1_dt);
        let sigma_sqrt_t = sigma * p.sqrt_t;
        let vega = p.vega;
        let gamma = p.df_dividend * p.pdf_d1 / (s * sigma_sqrt_t);
        let d1d2 = d1 * d2;

        // Shared by both directions: the density terms of theta and charm.
        let decay = -p.pv_spot * p.pdf_d1 * sigma / (2.0 * p.sqrt_t);
        let delta_drift = -p.df_dividend * p.pdf_d1 * d1_dt;

        let (delta, theta, rho, epsilon, charm, dual_delta) = if is_call {
            (
                p.df_dividend * p.cdf_d1,
                decay + q * p.pv_spot * p.cdf_d1 - r * p.pv_strike * p.cdf_d2,
                k * t * p.df_rate * p.cdf_d2,
                -t * p.pv_spot * p.cdf_d1,
                q * p.df_dividend * p.cdf_d1 + delta_drift,
                -p.df_rate * p.cdf_d2,
            )
        } else {
            (
                -p.df_dividend * p.cdf_neg_d1,
                decay - q * p.pv_spot * p.cdf_neg_d1 + r * p.pv_strike * p.cdf_neg_d2,
                -k * t * p.df_rate * p.cdf_neg_d2,
                t * p.pv_spot * p.cdf_neg_d1,
                -q * p.df_dividend * p.cdf_neg_d1 + delta_drift,
                p.df_rate * p.cdf_neg_d2,
            )
        };

        let elasticity = if p.premium > 0.0 {
            delta * s / p.premium
        } else {
            0.0
        };

        Greeks {
            delta,
            gamma,
            vega,
            theta,
            rho,
            epsilon,
            elasticity,
            vanna: -p.df_dividend * p.pdf_d1 * d2 / sigma,
            charm,
            vomma: vega * d1d2 / sigma,
            veta: vega * (q + d1 * d1_dt - 1.0 / (2.0 * t)),
            speed: -gamma / s * (d1 / sigma_sqrt_t + 1.0),
            zomma: gamma * (d1d2 - 1.0) / sigma,
            color: gamma * (q + d1 * d1_dt + 1.0 / (2.0 * t)),
            ultima: -vega / (sigma * sigma) * (d1d2 * (1.0 - d1d2) + d1 * d1 + d2 * d2),
            dual_delta,
            dual_gamma: p.df_rate * p.pdf_d2 / (k * sigma_sqrt_t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    use crate::parameter::OptionParameter;

    const H: f64 = 1e-4;

    fn option(option_type: OptionType) -> VanillaOption {
        VanillaOption::builder()
            .spot(105.0)
            .strike(100.0)
            .maturity(0.8)
            .rate(0.04)
            .dividend(0.015)
            .volatility(0.25)
            .option_type(option_type)
            .build()
            .unwrap()
    }

    fn bump(option: &VanillaOption, param: OptionParameter, h: f64) -> VanillaOption {
        option
            .with_parameter(param, option.parameter(param) + h)
            .unwrap()
    }

    /// Central difference of `value` in `param`.
    fn central<F>(option: &VanillaOption, param: OptionParameter, value: F) -> f64
    where
        F: Fn(&VanillaOption) -> f64,
    {
        let up = value(&bump(option, param, H));
        let down = value(&bump(option, param, -H));
        (up - down) / (2.0 * H)
    }

    fn check_first_order(option_type: OptionType) {
        let opt = option(option_type);
        let g = *opt.greeks();
        let premium = |o: &VanillaOption| o.premium();

        assert_relative_eq!(g.delta, central(&opt, OptionParameter::Spot, premium), epsilon = 1e-7);
        assert_relative_eq!(g.vega, central(&opt, OptionParameter::Volatility, premium), epsilon = 1e-6);
        assert_relative_eq!(g.rho, central(&opt, OptionParameter::Rate, premium), epsilon = 1e-6);
        assert_relative_eq!(
            g.epsilon,
            central(&opt, OptionParameter::Dividend, premium),
            epsilon = 1e-6
        );
        assert_relative_eq!(
            g.theta,
            -central(&opt, OptionParameter::Maturity, premium),
            epsilon = 1e-6
        );
        assert_relative_eq!(
            g.dual_delta,
            central(&opt, OptionParameter::Strike, premium),
            epsilon = 1e-7
        );
    }

    fn check_higher_order(option_type: OptionType) {
        let opt = option(option_type);
        let g = *opt.greeks();
        let delta = |o: &VanillaOption| o.greeks().delta;
        let vega = |o: &VanillaOption| o.greeks().vega;
        let gamma = |o: &VanillaOption| o.greeks().gamma;
        let vomma = |o: &VanillaOption| o.greeks().vomma;
        let dual_delta = |o: &VanillaOption| o.greeks().dual_delta;

        assert_relative_eq!(g.gamma, central(&opt, OptionParameter::Spot, delta), epsilon = 1e-7);
        assert_relative_eq!(g.vanna, central(&opt, OptionParameter::Volatility, delta), epsilon = 1e-6);
        assert_relative_eq!(g.charm, -central(&opt, OptionParameter::Maturity, delta), epsilon = 1e-6);
        assert_relative_eq!(g.vomma, central(&opt, OptionParameter::Volatility, vega), epsilon = 1e-5);
        assert_relative_eq!(g.veta, -central(&opt, OptionParameter::Maturity, vega), epsilon = 1e-5);
        assert_relative_eq!(g.speed, central(&opt, OptionParameter::Spot, gamma), epsilon = 1e-8);
        assert_relative_eq!(g.zomma, central(&opt, OptionParameter::Volatility, gamma), epsilon = 1e-6);
        assert_relative_eq!(g.color, -central(&opt, OptionParameter::Maturity, gamma), epsilon = 1e-6);
        assert_relative_eq!(
            g.ultima,
            central(&opt, OptionParameter::Volatility, vomma),
            max_relative = 1e-6
        );
        assert_relative_eq!(
            g.dual_gamma,
            central(&opt, OptionParameter::Strike, dual_delta),
            epsilon = 1e-7
        );
    }

    #[test]
    fn test_call_first_order_against_finite_differences() {
        check_first_order(OptionType::Call);
    }

    #[test]
    fn test_put_first_order_against_finite_differences() {
        check_first_order(OptionType::Put);
    }

    #[test]
    fn test_call_higher_order_against_finite_differences() {
        check_higher_order(OptionType::Call);
    }

    #[test]
    fn test_put_higher_order_against_finite_differences() {
        check_higher_order(OptionType::Put);
    }

    #[test]
    fn test_direction_independent_greeks_agree() {
        let call = *option(OptionType::Call).greeks();
        let put = *option(OptionType::Put).greeks();

        assert_relative_eq!(call.gamma, put.gamma, epsilon = 1e-15);
        assert_relative_eq!(call.vega, put.vega, epsilon = 1e-15);
        assert_relative_eq!(call.vomma, put.vomma, epsilon = 1e-15);
        assert_relative_eq!(call.delta - put.delta, (-0.015_f64 * 0.8).exp(), epsilon = 1e-14);
    }

    #[test]
    fn test_serializes_every_field() {
        let json = serde_json::to_value(option(OptionType::Call).greeks()).unwrap();
        let fields = json.as_object().unwrap();

        assert_eq!(fields.len(), 17);
        assert!(fields.contains_key("dual_gamma"));
    }
}
