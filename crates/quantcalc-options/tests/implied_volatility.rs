//! Implied volatility round trips across moneyness and direction.

use approx::assert_relative_eq;
use proptest::prelude::*;

use quantcalc_core::implied::ImpliedSolver;
use quantcalc_core::PricingError;
use quantcalc_math::solvers::SolverMethod;
use quantcalc_math::MathError;
use quantcalc_options::{OptionType, VanillaOption};

fn quote(strike: f64, option_type: OptionType, price: f64) -> Result<VanillaOption, PricingError> {
    VanillaOption::builder()
        .spot(100.0)
        .strike(strike)
        .maturity(1.0)
        .rate(0.05)
        .dividend(0.0)
        .option_type(option_type)
        .price(price)
        .build()
}

#[test]
fn atm_call_at_eight_round_trips() {
    let implied = quote(100.0, OptionType::Call, 8.0).unwrap();

    let fresh = VanillaOption::builder()
        .spot(100.0)
        .strike(100.0)
        .maturity(1.0)
        .rate(0.05)
        .volatility(implied.volatility())
        .build()
        .unwrap();

    assert_relative_eq!(fresh.premium(), 8.0, epsilon = 1e-6);
    assert!(implied.volatility() > 0.1 && implied.volatility() < 0.2);
}

#[test]
fn dividend_paying_call() {
    let call = VanillaOption::builder()
        .spot(50.0)
        .strike(45.0)
        .maturity(0.75)
        .rate(0.02)
        .dividend(0.01)
        .price(8.0)
        .build()
        .unwrap();

    assert_relative_eq!(call.volatility(), 0.303_302_394_01, epsilon = 1e-9);
    assert_relative_eq!(call.premium(), 8.0, epsilon = 1e-9);
}

#[test]
fn recovers_generating_volatility() {
    for option_type in [OptionType::Call, OptionType::Put] {
        for strike in [90.0, 95.0, 100.0, 110.0, 125.0] {
            for sigma in [0.15, 0.3, 0.6] {
                let priced = VanillaOption::builder()
                    .spot(100.0)
                    .strike(strike)
                    .maturity(1.0)
                    .rate(0.05)
                    .volatility(sigma)
                    .option_type(option_type)
                    .build()
                    .unwrap();

                let solved = priced.implied_volatility(priced.premium()).unwrap();

                assert_relative_eq!(solved, sigma, epsilon = 1e-7);
            }
        }
    }
}

#[test]
fn deep_in_the_money_needs_the_bracketing_fallback() {
    // From the default guess of 0.1 the first Newton step leaves the
    // positive domain, which surfaces as a typed error.
    let priced = VanillaOption::builder()
        .spot(100.0)
        .strike(80.0)
        .maturity(1.0)
        .rate(0.05)
        .volatility(0.6)
        .build()
        .unwrap();

    let newton = priced.implied_volatility(priced.premium());
    assert!(matches!(
        newton,
        Err(PricingError::Solver(MathError::NonFiniteValue { .. }))
    ));

    let fallback = VanillaOption::builder()
        .spot(100.0)
        .strike(80.0)
        .maturity(1.0)
        .rate(0.05)
        .solver(
            ImpliedSolver::new()
                .with_method(SolverMethod::Bisection)
                .with_bracket(0.01, 3.0),
        )
        .price(priced.premium())
        .build()
        .unwrap();
    assert_relative_eq!(fallback.volatility(), 0.6, epsilon = 1e-8);
}

#[test]
fn bisection_fallback_agrees_with_newton() {
    let newton = quote(100.0, OptionType::Put, 6.0).unwrap();

    let bisection = VanillaOption::builder()
        .spot(100.0)
        .strike(100.0)
        .maturity(1.0)
        .rate(0.05)
        .put()
        .solver(
            ImpliedSolver::new()
                .with_method(SolverMethod::Bisection)
                .with_bracket(0.01, 2.0),
        )
        .price(6.0)
        .build()
        .unwrap();

    assert_relative_eq!(bisection.volatility(), newton.volatility(), epsilon = 1e-8);
}

#[test]
fn arbitrage_violating_quote_is_rejected() {
    // A call can never be worth more than the spot
    let result = quote(100.0, OptionType::Call, 150.0);

    assert!(matches!(
        result,
        Err(PricingError::InvalidParameter { name: "price", .. })
    ));
}

fn quoted_call(strike: f64, maturity: f64) -> VanillaOption {
    VanillaOption::builder()
        .spot(100.0)
        .strike(strike)
        .maturity(maturity)
        .rate(0.05)
        .volatility(0.2)
        .build()
        .unwrap()
}

#[test]
fn newton_leaving_positive_volatilities_keeps_option_unchanged() {
    // Far out of the money the first step from 0.1 lands on a negative
    // volatility, which the objective reports as NaN.
    let option = quoted_call(150.0, 1.0);
    let premium = option.premium();

    let result = option.with_price(0.5);

    match result {
        Err(PricingError::Solver(MathError::NonFiniteValue { x })) => assert!(x < 0.0),
        other => panic!("expected NonFiniteValue, got {other:?}"),
    }
    assert_eq!(option.volatility(), 0.2);
    assert_eq!(option.premium(), premium);
}

#[test]
fn flat_vega_is_a_degenerate_derivative() {
    // At 10% volatility a 4x strike over three months has no measurable vega.
    let option = quoted_call(400.0, 0.25);
    let greeks = *option.greeks();

    let result = option.with_price(0.01);

    match result {
        Err(PricingError::Solver(MathError::DegenerateDerivative { x, derivative })) => {
            assert_eq!(x, 0.1);
            assert!(derivative.abs() < 1e-14);
        }
        other => panic!("expected DegenerateDerivative, got {other:?}"),
    }
    assert_eq!(option.volatility(), 0.2);
    assert_eq!(option.greeks(), &greeks);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn put_call_parity(
        spot in 50.0f64..150.0,
        strike in 50.0f64..150.0,
        maturity in 0.1f64..3.0,
        rate in -0.01f64..0.1,
        dividend in 0.0f64..0.05,
        sigma in 0.05f64..1.0,
    ) {
        let call = VanillaOption::builder()
            .spot(spot)
            .strike(strike)
            .maturity(maturity)
            .rate(rate)
            .dividend(dividend)
            .volatility(sigma)
            .build()
            .unwrap();
        let put = call.with_option_type(OptionType::Put);

        let forward_gap = spot * (-dividend * maturity).exp() - strike * (-rate * maturity).exp();
        prop_assert!((call.premium() - put.premium() - forward_gap).abs() < 1e-9);
    }

    #[test]
    fn premium_volatility_round_trip_by_bisection(
        strike in 90.0f64..115.0,
        maturity in 0.5f64..2.0,
        sigma in 0.15f64..0.8,
        put in any::<bool>(),
    ) {
        let option_type = if put { OptionType::Put } else { OptionType::Call };
        let priced = VanillaOption::builder()
            .spot(100.0)
            .strike(strike)
            .maturity(maturity)
            .rate(0.03)
            .volatility(sigma)
            .option_type(option_type)
            .build()
            .unwrap();

        let solved = VanillaOption::builder()
            .spot(100.0)
            .strike(strike)
            .maturity(maturity)
            .rate(0.03)
            .option_type(option_type)
            .solver(
                ImpliedSolver::new()
                    .with_method(SolverMethod::Bisection)
                    .with_bracket(0.01, 3.0),
            )
            .price(priced.premium())
            .build()
            .unwrap();

        prop_assert!((solved.volatility() - sigma).abs() < 1e-7);
        prop_assert!((solved.premium() - priced.premium()).abs() < 1e-8);
    }
}
