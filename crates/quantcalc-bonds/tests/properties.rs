//! Property tests for bond pricing and yield solving.

use approx::assert_relative_eq;
use proptest::prelude::*;

use quantcalc_bonds::{Bond, BondParameter};

fn frequency_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![Just(1u32), Just(2u32), Just(4u32), Just(12u32)]
}

fn bond_from_yield(maturity: f64, frequency: u32, coupon: f64, y: f64) -> Bond {
    Bond::builder()
        .maturity(maturity)
        .frequency(frequency)
        .coupon_rate(coupon)
        .yield_rate(y)
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn price_is_sum_of_discounted_flows(
        maturity in 0.25f64..30.0,
        frequency in frequency_strategy(),
        coupon in 0.0f64..0.12,
        y in -0.01f64..0.15,
    ) {
        let bond = bond_from_yield(maturity, frequency, coupon, y);

        let sum: f64 = bond.discounted_cash_flows().iter().sum();
        prop_assert!((bond.price() - sum).abs() < 1e-9);
        prop_assert_eq!(bond.times().len(), bond.cash_flows().len());
    }

    #[test]
    fn price_yield_round_trip(
        maturity in 0.25f64..30.0,
        frequency in frequency_strategy(),
        coupon in 0.0f64..0.12,
        y in -0.01f64..0.15,
    ) {
        let price = bond_from_yield(maturity, frequency, coupon, y).price();

        let quoted = Bond::builder()
            .maturity(maturity)
            .frequency(frequency)
            .coupon_rate(coupon)
            .price(price)
            .build()
            .unwrap();

        prop_assert!((quoted.yield_rate() - y).abs() < 1e-8);
        let repriced = quoted.with_yield(quoted.yield_rate()).unwrap();
        prop_assert!((repriced.price() - price).abs() < 1e-6);
    }

    #[test]
    fn mutation_keeps_cache_consistent(
        maturity in 0.5f64..20.0,
        new_maturity in 0.5f64..20.0,
        coupon in 0.0f64..0.1,
        new_coupon in 0.0f64..0.1,
    ) {
        let bond = bond_from_yield(maturity, 2, coupon, 0.03)
            .with_parameter(BondParameter::Maturity, new_maturity)
            .unwrap()
            .with_parameter(BondParameter::Coupon, new_coupon)
            .unwrap();

        let fresh = bond_from_yield(new_maturity, 2, new_coupon, 0.03);
        prop_assert_eq!(bond.price().to_bits(), fresh.price().to_bits());
        prop_assert_eq!(bond.convexity().to_bits(), fresh.convexity().to_bits());
    }
}

#[test]
fn duration_falls_as_yield_rises() {
    let low = bond_from_yield(10.0, 2, 0.05, 0.02);
    let high = low.with_parameter(BondParameter::Yield, 0.08).unwrap();

    assert!(high.duration() < low.duration());
    assert_relative_eq!(
        high.duration(),
        -high.price_sensitivity() / high.price(),
        epsilon = 1e-12
    );
}
