//! Payment schedule of a bullet coupon bond.

/// Slack when counting coupon periods, so that `maturity * frequency`
/// landing a hair above an integer does not add a spurious payment.
const PERIOD_EPSILON: f64 = 1e-9;

/// Number of payments remaining for `maturity` years at `frequency` per year.
pub fn payment_count(maturity: f64, frequency: u32) -> usize {
    (maturity * f64::from(frequency) - PERIOD_EPSILON).ceil().max(1.0) as usize
}

/// Payment times in years, ascending, ending at `maturity`.
///
/// Times step back from maturity by `1 / frequency` while positive, so a
/// bond part-way through a coupon period starts with a short stub.
///
/// ```rust
/// use quantcalc_bonds::schedule::payment_times;
///
/// assert_eq!(payment_times(1.5, 2), vec![0.5, 1.0, 1.5]);
/// assert_eq!(payment_times(0.75, 2), vec![0.25, 0.75]);
/// ```
pub fn payment_times(maturity: f64, frequency: u32) -> Vec<f64> {
    let step = 1.0 / f64::from(frequency);
    let n = payment_count(maturity, frequency);
    (0..n).rev().map(|k| maturity - k as f64 * step).collect()
}

/// Cash received at each payment: one coupon per period, plus the face
/// value on the final payment.
pub fn cash_amounts(count: usize, coupon_rate: f64, face_value: f64, frequency: u32) -> Vec<f64> {
    let coupon = coupon_rate * face_value / f64::from(frequency);
    let mut amounts = vec![coupon; count];
    if let Some(last) = amounts.last_mut() {
        *last += face_value;
    }
    amounts
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_whole_periods() {
        assert_eq!(payment_times(3.0, 2), vec![0.5, 1.0, 1.5, 2.0, 2.5, 3.0]);
        assert_eq!(payment_times(1.0, 1), vec![1.0]);
        assert_eq!(payment_count(1.0, 4), 4);
    }

    #[test]
    fn test_stub_period() {
        let times = payment_times(1.2, 2);

        assert_eq!(times.len(), 3);
        assert_relative_eq!(times[0], 0.2, epsilon = 1e-12);
        assert_relative_eq!(times[2], 1.2, epsilon = 1e-12);
    }

    #[test]
    fn test_short_maturity_single_payment() {
        assert_eq!(payment_times(0.1, 2), vec![0.1]);
    }

    #[test]
    fn test_cash_amounts() {
        let cash = cash_amounts(3, 0.02, 100.0, 2);

        assert_eq!(cash, vec![1.0, 1.0, 101.0]);
        assert_eq!(cash_amounts(2, 0.0, 1000.0, 4), vec![0.0, 1000.0]);
    }
}
