//! Sequential zero-curve bootstrap.
//!
//! The algorithm:
//! 1. Sort bonds by maturity and check they share one coupon frequency
//! 2. Start from a working curve holding only the short rate at tenor 0
//! 3. For each bond, read payment tenors the working curve already covers
//!    off that curve and place the rest on a line from the last known
//!    point to an unknown rate at the bond's maturity
//! 4. Solve for that end-point rate with Newton-Raphson so the bond
//!    reprices exactly, then append the segment's rates to the curve

use quantcalc_bonds::Bond;
use quantcalc_math::solvers::{newton_raphson_observed, Silent, SolverConfig, SolverObserver};

use crate::error::{CurveError, CurveResult};
use crate::zero_curve::{YieldCurve, ZeroPoint};

/// Starting rate for each end-point solve.
pub const DEFAULT_INITIAL_GUESS: f64 = 0.05;

/// Maturities closer than this are treated as equal.
const TENOR_EPSILON: f64 = 1e-9;

/// Bootstraps a zero curve from `bonds` with default settings.
///
/// # Example
///
/// ```rust
/// use quantcalc_bonds::Bond;
/// use quantcalc_curves::bootstrap;
///
/// let bond = Bond::builder()
///     .maturity(1.0)
///     .frequency(1)
///     .coupon_rate(0.0)
///     .price(100.0 * (-0.02_f64).exp())
///     .build()
///     .unwrap();
///
/// let curve = bootstrap(&[bond], 0.01).unwrap();
/// assert!((curve.zero_rate(1.0).unwrap() - 0.02).abs() < 1e-9);
/// ```
pub fn bootstrap(bonds: &[Bond], overnight_rate: f64) -> CurveResult<YieldCurve> {
    Bootstrapper::default().bootstrap(bonds, overnight_rate)
}

/// Sequential bootstrapper for piecewise-linear zero curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bootstrapper {
    config: SolverConfig,
    initial_guess: f64,
}

impl Default for Bootstrapper {
    fn default() -> Self {
        Self {
            config: SolverConfig::default(),
            initial_guess: DEFAULT_INITIAL_GUESS,
        }
    }
}

impl Bootstrapper {
    /// Creates a bootstrapper with default solver settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Newton-Raphson tolerances and iteration cap.
    #[must_use]
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the starting rate of each end-point solve.
    #[must_use]
    pub fn with_initial_guess(mut self, guess: f64) -> Self {
        self.initial_guess = guess;
        self
    }

    /// Solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Starting rate of each end-point solve.
    pub fn initial_guess(&self) -> f64 {
        self.initial_guess
    }

    /// Bootstraps a zero curve starting from `overnight_rate` at tenor 0.
    ///
    /// # Errors
    ///
    /// * [`CurveError::NoInstruments`] for an empty slice
    /// * [`CurveError::InvalidRate`] if `overnight_rate` is not finite
    /// * [`CurveError::HeterogeneousFrequency`] if coupon frequencies differ
    /// * [`CurveError::DuplicateMaturity`] if two bonds mature together
    /// * [`CurveError::BootstrapFailed`] if any end-point solve fails; no
    ///   partial curve is returned
    pub fn bootstrap(&self, bonds: &[Bond], overnight_rate: f64) -> CurveResult<YieldCurve> {
        self.bootstrap_observed(bonds, overnight_rate, &Silent)
    }

    /// Like [`bootstrap`](Self::bootstrap), reporting every Newton-Raphson
    /// iteration to `observer`.
    pub fn bootstrap_observed(
        &self,
        bonds: &[Bond],
        overnight_rate: f64,
        observer: &dyn SolverObserver,
    ) -> CurveResult<YieldCurve> {
        let ordered = ordered_instruments(bonds)?;
        if !overnight_rate.is_finite() {
            return Err(CurveError::InvalidRate {
                rate: overnight_rate,
            });
        }

        let mut points = vec![ZeroPoint::new(0.0, overnight_rate)];
        for bond in ordered {
            let segment = self.solve_segment(bond, &points, observer)?;
            points.extend(segment);
        }

        YieldCurve::new(points)
    }

    /// Resolves the rates of `bond`'s payment tenors beyond the working curve.
    fn solve_segment(
        &self,
        bond: &Bond,
        points: &[ZeroPoint],
        observer: &dyn SolverObserver,
    ) -> CurveResult<Vec<ZeroPoint>> {
        let working = YieldCurve::new(points.to_vec())?;
        let last = working.points()[working.len() - 1];
        let maturity = bond.maturity();
        let span = maturity - last.tenor;

        let mut known_value = 0.0;
        let mut unknown = Vec::new();
        for (&t, &c) in bond.times().iter().zip(bond.cash_flows()) {
            if t <= last.tenor + TENOR_EPSILON {
                let r = working.zero_rate(t.min(last.tenor))?;
                known_value += c * (-r * t).exp();
            } else {
                unknown.push(Flow {
                    time: t,
                    amount: c,
                    weight: (t - last.tenor) / span,
                });
            }
        }

        let rate_at = |flow: &Flow, end: f64| last.rate + flow.weight * (end - last.rate);
        let price = bond.price();

        let f = |end: f64| {
            known_value
                + unknown
                    .iter()
                    .map(|flow| flow.amount * (-rate_at(flow, end) * flow.time).exp())
                    .sum::<f64>()
                - price
        };
        let df = |end: f64| {
            unknown
                .iter()
                .map(|flow| {
                    -flow.amount
                        * flow.time
                        * flow.weight
                        * (-rate_at(flow, end) * flow.time).exp()
                })
                .sum::<f64>()
        };

        let result =
            newton_raphson_observed(f, df, self.initial_guess, &self.config, observer).map_err(
                |source| CurveError::BootstrapFailed { maturity, source },
            )?;

        log::debug!(
            "bootstrapped maturity {maturity}: zero rate {:.10} after {} iterations ({} new tenors)",
            result.root,
            result.iterations,
            unknown.len()
        );

        Ok(unknown
            .iter()
            .map(|flow| ZeroPoint::new(flow.time, rate_at(flow, result.root)))
            .collect())
    }
}

/// A payment whose rate lies on the unknown segment.
struct Flow {
    time: f64,
    amount: f64,
    /// Position along the segment, 1 at the bond's maturity.
    weight: f64,
}

/// Sorts by maturity and enforces the shared-frequency and distinct-maturity
/// preconditions.
fn ordered_instruments(bonds: &[Bond]) -> CurveResult<Vec<&Bond>> {
    let Some(first) = bonds.first() else {
        return Err(CurveError::NoInstruments);
    };

    let expected = first.frequency();
    if let Some(bond) = bonds.iter().find(|b| b.frequency() != expected) {
        return Err(CurveError::HeterogeneousFrequency {
            expected,
            found: bond.frequency(),
            maturity: bond.maturity(),
        });
    }

    let mut ordered: Vec<&Bond> = bonds.iter().collect();
    ordered.sort_by(|a, b| a.maturity().total_cmp(&b.maturity()));

    if let Some(pair) = ordered
        .windows(2)
        .find(|w| w[1].maturity() - w[0].maturity() < TENOR_EPSILON)
    {
        return Err(CurveError::DuplicateMaturity {
            maturity: pair[1].maturity(),
        });
    }

    Ok(ordered)
}
