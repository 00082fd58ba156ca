//! Bootstrap command implementation.
//!
//! Builds a zero curve from bond quotes given on the command line or in a
//! CSV file with the header `maturity,coupon,frequency,price`.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use quantcalc_bonds::Bond;
use quantcalc_config::CalcConfig;
use quantcalc_curves::{YieldCurve, ZeroPoint};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::{print_header, print_json, print_table};

/// Arguments for the bootstrap command.
#[derive(Args, Debug)]
pub struct BootstrapArgs {
    /// Overnight rate at tenor 0 (continuously compounded decimal)
    #[arg(short, long)]
    pub overnight: f64,

    /// Bond quote; repeat for each bond
    #[arg(short, long = "bond", value_name = "MATURITY,COUPON,FREQUENCY,PRICE")]
    pub bonds: Vec<BondQuote>,

    /// CSV file with columns maturity,coupon,frequency,price
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// One market bond: coupon in percent.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BondQuote {
    /// Years to maturity.
    pub maturity: f64,
    /// Annual coupon rate in percent.
    pub coupon: f64,
    /// Coupon payments per year.
    pub frequency: u32,
    /// Observed price.
    pub price: f64,
}

impl FromStr for BondQuote {
    type Err = CliError;

    fn from_str(s: &str) -> CliResult<Self> {
        let invalid = |reason: String| CliError::InvalidQuote {
            quote: s.to_string(),
            reason,
        };

        let fields: Vec<&str> = s.split(',').map(str::trim).collect();
        let &[maturity, coupon, frequency, price] = fields.as_slice() else {
            return Err(invalid(format!("expected 4 fields, found {}", fields.len())));
        };

        let number = |name: &str, text: &str| {
            text.parse::<f64>()
                .map_err(|e| invalid(format!("{name} '{text}': {e}")))
        };

        Ok(Self {
            maturity: number("maturity", maturity)?,
            coupon: number("coupon", coupon)?,
            frequency: frequency
                .parse()
                .map_err(|e| invalid(format!("frequency '{frequency}': {e}")))?,
            price: number("price", price)?,
        })
    }
}

impl BondQuote {
    fn to_bond(self, config: &CalcConfig) -> Result<Bond> {
        Bond::builder()
            .maturity(self.maturity)
            .coupon_percent(self.coupon)
            .frequency(self.frequency)
            .price(self.price)
            .solver(config.yield_solver()?)
            .build()
            .with_context(|| format!("building bond maturing at {}", self.maturity))
    }
}

fn read_quotes(path: &Path) -> Result<Vec<BondQuote>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    reader
        .deserialize::<BondQuote>()
        .enumerate()
        .map(|(i, row)| row.with_context(|| format!("{} row {}", path.display(), i + 1)))
        .collect()
}

#[derive(Debug, Serialize, Tabled)]
struct CurveRow {
    #[tabled(rename = "Tenor")]
    tenor: String,
    #[tabled(rename = "Zero Rate (%)")]
    zero_rate: String,
    #[tabled(rename = "Discount Factor")]
    discount_factor: String,
}

impl From<&ZeroPoint> for CurveRow {
    fn from(point: &ZeroPoint) -> Self {
        Self {
            tenor: format!("{:.4}", point.tenor),
            zero_rate: format!("{:.6}", point.rate * 100.0),
            discount_factor: format!("{:.8}", point.discount_factor()),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct Repricing {
    #[tabled(rename = "Maturity")]
    maturity: f64,
    #[tabled(rename = "Market Price")]
    market_price: f64,
    #[tabled(rename = "Curve Price")]
    curve_price: f64,
}

#[derive(Debug, Serialize)]
struct BootstrapReport<'a> {
    overnight: f64,
    curve: &'a YieldCurve,
    repricing: Vec<Repricing>,
}

/// Quoted price next to the curve price of each bond, by maturity.
fn repricing_rows(
    quotes: &[BondQuote],
    bonds: &[Bond],
    curve: &YieldCurve,
) -> Result<Vec<Repricing>> {
    let mut rows = quotes
        .iter()
        .zip(bonds)
        .map(|(quote, bond)| {
            Ok(Repricing {
                maturity: quote.maturity,
                market_price: quote.price,
                curve_price: curve.price(bond)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    rows.sort_by(|a, b| a.maturity.total_cmp(&b.maturity));
    Ok(rows)
}

/// Execute the bootstrap command.
pub fn execute(args: BootstrapArgs, config: &CalcConfig, format: OutputFormat) -> Result<()> {
    let mut quotes = args.bonds;
    if let Some(path) = &args.file {
        quotes.extend(read_quotes(path)?);
    }
    if quotes.is_empty() {
        return Err(CliError::MissingArgument("--bond or --file".into()).into());
    }

    let bonds = quotes
        .iter()
        .map(|q| q.to_bond(config))
        .collect::<Result<Vec<_>>>()?;
    tracing::info!(bonds = bonds.len(), "bootstrapping zero curve");

    let curve = config.bootstrapper().bootstrap(&bonds, args.overnight)?;

    let repricing = repricing_rows(&quotes, &bonds, &curve)?;

    match format {
        OutputFormat::Table => {
            print_header("Zero Curve");
            let rows: Vec<CurveRow> = curve.points().iter().map(CurveRow::from).collect();
            print_table(&rows);
            print_header("Repricing");
            print_table(&repricing);
        }
        OutputFormat::Json => print_json(&BootstrapReport {
            overnight: args.overnight,
            curve: &curve,
            repricing,
        })?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quote() {
        let quote: BondQuote = "1.5, 2, 2, 99.95".parse().unwrap();

        assert_eq!(
            quote,
            BondQuote {
                maturity: 1.5,
                coupon: 2.0,
                frequency: 2,
                price: 99.95
            }
        );
    }

    #[test]
    fn test_parse_quote_errors() {
        assert!(matches!(
            "1,2,3".parse::<BondQuote>(),
            Err(CliError::InvalidQuote { .. })
        ));
        assert!("1,2,semi,100".parse::<BondQuote>().is_err());
        assert!("x,2,2,100".parse::<BondQuote>().is_err());
    }

    #[test]
    fn test_repricing_shows_quoted_prices() {
        let config = CalcConfig::default();
        let quotes = vec![
            BondQuote {
                maturity: 1.5,
                coupon: 2.0,
                frequency: 2,
                price: 99.95,
            },
            BondQuote {
                maturity: 1.0,
                coupon: 3.0,
                frequency: 2,
                price: 101.25,
            },
        ];
        let bonds = quotes
            .iter()
            .map(|q| q.to_bond(&config))
            .collect::<Result<Vec<_>>>()
            .unwrap();
        let curve = config.bootstrapper().bootstrap(&bonds, 0.015).unwrap();

        let rows = repricing_rows(&quotes, &bonds, &curve).unwrap();

        assert_eq!(rows[0].maturity, 1.0);
        assert_eq!(rows[0].market_price, 101.25);
        assert_eq!(rows[1].market_price, 99.95);
        for row in &rows {
            assert!((row.curve_price - row.market_price).abs() < 1e-6);
        }
    }
}
