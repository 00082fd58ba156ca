//! Bond command implementation.
//!
//! Prices a bond from a yield or solves the yield from a price.

use anyhow::Result;
use clap::{ArgGroup, Args};
use serde::Serialize;

use quantcalc_bonds::{Bond, BondAnalytics};
use quantcalc_config::CalcConfig;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_header, print_json, print_table, KeyValue};

/// Arguments for the bond command.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["yield_value", "price"])))]
pub struct BondArgs {
    /// Years to maturity
    #[arg(short, long)]
    pub maturity: f64,

    /// Annual coupon rate (as percentage, e.g., 5.0 for 5%)
    #[arg(short = 'k', long, default_value = "0")]
    pub coupon: f64,

    /// Coupon payments per year
    #[arg(long, default_value = "2")]
    pub frequency: u32,

    /// Face value
    #[arg(long, default_value = "100")]
    pub face: f64,

    /// Continuously compounded yield (as percentage). Prices the bond.
    #[arg(short, long = "yield")]
    pub yield_value: Option<f64>,

    /// Observed price. Solves the yield.
    #[arg(short, long)]
    pub price: Option<f64>,
}

/// Bond analytics plus the zero-coupon money-market yields.
#[derive(Debug, Serialize)]
struct BondReport {
    #[serde(flatten)]
    analytics: BondAnalytics,
    #[serde(skip_serializing_if = "Option::is_none")]
    bank_discount_yield: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    money_market_yield: Option<f64>,
}

/// Execute the bond command.
pub fn execute(args: BondArgs, config: &CalcConfig, format: OutputFormat) -> Result<()> {
    let builder = Bond::builder()
        .maturity(args.maturity)
        .coupon_percent(args.coupon)
        .frequency(args.frequency)
        .face_value(args.face)
        .solver(config.yield_solver()?);

    let builder = match (args.yield_value, args.price) {
        (Some(y), _) => builder.yield_rate(y / 100.0),
        (None, Some(price)) => builder.price(price),
        (None, None) => return Err(CliError::MissingArgument("--yield or --price".into()).into()),
    };
    let bond = builder.build()?;

    if args.price.is_some() {
        tracing::info!(yield_rate = bond.yield_rate(), "solved implied yield");
    }

    let report = BondReport {
        analytics: bond.analytics(),
        bank_discount_yield: bond.bank_discount_yield().ok(),
        money_market_yield: bond.money_market_yield().ok(),
    };

    match format {
        OutputFormat::Table => {
            print_header("Bond Analytics");
            print_table(&rows(&report));
        }
        OutputFormat::Json => print_json(&report)?,
    }

    Ok(())
}

fn rows(report: &BondReport) -> Vec<KeyValue> {
    let a = &report.analytics;
    let mut rows = vec![
        KeyValue::number("Maturity (years)", a.maturity, 4),
        KeyValue::new("Frequency", a.frequency.to_string()),
        KeyValue::percent("Coupon", a.coupon_rate),
        KeyValue::number("Face Value", a.face_value, 2),
        KeyValue::percent("Yield", a.yield_rate),
        KeyValue::number("Price", a.price, 6),
        KeyValue::number("dB/dy", a.price_sensitivity, 6),
        KeyValue::number("Duration", a.duration, 6),
        KeyValue::number("Convexity", a.convexity, 6),
        KeyValue::number("DV01", a.dv01, 6),
        KeyValue::percent("Current Yield", a.current_yield),
    ];
    if let Some(y) = report.bank_discount_yield {
        rows.push(KeyValue::percent("Bank Discount Yield", y));
    }
    if let Some(y) = report.money_market_yield {
        rows.push(KeyValue::percent("Money Market Yield", y));
    }
    rows
}
