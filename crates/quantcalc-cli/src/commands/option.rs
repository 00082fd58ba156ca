//! Option command implementation.
//!
//! Prices a European option from a volatility or solves the implied
//! volatility from a premium.

use anyhow::Result;
use clap::{ArgGroup, Args, ValueEnum};
use serde::Serialize;

use quantcalc_config::CalcConfig;
use quantcalc_options::{Greeks, OptionType, VanillaOption};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_header, print_json, print_table, KeyValue};

/// Arguments for the option command.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["volatility", "price"])))]
pub struct OptionArgs {
    /// Spot price of the underlying
    #[arg(short, long)]
    pub spot: f64,

    /// Strike price
    #[arg(short = 'k', long)]
    pub strike: f64,

    /// Years to expiry
    #[arg(short, long)]
    pub maturity: f64,

    /// Continuously compounded risk-free rate (decimal, e.g., 0.05)
    #[arg(short, long)]
    pub rate: f64,

    /// Continuous dividend yield (decimal)
    #[arg(short, long, default_value = "0")]
    pub dividend: f64,

    /// Call or put
    #[arg(short = 't', long = "type", value_enum, default_value = "call")]
    pub kind: OptionKind,

    /// Volatility (decimal). Prices the option.
    #[arg(long, visible_alias = "vol")]
    pub volatility: Option<f64>,

    /// Observed premium. Solves the implied volatility.
    #[arg(short, long)]
    pub price: Option<f64>,
}

/// Option direction choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OptionKind {
    /// Right to buy
    #[default]
    Call,
    /// Right to sell
    Put,
}

impl From<OptionKind> for OptionType {
    fn from(kind: OptionKind) -> Self {
        match kind {
            OptionKind::Call => OptionType::Call,
            OptionKind::Put => OptionType::Put,
        }
    }
}

#[derive(Debug, Serialize)]
struct OptionReport {
    option_type: OptionType,
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    dividend: f64,
    volatility: f64,
    premium: f64,
    d1: f64,
    d2: f64,
    greeks: Greeks,
}

impl From<&VanillaOption> for OptionReport {
    fn from(option: &VanillaOption) -> Self {
        Self {
            option_type: option.option_type(),
            spot: option.spot(),
            strike: option.strike(),
            maturity: option.maturity(),
            rate: option.rate(),
            dividend: option.dividend(),
            volatility: option.volatility(),
            premium: option.premium(),
            d1: option.d1(),
            d2: option.d2(),
            greeks: *option.greeks(),
        }
    }
}

/// Execute the option command.
pub fn execute(args: OptionArgs, config: &CalcConfig, format: OutputFormat) -> Result<()> {
    let builder = VanillaOption::builder()
        .spot(args.spot)
        .strike(args.strike)
        .maturity(args.maturity)
        .rate(args.rate)
        .dividend(args.dividend)
        .option_type(args.kind.into())
        .solver(config.volatility_solver()?);

    let builder = match (args.volatility, args.price) {
        (Some(sigma), _) => builder.volatility(sigma),
        (None, Some(price)) => builder.price(price),
        (None, None) => {
            return Err(CliError::MissingArgument("--volatility or --price".into()).into())
        }
    };
    let option = builder.build()?;

    if args.price.is_some() {
        tracing::info!(volatility = option.volatility(), "solved implied volatility");
    }

    let report = OptionReport::from(&option);

    match format {
        OutputFormat::Table => {
            print_header("Option Pricing");
            print_table(&pricing_rows(&report));
            print_header("Greeks");
            print_table(&greek_rows(&report.greeks));
        }
        OutputFormat::Json => print_json(&report)?,
    }

    Ok(())
}

fn pricing_rows(report: &OptionReport) -> Vec<KeyValue> {
    vec![
        KeyValue::new("Type", report.option_type.to_string()),
        KeyValue::number("Spot", report.spot, 4),
        KeyValue::number("Strike", report.strike, 4),
        KeyValue::number("Maturity (years)", report.maturity, 4),
        KeyValue::percent("Rate", report.rate),
        KeyValue::percent("Dividend", report.dividend),
        KeyValue::percent("Volatility", report.volatility),
        KeyValue::number("Premium", report.premium, 6),
        KeyValue::number("d1", report.d1, 6),
        KeyValue::number("d2", report.d2, 6),
    ]
}

fn greek_rows(g: &Greeks) -> Vec<KeyValue> {
    [
        ("Delta", g.delta),
        ("Gamma", g.gamma),
        ("Vega", g.vega),
        ("Theta", g.theta),
        ("Rho", g.rho),
        ("Epsilon", g.epsilon),
        ("Elasticity", g.elasticity),
        ("Vanna", g.vanna),
        ("Charm", g.charm),
        ("Vomma", g.vomma),
        ("Veta", g.veta),
        ("Speed", g.speed),
        ("Zomma", g.zomma),
        ("Color", g.color),
        ("Ultima", g.ultima),
        ("Dual Delta", g.dual_delta),
        ("Dual Gamma", g.dual_gamma),
    ]
    .into_iter()
    .map(|(name, value)| KeyValue::number(name, value, 6))
    .collect()
}
