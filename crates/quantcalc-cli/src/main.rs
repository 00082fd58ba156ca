//! Quantcalc CLI - option, bond and zero-curve analytics from the shell.
//!
//! # Usage
//!
//! ```bash
//! # Price a bond from a yield (percent), or solve the yield from a price
//! quantcalc bond --maturity 10 --coupon 5 --yield 4.5
//! quantcalc bond --maturity 10 --coupon 5 --price 102.5
//!
//! # Price an option, or solve its implied volatility
//! quantcalc option --spot 100 --strike 100 --maturity 1 --rate 0.05 --volatility 0.2
//! quantcalc option --spot 100 --strike 100 --maturity 1 --rate 0.05 --price 8 --type put
//!
//! # Bootstrap a zero curve
//! quantcalc bootstrap --overnight 0.015 --bond 1,3,2,101.25 --bond 1.5,2,2,99.95
//!
//! # Show the effective configuration
//! quantcalc --config calc.toml config
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use quantcalc_config::CalcConfig;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => CalcConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => CalcConfig::default(),
    };
    tracing::debug!(?config, "effective configuration");

    let format = cli.format;

    match cli.command {
        Commands::Bond(args) => commands::bond::execute(args, &config, format)?,
        Commands::Option(args) => commands::option::execute(args, &config, format)?,
        Commands::Bootstrap(args) => commands::bootstrap::execute(args, &config, format)?,
        Commands::Config(args) => commands::config::execute(args, &config, format)?,
    }

    Ok(())
}

/// Logs go to stderr so that stdout carries only results.
fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
