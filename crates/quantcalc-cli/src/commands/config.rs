//! Config command implementation.

use anyhow::Result;
use clap::Args;

use quantcalc_config::CalcConfig;

use crate::cli::OutputFormat;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Show the built-in defaults instead of the loaded configuration
    #[arg(long)]
    pub defaults: bool,
}

/// Prints the effective configuration: TOML for tables, JSON otherwise.
pub fn execute(args: ConfigArgs, config: &CalcConfig, format: OutputFormat) -> Result<()> {
    let defaults = CalcConfig::default();
    let shown = if args.defaults { &defaults } else { config };

    match format {
        OutputFormat::Table => print!("{}", shown.to_toml_string()?),
        OutputFormat::Json => println!("{}", shown.to_json_string()?),
    }

    Ok(())
}
