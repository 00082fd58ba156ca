//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A `--bond` value or CSV row that does not describe a bond.
    #[error("Invalid bond quote '{quote}': {reason}. Expected maturity,coupon,frequency,price")]
    InvalidQuote {
        /// The rejected text.
        quote: String,
        /// What was wrong.
        reason: String,
    },

    /// Missing required argument.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
