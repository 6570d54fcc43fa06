//! CLI argument parsing module.
//!
//! The CLI follows the pattern: `trade-ta <indicator> <input.csv> [params] [-o output.csv]`
//!
//! # Examples
//!
//! ```bash
//! # MACD with default windows (12,26,9) and crossover markers
//! trade-ta macd prices.csv
//!
//! # MACD on high prices with custom windows, written to a file
//! trade-ta macd prices.csv 5,13,4 --source high -o macd.csv
//!
//! # RSI over 21 bars
//! trade-ta rsi prices.csv 21
//!
//! # Moving average ribbons
//! trade-ta mma prices.csv
//! trade-ta gmma prices.csv
//!
//! # Support/resistance levels with a clustering distance of 1.5
//! trade-ta sr prices.csv 1.5
//!
//! # Field descriptors of an indicator as JSON
//! trade-ta fields macd
//! ```

use clap::{Parser, Subcommand};
use trade_ta::registry::IndicatorKind;

use crate::error::{CliError, Result};

/// trade-ta: chart indicators computed from CSV price data
#[derive(Parser, Debug)]
#[command(name = "trade-ta")]
#[command(author, version, about = "Chart indicators computed from CSV price data")]
#[command(long_about = "trade-ta computes MACD with crossover markers, RSI, moving \
    average ribbons and support/resistance levels from OHLC CSV files. Results are \
    written as CSV to stdout or to a file.")]
pub struct Args {
    /// The indicator to compute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// MACD with buy/sell markers
    #[command(about = "MACD (Moving Average Convergence Divergence) with crossover markers")]
    Macd {
        /// Input CSV file
        input: String,

        /// Parameters: fast,slow,signal (e.g., 12,26,9)
        #[arg(default_value = "12,26,9")]
        params: String,

        /// Price column the indicator is computed on (open, high, low, close)
        #[arg(short, long)]
        source: Option<String>,

        /// Output CSV file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Relative Strength Index
    #[command(about = "Relative Strength Index (RSI)")]
    Rsi {
        /// Input CSV file
        input: String,

        /// Smoothing length
        #[arg(default_value = "14")]
        length: usize,

        /// Price column the indicator is computed on (open, high, low, close)
        #[arg(short, long)]
        source: Option<String>,

        /// Output CSV file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Multiple moving average ribbon
    #[command(about = "Multiple Moving Average (MMA): six short-term averages")]
    Mma {
        /// Input CSV file
        input: String,

        /// Output CSV file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Guppy multiple moving average
    #[command(about = "Guppy Multiple Moving Average (GMMA): trader and investor ribbons")]
    Gmma {
        /// Input CSV file
        input: String,

        /// Output CSV file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Support and resistance levels
    #[command(about = "Support and resistance levels from clustered extrema")]
    Sr {
        /// Input CSV file
        input: String,

        /// Maximum gap between neighbouring extrema of one level
        #[arg(default_value = "2.0")]
        closest: f64,

        /// Output CSV file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the field descriptors of an indicator as JSON
    #[command(about = "Print the configurable fields of an indicator as JSON")]
    Fields {
        /// Indicator name (macd, rsi, mma, gmma, sr)
        indicator: String,
    },
}

impl Command {
    /// The indicator this command runs.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidArgument` for `fields` with an unknown name.
    pub fn indicator(&self) -> Result<IndicatorKind> {
        match self {
            Self::Macd { .. } => Ok(IndicatorKind::Macd),
            Self::Rsi { .. } => Ok(IndicatorKind::Rsi),
            Self::Mma { .. } => Ok(IndicatorKind::MovingAverage),
            Self::Gmma { .. } => Ok(IndicatorKind::Guppy),
            Self::Sr { .. } => Ok(IndicatorKind::SupportResistance),
            Self::Fields { indicator } => parse_indicator(indicator),
        }
    }

    /// The input file path, if the command reads one.
    pub fn input_path(&self) -> Option<&str> {
        match self {
            Self::Macd { input, .. }
            | Self::Rsi { input, .. }
            | Self::Mma { input, .. }
            | Self::Gmma { input, .. }
            | Self::Sr { input, .. } => Some(input),
            Self::Fields { .. } => None,
        }
    }

    /// The output file path, if specified.
    pub fn output_path(&self) -> Option<&str> {
        match self {
            Self::Macd { output, .. }
            | Self::Rsi { output, .. }
            | Self::Mma { output, .. }
            | Self::Gmma { output, .. }
            | Self::Sr { output, .. } => output.as_deref(),
            Self::Fields { .. } => None,
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Resolves an indicator name.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` listing the known names.
pub fn parse_indicator(name: &str) -> Result<IndicatorKind> {
    name.parse::<IndicatorKind>().map_err(|_| {
        let known: Vec<&str> = IndicatorKind::ALL.iter().map(|k| k.name()).collect();
        CliError::invalid_argument(
            "indicator",
            format!("unknown indicator '{name}'"),
            Some(format!("Use one of: {}", known.join(", "))),
        )
    })
}

/// Parse MACD parameters from string "fast,slow,signal".
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` unless the string holds three positive
/// integers with `fast < slow`.
pub fn parse_macd_params(params: &str) -> Result<(usize, usize, usize)> {
    let parts: Vec<&str> = params.split(',').collect();
    if parts.len() != 3 {
        return Err(CliError::invalid_argument(
            "params",
            format!("MACD requires 3 parameters, got {}", parts.len()),
            Some("Use format: fast,slow,signal (e.g., 12,26,9)".to_string()),
        ));
    }

    let fast = parse_period(parts[0], "fast_period", 12)?;
    let slow = parse_period(parts[1], "slow_period", 26)?;
    let signal = parse_period(parts[2], "signal_period", 9)?;

    if fast >= slow {
        return Err(CliError::invalid_argument(
            "params",
            "fast period must be less than slow period",
            Some("Use fast < slow (e.g., 12,26,9)".to_string()),
        ));
    }

    Ok((fast, slow, signal))
}

fn parse_period(raw: &str, argument: &str, example: usize) -> Result<usize> {
    let period = raw.trim().parse::<usize>().map_err(|_| {
        CliError::invalid_argument(
            argument,
            format!("cannot parse '{raw}' as integer"),
            Some(format!("Use a positive integer like {example}")),
        )
    })?;
    validate_period(period, argument, example)
}

/// Checks a smoothing window given on the command line.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` if `period` is zero.
pub fn validate_period(period: usize, argument: &str, example: usize) -> Result<usize> {
    if period == 0 {
        Err(CliError::invalid_argument(
            argument,
            "period must be positive",
            Some(format!("Use a positive integer like {example}")),
        ))
    } else {
        Ok(period)
    }
}

/// Checks the support/resistance clustering distance.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` unless `closest` is finite and positive.
pub fn validate_closest(closest: f64) -> Result<f64> {
    if closest.is_finite() && closest > 0.0 {
        Ok(closest)
    } else {
        Err(CliError::invalid_argument(
            "closest",
            format!("{closest} is not a positive distance"),
            Some("Use a positive number like 2.0".to_string()),
        ))
    }
}
