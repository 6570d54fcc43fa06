//! trade-ta CLI library
//!
//! This module exposes the CLI components for testing and reuse. [`run`]
//! executes one parsed command: read the bars, configure the indicator's
//! fields from the arguments, draw it on a [`Canvas`], and write what it drew.

pub mod args;
pub mod csv_parser;
pub mod csv_writer;
pub mod error;

pub use error::{CliError, Result};

use std::io::Write;

use tracing::{debug, info};
use trade_ta::render::Canvas;
use trade_ta::series::PriceSource;
use trade_ta::Indicator;

use crate::args::{parse_macd_params, validate_closest, validate_period, Args, Command};
use crate::csv_parser::parse_price_csv;
use crate::csv_writer::{write_fields, write_levels, write_series, OutputDest};

/// Runs `args`, writing to stdout or the `-o` file.
///
/// # Errors
///
/// Any error from reading input, configuring or computing the indicator, or
/// writing output.
pub fn run(args: &Args) -> Result<()> {
    let dest = OutputDest::from_arg(args.command.output_path());
    let mut writer = dest.writer()?;
    execute(&args.command, &mut writer)
}

/// Runs `command`, writing its result to `writer`.
///
/// # Errors
///
/// Any error from reading input, configuring or computing the indicator, or
/// writing output.
pub fn execute<W: Write>(command: &Command, writer: &mut W) -> Result<()> {
    let kind = command.indicator()?;
    let mut indicator = kind.build()?;
    configure(indicator.as_mut(), command)?;

    let Some(path) = command.input_path() else {
        return write_fields(&indicator.fields().describe(), writer);
    };

    let csv = parse_price_csv(path)?;
    info!(indicator = %kind, bars = csv.series.len(), path, "computing");

    let mut canvas = Canvas::new();
    indicator.create(&mut canvas, &csv.series)?;
    debug!(outputs = canvas.len(), "indicator drawn");

    if matches!(command, Command::Sr { .. }) {
        let levels: Vec<_> = canvas.levels().collect();
        write_levels(&levels, writer)
    } else {
        let series: Vec<_> = canvas.all_series().collect();
        write_series(&series, csv.dates.as_deref(), writer)
    }
}

/// Maps command-line parameters onto the indicator's fields.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` for out-of-range parameters or an
/// unknown price source.
pub fn configure(indicator: &mut dyn Indicator, command: &Command) -> Result<()> {
    let fields = indicator.fields_mut();
    match command {
        Command::Macd { params, source, .. } => {
            let (fast, slow, signal) = parse_macd_params(params)?;
            fields.numeric_mut("EMA Low")?.set_value(fast as f64);
            fields.numeric_mut("EMA Fast")?.set_value(slow as f64);
            fields.numeric_mut("EMA")?.set_value(signal as f64);
            select_source(indicator, source.as_deref())
        }
        Command::Rsi { length, source, .. } => {
            let length = validate_period(*length, "length", 14)?;
            fields.numeric_mut("RSI")?.set_value(length as f64);
            select_source(indicator, source.as_deref())
        }
        Command::Sr { closest, .. } => {
            let closest = validate_closest(*closest)?;
            fields.numeric_mut("Closest")?.set_value(closest);
            Ok(())
        }
        Command::Mma { .. } | Command::Gmma { .. } | Command::Fields { .. } => Ok(()),
    }
}

fn select_source(indicator: &mut dyn Indicator, source: Option<&str>) -> Result<()> {
    let Some(raw) = source else {
        return Ok(());
    };
    let suggestion = || {
        let names: Vec<&str> = PriceSource::ALL.iter().map(|s| s.name()).collect();
        Some(format!("Use one of: {}", names.join(", ")))
    };
    let source: PriceSource = raw.parse().map_err(|_| {
        CliError::invalid_argument("source", format!("unknown price column '{raw}'"), suggestion())
    })?;
    let input = indicator.fields_mut().choice_mut(trade_ta::addons::INPUT_FIELD)?;
    if input.set_choice(source.name()) {
        Ok(())
    } else {
        Err(CliError::invalid_argument(
            "source",
            format!("'{raw}' is not offered by this indicator"),
            suggestion(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use trade_ta::registry::IndicatorKind;

    fn command(argv: &[&str]) -> Command {
        Args::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn test_configure_macd_windows_and_source() {
        let cmd = command(&["trade-ta", "macd", "a.csv", "5,13,4", "-s", "low"]);
        let mut macd = IndicatorKind::Macd.build().unwrap();
        configure(macd.as_mut(), &cmd).unwrap();

        let fields = macd.fields();
        assert_eq!(fields.period("EMA Low").unwrap(), 5);
        assert_eq!(fields.period("EMA Fast").unwrap(), 13);
        assert_eq!(fields.period("EMA").unwrap(), 4);
        assert_eq!(fields.choice("Input").unwrap().current(), "Low");
    }

    #[test]
    fn test_configure_rsi_length() {
        let cmd = command(&["trade-ta", "rsi", "a.csv", "7"]);
        let mut rsi = IndicatorKind::Rsi.build().unwrap();
        configure(rsi.as_mut(), &cmd).unwrap();
        assert_eq!(rsi.fields().period("RSI").unwrap(), 7);
        assert_eq!(rsi.fields().choice("Input").unwrap().current(), "Close");
    }

    #[test]
    fn test_configure_rejects_zero_length() {
        let cmd = command(&["trade-ta", "rsi", "a.csv", "0"]);
        let mut rsi = IndicatorKind::Rsi.build().unwrap();
        let err = configure(rsi.as_mut(), &cmd).unwrap_err();
        assert!(matches!(
            err,
            CliError::InvalidArgument { ref argument, .. } if argument == "length"
        ));
    }

    #[test]
    fn test_configure_rejects_unknown_source() {
        let cmd = command(&["trade-ta", "rsi", "a.csv", "--source", "volume"]);
        let mut rsi = IndicatorKind::Rsi.build().unwrap();
        let err = configure(rsi.as_mut(), &cmd).unwrap_err();
        let display = err.to_string();
        assert!(display.contains("unknown price column 'volume'"));
        assert!(display.contains("Open, Close, High, Low"));
    }

    #[test]
    fn test_configure_sr_closest() {
        let cmd = command(&["trade-ta", "sr", "a.csv", "0.5"]);
        let mut sr = IndicatorKind::SupportResistance.build().unwrap();
        configure(sr.as_mut(), &cmd).unwrap();
        assert_eq!(sr.fields().numeric("Closest").unwrap().value(), Some(0.5));
    }

    #[test]
    fn test_execute_fields_prints_json() {
        let cmd = command(&["trade-ta", "fields", "sr"]);
        let mut out = Vec::new();
        execute(&cmd, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json[0]["attribute_name"], "Closest");
        assert_eq!(json[0]["current"], 2.0);
    }

    #[test]
    fn test_execute_unknown_indicator() {
        let cmd = command(&["trade-ta", "fields", "vwap"]);
        let mut out = Vec::new();
        assert!(matches!(
            execute(&cmd, &mut out),
            Err(CliError::InvalidArgument { .. })
        ));
    }
}
