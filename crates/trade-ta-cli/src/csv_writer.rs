//! Output module for writing indicator results.
//!
//! # Output Format
//!
//! - Series outputs are written as one CSV column per series, in the order
//!   the indicator drew them, with one row per input bar. Undefined values
//!   (RSI without losses, bars without a marker) are empty cells.
//! - Levels are written as `kind,price` rows, supports first.
//! - Field descriptors are written as pretty-printed JSON.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use trade_ta::fields::FieldDescriptor;
use trade_ta::render::{LevelOutput, SeriesOutput};

use crate::error::{CliError, Result};

/// Output destination: either stdout or a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDest {
    /// Write to stdout.
    Stdout,
    /// Write to a file at the given path.
    File(String),
}

impl OutputDest {
    /// `-o` value to destination.
    pub fn from_arg(path: Option<&str>) -> Self {
        path.map_or(Self::Stdout, |p| Self::File(p.to_string()))
    }

    /// Create a writer for this output destination.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Io` with the path if the file cannot be created.
    pub fn writer(&self) -> Result<Box<dyn Write>> {
        match self {
            Self::Stdout => Ok(Box::new(io::stdout().lock())),
            Self::File(path) => {
                let file = File::create(path).map_err(|e| CliError::io_at(e, path.clone()))?;
                Ok(Box::new(BufWriter::new(file)))
            }
        }
    }
}

/// Writes aligned series as CSV columns.
///
/// Rows run over the longest series; a column shorter than that is padded
/// with empty cells.
///
/// # Errors
///
/// Returns `CliError::Io` if writing fails.
pub fn write_series<W: Write>(
    series: &[&SeriesOutput],
    dates: Option<&[String]>,
    writer: &mut W,
) -> Result<()> {
    if series.is_empty() {
        return Ok(());
    }

    let mut header: Vec<&str> = Vec::with_capacity(series.len() + 1);
    if dates.is_some() {
        header.push("date");
    }
    header.extend(series.iter().map(|s| s.name.as_str()));
    writeln!(writer, "{}", header.join(","))?;

    let rows = series.iter().map(|s| s.values.len()).max().unwrap_or(0);
    for i in 0..rows {
        let mut cells: Vec<String> = Vec::with_capacity(header.len());
        if let Some(dates) = dates {
            cells.push(dates.get(i).cloned().unwrap_or_default());
        }
        for s in series {
            cells.push(format_cell(s.values.get(i).copied().flatten()));
        }
        writeln!(writer, "{}", cells.join(","))?;
    }

    writer.flush()?;
    Ok(())
}

fn format_cell(value: Option<f64>) -> String {
    match value {
        Some(v) if !v.is_nan() => v.to_string(),
        _ => String::new(),
    }
}

/// Writes levels as `kind,price` rows.
///
/// # Errors
///
/// Returns `CliError::Io` if writing fails.
pub fn write_levels<W: Write>(levels: &[&LevelOutput], writer: &mut W) -> Result<()> {
    writeln!(writer, "kind,price")?;
    for level in levels {
        writeln!(writer, "{},{}", level.kind.name(), level.price)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes field descriptors as JSON.
///
/// # Errors
///
/// Returns `CliError::Serialization` or `CliError::Io` if writing fails.
pub fn write_fields<W: Write>(fields: &[FieldDescriptor], writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, fields)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
