//! CSV parsing module for reading bars from CSV files.
//!
//! # Column Detection
//!
//! Columns are matched on their header names (case-insensitive):
//! - `close`, `price`, `adj close`, `adjusted close` → close prices (required)
//! - `open`, `high`, `low` → the other bar prices (default to the close)
//! - `volume`, `vol` → volume (optional)
//!
//! A date column (`date`, `time`, `datetime`, `timestamp`, `dt`) is kept as
//! row labels for the output. When every label is an integer it also
//! becomes the bar timestamp; otherwise bars are numbered `0, 1, 2, ...`.
//! Empty cells are read as NaN.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;
use trade_ta::series::{Bar, PriceSeries};

use crate::error::{CliError, Result};

/// Parsed CSV data with column mapping.
#[derive(Debug, Clone)]
pub struct ParsedCsv {
    /// Column headers from the CSV.
    pub headers: Vec<String>,
    /// Mapping of normalized column name to column index.
    pub column_map: HashMap<String, usize>,
    /// Date column values (if found).
    pub dates: Option<Vec<String>>,
    /// All numeric data columns by index.
    pub columns: HashMap<usize, Vec<f64>>,
    /// Number of rows parsed.
    pub row_count: usize,
}

/// Bars read from a CSV file, with their row labels.
#[derive(Debug, Clone)]
pub struct PriceCsv {
    /// Date column values (if found).
    pub dates: Option<Vec<String>>,
    /// The bars.
    pub series: PriceSeries,
}

impl ParsedCsv {
    /// Get a column by normalized name (e.g., "close", "high").
    pub fn get_column(&self, name: &str) -> Option<&Vec<f64>> {
        self.column_map
            .get(name)
            .and_then(|idx| self.columns.get(idx))
    }

    /// Get close prices, trying multiple common column names.
    pub fn get_close(&self) -> Option<&Vec<f64>> {
        self.get_column("close")
            .or_else(|| self.get_column("price"))
            .or_else(|| self.get_column("adj close"))
            .or_else(|| self.get_column("adjusted close"))
    }

    /// Get volume, trying `volume` then `vol`.
    pub fn get_volume(&self) -> Option<&Vec<f64>> {
        self.get_column("volume").or_else(|| self.get_column("vol"))
    }

    /// Assembles the bars.
    ///
    /// # Errors
    ///
    /// - `CliError::CsvParse` if no close column exists
    /// - `CliError::Indicator` if integer timestamps are not strictly increasing
    pub fn into_price_csv(self) -> Result<PriceCsv> {
        let close = self.get_close().ok_or_else(|| CliError::CsvParse {
            message: "no close price column found (expected 'close', 'price', or 'adj close')"
                .to_string(),
            line: None,
        })?;
        let open = self.get_column("open").unwrap_or(close);
        let high = self.get_column("high").unwrap_or(close);
        let low = self.get_column("low").unwrap_or(close);
        let volume = self.get_volume();
        let timestamps = self.timestamps();

        let bars = (0..self.row_count)
            .map(|i| Bar {
                timestamp: timestamps[i],
                open: open[i],
                high: high[i],
                low: low[i],
                close: close[i],
                volume: volume.map(|v| v[i]),
            })
            .collect();
        let series = PriceSeries::new(bars)?;
        debug!(rows = self.row_count, columns = self.headers.len(), "parsed price csv");

        Ok(PriceCsv {
            dates: self.dates,
            series,
        })
    }

    fn timestamps(&self) -> Vec<u64> {
        let parsed: Option<Vec<u64>> = self.dates.as_ref().and_then(|dates| {
            dates
                .iter()
                .map(|d| d.trim().parse::<u64>().ok())
                .collect()
        });
        parsed.unwrap_or_else(|| (0..self.row_count as u64).collect())
    }
}

/// Normalize a column header name for matching.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Check if a header represents a date column.
fn is_date_column(header: &str) -> bool {
    let normalized = normalize_header(header);
    matches!(
        normalized.as_str(),
        "date" | "time" | "datetime" | "timestamp" | "dt"
    )
}

/// Parse a string value to f64, treating empty as NaN.
fn parse_value(value: &str, line: usize) -> Result<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Ok(f64::NAN)
    } else {
        trimmed.parse::<f64>().map_err(|_| CliError::CsvParse {
            message: format!("cannot parse '{trimmed}' as number"),
            line: Some(line),
        })
    }
}

/// Parse a CSV file into a structured format.
///
/// # Errors
///
/// Returns `CliError::Io` if the file cannot be read, or
/// `CliError::CsvParse` if the CSV is malformed.
pub fn parse_csv<P: AsRef<Path>>(path: P) -> Result<ParsedCsv> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CliError::io_at(e, path.display().to_string()))?;
    parse_csv_from_reader(BufReader::new(file))
}

/// Parse CSV data from a reader.
///
/// # Errors
///
/// Returns `CliError::CsvParse` if the CSV is malformed.
pub fn parse_csv_from_reader<R: Read>(reader: R) -> Result<ParsedCsv> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| CliError::CsvParse {
            message: e.to_string(),
            line: Some(1),
        })?
        .iter()
        .map(String::from)
        .collect();

    if headers.is_empty() {
        return Err(CliError::CsvParse {
            message: "CSV file has no headers".to_string(),
            line: Some(1),
        });
    }

    let mut column_map = HashMap::new();
    let mut date_column_idx: Option<usize> = None;
    for (idx, header) in headers.iter().enumerate() {
        if is_date_column(header) {
            date_column_idx = Some(idx);
        } else {
            column_map.insert(normalize_header(header), idx);
        }
    }

    let mut columns: HashMap<usize, Vec<f64>> =
        column_map.values().map(|&idx| (idx, Vec::new())).collect();
    let mut dates: Vec<String> = Vec::new();

    let mut row_count = 0;
    for (line_idx, result) in csv_reader.records().enumerate() {
        // +2 for the header and 1-based lines
        let line = line_idx + 2;
        let record = result.map_err(|e| CliError::CsvParse {
            message: e.to_string(),
            line: Some(line),
        })?;

        if let Some(date_idx) = date_column_idx {
            dates.push(record.get(date_idx).unwrap_or_default().to_string());
        }

        for (&col_idx, values) in &mut columns {
            values.push(parse_value(record.get(col_idx).unwrap_or(""), line)?);
        }

        row_count += 1;
    }

    Ok(ParsedCsv {
        headers,
        column_map,
        dates: date_column_idx.map(|_| dates),
        columns,
        row_count,
    })
}

/// Parse a CSV file into bars.
///
/// # Errors
///
/// Any error of [`parse_csv`] or [`ParsedCsv::into_price_csv`].
pub fn parse_price_csv<P: AsRef<Path>>(path: P) -> Result<PriceCsv> {
    parse_csv(path)?.into_price_csv()
}
