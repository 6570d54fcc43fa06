//! Price series input.
//!
//! A [`PriceSeries`] is the immutable input of every indicator: chronologically
//! ordered OHLC bars with strictly increasing timestamps.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Bar open timestamp (seconds since the epoch, or any monotonic sequence number).
pub type Timestamp = u64;

/// One OHLC bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Bar open timestamp.
    pub timestamp: Timestamp,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume, when the data source provides it.
    pub volume: Option<f64>,
}

impl Bar {
    /// Creates a bar without volume.
    #[must_use]
    pub const fn new(timestamp: Timestamp, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    /// Returns the price selected by `source`.
    #[inline]
    #[must_use]
    pub const fn price(&self, source: PriceSource) -> f64 {
        match source {
            PriceSource::Open => self.open,
            PriceSource::High => self.high,
            PriceSource::Low => self.low,
            PriceSource::Close => self.close,
        }
    }
}

/// Which bar price an indicator is computed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PriceSource {
    /// Opening price.
    Open,
    /// Closing price.
    #[default]
    Close,
    /// Highest price.
    High,
    /// Lowest price.
    Low,
}

impl PriceSource {
    /// All sources, in the order offered by "Input" choice fields.
    pub const ALL: [Self; 4] = [Self::Open, Self::Close, Self::High, Self::Low];

    /// Display name, also used as the choice value.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Close => "Close",
            Self::High => "High",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PriceSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|source| source.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Configuration {
                message: format!("unknown price source '{s}'"),
            })
    }
}

/// Chronologically ordered bars.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Creates a series, checking that timestamps strictly increase.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnorderedTimestamps` with the index of the first bar
    /// whose timestamp is not after its predecessor.
    pub fn new(bars: Vec<Bar>) -> Result<Self> {
        if let Some(index) = bars
            .windows(2)
            .position(|pair| pair[1].timestamp <= pair[0].timestamp)
        {
            return Err(Error::UnorderedTimestamps { index: index + 1 });
        }
        Ok(Self { bars })
    }

    /// Builds a series from close prices only, with timestamps `0, 1, 2, ...`
    /// and open/high/low equal to the close.
    #[must_use]
    pub fn from_closes(closes: &[f64]) -> Self {
        let bars = closes
            .iter()
            .zip(0..)
            .map(|(&c, ts)| Bar::new(ts, c, c, c, c))
            .collect();
        Self { bars }
    }

    /// Number of bars.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// True if the series has no bars.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// The bars, oldest first.
    #[inline]
    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Bar timestamps, oldest first.
    #[must_use]
    pub fn timestamps(&self) -> Vec<Timestamp> {
        self.bars.iter().map(|b| b.timestamp).collect()
    }

    /// Extracts one price column.
    #[must_use]
    pub fn column(&self, source: PriceSource) -> Vec<f64> {
        self.bars.iter().map(|b| b.price(source)).collect()
    }

    /// Close prices.
    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.column(PriceSource::Close)
    }
}
