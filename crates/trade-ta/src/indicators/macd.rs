//! Moving Average Convergence Divergence (MACD).
//!
//! All three smoothings use the convolution filter
//! [`conv_ema`](crate::indicators::ema::conv_ema):
//!
//! ```text
//! fast_line   = conv_ema(price, fast_period)      (default 12)
//! slow_line   = conv_ema(price, slow_period)      (default 26)
//! macd_line   = fast_line - slow_line
//! signal_line = conv_ema(macd_line, signal_period) (default 9)
//! histogram   = macd_line - signal_line
//! ```
//!
//! The MACD line is **fast minus slow**: it is positive when the short
//! average is above the long one, as in a rising market.
//!
//! Because of the constant left-edge padding of the filter, every output is
//! defined (no NaN lookback) once the input has at least
//! [`macd_min_len`] samples.
//!
//! # Example
//!
//! ```
//! use trade_ta::indicators::macd::Macd;
//!
//! let data: Vec<f64> = (0..60).map(|i| 100.0 + f64::from(i) * 0.5).collect();
//! let out = Macd::default().compute(&data).unwrap();
//!
//! // Rising prices: the fast average leads, so the MACD line is positive
//! assert!(out.macd_line[59] > 0.0);
//! ```

use tracing::debug;

use crate::error::{Error, Result};
use crate::indicators::crossover::{crossover_signals, Signals};
use crate::indicators::ema::{conv_ema, conv_ema_min_len};
use crate::traits::{validate_period, SeriesElement, ValidatedInput};

/// Default fast window (the "EMA Low" field).
pub const DEFAULT_FAST_PERIOD: usize = 12;
/// Default slow window (the "EMA Fast" field).
pub const DEFAULT_SLOW_PERIOD: usize = 26;
/// Default signal window.
pub const DEFAULT_SIGNAL_PERIOD: usize = 9;
/// Default relative distance of buy/sell markers from the price.
pub const DEFAULT_MARKER_OFFSET: f64 = 0.01;

/// Returns the minimum input length accepted by [`macd`].
///
/// ```
/// use trade_ta::indicators::macd::macd_min_len;
///
/// assert_eq!(macd_min_len(12, 26, 9), 27);
/// ```
#[inline]
#[must_use]
pub const fn macd_min_len(fast_period: usize, slow_period: usize, signal_period: usize) -> usize {
    let mut longest = fast_period;
    if slow_period > longest {
        longest = slow_period;
    }
    if signal_period > longest {
        longest = signal_period;
    }
    conv_ema_min_len(longest)
}

/// All MACD components, each aligned with the input.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdOutput<T: SeriesElement> {
    /// Convolution EMA over the fast window.
    pub fast_line: Vec<T>,
    /// Convolution EMA over the slow window.
    pub slow_line: Vec<T>,
    /// `fast_line - slow_line`.
    pub macd_line: Vec<T>,
    /// Convolution EMA of the MACD line over the signal window.
    pub signal_line: Vec<T>,
    /// `macd_line - signal_line`.
    pub histogram: Vec<T>,
}

impl<T: SeriesElement> MacdOutput<T> {
    /// Returns the length of the output vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.macd_line.len()
    }

    /// Returns true if the output vectors are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.macd_line.is_empty()
    }
}

/// Computes MACD.
///
/// # Errors
///
/// - `Error::InvalidPeriod` if any window is zero
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InsufficientData` if `data` is shorter than [`macd_min_len`]
#[must_use = "this returns a Result with the MACD output, which should be used"]
pub fn macd<T: SeriesElement>(
    data: &[T],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<MacdOutput<T>> {
    validate_macd_inputs(data, fast_period, slow_period, signal_period)?;
    debug!(len = data.len(), fast_period, slow_period, signal_period, "macd");

    let fast_line = conv_ema(data, fast_period)?;
    let slow_line = conv_ema(data, slow_period)?;
    let macd_line: Vec<T> = fast_line
        .iter()
        .zip(&slow_line)
        .map(|(&fast, &slow)| fast - slow)
        .collect();
    let signal_line = conv_ema(&macd_line, signal_period)?;
    let histogram = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(&m, &s)| m - s)
        .collect();

    Ok(MacdOutput {
        fast_line,
        slow_line,
        macd_line,
        signal_line,
        histogram,
    })
}

fn validate_macd_inputs<T: SeriesElement>(
    data: &[T],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<()> {
    for (period, reason) in [
        (fast_period, "fast_period must be at least 1"),
        (slow_period, "slow_period must be at least 1"),
        (signal_period, "signal_period must be at least 1"),
    ] {
        validate_period(period).map_err(|_| Error::InvalidPeriod { period, reason })?;
    }
    data.validate_not_empty()?;
    data.validate_min_length(macd_min_len(fast_period, slow_period, signal_period))
}

/// MACD parameters.
///
/// ```
/// use trade_ta::indicators::macd::Macd;
///
/// let config = Macd::new().fast_period(5).slow_period(10).signal_period(3);
/// assert_eq!(config.min_len(), 11);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
    offset: f64,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast_period: DEFAULT_FAST_PERIOD,
            slow_period: DEFAULT_SLOW_PERIOD,
            signal_period: DEFAULT_SIGNAL_PERIOD,
            offset: DEFAULT_MARKER_OFFSET,
        }
    }
}

impl Macd {
    /// Parameters with the default windows 12/26/9 and a 1% marker offset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fast window.
    #[must_use]
    pub const fn fast_period(mut self, period: usize) -> Self {
        self.fast_period = period;
        self
    }

    /// Sets the slow window.
    #[must_use]
    pub const fn slow_period(mut self, period: usize) -> Self {
        self.slow_period = period;
        self
    }

    /// Sets the signal window.
    #[must_use]
    pub const fn signal_period(mut self, period: usize) -> Self {
        self.signal_period = period;
        self
    }

    /// Sets the relative marker offset.
    #[must_use]
    pub const fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Fast window.
    #[must_use]
    pub const fn get_fast_period(&self) -> usize {
        self.fast_period
    }

    /// Slow window.
    #[must_use]
    pub const fn get_slow_period(&self) -> usize {
        self.slow_period
    }

    /// Signal window.
    #[must_use]
    pub const fn get_signal_period(&self) -> usize {
        self.signal_period
    }

    /// Marker offset.
    #[must_use]
    pub const fn get_offset(&self) -> f64 {
        self.offset
    }

    /// Minimum input length for these windows.
    #[must_use]
    pub const fn min_len(&self) -> usize {
        macd_min_len(self.fast_period, self.slow_period, self.signal_period)
    }

    /// Computes MACD with these parameters.
    ///
    /// # Errors
    ///
    /// See [`macd`].
    pub fn compute<T: SeriesElement>(&self, data: &[T]) -> Result<MacdOutput<T>> {
        macd(data, self.fast_period, self.slow_period, self.signal_period)
    }

    /// Computes MACD and the crossover markers placed on `data`.
    ///
    /// # Errors
    ///
    /// See [`macd`] and [`crossover_signals`].
    pub fn strategy<T: SeriesElement>(&self, data: &[T]) -> Result<MacdStrategy<T>> {
        let output = self.compute(data)?;
        let offset = T::from_f64(self.offset)?;
        let signals = crossover_signals(data, &output.macd_line, &output.signal_line, offset)?;
        Ok(MacdStrategy { output, signals })
    }
}

/// MACD components plus the buy/sell markers derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdStrategy<T: SeriesElement> {
    /// The MACD lines.
    pub output: MacdOutput<T>,
    /// Crossover markers.
    pub signals: Signals<T>,
}
