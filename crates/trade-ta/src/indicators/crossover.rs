//! Edge-triggered crossover markers.
//!
//! Walks a line and its reference (typically the MACD line and its signal
//! line) bar by bar, tracking which side the line was last seen on:
//!
//! | condition   | previous position | buy marker          | sell marker         | new position |
//! |-------------|-------------------|---------------------|---------------------|--------------|
//! | line above  | not `Long`        | `price × (1 + off)` | -                   | `Long`       |
//! | line above  | `Long`            | -                   | -                   | `Long`       |
//! | line below  | not `Short`       | -                   | `price × (1 - off)` | `Short`      |
//! | line below  | `Short`           | -                   | -                   | `Short`      |
//! | otherwise   | any               | -                   | -                   | unchanged    |
//!
//! "Otherwise" covers NaN on either side and a gap within [`tolerance`] of
//! zero. A bar therefore never carries both markers, and buys and sells
//! strictly alternate.
//!
//! The band matters in steady state: on a linear ramp the MACD and signal
//! lines converge to the same value, and the rounding left in `fast - slow`
//! must not read as a crossing.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::traits::{validate_same_length, SeriesElement};

/// Which side of the reference the line was last seen on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// No crossing seen yet.
    #[default]
    Flat,
    /// Line above the reference.
    Long,
    /// Line below the reference.
    Short,
}

/// Marker direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    /// Line crossed above the reference.
    Buy,
    /// Line crossed below the reference.
    Sell,
}

/// Buy and sell marker series aligned with the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Signals<T: SeriesElement> {
    /// Marker price on bars where a buy fired.
    pub buy: Vec<Option<T>>,
    /// Marker price on bars where a sell fired.
    pub sell: Vec<Option<T>>,
}

impl<T: SeriesElement> Signals<T> {
    /// Number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buy.len()
    }

    /// True for an empty input.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buy.is_empty()
    }

    /// Number of buy markers.
    #[must_use]
    pub fn buy_count(&self) -> usize {
        self.buy.iter().flatten().count()
    }

    /// Number of sell markers.
    #[must_use]
    pub fn sell_count(&self) -> usize {
        self.sell.iter().flatten().count()
    }

    /// Markers in bar order as `(index, kind, price)`.
    #[must_use]
    pub fn events(&self) -> Vec<(usize, SignalKind, T)> {
        self.buy
            .iter()
            .zip(&self.sell)
            .enumerate()
            .filter_map(|(i, (buy, sell))| match (buy, sell) {
                (Some(p), _) => Some((i, SignalKind::Buy, *p)),
                (None, Some(p)) => Some((i, SignalKind::Sell, *p)),
                (None, None) => None,
            })
            .collect()
    }
}

/// Half-width of the band around `reference` treated as "no side".
///
/// `sqrt(epsilon)` relative to the smaller magnitude, and absolute below 1.
#[inline]
#[must_use]
pub fn tolerance<T: SeriesElement>(line: T, reference: T) -> T {
    T::epsilon().sqrt() * T::one().max(line.abs().min(reference.abs()))
}

/// Generates crossover markers.
///
/// `prices`, `line` and `reference` must have the same length. Buy markers
/// sit `offset` above the price, sell markers `offset` below it.
///
/// # Errors
///
/// - `Error::LengthMismatch` if the inputs are not aligned
/// - `Error::InvalidParameter` if `offset` is negative or not finite
///
/// # Example
///
/// ```
/// use trade_ta::indicators::crossover::crossover_signals;
///
/// let prices = [10.0_f64, 10.0, 10.0, 10.0];
/// let line = [1.0, 2.0, -1.0, -2.0];
/// let reference = [0.0; 4];
/// let signals = crossover_signals(&prices, &line, &reference, 0.01).unwrap();
///
/// assert!((signals.buy[0].unwrap() - 10.1).abs() < 1e-12);
/// assert!((signals.sell[2].unwrap() - 9.9).abs() < 1e-12);
/// assert_eq!(signals.buy_count() + signals.sell_count(), 2);
/// ```
pub fn crossover_signals<T: SeriesElement>(
    prices: &[T],
    line: &[T],
    reference: &[T],
    offset: T,
) -> Result<Signals<T>> {
    validate_same_length(prices.len(), line.len())?;
    validate_same_length(prices.len(), reference.len())?;
    if !offset.is_finite() || offset < T::zero() {
        return Err(Error::InvalidParameter {
            name: "offset",
            reason: "marker offset must be finite and non-negative",
        });
    }

    let up = T::one() + offset;
    let down = T::one() - offset;
    let n = prices.len();
    let mut buy = Vec::with_capacity(n);
    let mut sell = Vec::with_capacity(n);
    let mut position = Position::Flat;

    for ((&price, &l), &r) in prices.iter().zip(line).zip(reference) {
        let gap = l - r;
        let band = tolerance(l, r);
        if gap > band {
            sell.push(None);
            if position == Position::Long {
                buy.push(None);
            } else {
                buy.push(Some(price * up));
                position = Position::Long;
            }
        } else if gap < -band {
            buy.push(None);
            if position == Position::Short {
                sell.push(None);
            } else {
                sell.push(Some(price * down));
                position = Position::Short;
            }
        } else {
            buy.push(None);
            sell.push(None);
        }
    }

    Ok(Signals { buy, sell })
}
