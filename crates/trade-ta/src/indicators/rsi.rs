//! Relative Strength Index (RSI).
//!
//! Gains and losses are smoothed with the center-of-mass filter
//! [`com_ema`](crate::indicators::ema::com_ema), using the window length as
//! the center of mass. This is an approximation of the classical RSI, not
//! Wilder's recursive average, and is the definition used everywhere in this
//! crate.
//!
//! # Formula
//!
//! ```text
//! delta[0] = NaN,  delta[t] = x[t] - x[t-1]
//! gain     = max(delta, 0)
//! loss     = min(delta, 0)
//! avg_gain = com_ema(gain, length)
//! avg_loss = com_ema(loss, length)
//! rs       = avg_gain / |avg_loss|
//! RSI      = 100 - 100 / (1 + rs)
//! ```
//!
//! # Undefined Values
//!
//! The output is `None` on bars where the ratio is undefined: the first bar
//! (no delta yet) and every bar where `avg_loss` is exactly zero, e.g. a flat
//! or strictly rising series. Defined values lie in `[0, 100]`.
//!
//! # Example
//!
//! ```
//! use trade_ta::indicators::rsi::rsi;
//!
//! let prices = [44.0_f64, 44.5, 43.5, 44.5, 44.0, 43.0, 42.5, 43.5];
//! let out = rsi(&prices, 14).unwrap();
//!
//! assert_eq!(out[0], None);
//! assert!(out[1..].iter().flatten().all(|v| (0.0..=100.0).contains(v)));
//! ```

use tracing::debug;

use crate::error::Result;
use crate::indicators::ema::com_ema;
use crate::traits::{validate_period, SeriesElement, ValidatedInput};

/// Default RSI length.
pub const DEFAULT_RSI_LENGTH: usize = 14;
/// Upper guide line.
pub const OVERBOUGHT: f64 = 70.0;
/// Lower guide line.
pub const OVERSOLD: f64 = 30.0;

/// Splits price changes into gains and losses.
///
/// Both vectors have the input length; index 0 is NaN in both. Losses are
/// zero or negative.
#[must_use]
pub fn gains_and_losses<T: SeriesElement>(data: &[T]) -> (Vec<T>, Vec<T>) {
    let mut gains = Vec::with_capacity(data.len());
    let mut losses = Vec::with_capacity(data.len());
    if !data.is_empty() {
        gains.push(T::nan());
        losses.push(T::nan());
    }
    for pair in data.windows(2) {
        let delta = pair[1] - pair[0];
        if delta.is_nan() {
            gains.push(delta);
            losses.push(delta);
        } else {
            gains.push(delta.max(T::zero()));
            losses.push(delta.min(T::zero()));
        }
    }
    (gains, losses)
}

/// Computes the RSI.
///
/// # Errors
///
/// - `Error::InvalidPeriod` if `length` is zero
/// - `Error::EmptyInput` if `data` is empty
#[must_use = "this returns a Result with the RSI values, which should be used"]
pub fn rsi<T: SeriesElement>(data: &[T], length: usize) -> Result<Vec<Option<T>>> {
    validate_period(length)?;
    data.validate_not_empty()?;
    debug!(len = data.len(), length, "rsi");

    let com = T::from_usize(length)?;
    let (gains, losses) = gains_and_losses(data);
    let avg_gain = com_ema(&gains, com)?;
    let avg_loss = com_ema(&losses, com)?;

    let hundred = T::hundred();
    Ok(avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(&gain, &loss)| {
            let loss = loss.abs();
            if gain.is_nan() || loss.is_nan() || loss == T::zero() {
                return None;
            }
            let rs = gain / loss;
            Some(hundred - hundred / (T::one() + rs))
        })
        .collect())
}
