//! Exponential smoothing filters.
//!
//! Two exponential averages coexist and are **not interchangeable**: MACD is
//! defined on [`conv_ema`], RSI and the moving-average bundles on [`com_ema`].
//!
//! # Convolution EMA
//!
//! A one-sided FIR filter with an exponential kernel of length `w`:
//!
//! ```text
//! weights[i] = exp(-1 + i / (w - 1))        i in [0, w), normalised to sum 1
//! out[n]     = Σ_{k=0}^{min(n, w-1)} weights[k] × x[n-k]
//! out[0..w]  = out[w]                        (constant left-edge padding)
//! ```
//!
//! The kernel grows with the lag `k`, and the first `w` outputs are
//! overwritten by the first output that sees a full kernel, so the input
//! needs at least `w + 1` samples.
//!
//! # Center-of-mass EMA
//!
//! A recursive, bias-adjusted exponential average with decay
//! `α = 1 / (1 + com)`:
//!
//! ```text
//! out[t] = Σ_i (1-α)^i × x[t-i] / Σ_i (1-α)^i        over non-NaN samples
//! ```
//!
//! Normalising by the weight sum keeps early outputs unbiased. NaN samples
//! add nothing but still age older weights; outputs before the first valid
//! sample are NaN.
//!
//! # Example
//!
//! ```
//! use trade_ta::indicators::ema::{com_ema, conv_ema};
//!
//! let data = vec![5.0_f64; 10];
//! let smoothed = conv_ema(&data, 3).unwrap();
//! assert!(smoothed.iter().all(|v| (v - 5.0).abs() < 1e-10));
//!
//! let recursive = com_ema(&[1.0_f64, 2.0, 3.0], 1.0).unwrap();
//! assert!((recursive[0] - 1.0).abs() < 1e-10);
//! ```

use tracing::debug;

use crate::error::{Error, Result};
use crate::traits::{validate_period, SeriesElement, ValidatedInput};

/// Returns the minimum input length accepted by [`conv_ema`].
///
/// ```
/// use trade_ta::indicators::ema::conv_ema_min_len;
///
/// assert_eq!(conv_ema_min_len(12), 13);
/// ```
#[inline]
#[must_use]
pub const fn conv_ema_min_len(window: usize) -> usize {
    window + 1
}

/// Builds the normalised convolution kernel of length `window`.
///
/// `weights[0]` applies to the current sample and is the smallest weight.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `window` is zero.
pub fn conv_ema_weights<T: SeriesElement>(window: usize) -> Result<Vec<T>> {
    validate_period(window)?;
    if window == 1 {
        return Ok(vec![T::one()]);
    }

    let last = T::from_usize(window - 1)?;
    let mut weights = Vec::with_capacity(window);
    for i in 0..window {
        let t = T::from_usize(i)? / last;
        weights.push((t - T::one()).exp());
    }

    let total = weights.iter().fold(T::zero(), |acc, &w| acc + w);
    for w in &mut weights {
        *w = *w / total;
    }
    Ok(weights)
}

/// Computes the convolution exponential average.
///
/// The output has the input length. Indices `0..window` all hold the value at
/// index `window`.
///
/// # Errors
///
/// - `Error::InvalidPeriod` if `window` is zero
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InsufficientData` if `data.len() < window + 1`
///
/// # Example
///
/// ```
/// use trade_ta::indicators::ema::conv_ema;
///
/// let data: Vec<f64> = (0..20).map(f64::from).collect();
/// let out = conv_ema(&data, 4).unwrap();
/// assert_eq!(out.len(), 20);
/// assert_eq!(out[0], out[4]);
/// ```
#[must_use = "this returns a Result with the smoothed values, which should be used"]
pub fn conv_ema<T: SeriesElement>(data: &[T], window: usize) -> Result<Vec<T>> {
    let weights = conv_ema_weights::<T>(window)?;
    data.validate_not_empty()?;
    data.validate_min_length(conv_ema_min_len(window))?;
    debug!(len = data.len(), window, "conv_ema");

    let n = data.len();
    let mut out = vec![T::zero(); n];
    for (i, slot) in out.iter_mut().enumerate().skip(window) {
        // summed as deviations from the current sample so a constant input maps to itself exactly
        let current = data[i];
        let deviation = weights
            .iter()
            .zip(data[..=i].iter().rev())
            .fold(T::zero(), |acc, (&w, &x)| acc + w * (x - current));
        *slot = current + deviation;
    }

    let edge = out[window];
    out[..window].fill(edge);
    Ok(out)
}

/// Computes the center-of-mass exponential average.
///
/// Defined for every index; an empty input gives an empty output.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` if `com` is negative or not finite.
///
/// # Example
///
/// ```
/// use trade_ta::indicators::ema::com_ema;
///
/// // com = 1 => alpha = 0.5; out[1] = (2 + 0.5 × 1) / (1 + 0.5)
/// let out = com_ema(&[1.0_f64, 2.0], 1.0).unwrap();
/// assert!((out[1] - 2.5 / 1.5).abs() < 1e-12);
/// ```
#[must_use = "this returns a Result with the smoothed values, which should be used"]
pub fn com_ema<T: SeriesElement>(data: &[T], com: T) -> Result<Vec<T>> {
    if !com.is_finite() || com < T::zero() {
        return Err(Error::InvalidParameter {
            name: "com",
            reason: "center of mass must be finite and non-negative",
        });
    }
    debug!(len = data.len(), com = com.to_f64_lossy(), "com_ema");

    let alpha = T::one() / (T::one() + com);
    let decay = T::one() - alpha;

    let mut weighted_sum = T::zero();
    let mut weight_total = T::zero();
    let mut out = Vec::with_capacity(data.len());
    for &x in data {
        weighted_sum = weighted_sum * decay;
        weight_total = weight_total * decay;
        if !x.is_nan() {
            weighted_sum = weighted_sum + x;
            weight_total = weight_total + T::one();
        }
        out.push(if weight_total > T::zero() {
            weighted_sum / weight_total
        } else {
            T::nan()
        });
    }
    Ok(out)
}
