//! Utility functions for trade-ta.
//!
//! Tolerance-based float comparison for tests and validation, plus the small
//! numeric helpers (decimal rounding, mean) the level engine needs.
//!
//! # Example
//!
//! ```
//! use trade_ta::utils::{approx_eq, round_to, EPSILON};
//!
//! assert!(approx_eq(1.0 / 3.0, 0.333_333_333_333_333, EPSILON));
//! assert!(approx_eq(round_to(12.34567_f64, 3), 12.346, EPSILON));
//! ```

use crate::traits::SeriesElement;

/// Standard epsilon for high-precision floating-point comparisons.
pub const EPSILON: f64 = 1e-10;

/// Looser epsilon for results accumulated over many operations.
pub const LOOSE_EPSILON: f64 = 1e-6;

/// Approximate equality check for floating-point values.
///
/// Returns `true` if `a` and `b` are within `tolerance` of each other,
/// or if both are NaN (for testing convenience).
#[inline]
#[must_use]
pub fn approx_eq<T: SeriesElement>(a: T, b: T, tolerance: T) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() < tolerance
}

/// Rounds `value` to `decimals` places after the point (half away from zero).
///
/// NaN and infinities pass through unchanged.
#[inline]
#[must_use]
pub fn round_to<T: SeriesElement>(value: T, decimals: u32) -> T {
    if !value.is_finite() {
        return value;
    }
    let scale = <T as num_traits::NumCast>::from(10_u32.pow(decimals)).unwrap_or_else(T::one);
    (value * scale).round() / scale
}

/// Arithmetic mean of `values`, or `None` for an empty slice.
#[must_use]
pub fn mean<T: SeriesElement>(values: &[T]) -> Option<T> {
    if values.is_empty() {
        return None;
    }
    let sum = values.iter().fold(T::zero(), |acc, &x| acc + x);
    T::from_usize(values.len()).ok().map(|n| sum / n)
}

/// Counts the NaN values in a slice.
#[inline]
#[must_use]
pub fn count_nans<T: SeriesElement>(data: &[T]) -> usize {
    data.iter().filter(|x| x.is_nan()).count()
}
