//! Shared test utilities for trade-ta tests.

use trade_ta::series::{Bar, PriceSeries};

/// Approximate equality check for floating-point values.
///
/// Two NaN values are considered equal for testing purposes.
#[allow(dead_code)]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() < eps
}

/// Standard epsilon for high-precision comparisons.
#[allow(dead_code)]
pub const EPSILON: f64 = 1e-10;

/// Looser epsilon for comparisons involving accumulated floating-point operations.
#[allow(dead_code)]
pub const LOOSE_EPSILON: f64 = 1e-6;

/// A series of `n` bars all closing at `price`.
#[allow(dead_code)]
pub fn flat_series(n: usize, price: f64) -> PriceSeries {
    PriceSeries::from_closes(&vec![price; n])
}

/// A series whose close rises by `step` each bar, starting at `start`.
#[allow(dead_code)]
pub fn rising_series(n: usize, start: f64, step: f64) -> PriceSeries {
    let closes: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
    PriceSeries::from_closes(&closes)
}

/// Deterministic OHLC bars oscillating around 100 with a slow drift.
#[allow(dead_code)]
pub fn wave_series(n: usize) -> PriceSeries {
    let bars = (0..n)
        .map(|i| {
            let t = i as f64;
            let close = 100.0 + (t * 0.21).sin() * 7.0 + (t * 0.05).cos() * 3.0 + t * 0.02;
            let open = close - (t * 0.7).sin();
            let high = open.max(close) + 0.8;
            let low = open.min(close) - 0.8;
            Bar::new(1_600_000_000 + 86_400 * i as u64, open, high, low, close)
        })
        .collect();
    PriceSeries::new(bars).unwrap()
}

/// Unwraps an optional series, treating `None` as NaN.
#[allow(dead_code)]
pub fn densify(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().map(|v| v.unwrap_or(f64::NAN)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(1.0, 1.0 + 1e-12, EPSILON));
        assert!(approx_eq(f64::NAN, f64::NAN, EPSILON));
        assert!(!approx_eq(1.0, f64::NAN, EPSILON));
    }

    #[test]
    fn test_generators() {
        assert_eq!(flat_series(14, 10.0).len(), 14);
        assert_eq!(rising_series(3, 1.0, 2.0).closes(), vec![1.0, 3.0, 5.0]);
        assert_eq!(wave_series(50).len(), 50);
    }
}
