//! Support and resistance levels from clustered local extrema.
//!
//! The pipeline is:
//!
//! 1. [`find_peaks`] finds local maxima of the series (or of its negation for
//!    supports).
//! 2. [`peak_values`] reads the prices at those indices, rounded to
//!    [`DEFAULT_DECIMALS`] places.
//! 3. [`group_values_nearest`] sorts the values and splits them into runs
//!    whose consecutive gaps are below `closest`.
//! 4. [`confirmed_levels`] keeps the mean of every run with at least
//!    [`MIN_CONFIRMATIONS`] members.
//!
//! # Example
//!
//! ```
//! use trade_ta::indicators::support_resistance::resistances;
//!
//! // Three tops near 110, one near 130
//! let prices = [100.0_f64, 110.0, 100.0, 110.5, 100.0, 109.5, 100.0, 130.0, 100.0];
//! let levels = resistances(&prices, 2.0).unwrap();
//!
//! assert_eq!(levels.len(), 1);
//! assert!((levels[0] - 110.0).abs() < 1e-9);
//! ```

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::traits::SeriesElement;
use crate::utils::{mean, round_to};

/// Default maximum gap between neighbouring values of one cluster.
pub const DEFAULT_CLOSEST: f64 = 2.0;
/// Minimum cluster size for a confirmed level.
pub const MIN_CONFIRMATIONS: usize = 3;
/// Decimal places kept on extracted peak values.
pub const DEFAULT_DECIMALS: u32 = 3;

/// Kind of a price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelKind {
    /// Level below price, built from local minima.
    Support,
    /// Level above price, built from local maxima.
    Resistance,
}

impl LevelKind {
    /// Lowercase name used in CSV output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Support => "support",
            Self::Resistance => "resistance",
        }
    }
}

/// Which extrema to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Local maxima.
    Up,
    /// Local minima.
    Down,
}

/// A confirmed price level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Level<T: SeriesElement> {
    /// Mean of the clustered extrema.
    pub price: T,
    /// Support or resistance.
    pub kind: LevelKind,
}

/// Indices of the local maxima of `data`.
///
/// A sample is a peak when both neighbours are strictly lower. A flat top
/// bounded by lower samples on both sides counts once, at its middle index
/// (rounded down). The first and last samples are never peaks, and NaN
/// never compares as higher or equal.
///
/// ```
/// use trade_ta::indicators::support_resistance::find_peaks;
///
/// assert_eq!(find_peaks(&[0.0_f64, 2.0, 1.0, 3.0, 3.0, 3.0, 0.0]), vec![1, 4]);
/// ```
#[must_use]
pub fn find_peaks<T: SeriesElement>(data: &[T]) -> Vec<usize> {
    let mut peaks = Vec::new();
    if data.len() < 3 {
        return peaks;
    }
    let last = data.len() - 1;
    let mut i = 1;
    while i < last {
        if data[i - 1] < data[i] {
            let mut ahead = i + 1;
            while ahead < last && data[ahead] == data[i] {
                ahead += 1;
            }
            if data[ahead] < data[i] {
                peaks.push((i + ahead - 1) / 2);
                i = ahead;
            }
        }
        i += 1;
    }
    peaks
}

/// Prices at the extrema of `data`, rounded to `decimals` places.
///
/// Values are returned in bar order and keep their original sign for both
/// directions.
#[must_use]
pub fn peak_values<T: SeriesElement>(data: &[T], direction: Direction, decimals: u32) -> Vec<T> {
    let indices = match direction {
        Direction::Up => find_peaks(data),
        Direction::Down => {
            let negated: Vec<T> = data.iter().map(|&x| -x).collect();
            find_peaks(&negated)
        }
    };
    indices
        .into_iter()
        .map(|i| round_to(data[i], decimals))
        .collect()
}

/// Sorts `values` and splits them into maximal runs of near neighbours.
///
/// Two consecutive sorted values belong to the same cluster when their gap
/// is strictly less than `closest`. Every input value lands in exactly one
/// cluster; duplicates are kept. NaN values are dropped.
///
/// ```
/// use trade_ta::indicators::support_resistance::group_values_nearest;
///
/// let clusters = group_values_nearest(&[10.0_f64, 1.0, 3.0, 11.0, 2.0], 2.0).unwrap();
/// assert_eq!(clusters, vec![vec![1.0, 2.0, 3.0], vec![10.0, 11.0]]);
/// ```
///
/// # Errors
///
/// Returns `Error::InvalidParameter` if `closest` is not finite and positive.
pub fn group_values_nearest<T: SeriesElement>(values: &[T], closest: T) -> Result<Vec<Vec<T>>> {
    validate_closest(closest)?;

    let mut sorted: Vec<T> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut clusters: Vec<Vec<T>> = Vec::new();
    let mut current: Vec<T> = Vec::new();
    for value in sorted {
        if let Some(&previous) = current.last() {
            if value - previous >= closest {
                clusters.push(std::mem::take(&mut current));
            }
        }
        current.push(value);
    }
    if !current.is_empty() {
        clusters.push(current);
    }
    Ok(clusters)
}

/// Means of the clusters holding at least `min_size` values.
#[must_use]
pub fn confirmed_levels<T: SeriesElement>(clusters: &[Vec<T>], min_size: usize) -> Vec<T> {
    clusters
        .iter()
        .filter(|cluster| cluster.len() >= min_size)
        .filter_map(|cluster| mean(cluster))
        .collect()
}

fn levels<T: SeriesElement>(data: &[T], direction: Direction, closest: T) -> Result<Vec<T>> {
    validate_closest(closest)?;
    let peaks = peak_values(data, direction, DEFAULT_DECIMALS);
    let clusters = group_values_nearest(&peaks, closest)?;
    let confirmed = confirmed_levels(&clusters, MIN_CONFIRMATIONS);
    debug!(
        len = data.len(),
        ?direction,
        peaks = peaks.len(),
        clusters = clusters.len(),
        levels = confirmed.len(),
        "support_resistance"
    );
    Ok(confirmed)
}

/// Resistance prices of `data`, ascending.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` if `closest` is not finite and positive.
pub fn resistances<T: SeriesElement>(data: &[T], closest: T) -> Result<Vec<T>> {
    levels(data, Direction::Up, closest)
}

/// Support prices of `data`, ascending.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` if `closest` is not finite and positive.
pub fn supports<T: SeriesElement>(data: &[T], closest: T) -> Result<Vec<T>> {
    levels(data, Direction::Down, closest)
}

/// Supports followed by resistances.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` if `closest` is not finite and positive.
pub fn support_resistance<T: SeriesElement>(data: &[T], closest: T) -> Result<Vec<Level<T>>> {
    let mut out: Vec<Level<T>> = supports(data, closest)?
        .into_iter()
        .map(|price| Level {
            price,
            kind: LevelKind::Support,
        })
        .collect();
    out.extend(resistances(data, closest)?.into_iter().map(|price| Level {
        price,
        kind: LevelKind::Resistance,
    }));
    Ok(out)
}

fn validate_closest<T: SeriesElement>(closest: T) -> Result<()> {
    if closest.is_finite() && closest > T::zero() {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name: "closest",
            reason: "grouping distance must be finite and positive",
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]
    use super::*;
    use crate::utils::{approx_eq, EPSILON};

    // ==================== Peak Detection ====================

    #[test]
    fn test_simple_peaks() {
        assert_eq!(find_peaks(&[1.0_f64, 3.0, 1.0, 4.0, 2.0]), vec![1, 3]);
    }

    #[test]
    fn test_edges_are_not_peaks() {
        assert!(find_peaks(&[5.0_f64, 1.0, 5.0]).is_empty());
        assert!(find_peaks(&[1.0_f64, 2.0, 3.0]).is_empty());
    }

    #[test]
    fn test_plateau_middle() {
        assert_eq!(find_peaks(&[0.0_f64, 1.0, 1.0, 0.0]), vec![1]);
        assert_eq!(find_peaks(&[0.0_f64, 1.0, 1.0, 1.0, 0.0]), vec![2]);
    }

    #[test]
    fn test_plateau_running_to_the_edge() {
        assert!(find_peaks(&[0.0_f64, 1.0, 1.0, 1.0]).is_empty());
    }

    #[test]
    fn test_short_inputs() {
        assert!(find_peaks::<f64>(&[]).is_empty());
        assert!(find_peaks(&[1.0_f64, 2.0]).is_empty());
    }

    #[test]
    fn test_nan_never_peaks() {
        assert!(find_peaks(&[0.0_f64, f64::NAN, 0.0]).is_empty());
        assert!(find_peaks(&[f64::NAN, 1.0, 0.0, 2.0, f64::NAN]).is_empty());
    }

    #[test]
    fn test_flat_series_has_no_peaks() {
        assert!(find_peaks(&[3.0_f64; 10]).is_empty());
    }

    #[test]
    fn test_valleys_keep_original_sign() {
        let data = [5.0_f64, 2.0, 5.0, 1.5, 6.0];
        assert_eq!(peak_values(&data, Direction::Down, 3), vec![2.0, 1.5]);
        assert_eq!(peak_values(&data, Direction::Up, 3), vec![5.0]);

        let negative = [-1.0_f64, -3.0, -1.0];
        assert_eq!(peak_values(&negative, Direction::Down, 3), vec![-3.0]);
    }

    #[test]
    fn test_peak_values_rounding() {
        let data = [0.0_f64, 1.234_56, 0.0];
        let values = peak_values(&data, Direction::Up, 3);
        assert!(approx_eq(values[0], 1.235, EPSILON));
    }

    // ==================== Grouping ====================

    #[test]
    fn test_grouping_example() {
        let clusters = group_values_nearest(&[1.0_f64, 2.0, 3.0, 10.0, 11.0], 2.0).unwrap();
        assert_eq!(clusters, vec![vec![1.0, 2.0, 3.0], vec![10.0, 11.0]]);
    }

    #[test]
    fn test_grouping_gap_equal_to_closest_splits() {
        let clusters = group_values_nearest(&[1.0_f64, 3.0], 2.0).unwrap();
        assert_eq!(clusters, vec![vec![1.0], vec![3.0]]);
    }

    #[test]
    fn test_grouping_keeps_duplicates() {
        let clusters = group_values_nearest(&[5.0_f64, 5.0, 5.0], 1.0).unwrap();
        assert_eq!(clusters, vec![vec![5.0, 5.0, 5.0]]);
    }

    #[test]
    fn test_grouping_partitions_input() {
        let values = [9.0_f64, 1.0, 4.0, 4.5, 20.0, 2.5, 21.0];
        let clusters = group_values_nearest(&values, 2.0).unwrap();
        let total: usize = clusters.iter().map(Vec::len).sum();
        assert_eq!(total, values.len());
        for cluster in &clusters {
            for pair in cluster.windows(2) {
                assert!(pair[1] - pair[0] < 2.0);
            }
        }
        for pair in clusters.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(b[0] - a[a.len() - 1] >= 2.0);
        }
    }

    #[test]
    fn test_grouping_empty() {
        assert!(group_values_nearest::<f64>(&[], 2.0).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_closest() {
        for bad in [0.0_f64, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                group_values_nearest(&[1.0_f64], bad),
                Err(Error::InvalidParameter { name: "closest", .. })
            ));
            assert!(resistances(&[1.0_f64, 2.0, 1.0], bad).is_err());
        }
    }

    // ==================== Levels ====================

    #[test]
    fn test_pair_is_not_a_level() {
        let clusters = vec![vec![10.0_f64, 10.5]];
        assert!(confirmed_levels(&clusters, MIN_CONFIRMATIONS).is_empty());
    }

    #[test]
    fn test_level_is_cluster_mean() {
        let clusters = vec![vec![1.0_f64, 2.0, 3.0], vec![10.0, 11.0]];
        assert_eq!(confirmed_levels(&clusters, 3), vec![2.0]);
    }

    #[test]
    fn test_supports() {
        let prices = [100.0_f64, 90.0, 100.0, 91.0, 100.0, 89.0, 100.0, 50.0, 100.0];
        let levels = supports(&prices, 2.0).unwrap();
        assert_eq!(levels.len(), 1);
        assert!(approx_eq(levels[0], 90.0, EPSILON));
    }

    #[test]
    fn test_support_resistance_tags() {
        let prices = [100.0_f64, 110.0, 90.0, 110.5, 90.5, 109.5, 89.5, 105.0];
        let levels = support_resistance(&prices, 2.0).unwrap();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].kind, LevelKind::Support);
        assert!(approx_eq(levels[0].price, 90.0, EPSILON));
        assert_eq!(levels[1].kind, LevelKind::Resistance);
        assert!(approx_eq(levels[1].price, 110.0, EPSILON));
    }

    #[test]
    fn test_monotonic_has_no_levels() {
        let data: Vec<f64> = (0..50).map(|i| i as f64).collect();
        assert!(support_resistance(&data, 2.0).unwrap().is_empty());
    }
}
