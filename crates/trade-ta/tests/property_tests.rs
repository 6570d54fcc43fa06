//! Property-based tests for the engines using proptest.
//!
//! These tests verify invariant properties that must hold for all valid inputs,
//! using randomly generated test data to find edge cases.

use proptest::prelude::*;

use trade_ta::indicators::{
    crossover::crossover_signals,
    ema::{com_ema, conv_ema, conv_ema_weights},
    macd::{macd, Macd},
    rsi::rsi,
    support_resistance::{find_peaks, group_values_nearest, support_resistance, LevelKind},
};

// ==================== Test Data Generators ====================

/// Generate a random price series (all positive values)
fn arb_price_series(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0..1000.0_f64, min_len..=max_len)
}

/// Generate a random walk, closer to real prices than independent samples
fn arb_random_walk(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    (100.0..500.0_f64, prop::collection::vec(-2.0..2.0_f64, min_len..=max_len)).prop_map(
        |(start, steps)| {
            let mut price = start;
            steps
                .into_iter()
                .map(|step| {
                    price = (price + step).max(1.0);
                    price
                })
                .collect()
        },
    )
}

// ==================== Convolution EMA Properties ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Output length equals input length
    #[test]
    fn prop_conv_ema_output_length(data in arb_price_series(30, 200), window in 1usize..=29) {
        let out = conv_ema(&data, window).unwrap();
        prop_assert_eq!(out.len(), data.len());
    }

    /// The first `window` outputs all equal the output at `window`
    #[test]
    fn prop_conv_ema_left_edge(data in arb_price_series(30, 200), window in 1usize..=29) {
        let out = conv_ema(&data, window).unwrap();
        for i in 0..window {
            prop_assert_eq!(out[i], out[window]);
        }
    }

    /// Constant input maps to itself exactly
    #[test]
    fn prop_conv_ema_constant(value in 1.0..1000.0_f64, len in 10usize..100, window in 1usize..=9) {
        let data = vec![value; len];
        let out = conv_ema(&data, window).unwrap();
        prop_assert!(out.iter().all(|&v| v == value));
    }

    /// A convex combination stays within the range of its inputs
    #[test]
    fn prop_conv_ema_bounded(data in arb_price_series(30, 200), window in 1usize..=29) {
        let out = conv_ema(&data, window).unwrap();
        let min = data.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        for v in out {
            prop_assert!(v >= min - 1e-9 && v <= max + 1e-9);
        }
    }

    /// Kernel weights are positive and sum to one for every window
    #[test]
    fn prop_conv_ema_weights_normalised(window in 1usize..=200) {
        let weights = conv_ema_weights::<f64>(window).unwrap();
        prop_assert_eq!(weights.len(), window);
        prop_assert!(weights.iter().all(|&w| w > 0.0));
        let total: f64 = weights.iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-12);
    }

    /// Inputs shorter than window + 1 are always rejected
    #[test]
    fn prop_conv_ema_short_input_rejected(window in 2usize..=50) {
        let data = vec![1.0_f64; window];
        prop_assert!(conv_ema(&data, window).is_err());
    }
}

// ==================== Center-of-Mass EMA Properties ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Output stays within the running range of the input
    #[test]
    fn prop_com_ema_bounded(data in arb_price_series(1, 200), com in 0.0..100.0_f64) {
        let out = com_ema(&data, com).unwrap();
        prop_assert_eq!(out.len(), data.len());
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for (x, v) in data.iter().zip(&out) {
            min = min.min(*x);
            max = max.max(*x);
            prop_assert!(*v >= min - 1e-9 && *v <= max + 1e-9);
        }
    }

    /// The first output is the first sample
    #[test]
    fn prop_com_ema_first_value(data in arb_price_series(1, 50), com in 0.0..100.0_f64) {
        let out = com_ema(&data, com).unwrap();
        prop_assert!((out[0] - data[0]).abs() < 1e-12);
    }
}

// ==================== MACD Properties ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Histogram equals MACD line minus signal line at every index
    #[test]
    fn prop_macd_histogram_identity(
        data in arb_random_walk(60, 300),
        fast in 2usize..=15,
        extra in 1usize..=20,
        signal in 2usize..=12,
    ) {
        let slow = fast + extra;
        let out = macd(&data, fast, slow, signal).unwrap();
        for t in 0..data.len() {
            prop_assert_eq!(out.histogram[t], out.macd_line[t] - out.signal_line[t]);
            prop_assert_eq!(out.macd_line[t], out.fast_line[t] - out.slow_line[t]);
        }
    }

    /// A linear rise gives one buy and no sell, whatever the start and step
    #[test]
    fn prop_rising_ramp_single_buy(start in 1.0..1000.0_f64, step in 0.01..10.0_f64) {
        let data: Vec<f64> = (0..40).map(|i| start + step * i as f64).collect();
        let signals = Macd::default().strategy(&data).unwrap().signals;
        prop_assert_eq!(signals.buy_count(), 1);
        prop_assert_eq!(signals.sell_count(), 0);
    }

    /// Crossover markers never coincide and strictly alternate
    #[test]
    fn prop_markers_alternate(data in arb_random_walk(60, 300), offset in 0.0..0.1_f64) {
        let out = macd(&data, 12, 26, 9).unwrap();
        let signals = crossover_signals(&data, &out.macd_line, &out.signal_line, offset).unwrap();
        prop_assert_eq!(signals.len(), data.len());

        let mut last = None;
        for (i, (buy, sell)) in signals.buy.iter().zip(&signals.sell).enumerate() {
            prop_assert!(buy.is_none() || sell.is_none());
            if let Some(p) = buy {
                prop_assert!(last != Some(true));
                prop_assert!((p - data[i] * (1.0 + offset)).abs() < 1e-9);
                last = Some(true);
            }
            if let Some(p) = sell {
                prop_assert!(last != Some(false));
                prop_assert!((p - data[i] * (1.0 - offset)).abs() < 1e-9);
                last = Some(false);
            }
        }
    }
}

// ==================== RSI Properties ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// RSI lies in [0, 100] wherever it is defined, and bar 0 is undefined
    #[test]
    fn prop_rsi_bounded(data in arb_price_series(1, 200), length in 1usize..=30) {
        let out = rsi(&data, length).unwrap();
        prop_assert_eq!(out.len(), data.len());
        prop_assert!(out[0].is_none());
        for v in out.into_iter().flatten() {
            prop_assert!((0.0..=100.0).contains(&v));
        }
    }

    /// A series that never falls has no defined RSI
    #[test]
    fn prop_rsi_undefined_without_losses(
        start in 1.0..100.0_f64,
        steps in prop::collection::vec(0.0..5.0_f64, 1..100),
        length in 1usize..=30,
    ) {
        let mut price = start;
        let mut data = vec![price];
        for step in steps {
            price += step;
            data.push(price);
        }
        let out = rsi(&data, length).unwrap();
        prop_assert!(out.iter().all(Option::is_none));
    }
}

// ==================== Support/Resistance Properties ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Every peak is an interior sample no lower than either neighbour
    #[test]
    fn prop_peaks_are_interior_maxima(data in prop::collection::vec(0.0..10.0_f64, 0..100)) {
        let peaks = find_peaks(&data);
        for w in peaks.windows(2) {
            prop_assert!(w[0] < w[1]);
        }
        for &p in &peaks {
            prop_assert!(p > 0 && p + 1 < data.len());
            prop_assert!(data[p - 1] <= data[p]);
            prop_assert!(data[p + 1] <= data[p]);
            prop_assert!(data[p - 1] < data[p] || data[p + 1] == data[p]);
        }
    }

    /// Grouping partitions the input into runs with small internal gaps
    #[test]
    fn prop_grouping_partitions(
        values in prop::collection::vec(0.0..100.0_f64, 0..60),
        closest in 0.1..10.0_f64,
    ) {
        let clusters = group_values_nearest(&values, closest).unwrap();
        let mut flat: Vec<f64> = clusters.iter().flatten().copied().collect();
        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        flat.sort_by(|a, b| a.partial_cmp(b).unwrap());
        prop_assert_eq!(flat, sorted);

        for cluster in &clusters {
            prop_assert!(!cluster.is_empty());
            for pair in cluster.windows(2) {
                prop_assert!(pair[1] - pair[0] < closest);
            }
        }
        for pair in clusters.windows(2) {
            let gap = pair[1][0] - pair[0][pair[0].len() - 1];
            prop_assert!(gap >= closest);
        }
    }

    /// Levels lie inside the price range and supports come first
    #[test]
    fn prop_levels_within_range(data in arb_random_walk(10, 300), closest in 0.5..5.0_f64) {
        let levels = support_resistance(&data, closest).unwrap();
        let min = data.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mut seen_resistance = false;
        for level in levels {
            prop_assert!(level.price >= min - 1e-3 && level.price <= max + 1e-3);
            match level.kind {
                LevelKind::Support => prop_assert!(!seen_resistance),
                LevelKind::Resistance => seen_resistance = true,
            }
        }
    }
}
