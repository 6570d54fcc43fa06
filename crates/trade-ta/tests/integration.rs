//! End-to-end scenarios: add-ons driven through the registry into a `Canvas`.

mod common;

use common::{approx_eq, flat_series, rising_series, wave_series, EPSILON};
use trade_ta::prelude::*;
use trade_ta::render::Plot;

fn marker_count(canvas: &Canvas, name: &str) -> usize {
    canvas.series(name).unwrap().values.iter().flatten().count()
}

// ==================== Flat Market ====================

#[test]
fn flat_market_rsi_is_undefined() {
    let series = flat_series(14, 10.0);
    let mut rsi = IndicatorKind::Rsi.build().unwrap();
    let mut canvas = Canvas::new();
    rsi.create(&mut canvas, &series).unwrap();

    let line = canvas.series("RSI").unwrap();
    assert_eq!(line.values.len(), 14);
    assert!(line.values.iter().all(Option::is_none));
}

#[test]
fn flat_market_macd_is_zero_without_markers() {
    let series = flat_series(14, 10.0);
    let mut macd = IndicatorKind::Macd.build().unwrap();
    {
        let fields = macd.fields_mut();
        fields.numeric_mut("EMA Low").unwrap().set_value(3.0);
        fields.numeric_mut("EMA Fast").unwrap().set_value(6.0);
        fields.numeric_mut("EMA").unwrap().set_value(2.0);
    }
    let mut canvas = Canvas::new();
    macd.create(&mut canvas, &series).unwrap();

    assert!(canvas
        .series("MACD")
        .unwrap()
        .values
        .iter()
        .all(|v| *v == Some(0.0)));
    assert!(canvas
        .series("Histogram")
        .unwrap()
        .values
        .iter()
        .all(|v| *v == Some(0.0)));
    assert_eq!(marker_count(&canvas, "Buy"), 0);
    assert_eq!(marker_count(&canvas, "Sell"), 0);
}

#[test]
fn flat_market_is_too_short_for_default_macd() {
    let series = flat_series(14, 10.0);
    let mut macd = IndicatorKind::Macd.build().unwrap();
    let mut canvas = Canvas::new();
    let err = macd.create(&mut canvas, &series).unwrap_err();
    assert_eq!(
        err,
        Error::InsufficientData {
            required: 27,
            actual: 14
        }
    );
    assert!(canvas.is_empty());
}

// ==================== Rising Market ====================

#[test]
fn rising_market_fires_a_single_buy() {
    let series = rising_series(40, 70.0, 1.0);
    let mut macd = IndicatorKind::Macd.build().unwrap();
    let mut canvas = Canvas::new();
    macd.create(&mut canvas, &series).unwrap();

    assert_eq!(marker_count(&canvas, "Buy"), 1);
    assert_eq!(marker_count(&canvas, "Sell"), 0);

    // the padded left edge starts negative; the steady state is fast above slow
    let line = &canvas.series("MACD").unwrap().values;
    assert!(line[39].unwrap() > 0.0);
}

#[test]
fn rising_market_fractional_step_fires_a_single_buy() {
    let series = rising_series(40, 10.0, 0.1);
    let mut macd = IndicatorKind::Macd.build().unwrap();
    let mut canvas = Canvas::new();
    macd.create(&mut canvas, &series).unwrap();

    assert_eq!(marker_count(&canvas, "Buy"), 1);
    assert_eq!(marker_count(&canvas, "Sell"), 0);
}

#[test]
fn rising_market_buy_sits_above_price() {
    let series = rising_series(40, 70.0, 1.0);
    let closes = series.closes();
    let mut macd = IndicatorKind::Macd.build().unwrap();
    let mut canvas = Canvas::new();
    macd.create(&mut canvas, &series).unwrap();

    let buys = &canvas.series("Buy").unwrap().values;
    let (index, price) = buys
        .iter()
        .enumerate()
        .find_map(|(i, v)| v.map(|p| (i, p)))
        .unwrap();
    assert!(approx_eq(price, closes[index] * 1.01, EPSILON));
}

#[test]
fn rising_market_rsi_is_undefined() {
    let series = rising_series(40, 70.0, 1.0);
    let mut rsi = IndicatorKind::Rsi.build().unwrap();
    let mut canvas = Canvas::new();
    rsi.create(&mut canvas, &series).unwrap();
    assert!(canvas.series("RSI").unwrap().values.iter().all(Option::is_none));
}

// ==================== Full Chart ====================

#[test]
fn every_builtin_draws_on_a_realistic_series() {
    let series = wave_series(250);
    let mut canvas = Canvas::new();
    let mut indicators = builtin_indicators().unwrap();
    for indicator in &mut indicators {
        indicator.create(&mut canvas, &series).unwrap();
        assert!(indicator.is_enabled(), "{}", indicator.name());
    }

    // 5 MACD + 3 RSI + 6 MMA + 12 GMMA series
    assert_eq!(canvas.all_series().count(), 26);
    for output in canvas.all_series() {
        assert_eq!(output.values.len(), 250, "{}", output.name);
    }
    let levels = canvas.levels().count();
    assert_eq!(canvas.len(), 26 + levels);

    for indicator in &mut indicators {
        indicator.remove(&mut canvas);
    }
    assert!(canvas.is_empty());
}

#[test]
fn macd_markers_alternate_on_a_wave() {
    let series = wave_series(300);
    let mut macd = IndicatorKind::Macd.build().unwrap();
    let mut canvas = Canvas::new();
    macd.create(&mut canvas, &series).unwrap();

    let buys = &canvas.series("Buy").unwrap().values;
    let sells = &canvas.series("Sell").unwrap().values;
    let mut last = None;
    for (buy, sell) in buys.iter().zip(sells) {
        assert!(buy.is_none() || sell.is_none());
        let kind = match (buy, sell) {
            (Some(_), _) => "buy",
            (_, Some(_)) => "sell",
            _ => continue,
        };
        assert_ne!(last, Some(kind));
        last = Some(kind);
    }
    assert!(marker_count(&canvas, "Buy") > 1);
    assert!(marker_count(&canvas, "Sell") > 1);
}

#[test]
fn histogram_is_macd_minus_signal() {
    let series = wave_series(120);
    let mut macd = IndicatorKind::Macd.build().unwrap();
    let mut canvas = Canvas::new();
    macd.create(&mut canvas, &series).unwrap();

    let hist = canvas.series("Histogram").unwrap();
    assert_eq!(hist.plot, Plot::Histogram);
    let line = &canvas.series("MACD").unwrap().values;
    let signal = &canvas.series("Signal").unwrap().values;
    for t in 0..120 {
        assert!(approx_eq(
            hist.values[t].unwrap(),
            line[t].unwrap() - signal[t].unwrap(),
            EPSILON
        ));
    }
}

// ==================== Reconfiguration ====================

#[test]
fn recreate_picks_up_field_changes() {
    let series = wave_series(80);
    let mut rsi = IndicatorKind::Rsi.build().unwrap();
    let mut canvas = Canvas::new();
    rsi.create(&mut canvas, &series).unwrap();
    let before = canvas.series("RSI").unwrap().values.clone();

    rsi.fields_mut().numeric_mut("RSI").unwrap().set_value(5.0);
    assert!(matches!(
        rsi.create(&mut canvas, &series),
        Err(Error::StaleOutputs { count: 3 })
    ));
    rsi.recreate(&mut canvas, &series).unwrap();

    assert_eq!(canvas.len(), 3);
    let after = &canvas.series("RSI").unwrap().values;
    assert_ne!(&before, after);
    let expected = rsi_engine(&series.closes(), 5);
    assert_eq!(after, &expected);
}

fn rsi_engine(data: &[f64], length: usize) -> Vec<Option<f64>> {
    trade_ta::indicators::rsi(data, length).unwrap()
}

#[test]
fn input_choice_switches_the_column() {
    let series = wave_series(60);
    let mut rsi = IndicatorKind::Rsi.build().unwrap();
    rsi.fields_mut().choice_mut("Input").unwrap().set_choice("Open");
    let mut canvas = Canvas::new();
    rsi.create(&mut canvas, &series).unwrap();

    let expected = rsi_engine(&series.column(PriceSource::Open), 14);
    assert_eq!(canvas.series("RSI").unwrap().values, expected);
}

#[test]
fn invalid_choice_keeps_previous_value() {
    let mut macd = IndicatorKind::Macd.build().unwrap();
    let input = macd.fields_mut().choice_mut("Input").unwrap();
    assert!(input.set_choice("Low"));
    assert!(!input.set_choice("Volume"));
    assert_eq!(input.current(), "Low");
}

#[test]
fn field_descriptors_serialize() {
    let macd = IndicatorKind::Macd.build().unwrap();
    let json = serde_json::to_value(macd.fields().describe()).unwrap();
    let fields = json.as_array().unwrap();
    assert_eq!(fields.len(), 9);
    assert_eq!(fields[0]["attribute_name"], "Input");
    assert_eq!(fields[0]["current"], "Close");
    assert_eq!(fields[3]["attribute_name"], "EMA Low");
    assert_eq!(fields[3]["current"], 12.0);
}

#[test]
fn support_resistance_on_a_range() {
    // price bouncing between ~90 and ~110
    let closes: Vec<f64> = (0..61)
        .map(|i| {
            let phase = i % 4;
            let wiggle = (i / 4 % 3) as f64 * 0.3;
            match phase {
                0 | 2 => 100.0,
                1 => 110.0 + wiggle,
                _ => 90.0 - wiggle,
            }
        })
        .collect();
    let series = PriceSeries::from_closes(&closes);
    let mut sr = IndicatorKind::SupportResistance.build().unwrap();
    let mut canvas = Canvas::new();
    sr.create(&mut canvas, &series).unwrap();

    let levels: Vec<_> = canvas.levels().collect();
    assert_eq!(levels.len(), 2);
    assert_eq!(levels[0].kind, LevelKind::Support);
    assert_eq!(levels[1].kind, LevelKind::Resistance);
    assert!(approx_eq(levels[0].price, 89.7, 1e-9));
    assert!(approx_eq(levels[1].price, 110.3, 1e-9));
}
