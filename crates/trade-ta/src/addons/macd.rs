use crate::addons::{builtin_state, input_field, selected_column};
use crate::error::Result;
use crate::fields::{Color, Field, NumericField};
use crate::indicator::{Indicator, IndicatorState};
use crate::indicators::macd::{
    self, DEFAULT_FAST_PERIOD, DEFAULT_SIGNAL_PERIOD, DEFAULT_SLOW_PERIOD,
};
use crate::render::{Output, Plot, SeriesOutput, Style};
use crate::series::PriceSeries;

const UPPER: &str = "Upper";
const LOWER: &str = "Lower";
const EMA_LOW: &str = "EMA Low";
const EMA_FAST: &str = "EMA Fast";
const EMA: &str = "EMA";
const MACD: &str = "MACD";
const BUY: &str = "Buy indicator";
const SELL: &str = "Sell indicator";

/// MACD histogram, signal and MACD lines, plus crossover markers on price.
///
/// | field | default |
/// |-------|---------|
/// | `Input` | Close |
/// | `Upper` / `Lower` | histogram colors above / below zero |
/// | `EMA Low` | 12, fast window |
/// | `EMA Fast` | 26, slow window |
/// | `EMA` | 9, signal window and line style |
/// | `MACD` | MACD line style |
/// | `Buy indicator` / `Sell indicator` | marker styles |
#[derive(Debug, Clone, PartialEq)]
pub struct Macd {
    state: IndicatorState,
}

impl Macd {
    /// Creates the add-on with its default fields.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateField` if the field table repeats a name.
    pub fn new() -> Result<Self> {
        let fields: [Field; 9] = [
            input_field().into(),
            NumericField::new(UPPER)
                .with_color(Color::rgb(38, 166, 154))
                .without_line_style()
                .into(),
            NumericField::new(LOWER)
                .with_color(Color::rgb(239, 83, 80))
                .without_line_style()
                .into(),
            period_field(EMA_LOW, DEFAULT_FAST_PERIOD).into(),
            period_field(EMA_FAST, DEFAULT_SLOW_PERIOD).into(),
            period_field(EMA, DEFAULT_SIGNAL_PERIOD)
                .with_color(Color::rgb(255, 106, 0))
                .with_width(2.0)
                .into(),
            NumericField::new(MACD)
                .with_color(Color::rgb(0, 148, 255))
                .with_width(2.0)
                .into(),
            NumericField::new(BUY)
                .with_color(Color::rgb(175, 0, 0))
                .with_width(10.0)
                .without_line_style()
                .into(),
            NumericField::new(SELL)
                .with_color(Color::rgb(0, 201, 80))
                .with_width(10.0)
                .without_line_style()
                .into(),
        ];
        Ok(Self {
            state: builtin_state("MACD", "", fields)?,
        })
    }
}

#[allow(clippy::cast_precision_loss)]
fn period_field(name: &str, period: usize) -> NumericField {
    NumericField::new(name).with_value(period as f64)
}

impl Indicator for Macd {
    fn state(&self) -> &IndicatorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut IndicatorState {
        &mut self.state
    }

    fn compute(&self, series: &PriceSeries) -> Result<Vec<Output>> {
        let fields = self.fields();
        let prices = selected_column(fields, series)?;
        let config = macd::Macd::new()
            .fast_period(fields.period(EMA_LOW)?)
            .slow_period(fields.period(EMA_FAST)?)
            .signal_period(fields.period(EMA)?);
        let strategy = config.strategy(&prices)?;
        let output = strategy.output;

        let histogram_style = Style {
            color: fields.numeric(UPPER)?.color(),
            negative_color: fields.numeric(LOWER)?.color(),
            ..Style::default()
        };

        Ok(vec![
            Output::Series(SeriesOutput::dense(
                "Histogram",
                Plot::Histogram,
                &output.histogram,
                histogram_style,
            )),
            Output::Series(SeriesOutput::dense(
                "Signal",
                Plot::Line,
                &output.signal_line,
                fields.numeric(EMA)?.into(),
            )),
            Output::Series(SeriesOutput::dense(
                "MACD",
                Plot::Line,
                &output.macd_line,
                fields.numeric(MACD)?.into(),
            )),
            Output::Series(SeriesOutput::new(
                "Buy",
                Plot::Markers,
                strategy.signals.buy,
                fields.numeric(BUY)?.into(),
            )),
            Output::Series(SeriesOutput::new(
                "Sell",
                Plot::Markers,
                strategy.signals.sell,
                fields.numeric(SELL)?.into(),
            )),
        ])
    }
}
