use crate::addons::builtin_state;
use crate::error::{Error, Result};
use crate::fields::{Color, Field, FieldSet, NumericField};
use crate::indicator::{Indicator, IndicatorState};
use crate::indicators::ema::com_ema;
use crate::render::{Output, Plot, SeriesOutput};
use crate::series::PriceSeries;

const TRADER_COMS: [f64; 6] = [3.0, 5.0, 8.0, 10.0, 12.0, 15.0];
const INVESTOR_COMS: [f64; 6] = [30.0, 35.0, 40.0, 45.0, 50.0, 60.0];
const WIDTHS: [f64; 6] = [2.0, 1.8, 1.6, 1.4, 1.2, 1.0];

const TRADER_COLORS: [Color; 6] = [
    Color::rgb(51, 153, 255),
    Color::rgb(0, 138, 230),
    Color::rgb(0, 138, 230),
    Color::rgb(0, 138, 230),
    Color::rgb(0, 138, 230),
    Color::rgb(0, 138, 230),
];
const INVESTOR_COLORS: [Color; 6] = [
    Color::rgb(179, 36, 0),
    Color::rgb(179, 36, 0),
    Color::rgb(255, 0, 0),
    Color::rgb(255, 0, 0),
    Color::rgb(255, 0, 0),
    Color::rgb(255, 255, 255),
];

fn ribbon(prefix: &str, coms: &[f64; 6], colors: &[Color; 6]) -> Vec<Field> {
    coms.iter()
        .zip(colors)
        .zip(WIDTHS)
        .enumerate()
        .map(|(i, ((&com, &color), width))| {
            Field::from(
                NumericField::new(format!("{prefix} {}", i + 1))
                    .with_value(com)
                    .with_color(color)
                    .with_width(width),
            )
        })
        .collect()
}

/// One `com_ema` line on the close per numeric field, the field value being
/// the center of mass.
fn ribbon_outputs(fields: &FieldSet, series: &PriceSeries) -> Result<Vec<Output>> {
    let closes = series.closes();
    fields
        .iter()
        .filter_map(|field| match field {
            Field::Numeric(f) => Some(f),
            Field::Choice(_) => None,
        })
        .map(|field| -> Result<Output> {
            let com = field.value().ok_or_else(|| Error::Configuration {
                message: format!("field '{}' has no value", field.attribute_name()),
            })?;
            let line = com_ema(&closes, com)?;
            Ok(Output::Series(SeriesOutput::dense(
                field.attribute_name(),
                Plot::Line,
                &line,
                field.into(),
            )))
        })
        .collect()
}

/// Six short-term exponential averages of the close.
///
/// Fields `Trader MMA 1` to `Trader MMA 6` hold the centers of mass
/// 3, 5, 8, 10, 12 and 15.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingAverage {
    state: IndicatorState,
}

impl MovingAverage {
    /// Creates the add-on with its default fields.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateField` if the field table repeats a name.
    pub fn new() -> Result<Self> {
        Ok(Self {
            state: builtin_state(
                "Moving Average (3, 5, 8, 10, 12, 15)",
                "Multiple Moving Average (MMA)",
                ribbon("Trader MMA", &TRADER_COMS, &TRADER_COLORS),
            )?,
        })
    }
}

impl Indicator for MovingAverage {
    fn state(&self) -> &IndicatorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut IndicatorState {
        &mut self.state
    }

    fn compute(&self, series: &PriceSeries) -> Result<Vec<Output>> {
        ribbon_outputs(self.fields(), series)
    }
}

/// Guppy multiple moving average: a short-term and a long-term ribbon.
///
/// `Trader EMA 1..6` default to 3, 5, 8, 10, 12, 15 and `Investor EMA 1..6`
/// to 30, 35, 40, 45, 50, 60.
#[derive(Debug, Clone, PartialEq)]
pub struct Guppy {
    state: IndicatorState,
}

impl Guppy {
    /// Creates the add-on with its default fields.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateField` if the field table repeats a name.
    pub fn new() -> Result<Self> {
        let mut fields = ribbon("Trader EMA", &TRADER_COMS, &TRADER_COLORS);
        fields.extend(ribbon("Investor EMA", &INVESTOR_COMS, &INVESTOR_COLORS));
        Ok(Self {
            state: builtin_state(
                "Guppy (3, 5, 8, 10, 12, 15) and (30, 35, 40, 45, 50, 60)",
                "Guppy Multiple Moving Average (GMMA)",
                fields,
            )?,
        })
    }
}

impl Indicator for Guppy {
    fn state(&self) -> &IndicatorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut IndicatorState {
        &mut self.state
    }

    fn compute(&self, series: &PriceSeries) -> Result<Vec<Output>> {
        ribbon_outputs(self.fields(), series)
    }
}
