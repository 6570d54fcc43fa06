use crate::addons::{builtin_state, input_field, selected_column};
use crate::error::Result;
use crate::fields::{Color, Field, LineStyle, NumericField};
use crate::indicator::{Indicator, IndicatorState};
use crate::indicators::rsi::{rsi, DEFAULT_RSI_LENGTH, OVERBOUGHT, OVERSOLD};
use crate::render::{Output, Plot, SeriesOutput, Style};
use crate::series::PriceSeries;

const UP: &str = "Up";
const DOWN: &str = "Down";
const RSI: &str = "RSI";

fn guide_field(name: &str) -> NumericField {
    NumericField::new(name)
        .with_color(Color::rgb(200, 200, 200))
        .with_width(1.5)
        .with_line_style(LineStyle::DashLine)
}

/// RSI line with overbought (70) and oversold (30) guides.
///
/// `RSI` holds the length (default 14); `Up` and `Down` style the guides.
#[derive(Debug, Clone, PartialEq)]
pub struct Rsi {
    state: IndicatorState,
}

impl Rsi {
    /// Creates the add-on with its default fields.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateField` if the field table repeats a name.
    #[allow(clippy::cast_precision_loss)]
    pub fn new() -> Result<Self> {
        let fields: [Field; 4] = [
            input_field().into(),
            guide_field(UP).into(),
            guide_field(DOWN).into(),
            NumericField::new(RSI)
                .with_value(DEFAULT_RSI_LENGTH as f64)
                .with_color(Color::rgb(142, 21, 153))
                .with_width(1.5)
                .into(),
        ];
        Ok(Self {
            state: builtin_state("RSI", "RSI 14d (Relative Strength Index 14 days)", fields)?,
        })
    }
}

impl Indicator for Rsi {
    fn state(&self) -> &IndicatorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut IndicatorState {
        &mut self.state
    }

    fn compute(&self, series: &PriceSeries) -> Result<Vec<Output>> {
        let fields = self.fields();
        let prices = selected_column(fields, series)?;
        let values = rsi(&prices, fields.period(RSI)?)?;
        let guide = |level: f64, name: &str| -> Result<Output> {
            let style: Style = fields.numeric(name)?.into();
            Ok(Output::Series(SeriesOutput::new(
                name,
                Plot::Line,
                vec![Some(level); prices.len()],
                style,
            )))
        };

        Ok(vec![
            Output::Series(SeriesOutput::new(
                RSI,
                Plot::Line,
                values,
                fields.numeric(RSI)?.into(),
            )),
            guide(OVERBOUGHT, UP)?,
            guide(OVERSOLD, DOWN)?,
        ])
    }
}
