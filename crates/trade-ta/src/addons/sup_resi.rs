use crate::addons::builtin_state;
use crate::error::{Error, Result};
use crate::fields::{Color, Field, LineStyle, NumericField};
use crate::indicator::{Indicator, IndicatorState};
use crate::indicators::support_resistance::{support_resistance, LevelKind, DEFAULT_CLOSEST};
use crate::render::{LevelOutput, Output, Style};
use crate::series::PriceSeries;

const CLOSEST: &str = "Closest";

const SUPPORT_STYLE: Style = Style {
    color: Some(Color::rgb(0, 255, 0)),
    negative_color: None,
    width: Some(1.0),
    line_style: LineStyle::Line,
};
const RESISTANCE_STYLE: Style = Style {
    color: Some(Color::rgb(255, 0, 0)),
    negative_color: None,
    width: Some(1.0),
    line_style: LineStyle::Line,
};

/// Horizontal support (green) and resistance (red) levels on the close.
///
/// `Closest` (default 2) is the largest gap between two extrema that are
/// still grouped into one level.
#[derive(Debug, Clone, PartialEq)]
pub struct SupportResistance {
    state: IndicatorState,
}

impl SupportResistance {
    /// Creates the add-on with its default fields.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateField` if the field table repeats a name.
    pub fn new() -> Result<Self> {
        Ok(Self {
            state: builtin_state(
                "Support & Resistances",
                "",
                [Field::from(
                    NumericField::new(CLOSEST).with_value(DEFAULT_CLOSEST),
                )],
            )?,
        })
    }
}

impl Indicator for SupportResistance {
    fn state(&self) -> &IndicatorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut IndicatorState {
        &mut self.state
    }

    fn compute(&self, series: &PriceSeries) -> Result<Vec<Output>> {
        let closest = self
            .fields()
            .numeric(CLOSEST)?
            .value()
            .ok_or_else(|| Error::Configuration {
                message: format!("field '{CLOSEST}' has no value"),
            })?;
        let levels = support_resistance(&series.closes(), closest)?;
        Ok(levels
            .into_iter()
            .map(|level| {
                let style = match level.kind {
                    LevelKind::Support => SUPPORT_STYLE,
                    LevelKind::Resistance => RESISTANCE_STYLE,
                };
                Output::Level(LevelOutput {
                    price: level.price,
                    kind: level.kind,
                    style,
                })
            })
            .collect())
    }
}
