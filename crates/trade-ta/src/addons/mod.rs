//! Built-in chart add-ons.
//!
//! Each add-on wires one or more engines from [`indicators`](crate::indicators)
//! to a set of fields with the defaults a trader expects to see:
//!
//! | add-on | engines | outputs |
//! |--------|---------|---------|
//! | [`Macd`] | `conv_ema`, crossover | `Histogram`, `Signal`, `MACD`, `Buy`, `Sell` |
//! | [`Rsi`] | `com_ema` RSI | `RSI`, `Up`, `Down` |
//! | [`MovingAverage`] | `com_ema` | one line per field |
//! | [`Guppy`] | `com_ema` | one line per field |
//! | [`SupportResistance`] | peak clustering | support and resistance levels |

mod macd;
mod mma;
mod rsi;
mod sup_resi;

pub use macd::Macd;
pub use mma::{Guppy, MovingAverage};
pub use rsi::Rsi;
pub use sup_resi::SupportResistance;

use crate::error::Result;
use crate::fields::{ChoiceField, Field, FieldSet};
use crate::indicator::IndicatorState;
use crate::series::{PriceSeries, PriceSource};

/// Attribute name of the price column selector.
pub const INPUT_FIELD: &str = "Input";

/// The "Input" choice over the four price columns, defaulting to Close.
#[must_use]
pub fn input_field() -> ChoiceField {
    ChoiceField::new(
        INPUT_FIELD,
        PriceSource::ALL.iter().map(|source| source.name()),
        PriceSource::default().name(),
    )
}

/// State for a built-in add-on.
///
/// # Errors
///
/// Returns `Error::DuplicateField` if two of `fields` share a name.
pub(crate) fn builtin_state<I>(name: &str, description: &str, fields: I) -> Result<IndicatorState>
where
    I: IntoIterator<Item = Field>,
{
    IndicatorState::with_fields(name, description, fields)
}

/// The column selected by the "Input" field of `fields`.
pub(crate) fn selected_column(fields: &FieldSet, series: &PriceSeries) -> Result<Vec<f64>> {
    let source: PriceSource = fields.choice(INPUT_FIELD)?.current_as()?;
    Ok(series.column(source))
}
