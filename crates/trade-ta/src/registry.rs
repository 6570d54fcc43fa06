//! Static table of the built-in add-ons.
//!
//! ```
//! use trade_ta::registry::{builtin_indicators, IndicatorKind};
//!
//! let kind: IndicatorKind = "gmma".parse().unwrap();
//! assert_eq!(kind, IndicatorKind::Guppy);
//! assert_eq!(kind.build().unwrap().fields().len(), 12);
//!
//! let names: Vec<String> = builtin_indicators()
//!     .unwrap()
//!     .iter()
//!     .map(|ind| ind.name().to_string())
//!     .collect();
//! assert_eq!(names[0], "MACD");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::addons::{Guppy, Macd, MovingAverage, Rsi, SupportResistance};
use crate::error::{Error, Result};
use crate::indicator::Indicator;

/// Identifies one built-in add-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorKind {
    /// [`Macd`].
    Macd,
    /// [`Rsi`].
    Rsi,
    /// [`MovingAverage`].
    MovingAverage,
    /// [`Guppy`].
    Guppy,
    /// [`SupportResistance`].
    SupportResistance,
}

impl IndicatorKind {
    /// All kinds, in table order.
    pub const ALL: [Self; 5] = [
        Self::Macd,
        Self::Rsi,
        Self::MovingAverage,
        Self::Guppy,
        Self::SupportResistance,
    ];

    /// Short identifier accepted by `FromStr`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Macd => "macd",
            Self::Rsi => "rsi",
            Self::MovingAverage => "mma",
            Self::Guppy => "gmma",
            Self::SupportResistance => "sr",
        }
    }

    /// A fresh add-on with default fields.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateField` if the add-on's field table repeats a
    /// name.
    pub fn build(self) -> Result<Box<dyn Indicator>> {
        Ok(match self {
            Self::Macd => Box::new(Macd::new()?),
            Self::Rsi => Box::new(Rsi::new()?),
            Self::MovingAverage => Box::new(MovingAverage::new()?),
            Self::Guppy => Box::new(Guppy::new()?),
            Self::SupportResistance => Box::new(SupportResistance::new()?),
        })
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IndicatorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Configuration {
                message: format!(
                    "unknown indicator '{s}', expected one of: {}",
                    Self::ALL.map(Self::name).join(", ")
                ),
            })
    }
}

/// One fresh instance of every built-in add-on, in table order.
///
/// # Errors
///
/// See [`IndicatorKind::build`].
pub fn builtin_indicators() -> Result<Vec<Box<dyn Indicator>>> {
    IndicatorKind::ALL.into_iter().map(IndicatorKind::build).collect()
}
