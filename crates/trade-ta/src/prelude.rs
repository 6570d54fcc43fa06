//! Commonly used types and traits for convenient importing.
//!
//! ```
//! use trade_ta::prelude::*;
//!
//! let series = PriceSeries::from_closes(&[10.0, 11.0, 10.0, 11.0, 10.0, 11.0, 10.0]);
//! let mut indicators = builtin_indicators().unwrap();
//! let mut canvas = Canvas::new();
//!
//! indicators[1].create(&mut canvas, &series).unwrap(); // RSI
//! assert!(canvas.series("RSI").is_some());
//! ```
//!
//! # Contents
//!
//! - [`Error`] and [`Result`]
//! - [`SeriesElement`] and [`ValidatedInput`]
//! - the input model: [`Bar`], [`PriceSeries`], [`PriceSource`]
//! - the add-on contract: [`Indicator`], [`RenderContext`], [`Canvas`], and
//!   the registry
//! - the engine functions and their output types

// Error types
pub use crate::error::{Error, Result};

// Traits
pub use crate::traits::{SeriesElement, ValidatedInput};

// Input
pub use crate::series::{Bar, PriceSeries, PriceSource};

// Add-ons
pub use crate::fields::{ChoiceField, Field, FieldSet, NumericField};
pub use crate::indicator::{Indicator, IndicatorState};
pub use crate::registry::{builtin_indicators, IndicatorKind};
pub use crate::render::{Canvas, Output, OutputHandle, RenderContext};

// Engines
pub use crate::indicators::{
    com_ema, conv_ema, crossover_signals, macd, rsi, support_resistance::support_resistance, Level,
    LevelKind, Macd, MacdOutput, Signals,
};
