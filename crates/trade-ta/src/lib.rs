//! trade-ta: chart indicators over complete price series
//!
//! This crate provides the numeric engines and the configurable add-ons of a
//! charting application: MACD with crossover markers, RSI, exponential moving
//! average ribbons, and support/resistance levels.
//!
//! # Features
//!
//! - **Engines**: pure functions over `f32` or `f64` slices, with outputs
//!   aligned 1:1 with the input
//! - **Fields**: every add-on describes its parameters and display style as
//!   a typed, serializable field set
//! - **Lifecycle**: add-ons draw into any [`RenderContext`] and can remove or
//!   recreate what they drew
//! - **Safety**: typed errors for invalid windows, short input and bad
//!   configuration; undefined numeric values are `None`, never errors
//!
//! # Quick Start
//!
//! ```
//! use trade_ta::prelude::*;
//!
//! let closes: Vec<f64> = (0..60).map(|i| 100.0 + (f64::from(i) * 0.3).sin() * 5.0).collect();
//! let series = PriceSeries::from_closes(&closes);
//!
//! let mut macd = IndicatorKind::Macd.build().unwrap();
//! let mut canvas = Canvas::new();
//! macd.create(&mut canvas, &series).unwrap();
//!
//! let histogram = canvas.series("Histogram").unwrap();
//! assert_eq!(histogram.values.len(), 60);
//! ```
//!
//! # Engines
//!
//! The engines can be used without any add-on:
//!
//! ```
//! use trade_ta::indicators::{conv_ema, rsi};
//!
//! let prices = vec![44.0_f64, 44.5, 43.5, 44.5, 44.0, 43.0, 42.5, 43.5];
//! let smooth = conv_ema(&prices, 3).unwrap();
//! let strength = rsi(&prices, 14).unwrap();
//!
//! assert_eq!(smooth.len(), prices.len());
//! assert!(strength[0].is_none());
//! ```
//!
//! # Error Handling
//!
//! ```
//! use trade_ta::prelude::*;
//! use trade_ta::indicators::conv_ema;
//!
//! // A window of 10 needs 11 samples
//! let short_data = vec![1.0_f64, 2.0];
//! assert!(matches!(conv_ema(&short_data, 10), Err(Error::InsufficientData { .. })));
//!
//! // Empty data
//! let empty: Vec<f64> = vec![];
//! assert_eq!(conv_ema(&empty, 5).unwrap_err(), Error::EmptyInput);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::nursery)]
#![warn(clippy::needless_collect)]
#![warn(clippy::or_fun_call)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::useless_conversion)]
#![allow(clippy::module_name_repetitions)]

pub mod addons;
pub mod error;
pub mod fields;
pub mod indicator;
pub mod indicators;
pub mod prelude;
pub mod registry;
pub mod render;
pub mod series;
pub mod traits;
pub mod utils;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use indicator::{Indicator, IndicatorState};
pub use render::{Canvas, RenderContext};
pub use series::{Bar, PriceSeries, PriceSource};
pub use traits::{SeriesElement, ValidatedInput};
pub use utils::{approx_eq, count_nans, EPSILON, LOOSE_EPSILON};
