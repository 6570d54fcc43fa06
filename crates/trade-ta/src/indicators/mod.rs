//! Numeric engines behind the add-ons.
//!
//! Every engine is a pure function over a price slice. Outputs are aligned
//! 1:1 with the input.
//!
//! # Engines
//!
//! ## Smoothing
//!
//! - [`conv_ema`] - normalised exponential kernel applied by convolution,
//!   with constant left-edge padding
//! - [`com_ema`] - adjusted exponentially weighted mean parameterised by its
//!   center of mass
//!
//! The two are not interchangeable: MACD uses the first, RSI and the moving
//! average overlays the second.
//!
//! ## Momentum
//!
//! - [`macd`] - difference of two convolution EMAs plus signal and histogram
//! - [`crossover_signals`] - debounced buy/sell markers on MACD/signal
//!   crossings
//! - [`rsi`] - bounded oscillator from smoothed gains and losses
//!
//! ## Levels
//!
//! - [`support_resistance`](support_resistance::support_resistance) -
//!   clustered local extrema confirmed by at least three touches
//!
//! # Missing Values
//!
//! Values that cannot be computed are `None` in the `Option`-valued outputs
//! (RSI, markers) and NaN in the dense ones. Neither is ever an error.
//!
//! # Example
//!
//! ```
//! use trade_ta::indicators::{conv_ema, rsi};
//!
//! let prices = vec![44.0_f64, 44.5, 43.5, 44.5, 44.0, 43.0, 42.5, 43.5, 44.5, 45.0];
//!
//! let smooth = conv_ema(&prices, 3).unwrap();
//! assert_eq!(smooth[0], smooth[3]);
//!
//! let strength = rsi(&prices, 5).unwrap();
//! assert!(strength[0].is_none());
//! ```

pub mod crossover;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod support_resistance;

pub use crossover::{crossover_signals, Position, SignalKind, Signals};
pub use ema::{com_ema, conv_ema, conv_ema_min_len, conv_ema_weights};
pub use macd::{macd, macd_min_len, Macd, MacdOutput, MacdStrategy};
pub use rsi::{gains_and_losses, rsi};
pub use support_resistance::{
    confirmed_levels, find_peaks, group_values_nearest, peak_values, resistances, supports,
    Direction, Level, LevelKind,
};
