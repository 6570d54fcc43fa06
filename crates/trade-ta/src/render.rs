//! Output boundary between indicators and whatever displays them.
//!
//! Indicators never draw. They push aligned series and price levels into a
//! [`RenderContext`] and keep the returned [`OutputHandle`]s so that
//! [`Indicator::remove`](crate::indicator::Indicator::remove) can take them
//! away again. [`Canvas`] is the in-memory context used by the CLI and tests.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::fields::{Color, LineStyle, NumericField};
use crate::indicators::support_resistance::LevelKind;

/// Opaque reference to one output registered in a [`RenderContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct OutputHandle(u64);

impl OutputHandle {
    /// Wraps a raw id; contexts choose their own numbering.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw id.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// How a series is meant to be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Plot {
    /// Connected line; `None` values break the line.
    Line,
    /// Bars from zero, colored by sign.
    Histogram,
    /// Symbols on the bars that carry a value.
    Markers,
}

/// Display style copied from a field at create time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Style {
    /// Main color.
    pub color: Option<Color>,
    /// Color for negative values (histograms).
    pub negative_color: Option<Color>,
    /// Line width or marker size.
    pub width: Option<f64>,
    /// Line style.
    pub line_style: LineStyle,
}

impl From<&NumericField> for Style {
    fn from(field: &NumericField) -> Self {
        Self {
            color: field.color(),
            negative_color: None,
            width: field.width(),
            line_style: field.line_style(),
        }
    }
}

/// A named series aligned with the input bars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesOutput {
    /// Output name, e.g. `"MACD"` or `"Buy"`.
    pub name: String,
    /// Drawing kind.
    pub plot: Plot,
    /// One entry per input bar.
    pub values: Vec<Option<f64>>,
    /// Display style.
    pub style: Style,
}

impl SeriesOutput {
    /// Creates a series output.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        plot: Plot,
        values: Vec<Option<f64>>,
        style: Style,
    ) -> Self {
        Self {
            name: name.into(),
            plot,
            values,
            style,
        }
    }

    /// Wraps a dense series, mapping NaN to `None`.
    #[must_use]
    pub fn dense(name: impl Into<String>, plot: Plot, values: &[f64], style: Style) -> Self {
        let values = values
            .iter()
            .map(|&v| if v.is_nan() { None } else { Some(v) })
            .collect();
        Self::new(name, plot, values, style)
    }
}

/// A horizontal price level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelOutput {
    /// Price of the level.
    pub price: f64,
    /// Support or resistance.
    pub kind: LevelKind,
    /// Display style.
    pub style: Style,
}

/// Anything registered in a context.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Output {
    /// An aligned series.
    Series(SeriesOutput),
    /// A price level.
    Level(LevelOutput),
}

/// Consumer of indicator outputs.
pub trait RenderContext {
    /// Registers a series and returns its handle.
    fn add_series(&mut self, series: SeriesOutput) -> OutputHandle;

    /// Registers a level and returns its handle.
    fn add_level(&mut self, level: LevelOutput) -> OutputHandle;

    /// Removes an output. Unknown handles are ignored.
    fn remove_output(&mut self, handle: OutputHandle);
}

/// In-memory [`RenderContext`] keeping outputs in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    next_id: u64,
    outputs: BTreeMap<OutputHandle, Output>,
}

impl Canvas {
    /// Creates an empty canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered outputs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// True if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Looks up an output by handle.
    #[must_use]
    pub fn get(&self, handle: OutputHandle) -> Option<&Output> {
        self.outputs.get(&handle)
    }

    /// First series with the given name.
    #[must_use]
    pub fn series(&self, name: &str) -> Option<&SeriesOutput> {
        self.all_series().find(|s| s.name == name)
    }

    /// All series in insertion order.
    pub fn all_series(&self) -> impl Iterator<Item = &SeriesOutput> {
        self.outputs.values().filter_map(|o| match o {
            Output::Series(s) => Some(s),
            Output::Level(_) => None,
        })
    }

    /// All levels in insertion order.
    pub fn levels(&self) -> impl Iterator<Item = &LevelOutput> {
        self.outputs.values().filter_map(|o| match o {
            Output::Level(l) => Some(l),
            Output::Series(_) => None,
        })
    }

    /// All outputs in insertion order.
    pub fn outputs(&self) -> impl Iterator<Item = (OutputHandle, &Output)> {
        self.outputs.iter().map(|(&h, o)| (h, o))
    }

    fn insert(&mut self, output: Output) -> OutputHandle {
        let handle = OutputHandle::new(self.next_id);
        self.next_id += 1;
        self.outputs.insert(handle, output);
        handle
    }
}

impl RenderContext for Canvas {
    fn add_series(&mut self, series: SeriesOutput) -> OutputHandle {
        self.insert(Output::Series(series))
    }

    fn add_level(&mut self, level: LevelOutput) -> OutputHandle {
        self.insert(Output::Level(level))
    }

    fn remove_output(&mut self, handle: OutputHandle) {
        self.outputs.remove(&handle);
    }
}
