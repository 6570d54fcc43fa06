//! The add-on contract.
//!
//! An [`Indicator`] owns an [`IndicatorState`] (name, description, enabled
//! flag, fields and the handles of everything it has drawn) and knows how to
//! turn a [`PriceSeries`] into a list of [`Output`]s. The provided methods
//! implement the lifecycle on top of that:
//!
//! - [`create`](Indicator::create) computes the outputs, registers them in a
//!   [`RenderContext`] and keeps the handles.
//! - [`remove`](Indicator::remove) unregisters every handle.
//! - [`recreate`](Indicator::recreate) does both, which is how a changed
//!   field takes effect.
//!
//! `create` refuses to run while handles from an earlier call are still
//! registered, so outputs are never leaked or drawn twice. All outputs are
//! computed before the first one is registered: a failing engine leaves both
//! the indicator and the context untouched.
//!
//! # Example
//!
//! ```
//! use trade_ta::addons::Rsi;
//! use trade_ta::indicator::Indicator;
//! use trade_ta::render::Canvas;
//! use trade_ta::series::PriceSeries;
//!
//! let series = PriceSeries::from_closes(&[10.0, 11.0, 10.5, 11.5, 11.0]);
//! let mut rsi = Rsi::new().unwrap();
//! let mut canvas = Canvas::new();
//!
//! rsi.create(&mut canvas, &series).unwrap();
//! assert!(rsi.is_enabled());
//! assert_eq!(canvas.len(), 3);
//!
//! rsi.fields_mut().numeric_mut("RSI").unwrap().set_value(3.0);
//! rsi.recreate(&mut canvas, &series).unwrap();
//! assert_eq!(canvas.len(), 3);
//!
//! rsi.remove(&mut canvas);
//! assert!(canvas.is_empty());
//! ```

use tracing::debug;

use crate::error::{Error, Result};
use crate::fields::{Field, FieldSet};
use crate::render::{Output, OutputHandle, RenderContext};
use crate::series::PriceSeries;

/// State shared by every indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorState {
    name: String,
    description: String,
    enabled: bool,
    fields: FieldSet,
    handles: Vec<OutputHandle>,
}

impl IndicatorState {
    /// Creates a disabled state with no fields.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            enabled: false,
            fields: FieldSet::new(),
            handles: Vec::new(),
        }
    }

    /// Creates a state and registers `fields` in order.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateField` if two fields share an attribute name.
    pub fn with_fields<I>(
        name: impl Into<String>,
        description: impl Into<String>,
        fields: I,
    ) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Field>,
    {
        let mut state = Self::new(name, description);
        state.fields.register_all(fields)?;
        Ok(state)
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Short description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// True between a successful `create` and the next `remove`.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The fields.
    #[must_use]
    pub const fn fields(&self) -> &FieldSet {
        &self.fields
    }

    /// The fields, mutably.
    pub fn fields_mut(&mut self) -> &mut FieldSet {
        &mut self.fields
    }

    /// Handles of the outputs currently registered.
    #[must_use]
    pub fn handles(&self) -> &[OutputHandle] {
        &self.handles
    }
}

/// A configurable producer of chart outputs.
///
/// Implementors provide [`state`](Self::state), [`state_mut`](Self::state_mut)
/// and [`compute`](Self::compute); everything else has a default built on
/// them.
pub trait Indicator: Send {
    /// Shared state.
    fn state(&self) -> &IndicatorState;

    /// Shared state, mutably.
    fn state_mut(&mut self) -> &mut IndicatorState;

    /// Runs the engines with the current field values.
    ///
    /// # Errors
    ///
    /// Any field or engine error.
    fn compute(&self, series: &PriceSeries) -> Result<Vec<Output>>;

    /// Display name.
    fn name(&self) -> &str {
        self.state().name()
    }

    /// Short description.
    fn description(&self) -> &str {
        self.state().description()
    }

    /// True while outputs are drawn.
    fn is_enabled(&self) -> bool {
        self.state().is_enabled()
    }

    /// The fields.
    fn fields(&self) -> &FieldSet {
        self.state().fields()
    }

    /// The fields, mutably.
    fn fields_mut(&mut self) -> &mut FieldSet {
        self.state_mut().fields_mut()
    }

    /// Computes the outputs and registers them in `ctx`.
    ///
    /// # Errors
    ///
    /// - `Error::StaleOutputs` if outputs from an earlier call are still
    ///   registered
    /// - any error from [`compute`](Self::compute)
    ///
    /// On error neither `self` nor `ctx` is modified.
    fn create(&mut self, ctx: &mut dyn RenderContext, series: &PriceSeries) -> Result<()> {
        let stale = self.state().handles.len();
        if stale > 0 {
            return Err(Error::StaleOutputs { count: stale });
        }

        let outputs = self.compute(series)?;
        let handles: Vec<OutputHandle> = outputs
            .into_iter()
            .map(|output| match output {
                Output::Series(s) => ctx.add_series(s),
                Output::Level(l) => ctx.add_level(l),
            })
            .collect();

        debug!(indicator = self.name(), outputs = handles.len(), "created");
        let state = self.state_mut();
        state.handles = handles;
        state.enabled = true;
        Ok(())
    }

    /// Unregisters every output and disables the indicator.
    fn remove(&mut self, ctx: &mut dyn RenderContext) {
        let state = self.state_mut();
        let handles = std::mem::take(&mut state.handles);
        state.enabled = false;
        let removed = handles.len();
        for handle in handles {
            ctx.remove_output(handle);
        }
        debug!(indicator = self.name(), removed, "removed");
    }

    /// Removes and creates again, picking up changed fields.
    ///
    /// # Errors
    ///
    /// See [`create`](Self::create). On error the old outputs are already
    /// gone and the indicator is disabled.
    fn recreate(&mut self, ctx: &mut dyn RenderContext, series: &PriceSeries) -> Result<()> {
        self.remove(ctx);
        self.create(ctx, series)
    }
}
