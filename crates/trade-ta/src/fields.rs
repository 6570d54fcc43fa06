//! Configurable fields.
//!
//! Every indicator self-describes its tunable parameters as an ordered
//! [`FieldSet`]. Two kinds exist:
//!
//! - [`NumericField`]: an optional number (window size, center of mass,
//!   clustering threshold) plus display style (color, width, line style).
//!   A field with a value and no color is a pure input; one with a color and
//!   no value is a pure style entry; both is allowed.
//! - [`ChoiceField`]: one value out of a fixed set of strings.
//!
//! Both kinds remember their construction-time defaults and can be reset.
//!
//! # Example
//!
//! ```
//! use trade_ta::fields::{ChoiceField, FieldSet, LineStyle, NumericField};
//!
//! let mut fields = FieldSet::new();
//! fields.register(ChoiceField::new("Input", ["Open", "Close"], "Close")).unwrap();
//! fields
//!     .register(NumericField::new("RSI").with_value(14.0).with_width(1.5))
//!     .unwrap();
//!
//! fields.numeric_mut("RSI").unwrap().set_value(21.0);
//! fields.numeric_mut("RSI").unwrap().set_line_style("dot-line").unwrap();
//! assert_eq!(fields.numeric("RSI").unwrap().line_style(), LineStyle::DotLine);
//!
//! // Unknown choices are ignored.
//! assert!(!fields.choice_mut("Input").unwrap().set_choice("Volume"));
//! assert_eq!(fields.choice("Input").unwrap().current(), "Close");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// RGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Creates a color from its channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Line style of a plotted series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineStyle {
    /// Solid line.
    #[default]
    Line,
    /// Dashed line.
    DashLine,
    /// Dotted line.
    DotLine,
}

impl LineStyle {
    /// All styles.
    pub const ALL: [Self; 3] = [Self::Line, Self::DashLine, Self::DotLine];

    /// Style name as accepted by [`NumericField::set_line_style`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::DashLine => "dash-line",
            Self::DotLine => "dot-line",
        }
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LineStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|style| style.name() == s)
            .ok_or_else(|| Error::Configuration {
                message: format!(
                    "'{s}' is not an available line style (line, dash-line, dot-line)"
                ),
            })
    }
}

/// A numeric value with display style.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericField {
    attribute_name: String,
    default_value: Option<f64>,
    default_color: Option<Color>,
    default_width: Option<f64>,
    default_line_style: LineStyle,
    value: Option<f64>,
    color: Option<Color>,
    width: Option<f64>,
    line_style: LineStyle,
    disable_line_style: bool,
    disable_line_width: bool,
}

impl NumericField {
    /// Creates a field with no value, no color, no width and a solid line.
    #[must_use]
    pub fn new(attribute_name: impl Into<String>) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            default_value: None,
            default_color: None,
            default_width: None,
            default_line_style: LineStyle::Line,
            value: None,
            color: None,
            width: None,
            line_style: LineStyle::Line,
            disable_line_style: false,
            disable_line_width: false,
        }
    }

    /// Sets the default (and current) value.
    #[must_use]
    pub const fn with_value(mut self, value: f64) -> Self {
        self.default_value = Some(value);
        self.value = Some(value);
        self
    }

    /// Sets the default (and current) color.
    #[must_use]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.default_color = Some(color);
        self.color = Some(color);
        self
    }

    /// Sets the default (and current) width.
    #[must_use]
    pub const fn with_width(mut self, width: f64) -> Self {
        self.default_width = Some(width);
        self.width = Some(width);
        self
    }

    /// Sets the default (and current) line style.
    #[must_use]
    pub const fn with_line_style(mut self, style: LineStyle) -> Self {
        self.default_line_style = style;
        self.line_style = style;
        self
    }

    /// Hides the line style from style editors.
    #[must_use]
    pub const fn without_line_style(mut self) -> Self {
        self.disable_line_style = true;
        self
    }

    /// Hides the line width from style editors.
    #[must_use]
    pub const fn without_line_width(mut self) -> Self {
        self.disable_line_width = true;
        self
    }

    /// Attribute name.
    #[must_use]
    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        self.value
    }

    /// Current color.
    #[must_use]
    pub const fn color(&self) -> Option<Color> {
        self.color
    }

    /// Current width.
    #[must_use]
    pub const fn width(&self) -> Option<f64> {
        self.width
    }

    /// Current line style.
    #[must_use]
    pub const fn line_style(&self) -> LineStyle {
        self.line_style
    }

    /// Whether the line style may be customized.
    #[must_use]
    pub const fn line_style_enabled(&self) -> bool {
        !self.disable_line_style
    }

    /// Whether the line width may be customized.
    #[must_use]
    pub const fn line_width_enabled(&self) -> bool {
        !self.disable_line_width
    }

    /// Sets the value.
    pub fn set_value(&mut self, value: f64) {
        self.value = Some(value);
    }

    /// Sets the color.
    pub fn set_color(&mut self, color: Color) {
        self.color = Some(color);
    }

    /// Sets the width.
    pub fn set_width(&mut self, width: f64) {
        self.width = Some(width);
    }

    /// Sets the line style by name (`line`, `dash-line` or `dot-line`).
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` for any other name; the style is unchanged.
    pub fn set_line_style(&mut self, name: &str) -> Result<()> {
        self.line_style = name.parse()?;
        Ok(())
    }

    /// Restores value, color, width and line style to their defaults.
    pub fn reset(&mut self) {
        self.value = self.default_value;
        self.color = self.default_color;
        self.width = self.default_width;
        self.line_style = self.default_line_style;
    }

    /// Interprets the value as a smoothing window.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPeriod` if the value is missing, not a positive
    /// integer, or too large for `usize`.
    pub fn value_as_period(&self) -> Result<usize> {
        let value = self.value.ok_or(Error::InvalidPeriod {
            period: 0,
            reason: "field has no value",
        })?;
        if !value.is_finite() || value.fract() != 0.0 || value < 1.0 || value > usize::MAX as f64 {
            return Err(Error::InvalidPeriod {
                period: 0,
                reason: "window must be a positive integer",
            });
        }
        // Integral and in range, so the cast is exact
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(value as usize)
    }

    fn describe(&self) -> FieldDescriptor {
        FieldDescriptor {
            attribute_name: self.attribute_name.clone(),
            kind: FieldKind::Numeric,
            default: FieldValue::Number(self.default_value),
            current: FieldValue::Number(self.value),
            choices: Vec::new(),
            color: self.color,
            width: self.width,
            line_style: Some(self.line_style),
            line_style_enabled: self.line_style_enabled(),
            line_width_enabled: self.line_width_enabled(),
        }
    }
}

/// A value chosen from a fixed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceField {
    attribute_name: String,
    choices: Vec<String>,
    default: String,
    current: String,
}

impl ChoiceField {
    /// Creates a choice field whose current value is `default`.
    #[must_use]
    pub fn new<I, S>(
        attribute_name: impl Into<String>,
        choices: I,
        default: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let default = default.into();
        Self {
            attribute_name: attribute_name.into(),
            choices: choices.into_iter().map(Into::into).collect(),
            current: default.clone(),
            default,
        }
    }

    /// Attribute name.
    #[must_use]
    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    /// The allowed values, in display order.
    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// The default value.
    #[must_use]
    pub fn default_choice(&self) -> &str {
        &self.default
    }

    /// The current value.
    #[must_use]
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Parses the current value.
    ///
    /// # Errors
    ///
    /// Returns whatever error `T::from_str` produces.
    pub fn current_as<T: FromStr>(&self) -> std::result::Result<T, T::Err> {
        self.current.parse()
    }

    /// Sets the current value if `choice` is one of the allowed values.
    ///
    /// Any other value is ignored without error. Returns whether it was applied.
    pub fn set_choice(&mut self, choice: &str) -> bool {
        if self.choices.iter().any(|c| c == choice) {
            self.current = choice.to_string();
            true
        } else {
            warn!(field = %self.attribute_name, choice, "ignoring value outside the choice set");
            false
        }
    }

    /// Restores the default value.
    pub fn reset(&mut self) {
        self.current.clone_from(&self.default);
    }

    fn describe(&self) -> FieldDescriptor {
        FieldDescriptor {
            attribute_name: self.attribute_name.clone(),
            kind: FieldKind::Choice,
            default: FieldValue::Choice(self.default.clone()),
            current: FieldValue::Choice(self.current.clone()),
            choices: self.choices.clone(),
            color: None,
            width: None,
            line_style: None,
            line_style_enabled: false,
            line_width_enabled: false,
        }
    }
}

/// Field kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// [`NumericField`].
    Numeric,
    /// [`ChoiceField`].
    Choice,
}

impl FieldKind {
    const fn name(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Choice => "choice",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Either kind of field.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// A numeric/style field.
    Numeric(NumericField),
    /// A choice field.
    Choice(ChoiceField),
}

impl Field {
    /// Attribute name, unique within one indicator.
    #[must_use]
    pub fn attribute_name(&self) -> &str {
        match self {
            Self::Numeric(f) => f.attribute_name(),
            Self::Choice(f) => f.attribute_name(),
        }
    }

    /// The field kind.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Numeric(_) => FieldKind::Numeric,
            Self::Choice(_) => FieldKind::Choice,
        }
    }

    /// Restores construction-time defaults.
    pub fn reset(&mut self) {
        match self {
            Self::Numeric(f) => f.reset(),
            Self::Choice(f) => f.reset(),
        }
    }

    /// Serializable snapshot of this field.
    #[must_use]
    pub fn describe(&self) -> FieldDescriptor {
        match self {
            Self::Numeric(f) => f.describe(),
            Self::Choice(f) => f.describe(),
        }
    }
}

impl From<NumericField> for Field {
    fn from(field: NumericField) -> Self {
        Self::Numeric(field)
    }
}

impl From<ChoiceField> for Field {
    fn from(field: ChoiceField) -> Self {
        Self::Choice(field)
    }
}

/// Default or current value in a [`FieldDescriptor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Numeric value (absent for pure style fields).
    Number(Option<f64>),
    /// Choice value.
    Choice(String),
}

/// What a caller needs to build an input control for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Attribute name.
    pub attribute_name: String,
    /// Field kind.
    pub kind: FieldKind,
    /// Construction-time default.
    pub default: FieldValue,
    /// Current value.
    pub current: FieldValue,
    /// Allowed values (choice fields only).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub choices: Vec<String>,
    /// Current display color.
    pub color: Option<Color>,
    /// Current line width.
    pub width: Option<f64>,
    /// Current line style (numeric fields only).
    pub line_style: Option<LineStyle>,
    /// Whether the line style is editable.
    pub line_style_enabled: bool,
    /// Whether the line width is editable.
    pub line_width_enabled: bool,
}

/// Ordered fields of one indicator, indexed by attribute name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    fields: Vec<Field>,
    index: HashMap<String, usize>,
}

impl FieldSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateField` if the attribute name is taken; the set
    /// is unchanged.
    pub fn register(&mut self, field: impl Into<Field>) -> Result<()> {
        let field = field.into();
        let name = field.attribute_name().to_string();
        if self.index.contains_key(&name) {
            return Err(Error::DuplicateField { name });
        }
        self.index.insert(name, self.fields.len());
        self.fields.push(field);
        Ok(())
    }

    /// Registers fields in order.
    ///
    /// # Errors
    ///
    /// Stops at the first duplicate; fields before it stay registered.
    pub fn register_all<I>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Field>,
    {
        fields.into_iter().try_for_each(|f| self.register(f))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if no field is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Looks up a field.
    ///
    /// # Errors
    ///
    /// Returns `Error::FieldNotFound` on a miss.
    pub fn get(&self, attribute_name: &str) -> Result<&Field> {
        self.index
            .get(attribute_name)
            .map(|&i| &self.fields[i])
            .ok_or_else(|| Error::FieldNotFound {
                name: attribute_name.to_string(),
            })
    }

    /// Mutable lookup.
    ///
    /// # Errors
    ///
    /// Returns `Error::FieldNotFound` on a miss.
    pub fn get_mut(&mut self, attribute_name: &str) -> Result<&mut Field> {
        match self.index.get(attribute_name) {
            Some(&i) => Ok(&mut self.fields[i]),
            None => Err(Error::FieldNotFound {
                name: attribute_name.to_string(),
            }),
        }
    }

    /// Looks up a numeric field.
    ///
    /// # Errors
    ///
    /// `Error::FieldNotFound` on a miss, `Error::FieldKindMismatch` for a choice field.
    pub fn numeric(&self, attribute_name: &str) -> Result<&NumericField> {
        match self.get(attribute_name)? {
            Field::Numeric(f) => Ok(f),
            Field::Choice(_) => Err(mismatch(attribute_name, FieldKind::Numeric)),
        }
    }

    /// Mutable numeric lookup.
    ///
    /// # Errors
    ///
    /// `Error::FieldNotFound` on a miss, `Error::FieldKindMismatch` for a choice field.
    pub fn numeric_mut(&mut self, attribute_name: &str) -> Result<&mut NumericField> {
        match self.get_mut(attribute_name)? {
            Field::Numeric(f) => Ok(f),
            Field::Choice(_) => Err(mismatch(attribute_name, FieldKind::Numeric)),
        }
    }

    /// Looks up a choice field.
    ///
    /// # Errors
    ///
    /// `Error::FieldNotFound` on a miss, `Error::FieldKindMismatch` for a numeric field.
    pub fn choice(&self, attribute_name: &str) -> Result<&ChoiceField> {
        match self.get(attribute_name)? {
            Field::Choice(f) => Ok(f),
            Field::Numeric(_) => Err(mismatch(attribute_name, FieldKind::Choice)),
        }
    }

    /// Mutable choice lookup.
    ///
    /// # Errors
    ///
    /// `Error::FieldNotFound` on a miss, `Error::FieldKindMismatch` for a numeric field.
    pub fn choice_mut(&mut self, attribute_name: &str) -> Result<&mut ChoiceField> {
        match self.get_mut(attribute_name)? {
            Field::Choice(f) => Ok(f),
            Field::Numeric(_) => Err(mismatch(attribute_name, FieldKind::Choice)),
        }
    }

    /// Shorthand for the window stored in a numeric field.
    ///
    /// # Errors
    ///
    /// Lookup errors, or `Error::InvalidPeriod` for a non-positive-integer value.
    pub fn period(&self, attribute_name: &str) -> Result<usize> {
        self.numeric(attribute_name)?.value_as_period()
    }

    /// Resets every field.
    pub fn reset_all(&mut self) {
        self.fields.iter_mut().for_each(Field::reset);
    }

    /// Snapshots every field in order.
    #[must_use]
    pub fn describe(&self) -> Vec<FieldDescriptor> {
        self.fields.iter().map(Field::describe).collect()
    }
}

fn mismatch(name: &str, expected: FieldKind) -> Error {
    Error::FieldKindMismatch {
        name: name.to_string(),
        expected: expected.name(),
    }
}
