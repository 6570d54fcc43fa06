//! Error types for trade-ta.
//!
//! This module defines the single error type used throughout the library.
//! Numeric indeterminate results (a zero denominator in RSI, the undefined
//! first price delta) are never reported here: they surface as `None` or NaN
//! values inside the output series.

use thiserror::Error;

/// The main error type for trade-ta operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input data series is too short for the requested smoothing window.
    #[error("insufficient data: required {required} elements, got {actual}")]
    InsufficientData {
        /// The number of data points required.
        required: usize,
        /// The number of data points provided.
        actual: usize,
    },

    /// The input data series is empty.
    #[error("empty input: no data provided")]
    EmptyInput,

    /// The period (window size) parameter is invalid.
    #[error("invalid period {period}: {reason}")]
    InvalidPeriod {
        /// The invalid period value that was provided.
        period: usize,
        /// Description of why the period is invalid.
        reason: &'static str,
    },

    /// A non-period numeric parameter is out of range.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of why the value is invalid.
        reason: &'static str,
    },

    /// Two series that must be aligned have different lengths.
    #[error("length mismatch: expected {expected} elements, got {actual}")]
    LengthMismatch {
        /// Length of the reference series.
        expected: usize,
        /// Length of the offending series.
        actual: usize,
    },

    /// Bar timestamps are not strictly increasing.
    #[error("bar {index} has a timestamp not after its predecessor")]
    UnorderedTimestamps {
        /// Index of the first out-of-order bar.
        index: usize,
    },

    /// A field with the same attribute name is already registered.
    #[error("field '{name}' is already registered")]
    DuplicateField {
        /// The duplicated attribute name.
        name: String,
    },

    /// No field with the given attribute name exists.
    #[error("field '{name}' not found")]
    FieldNotFound {
        /// The requested attribute name.
        name: String,
    },

    /// The field exists but is of another kind than the accessor expects.
    #[error("field '{name}' is not a {expected} field")]
    FieldKindMismatch {
        /// The attribute name.
        name: String,
        /// The kind the caller asked for.
        expected: &'static str,
    },

    /// A configuration value was not recognized (e.g. an unknown line style).
    #[error("configuration error: {message}")]
    Configuration {
        /// What was wrong.
        message: String,
    },

    /// `create` was called while outputs of a previous call are still registered.
    #[error("{count} outputs from a previous create are still registered; call remove first")]
    StaleOutputs {
        /// Number of handles still registered.
        count: usize,
    },

    /// Failed to convert a numeric value to the target type.
    #[error("numeric conversion failed: {context}")]
    NumericConversion {
        /// Description of the conversion that failed.
        context: &'static str,
    },
}

/// Convenience type alias for Results using the trade-ta Error type.
pub type Result<T> = std::result::Result<T, Error>;
