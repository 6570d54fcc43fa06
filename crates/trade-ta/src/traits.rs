//! Numeric traits and input validation shared by every engine.
//!
//! [`SeriesElement`] abstracts over `f32` and `f64` so that the smoothing,
//! MACD, RSI and support/resistance engines are written once. The validation
//! helpers return the library [`Error`] variants used by all engines.

use num_traits::{Float, NumCast};

use crate::error::{Error, Result};

/// A numeric type usable as an element of a price or indicator series.
pub trait SeriesElement: Float + NumCast + Copy + Default + Send + Sync + 'static {
    /// Creates a series element from a `usize` value.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented in this type.
    #[inline]
    fn from_usize(value: usize) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "usize to series element",
        })
    }

    /// Creates a series element from an `f64` value.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented in this type.
    #[inline]
    fn from_f64(value: f64) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "f64 to series element",
        })
    }

    /// Converts this element to `f64`, mapping failures to NaN.
    #[inline]
    #[must_use]
    fn to_f64_lossy(self) -> f64 {
        <f64 as NumCast>::from(self).unwrap_or(f64::NAN)
    }

    /// Returns the constant 100 as this type.
    #[inline]
    #[must_use]
    fn hundred() -> Self {
        // 100 is representable in every Float type
        <Self as NumCast>::from(100).unwrap_or_else(Self::nan)
    }
}

impl<T: Float + NumCast + Copy + Default + Send + Sync + 'static> SeriesElement for T {}

/// Extension trait validating input series before computation.
pub trait ValidatedInput {
    /// The element type of the series.
    type Element: SeriesElement;

    /// Returns the length of the series.
    fn len(&self) -> usize;

    /// Returns true if the series is empty.
    #[inline]
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validates that the series has at least `min_length` elements.
    ///
    /// # Errors
    ///
    /// Returns `Error::InsufficientData` if the series is shorter than `min_length`.
    #[inline]
    fn validate_min_length(&self, min_length: usize) -> Result<()> {
        if self.len() < min_length {
            Err(Error::InsufficientData {
                required: min_length,
                actual: self.len(),
            })
        } else {
            Ok(())
        }
    }

    /// Validates that the series is not empty.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyInput` if the series is empty.
    #[inline]
    fn validate_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            Err(Error::EmptyInput)
        } else {
            Ok(())
        }
    }
}

impl<T: SeriesElement> ValidatedInput for [T] {
    type Element = T;

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}

impl<T: SeriesElement> ValidatedInput for Vec<T> {
    type Element = T;

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

/// Validates that a window size is positive.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if the period is zero.
#[inline]
pub const fn validate_period(period: usize) -> Result<()> {
    if period == 0 {
        Err(Error::InvalidPeriod {
            period,
            reason: "period must be at least 1",
        })
    } else {
        Ok(())
    }
}

/// Validates that two aligned series have the same length.
///
/// # Errors
///
/// Returns `Error::LengthMismatch` when they differ.
#[inline]
pub const fn validate_same_length(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::LengthMismatch { expected, actual })
    }
}
