//! CLI error types for file I/O, CSV parsing, and indicator failures.
//!
//! Error messages say what went wrong and, where possible, how to fix it.

use std::io;

use thiserror::Error;

/// CLI error type encompassing all possible error conditions.
#[derive(Debug, Error)]
pub enum CliError {
    /// An I/O error occurred while reading or writing files.
    #[error("I/O error{}: {source}{}", path_context(.path), path_hint(.path))]
    Io {
        /// The underlying I/O error.
        source: io::Error,
        /// Path that caused the error, if known.
        path: Option<String>,
    },

    /// The CSV input could not be parsed.
    #[error(
        "CSV parse error{}: {message}. Ensure your CSV has a header row and numeric price columns.",
        line_context(.line)
    )]
    CsvParse {
        /// Description of the parse error.
        message: String,
        /// Line number where the error occurred, if known.
        line: Option<usize>,
    },

    /// An indicator could not be configured or computed.
    #[error("Indicator error: {source}")]
    Indicator {
        /// The underlying trade-ta error.
        #[from]
        source: trade_ta::Error,
    },

    /// Field descriptors could not be serialized.
    #[error("Serialization error: {source}")]
    Serialization {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// An invalid argument was provided.
    #[error("Invalid argument '{argument}': {reason}{}", suggestion_suffix(.suggestion))]
    InvalidArgument {
        /// Name of the invalid argument.
        argument: String,
        /// Description of why it's invalid.
        reason: String,
        /// Suggestion for valid values.
        suggestion: Option<String>,
    },
}

fn path_context(path: &Option<String>) -> String {
    path.as_ref()
        .map(|p| format!(" with file '{p}'"))
        .unwrap_or_default()
}

fn path_hint(path: &Option<String>) -> &'static str {
    if path.is_some() {
        ". Check that the file exists and you have the needed permissions."
    } else {
        ""
    }
}

fn line_context(line: &Option<usize>) -> String {
    line.map(|l| format!(" on line {l}")).unwrap_or_default()
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(". {s}"))
        .unwrap_or_default()
}

impl CliError {
    /// Wraps an I/O error together with the path it concerns.
    pub fn io_at(source: io::Error, path: impl Into<String>) -> Self {
        Self::Io {
            source,
            path: Some(path.into()),
        }
    }

    /// Builds an [`CliError::InvalidArgument`].
    pub fn invalid_argument(
        argument: impl Into<String>,
        reason: impl Into<String>,
        suggestion: Option<String>,
    ) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
            suggestion,
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            source: err,
            path: None,
        }
    }
}

impl From<csv::Error> for CliError {
    fn from(err: csv::Error) -> Self {
        let line = err
            .position()
            .and_then(|p| usize::try_from(p.line()).ok());
        Self::CsvParse {
            message: err.to_string(),
            line,
        }
    }
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
