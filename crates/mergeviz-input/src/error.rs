//! Input error type and error codes.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Syntax errors
//! - `E1xx` - Validation errors

use std::{fmt, ops::Range};

use thiserror::Error;

/// Error codes for categorizing input errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Syntax Errors (E0xx)
    // =========================================================================
    /// Malformed input.
    ///
    /// The text is not a bracketed, comma-separated list of integer lists.
    E001,

    /// Not an integer.
    ///
    /// A value has a fractional part or does not fit in a 64-bit integer.
    E002,

    // =========================================================================
    // Validation Errors (E1xx)
    // =========================================================================
    /// Value out of range.
    E100,

    /// Unsorted sequence.
    ///
    /// Every sequence must be in non-descending order.
    E101,

    /// Too many sequences.
    E102,

    /// Too many elements across all sequences.
    E103,
}

impl ErrorCode {
    /// Returns the code as a string, e.g. `"E101"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E001 => "E001",
            Self::E002 => "E002",
            Self::E100 => "E100",
            Self::E101 => "E101",
            Self::E102 => "E102",
            Self::E103 => "E103",
        }
    }

    /// Returns a short description of the error category.
    pub fn description(&self) -> &'static str {
        match self {
            Self::E001 => "malformed input",
            Self::E002 => "not an integer",
            Self::E100 => "value out of range",
            Self::E101 => "unsorted sequence",
            Self::E102 => "too many sequences",
            Self::E103 => "too many elements",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected input, with an optional byte span into the source text.
///
/// # Example
///
/// ```
/// # use mergeviz_input::{ErrorCode, InputError};
/// let err = InputError::new(ErrorCode::E101, "sequence 1 is not sorted")
///     .with_span(3..4)
///     .with_help("sort each sequence in ascending order");
///
/// assert_eq!(err.span(), Some(3..4));
/// assert_eq!(err.to_string(), "sequence 1 is not sorted");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InputError {
    code: ErrorCode,
    message: String,
    span: Option<Range<usize>>,
    help: Option<String>,
}

impl InputError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            span: None,
            help: None,
        }
    }

    /// Attaches the byte range of the offending text (builder style).
    pub fn with_span(mut self, span: Range<usize>) -> Self {
        self.span = Some(span);
        self
    }

    /// Attaches a suggestion for fixing the input (builder style).
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> Option<Range<usize>> {
        self.span.clone()
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}
