//! Error types for mergeviz operations.
//!
//! Trace assembly and playback never fail; errors only arise at the edges,
//! when reading input, loading configuration or exporting traces.

use std::io;

use thiserror::Error;

use mergeviz_input::InputError;

/// The main error type for mergeviz operations.
///
/// The `Input` variant keeps the offending source text next to the structured
/// error so callers can render a labeled snippet.
#[derive(Debug, Error)]
pub enum MergevizError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Input { err: InputError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(#[from] serde_json::Error),
}

impl MergevizError {
    /// Create a new `Input` error with the associated source text.
    pub fn new_input_error(err: InputError, src: impl Into<String>) -> Self {
        Self::Input {
            err,
            src: src.into(),
        }
    }
}
