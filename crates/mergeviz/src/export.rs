//! JSON export of assembled traces.

use serde::Serialize;

use mergeviz_core::frame::{Frame, ReferenceLanguage};

use crate::{error::MergevizError, trace::{Algorithm, Trace}};

/// Everything a renderer needs to replay a trace without the engine.
#[derive(Debug, Serialize)]
pub struct TraceDocument<'a> {
    algorithm: Algorithm,
    language: ReferenceLanguage,
    input: &'a [Vec<i64>],
    result: Vec<i64>,
    frames: &'a [Frame],
}

impl<'a> TraceDocument<'a> {
    pub fn new(trace: &'a Trace, input: &'a [Vec<i64>], language: ReferenceLanguage) -> Self {
        Self {
            algorithm: trace.algorithm(),
            language,
            input,
            result: trace.final_result(),
            frames: trace.frames(),
        }
    }

    /// Serializes the document as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`MergevizError::Export`] if serialization fails.
    pub fn to_json(&self) -> Result<String, MergevizError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
