//! Mergeviz Input
//!
//! Turns user-provided text such as `[[1,4,5],[1,3,4],[2,6]]` into validated
//! sequences for the trace engine. The engine itself assumes every sequence
//! is sorted and bounded; this crate is where that assumption is enforced.
//!
//! # Example
//!
//! ```
//! let sequences = mergeviz_input::parse("[[1,4,5],[1,3,4],[2,6]]").unwrap();
//! assert_eq!(sequences, vec![vec![1, 4, 5], vec![1, 3, 4], vec![2, 6]]);
//!
//! let err = mergeviz_input::parse("[[3,1]]").unwrap_err();
//! assert_eq!(err.code(), mergeviz_input::ErrorCode::E101);
//! ```

pub mod error;
pub mod samples;

mod parser;
mod validate;

pub use error::{ErrorCode, InputError};
pub use samples::{Preset, random_sequences};
pub use validate::{MAX_ABS_VALUE, MAX_SEQUENCES, MAX_TOTAL_ELEMENTS, validate};

use log::debug;

/// Sorted input sequences, one inner vector per sequence.
pub type Sequences = Vec<Vec<i64>>;

/// Parse and validate a textual list of sequences.
///
/// Blank input is accepted and means "no sequences".
///
/// # Errors
///
/// Returns an [`InputError`] carrying the byte span of the offending text for
/// syntax errors, non-integer values, values out of range and unsorted
/// sequences, or without a span when a size limit is exceeded.
pub fn parse(source: &str) -> Result<Sequences, InputError> {
    let parsed = parser::parse(source)?;
    validate::validate_spanned(&parsed)?;

    let sequences: Sequences = parsed
        .into_iter()
        .map(|sequence| sequence.into_iter().map(|number| number.value).collect())
        .collect();

    debug!(
        sequences = sequences.len(),
        elements = sequences.iter().map(Vec::len).sum::<usize>();
        "Input parsed"
    );

    Ok(sequences)
}
