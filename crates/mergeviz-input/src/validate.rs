//! Validation of parsed sequences.
//!
//! The trace engine assumes sorted, bounded input and never re-checks it.
//! Checks run sequence by sequence (value range first, then ordering) and
//! finish with the size limits.

use std::ops::Range;

use crate::{
    error::{ErrorCode, InputError},
    parser::Number,
};

/// Largest accepted absolute value.
pub const MAX_ABS_VALUE: i64 = 10_000;

/// Largest accepted number of sequences.
pub const MAX_SEQUENCES: usize = 10_000;

/// Largest accepted number of values across all sequences.
pub const MAX_TOTAL_ELEMENTS: usize = 10_000;

/// Validate sequences that did not come from text, e.g. built in code.
///
/// # Errors
///
/// Returns an [`InputError`] without a span for the first violated rule.
///
/// # Example
///
/// ```
/// # use mergeviz_input::{ErrorCode, validate};
/// assert!(validate(&[vec![1, 4, 5], vec![2, 6]]).is_ok());
/// assert_eq!(validate(&[vec![5, 4]]).unwrap_err().code(), ErrorCode::E101);
/// ```
pub fn validate(sequences: &[Vec<i64>]) -> Result<(), InputError> {
    check(sequences, |value| *value, |_| None)
}

/// Validate parsed sequences, pointing errors at the offending number.
pub(crate) fn validate_spanned(sequences: &[Vec<Number>]) -> Result<(), InputError> {
    check(sequences, |number| number.value, |number| Some(number.span.clone()))
}

fn check<T>(
    sequences: &[Vec<T>],
    value_of: impl Fn(&T) -> i64,
    span_of: impl Fn(&T) -> Option<Range<usize>>,
) -> Result<(), InputError> {
    let located = |err: InputError, item: &T| match span_of(item) {
        Some(span) => err.with_span(span),
        None => err,
    };

    for (index, sequence) in sequences.iter().enumerate() {
        for (position, item) in sequence.iter().enumerate() {
            let value = value_of(item);
            if !(-MAX_ABS_VALUE..=MAX_ABS_VALUE).contains(&value) {
                let err = InputError::new(
                    ErrorCode::E100,
                    format!(
                        "value {value} at position {} of sequence {} is out of range",
                        position + 1,
                        index + 1
                    ),
                )
                .with_help(format!(
                    "values must be between -{MAX_ABS_VALUE} and {MAX_ABS_VALUE}"
                ));
                return Err(located(err, item));
            }
        }

        if let Some(position) = sequence
            .windows(2)
            .position(|pair| value_of(&pair[1]) < value_of(&pair[0]))
        {
            let item = &sequence[position + 1];
            let err = InputError::new(
                ErrorCode::E101,
                format!(
                    "sequence {} is not sorted: {} follows {}",
                    index + 1,
                    value_of(item),
                    value_of(&sequence[position])
                ),
            )
            .with_help("every sequence must be in ascending order");
            return Err(located(err, item));
        }
    }

    if sequences.len() > MAX_SEQUENCES {
        return Err(InputError::new(
            ErrorCode::E102,
            format!(
                "{} sequences given, at most {MAX_SEQUENCES} are supported",
                sequences.len()
            ),
        ));
    }

    let total: usize = sequences.iter().map(Vec::len).sum();
    if total > MAX_TOTAL_ELEMENTS {
        return Err(InputError::new(
            ErrorCode::E103,
            format!("{total} values given, at most {MAX_TOTAL_ELEMENTS} are supported"),
        ));
    }

    Ok(())
}
