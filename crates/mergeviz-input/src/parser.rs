//! Parser for the textual sequence list.
//!
//! Accepts JSON-style nested lists of integers, e.g. `[[1, 4, 5], [2, 6]]`,
//! with arbitrary whitespace between tokens. The public entry point is
//! [`parse`], which keeps the byte span of every number so that later
//! validation errors can point at the offending value.

use std::ops::Range;

use winnow::{
    Parser as _,
    ascii::{digit1, multispace0},
    combinator::{cut_err, delimited, opt, preceded, separated},
    error::{ContextError, ErrMode},
    stream::Stream,
};

use crate::error::{ErrorCode, InputError};

/// Context type for parser errors
#[derive(Debug, Clone, PartialEq, Eq)]
enum Context {
    /// Description of what is currently being parsed
    Label(&'static str),
    /// A number was read but is not a representable integer
    NotAnInteger,
}

type Input<'src> = &'src str;
type IResult<O> = std::result::Result<O, ErrMode<ContextError<Context>>>;

/// A parsed integer together with its location in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Number {
    pub(crate) value: i64,
    pub(crate) span: Range<usize>,
}

/// A number as seen while parsing: its start is recorded as the remaining
/// input length, since the parser never sees the full source.
#[derive(Debug, Clone, Copy)]
struct RawNumber {
    value: i64,
    remaining: usize,
    len: usize,
}

/// Parse optional whitespace
fn ws<'src>(input: &mut Input<'src>) -> IResult<()> {
    multispace0.void().parse_next(input)
}

/// Parse the text of a number, including a fractional part so that it can be
/// reported as a non-integer rather than as a syntax error
fn number_text<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    (opt('-'), digit1, opt(('.', digit1)))
        .take()
        .context(Context::Label("integer"))
        .parse_next(input)
}

/// Parse one integer with leading whitespace
fn integer<'src>(input: &mut Input<'src>) -> IResult<RawNumber> {
    ws(input)?;

    let start = input.checkpoint();
    let remaining = input.eof_offset();
    let text = number_text(input)?;

    match text.parse::<i64>() {
        Ok(value) => Ok(RawNumber {
            value,
            remaining,
            len: text.len(),
        }),
        Err(_) => {
            input.reset(&start);
            let mut e = ContextError::new();
            e.push(Context::NotAnInteger);
            Err(ErrMode::Cut(e))
        }
    }
}

/// Parse a comma with leading whitespace
fn comma<'src>(input: &mut Input<'src>) -> IResult<()> {
    (ws, ',').void().parse_next(input)
}

/// Parse a closing bracket with leading whitespace
fn close_bracket<'src>(input: &mut Input<'src>) -> IResult<()> {
    (ws, ']').void().parse_next(input)
}

/// Parse one bracketed sequence, e.g. `[1, 4, 5]`
///
/// Commits once the opening bracket is seen, so errors inside a sequence are
/// reported where they occur instead of at the start of the sequence.
fn sequence<'src>(input: &mut Input<'src>) -> IResult<Vec<RawNumber>> {
    preceded(
        (ws, '['),
        cut_err((separated(0.., integer, comma), close_bracket).map(|(numbers, ())| numbers)),
    )
    .context(Context::Label("sequence"))
    .parse_next(input)
}

/// Parse the whole document, e.g. `[[1, 4, 5], [2, 6]]`
fn document<'src>(input: &mut Input<'src>) -> IResult<Vec<Vec<RawNumber>>> {
    delimited((ws, '['), separated(0.., sequence, comma), (close_bracket, ws))
        .context(Context::Label("list of sequences"))
        .parse_next(input)
}

/// Parse source text into located numbers.
///
/// Blank input yields no sequences.
pub(crate) fn parse(source: &str) -> Result<Vec<Vec<Number>>, InputError> {
    if source.trim().is_empty() {
        return Ok(Vec::new());
    }

    let raw = document
        .parse(source)
        .map_err(|err| convert_error(source, err.offset(), err.inner()))?;

    let sequences = raw
        .into_iter()
        .map(|sequence| {
            sequence
                .into_iter()
                .map(|number| {
                    let start = source.len() - number.remaining;
                    Number {
                        value: number.value,
                        span: start..start + number.len,
                    }
                })
                .collect()
        })
        .collect();

    Ok(sequences)
}

/// Convert a winnow error at `offset` into an [`InputError`].
fn convert_error(source: &str, offset: usize, error: &ContextError<Context>) -> InputError {
    let not_an_integer = error
        .context()
        .any(|ctx| matches!(ctx, Context::NotAnInteger));

    if not_an_integer {
        let len = source[offset..]
            .chars()
            .take_while(|c| *c == '-' || *c == '.' || c.is_ascii_digit())
            .map(char::len_utf8)
            .sum::<usize>()
            .max(1);
        let text = &source[offset..offset + len];
        return InputError::new(ErrorCode::E002, format!("`{text}` is not an integer"))
            .with_span(offset..offset + len)
            .with_help("values must be whole numbers");
    }

    let label = error.context().find_map(|ctx| match ctx {
        Context::Label(label) => Some(*label),
        Context::NotAnInteger => None,
    });

    let (found, span) = match source[offset..].chars().next() {
        Some(c) => (format!("unexpected `{c}`"), offset..offset + c.len_utf8()),
        None => ("unexpected end of input".to_string(), offset..offset),
    };

    let message = match label {
        Some(label) => format!("{found} while parsing {label}"),
        None => found,
    };

    InputError::new(ErrorCode::E001, message)
        .with_span(span)
        .with_help("write the sequences as a nested list, e.g. [[1,4,5],[1,3,4],[2,6]]")
}
