//! Boundary scanner: classifies the value at an offset and finds where it
//! ends.
//!
//! Every other part of the crate moves through a document by asking the
//! scanner for the extent of the next value and jumping past it. The scanner
//! looks at as few bytes as it can to do so:
//! - strings are bounded by searching for the next quote or backslash, with
//!   a backslash always consuming the byte after it;
//! - objects and arrays are bounded by tracking nesting depth, treating the
//!   contents of strings as opaque;
//! - literals and numbers are matched against their grammar and end at the
//!   first byte that does not fit.
//!
//! Nothing is decoded. Escapes stay in place and numbers stay text.
//!
//! Invariants
//! - A returned [`Value`] always lies within the buffer, and its `end` is the
//!   offset scanning for the next sibling resumes at.
//! - No byte at or after `end` has been inspected, except the bytes of a
//!   number's terminator.

mod literal;
mod nesting;


use bstr::ByteSlice;

use self::{literal::ExpectedLiteral, nesting::Nesting};
use crate::{Error, ScanOptions, SyntaxError, Value, ValueKind};

#[inline]
pub(crate) const fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Returns the offset of the first non-whitespace byte at or after `pos`.
#[inline]
pub(crate) fn skip_whitespace(buf: &[u8], mut pos: usize) -> usize {
    while buf.get(pos).copied().is_some_and(is_whitespace) {
        pos += 1;
    }
    pos
}

/// Classifies and bounds the value at or after `offset`.
pub(crate) fn locate(buf: &[u8], offset: usize, options: ScanOptions) -> Result<Value<'_>, Error> {
    let pos = skip_whitespace(buf, offset);
    let Some(&first) = buf.get(pos) else {
        return Err(Error::malformed(buf.len(), SyntaxError::UnexpectedEndOfInput));
    };

    match first {
        b'"' => {
            let close = string_end(buf, pos + 1)?;
            Ok(Value::new(ValueKind::String, buf, pos + 1..close, close + 1))
        }
        b'{' | b'[' => {
            let end = container_end(buf, pos)?;
            let kind = if first == b'{' {
                ValueKind::Object
            } else {
                ValueKind::Array
            };
            Ok(Value::new(kind, buf, pos..end, end))
        }
        b'-' | b'0'..=b'9' => {
            let end = number_end(buf, pos, options)?;
            Ok(Value::new(ValueKind::Number, buf, pos..end, end))
        }
        other => match ExpectedLiteral::from_first(other) {
            Some(literal) => {
                let end = literal.match_at(buf, pos)?;
                Ok(Value::new(literal.kind(), buf, pos..end, end))
            }
            None => Err(Error::malformed(pos, SyntaxError::UnexpectedByte(other))),
        },
    }
}

/// Bounds a string whose opening quote precedes `pos`, returning the offset
/// of the closing quote.
pub(crate) fn string_end(buf: &[u8], mut pos: usize) -> Result<usize, Error> {
    loop {
        let Some(found) = buf.get(pos..).and_then(|rest| rest.find_byteset(b"\"\\")) else {
            return Err(Error::malformed(buf.len(), SyntaxError::UnterminatedString));
        };
        let at = pos + found;
        if buf[at] == b'"' {
            return Ok(at);
        }
        // A backslash escapes whatever follows it, quote or not.
        pos = at + 2;
    }
}

/// Bounds an object or array opening at `open`, returning the offset just
/// past its closing delimiter.
fn container_end(buf: &[u8], open: usize) -> Result<usize, Error> {
    let mut nesting = Nesting::new();
    nesting.push(buf[open]);

    let mut pos = open + 1;
    while let Some(found) = buf.get(pos..).and_then(|rest| rest.find_byteset(b"\"{}[]")) {
        let at = pos + found;
        match buf[at] {
            b'"' => {
                pos = string_end(buf, at + 1)? + 1;
                continue;
            }
            b @ (b'{' | b'[') => nesting.push(b),
            close => {
                let Some(open) = nesting.pop() else { break };
                let expected = if open == b'{' { b'}' } else { b']' };
                if close != expected {
                    return Err(Error::malformed(
                        at,
                        SyntaxError::MismatchedDelimiter { open, found: close },
                    ));
                }
                if nesting.is_empty() {
                    return Ok(at + 1);
                }
            }
        }
        pos = at + 1;
    }
    Err(Error::malformed(buf.len(), SyntaxError::UnterminatedContainer))
}

/// Bounds a number starting at `pos`, returning the offset of the first byte
/// that does not belong to it.
fn number_end(buf: &[u8], pos: usize, options: ScanOptions) -> Result<usize, Error> {
    let mut at = pos;
    if buf.get(at) == Some(&b'-') {
        at += 1;
    }

    let int_start = at;
    at = digits_end(buf, at);
    if at == int_start {
        return Err(number_error(buf, at));
    }
    if options.strict_numbers && buf[int_start] == b'0' && at - int_start > 1 {
        return Err(Error::malformed(int_start, SyntaxError::InvalidNumber));
    }

    if buf.get(at) == Some(&b'.') {
        let frac_start = at + 1;
        at = digits_end(buf, frac_start);
        if at == frac_start {
            return Err(number_error(buf, at));
        }
    }

    if matches!(buf.get(at), Some(b'e' | b'E')) {
        at += 1;
        if matches!(buf.get(at), Some(b'+' | b'-')) {
            at += 1;
        }
        let exp_start = at;
        at = digits_end(buf, exp_start);
        if at == exp_start {
            return Err(number_error(buf, at));
        }
    }

    Ok(at)
}

fn digits_end(buf: &[u8], mut pos: usize) -> usize {
    while buf.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    pos
}

fn number_error(buf: &[u8], at: usize) -> Error {
    if at >= buf.len() {
        Error::malformed(buf.len(), SyntaxError::UnexpectedEndOfInput)
    } else {
        Error::malformed(at, SyntaxError::InvalidNumber)
    }
}
