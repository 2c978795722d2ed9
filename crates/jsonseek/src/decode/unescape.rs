//! Escape resolution over a raw string slice.
//!
//! [`Unescape`] walks the slice once and yields runs of literal bytes
//! borrowed from the input interleaved with decoded escape characters. It
//! never allocates, so the same walk serves both [`unescape`] (which
//! concatenates the fragments) and key comparison during navigation (which
//! only compares them).

use alloc::{borrow::Cow, string::String};

use bstr::ByteSlice;

use super::escape_buffer::UnicodeEscapeBuffer;
use crate::DecodeError;

/// One piece of a decoded string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment<'a> {
    /// Bytes copied verbatim from the raw slice.
    Literal(&'a [u8]),
    /// The character an escape sequence stands for.
    Char(char),
}

/// Iterator over the [`Fragment`]s of a raw string slice.
///
/// Stops after the first error; [`position`](Self::position) then reports
/// where the offending escape starts.
#[derive(Debug, Clone)]
pub struct Unescape<'a> {
    raw: &'a [u8],
    pos: usize,
    failed: bool,
}

impl<'a> Unescape<'a> {
    /// Starts decoding `raw`, the contents of a string without its quotes.
    #[must_use]
    pub fn new(raw: &'a [u8]) -> Self {
        Self {
            raw,
            pos: 0,
            failed: false,
        }
    }

    /// Offset within the raw slice of the next unread byte, or of the escape
    /// that failed to decode.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    fn escape(&mut self) -> Result<char, DecodeError> {
        let Some(&code) = self.raw.get(self.pos + 1) else {
            return Err(DecodeError::TruncatedEscape);
        };
        let ch = match code {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{8}',
            b'f' => '\u{c}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => return self.unicode_escape(),
            other => return Err(DecodeError::InvalidEscape(char::from(other))),
        };
        self.pos += 2;
        Ok(ch)
    }

    /// Reads `\uXXXX` at `pos`, leaving `pos` after it on success.
    fn code_unit(&mut self) -> Result<u16, DecodeError> {
        let mut digits = UnicodeEscapeBuffer::new();
        let mut at = self.pos + 2;
        loop {
            let &b = self.raw.get(at).ok_or(DecodeError::TruncatedEscape)?;
            at += 1;
            if let Some(unit) = digits.feed(b)? {
                self.pos = at;
                return Ok(unit);
            }
        }
    }

    fn unicode_escape(&mut self) -> Result<char, DecodeError> {
        let start = self.pos;
        let high = self.code_unit()?;
        let code = match high {
            0xD800..=0xDBFF => {
                let paired = self
                    .raw
                    .get(self.pos..)
                    .is_some_and(|rest| rest.starts_with(b"\\u"));
                let low = if paired { self.code_unit()? } else { 0 };
                if !(0xDC00..=0xDFFF).contains(&low) {
                    self.pos = start;
                    return Err(DecodeError::UnpairedSurrogate(high));
                }
                0x10000 + (((u32::from(high) - 0xD800) << 10) | (u32::from(low) - 0xDC00))
            }
            0xDC00..=0xDFFF => {
                self.pos = start;
                return Err(DecodeError::UnpairedSurrogate(high));
            }
            _ => u32::from(high),
        };
        char::from_u32(code).ok_or(DecodeError::UnpairedSurrogate(high))
    }
}

impl<'a> Iterator for Unescape<'a> {
    type Item = Result<Fragment<'a>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let rest = self.raw.get(self.pos..).filter(|rest| !rest.is_empty())?;
        if rest[0] != b'\\' {
            let run = rest.find_byte(b'\\').unwrap_or(rest.len());
            self.pos += run;
            return Some(Ok(Fragment::Literal(&rest[..run])));
        }
        match self.escape() {
            Ok(ch) => Some(Ok(Fragment::Char(ch))),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Decodes the contents of a string literal.
///
/// Returns a borrowed `str` when `raw` holds no escapes, so only strings with
/// escapes allocate.
///
/// # Errors
///
/// [`DecodeError`] on malformed escapes, unpaired surrogates or invalid
/// UTF-8.
pub fn unescape(raw: &[u8]) -> Result<Cow<'_, str>, DecodeError> {
    unescape_at(raw).map_err(|(_, e)| e)
}

/// Like [`unescape`], but reports the offset of the failure within `raw`.
pub(crate) fn unescape_at(raw: &[u8]) -> Result<Cow<'_, str>, (usize, DecodeError)> {
    if raw.find_byte(b'\\').is_none() {
        return core::str::from_utf8(raw)
            .map(Cow::Borrowed)
            .map_err(|e| (e.valid_up_to(), DecodeError::InvalidUtf8));
    }

    let mut out = String::with_capacity(raw.len());
    let mut fragments = Unescape::new(raw);
    let mut at = 0;
    while let Some(fragment) = fragments.next() {
        match fragment {
            // A backslash never occurs inside a multi-byte sequence, so each
            // literal run is valid UTF-8 on its own if the whole is.
            Ok(Fragment::Literal(bytes)) => match core::str::from_utf8(bytes) {
                Ok(s) => out.push_str(s),
                Err(e) => return Err((at + e.valid_up_to(), DecodeError::InvalidUtf8)),
            },
            Ok(Fragment::Char(ch)) => out.push(ch),
            Err(e) => return Err((fragments.position(), e)),
        }
        at = fragments.position();
    }
    Ok(Cow::Owned(out))
}

/// Compares the decoded contents of `raw` with `expected` without
/// allocating. Undecodable input never matches.
pub(crate) fn unescaped_eq(raw: &[u8], expected: &[u8]) -> bool {
    let mut rest = expected;
    for fragment in Unescape::new(raw) {
        let matched = match fragment {
            Ok(Fragment::Literal(bytes)) => rest.strip_prefix(bytes),
            Ok(Fragment::Char(ch)) => {
                let mut tmp = [0u8; 4];
                rest.strip_prefix(ch.encode_utf8(&mut tmp).as_bytes())
            }
            Err(_) => None,
        };
        match matched {
            Some(remaining) => rest = remaining,
            None => return false,
        }
    }
    rest.is_empty()
}
