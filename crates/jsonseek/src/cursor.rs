//! Walking the members of one object or array.
//!
//! A [`Cursor`] only finds where the next member starts. Bounding the member
//! itself is left to the caller, who either skips it with the scanner or
//! descends into it, and then reports back where scanning resumes.

use crate::{
    Error, ScanOptions, SyntaxError, Value,
    scanner::{self, is_whitespace, skip_whitespace},
};

#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
    close: u8,
    first: bool,
    options: ScanOptions,
}

impl<'a> Cursor<'a> {
    /// Starts after the opening delimiter at `open`, which must be `{` or
    /// `[`.
    pub fn open(buf: &'a [u8], open: usize, options: ScanOptions) -> Self {
        let close = if buf.get(open) == Some(&b'{') { b'}' } else { b']' };
        Self {
            buf,
            pos: open + 1,
            close,
            first: true,
            options,
        }
    }

    /// Moves to the start of the next member. Returns `None` once the
    /// closing delimiter has been consumed.
    pub fn next_start(&mut self) -> Result<Option<usize>, Error> {
        let buf = self.buf;
        let mut pos = skip_whitespace(buf, self.pos);

        if self.options.strict_separators {
            if !self.first {
                match buf.get(pos) {
                    Some(&b',') => {
                        pos = skip_whitespace(buf, pos + 1);
                        if buf.get(pos) == Some(&self.close) {
                            return Err(Error::malformed(pos, SyntaxError::TrailingComma));
                        }
                    }
                    Some(&b) if b == self.close => return Ok(self.finish(pos)),
                    Some(&b) => return Err(Error::malformed(pos, SyntaxError::UnexpectedByte(b))),
                    None => {}
                }
            }
        } else {
            while buf
                .get(pos)
                .is_some_and(|&b| b == b',' || is_whitespace(b))
            {
                pos += 1;
            }
        }

        match buf.get(pos) {
            Some(&b) if b == self.close => Ok(self.finish(pos)),
            Some(_) => {
                self.first = false;
                self.pos = pos;
                Ok(Some(pos))
            }
            None => Err(Error::malformed(buf.len(), SyntaxError::UnterminatedContainer)),
        }
    }

    /// Resumes scanning at `pos`, just past the member last started.
    pub fn resume_at(&mut self, pos: usize) {
        #[cfg(any(test, feature = "fuzzing"))]
        assert!(
            self.pos < pos && pos <= self.buf.len(),
            "Internal error: cursor resumed outside the unread input"
        );
        self.pos = pos;
    }

    /// Offset scanning has reached; past the closing delimiter once
    /// [`next_start`](Self::next_start) has returned `None`.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn finish(&mut self, close: usize) -> Option<usize> {
        self.pos = close + 1;
        None
    }
}

/// Reads the key of an object member starting at `pos`. Returns the key as a
/// string [`Value`] and the offset of the member's value.
pub(crate) fn member_key(buf: &[u8], pos: usize) -> Result<(Value<'_>, usize), Error> {
    match buf.get(pos) {
        Some(b'"') => {}
        Some(&b) => return Err(Error::malformed(pos, SyntaxError::UnexpectedByte(b))),
        None => return Err(Error::malformed(buf.len(), SyntaxError::UnexpectedEndOfInput)),
    }
    let close = scanner::string_end(buf, pos + 1)?;
    let key = Value::new(crate::ValueKind::String, buf, pos + 1..close, close + 1);

    let colon = skip_whitespace(buf, close + 1);
    match buf.get(colon) {
        Some(b':') => Ok((key, skip_whitespace(buf, colon + 1))),
        Some(_) => Err(Error::malformed(colon, SyntaxError::ExpectedColon)),
        None => Err(Error::malformed(buf.len(), SyntaxError::UnexpectedEndOfInput)),
    }
}
