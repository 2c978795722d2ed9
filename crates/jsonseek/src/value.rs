use alloc::borrow::Cow;
use core::{fmt, ops::Range};

use bstr::BStr;

use crate::{Error, decode};

/// The type of a located value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// No value at the requested path.
    NotExist,
    /// A string literal.
    String,
    /// A number literal.
    Number,
    /// An object, `{...}`.
    Object,
    /// An array, `[...]`.
    Array,
    /// `true` or `false`.
    Boolean,
    /// `null`.
    Null,
    /// Input that could not be classified.
    Unknown,
}

impl ValueKind {
    /// Lowercase name of the kind, as used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotExist => "non-existent",
            Self::String => "string",
            Self::Number => "number",
            Self::Object => "object",
            Self::Array => "array",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Unknown => "unknown",
        }
    }

    /// Returns `true` for objects and arrays.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Object | Self::Array)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value located inside a buffer, without any decoding.
///
/// The raw slice of a string excludes its quotes and still holds its escape
/// sequences. Objects and arrays keep their delimiters. Offsets are relative
/// to the start of the buffer the value was located in.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Value<'a> {
    kind: ValueKind,
    buf: &'a [u8],
    raw_start: usize,
    raw_end: usize,
    end: usize,
}

impl<'a> Value<'a> {
    pub(crate) fn new(kind: ValueKind, buf: &'a [u8], raw: Range<usize>, end: usize) -> Self {
        debug_assert!(raw.start <= raw.end && raw.end <= end && end <= buf.len());
        Self {
            kind,
            buf,
            raw_start: raw.start,
            raw_end: raw.end,
            end,
        }
    }

    /// The kind determined by the scanner.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// The raw bytes of the value, borrowed from the buffer.
    #[must_use]
    pub fn raw(&self) -> &'a [u8] {
        &self.buf[self.raw_start..self.raw_end]
    }

    /// Offset of the first raw byte.
    #[must_use]
    pub fn start(&self) -> usize {
        self.raw_start
    }

    /// Offset just past the value, including a closing quote or delimiter.
    /// Scanning for the next sibling resumes here.
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Byte range of [`raw`](Self::raw) within the buffer.
    #[must_use]
    pub fn raw_range(&self) -> Range<usize> {
        self.raw_start..self.raw_end
    }

    pub(crate) fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    /// Returns `true` for `null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.kind == ValueKind::Null
    }

    /// Decodes `true` or `false`.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] for any other kind.
    pub fn as_bool(&self) -> Result<bool, Error> {
        self.expect(ValueKind::Boolean)?;
        decode::decode_bool(self.raw())
            .ok_or_else(|| Error::mismatch(ValueKind::Boolean, self.kind, self.start()))
    }

    /// Decodes a number as a 64-bit float.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] for non-numbers, [`Error::Decode`] if the
    /// slice does not parse.
    pub fn as_f64(&self) -> Result<f64, Error> {
        self.expect(ValueKind::Number)?;
        decode::decode_f64(self.raw()).map_err(|reason| Error::decode(self.start(), reason))
    }

    /// Decodes a number without fraction or exponent as a 64-bit integer.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] for non-numbers, [`Error::Decode`] for
    /// fractional numbers and integers outside the `i64` range.
    pub fn as_i64(&self) -> Result<i64, Error> {
        self.expect(ValueKind::Number)?;
        decode::decode_i64(self.raw()).map_err(|reason| Error::decode(self.start(), reason))
    }

    /// Decodes a string, resolving escape sequences.
    ///
    /// Borrows from the buffer when the string contains no escapes; only
    /// strings with escapes allocate.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] for non-strings, [`Error::Decode`] for bad
    /// escapes and invalid UTF-8.
    pub fn as_str(&self) -> Result<Cow<'a, str>, Error> {
        self.expect(ValueKind::String)?;
        decode::decode_str(self.raw(), self.start())
    }

    /// The raw, still escaped, contents of a string.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] for non-strings.
    pub fn as_raw_str(&self) -> Result<&'a [u8], Error> {
        self.expect(ValueKind::String)?;
        Ok(self.raw())
    }

    fn expect(&self, kind: ValueKind) -> Result<(), Error> {
        if self.kind == kind {
            Ok(())
        } else {
            Err(Error::mismatch(kind, self.kind, self.start()))
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("kind", &self.kind)
            .field("raw", &BStr::new(self.raw()))
            .field("start", &self.raw_start)
            .field("end", &self.end)
            .finish()
    }
}

#[cfg(any(test, feature = "serde"))]
mod serde_impls {
    use serde::{Serialize, Serializer};

    use super::ValueKind;

    impl Serialize for ValueKind {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.as_str())
        }
    }
}
