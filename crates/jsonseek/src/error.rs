use thiserror::Error;

use crate::value::ValueKind;

/// Failure of a lookup, scan or decode.
///
/// Offsets are absolute positions within the buffer handed to the public
/// call that produced the error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested key or index is absent. Not fatal: optional fields are
    /// commonly looked up this way.
    #[error("key path not found")]
    NotExist,
    /// A typed accessor or a path step met a value of another kind.
    #[error("expected {expected}, found {found} at byte {offset}")]
    TypeMismatch {
        /// Kind the caller asked for.
        expected: ValueKind,
        /// Kind the scanner determined.
        found: ValueKind,
        /// Start of the offending value.
        offset: usize,
    },
    /// The scanner could not classify or bound a value.
    #[error("malformed json at byte {offset}: {reason}")]
    Malformed {
        /// Position of the offending byte, or the buffer length on early end.
        offset: usize,
        /// What went wrong.
        reason: SyntaxError,
    },
    /// A literal the scanner accepted failed to decode.
    #[error("cannot decode value at byte {offset}: {reason}")]
    Decode {
        /// Position of the offending escape or literal.
        offset: usize,
        /// What went wrong.
        reason: DecodeError,
    },
}

/// Reasons the scanner rejects its input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    /// The buffer ended where a value or delimiter was required.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// A byte that cannot start or continue a value here.
    #[error("unexpected byte 0x{0:02x}")]
    UnexpectedByte(u8),
    /// The buffer ended before the closing quote.
    #[error("unterminated string")]
    UnterminatedString,
    /// The buffer ended before the nesting depth returned to zero.
    #[error("unterminated object or array")]
    UnterminatedContainer,
    /// A closing delimiter of the wrong type.
    #[error("'{closer}' does not close '{opener}'", closer = char::from(*.found), opener = char::from(*.open))]
    MismatchedDelimiter {
        /// Delimiter that opened the innermost container.
        open: u8,
        /// Delimiter that tried to close it.
        found: u8,
    },
    /// Something other than `true`, `false` or `null`.
    #[error("invalid literal")]
    InvalidLiteral,
    /// A number that does not follow the number grammar.
    #[error("invalid number")]
    InvalidNumber,
    /// An object key not followed by `:`.
    #[error("expected ':' after object key")]
    ExpectedColon,
    /// A comma directly before a closing delimiter (strict separators only).
    #[error("trailing comma")]
    TrailingComma,
}

/// Reasons a located literal cannot be turned into a native value.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A backslash followed by a byte that is not a JSON escape.
    #[error("invalid escape character '{0}'")]
    InvalidEscape(char),
    /// A `\u` escape with a non-hexadecimal digit.
    #[error("invalid unicode escape sequence at character: '{0}'")]
    InvalidUnicodeEscapeChar(char),
    /// A UTF-16 surrogate escape without its partner.
    #[error("unpaired surrogate \\u{0:04X}")]
    UnpairedSurrogate(u16),
    /// The raw slice ended inside an escape sequence.
    #[error("escape sequence cut short")]
    TruncatedEscape,
    /// The string bytes are not UTF-8.
    #[error("invalid utf-8")]
    InvalidUtf8,
    /// The number slice is not a number.
    #[error("invalid number")]
    InvalidNumber,
    /// An integer was requested from a number with a fraction or exponent.
    #[error("number is not an integer")]
    NotAnInteger,
    /// The integer does not fit in 64 bits.
    #[error("integer out of range")]
    IntegerOverflow,
}

impl Error {
    pub(crate) fn malformed(offset: usize, reason: SyntaxError) -> Self {
        tracing::trace!(offset, %reason, "malformed json");
        Self::Malformed { offset, reason }
    }

    pub(crate) fn decode(offset: usize, reason: DecodeError) -> Self {
        tracing::trace!(offset, %reason, "undecodable literal");
        Self::Decode { offset, reason }
    }

    pub(crate) fn mismatch(expected: ValueKind, found: ValueKind, offset: usize) -> Self {
        Self::TypeMismatch {
            expected,
            found,
            offset,
        }
    }

    /// Returns `true` for [`Error::NotExist`].
    #[must_use]
    pub fn is_not_exist(&self) -> bool {
        matches!(self, Self::NotExist)
    }

    /// The kind a lookup reports alongside this error: [`ValueKind::NotExist`]
    /// when the path could not be followed, [`ValueKind::Unknown`] when the
    /// input itself is broken.
    #[must_use]
    pub fn value_kind(&self) -> ValueKind {
        match self {
            Self::NotExist | Self::TypeMismatch { .. } => ValueKind::NotExist,
            Self::Malformed { .. } | Self::Decode { .. } => ValueKind::Unknown,
        }
    }
}
