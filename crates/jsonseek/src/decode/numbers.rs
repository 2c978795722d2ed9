use core::num::IntErrorKind;

use crate::DecodeError;

/// Lexical hint so integer accessors can refuse fractions early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberLexeme<'a> {
    Integer(&'a str), // no '.' and no exponent
    Float(&'a str),   // has '.' or exponent
}

impl<'a> NumberLexeme<'a> {
    pub fn classify(raw: &'a [u8]) -> Result<Self, DecodeError> {
        let text = core::str::from_utf8(raw).map_err(|_| DecodeError::InvalidNumber)?;
        if raw.iter().any(|b| matches!(b, b'.' | b'e' | b'E')) {
            Ok(Self::Float(text))
        } else {
            Ok(Self::Integer(text))
        }
    }

    fn text(self) -> &'a str {
        match self {
            Self::Integer(text) | Self::Float(text) => text,
        }
    }
}

pub(crate) fn decode_f64(raw: &[u8]) -> Result<f64, DecodeError> {
    let lexeme = NumberLexeme::classify(raw)?;
    let text = lexeme.text();
    // `f64::from_str` also takes "inf", "NaN" and a leading '+'.
    let digits = text.strip_prefix('-').unwrap_or(text);
    if !digits.bytes().next().is_some_and(|b| b.is_ascii_digit()) {
        return Err(DecodeError::InvalidNumber);
    }
    text.parse::<f64>().map_err(|_| DecodeError::InvalidNumber)
}

pub(crate) fn decode_i64(raw: &[u8]) -> Result<i64, DecodeError> {
    match NumberLexeme::classify(raw)? {
        NumberLexeme::Float(_) => Err(DecodeError::NotAnInteger),
        NumberLexeme::Integer(text) => {
            if text.starts_with('+') {
                return Err(DecodeError::InvalidNumber);
            }
            text.parse::<i64>().map_err(|e| match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                    DecodeError::IntegerOverflow
                }
                _ => DecodeError::InvalidNumber,
            })
        }
    }
}
