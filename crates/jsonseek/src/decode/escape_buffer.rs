//! Accumulator for the four hexadecimal digits of a `\uXXXX` escape.
//!
//! [`UnicodeEscapeBuffer`] folds ASCII hex digits (`0-9`, `A-F`, `a-f`) into
//! a UTF-16 code unit as they are fed and hands the unit back on the fourth
//! digit. Pairing surrogates is left to the caller, since a high surrogate is
//! only meaningful together with the escape that follows it.
//!
//! # Errors
//!
//! Feeding a byte that is not an ASCII hex digit returns
//! [`DecodeError::InvalidUnicodeEscapeChar`].

use crate::DecodeError;

#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    acc: u16,
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn hex_val(b: u8) -> Option<u16> {
        match b {
            b'0'..=b'9' => Some(u16::from(b - b'0')),
            b'a'..=b'f' => Some(u16::from(b - b'a' + 10)),
            b'A'..=b'F' => Some(u16::from(b - b'A' + 10)),
            _ => None,
        }
    }

    /// Feeds one digit.
    ///
    /// - Returns `Ok(None)` while fewer than four digits have been seen.
    /// - Returns `Ok(Some(unit))` on the fourth digit and resets.
    pub fn feed(&mut self, b: u8) -> Result<Option<u16>, DecodeError> {
        let d = Self::hex_val(b).ok_or(DecodeError::InvalidUnicodeEscapeChar(char::from(b)))?;

        self.acc = (self.acc << 4) | d;
        self.len += 1;

        if self.len < 4 {
            return Ok(None);
        }

        let unit = self.acc;
        self.acc = 0;
        self.len = 0;
        Ok(Some(unit))
    }
}
