//! Literal decoders: turn a located slice into a native value on demand.
//!
//! Nothing here runs while navigating; skipped siblings are only bounded,
//! never decoded.

mod escape_buffer;
mod numbers;
mod unescape;

use alloc::borrow::Cow;

pub(crate) use numbers::{decode_f64, decode_i64};
pub(crate) use unescape::unescaped_eq;
pub use unescape::{Fragment, Unescape, unescape};

use crate::Error;

pub(crate) fn decode_bool(raw: &[u8]) -> Option<bool> {
    match raw {
        b"true" => Some(true),
        b"false" => Some(false),
        _ => None,
    }
}

/// Decodes a raw string slice that starts at `offset` in its buffer.
pub(crate) fn decode_str(raw: &[u8], offset: usize) -> Result<Cow<'_, str>, Error> {
    unescape::unescape_at(raw).map_err(|(at, reason)| Error::decode(offset + at, reason))
}
