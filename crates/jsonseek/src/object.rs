use core::ops::ControlFlow;

use crate::{
    Error, ScanOptions, SyntaxError, Value, ValueKind,
    cursor::{Cursor, member_key},
    scanner,
    scanner::skip_whitespace,
};

/// Iterator over the members of an object, in source order.
///
/// Each item pairs the key, as a still escaped string [`Value`], with the
/// member's value. Like [`ArrayElements`](crate::ArrayElements), iteration
/// ends after the first malformed member.
#[derive(Debug, Clone)]
pub struct ObjectEntries<'a> {
    buf: &'a [u8],
    cursor: Cursor<'a>,
    options: ScanOptions,
    finished: bool,
}

impl<'a> ObjectEntries<'a> {
    /// Iterates the object that `buf` starts with (after whitespace).
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] if the first value is not an object.
    pub fn new(buf: &'a [u8], options: ScanOptions) -> Result<Self, Error> {
        Self::at(buf, 0, options)
    }

    /// Iterates the members of a located object.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] if `value` is not an object.
    pub fn of(value: &Value<'a>, options: ScanOptions) -> Result<Self, Error> {
        if value.kind() != ValueKind::Object {
            return Err(Error::mismatch(ValueKind::Object, value.kind(), value.start()));
        }
        Ok(Self::opened(value.buffer(), value.start(), options))
    }

    pub(crate) fn at(buf: &'a [u8], offset: usize, options: ScanOptions) -> Result<Self, Error> {
        let pos = skip_whitespace(buf, offset);
        match buf.get(pos) {
            Some(b'{') => Ok(Self::opened(buf, pos, options)),
            Some(_) => {
                let found = scanner::locate(buf, pos, options)?;
                Err(Error::mismatch(ValueKind::Object, found.kind(), found.start()))
            }
            None => Err(Error::malformed(buf.len(), SyntaxError::UnexpectedEndOfInput)),
        }
    }

    fn opened(buf: &'a [u8], open: usize, options: ScanOptions) -> Self {
        Self {
            buf,
            cursor: Cursor::open(buf, open, options),
            options,
            finished: false,
        }
    }

    fn step(&mut self) -> Result<Option<(Value<'a>, Value<'a>)>, Error> {
        let Some(pos) = self.cursor.next_start()? else {
            return Ok(None);
        };
        let (key, value_at) = member_key(self.buf, pos)?;
        let value = scanner::locate(self.buf, value_at, self.options)?;
        self.cursor.resume_at(value.end());
        Ok(Some((key, value)))
    }
}

impl<'a> Iterator for ObjectEntries<'a> {
    type Item = Result<(Value<'a>, Value<'a>), Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let item = self.step().transpose();
        if !matches!(item, Some(Ok(_))) {
            self.finished = true;
        }
        item
    }
}

impl core::iter::FusedIterator for ObjectEntries<'_> {}

/// Feeds every member to `visit` until the object ends or `visit` breaks.
/// A malformed member ends the walk with its error.
pub(crate) fn for_each<'a, F>(entries: ObjectEntries<'a>, mut visit: F) -> Result<(), Error>
where
    F: FnMut(Value<'a>, Value<'a>) -> ControlFlow<()>,
{
    for entry in entries {
        let (key, value) = entry?;
        if visit(key, value).is_break() {
            break;
        }
    }
    Ok(())
}
