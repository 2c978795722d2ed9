use core::ops::ControlFlow;

use crate::{
    Error, ScanOptions, SyntaxError, Value, ValueKind, cursor::Cursor, scanner,
    scanner::skip_whitespace,
};

/// Iterator over the elements of an array, in source order.
///
/// Each element is bounded by the scanner and handed out undecoded. The
/// first malformed element is yielded as an error and ends the iteration;
/// there is no attempt to find the next element after it.
#[derive(Debug, Clone)]
pub struct ArrayElements<'a> {
    buf: &'a [u8],
    cursor: Cursor<'a>,
    options: ScanOptions,
    index: usize,
    finished: bool,
}

impl<'a> ArrayElements<'a> {
    /// Iterates the array that `buf` starts with (after whitespace).
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] if the first value is not an array.
    pub fn new(buf: &'a [u8], options: ScanOptions) -> Result<Self, Error> {
        Self::at(buf, 0, options)
    }

    /// Iterates the elements of a located array.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] if `value` is not an array.
    pub fn of(value: &Value<'a>, options: ScanOptions) -> Result<Self, Error> {
        if value.kind() != ValueKind::Array {
            return Err(Error::mismatch(ValueKind::Array, value.kind(), value.start()));
        }
        Ok(Self::opened(value.buffer(), value.start(), options))
    }

    pub(crate) fn at(buf: &'a [u8], offset: usize, options: ScanOptions) -> Result<Self, Error> {
        let pos = skip_whitespace(buf, offset);
        match buf.get(pos) {
            Some(b'[') => Ok(Self::opened(buf, pos, options)),
            Some(_) => {
                let found = scanner::locate(buf, pos, options)?;
                Err(Error::mismatch(ValueKind::Array, found.kind(), found.start()))
            }
            None => Err(Error::malformed(buf.len(), SyntaxError::UnexpectedEndOfInput)),
        }
    }

    fn opened(buf: &'a [u8], open: usize, options: ScanOptions) -> Self {
        Self {
            buf,
            cursor: Cursor::open(buf, open, options),
            options,
            index: 0,
            finished: false,
        }
    }

    /// Index the next element will have.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    fn step(&mut self) -> Result<Option<Value<'a>>, Error> {
        let Some(pos) = self.cursor.next_start()? else {
            return Ok(None);
        };
        let value = scanner::locate(self.buf, pos, self.options)?;
        self.cursor.resume_at(value.end());
        Ok(Some(value))
    }
}

impl<'a> Iterator for ArrayElements<'a> {
    type Item = Result<Value<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.step() {
            Ok(Some(value)) => {
                self.index += 1;
                Some(Ok(value))
            }
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl core::iter::FusedIterator for ArrayElements<'_> {}

/// Feeds every element to `visit` with its index until the array ends,
/// `visit` breaks, or an element is malformed. A malformed element is
/// reported to `visit` and then returned, even if `visit` breaks on it.
pub(crate) fn for_each<'a, F>(elements: ArrayElements<'a>, mut visit: F) -> Result<(), Error>
where
    F: FnMut(usize, Result<Value<'a>, Error>) -> ControlFlow<()>,
{
    for (index, element) in elements.enumerate() {
        let failed = element.err();
        let flow = visit(index, element);
        if let Some(e) = failed {
            return Err(e);
        }
        if flow.is_break() {
            return Ok(());
        }
    }
    Ok(())
}
