use alloc::borrow::Cow;
use core::ops::ControlFlow;

use crate::{
    ArrayElements, Error, ObjectEntries, ScanOptions, Selector, Value, array, multi_path,
    navigator, object, scanner,
};

/// A JSON buffer bound to the options used to read it.
///
/// Every operation is a pure function of the buffer and its arguments; the
/// handle holds no state besides the two fields and is `Copy`.
///
/// ```rust
/// # use jsonseek::{path, Json, ScanOptions};
/// let doc = Json::with_options(br#"{"a": [1, 2]}"#, ScanOptions::strict());
/// assert_eq!(doc.get_i64(&path!["a", 1]), Ok(2));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Json<'a> {
    buf: &'a [u8],
    options: ScanOptions,
}

impl<'a> Json<'a> {
    /// Wraps `buf` with the default, lenient options.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_options(buf, ScanOptions::default())
    }

    /// Wraps `buf` with explicit options.
    #[must_use]
    pub fn with_options(buf: &'a [u8], options: ScanOptions) -> Self {
        Self { buf, options }
    }

    /// The wrapped buffer.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.buf
    }

    /// The options in effect.
    #[must_use]
    pub fn options(&self) -> ScanOptions {
        self.options
    }

    /// Classifies and bounds the value at or after `offset`.
    ///
    /// # Errors
    ///
    /// [`Error::Malformed`] if no value can be bounded there.
    pub fn locate(&self, offset: usize) -> Result<Value<'a>, Error> {
        scanner::locate(self.buf, offset, self.options)
    }

    /// Looks up the value at `path`. An empty path returns the first value
    /// in the buffer.
    ///
    /// # Errors
    ///
    /// [`Error::NotExist`] if a key or index is absent,
    /// [`Error::TypeMismatch`] if the path continues past a scalar, and
    /// [`Error::Malformed`] if the input is broken on the way.
    pub fn get(&self, path: &[Selector<'_>]) -> Result<Value<'a>, Error> {
        navigator::lookup(self.buf, 0, path, self.options)
    }

    /// Looks up a boolean.
    ///
    /// # Errors
    ///
    /// As [`get`](Self::get), plus [`Error::TypeMismatch`] for other kinds.
    pub fn get_bool(&self, path: &[Selector<'_>]) -> Result<bool, Error> {
        self.get(path)?.as_bool()
    }

    /// Looks up a number as a 64-bit float.
    ///
    /// # Errors
    ///
    /// As [`get`](Self::get), plus [`Error::TypeMismatch`] for other kinds.
    pub fn get_f64(&self, path: &[Selector<'_>]) -> Result<f64, Error> {
        self.get(path)?.as_f64()
    }

    /// Looks up an integral number.
    ///
    /// # Errors
    ///
    /// As [`get`](Self::get), plus [`Error::TypeMismatch`] for other kinds
    /// and [`Error::Decode`] for fractions and out of range integers.
    pub fn get_i64(&self, path: &[Selector<'_>]) -> Result<i64, Error> {
        self.get(path)?.as_i64()
    }

    /// Looks up a string and resolves its escapes.
    ///
    /// # Errors
    ///
    /// As [`get`](Self::get), plus [`Error::TypeMismatch`] for other kinds
    /// and [`Error::Decode`] for bad escapes.
    pub fn get_str(&self, path: &[Selector<'_>]) -> Result<Cow<'a, str>, Error> {
        self.get(path)?.as_str()
    }

    /// Looks up a string without decoding it.
    ///
    /// # Errors
    ///
    /// As [`get`](Self::get), plus [`Error::TypeMismatch`] for other kinds.
    pub fn get_raw_str(&self, path: &[Selector<'_>]) -> Result<&'a [u8], Error> {
        self.get(path)?.as_raw_str()
    }

    /// Iterates the elements of the array at `path`.
    ///
    /// # Errors
    ///
    /// As [`get`](Self::get), plus [`Error::TypeMismatch`] if the value is
    /// not an array.
    pub fn elements(&self, path: &[Selector<'_>]) -> Result<ArrayElements<'a>, Error> {
        let pos = navigator::resolve(self.buf, 0, path, self.options)?;
        ArrayElements::at(self.buf, pos, self.options)
    }

    /// Iterates the members of the object at `path`.
    ///
    /// # Errors
    ///
    /// As [`get`](Self::get), plus [`Error::TypeMismatch`] if the value is
    /// not an object.
    pub fn entries(&self, path: &[Selector<'_>]) -> Result<ObjectEntries<'a>, Error> {
        let pos = navigator::resolve(self.buf, 0, path, self.options)?;
        ObjectEntries::at(self.buf, pos, self.options)
    }

    /// Visits every element of the array at `path` with its index.
    ///
    /// A malformed element is passed to `visit` as an error, after which
    /// iteration stops and the same error is returned. Returning
    /// [`ControlFlow::Break`] from `visit` stops early without error.
    ///
    /// # Errors
    ///
    /// As [`elements`](Self::elements), plus the first malformed element.
    pub fn for_each_array_element<F>(&self, path: &[Selector<'_>], visit: F) -> Result<(), Error>
    where
        F: FnMut(usize, Result<Value<'a>, Error>) -> ControlFlow<()>,
    {
        array::for_each(self.elements(path)?, visit)
    }

    /// Visits every member of the object at `path`. Keys are passed as
    /// undecoded string values.
    ///
    /// # Errors
    ///
    /// As [`entries`](Self::entries), plus the first malformed member.
    pub fn for_each_object_entry<F>(&self, path: &[Selector<'_>], visit: F) -> Result<(), Error>
    where
        F: FnMut(Value<'a>, Value<'a>) -> ControlFlow<()>,
    {
        object::for_each(self.entries(path)?, visit)
    }

    /// Resolves several paths in a single walk over the document. `visit`
    /// receives the index into `paths` and the value of each path that
    /// exists, in document order. Absent paths are not reported.
    ///
    /// # Errors
    ///
    /// [`Error::Malformed`] if the input is broken in the region walked.
    pub fn for_each_path<F>(&self, paths: &[&[Selector<'_>]], visit: F) -> Result<(), Error>
    where
        F: FnMut(usize, Value<'a>) -> ControlFlow<()>,
    {
        multi_path::for_each_path(self.buf, paths, self.options, visit)
    }
}

/// Classifies and bounds the value at or after `offset`.
///
/// # Errors
///
/// See [`Json::locate`].
pub fn locate_value(buf: &[u8], offset: usize) -> Result<Value<'_>, Error> {
    Json::new(buf).locate(offset)
}

/// Looks up the value at `path`.
///
/// ```rust
/// # use jsonseek::{get, path, Error, ValueKind};
/// let buf = br#"{"a":1,"b":{"c":2}}"#;
/// let value = get(buf, &path!["b", "c"]).unwrap();
/// assert_eq!(value.kind(), ValueKind::Number);
/// assert_eq!(value.as_f64(), Ok(2.0));
/// assert_eq!(get(buf, &path!["z"]), Err(Error::NotExist));
/// ```
///
/// # Errors
///
/// See [`Json::get`].
pub fn get<'a>(buf: &'a [u8], path: &[Selector<'_>]) -> Result<Value<'a>, Error> {
    Json::new(buf).get(path)
}

/// Looks up a boolean.
///
/// # Errors
///
/// See [`Json::get_bool`].
pub fn get_bool(buf: &[u8], path: &[Selector<'_>]) -> Result<bool, Error> {
    Json::new(buf).get_bool(path)
}

/// Looks up a number as a 64-bit float.
///
/// # Errors
///
/// See [`Json::get_f64`].
pub fn get_f64(buf: &[u8], path: &[Selector<'_>]) -> Result<f64, Error> {
    Json::new(buf).get_f64(path)
}

/// Looks up an integral number.
///
/// # Errors
///
/// See [`Json::get_i64`].
pub fn get_i64(buf: &[u8], path: &[Selector<'_>]) -> Result<i64, Error> {
    Json::new(buf).get_i64(path)
}

/// Looks up a string and resolves its escapes.
///
/// ```rust
/// # use jsonseek::{get_str, path};
/// let buf = br#"{"s":"he said \"hi\""}"#;
/// assert_eq!(get_str(buf, &path!["s"]).unwrap(), r#"he said "hi""#);
/// ```
///
/// # Errors
///
/// See [`Json::get_str`].
pub fn get_str<'a>(buf: &'a [u8], path: &[Selector<'_>]) -> Result<Cow<'a, str>, Error> {
    Json::new(buf).get_str(path)
}

/// Looks up a string without decoding it.
///
/// # Errors
///
/// See [`Json::get_raw_str`].
pub fn get_raw_str<'a>(buf: &'a [u8], path: &[Selector<'_>]) -> Result<&'a [u8], Error> {
    Json::new(buf).get_raw_str(path)
}

/// Visits every element of the array at `path` with its index.
///
/// ```rust
/// # use core::ops::ControlFlow;
/// # use jsonseek::for_each_array_element;
/// let mut seen = vec![];
/// for_each_array_element(b"[1,2,3]", &[], |index, element| {
///     seen.push((index, element.unwrap().as_i64().unwrap()));
///     ControlFlow::Continue(())
/// })
/// .unwrap();
/// assert_eq!(seen, [(0, 1), (1, 2), (2, 3)]);
/// ```
///
/// # Errors
///
/// See [`Json::for_each_array_element`].
pub fn for_each_array_element<'a, F>(
    buf: &'a [u8],
    path: &[Selector<'_>],
    visit: F,
) -> Result<(), Error>
where
    F: FnMut(usize, Result<Value<'a>, Error>) -> ControlFlow<()>,
{
    Json::new(buf).for_each_array_element(path, visit)
}

/// Visits every member of the object at `path`.
///
/// # Errors
///
/// See [`Json::for_each_object_entry`].
pub fn for_each_object_entry<'a, F>(
    buf: &'a [u8],
    path: &[Selector<'_>],
    visit: F,
) -> Result<(), Error>
where
    F: FnMut(Value<'a>, Value<'a>) -> ControlFlow<()>,
{
    Json::new(buf).for_each_object_entry(path, visit)
}

/// Resolves several paths in a single walk over the document.
///
/// # Errors
///
/// See [`Json::for_each_path`].
pub fn for_each_path<'a, F>(buf: &'a [u8], paths: &[&[Selector<'_>]], visit: F) -> Result<(), Error>
where
    F: FnMut(usize, Value<'a>) -> ControlFlow<()>,
{
    Json::new(buf).for_each_path(paths, visit)
}
