//! Zero-copy extraction of individual values from JSON byte buffers.
//!
//! Nothing is parsed into a tree. A lookup walks the path of keys and indices
//! it was given, skips every sibling it passes by bounding it with a byte
//! level scanner, and returns the matching region of the buffer as a
//! [`Value`]. Decoding into native types happens only when asked for, on
//! that one value.
//!
//! ```rust
//! # use jsonseek::{get, get_str, path, ValueKind};
//! let buf = br#"{"user": {"name": "Ada", "langs": ["en", "fr"]}}"#;
//! let langs = get(buf, &path!["user", "langs"]).unwrap();
//! assert_eq!(langs.kind(), ValueKind::Array);
//! assert_eq!(langs.raw(), br#"["en", "fr"]"#);
//! assert_eq!(get_str(buf, &path!["user", "langs", 1]).unwrap(), "fr");
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod cursor;
mod navigator;
mod scanner;

mod array;
mod decode;
mod error;
mod json;
mod multi_path;
mod object;
mod options;
mod path;
mod value;

#[cfg(test)]
mod tests;

pub use array::ArrayElements;
pub use decode::{Fragment, Unescape, unescape};
pub use error::{DecodeError, Error, SyntaxError};
pub use json::{
    Json, for_each_array_element, for_each_object_entry, for_each_path, get, get_bool, get_f64,
    get_i64, get_raw_str, get_str, locate_value,
};
pub use object::ObjectEntries;
pub use options::ScanOptions;
pub use path::{Selector, SelectorFrom};
pub use value::{Value, ValueKind};

#[doc(hidden)]
pub use alloc::vec;

/// Macro to build a `Vec<Selector>` from a heterogeneous list of keys and
/// indices.
///
/// ```rust
/// extern crate alloc;
/// # use jsonseek::{path, Selector};
/// let p = path![0, "foo", 2];
/// assert_eq!(
///     p,
///     vec![
///         Selector::Index(0),
///         Selector::Key("foo".into()),
///         Selector::Index(2)
///     ]
/// );
/// ```
#[macro_export]
macro_rules! path {
    ( $( $elem:expr ),* $(,)? ) => {{
        use $crate::SelectorFrom;
        $crate::vec![$($crate::Selector::from_selector($elem)),*]
    }};
}
