//! Path navigator: resolves a sequence of selectors against nested objects
//! and arrays.
//!
//! Navigation never bounds the container it is descending into. At each
//! level the cursor walks members from the opening delimiter, skipping
//! non-matching siblings with the scanner, and descends straight into the
//! matching member. Only the value at the end of the path is located, so the
//! cost of a lookup is the size of the traversed prefix.

use crate::{
    Error, ScanOptions, Selector, SyntaxError, Value,
    cursor::{Cursor, member_key},
    decode, scanner,
    scanner::skip_whitespace,
};

/// Resolves `path` starting at the value at or after `offset`.
pub(crate) fn lookup<'a>(
    buf: &'a [u8],
    offset: usize,
    path: &[Selector<'_>],
    options: ScanOptions,
) -> Result<Value<'a>, Error> {
    let pos = resolve(buf, offset, path, options)?;
    scanner::locate(buf, pos, options)
}

/// Like [`lookup`], but stops at the offset of the selected value without
/// bounding it.
pub(crate) fn resolve(
    buf: &[u8],
    offset: usize,
    path: &[Selector<'_>],
    options: ScanOptions,
) -> Result<usize, Error> {
    let mut pos = offset;
    for selector in path {
        pos = skip_whitespace(buf, pos);
        pos = match buf.get(pos) {
            Some(b'{') => find_member(buf, pos, selector, options)?,
            Some(b'[') => find_element(buf, pos, selector, options)?,
            Some(_) => {
                let found = scanner::locate(buf, pos, options)?;
                return Err(Error::mismatch(
                    selector.container_kind(),
                    found.kind(),
                    found.start(),
                ));
            }
            None => return Err(Error::malformed(buf.len(), SyntaxError::UnexpectedEndOfInput)),
        };
    }
    Ok(pos)
}

/// Returns the offset of the value of the member named by `selector` in the
/// object opening at `open`. The first of several equal keys wins.
fn find_member(
    buf: &[u8],
    open: usize,
    selector: &Selector<'_>,
    options: ScanOptions,
) -> Result<usize, Error> {
    let Some(key) = selector.as_key() else {
        return Err(Error::NotExist);
    };
    let mut cursor = Cursor::open(buf, open, options);
    while let Some(pos) = cursor.next_start()? {
        let (name, value_at) = member_key(buf, pos)?;
        if key_matches(name.raw(), key) {
            return Ok(value_at);
        }
        let skipped = scanner::locate(buf, value_at, options)?;
        cursor.resume_at(skipped.end());
    }
    Err(Error::NotExist)
}

/// Returns the offset of the element selected by `selector` in the array
/// opening at `open`.
fn find_element(
    buf: &[u8],
    open: usize,
    selector: &Selector<'_>,
    options: ScanOptions,
) -> Result<usize, Error> {
    let Some(target) = selector.as_index() else {
        return Err(Error::NotExist);
    };
    let mut cursor = Cursor::open(buf, open, options);
    let mut index = 0;
    while let Some(pos) = cursor.next_start()? {
        if index == target {
            return Ok(pos);
        }
        let skipped = scanner::locate(buf, pos, options)?;
        cursor.resume_at(skipped.end());
        index += 1;
    }
    Err(Error::NotExist)
}

/// Compares a raw key with a selector key. Escaped keys are compared
/// fragment by fragment without decoding them into a buffer.
pub(crate) fn key_matches(raw: &[u8], key: &str) -> bool {
    if raw.contains(&b'\\') {
        decode::unescaped_eq(raw, key.as_bytes())
    } else {
        raw == key.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use rstest::rstest;

    use super::*;
    use crate::{ValueKind, path};

    fn get<'a>(buf: &'a [u8], path: &[Selector<'_>]) -> Result<Value<'a>, Error> {
        lookup(buf, 0, path, ScanOptions::default())
    }

    #[rstest]
    #[case(br#"{"a":1,"b":{"c":2}}"#, path!["b", "c"], &b"2"[..])]
    #[case(br#"{"a":1,"b":{"c":2}}"#, path!["b"], &br#"{"c":2}"#[..])]
    #[case(br#" { "a" : [ 10 , { "x" : "y" } ] } "#, path!["a", 1, "x"], &b"y"[..])]
    #[case(br#"[[1, 2], [3, 4]]"#, path![1, 0], &b"3"[..])]
    #[case(br#"[[1, 2], [3, 4]]"#, path!["1", "[1]"], &b"4"[..])]
    #[case(br#"{"ab": true}"#, path!["ab"], &b"true"[..])]
    #[case(br#"{"k": 1, "k": 2}"#, path!["k"], &b"1"[..])]
    #[case(br#"{"0": "zero"}"#, path!["0"], &b"zero"[..])]
    #[case(br#"{"a": 1,, "b": 2,}"#, path!["b"], &b"2"[..])]
    fn resolves_paths(#[case] buf: &[u8], #[case] path: Vec<Selector>, #[case] raw: &[u8]) {
        assert_eq!(get(buf, &path).unwrap().raw(), raw);
    }

    #[rstest]
    #[case(br#"{"a":1}"#, path!["z"])]
    #[case(br#"{}"#, path!["z"])]
    #[case(br#"[1, 2]"#, path![2])]
    #[case(br#"[1, 2]"#, path!["x"])]
    #[case(br#"{"1": 2}"#, path![1])]
    #[case(br#"{"a": {"b": 1}}"#, path!["a", "c"])]
    fn absent_paths_do_not_exist(#[case] buf: &[u8], #[case] path: Vec<Selector>) {
        assert_eq!(get(buf, &path), Err(Error::NotExist));
    }

    #[test]
    fn empty_path_locates_closest_value() {
        let value = get(b"  [1] [2]", &[]).unwrap();
        assert_eq!(value.raw(), b"[1]");
        assert_eq!(value.end(), 5);
    }

    #[test]
    fn path_past_a_scalar_is_a_mismatch() {
        let err = get(br#"{"a": "text"}"#, &path!["a", "b"]).unwrap_err();
        assert_eq!(
            err,
            Error::TypeMismatch {
                expected: ValueKind::Object,
                found: ValueKind::String,
                offset: 7
            }
        );
        assert_eq!(err.value_kind(), ValueKind::NotExist);

        assert!(matches!(
            get(b"[true]", &path![0, 0]),
            Err(Error::TypeMismatch {
                expected: ValueKind::Array,
                found: ValueKind::Boolean,
                ..
            })
        ));
    }

    #[test]
    fn malformed_member_is_reported() {
        assert_eq!(
            get(br#"{"bad": [1, }"#, &path!["bad"]),
            Err(Error::Malformed {
                offset: 12,
                reason: SyntaxError::MismatchedDelimiter {
                    open: b'[',
                    found: b'}'
                }
            })
        );
        assert_eq!(
            get(br#"{"a" 1}"#, &path!["b"]),
            Err(Error::Malformed {
                offset: 5,
                reason: SyntaxError::ExpectedColon
            })
        );
        assert_eq!(
            get(br#"{"a": 1"#, &path!["b"]),
            Err(Error::Malformed {
                offset: 7,
                reason: SyntaxError::UnterminatedContainer
            })
        );
    }

    #[test]
    fn stops_reading_after_the_match() {
        // Everything after the matched member is garbage.
        let buf = br#"{"a": "\uZZZZ", "b": 7, "c": ]]]"#;
        assert_eq!(get(buf, &path!["b"]).unwrap().as_i64(), Ok(7));

        // The enclosing containers are never bounded.
        let buf = br#"{"outer": {"inner": [0, 1], "#;
        assert_eq!(get(buf, &path!["outer", "inner", 1]).unwrap().raw(), b"1");
    }

    #[test]
    fn honours_strict_separators() {
        let buf = br#"{"a": 1,, "b": 2}"#;
        assert_eq!(
            lookup(buf, 0, &path!["b"], ScanOptions::strict()),
            Err(Error::Malformed {
                offset: 8,
                reason: SyntaxError::UnexpectedByte(b',')
            })
        );
    }

    #[test]
    fn compares_escaped_keys() {
        assert!(key_matches(b"plain", "plain"));
        assert!(!key_matches(b"plain", "plai"));
        assert!(key_matches(br#"\"q\""#, "\"q\""));
        assert!(key_matches(br"\u00e9", "\u{e9}"));
        assert!(!key_matches(br"\u00e9", "e"));
    }
}
