use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::{fmt::Write, ops::ControlFlow};

use quickcheck::QuickCheck;
use quickcheck_macros::quickcheck;

use super::arbitrary::{ArrayDocument, Document, ObjectDocument};
use crate::{Selector, for_each_array_element, get, get_str, locate_value, unescape};

fn tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

/// The text a located value should span: the serialized value, minus the
/// quotes for strings.
fn expected_raw(value: &serde_json::Value) -> String {
    let text = serde_json::to_string(value).unwrap();
    if value.is_string() {
        text[1..text.len() - 1].to_string()
    } else {
        text
    }
}

/// Escapes `s` using short escapes for quote, backslash, newline and tab,
/// and `\u` escapes for every other control or non-ASCII character. Astral
/// characters become surrogate pairs.
fn escape(s: &str) -> String {
    let mut out = String::new();
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() || !c.is_ascii() => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    write!(out, "\\u{unit:04X}").unwrap();
                }
            }
            c => out.push(c),
        }
    }
    out
}

/// Property: every top-level member is found, spans exactly its serialized
/// text, and decodes back to the original scalar.
#[test]
fn top_level_get_matches_serialized_member() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: ObjectDocument) -> bool {
        let text = serde_json::to_string(&doc.0).unwrap();
        let buf = text.as_bytes();
        doc.0.iter().all(|(key, value)| {
            let Ok(found) = get(buf, &[Selector::from(key.as_str())]) else {
                return false;
            };
            if found.raw() != expected_raw(value).as_bytes() {
                return false;
            }
            match value {
                serde_json::Value::String(s) => found.as_str().is_ok_and(|d| d == *s),
                serde_json::Value::Number(n) if n.is_i64() => found.as_i64().ok() == n.as_i64(),
                serde_json::Value::Number(n) => found.as_f64().ok() == n.as_f64(),
                serde_json::Value::Bool(b) => found.as_bool() == Ok(*b),
                _ => true,
            }
        })
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(ObjectDocument) -> bool);
}

/// Property: elements arrive in source order with consecutive indices and
/// non-overlapping, increasing extents.
#[test]
fn array_elements_visit_in_order() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: ArrayDocument) -> bool {
        let text = serde_json::to_string(&doc.0).unwrap();
        let mut visited = 0;
        let mut last_end = 0;
        let mut ok = true;
        let result = for_each_array_element(text.as_bytes(), &[], |index, element| {
            let Ok(element) = element else {
                ok = false;
                return ControlFlow::Break(());
            };
            ok &= index == visited
                && element.start() >= last_end
                && element.end() > element.start()
                && element.raw() == expected_raw(&doc.0[index]).as_bytes();
            visited += 1;
            last_end = element.end();
            ControlFlow::Continue(())
        });
        ok && result.is_ok() && visited == doc.0.len()
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(ArrayDocument) -> bool);
}

/// Property: looking up the same path twice gives the same answer and
/// leaves the buffer untouched.
#[test]
fn get_is_idempotent() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Document, key: String) -> bool {
        let buf = serde_json::to_vec_pretty(&doc.0).unwrap();
        let before = buf.clone();
        let path = [Selector::from(key.as_str())];
        let first = get(&buf, &path);
        let second = get(&buf, &path);
        first == second && get(&buf, &[]) == get(&buf, &[]) && buf == before
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Document, String) -> bool);
}

/// Property: decoding an escaped string recovers the original, and escaping
/// the decoded text reproduces the raw slice.
#[test]
fn escapes_round_trip() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(s: String) -> bool {
        // Always include an astral character, and so a surrogate pair.
        let original = alloc::format!("{s}\u{1F600}\n\t\"\\");
        let raw = escape(&original);
        let buf = alloc::format!(r#"["{raw}"]"#);
        let Ok(decoded) = get_str(buf.as_bytes(), &[Selector::Index(0)]) else {
            return false;
        };
        decoded == original && escape(&decoded) == raw
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(String) -> bool);
}

/// Property: on arbitrary bytes, locating either fails or yields a value
/// that starts at or after the offset and ends inside the buffer.
#[quickcheck]
#[allow(clippy::needless_pass_by_value)]
fn locate_stays_in_bounds(bytes: Vec<u8>, offset: usize) -> bool {
    let offset = offset % (bytes.len() + 1);
    match locate_value(&bytes, offset) {
        Ok(value) => {
            value.start() >= offset
                && value.raw_range().end <= value.end()
                && value.end() <= bytes.len()
        }
        Err(_) => true,
    }
}

#[test]
fn escape_helper_emits_surrogate_pairs() {
    assert_eq!(escape("\u{1F600}"), r"\uD83D\uDE00");
    assert_eq!(escape("\u{e9}\u{1}"), r"\u00E9\u0001");
    assert_eq!(unescape(br"\uD83D\uDE00").unwrap(), "\u{1F600}");
}
