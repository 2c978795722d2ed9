#![no_main]
use std::{cell::RefCell, ops::ControlFlow};

use arbitrary::Arbitrary;
use jsonseek::{ArrayElements, Json, ObjectEntries, ScanOptions, Selector, Value as Located};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 5; // 1 flag + 4-byte seed
const MAX_DEPTH: usize = 16;

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

// JSON whitespace plus separators the lenient grammar skips, and a few
// non-JSON spaces that must be rejected rather than skipped.
static FILLER: &[&[u8]] = &[
    b" ",
    b"\t",
    b"\n",
    b"\r",
    b",",
    "\u{00A0}".as_bytes(),
    "\u{2028}".as_bytes(),
    "\u{3000}".as_bytes(),
];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed % 10 == 0 {
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x03);
        data[1..5].copy_from_slice(&with_rng(|rng| rng.next_u32().to_le_bytes()));

        let limit = max_size.saturating_sub(HEADER);
        let mut len = HEADER;
        len += append_value(&mut data[len..], size, limit);
        len += append_filler(&mut data[len..], max_size - len);
        len
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Appends up to eight filler sequences without exceeding `limit` bytes.
fn append_filler(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }
        let mut written = 0;
        for _ in 0..rng.random_range(1..=limit.min(8)) {
            let w = FILLER[rng.random_range(0..FILLER.len())];
            if written + w.len() > limit {
                break;
            }
            buf[written..written + w.len()].copy_from_slice(w);
            written += w.len();
        }
        written
    })
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..=size * 2).min(limit));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let serialized = if with_rng(|rng| rng.random::<bool>()) {
        serde_json::to_vec_pretty(&value.0)
    } else {
        serde_json::to_vec(&value.0)
    }
    .expect("arbitrary values serialize");

    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(21)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3 => Value::Number(i64::arbitrary(u)?.into()),
            4..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            _ => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
        };
        Ok(ArbitraryValue(value))
    }
}

/// Walks `expected` alongside the located value and checks that every
/// member resolves to what serde_json parsed.
fn check(doc: Json<'_>, path: &mut Vec<Selector<'static>>, expected: &Value, depth: usize) {
    let found = doc
        .get(path)
        .unwrap_or_else(|e| panic!("{path:?} not found in valid json: {e}"));
    match expected {
        Value::String(s) => assert_eq!(found.as_str().unwrap(), s.as_str(), "{path:?}"),
        Value::Array(items) => {
            let count = ArrayElements::of(&found, doc.options()).unwrap().count();
            assert_eq!(count, items.len(), "{path:?}");
            if depth < MAX_DEPTH {
                for (i, item) in items.iter().enumerate() {
                    path.push(Selector::Index(i));
                    check(doc, path, item, depth + 1);
                    path.pop();
                }
            }
        }
        Value::Object(map) => {
            // serde_json keeps the last of duplicate keys, lookups the first.
            let members = ObjectEntries::of(&found, doc.options()).unwrap().count();
            if members != map.len() || depth >= MAX_DEPTH {
                return;
            }
            for (key, member) in map {
                path.push(Selector::from(key.clone()));
                check(doc, path, member, depth + 1);
                path.pop();
            }
        }
        _ => {
            let parsed: Value = serde_json::from_slice(found.raw()).unwrap();
            assert_eq!(&parsed, expected, "{path:?}");
        }
    }
}

/// Exercises every entry point on arbitrary bytes; none may panic.
fn explore(doc: Json<'_>, seed: u32) {
    let buf = doc.as_bytes();
    let offset = seed as usize % (buf.len() + 1);
    if let Ok(value) = doc.locate(offset) {
        assert!(value.end() <= buf.len());
        let _ = value.as_str();
        let _ = value.as_f64();
        let _ = value.as_i64();
        if let Ok(elements) = ArrayElements::of(&value, doc.options()) {
            elements.for_each(drop);
        }
        if let Ok(entries) = ObjectEntries::of(&value, doc.options()) {
            entries.for_each(drop);
        }
    }

    let index = (seed >> 8) as usize % 4;
    let key = ["id", "", "0", "a"][(seed >> 16) as usize % 4];
    let paths = [
        vec![Selector::Index(index)],
        vec![Selector::from(key)],
        vec![Selector::from(key), Selector::Index(index)],
    ];
    for path in &paths {
        let _ = doc.get(path).map(|value| value.as_str());
        let _ = doc.for_each_array_element(path, |_, _| ControlFlow::Continue(()));
        let _ = doc.for_each_object_entry(path, |_, _| ControlFlow::Continue(()));
    }
    let slices: Vec<&[Selector]> = paths.iter().map(Vec::as_slice).collect();
    let _ = doc.for_each_path(&slices, |index, value: Located<'_>| {
        assert!(index < slices.len() && value.end() <= buf.len());
        ControlFlow::Continue(())
    });
}

fn lookup(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }
    let flags = data[0];
    let seed = u32::from_le_bytes(data[1..HEADER].try_into().unwrap());
    let buf = &data[HEADER..];

    let options = ScanOptions {
        strict_numbers: flags & 1 != 0,
        strict_separators: flags & 2 != 0,
    };
    let doc = Json::with_options(buf, options);
    explore(doc, seed);

    if let Ok(expected) = serde_json::from_slice::<Value>(buf) {
        // A valid document must be fully navigable under any options.
        check(doc, &mut Vec::new(), &expected, 0);
    }
}

fuzz_target!(|data: &[u8]| lookup(data));
