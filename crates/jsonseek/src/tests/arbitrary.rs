use alloc::{string::String, vec::Vec};

use quickcheck::{Arbitrary, Gen};
use serde_json::{Map, Number, Value};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct JsonNumber(Number);

impl Arbitrary for JsonNumber {
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            return Self(Number::from(i64::arbitrary(g)));
        }
        loop {
            if let Some(n) = Number::from_f64(f64::arbitrary(g)) {
                return Self(n);
            }
        }
    }
}

fn gen_val(g: &mut Gen, depth: usize) -> Value {
    let choices = if depth == 0 { 4 } else { 6 };
    match usize::arbitrary(g) % choices {
        0 => Value::Null,
        1 => Value::Bool(bool::arbitrary(g)),
        2 => Value::Number(JsonNumber::arbitrary(g).0),
        3 => Value::String(String::arbitrary(g)),
        4 => {
            let len = usize::arbitrary(g) % 4;
            Value::Array((0..len).map(|_| gen_val(g, depth - 1)).collect())
        }
        _ => Value::Object(gen_map(g, depth - 1)),
    }
}

fn gen_map(g: &mut Gen, depth: usize) -> Map<String, Value> {
    let len = usize::arbitrary(g) % 4;
    let mut map = Map::new();
    for _ in 0..len {
        map.insert(String::arbitrary(g), gen_val(g, depth));
    }
    map
}

/// Any JSON document.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Document(pub Value);

impl Arbitrary for Document {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = usize::arbitrary(g) % 3;
        Self(gen_val(g, depth))
    }
}

/// A document whose root is an object.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ObjectDocument(pub Map<String, Value>);

impl Arbitrary for ObjectDocument {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = usize::arbitrary(g) % 3;
        Self(gen_map(g, depth))
    }
}

/// A document whose root is an array.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ArrayDocument(pub Vec<Value>);

impl Arbitrary for ArrayDocument {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = usize::arbitrary(g) % 3;
        let len = usize::arbitrary(g) % 8;
        Self((0..len).map(|_| gen_val(g, depth)).collect())
    }
}
