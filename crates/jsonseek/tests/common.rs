#![allow(dead_code)]
#![allow(clippy::needless_raw_string_hashes)]

use jsonseek::Selector;

/// A chat completion response carrying a tool call, as returned by a
/// third-party API.
pub const ORIGINAL: &str = r#"
{
    "id": "call_7f3a",
    "model": "gpt-x",
    "created": 1718035200,
    "usage": {
        "prompt_tokens": 412,
        "completion_tokens": 38,
        "cost": 0.0125
    },
    "choices": [
        {
            "index": 0,
            "finish_reason": "tool_calls",
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [
                    {
                        "id": "tc_1",
                        "type": "function",
                        "function": {
                            "name": "get_weather",
                            "arguments": "{\"city\": \"Z\\u00fcrich\", \"unit\": \"c\"}"
                        }
                    }
                ]
            }
        }
    ],
    "tags": [
        "weather",
        "tools",
        "caf\u00e9 \ud83d\ude00"
    ],
    "flags": {
        "stream": false,
        "cached": true
    }
}"#;

/// The same document without insignificant whitespace.
pub fn compact() -> String {
    let value: serde_json::Value = serde_json::from_str(ORIGINAL).unwrap();
    serde_json::to_string(&value).unwrap()
}

/// Every non-empty path in `value`, depth first, with the value it selects.
pub fn all_paths(value: &serde_json::Value) -> Vec<(Vec<Selector<'static>>, serde_json::Value)> {
    fn walk(
        value: &serde_json::Value,
        prefix: &mut Vec<Selector<'static>>,
        out: &mut Vec<(Vec<Selector<'static>>, serde_json::Value)>,
    ) {
        let children: Vec<(Selector<'static>, &serde_json::Value)> = match value {
            serde_json::Value::Object(map) => map
                .iter()
                .map(|(k, v)| (Selector::from(k.clone()), v))
                .collect(),
            serde_json::Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (Selector::from(i), v))
                .collect(),
            _ => return,
        };
        for (selector, child) in children {
            prefix.push(selector);
            out.push((prefix.clone(), child.clone()));
            walk(child, prefix, out);
            prefix.pop();
        }
    }

    let mut out = Vec::new();
    walk(value, &mut Vec::new(), &mut out);
    out
}

#[test]
fn compact_form_keeps_member_order() {
    let compact = compact();
    assert!(compact.starts_with(r#"{"id":"call_7f3a","model":"gpt-x","created":1718035200,"#));
    assert!(compact.ends_with(r#""flags":{"stream":false,"cached":true}}"#));
}
