#![expect(missing_docs)]

mod common;

use core::{fmt::Write, ops::ControlFlow};

use jsonseek::{
    ArrayElements, ObjectEntries, ScanOptions, Selector, Value, ValueKind, for_each_object_entry,
    for_each_path, get, get_f64, get_str, path,
};

fn summarize(value: &Value<'_>) -> String {
    match value.kind() {
        ValueKind::Object => {
            let members = ObjectEntries::of(value, ScanOptions::default()).unwrap().count();
            format!("{{{members}}}")
        }
        ValueKind::Array => {
            let elements = ArrayElements::of(value, ScanOptions::default()).unwrap().count();
            format!("[{elements}]")
        }
        _ => String::from_utf8_lossy(value.raw()).into_owned(),
    }
}

fn render_entries(buf: &[u8], path: &[Selector<'_>]) -> String {
    let mut out = String::new();
    for_each_object_entry(buf, path, |key, value| {
        let key = key.as_str().unwrap();
        writeln!(out, "{key}: {} {}", value.kind(), summarize(&value)).unwrap();
        ControlFlow::Continue(())
    })
    .unwrap();
    out
}

fn render_paths(buf: &[u8], paths: &[Vec<Selector<'_>>]) -> String {
    let paths: Vec<&[Selector]> = paths.iter().map(Vec::as_slice).collect();
    let mut out = String::new();
    for_each_path(buf, &paths, |index, value| {
        writeln!(out, "{index} {} {}", value.kind(), summarize(&value)).unwrap();
        ControlFlow::Continue(())
    })
    .unwrap();
    out
}

#[test]
fn snapshot_top_level_members() {
    insta::assert_snapshot!(render_entries(common::ORIGINAL.as_bytes(), &[]), @r"
    id: string call_7f3a
    model: string gpt-x
    created: number 1718035200
    usage: object {3}
    choices: array [1]
    tags: array [3]
    flags: object {2}
    ");
}

#[test]
fn snapshot_nested_members() {
    let function = path!["choices", 0, "message", "tool_calls", 0, "function"];
    insta::assert_snapshot!(render_entries(common::ORIGINAL.as_bytes(), &function), @r#"
    name: string get_weather
    arguments: string {\"city\": \"Z\\u00fcrich\", \"unit\": \"c\"}
    "#);
}

#[test]
fn snapshot_multi_path_walk() {
    let paths = [
        path!["choices", 0, "message", "tool_calls", 0, "function", "name"],
        path!["usage", "completion_tokens"],
        path!["tags", 2],
        path!["flags", "cached"],
        path!["missing"],
        path!["id"],
    ];
    let rendered = render_paths(common::ORIGINAL.as_bytes(), &paths);
    insta::assert_snapshot!(rendered, @r"
    5 string call_7f3a
    1 number 38
    0 string get_weather
    2 string caf\u00e9 \ud83d\ude00
    3 boolean true
    ");

    // Same walk over the compact form.
    let compact = common::compact();
    let compact_rendered = render_paths(compact.as_bytes(), &paths);
    assert_eq!(
        compact_rendered.replace("caf\u{e9} \u{1F600}", r"caf\u00e9 \ud83d\ude00"),
        rendered
    );
}

#[test]
fn snapshot_error_messages() {
    let failures = [
        get(br#"{"a":1}"#, &path!["z"]).map(drop),
        get_f64(br#"{"n":"abc"}"#, &path!["n"]).map(drop),
        get(br#"{"bad": [1, }"#, &path!["bad"]).map(drop),
        get(b"[1, 2", &path![5]).map(drop),
        get_str(br#"["\uD800"]"#, &path![0]).map(drop),
        get(br#"{"a" 1}"#, &path!["a"]).map(drop),
    ];
    let rendered = failures
        .iter()
        .map(|failure| failure.unwrap_err().to_string())
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(rendered, @r"
    key path not found
    expected number, found string at byte 6
    malformed json at byte 12: '}' does not close '['
    malformed json at byte 5: unterminated object or array
    cannot decode value at byte 2: unpaired surrogate \uD800
    malformed json at byte 5: expected ':' after object key
    ");
}
