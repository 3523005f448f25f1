//! End-to-end tests: fixture documents through load and dump

use moon::moon::error::{Error, ParseError};
use moon::{from_str, load, to_string, Source, Value};
use serde_json::json;
use std::fs;

fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    fs::read_to_string(path).expect("Failed to read fixture")
}

#[test]
fn loads_mixed_fixture() {
    let document = from_str(&fixture("mixed.moon")).unwrap();
    let expected: Value = serde_json::from_str(&fixture("mixed.json")).unwrap();
    assert_eq!(Value::Object(document), expected);
}

#[test]
fn loads_fixture_from_path() {
    let path = format!("{}/tests/fixtures/mixed.moon", env!("CARGO_MANIFEST_DIR"));
    let document = load(Source::path(path)).unwrap();
    assert_eq!(document.keys().collect::<Vec<_>>(), vec!["alex", "settings"]);
}

#[test]
fn dumped_fixture() {
    let document = from_str(&fixture("mixed.moon")).unwrap();
    let text = to_string(&Value::Object(document)).unwrap();
    insta::assert_snapshot!(text);
}

#[test]
fn canonical_text_is_reproduced_byte_for_byte() {
    let text = fixture("canonical.moon");
    let document = from_str(&text).unwrap();
    assert_eq!(to_string(&Value::Object(document)).unwrap(), text);
}

#[test]
fn two_block_scenario() {
    let text = "@object me\nkey1: value1\n\n@object you\nkey2: value2";
    let document = from_str(text).unwrap();
    let value = Value::Object(document);
    assert_eq!(
        value,
        json!({"me": {"key1": "value1"}, "you": {"key2": "value2"}})
    );
    assert_eq!(
        to_string(&value).unwrap(),
        "@object me\n    key1: value1\n\n@object you\n    key2: value2\n"
    );
}

#[test]
fn unknown_construct_is_a_parse_error() {
    let err = from_str("@unknowntag x\nkey: 1").unwrap_err();
    assert!(matches!(
        err,
        Error::Parse(ParseError::UnknownConstruct { ref name, .. }) if name == "@unknowntag"
    ));
}

#[test]
fn errors_in_later_blocks_abort_the_load() {
    let err = from_str("@object me\nkey1: value1\n\n@object you\nkey2 value2").unwrap_err();
    assert!(matches!(err, Error::Parse(ParseError::UnexpectedToken { line: 5, .. })));
}

#[test]
fn unterminated_block_comment_runs_to_end_of_input() {
    let document = from_str("@object me\nk: v /* trailing").unwrap();
    assert_eq!(Value::Object(document), json!({"me": {"k": "v"}}));
}

#[test]
fn negative_integers_round_trip_as_integers() {
    let value = json!({"a": {"n": -3, "min": i64::MIN}});
    let text = to_string(&value).unwrap();
    assert_eq!(text, "@object a\n    n: -3\n    min: -9223372036854775808\n");
    assert_eq!(Value::Object(from_str(&text).unwrap()), value);
}

#[test]
fn oversized_integers_keep_their_digits() {
    let text = "@object a\n    n: 123456789012345678901\n";
    let document = from_str(text).unwrap();
    assert_eq!(document["a"]["n"], json!("123456789012345678901"));
    assert_eq!(to_string(&Value::Object(document)).unwrap(), text);
}
