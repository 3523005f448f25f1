//! Model constructor tests

use moon::moon::ast::{ConstructNode, KeyValueNode, Node, ScalarNode};
use moon::moon::constructing::construct;
use moon::moon::error::{ConstructError, Error};
use moon::{from_str, HookRegistry, Value};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case::single("@object me\nkey1: value1", json!({"me": {"key1": "value1"}}))]
#[case::typed_fields(
    "@object me\nn: 123\nf: 1.012312\ns: .12312.3123\nt: true\nb: false\nz: null",
    json!({"me": {"n": 123, "f": 1.012312, "s": ".12312.3123", "t": true, "b": false, "z": null}})
)]
#[case::empty_object("@object me", json!({"me": {}}))]
fn constructs_documents(#[case] text: &str, #[case] expected: Value) {
    assert_eq!(Value::Object(from_str(text).unwrap()), expected);
}

#[test]
fn duplicate_identifier() {
    let err = from_str("@object me @object me").unwrap_err();
    assert!(matches!(
        err,
        Error::Construct(ConstructError::DuplicateIdentifier(ref id)) if id == "me"
    ));
}

#[test]
fn duplicate_identifier_across_lines() {
    let err = from_str("@object me\na: 1\n\n@object you\n\n@object me\nb: 2").unwrap_err();
    assert_eq!(err.to_string(), "duplicate identifier \"me\"");
}

#[test]
fn duplicate_key() {
    let err = from_str("@object me\na: 1\na: 2").unwrap_err();
    assert!(matches!(
        err,
        Error::Construct(ConstructError::DuplicateKey { ref identifier, ref key })
            if identifier == "me" && key == "a"
    ));
}

#[test]
fn key_order_is_preserved() {
    let document = from_str("@object me\nz: 1\na: 2\nm: 3").unwrap();
    let keys: Vec<&String> = document["me"].as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn nested_values_are_not_implemented() {
    let inner = ConstructNode::new("@object", "inner", Vec::new());
    let node = ConstructNode::new(
        "@object",
        "outer",
        vec![KeyValueNode::new("child", inner.into()).into()],
    );
    let registry = HookRegistry::with_defaults();
    let err = construct(vec![Ok(Node::from(node))], &registry).unwrap_err();
    assert!(matches!(
        err,
        Error::Construct(ConstructError::NotImplemented(_))
    ));
}

#[test]
fn scalar_child_is_unexpected() {
    let node = ConstructNode::new("@object", "me", vec![ScalarNode::new("x").into()]);
    let registry = HookRegistry::with_defaults();
    let err = construct(vec![Ok(Node::from(node))], &registry).unwrap_err();
    assert!(matches!(err, Error::Construct(ConstructError::UnexpectedNode(_))));
}
