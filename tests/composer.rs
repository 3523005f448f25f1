//! AST composer tests

use moon::moon::ast::{ConstructNode, KeyValueNode, Node};
use moon::moon::composing::Composer;
use moon::moon::cursor::Cursor;
use moon::moon::error::{ComposeError, Error};
use moon::moon::event::Event;
use moon::{HookRegistry, Moon};
use rstest::rstest;

fn compose(events: Vec<Event>) -> Result<Vec<Node>, Error> {
    let registry = HookRegistry::with_defaults();
    let composer = Composer::new(Cursor::from_items(events), &registry);
    composer.collect()
}

#[test]
fn composes_from_text() {
    let moon = Moon::new();
    let nodes: Vec<Node> = moon
        .nodes("@object me\nkey1: value1\n\n@object you\nkey2: value2")
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(
        nodes,
        vec![
            Node::from(ConstructNode::new(
                "@object",
                "me",
                vec![KeyValueNode::scalar("key1", "value1").into()],
            )),
            Node::from(ConstructNode::new(
                "@object",
                "you",
                vec![KeyValueNode::scalar("key2", "value2").into()],
            )),
        ]
    );
}

#[test]
fn empty_document_has_no_nodes() {
    assert!(compose(vec![Event::document_end()]).unwrap().is_empty());
}

#[rstest]
#[case::nested_start(vec![
    Event::construct_start("@object"),
    Event::identifier("me"),
    Event::construct_start("@object"),
])]
#[case::dangling_identifier(vec![
    Event::construct_start("@object"),
    Event::identifier("me"),
    Event::construct_end("@object"),
    Event::identifier("me"),
])]
#[case::missing_identifier(vec![
    Event::construct_start("@object"),
    Event::key("k"),
    Event::value("v"),
    Event::construct_end("@object"),
    Event::document_end(),
])]
#[case::key_without_value(vec![
    Event::construct_start("@object"),
    Event::identifier("me"),
    Event::key("k"),
    Event::construct_end("@object"),
    Event::document_end(),
])]
#[case::value_without_key(vec![
    Event::construct_start("@object"),
    Event::identifier("me"),
    Event::value("v"),
    Event::construct_end("@object"),
    Event::document_end(),
])]
#[case::stray_top_level_value(vec![Event::value("v"), Event::document_end()])]
fn rejects_malformed_event_streams(#[case] events: Vec<Event>) {
    assert!(matches!(
        compose(events),
        Err(Error::Compose(ComposeError::UnexpectedEvent { .. }))
    ));
}

#[rstest]
#[case::empty(vec![])]
#[case::unterminated_block(vec![Event::construct_start("@object"), Event::identifier("me")])]
fn rejects_truncated_streams(#[case] events: Vec<Event>) {
    assert!(matches!(
        compose(events),
        Err(Error::Compose(ComposeError::UnexpectedEnd))
    ));
}
