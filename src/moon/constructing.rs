//! Model constructor
//!
//! Last loading stage: folds the composed nodes into a [`Document`]. Identifiers must be unique
//! across the whole document; the value bound to each one is built by its construct hook.

use crate::moon::ast::Node;
use crate::moon::error::{ConstructError, Error};
use crate::moon::hooks::HookRegistry;
use crate::moon::value::Document;

pub fn construct<I>(nodes: I, registry: &HookRegistry) -> Result<Document, Error>
where
    I: IntoIterator<Item = Result<Node, Error>>,
{
    let mut document = Document::new();

    for node in nodes {
        let node = match node? {
            Node::Construct(node) => node,
            other => return Err(ConstructError::UnexpectedNode(other.to_string()).into()),
        };

        let hook = registry
            .construct(&node.construct)
            .ok_or_else(|| ConstructError::UnknownConstruct(node.construct.clone()))?;
        if document.contains_key(&node.identifier) {
            return Err(ConstructError::DuplicateIdentifier(node.identifier).into());
        }

        let value = hook.construct(&node, registry)?;
        tracing::debug!(construct = %node.construct, identifier = %node.identifier, "constructed");
        document.insert(node.identifier, value);
    }

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moon::ast::{ConstructNode, KeyValueNode, ScalarNode};
    use serde_json::json;

    fn object(identifier: &str, fields: &[(&str, &str)]) -> Result<Node, Error> {
        let children = fields
            .iter()
            .map(|(k, v)| Node::from(KeyValueNode::scalar(*k, *v)))
            .collect();
        Ok(ConstructNode::new("@object", identifier, children).into())
    }

    #[test]
    fn test_builds_document_in_order() {
        let registry = HookRegistry::with_defaults();
        let document = construct(
            vec![
                object("me", &[("age", "30"), ("name", "Alex")]),
                object("you", &[("ok", "true")]),
            ],
            &registry,
        )
        .unwrap();

        assert_eq!(
            serde_json::Value::Object(document.clone()),
            json!({"me": {"age": 30, "name": "Alex"}, "you": {"ok": true}})
        );
        assert_eq!(document.keys().collect::<Vec<_>>(), vec!["me", "you"]);
    }

    #[test]
    fn test_duplicate_identifier() {
        let registry = HookRegistry::with_defaults();
        let err = construct(vec![object("me", &[]), object("me", &[])], &registry).unwrap_err();
        assert!(matches!(
            err,
            Error::Construct(ConstructError::DuplicateIdentifier(ref id)) if id == "me"
        ));
    }

    #[test]
    fn test_only_construct_nodes_at_top_level() {
        let registry = HookRegistry::with_defaults();
        let err = construct(vec![Ok(Node::from(ScalarNode::new("x")))], &registry).unwrap_err();
        assert!(matches!(err, Error::Construct(ConstructError::UnexpectedNode(_))));
    }

    #[test]
    fn test_unknown_construct() {
        let registry = HookRegistry::new();
        let err = construct(vec![object("me", &[])], &registry).unwrap_err();
        assert!(matches!(err, Error::Construct(ConstructError::UnknownConstruct(_))));
    }
}
