//! Tree nodes
//!
//! The composer builds one [`ConstructNode`] per top-level block; the representer builds the same
//! shape from a value. Construct nodes are generic: the construct name says which hook owns them,
//! and the hook decides what children are legal. The object construct holds key-value children
//! whose values are scalars.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Scalar(ScalarNode),
    Construct(ConstructNode),
    KeyValue(KeyValueNode),
}

/// Leaf holding raw, unresolved text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScalarNode {
    pub value: String,
}

/// A named block: construct name, bound identifier and ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstructNode {
    pub construct: String,
    pub identifier: String,
    pub children: Vec<Node>,
}

/// `key: value` pair, only legal inside a construct node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyValueNode {
    pub key: ScalarNode,
    pub value: Box<Node>,
}

impl ScalarNode {
    pub fn new(value: impl Into<String>) -> Self {
        ScalarNode {
            value: value.into(),
        }
    }
}

impl ConstructNode {
    pub fn new(
        construct: impl Into<String>,
        identifier: impl Into<String>,
        children: Vec<Node>,
    ) -> Self {
        ConstructNode {
            construct: construct.into(),
            identifier: identifier.into(),
            children,
        }
    }
}

impl KeyValueNode {
    pub fn new(key: impl Into<String>, value: Node) -> Self {
        KeyValueNode {
            key: ScalarNode::new(key),
            value: Box::new(value),
        }
    }

    /// Pair of two scalars, the only shape the current grammar produces.
    pub fn scalar(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, Node::Scalar(ScalarNode::new(value)))
    }
}

impl From<ScalarNode> for Node {
    fn from(node: ScalarNode) -> Self {
        Node::Scalar(node)
    }
}

impl From<ConstructNode> for Node {
    fn from(node: ConstructNode) -> Self {
        Node::Construct(node)
    }
}

impl From<KeyValueNode> for Node {
    fn from(node: KeyValueNode) -> Self {
        Node::KeyValue(node)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Scalar(scalar) => write!(f, "scalar {:?}", scalar.value),
            Node::Construct(node) => write!(
                f,
                "{} {} ({} children)",
                node.construct,
                node.identifier,
                node.children.len()
            ),
            Node::KeyValue(pair) => write!(f, "key-value {:?}", pair.key.value),
        }
    }
}
