//! Representer
//!
//! First dumping stage, the mirror of the constructor: walks the top-level mapping and asks the
//! construct registered for each value's kind to build a node for it.

use crate::moon::ast::Node;
use crate::moon::error::{Error, RepresentError};
use crate::moon::hooks::HookRegistry;
use crate::moon::value::{Value, ValueKind};

pub struct Representer<'a> {
    entries: serde_json::map::Iter<'a>,
    registry: &'a HookRegistry,
    finished: bool,
}

impl<'a> Representer<'a> {
    /// Fails unless the value is a mapping.
    pub fn new(value: &'a Value, registry: &'a HookRegistry) -> Result<Self, Error> {
        let Value::Object(document) = value else {
            return Err(RepresentError::NotAMapping(ValueKind::of(value)).into());
        };
        Ok(Representer {
            entries: document.iter(),
            registry,
            finished: false,
        })
    }

    fn represent(&self, identifier: &str, value: &Value) -> Result<Node, Error> {
        let kind = ValueKind::of(value);
        let hook = self
            .registry
            .representer(kind)
            .ok_or_else(|| RepresentError::NoConstruct {
                identifier: identifier.to_string(),
                kind,
            })?;
        Ok(Node::Construct(hook.represent(identifier, value, self.registry)?))
    }
}

impl Iterator for Representer<'_> {
    type Item = Result<Node, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let (identifier, value) = self.entries.next()?;
        let result = self.represent(identifier, value);
        if result.is_err() {
            self.finished = true;
        }
        Some(result)
    }
}

impl std::iter::FusedIterator for Representer<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moon::ast::{ConstructNode, KeyValueNode};
    use serde_json::json;

    #[test]
    fn test_represents_each_entry() {
        let registry = HookRegistry::with_defaults();
        let value = json!({"me": {"n": 1, "f": 1.5, "b": false, "z": null, "s": "x"}});
        let nodes: Vec<Node> = Representer::new(&value, &registry)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            nodes,
            vec![Node::from(ConstructNode::new(
                "@object",
                "me",
                vec![
                    KeyValueNode::scalar("n", "1").into(),
                    KeyValueNode::scalar("f", "1.5").into(),
                    KeyValueNode::scalar("b", "false").into(),
                    KeyValueNode::scalar("z", "null").into(),
                    KeyValueNode::scalar("s", "x").into(),
                ]
            ))]
        );
    }

    #[test]
    fn test_top_level_must_be_mapping() {
        let registry = HookRegistry::with_defaults();
        let err = Representer::new(&json!([1, 2]), &registry).err().unwrap();
        assert!(matches!(
            err,
            Error::Represent(RepresentError::NotAMapping(ValueKind::Array))
        ));
    }

    #[test]
    fn test_no_construct_for_scalar_entries() {
        let registry = HookRegistry::with_defaults();
        let value = json!({"me": 3});
        let mut representer = Representer::new(&value, &registry).unwrap();
        let err = representer.next().unwrap().unwrap_err();
        assert!(matches!(
            err,
            Error::Represent(RepresentError::NoConstruct {
                kind: ValueKind::Number,
                ..
            })
        ));
        assert!(representer.next().is_none());
    }
}
