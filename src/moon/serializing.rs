//! Serializer
//!
//! Flattens nodes back into events: each construct node becomes `ConstructStart`, the interior
//! events produced by its hook, and `ConstructEnd`. One `DocumentEnd` closes the stream once the
//! nodes run out.

use crate::moon::ast::Node;
use crate::moon::error::{Error, SerializeError};
use crate::moon::event::Event;
use crate::moon::hooks::HookRegistry;
use std::collections::VecDeque;

pub struct Serializer<'a, I> {
    nodes: I,
    registry: &'a HookRegistry,
    pending: VecDeque<Event>,
    finished: bool,
}

impl<'a, I> Serializer<'a, I>
where
    I: Iterator<Item = Result<Node, Error>>,
{
    pub fn new<N>(nodes: N, registry: &'a HookRegistry) -> Self
    where
        N: IntoIterator<IntoIter = I>,
    {
        Serializer {
            nodes: nodes.into_iter(),
            registry,
            pending: VecDeque::new(),
            finished: false,
        }
    }

    fn flatten(&mut self, node: Node) -> Result<(), Error> {
        let Node::Construct(node) = node else {
            return Err(SerializeError::UnexpectedNode(node.to_string()).into());
        };
        let hook = self
            .registry
            .construct(&node.construct)
            .ok_or_else(|| SerializeError::UnresolvedConstruct(node.construct.clone()))?;

        self.pending
            .push_back(Event::construct_start(&node.construct));
        self.pending.extend(hook.serialize(&node)?);
        self.pending.push_back(Event::construct_end(node.construct));
        Ok(())
    }
}

impl<I> Iterator for Serializer<'_, I>
where
    I: Iterator<Item = Result<Node, Error>>,
{
    type Item = Result<Event, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(Ok(event));
            }
            if self.finished {
                return None;
            }

            match self.nodes.next() {
                None => {
                    self.finished = true;
                    return Some(Ok(Event::document_end()));
                }
                Some(node) => {
                    if let Err(err) = node.and_then(|node| self.flatten(node)) {
                        self.pending.clear();
                        self.finished = true;
                        return Some(Err(err));
                    }
                }
            }
        }
    }
}

impl<I> std::iter::FusedIterator for Serializer<'_, I> where I: Iterator<Item = Result<Node, Error>> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moon::ast::{ConstructNode, KeyValueNode, ScalarNode};

    fn serialize(nodes: Vec<Node>) -> Result<Vec<Event>, Error> {
        let registry = HookRegistry::with_defaults();
        Serializer::new(nodes.into_iter().map(Ok), &registry).collect()
    }

    #[test]
    fn test_flattens_construct_nodes() {
        let events = serialize(vec![ConstructNode::new(
            "@object",
            "me",
            vec![KeyValueNode::scalar("key1", "value1").into()],
        )
        .into()])
        .unwrap();
        assert_eq!(
            events,
            vec![
                Event::construct_start("@object"),
                Event::identifier("me"),
                Event::key("key1"),
                Event::value("value1"),
                Event::construct_end("@object"),
                Event::document_end(),
            ]
        );
    }

    #[test]
    fn test_empty_input_is_just_document_end() {
        assert_eq!(serialize(Vec::new()).unwrap(), vec![Event::document_end()]);
    }

    #[test]
    fn test_rejects_non_construct_nodes() {
        let err = serialize(vec![ScalarNode::new("x").into()]).unwrap_err();
        assert!(matches!(err, Error::Serialize(SerializeError::UnexpectedNode(_))));
    }

    #[test]
    fn test_rejects_unknown_constructs() {
        let err = serialize(vec![ConstructNode::new("@list", "xs", Vec::new()).into()]).unwrap_err();
        assert!(matches!(
            err,
            Error::Serialize(SerializeError::UnresolvedConstruct(ref name)) if name == "@list"
        ));
    }
}
