//! AST composer
//!
//! Groups the event stream into one [`Node::Construct`] per top-level block. The composer only
//! checks the framing; each construct hook composes its own block.

use crate::moon::ast::Node;
use crate::moon::cursor::Cursor;
use crate::moon::error::{ComposeError, Error};
use crate::moon::event::{Event, EventKind};
use crate::moon::hooks::HookRegistry;

pub struct Composer<'a> {
    events: Cursor<'a, Event>,
    registry: &'a HookRegistry,
    // the previous block left the cursor on its construct end
    pending_advance: bool,
    finished: bool,
}

impl<'a> Composer<'a> {
    pub fn new(events: Cursor<'a, Event>, registry: &'a HookRegistry) -> Self {
        Composer {
            events,
            registry,
            pending_advance: false,
            finished: false,
        }
    }

    fn step(&mut self) -> Result<Option<Node>, Error> {
        let event = if std::mem::take(&mut self.pending_advance) {
            self.events.advance()?
        } else {
            self.events.read()?
        };
        let event = event.cloned().ok_or(ComposeError::UnexpectedEnd)?;

        match event.kind {
            EventKind::DocumentEnd => Ok(None),
            EventKind::ConstructStart => {
                let hook = self
                    .registry
                    .construct(event.text())
                    .ok_or_else(|| ComposeError::UnknownConstruct(event.text().to_string()))?;
                let node = hook.compose(&mut self.events)?;
                tracing::debug!(construct = %node.construct, identifier = %node.identifier, "composed node");
                self.pending_advance = true;
                Ok(Some(Node::Construct(node)))
            }
            _ => Err(ComposeError::UnexpectedEvent {
                found: event.to_string(),
                expected: "construct start or document end",
            }
            .into()),
        }
    }
}

impl Iterator for Composer<'_> {
    type Item = Result<Node, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.step();
        if !matches!(result, Ok(Some(_))) {
            self.finished = true;
        }
        result.transpose()
    }
}

impl std::iter::FusedIterator for Composer<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moon::ast::{ConstructNode, KeyValueNode};

    fn compose(events: Vec<Event>) -> Result<Vec<Node>, Error> {
        let registry = HookRegistry::with_defaults();
        Composer::new(Cursor::from_items(events), &registry).collect()
    }

    #[test]
    fn test_composes_one_node_per_block() {
        let nodes = compose(vec![
            Event::construct_start("@object"),
            Event::identifier("me"),
            Event::key("key1"),
            Event::value("value1"),
            Event::construct_end("@object"),
            Event::construct_start("@object"),
            Event::identifier("you"),
            Event::construct_end("@object"),
            Event::document_end(),
        ])
        .unwrap();
        assert_eq!(
            nodes,
            vec![
                Node::from(ConstructNode::new(
                    "@object",
                    "me",
                    vec![KeyValueNode::scalar("key1", "value1").into()]
                )),
                Node::from(ConstructNode::new("@object", "you", Vec::new())),
            ]
        );
    }

    #[test]
    fn test_missing_document_end() {
        let err = compose(vec![
            Event::construct_start("@object"),
            Event::identifier("me"),
            Event::construct_end("@object"),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::Compose(ComposeError::UnexpectedEnd)));
    }

    #[test]
    fn test_unknown_construct() {
        let err = compose(vec![Event::construct_start("@nope")]).unwrap_err();
        assert!(matches!(err, Error::Compose(ComposeError::UnknownConstruct(_))));
    }
}
