//! Structural events
//!
//! Events sit between tokens and the tree: the parser emits them from tokens, the serializer emits
//! them from a tree. A construct always appears as
//!
//! ```text
//! ConstructStart("@object")
//! Identifier("me")
//! Key("name")   Value("Alex")      (zero or more pairs)
//! ConstructEnd("@object")
//! ```
//!
//! and a stream is terminated by exactly one `DocumentEnd`. Events carry no position.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    DocumentEnd,
    ConstructStart,
    ConstructEnd,
    Key,
    Value,
    Identifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub kind: EventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Event {
    fn with(kind: EventKind, value: impl Into<String>) -> Self {
        Event {
            kind,
            value: Some(value.into()),
        }
    }

    pub fn document_end() -> Self {
        Event {
            kind: EventKind::DocumentEnd,
            value: None,
        }
    }

    pub fn construct_start(name: impl Into<String>) -> Self {
        Self::with(EventKind::ConstructStart, name)
    }

    pub fn construct_end(name: impl Into<String>) -> Self {
        Self::with(EventKind::ConstructEnd, name)
    }

    pub fn key(key: impl Into<String>) -> Self {
        Self::with(EventKind::Key, key)
    }

    pub fn value(value: impl Into<String>) -> Self {
        Self::with(EventKind::Value, value)
    }

    pub fn identifier(identifier: impl Into<String>) -> Self {
        Self::with(EventKind::Identifier, identifier)
    }

    pub fn is(&self, kind: EventKind) -> bool {
        self.kind == kind
    }

    /// Text carried by the event, empty for `DocumentEnd`.
    pub fn text(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{:?}({value:?})", self.kind),
            None => write!(f, "{:?}", self.kind),
        }
    }
}
