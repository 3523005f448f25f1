//! The generic value model
//!
//! Loading produces, and dumping consumes, plain `serde_json` values: a mapping from top-level
//! identifier to a mapping from field name to a resolved scalar. `serde_json` is built with
//! `preserve_order`, so mappings iterate in insertion order and a loaded document dumps back in
//! the order it was written.

use serde::Serialize;
use std::fmt;

pub use serde_json::{Map, Number, Value};

/// A loaded document: identifier -> construct value.
pub type Document = Map<String, Value>;

/// Run-time type of a [`Value`], used to pick the construct that can represent it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
