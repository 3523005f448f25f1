//! Error types for every pipeline stage
//!
//! Each stage owns an error enum describing what can go wrong inside it. They all convert into
//! the crate-wide [`Error`] through `#[from]`, so a failure travels through `?` untouched from the
//! stage that raised it up to the caller of `load`/`dump`. No stage re-wraps an error coming from
//! the stage below it.

use crate::moon::token::{Token, TokenKind};
use crate::moon::value::ValueKind;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any failure raised by the moon pipeline or its file collaborator.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Compose(#[from] ComposeError),

    #[error(transparent)]
    Construct(#[from] ConstructError),

    #[error(transparent)]
    Represent(#[from] RepresentError),

    #[error(transparent)]
    Serialize(#[from] SerializeError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Invalid inputs handed to the file collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("path must not be empty")]
    EmptyPath,

    #[error("unknown encoding {0:?}")]
    UnknownEncoding(String),

    #[error("{0} can only be decoded, not encoded")]
    DecodeOnlyEncoding(&'static str),
}

/// Reading a document failed.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("file {0:?} does not exist")]
    NotFound(PathBuf),

    #[error("{0:?} is not a file")]
    NotAFile(PathBuf),

    #[error("cannot read {path:?} because access denied")]
    PermissionDenied { path: PathBuf, source: io::Error },

    #[error("cannot read {origin} because it is not valid {encoding}")]
    Decode {
        origin: String,
        encoding: &'static str,
    },

    #[error("cannot read {origin}: {source}")]
    Io { origin: String, source: io::Error },
}

/// Writing a document failed.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("cannot write {path:?} because access denied")]
    PermissionDenied { path: PathBuf, source: io::Error },

    #[error("cannot write {target}: {source}")]
    Io { target: String, source: io::Error },

    #[error("cannot write {target} because the text has characters {encoding} cannot encode")]
    Unencodable {
        target: String,
        encoding: &'static str,
    },
}

/// Tokenization failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("empty content")]
    EmptyInput,

    #[error("unrecognized input at line {line} column {column}")]
    UnrecognizedInput { line: usize, column: usize },
}

/// Token stream to event stream failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected token {found:?} at line {line} column {column}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
        line: usize,
        column: usize,
    },

    #[error("unknown construct {name:?} at line {line} column {column}")]
    UnknownConstruct {
        name: String,
        line: usize,
        column: usize,
    },

    #[error("unexpected end of input")]
    UnexpectedEof,
}

impl ParseError {
    /// Error for a token that does not fit the grammar at this point.
    pub fn unexpected(token: &Token, expected: &'static str) -> Self {
        if token.is(TokenKind::Eof) {
            return ParseError::UnexpectedEof;
        }
        ParseError::UnexpectedToken {
            found: token.text.clone(),
            expected,
            line: token.line,
            column: token.column,
        }
    }
}

/// Event stream to tree failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    #[error("unexpected event {found}, expected {expected}")]
    UnexpectedEvent {
        found: String,
        expected: &'static str,
    },

    #[error("unknown construct {0:?}")]
    UnknownConstruct(String),

    #[error("unexpected end of stream of events")]
    UnexpectedEnd,
}

/// Tree to model failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructError {
    #[error("unexpected node {0}, only construct nodes are allowed here")]
    UnexpectedNode(String),

    #[error("unknown construct {0:?}")]
    UnknownConstruct(String),

    #[error("duplicate identifier {0:?}")]
    DuplicateIdentifier(String),

    #[error("duplicate key {key:?} in {identifier:?}")]
    DuplicateKey { identifier: String, key: String },

    #[error("{0} not implemented yet")]
    NotImplemented(&'static str),
}

/// Model to tree failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepresentError {
    #[error("expected a mapping at the top level, got {0}")]
    NotAMapping(ValueKind),

    #[error("no construct represents values of kind {kind} (identifier {identifier:?})")]
    NoConstruct { identifier: String, kind: ValueKind },

    #[error("construct {construct} cannot represent {kind} (identifier {identifier:?})")]
    InvalidObject {
        construct: String,
        identifier: String,
        kind: ValueKind,
    },

    #[error("cannot represent field {field:?} of kind {kind}")]
    UnrepresentableValue { field: String, kind: ValueKind },
}

/// Tree to event stream failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializeError {
    #[error("expected a construct node, got {0}")]
    UnexpectedNode(String),

    #[error("cannot resolve construct {0:?}")]
    UnresolvedConstruct(String),
}

/// Event stream to text failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    #[error("unexpected event {0}")]
    UnexpectedEvent(String),

    #[error("unknown construct {0:?}")]
    UnknownConstruct(String),

    #[error("unexpected end of stream")]
    PrematureEnd,
}

/// Hook registration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("construct name {0:?} must be '@' followed by a single word")]
    InvalidName(String),

    #[error("construct {0:?} is already registered")]
    DuplicateConstruct(String),

    #[error("values of kind {kind} are already represented by {existing:?}")]
    DuplicateRepresenter { kind: ValueKind, existing: String },
}
