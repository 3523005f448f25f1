//! Entry points wiring the stages together
//!
//! Loading runs `text -> Lexer -> EventParser -> Composer -> construct`, dumping runs
//! `value -> Representer -> Serializer -> Emitter -> text`. Every stage pulls from the one before
//! it, so nothing is materialized between stages; the first error stops the whole chain and is
//! returned unchanged.

use crate::moon::composing::Composer;
use crate::moon::constructing::construct;
use crate::moon::cursor::Cursor;
use crate::moon::emitting::Emitter;
use crate::moon::error::Error;
use crate::moon::fileio::{self, Encoding, Sink, Source, UTF_8};
use crate::moon::hooks::HookRegistry;
use crate::moon::lexing::Lexer;
use crate::moon::parsing::EventParser;
use crate::moon::representing::Representer;
use crate::moon::serializing::Serializer;
use crate::moon::value::{Document, Value};
use once_cell::sync::Lazy;

static DEFAULT: Lazy<Moon> = Lazy::new(Moon::new);

/// A pipeline bound to one hook registry
#[derive(Debug, Default)]
pub struct Moon {
    registry: HookRegistry,
}

impl Moon {
    /// Create a pipeline with the built-in constructs
    pub fn new() -> Self {
        Self {
            registry: HookRegistry::with_defaults(),
        }
    }

    /// Create a pipeline with a custom registry
    pub fn with_registry(registry: HookRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &HookRegistry {
        &self.registry
    }

    pub fn tokens(&self, text: &str) -> Result<Lexer, Error> {
        Lexer::new(text)
    }

    pub fn events(&self, text: &str) -> Result<EventParser<'_>, Error> {
        Ok(EventParser::new(Cursor::new(self.tokens(text)?), &self.registry))
    }

    pub fn nodes(&self, text: &str) -> Result<Composer<'_>, Error> {
        Ok(Composer::new(Cursor::new(self.events(text)?), &self.registry))
    }

    /// Load a document from text
    pub fn from_str(&self, text: &str) -> Result<Document, Error> {
        construct(self.nodes(text)?, &self.registry)
    }

    /// Lazily rendered text fragments of a value
    pub fn fragments<'a>(&'a self, value: &'a Value) -> Result<Emitter<'a>, Error> {
        let nodes = Representer::new(value, &self.registry)?;
        let events = Serializer::new(nodes, &self.registry);
        Ok(Emitter::new(Cursor::new(events), &self.registry))
    }

    /// Dump a value to text
    pub fn to_string(&self, value: &Value) -> Result<String, Error> {
        self.fragments(value)?.collect()
    }

    pub fn load(&self, source: Source<'_>) -> Result<Document, Error> {
        self.load_encoded(source, UTF_8)
    }

    pub fn load_encoded(
        &self,
        source: Source<'_>,
        encoding: &'static Encoding,
    ) -> Result<Document, Error> {
        let text = fileio::read_encoded(source, encoding)?;
        self.from_str(&text)
    }

    pub fn dump(&self, value: &Value, sink: Sink<'_>) -> Result<(), Error> {
        self.dump_encoded(value, sink, UTF_8)
    }

    /// Render the whole value first, then write it
    pub fn dump_encoded(
        &self,
        value: &Value,
        sink: Sink<'_>,
        encoding: &'static Encoding,
    ) -> Result<(), Error> {
        let fragments = self.fragments(value)?.collect::<Result<Vec<_>, _>>()?;
        fileio::write_chunks_encoded(fragments, sink, encoding)
    }
}

/// Load a document from text with the built-in constructs.
pub fn from_str(text: &str) -> Result<Document, Error> {
    DEFAULT.from_str(text)
}

/// Dump a value to text with the built-in constructs.
pub fn to_string(value: &Value) -> Result<String, Error> {
    DEFAULT.to_string(value)
}

pub fn load(source: Source<'_>) -> Result<Document, Error> {
    DEFAULT.load(source)
}

pub fn dump(value: &Value, sink: Sink<'_>) -> Result<(), Error> {
    DEFAULT.dump(value, sink)
}

pub fn load_encoded(source: Source<'_>, encoding: &'static Encoding) -> Result<Document, Error> {
    DEFAULT.load_encoded(source, encoding)
}

pub fn dump_encoded(value: &Value, sink: Sink<'_>, encoding: &'static Encoding) -> Result<(), Error> {
    DEFAULT.dump_encoded(value, sink, encoding)
}
