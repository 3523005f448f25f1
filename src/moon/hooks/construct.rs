//! Construct hook contract
//!
//! A construct hook owns the grammar of one kind of block. The stages own the framing and the
//! hooks own the interior, so the cursor positions at hand-off are part of the contract:
//!
//! | stage     | on entry the cursor is on  | the hook                    | on return the cursor is on    |
//! |-----------|----------------------------|-----------------------------|-------------------------------|
//! | parse     | the construct name token   | yields interior events      | first token after the block   |
//! | compose   | `ConstructStart`           | consumes through the end    | the matching `ConstructEnd`   |
//! | emit      | `ConstructStart`           | writes the whole block      | the matching `ConstructEnd`   |
//!
//! The parse and serialize stages emit `ConstructStart`/`ConstructEnd` themselves; the hook only
//! produces what lies between them.

use crate::moon::ast::ConstructNode;
use crate::moon::cursor::Cursor;
use crate::moon::error::Error;
use crate::moon::event::Event;
use crate::moon::hooks::HookRegistry;
use crate::moon::token::Token;
use crate::moon::value::{Value, ValueKind};

/// Resumable parse routine for one construct instance.
///
/// The event parser calls `next_event` until it returns `Ok(None)`, pulling one interior event
/// at a time so that parsing stays as lazy as the token stream feeding it. The registry is
/// passed along because a block ends where the next registered construct name starts.
pub trait ConstructParser {
    fn next_event(
        &mut self,
        tokens: &mut Cursor<'_, Token>,
        registry: &HookRegistry,
    ) -> Result<Option<Event>, Error>;
}

/// A named structural block, see the module docs for the cursor protocol.
pub trait ConstructHook: Send + Sync {
    /// Unique name including the `@` marker, e.g. `@object`.
    fn name(&self) -> &str;

    /// Value kinds this construct represents when dumping.
    fn represents(&self) -> &[ValueKind];

    /// Fresh parse routine, one per block.
    fn parser(&self) -> Box<dyn ConstructParser>;

    fn compose(&self, events: &mut Cursor<'_, Event>) -> Result<ConstructNode, Error>;

    fn construct(&self, node: &ConstructNode, registry: &HookRegistry) -> Result<Value, Error>;

    fn represent(
        &self,
        identifier: &str,
        value: &Value,
        registry: &HookRegistry,
    ) -> Result<ConstructNode, Error>;

    /// Interior events of a node: identifier, then whatever the block holds.
    fn serialize(&self, node: &ConstructNode) -> Result<Vec<Event>, Error>;

    fn emit(&self, events: &mut Cursor<'_, Event>, out: &mut String) -> Result<(), Error>;
}
