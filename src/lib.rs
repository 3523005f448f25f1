//! # moon
//!
//! Reader and writer for MOON, a small block-structured notation:
//!
//! ```text
//! @object me
//!     name: Alex
//!     age: 30
//! ```
//!
//! Loading turns text into a mapping of identifier to fields, dumping does the reverse. Both
//! directions run through a chain of lazy stages (see [`moon::pipeline`]) whose grammar is
//! supplied by the hooks of a [`HookRegistry`].
//!
//! ```ignore
//! let document = moon::from_str("@object me\n    age: 30\n")?;
//! assert_eq!(document["me"]["age"], 30);
//! ```

pub mod moon;

pub use moon::error::{Error, Result};
pub use moon::fileio::{encoding_for_label, Encoding, Sink, Source};
pub use moon::hooks::{ConstructHook, ConstructParser, HookRegistry, TypeHook};
pub use moon::pipeline::{
    dump, dump_encoded, from_str, load, load_encoded, to_string, Moon,
};
pub use moon::value::{Document, Value, ValueKind};
