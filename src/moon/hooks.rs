//! Pluggable grammar
//!
//! The pipeline stages know nothing about concrete constructs. Everything grammar specific lives
//! behind two extension points, collected in a [`HookRegistry`]:
//!
//!     - [`ConstructHook`]: a named block such as `@object`. It takes part in all six stages
//!       (parse, compose, construct, represent, serialize, emit).
//!     - [`TypeHook`]: a scalar codec, tried before the built-in scalar rules in both directions.
//!
//! The registry is an explicit value handed to every stage. It is filled before the first
//! pipeline runs and only read afterwards.

pub mod construct;
pub mod object;
pub mod registry;
pub mod types;

pub use construct::{ConstructHook, ConstructParser};
pub use object::ObjectHook;
pub use registry::HookRegistry;
pub use types::TypeHook;
