//! Hook registry
//!
//! Holds the construct hooks by name, the value kind each construct represents, and the ordered
//! list of type hooks. Registration validates the hook metadata up front, so a registry that was
//! built without error is consistent for every stage that reads it.

use crate::moon::error::RegistryError;
use crate::moon::hooks::types::{represent_builtin, resolve_builtin};
use crate::moon::hooks::{ConstructHook, ObjectHook, TypeHook};
use crate::moon::value::{Value, ValueKind};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static CONSTRUCT_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^@[^\s,:'"]+$"#).unwrap());

/// Registry of construct and type hooks
///
/// # Examples
///
/// ```ignore
/// let mut registry = HookRegistry::with_defaults();
/// registry.register(MyListHook)?;
/// registry.register_type(MyDateHook);
///
/// let hook = registry.construct("@object").unwrap();
/// ```
pub struct HookRegistry {
    constructs: HashMap<String, Box<dyn ConstructHook>>,
    representers: HashMap<ValueKind, String>,
    types: Vec<Box<dyn TypeHook>>,
}

impl HookRegistry {
    /// Create a registry without any hook
    pub fn new() -> Self {
        HookRegistry {
            constructs: HashMap::new(),
            representers: HashMap::new(),
            types: Vec::new(),
        }
    }

    /// Register a construct hook
    ///
    /// Fails if the name is not `@` followed by a single word, if the name is taken, or if one of
    /// the value kinds it represents is already claimed by another construct.
    pub fn register<H: ConstructHook + 'static>(&mut self, hook: H) -> Result<(), RegistryError> {
        let name = hook.name().to_string();
        if !CONSTRUCT_NAME.is_match(&name) {
            return Err(RegistryError::InvalidName(name));
        }
        if self.constructs.contains_key(&name) {
            return Err(RegistryError::DuplicateConstruct(name));
        }
        for kind in hook.represents() {
            if let Some(existing) = self.representers.get(kind) {
                return Err(RegistryError::DuplicateRepresenter {
                    kind: *kind,
                    existing: existing.clone(),
                });
            }
        }

        self.insert(hook);
        Ok(())
    }

    fn insert<H: ConstructHook + 'static>(&mut self, hook: H) {
        let name = hook.name().to_string();
        for kind in hook.represents() {
            self.representers.insert(*kind, name.clone());
        }
        tracing::debug!(construct = %name, represents = ?hook.represents(), "registered construct hook");
        self.constructs.insert(name, Box::new(hook));
    }

    /// Append a type hook; hooks are tried in registration order
    pub fn register_type<H: TypeHook + 'static>(&mut self, hook: H) {
        tracing::debug!(type_hook = hook.name(), "registered type hook");
        self.types.push(Box::new(hook));
    }

    pub fn construct(&self, name: &str) -> Option<&dyn ConstructHook> {
        self.constructs.get(name).map(|hook| hook.as_ref())
    }

    /// Check if a word names a registered construct
    pub fn has(&self, name: &str) -> bool {
        self.constructs.contains_key(name)
    }

    /// Construct that represents values of the given kind
    pub fn representer(&self, kind: ValueKind) -> Option<&dyn ConstructHook> {
        self.representers
            .get(&kind)
            .and_then(|name| self.construct(name))
    }

    /// List all construct names (sorted)
    pub fn list_constructs(&self) -> Vec<String> {
        let mut names: Vec<_> = self.constructs.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn type_hooks(&self) -> impl Iterator<Item = &dyn TypeHook> {
        self.types.iter().map(|hook| hook.as_ref())
    }

    pub fn resolve_scalar(&self, text: &str) -> Value {
        self.types
            .iter()
            .find_map(|hook| hook.resolve(text))
            .unwrap_or_else(|| resolve_builtin(text))
    }

    /// Scalar text of a value, `None` if neither a type hook nor the built-in rules can encode it
    pub fn represent_scalar(&self, value: &Value) -> Option<String> {
        self.types
            .iter()
            .find_map(|hook| hook.represent(value))
            .or_else(|| represent_builtin(value))
    }

    /// Create a registry with the built-in constructs
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        // Register built-in constructs
        registry.insert(ObjectHook);

        registry
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("constructs", &self.list_constructs())
            .field("types", &self.types.iter().map(|t| t.name()).collect::<Vec<_>>())
            .finish()
    }
}
