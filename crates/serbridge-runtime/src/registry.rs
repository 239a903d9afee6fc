//! Named-entry registry
//!
//! Registration is owned entirely by the embedded runtime's startup
//! sequence; the gateway only consults the registry, never writes to it.
//! Absence of a name is an ordinary observable outcome, not a defect.

use crate::value::{RuntimeException, Value};
use std::collections::HashMap;

/// A callable registered under a stable name
///
/// Takes its argument by value: the gateway hands the callback a value the
/// runtime already owns, never a view into caller memory.
pub type CallbackFn = Box<dyn Fn(Value) -> Result<Value, RuntimeException> + Send>;

/// A registry entry: a callable, or a plain value registered by name
pub enum NamedEntry {
    Function(CallbackFn),
    Constant(Value),
}

impl NamedEntry {
    /// Entry kind used in type-mismatch diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            NamedEntry::Function(_) => "function",
            NamedEntry::Constant(_) => "constant",
        }
    }
}

/// Exact-name lookup table of callables and constants
#[derive(Default)]
pub struct Registry {
    entries: HashMap<String, NamedEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callable; a later registration under the same name
    /// replaces the earlier one
    pub fn register_function<F>(&mut self, name: impl Into<String>, callback: F)
    where
        F: Fn(Value) -> Result<Value, RuntimeException> + Send + 'static,
    {
        let name = name.into();
        tracing::debug!(name = %name, "registering callback");
        self.entries
            .insert(name, NamedEntry::Function(Box::new(callback)));
    }

    /// Register a plain named value; same replacement semantics
    pub fn register_constant(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        tracing::debug!(name = %name, "registering constant");
        self.entries.insert(name, NamedEntry::Constant(value));
    }

    /// Resolve a name to its entry; exact match only
    pub fn resolve(&self, name: &str) -> Option<&NamedEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
