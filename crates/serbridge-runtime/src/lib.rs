//! serbridge-runtime - The embedded runtime model
//!
//! This crate models the embedding surface of the managed runtime that
//! hosts the actual encode/decode logic:
//! - [`Value`] and [`RuntimeException`] for runtime-owned data
//! - [`Registry`] of named callables and constants
//! - [`RuntimeLock`] - the single global gate around all runtime access
//! - thread registration required of every calling native thread
//! - [`bootstrap`] for one-time process startup
//!
//! The runtime is non-reentrant and single-threaded from its own
//! perspective; everything here exists to let many native threads call it
//! safely one at a time.

mod lock;
mod registry;
mod runtime;
mod thread;
mod value;

pub use lock::{RuntimeGuard, RuntimeLock};
pub use registry::{CallbackFn, NamedEntry, Registry};
pub use runtime::{Runtime, bootstrap, with_registry};
pub use thread::{
    current_thread_registered, register_current_thread, set_strict_guard, strict_guard_enabled,
};
pub use value::{RuntimeException, Value};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CallbackFn, NamedEntry, Registry, Runtime, RuntimeException, RuntimeGuard, RuntimeLock,
        Value, bootstrap, register_current_thread, with_registry,
    };
}
