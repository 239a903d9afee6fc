//! # serbridge
//!
//! A safe C-callable gateway to an embedded serialization runtime.
//!
//! The embedded runtime is non-reentrant and owns the actual encode and
//! decode logic behind named callbacks; serbridge provides everything
//! around that boundary:
//! - a single global runtime lock so at most one call runs inside the
//!   runtime at a time
//! - per-thread registration for every calling native thread
//! - deep-copy buffer transfer in both directions, with caller-owned
//!   result buffers and matching free functions
//! - interpreter exceptions converted into logged sentinel failures that
//!   never crash the host process
//!
//! ## Embedding
//!
//! The host process initializes once, registers each calling thread, and
//! frees every returned buffer:
//!
//! ```c
//! char* token = serbridge_init();
//! serbridge_register_thread();
//!
//! char* json = handler_bin2json(payload, payload_len);
//! if (json != NULL) {
//!     /* use json */
//!     serbridge_string_free(json);
//! }
//! serbridge_string_free(token);
//! ```
//!
//! The runtime side publishes its callables through the Rust API:
//!
//! ```ignore
//! use serbridge::prelude::*;
//!
//! with_registry(|registry| {
//!     registry.register_function("handler_bin2json", |value| {
//!         let bytes = value.as_bytes().ok_or_else(|| {
//!             RuntimeException::new("expected a string-shaped value")
//!         })?;
//!         Ok(Value::Bytes(encode_handler(bytes)))
//!     });
//!     registry.register_constant("digest", Value::from_slice(IDENTITY));
//! })?;
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`serbridge_core`] - error taxonomy, payload tables, configuration
//! - [`serbridge_runtime`] - runtime values, registry, lock, threads
//! - [`serbridge_logging`] - tracing to host-callback bridge
//! - [`serbridge_ffi`] - the exported C ABI surface

pub use serbridge_core::{
    BridgeConfig, CallContext, GatewayError, GatewayResult, LogLevel, PayloadKind, ValueOp,
};
pub use serbridge_logging::{BridgeLogLayer, HostLogCallback, LogSink, init_logging};
pub use serbridge_runtime::{
    CallbackFn, NamedEntry, Registry, Runtime, RuntimeException, RuntimeGuard, RuntimeLock, Value,
    bootstrap, current_thread_registered, register_current_thread, with_registry,
};

/// Re-export of the C ABI surface, for hosts that link the facade
pub mod ffi_exports {
    pub use serbridge_ffi::*;
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use serbridge_core::prelude::*;
    pub use serbridge_logging::prelude::*;
    pub use serbridge_runtime::prelude::*;
}
