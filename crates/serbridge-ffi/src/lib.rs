//! serbridge-ffi - C ABI surface of the serialization gateway
//!
//! This crate is the boundary layer: it marshals byte buffers and JSON
//! text across the FFI boundary, ferries them through the global runtime
//! lock to named callbacks registered by the embedded runtime, and copies
//! results into independently owned memory so the caller is insulated
//! from the runtime's memory management.
//!
//! # FFI Functions
//!
//! The following functions are exported with C linkage:
//!
//! - `serbridge_init` / `serbridge_init_with_config` - process bootstrap
//! - `serbridge_register_thread` - per-thread registration
//! - `serbridge_set_log_level` - dynamic log filtering
//! - `serbridge_string_free` / `serbridge_bytes_free` - buffer release
//! - `*_bin2json` - encode family (binary in, NUL-terminated JSON out)
//! - `*_json2bin` - decode family (JSON in, binary out + length)
//! - value conversions (`to_internal_roundtrippable`, `execute`, ...) -
//!   binary-safe in both directions
//! - `digest` - the runtime's registered identity string
//!
//! Failure is always the documented sentinel (`NULL` pointer or `0`
//! length) plus one log line; no entry point panics across the boundary
//! or terminates the process.

mod buffer;
mod exports;
mod gateway;
mod panic_guard;

pub use buffer::{
    bytes_from_raw, bytes_into_raw, caller_bytes, caller_text, string_from_raw, text_into_raw,
};

// Re-export FFI functions for in-process embedders and tests
pub use exports::{
    db_schema_bin2json, db_schema_json2bin, digest, execute, expr_bin2json, expr_json2bin,
    expr_with_id_bin2json, expr_with_id_json2bin, handler_bin2json, handler_json2bin, hash_v0,
    hash_v1, of_internal_queryable_v0, of_internal_queryable_v1, of_internal_roundtrippable,
    of_unknown_json, oplist_bin2json, oplist_json2bin, pos_bin2json, pos_json2bin,
    serbridge_bytes_free, serbridge_init, serbridge_init_with_config, serbridge_register_thread,
    serbridge_set_log_level, serbridge_string_free, to_developer_repr, to_enduser_readable_text,
    to_hashable_repr, to_internal_queryable_v0, to_internal_queryable_v1,
    to_internal_roundtrippable, to_pretty_machine_json, to_url_string, user_fn_bin2json,
    user_fn_json2bin, user_type_bin2json, user_type_json2bin,
};

// Re-export the embedder-facing API
pub use serbridge_core::{
    BridgeConfig, CallContext, GatewayError, GatewayResult, LogLevel, PayloadKind, ValueOp,
};
pub use serbridge_logging::{HostLogCallback, LogSink};
pub use serbridge_runtime::{
    NamedEntry, Registry, RuntimeException, RuntimeLock, Value, register_current_thread,
    with_registry,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{BridgeConfig, GatewayError, GatewayResult, PayloadKind, ValueOp};
    pub use serbridge_logging::prelude::*;
    pub use serbridge_runtime::prelude::*;
}
