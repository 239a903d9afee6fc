//! serbridge-logging - Tracing to host-callback bridge
//!
//! Failure diagnosis for the gateway is log-only: every sentinel return
//! has a corresponding log line. This crate routes those lines to the
//! host process:
//! - [`HostLogCallback`] C function-pointer type the host may install
//! - [`LogSink`] holding the callback and the dynamic level filter
//! - [`BridgeLogLayer`] tracing layer feeding the sink
//!
//! With no host callback installed, records fall back to stderr so
//! diagnostics are never silently dropped.

mod callback;
mod layer;

pub use callback::{HostLogCallback, LogSink};
pub use layer::{BridgeLogLayer, init_logging};
pub use serbridge_core::LogLevel;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{BridgeLogLayer, HostLogCallback, LogLevel, LogSink, init_logging};
}
