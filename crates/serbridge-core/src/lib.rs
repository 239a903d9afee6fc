//! serbridge-core - Shared types for the serialization gateway
//!
//! This crate provides the foundational types used on both sides of the
//! FFI boundary:
//! - [`GatewayError`] for boundary failure handling
//! - [`CallContext`] for three-level failure diagnostics
//! - [`PayloadKind`] and [`ValueOp`] mapping entry points to callback names
//! - [`BridgeConfig`] for initialization-time configuration

mod config;
mod context;
mod error;
mod payload;

pub use config::BridgeConfig;
pub use context::CallContext;
pub use error::{GatewayError, GatewayResult};
pub use payload::{PayloadKind, ValueOp};

/// Log levels for host log callbacks
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Off,
        }
    }

    /// Parse a level name as it appears in [`BridgeConfig::log_level`].
    ///
    /// Unrecognized names return `None`; callers fall back to the default.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            "off" => Some(LogLevel::Off),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BridgeConfig, CallContext, GatewayError, GatewayResult, LogLevel, PayloadKind, ValueOp,
    };
}
