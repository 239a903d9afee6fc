//! Gateway configuration

use serde::{Deserialize, Serialize};

/// Configuration accepted by `serbridge_init_with_config`
///
/// Parsed from JSON bytes supplied by the host at startup. A malformed
/// config is logged and replaced with the defaults; initialization never
/// fails because of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Initial log level name (trace, debug, info, warn, error, off)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Reject gateway calls from threads that never registered
    ///
    /// When disabled, unregistered threads are admitted; the embedding
    /// then carries the obligation to register every calling thread out
    /// of band.
    #[serde(default = "default_strict_thread_guard")]
    pub strict_thread_guard: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_strict_thread_guard() -> bool {
    true
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            strict_thread_guard: default_strict_thread_guard(),
        }
    }
}

impl BridgeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON bytes; empty input means defaults
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes)
    }
}
