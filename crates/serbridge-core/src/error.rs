//! Error types for gateway calls

use thiserror::Error;

/// Result type alias for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Error type for gateway operations
///
/// Every variant is handled locally at the FFI boundary: logged once with
/// its [`CallContext`](crate::CallContext), then converted into the
/// documented sentinel return (`NULL` pointer or `0` length). None of these
/// ever cross the boundary as a panic or abort the process.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// A gateway entry point was called before initialization
    #[error("runtime is not initialized")]
    NotInitialized,

    /// The calling thread never registered with the runtime
    #[error("calling thread is not registered with the runtime")]
    ThreadNotRegistered,

    /// The named registry entry does not exist
    #[error("no entry named `{name}` is registered")]
    CallbackMissing { name: String },

    /// The invoked callback raised an interpreter-level error
    #[error("callback `{name}` raised: {message}")]
    ExceptionRaised { name: String, message: String },

    /// A value had the wrong shape for the boundary step consuming it
    #[error("expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: String,
    },

    /// The inward transfer could not build a runtime value
    #[error("could not construct runtime value: {0}")]
    InputConstructionFailed(String),

    /// Runtime bootstrap reported a failure
    #[error("startup failed: {0}")]
    StartupFailed(String),

    /// An outward buffer does not fit the i32 length channel
    #[error("result of {len} bytes exceeds the i32 length channel")]
    OversizedResult { len: usize },
}

impl GatewayError {
    /// Returns the stable diagnostic code included in every failure log line
    pub fn error_code(&self) -> u32 {
        match self {
            GatewayError::NotInitialized => 1,
            GatewayError::ThreadNotRegistered => 2,
            GatewayError::CallbackMissing { .. } => 3,
            GatewayError::ExceptionRaised { .. } => 4,
            GatewayError::TypeMismatch { .. } => 5,
            GatewayError::InputConstructionFailed(_) => 6,
            GatewayError::StartupFailed(_) => 7,
            GatewayError::OversizedResult { .. } => 8,
        }
    }
}
