//! The call gateway
//!
//! One state machine drives every public entry point: acquire the runtime
//! lock, resolve the named callback, construct the inward value, invoke,
//! validate the result, copy outward. Each stage has a failure exit that
//! logs once (three-level context plus the stable error code) and
//! surfaces the sentinel; the lock guard is scoped, so every exit path
//! releases it.

use serbridge_core::{CallContext, GatewayError, GatewayResult};
use serbridge_runtime::{NamedEntry, RuntimeLock, Value};

/// Log one handled failure with its context and stable code
pub(crate) fn log_failure(ctx: CallContext, err: &GatewayError) {
    tracing::warn!(context = %ctx, code = err.error_code(), "gateway call failed: {err}");
}

/// Fail-fast check on the caller's thread registration
///
/// The underlying runtime treats an unregistered calling thread as
/// undefined behavior; the gateway refuses such callers up front unless
/// the embedding disabled the guard at startup.
fn check_thread(entry: &'static str) -> GatewayResult<()> {
    if serbridge_runtime::strict_guard_enabled()
        && !serbridge_runtime::current_thread_registered()
    {
        let err = GatewayError::ThreadNotRegistered;
        log_failure(CallContext::new(entry, "thread_guard"), &err);
        return Err(err);
    }
    Ok(())
}

/// Run one gateway call against the callback registered under `name`
///
/// Returns the validated result bytes, already independent of any
/// runtime-held memory. The runtime lock is held from just after the
/// thread check until return.
pub(crate) fn call(
    entry: &'static str,
    name: &'static str,
    input: &[u8],
) -> GatewayResult<Vec<u8>> {
    check_thread(entry)?;

    let lock = match RuntimeLock::global() {
        Ok(lock) => lock,
        Err(err) => {
            log_failure(CallContext::new(entry, "acquire"), &err);
            return Err(err);
        }
    };
    let guard = lock.acquire();

    let callback = match guard.registry().resolve(name) {
        Some(NamedEntry::Function(callback)) => callback,
        Some(other) => {
            let err = GatewayError::TypeMismatch {
                expected: "a callable entry",
                actual: other.kind_name().into(),
            };
            log_failure(CallContext::new(entry, "resolve").with_op("entry_kind"), &err);
            return Err(err);
        }
        None => {
            let err = GatewayError::CallbackMissing { name: name.into() };
            log_failure(CallContext::new(entry, "resolve"), &err);
            return Err(err);
        }
    };

    let argument = Value::from_slice(input);

    let value = match guard.invoke(name, callback, argument) {
        Ok(value) => value,
        Err(exception) => {
            let err = GatewayError::ExceptionRaised {
                name: name.into(),
                message: exception.message().into(),
            };
            log_failure(CallContext::new(entry, "invoke").with_op("callback"), &err);
            return Err(err);
        }
    };

    match value {
        Value::Bytes(bytes) => Ok(bytes),
        other => {
            let err = GatewayError::TypeMismatch {
                expected: "a string-shaped result",
                actual: other.shape_name().into(),
            };
            log_failure(CallContext::new(entry, "validate").with_op("result"), &err);
            Err(err)
        }
    }
}

/// Fetch a registered constant; the digest accessor's variant of the
/// machine, with the invocation stage replaced by a registry read
pub(crate) fn fetch_constant(entry: &'static str, name: &'static str) -> GatewayResult<Vec<u8>> {
    check_thread(entry)?;

    let lock = match RuntimeLock::global() {
        Ok(lock) => lock,
        Err(err) => {
            log_failure(CallContext::new(entry, "acquire"), &err);
            return Err(err);
        }
    };
    let guard = lock.acquire();

    let value = match guard.registry().resolve(name) {
        Some(NamedEntry::Constant(value)) => value,
        Some(other) => {
            let err = GatewayError::TypeMismatch {
                expected: "a constant entry",
                actual: other.kind_name().into(),
            };
            log_failure(CallContext::new(entry, "resolve").with_op("entry_kind"), &err);
            return Err(err);
        }
        None => {
            let err = GatewayError::CallbackMissing { name: name.into() };
            log_failure(CallContext::new(entry, "resolve"), &err);
            return Err(err);
        }
    };

    match value.as_bytes() {
        Some(bytes) => Ok(bytes.to_vec()),
        None => {
            let err = GatewayError::TypeMismatch {
                expected: "a string-shaped constant",
                actual: value.shape_name().into(),
            };
            log_failure(CallContext::new(entry, "validate").with_op("constant"), &err);
            Err(err)
        }
    }
}
