//! The embedded runtime and its bootstrap

use crate::lock::RuntimeLock;
use crate::registry::{CallbackFn, Registry};
use crate::thread;
use crate::value::{RuntimeException, Value};
use serbridge_core::{BridgeConfig, GatewayResult};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// The embedded runtime: owner of the named-entry registry
///
/// Accessed only through the [`RuntimeLock`] guard, so all methods take
/// plain `&self`/`&mut self` and rely on the guard for exclusion.
pub struct Runtime {
    registry: Registry,
}

impl Runtime {
    pub(crate) fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Invoke a resolved callback with a runtime-owned argument
    ///
    /// The callback may return an exception; it may also panic, and the
    /// panic is captured here into a [`RuntimeException`] so no unwind
    /// ever escapes the invocation site while the lock is held.
    pub fn invoke(
        &self,
        name: &str,
        callback: &CallbackFn,
        argument: Value,
    ) -> Result<Value, RuntimeException> {
        match panic::catch_unwind(AssertUnwindSafe(|| callback(argument))) {
            Ok(result) => result,
            Err(payload) => Err(RuntimeException::new(format!(
                "callback `{name}` panicked: {}",
                panic_message(payload.as_ref())
            ))),
        }
    }
}

/// Extract a readable message from a panic payload
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown payload".to_string()
    }
}

/// One-time bootstrap of the embedded runtime
///
/// Installs the process-wide [`RuntimeLock`] with an empty registry (the
/// embedded runtime's startup sequence populates it through
/// [`with_registry`]), applies the thread-guard setting, holds the lock
/// transiently for the boot itself, and registers the initiating thread.
/// The lock is released on return so it starts available to other callers.
///
/// A second bootstrap returns `StartupFailed`; callers treat that as a
/// loud warning, not a fatal condition.
pub fn bootstrap(config: &BridgeConfig) -> GatewayResult<()> {
    RuntimeLock::install(Runtime::new())?;
    thread::set_strict_guard(config.strict_thread_guard);

    let lock = RuntimeLock::global()?;
    {
        let guard = lock.acquire();
        tracing::info!(entries = guard.registry().len(), "embedded runtime loaded");
    }

    thread::register_current_thread();
    tracing::debug!("initiating thread registered");
    Ok(())
}

/// Run `f` with exclusive mutable access to the registry
///
/// This is the registration seam the embedded runtime's startup sequence
/// uses to publish its callables and constants. Takes and releases the
/// runtime lock around `f`.
pub fn with_registry<T>(f: impl FnOnce(&mut Registry) -> T) -> GatewayResult<T> {
    let lock = RuntimeLock::global()?;
    let mut guard = lock.acquire();
    Ok(f(guard.registry_mut()))
}
