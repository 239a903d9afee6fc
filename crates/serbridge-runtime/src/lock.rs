//! The global runtime lock

use crate::runtime::Runtime;
use once_cell::sync::OnceCell;
use parking_lot::{Mutex, MutexGuard};
use serbridge_core::{GatewayError, GatewayResult};

/// Scoped token for exclusive access to the embedded runtime
///
/// Dropping the guard releases the lock; there is no bare release, so
/// every exit path of a gateway call releases exactly once.
pub type RuntimeGuard<'a> = MutexGuard<'a, Runtime>;

/// Process-wide mutual-exclusion gate around the embedded runtime
///
/// The runtime's internal state is not safe for concurrent native access;
/// this lock is the sole serialization point. At most one gateway call
/// executes inside the runtime at any instant, regardless of how many
/// native threads call concurrently. Acquisition order between waiting
/// threads is whatever [`parking_lot`] provides.
pub struct RuntimeLock {
    inner: Mutex<Runtime>,
}

static RUNTIME: OnceCell<RuntimeLock> = OnceCell::new();

impl RuntimeLock {
    /// Install the process-wide runtime; called once from bootstrap
    pub(crate) fn install(runtime: Runtime) -> GatewayResult<()> {
        RUNTIME
            .set(RuntimeLock {
                inner: Mutex::new(runtime),
            })
            .map_err(|_| GatewayError::StartupFailed("runtime is already initialized".into()))
    }

    /// The process-wide lock, or `NotInitialized` before bootstrap
    pub fn global() -> GatewayResult<&'static RuntimeLock> {
        RUNTIME.get().ok_or(GatewayError::NotInitialized)
    }

    pub fn initialized() -> bool {
        RUNTIME.get().is_some()
    }

    /// Block until the runtime is free, then take exclusive access
    ///
    /// Blocks indefinitely: no timeout, no cancellation. A caller that
    /// re-enters while holding the guard deadlocks, as the underlying
    /// runtime contract demands.
    pub fn acquire(&self) -> RuntimeGuard<'_> {
        self.inner.lock()
    }
}
