//! Native-thread registration
//!
//! Every native thread that calls into the runtime must register once
//! before its first lock acquisition. The runtime itself treats a missing
//! registration as undefined behavior; the gateway checks the registered
//! set and fails fast instead. The check can be disabled for embeddings
//! that guarantee registration out of band.

use dashmap::DashSet;
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, ThreadId};

static REGISTERED: OnceCell<DashSet<ThreadId>> = OnceCell::new();
static STRICT_GUARD: AtomicBool = AtomicBool::new(true);

fn registered_set() -> &'static DashSet<ThreadId> {
    REGISTERED.get_or_init(DashSet::new)
}

/// Register the current native thread with the runtime
///
/// Returns `false` (with a warning logged) when the thread was already
/// registered; registering twice is otherwise harmless.
pub fn register_current_thread() -> bool {
    let fresh = registered_set().insert(thread::current().id());
    if !fresh {
        tracing::warn!("thread is already registered with the runtime");
    }
    fresh
}

/// Whether the current thread has registered
pub fn current_thread_registered() -> bool {
    registered_set().contains(&thread::current().id())
}

/// Enable or disable the fail-fast check on unregistered callers
pub fn set_strict_guard(enabled: bool) {
    STRICT_GUARD.store(enabled, Ordering::SeqCst);
}

pub fn strict_guard_enabled() -> bool {
    STRICT_GUARD.load(Ordering::SeqCst)
}
