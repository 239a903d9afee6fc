//! Panic containment at the FFI boundary
//!
//! A panic unwinding across an `extern "C"` boundary aborts the process,
//! and this library's contract is that no entry point ever takes the host
//! down. Callback panics are already captured at the invocation site; this
//! guard is the outer line for everything else.

use std::any::Any;
use std::panic;

/// Run an FFI entry body, converting any panic into the entry's sentinel
///
/// The panic is logged with the entry point name; the caller observes the
/// same `NULL`/`0` sentinel as any other handled failure.
pub(crate) fn catch_panic<F, R>(entry: &'static str, sentinel: R, f: F) -> R
where
    F: FnOnce() -> R + panic::UnwindSafe,
{
    match panic::catch_unwind(f) {
        Ok(value) => value,
        Err(payload) => {
            tracing::error!(
                entry = entry,
                "panic caught at the boundary: {}",
                panic_to_string(payload.as_ref())
            );
            sentinel
        }
    }
}

fn panic_to_string(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown payload".to_string()
    }
}

/// Install a process panic hook that routes panics through the log bridge
///
/// Called during initialization so that panic locations reach the host's
/// log callback instead of only the default stderr writer. The hook is
/// process-global and replaces any previously installed hook.
pub(crate) fn install_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        let payload = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown payload".to_string()
        };

        match panic_info.location() {
            Some(location) => tracing::error!(
                "panic at {}:{}:{}: {}",
                location.file(),
                location.line(),
                location.column(),
                payload
            ),
            None => tracing::error!("panic at unknown location: {}", payload),
        }
    }));
}

#[cfg(test)]
#[path = "panic_guard/panic_guard_tests.rs"]
mod panic_guard_tests;
