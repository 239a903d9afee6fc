//! Host log callback management

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use serbridge_core::LogLevel;
use std::sync::atomic::{AtomicU8, Ordering};

/// Host callback function type for log records
///
/// # Parameters
/// - `level`: log level (0=Trace, 1=Debug, 2=Info, 3=Warn, 4=Error)
/// - `target`: module path, null-terminated C string
/// - `message`: pointer to UTF-8 message bytes
/// - `message_len`: length of the message in bytes
///
/// # Safety
/// The `target` and `message` pointers are valid only for the duration of
/// the callback invocation; the host must copy what it wants to keep.
pub type HostLogCallback = extern "C" fn(
    level: u8,
    target: *const std::ffi::c_char,
    message: *const u8,
    message_len: usize,
);

static SINK: OnceCell<LogSink> = OnceCell::new();

/// Destination for gateway log records
///
/// Holds the optional host callback and the dynamic level filter. When no
/// callback is installed, records go to stderr instead of being dropped.
pub struct LogSink {
    callback: RwLock<Option<HostLogCallback>>,
    level: AtomicU8,
}

impl LogSink {
    pub fn new() -> Self {
        Self {
            callback: RwLock::new(None),
            level: AtomicU8::new(LogLevel::Info as u8),
        }
    }

    /// The process-wide sink instance
    pub fn global() -> &'static LogSink {
        SINK.get_or_init(LogSink::new)
    }

    pub fn set_callback(&self, callback: Option<HostLogCallback>) {
        let mut guard = self.callback.write();
        *guard = callback;
    }

    pub fn callback(&self) -> Option<HostLogCallback> {
        *self.callback.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::SeqCst))
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.level()
    }

    /// Forward one record to the host callback, or stderr when none is set
    pub fn emit(&self, level: LogLevel, target: &str, message: &str) {
        if !self.is_enabled(level) {
            return;
        }

        match self.callback() {
            Some(callback) => {
                let target_cstring = match std::ffi::CString::new(target) {
                    Ok(s) => s,
                    Err(_) => return,
                };
                callback(
                    level as u8,
                    target_cstring.as_ptr(),
                    message.as_ptr(),
                    message.len(),
                );
            }
            None => {
                eprintln!("[{level} {target}] {message}");
            }
        }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}
