#![allow(non_snake_case)]

use super::*;
use parking_lot::Mutex;

static CAPTURED: Mutex<Vec<(u8, String)>> = Mutex::new(Vec::new());

extern "C" fn capturing_callback(
    level: u8,
    _target: *const std::ffi::c_char,
    message: *const u8,
    message_len: usize,
) {
    // SAFETY: the sink guarantees message is valid for message_len bytes
    // during the callback.
    let bytes = unsafe { std::slice::from_raw_parts(message, message_len) };
    CAPTURED
        .lock()
        .push((level, String::from_utf8_lossy(bytes).to_string()));
}

#[test]
fn BridgeLogLayer___convert_level___maps_all_levels() {
    assert_eq!(BridgeLogLayer::convert_level(&Level::TRACE), LogLevel::Trace);
    assert_eq!(BridgeLogLayer::convert_level(&Level::DEBUG), LogLevel::Debug);
    assert_eq!(BridgeLogLayer::convert_level(&Level::INFO), LogLevel::Info);
    assert_eq!(BridgeLogLayer::convert_level(&Level::WARN), LogLevel::Warn);
    assert_eq!(BridgeLogLayer::convert_level(&Level::ERROR), LogLevel::Error);
}

#[test]
fn init_logging___events___reach_the_installed_callback() {
    LogSink::global().set_callback(Some(capturing_callback));
    init_logging(LogLevel::Trace);

    tracing::warn!(code = 3u32, "layer test record");

    let captured = CAPTURED.lock();
    assert!(
        captured
            .iter()
            .any(|(level, text)| *level == LogLevel::Warn as u8
                && text.contains("layer test record")
                && text.contains("code=3"))
    );
}

#[test]
fn init_logging___structured_fields___are_appended_to_the_message() {
    LogSink::global().set_callback(Some(capturing_callback));
    init_logging(LogLevel::Trace);

    tracing::error!(entry = "handler_bin2json", stage = "resolve", "lookup failed");

    let captured = CAPTURED.lock();
    assert!(captured.iter().any(|(_, text)| {
        text.starts_with("lookup failed")
            && text.contains("entry=handler_bin2json")
            && text.contains("stage=resolve")
    }));
}
