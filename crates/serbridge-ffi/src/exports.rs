//! C ABI exported functions
//!
//! Every entry point degrades to its sentinel (`NULL` pointer or `0`
//! length) on failure, with one log line identifying the entry point, the
//! gateway stage, and the failing sub-operation. No entry point panics
//! across the boundary or aborts the process.

use crate::buffer;
use crate::gateway;
use crate::panic_guard::catch_panic;
use serbridge_core::{BridgeConfig, CallContext, GatewayError, LogLevel, PayloadKind, ValueOp};
use serbridge_logging::{HostLogCallback, LogSink, init_logging};
use std::ffi::{CString, c_char};
use std::panic::AssertUnwindSafe;
use std::ptr;

/// Initialize the gateway with default configuration
///
/// Boots the embedded runtime, registers the initiating thread, and leaves
/// the runtime lock released. Must be called once per process before any
/// other entry point. Startup problems are logged but deliberately not
/// fatal; the status token is returned regardless.
///
/// # Returns
/// A NUL-terminated status token owned by the caller; free it with
/// `serbridge_string_free`.
///
/// # Safety
/// Safe to call from any thread; must not be called concurrently with
/// itself.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn serbridge_init() -> *mut c_char {
    catch_panic(
        "serbridge_init",
        ptr::null_mut(),
        AssertUnwindSafe(|| init_impl(BridgeConfig::default(), None)),
    )
}

/// Initialize the gateway with a JSON configuration and log callback
///
/// # Parameters
/// - `config_json`: JSON configuration bytes (may be null for defaults)
/// - `config_len`: length of `config_json`
/// - `log_callback`: optional host log callback
///
/// A malformed configuration is logged and replaced with the defaults;
/// initialization still proceeds.
///
/// # Safety
/// - `config_json` must be valid for `config_len` bytes if not null
/// - the log callback must remain valid for the lifetime of the process
#[unsafe(no_mangle)]
pub unsafe extern "C" fn serbridge_init_with_config(
    config_json: *const u8,
    config_len: usize,
    log_callback: Option<HostLogCallback>,
) -> *mut c_char {
    catch_panic(
        "serbridge_init_with_config",
        ptr::null_mut(),
        AssertUnwindSafe(|| {
            let config = if config_json.is_null() || config_len == 0 {
                BridgeConfig::default()
            } else {
                // SAFETY: caller guarantees config_json is valid for config_len bytes
                let bytes = unsafe { std::slice::from_raw_parts(config_json, config_len) };
                BridgeConfig::from_json(bytes).unwrap_or_else(|parse_err| {
                    // Logging is not up yet; the default-level sink still
                    // reaches stderr or the callback once installed.
                    eprintln!("serbridge: malformed config, using defaults: {parse_err}");
                    BridgeConfig::default()
                })
            };
            init_impl(config, log_callback)
        }),
    )
}

fn init_impl(config: BridgeConfig, log_callback: Option<HostLogCallback>) -> *mut c_char {
    if let Some(callback) = log_callback {
        LogSink::global().set_callback(Some(callback));
    }

    let level = LogLevel::from_name(&config.log_level).unwrap_or(LogLevel::Info);
    init_logging(level);
    crate::panic_guard::install_panic_hook();

    if let Err(err) = serbridge_runtime::bootstrap(&config) {
        tracing::warn!(code = err.error_code(), "startup reported a failure: {err}");
    }

    // Best-effort contract: the token is handed back even after a logged
    // startup failure.
    CString::from(c"loaded").into_raw()
}

/// Register the current native thread with the embedded runtime
///
/// Required once per thread before that thread's first gateway call.
/// Registering twice logs a warning and is otherwise a no-op.
///
/// # Safety
/// Safe to call from any thread.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn serbridge_register_thread() {
    catch_panic(
        "serbridge_register_thread",
        (),
        AssertUnwindSafe(|| {
            serbridge_runtime::register_current_thread();
        }),
    );
}

/// Set the log level (0=Trace, 1=Debug, 2=Info, 3=Warn, 4=Error, 5=Off)
///
/// # Safety
/// Safe to call from any thread.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn serbridge_set_log_level(level: u8) {
    LogSink::global().set_level(LogLevel::from_u8(level));
}

/// Free a NUL-terminated text buffer returned by this library
///
/// # Safety
/// - `ptr` must be a pointer returned by an encode entry point, `digest`,
///   or an init function (or null)
/// - must be called at most once per buffer
#[unsafe(no_mangle)]
pub unsafe extern "C" fn serbridge_string_free(ptr: *mut c_char) {
    unsafe { buffer::string_from_raw(ptr) }
}

/// Free a byte buffer returned through an out-parameter, passing back the
/// length the library returned
///
/// # Safety
/// - `(ptr, len)` must be the exact pair produced by a decode or
///   value-conversion entry point (or a null pointer)
/// - must be called at most once per buffer
#[unsafe(no_mangle)]
pub unsafe extern "C" fn serbridge_bytes_free(ptr: *mut u8, len: i32) {
    unsafe { buffer::bytes_from_raw(ptr, len) }
}

/// Return the runtime's registered identity string
///
/// Copies the `digest` constant registered by the embedded runtime's
/// startup sequence. Not tied to any caller input; two consecutive calls
/// return byte-identical content in independently owned buffers.
///
/// # Safety
/// Safe to call from any registered thread after initialization.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn digest() -> *mut c_char {
    catch_panic(
        "digest",
        ptr::null_mut(),
        AssertUnwindSafe(|| match gateway::fetch_constant("digest", "digest") {
            Ok(bytes) => text_out("digest", bytes),
            Err(_) => ptr::null_mut(),
        }),
    )
}

// Shared entry bodies. The entry-point families below are one-line
// instantiations of these three, each binding a fixed callback name.

fn text_out(entry: &'static str, bytes: Vec<u8>) -> *mut c_char {
    match buffer::text_into_raw(bytes) {
        Ok(text) => text,
        Err(err) => {
            gateway::log_failure(
                CallContext::new(entry, "copy_out").with_op("text_into_raw"),
                &err,
            );
            ptr::null_mut()
        }
    }
}

unsafe fn encode_entry(kind: PayloadKind, bytes: *const u8, length: i32) -> *mut c_char {
    let entry = kind.encode_callback();
    catch_panic(
        entry,
        ptr::null_mut(),
        AssertUnwindSafe(|| {
            // SAFETY: caller guarantees bytes is valid for length bytes
            let input = match unsafe { buffer::caller_bytes(bytes, length) } {
                Ok(slice) => slice,
                Err(err) => {
                    gateway::log_failure(CallContext::new(entry, "read_input"), &err);
                    return ptr::null_mut();
                }
            };
            match gateway::call(entry, entry, input) {
                Ok(result) => text_out(entry, result),
                Err(_) => ptr::null_mut(),
            }
        }),
    )
}

unsafe fn decode_entry(kind: PayloadKind, json: *const c_char, out_bytes: *mut *mut u8) -> i32 {
    let entry = kind.decode_callback();
    catch_panic(
        entry,
        0,
        AssertUnwindSafe(|| {
            if out_bytes.is_null() {
                let err = GatewayError::InputConstructionFailed("null output pointer".into());
                gateway::log_failure(CallContext::new(entry, "read_input"), &err);
                return 0;
            }
            // Leave a defined value behind on every failure path.
            // SAFETY: out_bytes is non-null and caller-owned
            unsafe { *out_bytes = ptr::null_mut() };

            // SAFETY: caller guarantees json is NUL-terminated when non-null
            let input = match unsafe { buffer::caller_text(json) } {
                Ok(slice) => slice,
                Err(err) => {
                    gateway::log_failure(CallContext::new(entry, "read_input"), &err);
                    return 0;
                }
            };
            bytes_out(entry, gateway::call(entry, entry, input), out_bytes)
        }),
    )
}

unsafe fn convert_entry(
    op: ValueOp,
    bytes_in: *const u8,
    length_in: i32,
    bytes_out_ptr: *mut *mut u8,
) -> i32 {
    let entry = op.callback_name();
    catch_panic(
        entry,
        0,
        AssertUnwindSafe(|| {
            if bytes_out_ptr.is_null() {
                let err = GatewayError::InputConstructionFailed("null output pointer".into());
                gateway::log_failure(CallContext::new(entry, "read_input"), &err);
                return 0;
            }
            // SAFETY: bytes_out_ptr is non-null and caller-owned
            unsafe { *bytes_out_ptr = ptr::null_mut() };

            // SAFETY: caller guarantees bytes_in is valid for length_in bytes
            let input = match unsafe { buffer::caller_bytes(bytes_in, length_in) } {
                Ok(slice) => slice,
                Err(err) => {
                    gateway::log_failure(CallContext::new(entry, "read_input"), &err);
                    return 0;
                }
            };
            bytes_out(entry, gateway::call(entry, entry, input), bytes_out_ptr)
        }),
    )
}

fn bytes_out(
    entry: &'static str,
    result: Result<Vec<u8>, GatewayError>,
    out_bytes: *mut *mut u8,
) -> i32 {
    let bytes = match result {
        Ok(bytes) => bytes,
        Err(_) => return 0,
    };
    match buffer::bytes_into_raw(bytes) {
        Ok((ptr, len)) => {
            // SAFETY: out_bytes was null-checked by the entry body
            unsafe { *out_bytes = ptr };
            len
        }
        Err(err) => {
            gateway::log_failure(
                CallContext::new(entry, "copy_out").with_op("bytes_into_raw"),
                &err,
            );
            0
        }
    }
}

// Encode family: binary payload in, NUL-terminated JSON text out.
// One fixed callback name per payload kind.
//
// # Safety (all eight)
// - `bytes` must be valid for `length` bytes, or null with `length == 0`
// - the returned buffer is freed with `serbridge_string_free`

#[unsafe(no_mangle)]
pub unsafe extern "C" fn user_fn_bin2json(bytes: *const u8, length: i32) -> *mut c_char {
    unsafe { encode_entry(PayloadKind::UserFn, bytes, length) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn user_type_bin2json(bytes: *const u8, length: i32) -> *mut c_char {
    unsafe { encode_entry(PayloadKind::UserType, bytes, length) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn handler_bin2json(bytes: *const u8, length: i32) -> *mut c_char {
    unsafe { encode_entry(PayloadKind::Handler, bytes, length) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn db_schema_bin2json(bytes: *const u8, length: i32) -> *mut c_char {
    unsafe { encode_entry(PayloadKind::DbSchema, bytes, length) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn oplist_bin2json(bytes: *const u8, length: i32) -> *mut c_char {
    unsafe { encode_entry(PayloadKind::Oplist, bytes, length) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn pos_bin2json(bytes: *const u8, length: i32) -> *mut c_char {
    unsafe { encode_entry(PayloadKind::Pos, bytes, length) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn expr_bin2json(bytes: *const u8, length: i32) -> *mut c_char {
    unsafe { encode_entry(PayloadKind::Expr, bytes, length) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn expr_with_id_bin2json(bytes: *const u8, length: i32) -> *mut c_char {
    unsafe { encode_entry(PayloadKind::ExprWithId, bytes, length) }
}

// Decode family: NUL-terminated JSON text in, binary payload out through
// the out-parameter, length returned.
//
// # Safety (all eight)
// - `json` must be a valid NUL-terminated string, or null
// - `out_bytes` must be a valid writable location
// - the returned buffer is freed with `serbridge_bytes_free`

#[unsafe(no_mangle)]
pub unsafe extern "C" fn user_fn_json2bin(json: *const c_char, out_bytes: *mut *mut u8) -> i32 {
    unsafe { decode_entry(PayloadKind::UserFn, json, out_bytes) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn user_type_json2bin(json: *const c_char, out_bytes: *mut *mut u8) -> i32 {
    unsafe { decode_entry(PayloadKind::UserType, json, out_bytes) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn handler_json2bin(json: *const c_char, out_bytes: *mut *mut u8) -> i32 {
    unsafe { decode_entry(PayloadKind::Handler, json, out_bytes) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn db_schema_json2bin(json: *const c_char, out_bytes: *mut *mut u8) -> i32 {
    unsafe { decode_entry(PayloadKind::DbSchema, json, out_bytes) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn oplist_json2bin(json: *const c_char, out_bytes: *mut *mut u8) -> i32 {
    unsafe { decode_entry(PayloadKind::Oplist, json, out_bytes) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn pos_json2bin(json: *const c_char, out_bytes: *mut *mut u8) -> i32 {
    unsafe { decode_entry(PayloadKind::Pos, json, out_bytes) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn expr_json2bin(json: *const c_char, out_bytes: *mut *mut u8) -> i32 {
    unsafe { decode_entry(PayloadKind::Expr, json, out_bytes) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn expr_with_id_json2bin(
    json: *const c_char,
    out_bytes: *mut *mut u8,
) -> i32 {
    unsafe { decode_entry(PayloadKind::ExprWithId, json, out_bytes) }
}

// Value-conversion family: binary-safe in both directions; inputs and
// outputs may contain embedded NUL bytes.
//
// # Safety (all fifteen)
// - `bytes_in` must be valid for `length_in` bytes, or null with
//   `length_in == 0`
// - `bytes_out` must be a valid writable location
// - the returned buffer is freed with `serbridge_bytes_free`

#[unsafe(no_mangle)]
pub unsafe extern "C" fn to_internal_roundtrippable(
    bytes_in: *const u8,
    length_in: i32,
    bytes_out: *mut *mut u8,
) -> i32 {
    unsafe { convert_entry(ValueOp::ToInternalRoundtrippable, bytes_in, length_in, bytes_out) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn of_internal_roundtrippable(
    bytes_in: *const u8,
    length_in: i32,
    bytes_out: *mut *mut u8,
) -> i32 {
    unsafe { convert_entry(ValueOp::OfInternalRoundtrippable, bytes_in, length_in, bytes_out) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn to_internal_queryable_v0(
    bytes_in: *const u8,
    length_in: i32,
    bytes_out: *mut *mut u8,
) -> i32 {
    unsafe { convert_entry(ValueOp::ToInternalQueryableV0, bytes_in, length_in, bytes_out) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn to_internal_queryable_v1(
    bytes_in: *const u8,
    length_in: i32,
    bytes_out: *mut *mut u8,
) -> i32 {
    unsafe { convert_entry(ValueOp::ToInternalQueryableV1, bytes_in, length_in, bytes_out) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn of_internal_queryable_v0(
    bytes_in: *const u8,
    length_in: i32,
    bytes_out: *mut *mut u8,
) -> i32 {
    unsafe { convert_entry(ValueOp::OfInternalQueryableV0, bytes_in, length_in, bytes_out) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn of_internal_queryable_v1(
    bytes_in: *const u8,
    length_in: i32,
    bytes_out: *mut *mut u8,
) -> i32 {
    unsafe { convert_entry(ValueOp::OfInternalQueryableV1, bytes_in, length_in, bytes_out) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn to_developer_repr(
    bytes_in: *const u8,
    length_in: i32,
    bytes_out: *mut *mut u8,
) -> i32 {
    unsafe { convert_entry(ValueOp::ToDeveloperRepr, bytes_in, length_in, bytes_out) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn to_enduser_readable_text(
    bytes_in: *const u8,
    length_in: i32,
    bytes_out: *mut *mut u8,
) -> i32 {
    unsafe { convert_entry(ValueOp::ToEnduserReadableText, bytes_in, length_in, bytes_out) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn to_pretty_machine_json(
    bytes_in: *const u8,
    length_in: i32,
    bytes_out: *mut *mut u8,
) -> i32 {
    unsafe { convert_entry(ValueOp::ToPrettyMachineJson, bytes_in, length_in, bytes_out) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn to_url_string(
    bytes_in: *const u8,
    length_in: i32,
    bytes_out: *mut *mut u8,
) -> i32 {
    unsafe { convert_entry(ValueOp::ToUrlString, bytes_in, length_in, bytes_out) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn to_hashable_repr(
    bytes_in: *const u8,
    length_in: i32,
    bytes_out: *mut *mut u8,
) -> i32 {
    unsafe { convert_entry(ValueOp::ToHashableRepr, bytes_in, length_in, bytes_out) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn of_unknown_json(
    bytes_in: *const u8,
    length_in: i32,
    bytes_out: *mut *mut u8,
) -> i32 {
    unsafe { convert_entry(ValueOp::OfUnknownJson, bytes_in, length_in, bytes_out) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn hash_v0(
    bytes_in: *const u8,
    length_in: i32,
    bytes_out: *mut *mut u8,
) -> i32 {
    unsafe { convert_entry(ValueOp::HashV0, bytes_in, length_in, bytes_out) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn hash_v1(
    bytes_in: *const u8,
    length_in: i32,
    bytes_out: *mut *mut u8,
) -> i32 {
    unsafe { convert_entry(ValueOp::HashV1, bytes_in, length_in, bytes_out) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn execute(
    bytes_in: *const u8,
    length_in: i32,
    bytes_out: *mut *mut u8,
) -> i32 {
    unsafe { convert_entry(ValueOp::Execute, bytes_in, length_in, bytes_out) }
}
