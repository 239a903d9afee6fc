//! Shared test embedding
//!
//! Boots the gateway once per test process and registers a deterministic
//! test codec under the standard callback names, playing the role of the
//! embedded runtime's startup sequence.
//!
//! Codec map:
//! - every `*_bin2json` wraps its input as `{"data":"<hex>"}`
//! - every `*_json2bin` is the exact inverse
//! - `to/of_internal_roundtrippable` tag with `rt:` over hex
//! - `to/of_internal_queryable_v0` tag with `q0:` over hex
//! - `to/of_internal_queryable_v1` tag with `q1:` over hex
//! - `to_developer_repr`, `to_enduser_readable_text`,
//!   `to_pretty_machine_json`, `hash_v1`, `execute` are deterministic
//!   one-way transforms
//! - `hash_v0` raises an interpreter exception
//! - `of_unknown_json` panics
//! - `to_hashable_repr` returns a non-string value
//! - `to_url_string` is deliberately never registered
//! - the `digest` constant is a fixed identity string

#![allow(dead_code)]

use serbridge_ffi::{PayloadKind, RuntimeException, Value, with_registry};
use std::ffi::{CStr, CString, c_char};
use std::sync::Once;

pub const DIGEST_IDENTITY: &[u8] = b"serbridge-test-identity-7f3a";

static INIT: Once = Once::new();

/// Boot and populate the runtime once, then register the calling thread
pub fn setup() {
    INIT.call_once(|| {
        unsafe {
            let token = serbridge_ffi::serbridge_init();
            assert!(!token.is_null(), "init must hand back a status token");
            serbridge_ffi::serbridge_string_free(token);
        }
        register_test_runtime();
    });
    unsafe { serbridge_ffi::serbridge_register_thread() };
}

fn require_bytes(value: &Value) -> Result<Vec<u8>, RuntimeException> {
    value
        .as_bytes()
        .map(<[u8]>::to_vec)
        .ok_or_else(|| RuntimeException::new("argument is not string-shaped"))
}

pub fn wrap_json(bytes: &[u8]) -> Vec<u8> {
    format!("{{\"data\":\"{}\"}}", hex::encode(bytes)).into_bytes()
}

pub fn unwrap_json(text: &[u8]) -> Result<Vec<u8>, RuntimeException> {
    let text = std::str::from_utf8(text)
        .map_err(|_| RuntimeException::new("payload is not UTF-8"))?;
    let inner = text
        .strip_prefix("{\"data\":\"")
        .and_then(|t| t.strip_suffix("\"}"))
        .ok_or_else(|| RuntimeException::new("payload does not match the codec envelope"))?;
    hex::decode(inner).map_err(|_| RuntimeException::new("payload hex is malformed"))
}

pub fn tagged(tag: &str, bytes: &[u8]) -> Vec<u8> {
    format!("{tag}:{}", hex::encode(bytes)).into_bytes()
}

pub fn untagged(tag: &str, bytes: &[u8]) -> Result<Vec<u8>, RuntimeException> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| RuntimeException::new("tagged payload is not UTF-8"))?;
    let inner = text
        .strip_prefix(tag)
        .and_then(|t| t.strip_prefix(':'))
        .ok_or_else(|| RuntimeException::new("payload carries the wrong tag"))?;
    hex::decode(inner).map_err(|_| RuntimeException::new("tagged payload hex is malformed"))
}

fn register_test_runtime() {
    with_registry(|registry| {
        for kind in PayloadKind::ALL {
            registry.register_function(kind.encode_callback(), |v| {
                Ok(Value::Bytes(wrap_json(&require_bytes(&v)?)))
            });
            registry.register_function(kind.decode_callback(), |v| {
                Ok(Value::Bytes(unwrap_json(&require_bytes(&v)?)?))
            });
        }

        registry.register_function("to_internal_roundtrippable", |v| {
            Ok(Value::Bytes(tagged("rt", &require_bytes(&v)?)))
        });
        registry.register_function("of_internal_roundtrippable", |v| {
            Ok(Value::Bytes(untagged("rt", &require_bytes(&v)?)?))
        });
        registry.register_function("to_internal_queryable_v0", |v| {
            Ok(Value::Bytes(tagged("q0", &require_bytes(&v)?)))
        });
        registry.register_function("of_internal_queryable_v0", |v| {
            Ok(Value::Bytes(untagged("q0", &require_bytes(&v)?)?))
        });
        registry.register_function("to_internal_queryable_v1", |v| {
            Ok(Value::Bytes(tagged("q1", &require_bytes(&v)?)))
        });
        registry.register_function("of_internal_queryable_v1", |v| {
            Ok(Value::Bytes(untagged("q1", &require_bytes(&v)?)?))
        });

        registry.register_function("to_developer_repr", |v| {
            let bytes = require_bytes(&v)?;
            Ok(Value::Bytes(
                format!("<value {} bytes>", bytes.len()).into_bytes(),
            ))
        });
        registry.register_function("to_enduser_readable_text", |v| {
            let bytes = require_bytes(&v)?;
            let mut out = b"text: ".to_vec();
            out.extend_from_slice(&bytes);
            Ok(Value::Bytes(out))
        });
        registry.register_function("to_pretty_machine_json", |v| {
            Ok(Value::Bytes(wrap_json(&require_bytes(&v)?)))
        });
        registry.register_function("hash_v1", |v| {
            let bytes = require_bytes(&v)?;
            let folded = bytes
                .iter()
                .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(*b)));
            Ok(Value::Bytes(format!("h1-{folded:08x}").into_bytes()))
        });
        registry.register_function("execute", |v| Ok(Value::Bytes(require_bytes(&v)?)));

        registry.register_function("hash_v0", |_| {
            Err(RuntimeException::new("hash_v0 rejected the value"))
        });
        registry.register_function("of_unknown_json", |_| panic!("unknown json payload"));
        registry.register_function("to_hashable_repr", |_| Ok(Value::Unit));
        // to_url_string stays unregistered on purpose.

        registry.register_constant("digest", Value::from_slice(DIGEST_IDENTITY));
    })
    .expect("runtime must be booted before registration");
}

// Thin wrappers over the extern surface that copy results into Vecs and
// free the caller-owned buffers.

pub fn call_encode(
    f: unsafe extern "C" fn(*const u8, i32) -> *mut c_char,
    input: &[u8],
) -> Option<Vec<u8>> {
    let raw = unsafe { f(input.as_ptr(), input.len() as i32) };
    if raw.is_null() {
        return None;
    }
    let bytes = unsafe { CStr::from_ptr(raw) }.to_bytes().to_vec();
    unsafe { serbridge_ffi::serbridge_string_free(raw) };
    Some(bytes)
}

pub fn call_decode(
    f: unsafe extern "C" fn(*const c_char, *mut *mut u8) -> i32,
    json: &[u8],
) -> Option<Vec<u8>> {
    let json = CString::new(json).expect("test JSON must not contain NULs");
    let mut out: *mut u8 = std::ptr::null_mut();
    let len = unsafe { f(json.as_ptr(), &mut out) };
    if out.is_null() {
        return None;
    }
    let bytes = unsafe { std::slice::from_raw_parts(out, len as usize) }.to_vec();
    unsafe { serbridge_ffi::serbridge_bytes_free(out, len) };
    Some(bytes)
}

pub fn call_convert(
    f: unsafe extern "C" fn(*const u8, i32, *mut *mut u8) -> i32,
    input: &[u8],
) -> Option<Vec<u8>> {
    let mut out: *mut u8 = std::ptr::null_mut();
    let len = unsafe { f(input.as_ptr(), input.len() as i32, &mut out) };
    if out.is_null() {
        return None;
    }
    let bytes = unsafe { std::slice::from_raw_parts(out, len as usize) }.to_vec();
    unsafe { serbridge_ffi::serbridge_bytes_free(out, len) };
    Some(bytes)
}

pub fn call_digest() -> Option<Vec<u8>> {
    let raw = unsafe { serbridge_ffi::digest() };
    if raw.is_null() {
        return None;
    }
    let bytes = unsafe { CStr::from_ptr(raw) }.to_bytes().to_vec();
    unsafe { serbridge_ffi::serbridge_string_free(raw) };
    Some(bytes)
}
