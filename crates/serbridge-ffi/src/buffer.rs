//! Buffer transfer across the ownership boundary
//!
//! Every crossing allocates fresh memory owned by the receiving side:
//! inward views are deep-copied into runtime values by the gateway, and
//! outward results become caller-owned allocations released only through
//! the matching free function. The caller never receives a pointer into
//! runtime-managed memory, and the runtime never keeps a pointer into
//! caller memory.

use serbridge_core::{GatewayError, GatewayResult};
use std::ffi::{CStr, CString, c_char};

/// View a caller's (pointer, length) pair as a byte slice
///
/// A null pointer with zero length is the empty payload; a null pointer
/// with a nonzero length, or a negative length, cannot form a value.
///
/// # Safety
/// When non-null, `ptr` must be valid for `len` bytes for the duration of
/// the borrow.
pub unsafe fn caller_bytes<'a>(ptr: *const u8, len: i32) -> GatewayResult<&'a [u8]> {
    if len < 0 {
        return Err(GatewayError::InputConstructionFailed(format!(
            "negative input length {len}"
        )));
    }
    if ptr.is_null() {
        if len == 0 {
            Ok(&[])
        } else {
            Err(GatewayError::InputConstructionFailed(
                "null input pointer with nonzero length".into(),
            ))
        }
    } else {
        // SAFETY: caller guarantees ptr is valid for len bytes
        Ok(unsafe { std::slice::from_raw_parts(ptr, len as usize) })
    }
}

/// View a caller's NUL-terminated text as a byte slice, without the NUL
///
/// # Safety
/// When non-null, `ptr` must point to a NUL-terminated string valid for
/// the duration of the borrow.
pub unsafe fn caller_text<'a>(ptr: *const c_char) -> GatewayResult<&'a [u8]> {
    if ptr.is_null() {
        return Err(GatewayError::InputConstructionFailed(
            "null string pointer".into(),
        ));
    }
    // SAFETY: caller guarantees ptr is a valid NUL-terminated string
    Ok(unsafe { CStr::from_ptr(ptr) }.to_bytes())
}

/// Move result bytes into a fresh caller-owned NUL-terminated buffer
///
/// Allocates `len + 1` and appends the terminator. Used where the caller
/// consumes the result as narrow text; bytes with embedded NULs cannot
/// take this path and fail as a shape mismatch.
pub fn text_into_raw(bytes: Vec<u8>) -> GatewayResult<*mut c_char> {
    match CString::new(bytes) {
        Ok(text) => Ok(text.into_raw()),
        Err(_) => Err(GatewayError::TypeMismatch {
            expected: "text without embedded NUL bytes",
            actual: "bytes with embedded NUL".into(),
        }),
    }
}

/// Move result bytes into a fresh caller-owned (pointer, length) buffer
///
/// Binary-safe: embedded NULs are preserved and the exact length is
/// returned alongside. Freed with [`bytes_from_raw`].
pub fn bytes_into_raw(bytes: Vec<u8>) -> GatewayResult<(*mut u8, i32)> {
    let len = i32::try_from(bytes.len())
        .map_err(|_| GatewayError::OversizedResult { len: bytes.len() })?;
    let boxed = bytes.into_boxed_slice();
    Ok((Box::into_raw(boxed).cast::<u8>(), len))
}

/// Release a text buffer produced by [`text_into_raw`]
///
/// # Safety
/// `ptr` must have come from [`text_into_raw`] (or be null) and must not
/// be used afterwards. Must be called at most once per buffer.
pub unsafe fn string_from_raw(ptr: *mut c_char) {
    if !ptr.is_null() {
        // SAFETY: ptr was produced by CString::into_raw
        drop(unsafe { CString::from_raw(ptr) });
    }
}

/// Release a byte buffer produced by [`bytes_into_raw`]
///
/// # Safety
/// `ptr` and `len` must be the exact pair produced by [`bytes_into_raw`]
/// (or a null pointer); the buffer must not be used afterwards. Must be
/// called at most once per buffer.
pub unsafe fn bytes_from_raw(ptr: *mut u8, len: i32) {
    if ptr.is_null() || len < 0 {
        return;
    }
    let slice = std::ptr::slice_from_raw_parts_mut(ptr, len as usize);
    // SAFETY: the pair was produced by Box::into_raw on a boxed slice
    drop(unsafe { Box::from_raw(slice) });
}
