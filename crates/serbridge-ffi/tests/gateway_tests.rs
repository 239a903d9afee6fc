//! Gateway behavior through the extern surface
//!
//! Every test goes through the real exported functions against the test
//! codec registered in `common`.

mod common;

use common::{call_convert, call_decode, call_digest, call_encode, setup};
use serbridge_ffi::{
    digest, handler_bin2json, handler_json2bin, hash_v0, of_unknown_json, serbridge_bytes_free,
    serbridge_string_free, to_hashable_repr, to_internal_queryable_v1, to_url_string,
};
use std::ffi::CStr;

#[test]
fn encode_then_decode_handler_round_trips_a_json_object() {
    setup();

    let encoded = call_encode(handler_bin2json, b"{}").expect("encode should succeed");
    assert_eq!(encoded, common::wrap_json(b"{}"));

    let decoded = call_decode(handler_json2bin, &encoded).expect("decode should succeed");
    assert_eq!(decoded, b"{}");
    assert_eq!(decoded.len(), 2);
}

#[test]
fn digest_returns_the_registered_identity() {
    setup();

    let first = call_digest().expect("digest should resolve");

    assert_eq!(first, common::DIGEST_IDENTITY);
}

#[test]
fn digest_twice_returns_identical_content_in_distinct_buffers() {
    setup();

    let first = unsafe { digest() };
    let second = unsafe { digest() };
    assert!(!first.is_null());
    assert!(!second.is_null());
    assert_ne!(first, second, "each call must hand out fresh memory");

    let first_bytes = unsafe { CStr::from_ptr(first) }.to_bytes().to_vec();
    let second_bytes = unsafe { CStr::from_ptr(second) }.to_bytes().to_vec();
    assert_eq!(first_bytes, second_bytes);

    unsafe {
        serbridge_string_free(first);
        serbridge_string_free(second);
    }
}

#[test]
fn missing_callback_returns_the_sentinel_and_releases_the_lock() {
    setup();

    // to_url_string is never registered by the test runtime.
    let missing = call_convert(to_url_string, b"anything");
    assert!(missing.is_none());

    // The lock must be free again: a registered path still works.
    let alive = call_convert(to_internal_queryable_v1, b"anything");
    assert_eq!(alive, Some(common::tagged("q1", b"anything")));
}

#[test]
fn raising_callback_returns_the_sentinel_and_leaves_the_runtime_usable() {
    setup();

    let raised = call_convert(hash_v0, b"payload");
    assert!(raised.is_none());

    let alive = call_convert(to_internal_queryable_v1, b"payload");
    assert_eq!(alive, Some(common::tagged("q1", b"payload")));
}

#[test]
fn panicking_callback_is_contained_and_leaves_the_runtime_usable() {
    setup();

    let panicked = call_convert(of_unknown_json, b"{\"x\":1}");
    assert!(panicked.is_none());

    let alive = call_convert(to_internal_queryable_v1, b"after panic");
    assert_eq!(alive, Some(common::tagged("q1", b"after panic")));
}

#[test]
fn non_string_result_is_a_sentinel_failure() {
    setup();

    let mismatched = call_convert(to_hashable_repr, b"payload");

    assert!(mismatched.is_none());
}

#[test]
fn unregistered_thread_is_refused_up_front() {
    setup();

    let refused = std::thread::spawn(|| {
        // No serbridge_register_thread on this thread.
        call_convert(to_internal_queryable_v1, b"refused")
    })
    .join()
    .expect("thread should complete");

    assert!(refused.is_none());

    // The registered caller is unaffected.
    let alive = call_convert(to_internal_queryable_v1, b"refused");
    assert_eq!(alive, Some(common::tagged("q1", b"refused")));
}

#[test]
fn registered_spawned_thread_is_admitted() {
    setup();

    let result = std::thread::spawn(|| {
        unsafe { serbridge_ffi::serbridge_register_thread() };
        call_convert(to_internal_queryable_v1, b"from a worker")
    })
    .join()
    .expect("thread should complete");

    assert_eq!(result, Some(common::tagged("q1", b"from a worker")));
}

#[test]
fn decode_rejects_payloads_the_codec_refuses() {
    setup();

    // Well-formed C string, but not the codec envelope: the callback
    // raises and the gateway degrades to the sentinel.
    let decoded = call_decode(handler_json2bin, b"not the envelope");

    assert!(decoded.is_none());
}

#[test]
fn failure_paths_set_the_out_pointer_to_null() {
    setup();

    let mut out: *mut u8 = std::ptr::dangling_mut();
    let len = unsafe { hash_v0(b"x".as_ptr(), 1, &mut out) };

    assert_eq!(len, 0);
    assert!(out.is_null());
}

#[test]
fn outputs_never_alias_inputs() {
    setup();

    let input = b"ownership boundary".to_vec();
    let mut out: *mut u8 = std::ptr::null_mut();
    let len = unsafe { to_internal_queryable_v1(input.as_ptr(), input.len() as i32, &mut out) };

    assert!(len > 0);
    assert!(!out.is_null());
    assert_ne!(out.cast_const(), input.as_ptr());

    unsafe { serbridge_bytes_free(out, len) };
}
