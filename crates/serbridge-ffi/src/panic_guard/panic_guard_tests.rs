#![allow(non_snake_case)]

use super::*;
use std::panic::AssertUnwindSafe;

#[test]
fn catch_panic___no_panic___passes_the_value_through() {
    let result = catch_panic("test_entry", 0i32, AssertUnwindSafe(|| 42));

    assert_eq!(result, 42);
}

#[test]
fn catch_panic___str_panic___returns_the_sentinel() {
    let result = catch_panic(
        "test_entry",
        std::ptr::null_mut::<u8>(),
        AssertUnwindSafe(|| -> *mut u8 { panic!("boundary breach") }),
    );

    assert!(result.is_null());
}

#[test]
fn catch_panic___string_panic___returns_the_sentinel() {
    let message = String::from("formatted failure");
    let result = catch_panic(
        "test_entry",
        -1i32,
        AssertUnwindSafe(move || -> i32 { panic!("{message}") }),
    );

    assert_eq!(result, -1);
}

#[test]
fn panic_to_string___extracts_common_payloads() {
    let from_str: Box<dyn std::any::Any + Send> = Box::new("plain");
    let from_string: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
    let from_other: Box<dyn std::any::Any + Send> = Box::new(3.5f64);

    assert_eq!(panic_to_string(from_str.as_ref()), "plain");
    assert_eq!(panic_to_string(from_string.as_ref()), "owned");
    assert_eq!(panic_to_string(from_other.as_ref()), "unknown payload");
}
