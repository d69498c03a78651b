#![cfg(test)]

use super::*;
use crate::util::alloc::CountedDrop;

#[test]
fn test_duplicate_str_owns_a_copy() {
    let mut model = DuplicateStr;
    let source = String::from("hello");

    let stored = model.adopt(source.as_str()).unwrap();
    assert_eq!(model.view(&stored), "hello");
    assert_ne!(
        stored.as_ptr(),
        source.as_ptr(),
        "Duplicating should produce a separate buffer."
    );

    model.release(stored);
    assert_eq!(source, "hello", "The caller's buffer should be untouched.");
}

#[test]
fn test_take_string_moves_the_buffer() {
    let mut model = TakeString;
    let source = String::from("hello");
    let buffer = source.as_ptr();

    let stored = model.adopt(source).unwrap();
    assert_eq!(stored.as_ptr(), buffer, "Taking ownership shouldn't copy the buffer.");
    assert_eq!(model.view(&stored), "hello");
}

#[test]
fn test_duplicate_cstr() {
    let mut model = DuplicateCStr;

    let stored = model.adopt(c"bytes").unwrap();
    assert_eq!(model.view(&stored).to_bytes_with_nul(), b"bytes\0");
}

#[test]
fn test_owned_release_drops() {
    let counter = CountedDrop::new(0);
    let mut model = Owned::<CountedDrop>::new();

    let stored = model.adopt(counter.clone()).unwrap();
    assert_eq!(counter.drops(), 0);

    model.release(stored);
    assert_eq!(counter.drops(), 1, "Releasing an owned value should drop it.");
}
