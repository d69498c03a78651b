#![cfg(test)]

use std::mem::MaybeUninit;
use std::ptr::NonNull;

use super::*;
use crate::error::AllocationError;
use crate::util::alloc::{CountedDrop, FlakyAllocator, ZeroSizedType};

#[test]
fn test_zst_support() {
    let alloc = FlakyAllocator::new();
    let mut region = Region::<ZeroSizedType, _>::new_in(&alloc);

    // SAFETY: No slots are live.
    unsafe { region.relocate(30, 0) }.unwrap();
    assert_eq!(region.size(), 30);
    assert_eq!(
        alloc.allocated(),
        0,
        "A Region of zero-sized values should never allocate."
    );
    assert_eq!(region.ptr, NonNull::dangling(), "Pointer should stay dangling for a ZST.");
}

#[test]
fn test_relocate() {
    let alloc = FlakyAllocator::new();
    let mut region = Region::<usize, _>::new_in(&alloc);
    assert_eq!(region.size(), 0);

    // SAFETY: No slots are live.
    unsafe { region.relocate(5, 0) }.unwrap();
    assert_eq!(region.size(), 5);
    assert_eq!(alloc.outstanding(), 1);

    for i in 0..5 {
        // SAFETY: i < size.
        unsafe { region.slot(i).write(MaybeUninit::new(i * 10)) };
    }

    let old_ptr = region.ptr;
    // SAFETY: The first 5 slots are initialized.
    unsafe { region.relocate(5, 5) }.unwrap();
    assert_eq!(region.ptr, old_ptr, "Relocating to the same size shouldn't move anything.");

    // SAFETY: The first 5 slots are initialized.
    unsafe { region.relocate(12, 5) }.unwrap();
    assert_eq!(region.size(), 12);
    assert_eq!(alloc.outstanding(), 1, "The old allocation should have been returned.");

    for i in 0..5 {
        assert_eq!(
            // SAFETY: The first 5 slots were moved over and are initialized.
            unsafe { region.slot(i).read().assume_init() },
            i * 10,
            "When growing, all live slots should be moved into the new Region."
        );
    }

    region.release();
    assert_eq!(region.size(), 0);
    assert_eq!(alloc.outstanding(), 0);
}

#[test]
fn test_refused_relocation_leaves_region_intact() {
    let alloc = FlakyAllocator::new();
    let mut region = Region::<u64, _>::new_in(&alloc);

    // SAFETY: No slots are live.
    unsafe { region.relocate(2, 0) }.unwrap();
    // SAFETY: 0 < size.
    unsafe { region.slot(0).write(MaybeUninit::new(7)) };
    let old_ptr = region.ptr;

    alloc.refuse_next(1);
    // SAFETY: The first slot is initialized.
    let result = unsafe { region.relocate(4, 1) };

    assert!(matches!(result, Err(AllocationError::OutOfMemory(_))));
    assert_eq!(region.size(), 2);
    assert_eq!(region.ptr, old_ptr);
    // SAFETY: The first slot is still initialized.
    assert_eq!(unsafe { region.slot(0).read().assume_init() }, 7);
}

#[test]
fn test_capacity_overflow() {
    let mut region = Region::<u64>::new();

    // SAFETY: No slots are live.
    let result = unsafe { region.relocate(usize::MAX / 2, 0) };

    assert!(
        result.is_err_and(|e| e.is_capacity_overflow()),
        "A layout larger than isize::MAX should be reported as overflow."
    );
    assert_eq!(region.size(), 0);
}

#[test]
fn test_drop_leaves_slots_alone() {
    let counter = CountedDrop::new(0);
    let alloc = FlakyAllocator::new();

    {
        let mut region = Region::<CountedDrop, _>::new_in(&alloc);
        // SAFETY: No slots are live.
        unsafe { region.relocate(3, 0) }.unwrap();
        // SAFETY: 0 < size.
        unsafe { region.slot(0).write(MaybeUninit::new(counter.clone())) };

        // SAFETY: The first slot is initialized and is read out exactly once.
        let value = unsafe { region.slot(0).read().assume_init() };
        drop(value);
    }

    assert_eq!(counter.drops(), 1, "Only the value read out of the Region should be dropped.");
    assert_eq!(alloc.outstanding(), 0, "Dropping a Region should return its allocation.");
}
