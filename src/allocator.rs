//! The allocator seam used by [`Region`](crate::contiguous::Region) to obtain backing storage.
//!
//! Unlike [`GlobalAlloc`](std::alloc::GlobalAlloc), a [`RegionAllocator`] is expected to fail
//! gracefully: returning [`None`] reports the failure to the caller as an
//! [`AllocationError`](crate::error::AllocationError) rather than aborting the process via
//! [`handle_alloc_error`](std::alloc::handle_alloc_error).

use std::alloc::{self, Layout};
use std::ptr::NonNull;

/// A source of contiguous memory regions.
///
/// A single allocator instance is owned by each region for its whole lifetime, so every region is
/// always returned to the allocator it came from.
pub trait RegionAllocator {
    /// Allocates a region for `layout`, returning [`None`] if the request can't be satisfied.
    ///
    /// Callers never request zero-sized layouts.
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Returns a region to the allocator.
    ///
    /// # Safety
    /// `ptr` must have been returned by [`allocate`](RegionAllocator::allocate) on this allocator
    /// with the same `layout`, and must not be used after this call.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The default allocator, backed by the global allocator from [`std::alloc`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Global;

impl RegionAllocator for Global {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        debug_assert!(layout.size() != 0);
        // SAFETY: Zero-sized layouts are never requested by regions.
        NonNull::new(unsafe { alloc::alloc(layout) })
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: It is up to the caller to ensure that ptr was allocated by this allocator (and
        // therefore the global allocator) with the same layout.
        unsafe { alloc::dealloc(ptr.as_ptr(), layout) }
    }
}

impl<A: RegionAllocator + ?Sized> RegionAllocator for &A {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        (**self).allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: Forwarded directly, the caller upholds the same contract.
        unsafe { (**self).deallocate(ptr, layout) }
    }
}
