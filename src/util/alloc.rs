//! Allocation fixtures for tests.

use std::alloc::Layout;
use std::cell::Cell;
use std::ptr::NonNull;
use std::rc::Rc;

use crate::allocator::{Global, RegionAllocator};

/// A zero-sized element, which must never cause an allocation.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ZeroSizedType;

/// A value that increments a shared counter when dropped.
#[derive(Debug, Clone)]
pub struct CountedDrop(pub Rc<Cell<usize>>);

impl CountedDrop {
    /// Creates a CountedDrop with a fresh counter starting at `value`.
    pub fn new(value: usize) -> CountedDrop {
        CountedDrop(Rc::new(Cell::new(value)))
    }

    /// Returns the number of drops recorded so far.
    pub fn drops(&self) -> usize {
        self.0.get()
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

/// Forwards to [`Global`], but can be told to refuse upcoming requests. Every request and return
/// is counted so that tests can check for leaks.
#[derive(Debug, Default)]
pub struct FlakyAllocator {
    refuse: Cell<usize>,
    allocated: Cell<usize>,
    deallocated: Cell<usize>,
    refused: Cell<usize>,
}

impl FlakyAllocator {
    /// Creates an allocator which grants every request.
    pub fn new() -> FlakyAllocator {
        FlakyAllocator::default()
    }

    /// Refuses the next `count` requests.
    pub fn refuse_next(&self, count: usize) {
        self.refuse.set(count);
    }

    /// Returns the number of regions handed out and not yet returned.
    pub fn outstanding(&self) -> usize {
        self.allocated.get() - self.deallocated.get()
    }

    /// Returns the number of granted requests.
    pub fn allocated(&self) -> usize {
        self.allocated.get()
    }

    /// Returns the number of refused requests.
    pub fn refused(&self) -> usize {
        self.refused.get()
    }
}

impl RegionAllocator for FlakyAllocator {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        if self.refuse.get() > 0 {
            self.refuse.set(self.refuse.get() - 1);
            self.refused.set(self.refused.get() + 1);
            return None;
        }

        let ptr = Global.allocate(layout)?;
        self.allocated.set(self.allocated.get() + 1);
        Some(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.deallocated.set(self.deallocated.get() + 1);
        // SAFETY: Every granted request came from Global, so it is returned there.
        unsafe { Global.deallocate(ptr, layout) }
    }
}
