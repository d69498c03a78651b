use std::alloc::Layout;
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ptr::{self, NonNull};

use crate::allocator::{Global, RegionAllocator};
use crate::error::{AllocationError, CapacityOverflow, OutOfMemory};

/// A fixed-size block of uninitialized slots for values of `T`, obtained from a
/// [`RegionAllocator`].
///
/// A Region never reads, writes or drops its slots by itself: it only knows how many slots it has,
/// not which of them are initialized. Tracking that is the job of the owner (see
/// [`Sequence`](crate::contiguous::Sequence)). Dropping a Region returns the memory to its
/// allocator without touching the slots.
///
/// A Region of size zero (or any Region for a zero-sized `T`) holds a dangling pointer and owns
/// no allocation.
pub struct Region<T, A: RegionAllocator = Global> {
    pub(crate) ptr: NonNull<MaybeUninit<T>>,
    pub(crate) size: usize,
    pub(crate) alloc: A,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> Region<T> {
    /// Creates an empty Region using the [`Global`] allocator.
    pub const fn new() -> Region<T> {
        Region::new_in(Global)
    }
}

impl<T, A: RegionAllocator> Region<T, A> {
    /// Creates an empty Region which will allocate from `alloc`. Nothing is allocated until the
    /// size changes.
    pub const fn new_in(alloc: A) -> Region<T, A> {
        Region {
            ptr: NonNull::dangling(),
            size: 0,
            alloc,
            _phantom: PhantomData,
        }
    }

    /// Returns the number of slots in the Region.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns a reference to the allocator backing this Region.
    pub const fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns a pointer to the slot at `index`.
    ///
    /// # Safety
    /// `index` must be less than or equal to [`size`](Region::size). (A pointer one past the end is
    /// permitted but must not be dereferenced.)
    pub(crate) const unsafe fn slot(&self, index: usize) -> NonNull<MaybeUninit<T>> {
        // SAFETY: It is up to the caller to keep index in bounds of the allocation, which can't
        // exceed isize::MAX bytes.
        unsafe { self.ptr.add(index) }
    }

    /// Resizes the Region to exactly `new_size` slots, moving the first `live` slots into the new
    /// allocation bitwise. Slots past `live` are left uninitialized in the new Region.
    ///
    /// The old allocation is returned to the allocator without touching its slots, so moved values
    /// exist exactly once, in the new allocation.
    ///
    /// # Errors
    /// If the new layout can't be represented or the allocator refuses the request, an
    /// [`AllocationError`] is returned and the Region is unchanged.
    ///
    /// # Safety
    /// `live` must be no greater than both the current size and `new_size`.
    pub(crate) unsafe fn relocate(
        &mut self,
        new_size: usize,
        live: usize,
    ) -> Result<(), AllocationError> {
        debug_assert!(live <= self.size && live <= new_size);

        if new_size == self.size {
            return Ok(());
        }

        let new_ptr = self.allocate_ptr(new_size)?;

        if size_of::<T>() != 0 {
            // SAFETY: Both allocations are valid for at least live slots, properly aligned and
            // distinct, so they can't overlap. The values are moved, so the old copies are never
            // read again.
            unsafe {
                ptr::copy_nonoverlapping(self.ptr.as_ptr().cast_const(), new_ptr.as_ptr(), live);
            }
        }

        // SAFETY: new_ptr was just allocated for new_size slots and the live values have moved.
        unsafe { self.install(new_ptr, new_size) };

        Ok(())
    }

    /// Replaces the allocation with `ptr`, a block of `new_size` slots, returning the old
    /// allocation without touching its slots.
    ///
    /// # Safety
    /// `ptr` must have been returned by [`allocate_ptr`](Region::allocate_ptr) on this Region for
    /// exactly `new_size` slots, and no slot of the old allocation may still be live.
    pub(crate) unsafe fn install(&mut self, ptr: NonNull<MaybeUninit<T>>, new_size: usize) {
        self.dealloc_current();
        self.ptr = ptr;
        self.size = new_size;
    }

    /// Returns the allocation to the allocator and leaves the Region empty. Values in the slots are
    /// not dropped.
    pub(crate) fn release(&mut self) {
        self.dealloc_current();
        self.ptr = NonNull::dangling();
        self.size = 0;
    }

    /// A helper function to create a [`Layout`] for `size` slots.
    ///
    /// # Errors
    /// Returns [`CapacityOverflow`] if the layout size would exceed [`isize::MAX`].
    pub(crate) fn make_layout(size: usize) -> Result<Layout, CapacityOverflow> {
        Layout::array::<MaybeUninit<T>>(size).map_err(|_| CapacityOverflow)
    }

    /// Obtains a pointer for a Region of `size` slots. Zero-sized layouts produce a dangling
    /// pointer without consulting the allocator.
    pub(crate) fn allocate_ptr(
        &self,
        size: usize,
    ) -> Result<NonNull<MaybeUninit<T>>, AllocationError> {
        let layout = Self::make_layout(size)?;

        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }

        match self.alloc.allocate(layout) {
            Some(ptr) => Ok(ptr.cast()),
            None => {
                log::error!("failed to allocate region of {} slots ({} bytes)", size, layout.size());
                Err(OutOfMemory {
                    slots: size,
                    bytes: layout.size(),
                }.into())
            },
        }
    }

    fn dealloc_current(&mut self) {
        // The current size has already been allocated, so its layout is known to be valid.
        let Ok(layout) = Self::make_layout(self.size) else {
            return;
        };

        if layout.size() != 0 {
            // SAFETY: ptr was allocated by self.alloc with this exact layout. Zero-sized layouts
            // aren't allocated and are guarded against deallocation.
            unsafe { self.alloc.deallocate(self.ptr.cast(), layout) }
        }
    }
}

impl<T, A: RegionAllocator + Default> Default for Region<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T, A: RegionAllocator> Drop for Region<T, A> {
    fn drop(&mut self) {
        self.dealloc_current();
    }
}

// SAFETY: A Region uniquely owns its allocation, so it can be sent between threads whenever the
// values it holds and its allocator can be.
unsafe impl<T: Send, A: RegionAllocator + Send> Send for Region<T, A> {}
// SAFETY: Region's API only hands out slot pointers to the crate, and the crate only writes
// through them behind &mut self, so no interior mutability occurs.
unsafe impl<T: Sync, A: RegionAllocator + Sync> Sync for Region<T, A> {}

impl<T, A: RegionAllocator + Debug> Debug for Region<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("ptr", &self.ptr)
            .field("size", &self.size)
            .field("alloc", &self.alloc)
            .finish()
    }
}
