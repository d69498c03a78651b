use std::fmt::{self, Debug, Formatter};
use std::mem::{self, MaybeUninit};
use std::ops::{Deref, Index};
use std::slice;

use super::{Iter, SequenceConfig};
use crate::allocator::{Global, RegionAllocator};
use crate::contiguous::Region;
use crate::element::{Adopt, ElementModel, Owned};
use crate::error::{AllocationError, CapacityOverflow, IndexOutOfRange, PushError, SetError};
use crate::util::result::ResultExtension;

/// A growable, contiguous sequence which owns its elements, based on a [`Region`].
///
/// How elements are taken in, destroyed and viewed is decided by the element model `M` (see
/// [`element`](crate::element)), and where the backing storage comes from is decided by the
/// allocator `A`.
///
/// Unlike [`Vec`], every operation that can allocate reports failure as an [`AllocationError`]
/// instead of aborting, and the Sequence is left exactly as it was.
///
/// # Growth
/// With the default [`SequenceConfig`], a push first checks the load factor (`len / cap`) and
/// doubles the capacity if it is at least one half. A Sequence with capacity zero grows to the
/// configured minimum capacity instead.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Sequence.
///
/// | Method | Complexity |
/// |-|-|
/// | `get` | `O(1)` |
/// | `set` | `O(1)` |
/// | `replace` | `O(1)` |
/// | `len` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `pop` | `O(1)` |
/// | `reserve` | `O(n)`**, `O(1)` |
/// | `shrink_to_fit` | `O(n)` |
/// | `clear` | `O(n)` |
/// | `teardown` | `O(n)` |
///
/// \* If the load factor has been reached, `push` relocates every element and takes `O(n)`.
///
/// \** If the Sequence has enough capacity for the additional items already, `reserve` is `O(1)`.
pub struct Sequence<M: ElementModel, A: RegionAllocator = Global> {
    pub(crate) region: Region<M::Stored, A>,
    pub(crate) len: usize,
    pub(crate) model: M,
    pub(crate) config: SequenceConfig,
    pub(crate) relocated: usize,
}

impl<M: ElementModel> Sequence<M> {
    /// Creates a new Sequence with length and capacity 0 using the [`Global`] allocator. Memory
    /// will be allocated on the first push or by [`initialize`](Sequence::initialize).
    ///
    /// # Examples
    /// ```
    /// # use owned_sequence::contiguous::Sequence;
    /// # use owned_sequence::element::DuplicateStr;
    /// let seq = Sequence::new(DuplicateStr);
    /// assert_eq!(seq.len(), 0);
    /// assert_eq!(seq.cap(), 0);
    /// ```
    pub const fn new(model: M) -> Sequence<M> {
        Sequence::new_in(model, Global)
    }

    /// Creates a new Sequence with capacity exactly equal to `cap`.
    ///
    /// # Errors
    /// Returns an [`AllocationError`] if the backing Region can't be allocated.
    ///
    /// # Examples
    /// ```
    /// # use owned_sequence::contiguous::Sequence;
    /// # use owned_sequence::element::DuplicateStr;
    /// let seq = Sequence::with_cap(DuplicateStr, 3).unwrap();
    /// assert_eq!(seq.cap(), 3);
    /// ```
    pub fn with_cap(model: M, cap: usize) -> Result<Sequence<M>, AllocationError> {
        let mut seq = Sequence::new(model);
        seq.initialize(cap)?;
        Ok(seq)
    }

    /// Creates a new, empty Sequence with the provided growth configuration.
    pub const fn with_config(model: M, config: SequenceConfig) -> Sequence<M> {
        Sequence::with_config_in(model, Global, config)
    }
}

impl<M: ElementModel, A: RegionAllocator> Sequence<M, A> {
    /// Creates a new, empty Sequence which allocates from `alloc`.
    pub const fn new_in(model: M, alloc: A) -> Sequence<M, A> {
        Sequence::with_config_in(model, alloc, SequenceConfig::new())
    }

    /// Creates a new, empty Sequence which allocates from `alloc` and grows according to
    /// `config`.
    pub const fn with_config_in(model: M, alloc: A, config: SequenceConfig) -> Sequence<M, A> {
        Sequence {
            region: Region::new_in(alloc),
            len: 0,
            model,
            config,
            relocated: 0,
        }
    }

    /// Prepares the Sequence to hold `cap` elements, releasing any elements and storage it
    /// already held.
    ///
    /// # Errors
    /// Returns an [`AllocationError`] if the backing Region can't be allocated, the Sequence and
    /// its elements are unchanged.
    ///
    /// # Examples
    /// ```
    /// # use owned_sequence::contiguous::Sequence;
    /// # use owned_sequence::element::DuplicateStr;
    /// let mut seq = Sequence::new(DuplicateStr);
    /// seq.initialize(3).unwrap();
    /// assert_eq!(seq.cap(), 3);
    /// seq.push("a").unwrap();
    /// seq.initialize(5).unwrap();
    /// assert_eq!((seq.len(), seq.cap()), (0, 5));
    /// ```
    pub fn initialize(&mut self, cap: usize) -> Result<(), AllocationError> {
        if cap == self.cap() {
            self.clear();
        } else {
            let ptr = self.region.allocate_ptr(cap)?;
            self.clear();

            // SAFETY: ptr was just allocated by this Region for cap slots, and the Sequence has
            // just been cleared, so no slots are live.
            unsafe { self.region.install(ptr, cap) };
        }

        log::debug!("initialized sequence with capacity {}", cap);
        Ok(())
    }

    /// Returns the length of the Sequence.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Sequence contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current capacity of the Sequence. The capacity only ever changes through growth
    /// or the explicit capacity methods, so it is always exactly predictable.
    pub const fn cap(&self) -> usize {
        self.region.size()
    }

    /// Returns the ratio of length to capacity, or [`None`] if the capacity is 0.
    pub fn load_factor(&self) -> Option<f64> {
        match self.cap() {
            0 => None,
            cap => Some(self.len as f64 / cap as f64),
        }
    }

    /// Returns the total number of elements moved between Regions by growth and other capacity
    /// changes over the Sequence's lifetime.
    pub const fn relocations(&self) -> usize {
        self.relocated
    }

    /// Returns the growth configuration.
    pub const fn config(&self) -> &SequenceConfig {
        &self.config
    }

    /// Returns the element model.
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Returns the element model mutably, for models which carry state of their own.
    pub const fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Returns the allocator backing this Sequence.
    pub const fn allocator(&self) -> &A {
        self.region.allocator()
    }

    /// Returns a view of the element at `index`. The view borrows the Sequence, so it can't
    /// outlive the next mutation.
    ///
    /// # Errors
    /// Returns [`IndexOutOfRange`] if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use owned_sequence::contiguous::Sequence;
    /// # use owned_sequence::element::DuplicateStr;
    /// let mut seq = Sequence::new(DuplicateStr);
    /// seq.push("a").unwrap();
    /// assert_eq!(seq.get(0), Ok("a"));
    /// assert!(seq.get(1).is_err());
    /// ```
    pub fn get(&self, index: usize) -> Result<&M::View, IndexOutOfRange> {
        match self.deref().get(index) {
            Some(stored) => Ok(self.model.view(stored)),
            None => Err(IndexOutOfRange {
                index,
                len: self.len,
            }),
        }
    }

    /// Replaces the element at `index` with the adopted form of `value`, releasing the previous
    /// element.
    ///
    /// The new value is adopted before anything is released, so if adoption fails the slot still
    /// holds its original element.
    ///
    /// # Errors
    /// Returns [`SetError::IndexOutOfRange`] if `index >= len`, in which case `value` is never
    /// adopted, or [`SetError::Adopt`] if the model refuses `value`.
    ///
    /// # Examples
    /// ```
    /// # use owned_sequence::contiguous::Sequence;
    /// # use owned_sequence::element::DuplicateStr;
    /// let mut seq = Sequence::new(DuplicateStr);
    /// seq.push("x").unwrap();
    /// seq.set(0, "y").unwrap();
    /// assert_eq!(&seq[0], "y");
    /// assert!(seq.set(3, "z").unwrap_err().is_index_out_of_range());
    /// ```
    pub fn set<I>(&mut self, index: usize, value: I) -> Result<(), SetError<<M as Adopt<I>>::Error>>
    where
        M: Adopt<I>,
    {
        let old = self.replace(index, value)?;
        self.model.release(old);
        Ok(())
    }

    /// Replaces the element at `index` with the adopted form of `value`, returning the previous
    /// element to the caller instead of releasing it.
    ///
    /// # Errors
    /// The same as [`set`](Sequence::set).
    pub fn replace<I>(
        &mut self,
        index: usize,
        value: I,
    ) -> Result<M::Stored, SetError<<M as Adopt<I>>::Error>>
    where
        M: Adopt<I>,
    {
        self.check_index(index)?;
        let new_value = self.model.adopt(value).map_err(SetError::Adopt)?;

        // SAFETY: index is < len and all values < len are initialized.
        let old = unsafe {
            mem::replace(
                self.region.slot(index).as_mut(),
                MaybeUninit::new(new_value),
            ).assume_init()
        };
        Ok(old)
    }

    /// Pushes the adopted form of `value` onto the end of the Sequence, growing first if the load
    /// factor has been reached.
    ///
    /// # Errors
    /// Returns [`PushError::Allocation`] if growth was required but failed, in which case the
    /// Sequence is unchanged and `value` was never adopted. Returns [`PushError::Adopt`] if the
    /// model refuses `value`; the length is unchanged, although any growth performed remains.
    ///
    /// # Examples
    /// ```
    /// # use owned_sequence::contiguous::Sequence;
    /// # use owned_sequence::element::DuplicateStr;
    /// let mut seq = Sequence::with_cap(DuplicateStr, 3).unwrap();
    /// for s in ["a", "b", "c"] {
    ///     seq.push(s).unwrap();
    /// }
    /// assert_eq!((seq.len(), seq.cap()), (3, 6));
    /// assert!(seq.iter().eq(["a", "b", "c"]));
    /// ```
    pub fn push<I>(&mut self, value: I) -> Result<(), PushError<<M as Adopt<I>>::Error>>
    where
        M: Adopt<I>,
    {
        if self.config.needs_growth(self.len, self.cap()) {
            self.grow()?;
        }

        let stored = self.model.adopt(value).map_err(PushError::Adopt)?;

        // SAFETY: Either the load factor hasn't been reached, which implies len < cap, or the
        // Sequence has just grown to a capacity greater than len.
        unsafe { self.region.slot(self.len).write(MaybeUninit::new(stored)) };
        self.len += 1;

        Ok(())
    }

    /// Pops the last element off the end of the Sequence, handing ownership of it to the caller.
    /// The element is not released.
    ///
    /// # Examples
    /// ```
    /// # use owned_sequence::contiguous::Sequence;
    /// # use owned_sequence::element::TakeString;
    /// let mut seq = Sequence::new(TakeString);
    /// seq.push(String::from("a")).unwrap();
    /// assert_eq!(seq.pop(), Some(String::from("a")));
    /// assert_eq!(seq.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<M::Stored> {
        if self.len == 0 {
            None
        } else {
            // Decrement len before reading.
            self.len -= 1;

            // SAFETY: len has just been decremented and is within the capacity of the Region. The
            // slot was initialized and is no longer counted as live, so it won't be read again.
            let stored = unsafe { self.region.slot(self.len).read().assume_init() };
            Some(stored)
        }
    }

    /// Ensures that the Sequence has capacity to hold an additional `extra` elements without
    /// relocating. After a successful call, the capacity will be >= len + extra.
    ///
    /// # Errors
    /// Returns an [`AllocationError`] if the new capacity overflows or can't be allocated, the
    /// Sequence is unchanged.
    pub fn reserve(&mut self, extra: usize) -> Result<(), AllocationError> {
        let new_cap = self.len.checked_add(extra).ok_or(CapacityOverflow)?;

        if new_cap <= self.cap() { return Ok(()); }

        self.realloc_with_cap(new_cap)
    }

    /// Shrinks the capacity of the Sequence to exactly its length.
    ///
    /// # Errors
    /// Returns an [`AllocationError`] if the smaller Region can't be allocated, the Sequence is
    /// unchanged.
    pub fn shrink_to_fit(&mut self) -> Result<(), AllocationError> {
        self.realloc_with_cap(self.len)
    }

    /// Releases every element, leaving the capacity as it is.
    pub fn clear(&mut self) {
        // Zero len first, so that a panicking release leaks the remaining elements rather than
        // releasing them twice.
        let len = mem::replace(&mut self.len, 0);

        for i in 0..len {
            // SAFETY: All values < the old len are initialized, and each is read exactly once.
            let stored = unsafe { self.region.slot(i).read().assume_init() };
            self.model.release(stored);
        }
    }

    /// Releases every element and then the backing Region, returning the Sequence to the same
    /// state as [`Sequence::new`]. Calling this on an already torn down Sequence does nothing.
    ///
    /// Dropping a Sequence tears it down.
    ///
    /// # Examples
    /// ```
    /// # use owned_sequence::contiguous::Sequence;
    /// # use owned_sequence::element::DuplicateStr;
    /// let mut seq = Sequence::with_cap(DuplicateStr, 2).unwrap();
    /// seq.push("a").unwrap();
    /// seq.teardown();
    /// assert_eq!((seq.len(), seq.cap()), (0, 0));
    /// seq.teardown();
    /// ```
    pub fn teardown(&mut self) {
        if self.len == 0 && self.cap() == 0 {
            return;
        }

        let released = self.len;
        self.clear();
        self.region.release();

        log::debug!("tore down sequence, released {} elements", released);
    }

    /// Returns an iterator over views of every element.
    pub fn iter(&self) -> Iter<'_, M> {
        Iter {
            model: &self.model,
            inner: self.deref().iter(),
        }
    }

    /// Grows the Region according to the configuration. After calling this, the Sequence can take
    /// at least one more element.
    ///
    /// # Errors
    /// Returns an [`AllocationError`] if the grown capacity overflows or can't be allocated.
    pub(crate) fn grow(&mut self) -> Result<(), AllocationError> {
        let old_cap = self.cap();
        let new_cap = self.config.grown_cap(old_cap).ok_or(CapacityOverflow)?;

        self.realloc_with_cap(new_cap)?;

        log::trace!(
            "grew sequence from {} to {} slots, relocating {} elements",
            old_cap,
            new_cap,
            self.len,
        );
        Ok(())
    }

    /// Moves the live elements into a Region with exactly `new_cap` slots.
    ///
    /// # Errors
    /// Returns an [`AllocationError`] if the new Region can't be allocated.
    pub(crate) fn realloc_with_cap(&mut self, new_cap: usize) -> Result<(), AllocationError> {
        debug_assert!(new_cap >= self.len);

        if new_cap == self.cap() { return Ok(()); }

        // SAFETY: Every caller requests at least len slots, and len <= cap always holds.
        unsafe { self.region.relocate(new_cap, self.len)? };
        self.relocated += self.len;

        Ok(())
    }

    /// Checks that the provided index is within the bounds of self.
    ///
    /// # Errors
    /// Returns [`IndexOutOfRange`] if `index >= len`.
    pub(crate) const fn check_index(&self, index: usize) -> Result<(), IndexOutOfRange> {
        if index >= self.len {
            Err(IndexOutOfRange {
                index,
                len: self.len,
            })
        } else {
            Ok(())
        }
    }
}

impl<M: ElementModel, A: RegionAllocator> Drop for Sequence<M, A> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<M: ElementModel, A: RegionAllocator> Deref for Sequence<M, A> {
    type Target = [M::Stored];

    /// Exposes the stored representations of all elements as a slice.
    fn deref(&self) -> &Self::Target {
        // SAFETY: The Region is valid for len values, which are all initialized. The pointer is
        // nonnull and properly aligned, and MaybeUninit<T> has the same layout as T. The borrow
        // checker enforces that self isn't mutated while the slice exists.
        unsafe {
            slice::from_raw_parts(
                self.region.ptr.as_ptr().cast_const().cast(),
                self.len,
            )
        }
    }
}

impl<M: ElementModel, A: RegionAllocator> Index<usize> for Sequence<M, A> {
    type Output = M::View;

    /// # Panics
    /// Panics if the provided index is out of range.
    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).throw()
    }
}

impl<T> Extend<T> for Sequence<Owned<T>> {
    /// # Panics
    /// Panics if the Sequence fails to grow.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item).throw();
        }
    }
}

impl<T> FromIterator<T> for Sequence<Owned<T>> {
    /// # Panics
    /// Panics if the Sequence fails to grow.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Sequence::new(Owned::new());
        seq.extend(iter);
        seq
    }
}

impl<M: ElementModel + Default, A: RegionAllocator + Default> Default for Sequence<M, A> {
    fn default() -> Self {
        Self::new_in(M::default(), A::default())
    }
}

impl<M, A, B> PartialEq<Sequence<M, B>> for Sequence<M, A>
where
    M: ElementModel,
    M::View: PartialEq,
    A: RegionAllocator,
    B: RegionAllocator,
{
    fn eq(&self, other: &Sequence<M, B>) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<M, A> Eq for Sequence<M, A>
where
    M: ElementModel,
    M::View: Eq,
    A: RegionAllocator,
{}

/// Formats the views of a Sequence as a list.
struct Contents<'a, M: ElementModel, A: RegionAllocator>(&'a Sequence<M, A>);

impl<M, A> Debug for Contents<'_, M, A>
where
    M: ElementModel,
    M::View: Debug,
    A: RegionAllocator,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<M, A> Debug for Sequence<M, A>
where
    M: ElementModel,
    M::View: Debug,
    A: RegionAllocator,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("contents", &Contents(self))
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}
