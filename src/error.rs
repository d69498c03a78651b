//! Error types produced by [`Sequence`](crate::contiguous::Sequence) and its collaborators.
//!
//! Every failure kind is its own small struct implementing [`Error`], and the operations that can
//! fail in more than one way return an enum combining them, so that callers can match on exactly
//! what went wrong without any dynamic dispatch.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::IsVariant;

/// An index was outside of `0..len` for a get, set or replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfRange {
    pub index: usize,
    pub len: usize,
}

impl Display for IndexOutOfRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Index {} out of range for sequence with {} elements!", self.index, self.len)
    }
}

impl Error for IndexOutOfRange {}

/// The allocator couldn't provide a region of the requested size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfMemory {
    pub slots: usize,
    pub bytes: usize,
}

impl Display for OutOfMemory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to allocate {} slots ({} bytes)!", self.slots, self.bytes)
    }
}

impl Error for OutOfMemory {}

/// The requested capacity can't be represented, either because the slot count overflowed or
/// because the layout would exceed [`isize::MAX`] bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityOverflow;

impl Display for CapacityOverflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Capacity overflow!")
    }
}

impl Error for CapacityOverflow {}

/// Backing storage couldn't be obtained or grown. The sequence that reported this is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
#[derive(derive_more::Display, derive_more::Error, derive_more::From, derive_more::TryInto)]
pub enum AllocationError {
    OutOfMemory(OutOfMemory),
    CapacityOverflow(CapacityOverflow),
}

/// The error returned by [`Sequence::push`](crate::contiguous::Sequence::push).
#[derive(Debug, Clone, PartialEq, Eq, IsVariant)]
pub enum PushError<E> {
    /// Growth was required and couldn't be satisfied.
    Allocation(AllocationError),
    /// The element model refused to adopt the value.
    Adopt(E),
}

impl<E> From<AllocationError> for PushError<E> {
    fn from(value: AllocationError) -> Self {
        PushError::Allocation(value)
    }
}

impl<E: Display> Display for PushError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PushError::Allocation(error) => write!(f, "{}", error),
            PushError::Adopt(error) => write!(f, "Failed to adopt element: {}", error),
        }
    }
}

impl<E: Error + 'static> Error for PushError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PushError::Allocation(error) => Some(error),
            PushError::Adopt(error) => Some(error),
        }
    }
}

/// The error returned by [`Sequence::set`](crate::contiguous::Sequence::set) and
/// [`Sequence::replace`](crate::contiguous::Sequence::replace).
#[derive(Debug, Clone, PartialEq, Eq, IsVariant)]
pub enum SetError<E> {
    IndexOutOfRange(IndexOutOfRange),
    Adopt(E),
}

impl<E> From<IndexOutOfRange> for SetError<E> {
    fn from(value: IndexOutOfRange) -> Self {
        SetError::IndexOutOfRange(value)
    }
}

impl<E: Display> Display for SetError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SetError::IndexOutOfRange(error) => write!(f, "{}", error),
            SetError::Adopt(error) => write!(f, "Failed to adopt element: {}", error),
        }
    }
}

impl<E: Error + 'static> Error for SetError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SetError::IndexOutOfRange(error) => Some(error),
            SetError::Adopt(error) => Some(error),
        }
    }
}
