//! Element models, which decide how a [`Sequence`](crate::contiguous::Sequence) takes ownership of,
//! destroys and exposes the values it stores.
//!
//! # Ownership conventions
//! Each model commits to exactly one convention for incoming values, so the caller and the
//! Sequence can never both believe they own the same buffer:
//! - [`Owned<T>`] and [`TakeString`] take ownership of the value handed to them, the caller
//!   gives it up by moving it in.
//! - [`DuplicateStr`] and [`DuplicateCStr`] copy borrowed input onto the Sequence's own heap
//!   storage, the caller keeps its buffer.

mod string;
mod tests;

use std::convert::Infallible;
use std::marker::PhantomData;

pub use string::*;

/// Stores, destroys and views the elements of a [`Sequence`](crate::contiguous::Sequence).
///
/// Adoption lives in the separate [`Adopt`] trait so that a single model can accept several input
/// types.
pub trait ElementModel {
    /// The representation held in the Sequence's slots.
    type Stored;
    /// The borrowed form handed out by [`get`](crate::contiguous::Sequence::get).
    type View: ?Sized;

    /// Destroys a stored element, freeing any resources it owns.
    fn release(&mut self, stored: Self::Stored);

    /// Borrows a stored element for reading.
    fn view<'a>(&self, stored: &'a Self::Stored) -> &'a Self::View;
}

/// Takes ownership of an incoming value of type `I`, producing its stored representation.
pub trait Adopt<I>: ElementModel {
    type Error;

    /// Produces the stored form of `value`.
    ///
    /// # Errors
    /// Returns an error if the value can't be adopted. No resources may be held on failure.
    fn adopt(&mut self, value: I) -> Result<Self::Stored, Self::Error>;
}

/// The plain model for any `T`: adopting moves the value in, releasing drops it and viewing
/// borrows it.
///
/// # Examples
/// ```
/// # use owned_sequence::contiguous::Sequence;
/// # use owned_sequence::element::Owned;
/// let mut seq = Sequence::new(Owned::<u32>::new());
/// seq.push(7).unwrap();
/// assert_eq!(seq.get(0), Ok(&7));
/// ```
pub struct Owned<T>(PhantomData<fn(T) -> T>);

impl<T> Owned<T> {
    pub const fn new() -> Owned<T> {
        Owned(PhantomData)
    }
}

impl<T> Default for Owned<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Owned<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Owned<T> {}

impl<T> std::fmt::Debug for Owned<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Owned<{}>", std::any::type_name::<T>())
    }
}

impl<T> ElementModel for Owned<T> {
    type Stored = T;
    type View = T;

    fn release(&mut self, stored: T) {
        drop(stored);
    }

    fn view<'a>(&self, stored: &'a T) -> &'a T {
        stored
    }
}

impl<T> Adopt<T> for Owned<T> {
    type Error = Infallible;

    fn adopt(&mut self, value: T) -> Result<T, Infallible> {
        Ok(value)
    }
}
