//! A growable, contiguous sequence which owns its elements, written from raw allocations up.
//!
//! # Purpose
//! [`Sequence`](contiguous::Sequence) is the classic first systems data structure: a block of
//! heap memory, a length and a capacity, grown geometrically as elements are pushed. What makes it
//! more than a [`Vec`] clone is that the way elements are owned is explicit. Every Sequence is
//! parameterized by an [element model](element::ElementModel) that decides how incoming values are
//! adopted, how stored values are released and how they are viewed, so a Sequence of strings can
//! either copy the caller's strings or take them over, but never both.
//!
//! # Method
//! The storage side is split in two. [`Region`](contiguous::Region) is a fixed-size block of
//! uninitialized slots that knows how to relocate itself, and nothing else.
//! [`Sequence`](contiguous::Sequence) tracks which slots are live and decides when to grow. Elements
//! are moved bitwise during relocation and are only ever released by the Sequence itself, so no
//! element is released twice or leaked.
//!
//! # Error Handling
//! Allocation is fallible throughout. Backing storage comes from a
//! [`RegionAllocator`](allocator::RegionAllocator), and a refused request is reported as an
//! [`AllocationError`](error::AllocationError) with the Sequence left exactly as it was, instead of
//! aborting the process. Index checks produce an [`IndexOutOfRange`](error::IndexOutOfRange), which
//! the [`Index`](std::ops::Index) implementation turns into a panic for callers that would rather
//! treat it as the programming error it usually is.
//!
//! Errors are strongly typed, using enums for static dispatch rather than dynamic, with structs
//! that implement [`Error`](std::error::Error).
//!
//! # Logging
//! Growth, initialization, teardown and allocation failures are reported through the [`log`]
//! facade. No logger is installed by this crate.
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod allocator;
pub mod contiguous;
pub mod element;
pub mod error;

pub(crate) mod util;
