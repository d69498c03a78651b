//! A module containing [`Sequence`] and associated types.
//!
//! [`SequenceConfig`] and [`LoadFactor`] control how a Sequence grows, and [`Iter`] is used for
//! borrowed iteration over element views. Stored representations can be iterated through the
//! slice that a Sequence dereferences to.
//!
//! [`Sequence`] is also re-exported under the parent module.

mod config;
mod iter;
mod sequence;

pub use config::*;
pub use iter::*;
pub use sequence::*;
