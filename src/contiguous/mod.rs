//! Contiguous collection types. Namely [`Region`] for raw fixed-size storage and [`Sequence`] for
//! owning collections that vary in size at runtime.
#![warn(missing_docs)]

pub mod region;
pub mod sequence;

#[doc(inline)]
pub use region::Region;
#[doc(inline)]
pub use sequence::{LoadFactor, Sequence, SequenceConfig};
