//! A module containing [`Region`], the raw backing storage for contiguous collections.
//!
//! [`Region`] is also re-exported under the parent module.

mod region;
mod tests;

pub use region::*;
