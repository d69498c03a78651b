#![warn(missing_docs)]

#[cfg(test)]
pub mod alloc;
#[cfg(test)]
pub mod model;
pub mod panic;
pub mod result;
