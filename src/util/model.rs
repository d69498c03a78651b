//! An instrumented element model for tests.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use crate::contiguous::Sequence;
use crate::element::{Adopt, ElementModel, Owned};
use crate::util::result::ResultExtension;

/// The error produced when [`CountingStr`] has been told to refuse an adoption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refused;

impl Display for Refused {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Adoption refused!")
    }
}

impl Error for Refused {}

/// Duplicates strings like [`DuplicateStr`](crate::element::DuplicateStr), while counting every
/// adopt and keeping every released string so that tests can see exactly what was destroyed.
#[derive(Debug, Default)]
pub struct CountingStr {
    adopted: usize,
    refuse: usize,
    released: Sequence<Owned<String>>,
}

impl CountingStr {
    /// Creates a model which has adopted and released nothing.
    pub fn new() -> CountingStr {
        CountingStr::default()
    }

    /// Refuses the next `count` adoptions.
    pub fn refuse_next(&mut self, count: usize) {
        self.refuse = count;
    }

    /// Returns the number of successful adoptions.
    pub const fn adopted(&self) -> usize {
        self.adopted
    }

    /// Returns the number of releases.
    pub const fn released(&self) -> usize {
        self.released.len()
    }

    /// Returns every released string, in the order they were released.
    pub fn released_strings(&self) -> &[String] {
        &self.released
    }

    /// Returns the number of adopted elements which haven't been released.
    pub const fn live(&self) -> usize {
        self.adopted - self.released.len()
    }
}

impl ElementModel for CountingStr {
    type Stored = String;
    type View = str;

    fn release(&mut self, stored: String) {
        self.released.push(stored).throw();
    }

    fn view<'a>(&self, stored: &'a String) -> &'a str {
        stored.as_str()
    }
}

impl<'s> Adopt<&'s str> for CountingStr {
    type Error = Refused;

    fn adopt(&mut self, value: &'s str) -> Result<String, Refused> {
        if self.refuse > 0 {
            self.refuse -= 1;
            return Err(Refused);
        }

        self.adopted += 1;
        Ok(value.to_owned())
    }
}
