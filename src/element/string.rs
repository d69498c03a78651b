use std::convert::Infallible;
use std::ffi::{CStr, CString};

use super::{Adopt, ElementModel};

/// Copies borrowed strings onto the Sequence's own heap storage. The caller's buffer is never
/// owned by the Sequence.
///
/// # Examples
/// ```
/// # use owned_sequence::contiguous::Sequence;
/// # use owned_sequence::element::DuplicateStr;
/// let name = String::from("ferris");
/// let mut seq = Sequence::new(DuplicateStr);
/// seq.push(name.as_str()).unwrap();
/// drop(name);
/// assert_eq!(seq.get(0), Ok("ferris"));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateStr;

impl ElementModel for DuplicateStr {
    type Stored = String;
    type View = str;

    fn release(&mut self, stored: String) {
        drop(stored);
    }

    fn view<'a>(&self, stored: &'a String) -> &'a str {
        stored.as_str()
    }
}

impl<'s> Adopt<&'s str> for DuplicateStr {
    type Error = Infallible;

    fn adopt(&mut self, value: &'s str) -> Result<String, Infallible> {
        Ok(value.to_owned())
    }
}

/// Takes ownership of strings that have already been allocated by the caller. Adoption is the
/// identity, the caller gives up the buffer by moving it in.
///
/// # Examples
/// ```
/// # use owned_sequence::contiguous::Sequence;
/// # use owned_sequence::element::TakeString;
/// let mut seq = Sequence::new(TakeString);
/// seq.push(String::from("ferris")).unwrap();
/// assert_eq!(&seq[0], "ferris");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TakeString;

impl ElementModel for TakeString {
    type Stored = String;
    type View = str;

    fn release(&mut self, stored: String) {
        drop(stored);
    }

    fn view<'a>(&self, stored: &'a String) -> &'a str {
        stored.as_str()
    }
}

impl Adopt<String> for TakeString {
    type Error = Infallible;

    fn adopt(&mut self, value: String) -> Result<String, Infallible> {
        Ok(value)
    }
}

/// Copies borrowed null-terminated byte strings onto the Sequence's own heap storage.
///
/// # Examples
/// ```
/// # use owned_sequence::contiguous::Sequence;
/// # use owned_sequence::element::DuplicateCStr;
/// let mut seq = Sequence::new(DuplicateCStr);
/// seq.push(c"ferris").unwrap();
/// assert_eq!(seq.get(0).map(|s| s.to_bytes()), Ok(&b"ferris"[..]));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateCStr;

impl ElementModel for DuplicateCStr {
    type Stored = CString;
    type View = CStr;

    fn release(&mut self, stored: CString) {
        drop(stored);
    }

    fn view<'a>(&self, stored: &'a CString) -> &'a CStr {
        stored.as_c_str()
    }
}

impl<'s> Adopt<&'s CStr> for DuplicateCStr {
    type Error = Infallible;

    fn adopt(&mut self, value: &'s CStr) -> Result<CString, Infallible> {
        Ok(value.to_owned())
    }
}
