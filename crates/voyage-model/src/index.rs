// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Strongly typed location indices.
//!
//! `LocationIndex` wraps a `usize` so that location identifiers cannot be
//! confused with counters, depths or matrix offsets. It is
//! `#[repr(transparent)]` and compiles down to the raw index.

/// The index of a location in a `Model`, in `0..num_locations`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LocationIndex(usize);

impl LocationIndex {
    /// Creates a new `LocationIndex`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use voyage_model::index::LocationIndex;
    ///
    /// let index = LocationIndex::new(3);
    /// assert_eq!(index.get(), 3);
    /// ```
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[inline(always)]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Returns `true` if this is the first location.
    #[inline(always)]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<usize> for LocationIndex {
    #[inline(always)]
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl From<LocationIndex> for usize {
    #[inline(always)]
    fn from(index: LocationIndex) -> Self {
        index.0
    }
}

impl std::fmt::Display for LocationIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LocationIndex({})", self.0)
    }
}

impl std::fmt::Debug for LocationIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LocationIndex({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions_round_trip_through_usize() {
        let index = LocationIndex::from(7usize);
        assert_eq!(index.get(), 7);
        let raw: usize = index.into();
        assert_eq!(raw, 7);
    }

    #[test]
    fn test_display_and_debug_include_the_type_name() {
        let index = LocationIndex::new(2);
        assert_eq!(format!("{}", index), "LocationIndex(2)");
        assert_eq!(format!("{:?}", index), "LocationIndex(2)");
    }

    #[test]
    fn test_ordering_follows_raw_index() {
        assert!(LocationIndex::new(1) < LocationIndex::new(4));
        assert!(LocationIndex::new(0).is_zero());
        assert!(!LocationIndex::new(5).is_zero());
    }
}
