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

use crate::index::LocationIndex;
use num_traits::{PrimInt, Signed};

/// A complete round trip together with its objective value.
///
/// The locations are stored in visiting order. The closing edge from the last
/// location back to the first is implied and included in the objective value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tour<T> {
    /// The total cost of the closed tour.
    objective_value: T,

    /// The visiting order, starting at the first location of the tour.
    order: Vec<LocationIndex>,
}

impl<T> Tour<T>
where
    T: PrimInt + Signed + Copy,
{
    /// Constructs a new `Tour`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `order` visits a location twice.
    pub fn new(objective_value: T, order: Vec<LocationIndex>) -> Self {
        debug_assert!(
            {
                let mut sorted: Vec<usize> = order.iter().map(|l| l.get()).collect();
                sorted.sort_unstable();
                sorted.windows(2).all(|w| w[0] != w[1])
            },
            "called `Tour::new` with a visiting order that repeats a location: {:?}",
            order
        );

        Self {
            objective_value,
            order,
        }
    }

    /// Returns the total objective value of this tour.
    #[inline]
    pub fn objective_value(&self) -> T {
        self.objective_value
    }

    /// Returns the visiting order.
    #[inline]
    pub fn order(&self) -> &[LocationIndex] {
        &self.order
    }

    /// Returns the location visited at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    #[inline]
    pub fn location_at(&self, position: usize) -> LocationIndex {
        debug_assert!(
            position < self.len(),
            "called `Tour::location_at` with position out of bounds: the len is {} but the position is {}",
            self.len(),
            position
        );

        self.order[position]
    }

    /// Returns the number of locations on the tour.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the tour visits no location.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns `true` if the tour visits `location`.
    #[inline]
    pub fn contains(&self, location: LocationIndex) -> bool {
        self.order.contains(&location)
    }

    /// Returns the directed edges of the closed tour, including the closing
    /// edge. A tour with fewer than two locations travels no edge.
    pub fn edges(&self) -> impl Iterator<Item = (LocationIndex, LocationIndex)> + '_ {
        let n = if self.order.len() < 2 {
            0
        } else {
            self.order.len()
        };
        (0..n).map(move |i| (self.order[i], self.order[(i + 1) % n]))
    }

    /// Consumes the tour and returns its visiting order.
    #[inline]
    pub fn into_order(self) -> Vec<LocationIndex> {
        self.order
    }
}

impl<T> std::fmt::Display for Tour<T>
where
    T: PrimInt + Signed + Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Tour Summary")?;
        writeln!(f, "   Objective Value: {}", self.objective_value)?;
        writeln!(f)?;

        if self.is_empty() {
            writeln!(f, "   (No locations visited)")?;
            return Ok(());
        }

        writeln!(f, "   {:<10} | {:<10}", "Position", "Location")?;
        writeln!(f, "   {:-<10}-+-{:-<10}", "", "")?;
        for (position, location) in self.order.iter().enumerate() {
            writeln!(f, "   {:<10} | {:<10}", position, location.get())?;
        }

        Ok(())
    }
}
