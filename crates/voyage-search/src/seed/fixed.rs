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

use crate::{num::SolverNumeric, seed::SeedGenerator};
use voyage_model::{index::LocationIndex, model::Model, tour::Tour};

/// A caller-supplied visiting order.
///
/// The order is checked against the model on every call: it must visit each
/// location exactly once and have a finite closed-tour cost. Otherwise the
/// generator yields nothing. The objective is always recomputed from the
/// model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedTourSeed {
    order: Vec<LocationIndex>,
}

impl FixedTourSeed {
    /// Creates a seed generator that always proposes `order`.
    #[inline]
    pub fn new(order: Vec<LocationIndex>) -> Self {
        Self { order }
    }

    /// Creates a seed generator from raw location indices.
    #[inline]
    pub fn from_indices<I>(order: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        Self::new(order.into_iter().map(LocationIndex::new).collect())
    }

    /// Returns the proposed visiting order.
    #[inline]
    pub fn order(&self) -> &[LocationIndex] {
        &self.order
    }
}

impl From<Vec<LocationIndex>> for FixedTourSeed {
    #[inline]
    fn from(order: Vec<LocationIndex>) -> Self {
        Self::new(order)
    }
}

impl<T> SeedGenerator<T> for FixedTourSeed
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "FixedTourSeed"
    }

    fn generate(&mut self, model: &Model<T>) -> Option<Tour<T>> {
        if !model.is_permutation(&self.order) {
            log::debug!("fixed seed is not a permutation of the model's locations");
            return None;
        }

        let cost = model.tour_cost(&self.order)?;
        Some(Tour::new(cost, self.order.clone()))
    }
}
