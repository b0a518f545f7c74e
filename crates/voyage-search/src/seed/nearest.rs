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
use fixedbitset::FixedBitSet;
use voyage_model::{index::LocationIndex, model::Model, tour::Tour};

/// Greedy nearest-neighbor construction.
///
/// From every start location the generator repeatedly travels along the
/// cheapest finite edge to an unvisited location. Walks that get stuck, or
/// whose closing edge is missing, are discarded. The cheapest closed tour
/// over all start locations wins; ties keep the earliest start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NearestNeighborSeed;

impl NearestNeighborSeed {
    /// Creates a new `NearestNeighborSeed`.
    #[inline]
    pub fn new() -> Self {
        Self
    }

    fn walk_from<T>(model: &Model<T>, start: LocationIndex) -> Option<Vec<LocationIndex>>
    where
        T: SolverNumeric,
    {
        let n = model.num_locations();
        let mut visited = FixedBitSet::with_capacity(n);
        let mut order = Vec::with_capacity(n);

        visited.insert(start.get());
        order.push(start);

        let mut current = start;
        while order.len() < n {
            let next = model
                .row(current)
                .iter()
                .enumerate()
                .filter(|&(to, cost)| !visited.contains(to) && cost.is_reachable())
                .min_by_key(|&(_, cost)| *cost)
                .map(|(to, _)| LocationIndex::new(to))?;

            visited.insert(next.get());
            order.push(next);
            current = next;
        }

        Some(order)
    }
}

impl<T> SeedGenerator<T> for NearestNeighborSeed
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "NearestNeighborSeed"
    }

    fn generate(&mut self, model: &Model<T>) -> Option<Tour<T>> {
        let mut best: Option<Tour<T>> = None;

        for start in (0..model.num_locations()).map(LocationIndex::new) {
            let Some(order) = Self::walk_from(model, start) else {
                continue;
            };
            let Some(cost) = model.tour_cost(&order) else {
                continue;
            };

            if best.as_ref().is_none_or(|b| cost < b.objective_value()) {
                best = Some(Tour::new(cost, order));
            }
        }

        match &best {
            Some(tour) => log::debug!(
                "nearest neighbor seed found a tour of cost {}",
                tour.objective_value()
            ),
            None => log::debug!("nearest neighbor seed found no closed tour"),
        }

        best
    }
}
