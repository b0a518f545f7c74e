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

use crate::{cost::EdgeCost, index::LocationIndex};
use num_traits::{PrimInt, Signed};

#[inline(always)]
fn flatten_index(num_locations: usize, from: LocationIndex, to: LocationIndex) -> usize {
    from.get() * num_locations + to.get()
}

/// The immutable data model of a traveling salesperson instance.
///
/// This struct holds the pre-validated, queryable cost table:
/// - `costs[from * num_locations + to]`: the directed cost of traveling from
///   `from` to `to`, encoded via `EdgeCost<T>` (sentinel-based option).
///
/// Costs may be asymmetric and edges may be missing. The diagonal is always
/// unreachable; a location never travels to itself.
///
/// Construction:
/// - Use `ModelBuilder` and call `ModelBuilder::build` to obtain a validated `Model`.
#[derive(Clone, PartialEq, Eq)]
pub struct Model<T>
where
    T: PrimInt + Signed,
{
    costs: Vec<EdgeCost<T>>, // len = num_locations * num_locations
    num_locations: usize,
}

impl<T> Model<T>
where
    T: PrimInt + Signed,
{
    /// Returns the number of locations in the model.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use voyage_model::model::ModelBuilder;
    ///
    /// let model = ModelBuilder::<i64>::new(4).build();
    /// assert_eq!(model.num_locations(), 4);
    /// ```
    #[inline]
    pub fn num_locations(&self) -> usize {
        self.num_locations
    }

    /// Returns the flattened, row-major cost table.
    #[inline]
    pub fn costs(&self) -> &[EdgeCost<T>] {
        &self.costs
    }

    /// Returns the costs of all edges leaving `from`, indexed by destination.
    ///
    /// # Panics
    ///
    /// Panics if `from` is out of bounds.
    #[inline]
    pub fn row(&self, from: LocationIndex) -> &[EdgeCost<T>] {
        let start = from.get() * self.num_locations;
        &self.costs[start..start + self.num_locations]
    }

    /// Returns the cost of the directed edge `from -> to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use voyage_model::{index::LocationIndex, model::ModelBuilder};
    ///
    /// let mut builder = ModelBuilder::<i64>::new(2);
    /// builder.set_cost(LocationIndex::new(0), LocationIndex::new(1), 7);
    /// let model = builder.build();
    ///
    /// assert_eq!(model.cost(LocationIndex::new(0), LocationIndex::new(1)).raw(), 7);
    /// assert!(model.cost(LocationIndex::new(1), LocationIndex::new(0)).is_unreachable());
    /// ```
    #[inline]
    pub fn cost(&self, from: LocationIndex, to: LocationIndex) -> EdgeCost<T> {
        debug_assert!(
            from.get() < self.num_locations,
            "called `Model::cost` with from index out of bounds: the len is {} but the index is {}",
            self.num_locations,
            from.get()
        );
        debug_assert!(
            to.get() < self.num_locations,
            "called `Model::cost` with to index out of bounds: the len is {} but the index is {}",
            self.num_locations,
            to.get()
        );

        self.costs[flatten_index(self.num_locations, from, to)]
    }

    /// Returns the number of reachable edges leaving `location`.
    #[inline]
    pub fn outgoing_degree(&self, location: LocationIndex) -> usize {
        self.row(location)
            .iter()
            .filter(|cost| cost.is_reachable())
            .count()
    }

    /// Returns the number of reachable edges entering `location`.
    #[inline]
    pub fn incoming_degree(&self, location: LocationIndex) -> usize {
        (0..self.num_locations)
            .map(LocationIndex::new)
            .filter(|&from| self.cost(from, location).is_reachable())
            .count()
    }

    /// Returns `true` if `order` visits every location of the model exactly once.
    pub fn is_permutation(&self, order: &[LocationIndex]) -> bool {
        if order.len() != self.num_locations {
            return false;
        }

        let mut seen = vec![false; self.num_locations];
        for location in order {
            match seen.get_mut(location.get()) {
                Some(flag) if !*flag => *flag = true,
                _ => return false,
            }
        }
        true
    }

    /// Computes the exact cost of the closed tour `order`: the sum of all
    /// consecutive edges plus the edge from the last location back to the first.
    ///
    /// Returns `None` if any of these edges is unreachable, if the sum reaches
    /// the unreachable sentinel, or if `order` is empty. A tour of a single
    /// location travels no edge and costs zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use voyage_model::{index::LocationIndex, model::ModelBuilder};
    ///
    /// let model = ModelBuilder::<i64>::from_rows(&[
    ///     vec![None, Some(2), Some(9)],
    ///     vec![Some(1), None, Some(6)],
    ///     vec![Some(4), Some(3), None],
    /// ])
    /// .build();
    ///
    /// let order = [0, 1, 2].map(LocationIndex::new);
    /// assert_eq!(model.tour_cost(&order), Some(2 + 6 + 4));
    /// ```
    pub fn tour_cost(&self, order: &[LocationIndex]) -> Option<T> {
        let (first, last) = match (order.first(), order.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return None,
        };

        if order.len() == 1 {
            return Some(T::zero());
        }

        let closing = std::iter::once((last, first));
        let mut total = T::zero();
        for (from, to) in order.windows(2).map(|w| (w[0], w[1])).chain(closing) {
            let edge = self.cost(from, to).into_option()?;
            total = total.saturating_add(edge);
            if total == T::max_value() {
                return None;
            }
        }

        Some(total)
    }
}

impl<T> std::fmt::Debug for Model<T>
where
    T: PrimInt + Signed + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("num_locations", &self.num_locations)
            .field("costs", &self.costs)
            .finish()
    }
}

impl<T> std::fmt::Display for Model<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Model(num_locations: {})", self.num_locations)
    }
}

/// Mutable builder for `Model`.
///
/// Every edge starts out unreachable. Setting a cost on the diagonal is a
/// programming error, and `build` forces the diagonal to be unreachable.
#[derive(Clone)]
pub struct ModelBuilder<T>
where
    T: PrimInt + Signed,
{
    num_locations: usize,
    costs: Vec<EdgeCost<T>>,
}

impl<T> ModelBuilder<T>
where
    T: PrimInt + Signed,
{
    /// Creates a builder for `num_locations` locations with no edges.
    #[inline]
    pub fn new(num_locations: usize) -> Self {
        Self {
            num_locations,
            costs: vec![EdgeCost::unreachable(); num_locations * num_locations],
        }
    }

    /// Creates a builder from a square table of optional costs, where
    /// `rows[from][to]` is the cost of `from -> to` and `None` marks a missing
    /// edge. Diagonal entries are ignored.
    ///
    /// # Panics
    ///
    /// Panics if the table is not square or contains a negative cost.
    pub fn from_rows<R>(rows: &[R]) -> Self
    where
        R: AsRef<[Option<T>]>,
        T: std::fmt::Display,
    {
        let num_locations = rows.len();
        let mut builder = Self::new(num_locations);

        for (from, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            assert_eq!(
                row.len(),
                num_locations,
                "called `ModelBuilder::from_rows` with a non-square table: row {} has {} entries but {} were expected",
                from,
                row.len(),
                num_locations
            );

            for (to, cost) in row.iter().enumerate() {
                if from == to {
                    continue;
                }
                if let Some(cost) = cost {
                    builder.set_cost(LocationIndex::new(from), LocationIndex::new(to), *cost);
                }
            }
        }

        builder
    }

    /// Returns the number of locations.
    #[inline]
    pub fn num_locations(&self) -> usize {
        self.num_locations
    }

    /// Sets the finite cost of the directed edge `from -> to`.
    ///
    /// # Panics
    ///
    /// Panics if `cost` is negative or the unreachable sentinel, and in debug
    /// builds if an index is out of bounds or `from == to`.
    #[inline]
    pub fn set_cost(&mut self, from: LocationIndex, to: LocationIndex, cost: T) -> &mut Self
    where
        T: std::fmt::Display,
    {
        self.set_edge(from, to, EdgeCost::some(cost))
    }

    /// Marks the directed edge `from -> to` as unreachable.
    #[inline]
    pub fn set_unreachable(&mut self, from: LocationIndex, to: LocationIndex) -> &mut Self {
        self.set_edge(from, to, EdgeCost::unreachable())
    }

    /// Sets the directed edge `from -> to` to an already encoded `EdgeCost`.
    #[inline]
    pub fn set_edge(
        &mut self,
        from: LocationIndex,
        to: LocationIndex,
        cost: EdgeCost<T>,
    ) -> &mut Self {
        debug_assert!(
            from.get() < self.num_locations,
            "called `ModelBuilder::set_edge` with from index out of bounds: the len is {} but the index is {}",
            self.num_locations,
            from.get()
        );
        debug_assert!(
            to.get() < self.num_locations,
            "called `ModelBuilder::set_edge` with to index out of bounds: the len is {} but the index is {}",
            self.num_locations,
            to.get()
        );
        debug_assert!(
            from != to,
            "called `ModelBuilder::set_edge` on the diagonal: {}",
            from
        );

        let flat_index = flatten_index(self.num_locations, from, to);
        self.costs[flat_index] = cost;
        self
    }

    /// Builds the `Model` from the current state of the `ModelBuilder`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use voyage_model::model::ModelBuilder;
    ///
    /// let model = ModelBuilder::<i64>::new(3).build();
    /// assert_eq!(model.num_locations(), 3);
    /// assert_eq!(model.costs().len(), 9);
    /// ```
    pub fn build(mut self) -> Model<T> {
        for i in 0..self.num_locations {
            let location = LocationIndex::new(i);
            self.costs[flatten_index(self.num_locations, location, location)] =
                EdgeCost::unreachable();
        }

        Model {
            costs: self.costs,
            num_locations: self.num_locations,
        }
    }
}

impl<T> std::fmt::Debug for ModelBuilder<T>
where
    T: PrimInt + Signed + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelBuilder")
            .field("num_locations", &self.num_locations)
            .field("costs", &self.costs)
            .finish()
    }
}

impl<T> std::fmt::Display for ModelBuilder<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ModelBuilder(num_locations: {})", self.num_locations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type IntegerType = i64;

    fn li(i: usize) -> LocationIndex {
        LocationIndex::new(i)
    }

    fn four_city_model() -> Model<IntegerType> {
        ModelBuilder::from_rows(&[
            vec![None, Some(10), Some(15), Some(20)],
            vec![Some(5), None, Some(9), Some(10)],
            vec![Some(6), Some(13), None, Some(12)],
            vec![Some(8), Some(8), Some(9), None],
        ])
        .build()
    }

    #[test]
    fn test_new_builder_has_no_edges() {
        let model = ModelBuilder::<IntegerType>::new(3).build();
        assert!(model.costs().iter().all(|c| c.is_unreachable()));
        assert_eq!(model.outgoing_degree(li(0)), 0);
        assert_eq!(model.incoming_degree(li(2)), 0);
    }

    #[test]
    fn test_costs_are_directed() {
        let model = four_city_model();
        assert_eq!(model.cost(li(0), li(1)).raw(), 10);
        assert_eq!(model.cost(li(1), li(0)).raw(), 5);
        assert_eq!(model.row(li(2))[3].raw(), 12);
    }

    #[test]
    fn test_build_forces_unreachable_diagonal() {
        let model = four_city_model();
        for i in 0..model.num_locations() {
            assert!(model.cost(li(i), li(i)).is_unreachable());
        }
    }

    #[test]
    fn test_degrees_count_reachable_edges() {
        let mut builder = ModelBuilder::<IntegerType>::new(3);
        builder
            .set_cost(li(0), li(1), 1)
            .set_cost(li(0), li(2), 2)
            .set_cost(li(2), li(1), 3);
        let model = builder.build();

        assert_eq!(model.outgoing_degree(li(0)), 2);
        assert_eq!(model.outgoing_degree(li(1)), 0);
        assert_eq!(model.incoming_degree(li(1)), 2);
        assert_eq!(model.incoming_degree(li(0)), 0);
    }

    #[test]
    fn test_set_unreachable_removes_an_edge() {
        let mut builder = ModelBuilder::<IntegerType>::new(2);
        builder.set_cost(li(0), li(1), 4);
        builder.set_unreachable(li(0), li(1));
        let model = builder.build();
        assert!(model.cost(li(0), li(1)).is_unreachable());
    }

    #[test]
    fn test_tour_cost_includes_closing_edge() {
        let model = four_city_model();
        let order = [0, 1, 3, 2].map(li);
        assert_eq!(model.tour_cost(&order), Some(10 + 10 + 9 + 6));
    }

    #[test]
    fn test_tour_cost_is_rotation_invariant() {
        let model = four_city_model();
        let a = [0, 1, 3, 2].map(li);
        let b = [3, 2, 0, 1].map(li);
        assert_eq!(model.tour_cost(&a), model.tour_cost(&b));
    }

    #[test]
    fn test_tour_cost_with_missing_edge_is_none() {
        let mut builder = ModelBuilder::<IntegerType>::new(3);
        builder.set_cost(li(0), li(1), 1).set_cost(li(1), li(2), 1);
        let model = builder.build();
        assert_eq!(model.tour_cost(&[0, 1, 2].map(li)), None);
    }

    #[test]
    fn test_tour_cost_edge_cases() {
        let model = four_city_model();
        assert_eq!(model.tour_cost(&[]), None);
        assert_eq!(model.tour_cost(&[li(2)]), Some(0));
    }

    #[test]
    fn test_tour_cost_saturating_to_sentinel_is_none() {
        let mut builder = ModelBuilder::<i8>::new(2);
        builder.set_cost(li(0), li(1), 100).set_cost(li(1), li(0), 100);
        let model = builder.build();
        assert_eq!(model.tour_cost(&[li(0), li(1)]), None);
    }

    #[test]
    fn test_is_permutation() {
        let model = four_city_model();
        assert!(model.is_permutation(&[2, 0, 3, 1].map(li)));
        assert!(!model.is_permutation(&[0, 1, 2].map(li)));
        assert!(!model.is_permutation(&[0, 1, 1, 2].map(li)));
        assert!(!model.is_permutation(&[0, 1, 2, 9].map(li)));
    }

    #[test]
    #[should_panic(expected = "non-square table")]
    fn test_from_rows_rejects_ragged_tables() {
        let _ = ModelBuilder::<IntegerType>::from_rows(&[vec![None, Some(1)], vec![Some(1)]]);
    }

    #[test]
    fn test_display() {
        let model = four_city_model();
        assert_eq!(format!("{}", model), "Model(num_locations: 4)");
    }
}
