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

//! Search states and their expansion.
//!
//! A `SearchState` is one node of the branch-and-bound tree: a partial path
//! starting at the start location, the fully reduced cost matrix that remains
//! after committing to that path, and the admissible lower bound on every
//! tour extending the path.
//!
//! States own their matrices by value. A state is never mutated after it has
//! been created; `expand` clones the parent's matrix and derives the child
//! from the copy, so siblings and ancestors are unaffected.
//!
//! Bounds are accumulated with saturating addition. Moving along an
//! unreachable edge saturates the bound to `T::max_value()`, which no finite
//! incumbent is above, so such children are pruned like any other.

use crate::matrix::CostMatrix;
use fixedbitset::FixedBitSet;
use num_traits::{PrimInt, Signed};
use voyage_model::{index::LocationIndex, model::Model};

/// One node of the branch-and-bound tree.
#[derive(Clone, PartialEq, Eq)]
pub struct SearchState<T> {
    path: Vec<LocationIndex>,
    visited: FixedBitSet,
    matrix: CostMatrix<T>,
    lower_bound: T,
    sequence_id: u64,
}

impl<T> SearchState<T>
where
    T: PrimInt + Signed,
{
    /// Builds the root state: the path `[start]`, the fully reduced model
    /// matrix, and the reduction amount as lower bound.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `start` is not a location of the model.
    pub fn root(model: &Model<T>, start: LocationIndex, sequence_id: u64) -> Self {
        debug_assert!(
            start.get() < model.num_locations(),
            "called `SearchState::root` with start location out of bounds: the len is {} but the index is {}",
            model.num_locations(),
            start.get()
        );

        let mut matrix = CostMatrix::from_model(model);
        let lower_bound = matrix.reduce();

        let mut visited = FixedBitSet::with_capacity(model.num_locations());
        visited.insert(start.get());

        Self {
            path: vec![start],
            visited,
            matrix,
            lower_bound,
            sequence_id,
        }
    }

    /// Returns the partial path, earliest location first.
    #[inline]
    pub fn path(&self) -> &[LocationIndex] {
        &self.path
    }

    /// Returns the location the path currently ends at.
    #[inline]
    pub fn last(&self) -> LocationIndex {
        // The path always holds at least the start location.
        self.path[self.path.len() - 1]
    }

    /// Returns the number of locations on the path. The root has depth 1.
    #[inline]
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Returns `true` if `location` is already on the path.
    #[inline]
    pub fn is_visited(&self, location: LocationIndex) -> bool {
        self.visited.contains(location.get())
    }

    /// Returns the locations not yet on the path, in ascending order.
    #[inline]
    pub fn unvisited(&self) -> impl Iterator<Item = LocationIndex> + '_ {
        self.visited.zeroes().map(LocationIndex::new)
    }

    /// Returns `true` if the path visits every location.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.path.len() == self.matrix.num_locations()
    }

    /// Returns the fully reduced matrix of this state.
    #[inline]
    pub fn matrix(&self) -> &CostMatrix<T> {
        &self.matrix
    }

    /// Returns the admissible lower bound. `T::max_value()` means no
    /// completion of this path has finite cost.
    #[inline]
    pub fn lower_bound(&self) -> T {
        self.lower_bound
    }

    /// Returns `true` if the lower bound has saturated to the sentinel.
    #[inline]
    pub fn is_infeasible(&self) -> bool {
        self.lower_bound == T::max_value()
    }

    /// Returns the creation sequence number of this state.
    #[inline]
    pub fn sequence_id(&self) -> u64 {
        self.sequence_id
    }
}

/// Derives the child of `parent` that travels next to `to`.
///
/// With `from` the last location of the parent's path, the child:
/// 1. adds the parent's reduced cost of `from -> to` to the bound,
/// 2. masks `to -> from`, the row `from` and the column `to`,
/// 3. appends `to` to the path,
/// 4. re-reduces the matrix and adds the reduction to the bound.
///
/// The child's bound is never below the parent's.
///
/// # Panics
///
/// In debug builds, panics if `to` is already on the parent's path.
pub fn expand<T>(parent: &SearchState<T>, to: LocationIndex, sequence_id: u64) -> SearchState<T>
where
    T: PrimInt + Signed,
{
    debug_assert!(
        to.get() < parent.matrix.num_locations(),
        "called `expand` with location out of bounds: the len is {} but the index is {}",
        parent.matrix.num_locations(),
        to.get()
    );
    debug_assert!(
        !parent.is_visited(to),
        "called `expand` with a location already on the path: {}",
        to
    );

    let from = parent.last();
    let edge = parent.matrix.get(from, to);

    let mut matrix = parent.matrix.clone();
    matrix.mask(to, from);
    matrix.mask_row(from);
    matrix.mask_column(to);

    let mut lower_bound = parent.lower_bound.saturating_add(edge.raw());
    lower_bound = lower_bound.saturating_add(matrix.reduce());

    let mut path = Vec::with_capacity(parent.path.len() + 1);
    path.extend_from_slice(&parent.path);
    path.push(to);

    let mut visited = parent.visited.clone();
    visited.insert(to.get());

    SearchState {
        path,
        visited,
        matrix,
        lower_bound,
        sequence_id,
    }
}

impl<T> std::fmt::Debug for SearchState<T>
where
    T: PrimInt + Signed + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchState")
            .field("sequence_id", &self.sequence_id)
            .field("path", &self.path)
            .field("lower_bound", &self.lower_bound)
            .field("matrix", &self.matrix)
            .finish()
    }
}

impl<T> std::fmt::Display for SearchState<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchState(id: {}, depth: {}, lower_bound: {}, path: [",
            self.sequence_id,
            self.path.len(),
            self.lower_bound
        )?;
        for (i, location) in self.path.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", location.get())?;
        }
        write!(f, "])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voyage_model::model::ModelBuilder;

    type IntegerType = i64;

    fn li(i: usize) -> LocationIndex {
        LocationIndex::new(i)
    }

    fn four_city() -> Model<IntegerType> {
        ModelBuilder::from_rows(&[
            vec![None, Some(10), Some(15), Some(20)],
            vec![Some(5), None, Some(9), Some(10)],
            vec![Some(6), Some(13), None, Some(12)],
            vec![Some(8), Some(8), Some(9), None],
        ])
        .build()
    }

    #[test]
    fn test_root_state() {
        let root = SearchState::root(&four_city(), li(0), 0);
        assert_eq!(root.path(), &[li(0)]);
        assert_eq!(root.depth(), 1);
        assert_eq!(root.lower_bound(), 35);
        assert!(root.matrix().is_fully_reduced());
        assert!(root.is_visited(li(0)));
        assert_eq!(root.unvisited().collect::<Vec<_>>(), vec![li(1), li(2), li(3)]);
        assert!(!root.is_complete());
    }

    #[test]
    fn test_expand_four_city_children() {
        let model = four_city();
        let root = SearchState::root(&model, li(0), 0);

        // Root reduced row 0 is [inf, 0, 4, 5].
        let to_b = expand(&root, li(1), 1);
        let to_c = expand(&root, li(2), 2);
        let to_d = expand(&root, li(3), 3);

        assert_eq!(to_b.path(), &[li(0), li(1)]);
        assert_eq!(to_b.lower_bound(), 35);
        assert!(to_c.lower_bound() >= 35 + 4);
        assert!(to_d.lower_bound() >= 35 + 5);
        assert_eq!(to_c.sequence_id(), 2);
    }

    #[test]
    fn test_expand_masks_row_column_and_return_edge() {
        let root = SearchState::root(&four_city(), li(0), 0);
        let child = expand(&root, li(2), 1);
        let m = child.matrix();

        assert!(m.row(li(0)).iter().all(|c| c.is_unreachable()));
        assert!((0..4).all(|i| m.get(li(i), li(2)).is_unreachable()));
        assert!(m.get(li(2), li(0)).is_unreachable());
        assert!(m.is_fully_reduced());
    }

    #[test]
    fn test_expand_leaves_parent_untouched() {
        let root = SearchState::root(&four_city(), li(0), 0);
        let snapshot = root.clone();
        let _ = expand(&root, li(3), 1);
        assert_eq!(root, snapshot);
    }

    #[test]
    fn test_bounds_never_decrease_along_a_path() {
        let root = SearchState::root(&four_city(), li(0), 0);
        let a = expand(&root, li(1), 1);
        let b = expand(&a, li(3), 2);
        let c = expand(&b, li(2), 3);

        assert!(root.lower_bound() <= a.lower_bound());
        assert!(a.lower_bound() <= b.lower_bound());
        assert!(b.lower_bound() <= c.lower_bound());
        assert!(c.is_complete());
        assert_eq!(c.path(), &[li(0), li(1), li(3), li(2)]);
        assert!(c.lower_bound() <= four_city().tour_cost(c.path()).unwrap());
    }

    #[test]
    fn test_unreachable_edge_saturates_bound() {
        let mut builder = ModelBuilder::<IntegerType>::new(3);
        builder
            .set_cost(li(0), li(1), 1)
            .set_cost(li(1), li(2), 1)
            .set_cost(li(2), li(0), 1);
        let model = builder.build();

        let root = SearchState::root(&model, li(0), 0);
        let child = expand(&root, li(2), 1);
        assert!(child.is_infeasible());
        assert_eq!(child.lower_bound(), IntegerType::MAX);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "called `expand` with a location already on the path")]
    fn test_expand_rejects_visited_location() {
        let root = SearchState::root(&four_city(), li(0), 0);
        let _ = expand(&root, li(0), 1);
    }

    #[test]
    fn test_display() {
        let root = SearchState::root(&four_city(), li(0), 0);
        let child = expand(&root, li(1), 7);
        assert_eq!(
            format!("{}", child),
            "SearchState(id: 7, depth: 2, lower_bound: 35, path: [0, 1])"
        );
    }
}
