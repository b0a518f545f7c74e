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

//! The priority queue of open search states.
//!
//! States are served in order of a key chosen by `PriorityPolicy`. The
//! default key is the depth-normalized bound `lower_bound / depth`, which
//! favors deep states and so reaches complete tours early. Keys are compared
//! exactly by cross multiplication in 128-bit arithmetic; no division is
//! performed. States with equal keys are served in insertion order.

use crate::state::SearchState;
use num_traits::{PrimInt, Signed};
use std::{cmp::Ordering, collections::BinaryHeap};

/// How the frontier orders open states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PriorityPolicy {
    /// Smallest `lower_bound / depth` first.
    #[default]
    DepthNormalized,
    /// Smallest `lower_bound` first.
    BestFirst,
}

impl PriorityPolicy {
    /// Compares two `(lower_bound, depth)` keys. `Ordering::Less` means the
    /// first key is served first.
    #[inline]
    pub fn compare<T>(self, a: (T, usize), b: (T, usize)) -> Ordering
    where
        T: Into<i64>,
    {
        let widen = |bound: T| i128::from(Into::<i64>::into(bound));
        let (a_bound, a_depth) = (widen(a.0), a.1 as i128);
        let (b_bound, b_depth) = (widen(b.0), b.1 as i128);

        match self {
            PriorityPolicy::DepthNormalized => (a_bound * b_depth).cmp(&(b_bound * a_depth)),
            PriorityPolicy::BestFirst => a_bound.cmp(&b_bound),
        }
    }
}

impl std::fmt::Display for PriorityPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriorityPolicy::DepthNormalized => write!(f, "DepthNormalized"),
            PriorityPolicy::BestFirst => write!(f, "BestFirst"),
        }
    }
}

struct FrontierEntry<T> {
    policy: PriorityPolicy,
    insertion: u64,
    state: SearchState<T>,
}

impl<T> FrontierEntry<T>
where
    T: PrimInt + Signed + Into<i64>,
{
    #[inline(always)]
    fn key(&self) -> (T, usize) {
        (self.state.lower_bound(), self.state.depth())
    }

    // `Less` means `self` is served before `other`.
    #[inline(always)]
    fn serve_order(&self, other: &Self) -> Ordering {
        self.policy
            .compare(self.key(), other.key())
            .then_with(|| self.insertion.cmp(&other.insertion))
    }
}

impl<T> PartialEq for FrontierEntry<T>
where
    T: PrimInt + Signed + Into<i64>,
{
    fn eq(&self, other: &Self) -> bool {
        self.serve_order(other) == Ordering::Equal
    }
}

impl<T> Eq for FrontierEntry<T> where T: PrimInt + Signed + Into<i64> {}

impl<T> PartialOrd for FrontierEntry<T>
where
    T: PrimInt + Signed + Into<i64>,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for FrontierEntry<T>
where
    T: PrimInt + Signed + Into<i64>,
{
    // `BinaryHeap` is a max-heap; the entry served first must compare greatest.
    fn cmp(&self, other: &Self) -> Ordering {
        other.serve_order(self)
    }
}

/// A min-priority queue of `SearchState`s.
pub struct Frontier<T> {
    heap: BinaryHeap<FrontierEntry<T>>,
    policy: PriorityPolicy,
    next_insertion: u64,
}

impl<T> Default for Frontier<T>
where
    T: PrimInt + Signed + Into<i64>,
{
    fn default() -> Self {
        Self::new(PriorityPolicy::default())
    }
}

impl<T> Frontier<T>
where
    T: PrimInt + Signed + Into<i64>,
{
    /// Creates an empty frontier ordered by `policy`.
    #[inline]
    pub fn new(policy: PriorityPolicy) -> Self {
        Self {
            heap: BinaryHeap::new(),
            policy,
            next_insertion: 0,
        }
    }

    /// Creates an empty frontier with room for `capacity` states.
    #[inline]
    pub fn with_capacity(policy: PriorityPolicy, capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            policy,
            next_insertion: 0,
        }
    }

    /// Returns the ordering policy.
    #[inline]
    pub fn policy(&self) -> PriorityPolicy {
        self.policy
    }

    /// Inserts a state in `O(log n)`.
    #[inline]
    pub fn push(&mut self, state: SearchState<T>) {
        let insertion = self.next_insertion;
        self.next_insertion += 1;
        self.heap.push(FrontierEntry {
            policy: self.policy,
            insertion,
            state,
        });
    }

    /// Removes and returns the state with the smallest key, or `None` if
    /// the frontier is empty.
    #[inline]
    pub fn pop_best(&mut self) -> Option<SearchState<T>> {
        self.heap.pop().map(|entry| entry.state)
    }

    /// Returns the state `pop_best` would return, without removing it.
    #[inline]
    pub fn peek_best(&self) -> Option<&SearchState<T>> {
        self.heap.peek().map(|entry| &entry.state)
    }

    /// Returns the number of open states.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if no state is open.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Removes every open state.
    #[inline]
    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_insertion = 0;
    }
}

impl<T> std::fmt::Debug for Frontier<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frontier")
            .field("policy", &self.policy)
            .field("len", &self.heap.len())
            .finish()
    }
}

impl<T> std::fmt::Display for Frontier<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Frontier(policy: {}, len: {})", self.policy, self.heap.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::expand;
    use voyage_model::{index::LocationIndex, model::ModelBuilder};

    fn li(i: usize) -> LocationIndex {
        LocationIndex::new(i)
    }

    // Every edge costs `c`, so every reduced matrix is all zeros and every
    // state's bound equals the root's.
    fn uniform_root(n: usize, c: i64) -> SearchState<i64> {
        let rows: Vec<Vec<Option<i64>>> = (0..n)
            .map(|i| (0..n).map(|j| (i != j).then_some(c)).collect())
            .collect();
        let model = ModelBuilder::from_rows(&rows).build();
        SearchState::root(&model, li(0), 0)
    }

    #[test]
    fn test_compare_depth_normalized_uses_exact_ratio() {
        let p = PriorityPolicy::DepthNormalized;
        // 10/3 < 7/2
        assert_eq!(p.compare((10i64, 3), (7i64, 2)), Ordering::Less);
        // 6/3 == 4/2
        assert_eq!(p.compare((6i64, 3), (4i64, 2)), Ordering::Equal);
        // Large values do not overflow.
        assert_eq!(
            p.compare((i64::MAX - 1, 2), (i64::MAX - 1, 3)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_compare_best_first_ignores_depth() {
        let p = PriorityPolicy::BestFirst;
        assert_eq!(p.compare((10i64, 3), (7i64, 2)), Ordering::Greater);
        assert_eq!(p.compare((5i32, 1), (5i32, 9)), Ordering::Equal);
    }

    #[test]
    fn test_pop_best_on_empty_is_none() {
        let mut frontier: Frontier<i64> = Frontier::default();
        assert!(frontier.is_empty());
        assert!(frontier.pop_best().is_none());
        assert!(frontier.peek_best().is_none());
    }

    #[test]
    fn test_depth_normalized_prefers_deeper_states_with_equal_bound() {
        let root = uniform_root(4, 1);
        let child = expand(&root, li(1), 1);
        let grandchild = expand(&child, li(2), 2);
        assert_eq!(root.lower_bound(), grandchild.lower_bound());

        let mut frontier = Frontier::new(PriorityPolicy::DepthNormalized);
        frontier.push(root.clone());
        frontier.push(grandchild.clone());
        frontier.push(child.clone());

        assert_eq!(frontier.len(), 3);
        assert_eq!(frontier.pop_best(), Some(grandchild));
        assert_eq!(frontier.pop_best(), Some(child));
        assert_eq!(frontier.pop_best(), Some(root));
        assert_eq!(frontier.len(), 0);
    }

    #[test]
    fn test_best_first_serves_ties_in_insertion_order() {
        let root = uniform_root(4, 1);
        let a = expand(&root, li(1), 1);
        let b = expand(&root, li(2), 2);
        let c = expand(&a, li(3), 3);

        let mut frontier = Frontier::new(PriorityPolicy::BestFirst);
        frontier.push(b.clone());
        frontier.push(c.clone());
        frontier.push(a.clone());

        assert_eq!(frontier.pop_best().map(|s| s.sequence_id()), Some(2));
        assert_eq!(frontier.pop_best().map(|s| s.sequence_id()), Some(3));
        assert_eq!(frontier.pop_best().map(|s| s.sequence_id()), Some(1));
    }

    #[test]
    fn test_depth_normalized_ties_are_fifo() {
        let root = uniform_root(5, 2);
        let mut frontier = Frontier::new(PriorityPolicy::DepthNormalized);
        for (seq, to) in [3, 1, 4, 2].into_iter().enumerate() {
            frontier.push(expand(&root, li(to), seq as u64));
        }

        let order: Vec<u64> = std::iter::from_fn(|| frontier.pop_best())
            .map(|s| s.sequence_id())
            .collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_smaller_normalized_key_wins() {
        let model = ModelBuilder::<i64>::from_rows(&[
            vec![None, Some(10), Some(15), Some(20)],
            vec![Some(5), None, Some(9), Some(10)],
            vec![Some(6), Some(13), None, Some(12)],
            vec![Some(8), Some(8), Some(9), None],
        ])
        .build();
        let root = SearchState::root(&model, li(0), 0);
        let children: Vec<_> = (1..4).map(|to| expand(&root, li(to), to as u64)).collect();

        let mut frontier = Frontier::with_capacity(PriorityPolicy::DepthNormalized, 4);
        for child in children.iter().rev() {
            frontier.push(child.clone());
        }

        let best = frontier.pop_best().expect("non-empty");
        assert!(children.iter().all(|c| {
            PriorityPolicy::DepthNormalized.compare(
                (best.lower_bound(), best.depth()),
                (c.lower_bound(), c.depth()),
            ) != Ordering::Greater
        }));
        assert_eq!(best.path(), &[li(0), li(1)]);
    }

    #[test]
    fn test_clear_and_display() {
        let mut frontier = Frontier::new(PriorityPolicy::BestFirst);
        frontier.push(uniform_root(3, 1));
        assert_eq!(format!("{}", frontier), "Frontier(policy: BestFirst, len: 1)");
        frontier.clear();
        assert!(frontier.is_empty());
    }
}
