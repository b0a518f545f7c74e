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

use num_traits::Zero;
use std::time::Duration;

/// Statistics collected during one run of the branch-and-bound solver.
///
/// Every run starts from `Default::default()`; the solver never carries
/// counters over from a previous run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BnbSolverStatistics<T> {
    /// States created, the root included.
    pub states_created: u64,
    /// States popped from the frontier and expanded into children.
    pub states_expanded: u64,
    /// States discarded because their bound reached the incumbent, whether
    /// when popped or right after creation.
    pub states_pruned: u64,
    /// Pruned children whose bound saturated because their edge does not
    /// exist. A subset of `states_pruned`.
    pub prunings_infeasible: u64,
    /// The largest frontier size observed at the top of the search loop.
    pub max_queue_size: u64,
    /// Complete tours that improved the incumbent. The seed is not counted.
    pub solutions_found: u64,
    /// Iterations of the search loop.
    pub iterations: u64,
    /// The lower bound of the root state.
    pub root_lower_bound: T,
    /// Total time spent in the solver, seeding included.
    pub time_total: Duration,
    /// Time spent in the search loop. This is what the time limit bounds.
    pub time_search: Duration,
}

impl<T> Default for BnbSolverStatistics<T>
where
    T: Zero,
{
    fn default() -> Self {
        Self {
            states_created: 0,
            states_expanded: 0,
            states_pruned: 0,
            prunings_infeasible: 0,
            max_queue_size: 0,
            solutions_found: 0,
            iterations: 0,
            root_lower_bound: T::zero(),
            time_total: Duration::ZERO,
            time_search: Duration::ZERO,
        }
    }
}

impl<T> BnbSolverStatistics<T> {
    #[inline]
    pub fn on_state_created(&mut self) {
        self.states_created = self.states_created.saturating_add(1);
    }

    #[inline]
    pub fn on_state_expanded(&mut self) {
        self.states_expanded = self.states_expanded.saturating_add(1);
    }

    /// Records a state discarded by the incumbent bound.
    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.states_pruned = self.states_pruned.saturating_add(1);
    }

    /// Records a child discarded because its edge does not exist.
    #[inline]
    pub fn on_pruning_infeasible(&mut self) {
        self.states_pruned = self.states_pruned.saturating_add(1);
        self.prunings_infeasible = self.prunings_infeasible.saturating_add(1);
    }

    #[inline]
    pub fn on_queue_size(&mut self, size: usize) {
        self.max_queue_size = self.max_queue_size.max(size as u64);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn on_iteration(&mut self) {
        self.iterations = self.iterations.saturating_add(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    #[inline]
    pub fn set_search_time(&mut self, duration: Duration) {
        self.time_search = duration;
    }

    #[inline]
    pub fn set_root_lower_bound(&mut self, bound: T) {
        self.root_lower_bound = bound;
    }
}

impl<T> std::fmt::Display for BnbSolverStatistics<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Voyage-BnB Solver Statistics:")?;
        writeln!(f, "  States created:       {}", self.states_created)?;
        writeln!(f, "  States expanded:      {}", self.states_expanded)?;
        writeln!(f, "  States pruned:        {}", self.states_pruned)?;
        writeln!(f, "  Infeasible prunings:  {}", self.prunings_infeasible)?;
        writeln!(f, "  Max queue size:       {}", self.max_queue_size)?;
        writeln!(f, "  Solutions found:      {}", self.solutions_found)?;
        writeln!(f, "  Iterations:           {}", self.iterations)?;
        writeln!(f, "  Root Lower Bound:     {}", self.root_lower_bound)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        writeln!(f, "  Search time:          {:.2?}", self.time_search)?;
        Ok(())
    }
}
