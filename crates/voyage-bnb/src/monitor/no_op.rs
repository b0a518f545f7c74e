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

//! A monitor that observes nothing.

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    state::SearchState,
    stats::BnbSolverStatistics,
};
use num_traits::{PrimInt, Signed};
use voyage_model::{model::Model, tour::Tour};

/// A `TreeSearchMonitor` whose callbacks all do nothing and which never
/// stops the search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOperationMonitor;

impl NoOperationMonitor {
    #[inline(always)]
    pub fn new() -> Self {
        Self
    }
}

impl std::fmt::Display for NoOperationMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NoOperationMonitor")
    }
}

impl<T> TreeSearchMonitor<T> for NoOperationMonitor
where
    T: PrimInt + Signed,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "NoOperationMonitor"
    }

    #[inline(always)]
    fn on_enter_search(&mut self, _model: &Model<T>, _statistics: &BnbSolverStatistics<T>) {}

    #[inline(always)]
    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics<T>) {}

    #[inline(always)]
    fn on_step(&mut self, _state: &SearchState<T>, _statistics: &BnbSolverStatistics<T>) {}

    #[inline(always)]
    fn on_prune(
        &mut self,
        _state: &SearchState<T>,
        _reason: PruneReason,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }

    #[inline(always)]
    fn on_expanded(
        &mut self,
        _state: &SearchState<T>,
        _enqueued: usize,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }

    #[inline(always)]
    fn on_solution_found(&mut self, _tour: &Tour<T>, _statistics: &BnbSolverStatistics<T>) {}
}
