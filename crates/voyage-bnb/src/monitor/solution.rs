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

//! Solution limit monitor for tree search
//!
//! `SolutionLimitMonitor` stops the search once a configured number of
//! improving tours has been found. The seed tour does not count.

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    state::SearchState,
    stats::BnbSolverStatistics,
};
use num_traits::{PrimInt, Signed};
use voyage_model::{model::Model, tour::Tour};
use voyage_search::command::SearchCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolutionLimitMonitor {
    solution_limit: u64,
}

impl SolutionLimitMonitor {
    /// Creates a new `SolutionLimitMonitor` with the specified solution limit.
    #[inline]
    pub fn new(solution_limit: u64) -> Self {
        Self { solution_limit }
    }

    /// Returns the number of solutions after which the search stops.
    #[inline]
    pub fn solution_limit(&self) -> u64 {
        self.solution_limit
    }
}

impl std::fmt::Display for SolutionLimitMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SolutionLimitMonitor(limit: {})", self.solution_limit)
    }
}

impl<T> TreeSearchMonitor<T> for SolutionLimitMonitor
where
    T: PrimInt + Signed,
{
    fn name(&self) -> &str {
        "SolutionLimitMonitor"
    }

    fn on_enter_search(&mut self, _model: &Model<T>, _statistics: &BnbSolverStatistics<T>) {}

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics<T>) {}

    fn search_command(&mut self, statistics: &BnbSolverStatistics<T>) -> SearchCommand {
        if statistics.solutions_found >= self.solution_limit {
            SearchCommand::Terminate("Solution limit reached".to_string())
        } else {
            SearchCommand::Continue
        }
    }

    fn on_step(&mut self, _state: &SearchState<T>, _statistics: &BnbSolverStatistics<T>) {}

    fn on_prune(
        &mut self,
        _state: &SearchState<T>,
        _reason: PruneReason,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }

    fn on_expanded(
        &mut self,
        _state: &SearchState<T>,
        _enqueued: usize,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }

    fn on_solution_found(&mut self, _tour: &Tour<T>, _statistics: &BnbSolverStatistics<T>) {}
}
