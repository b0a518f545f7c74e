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

//! Tree search monitoring interface
//!
//! Declares the `TreeSearchMonitor` trait and `PruneReason` for observing and
//! controlling the branch-and-bound search. Callbacks track the solver
//! lifecycle, and a monitor can stop the search via `SearchCommand`
//! (default: Continue).
//!
//! Lifecycle
//! - enter -> {command -> step -> prune | solution | expanded}* -> exit
//! - `BnbSolverStatistics` is provided to every callback for telemetry.
//!
//! Methods take `&mut self`; monitors are assumed single-threaded.

use crate::{state::SearchState, stats::BnbSolverStatistics};
use num_traits::{PrimInt, Signed};
use voyage_model::{model::Model, tour::Tour};
use voyage_search::command::SearchCommand;

/// Reasons for pruning a search state.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum PruneReason {
    /// The state's path uses an edge that does not exist.
    Infeasible,
    /// The state's lower bound is not below the incumbent cost.
    BoundDominated,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::Infeasible => write!(f, "Infeasible"),
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
        }
    }
}

/// Trait for monitoring and controlling the search process of the solver.
pub trait TreeSearchMonitor<T>
where
    T: PrimInt + Signed,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called once the root state has been created and pushed.
    fn on_enter_search(&mut self, model: &Model<T>, statistics: &BnbSolverStatistics<T>);
    /// Called when the search ends, for any reason.
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>);
    /// Called at the top of every iteration to determine whether to go on.
    fn search_command(&mut self, _statistics: &BnbSolverStatistics<T>) -> SearchCommand {
        SearchCommand::Continue
    }
    /// Called for every state popped from the frontier.
    fn on_step(&mut self, state: &SearchState<T>, statistics: &BnbSolverStatistics<T>);
    /// Called when a state is discarded, either when popped or right after
    /// it was created.
    fn on_prune(
        &mut self,
        state: &SearchState<T>,
        reason: PruneReason,
        statistics: &BnbSolverStatistics<T>,
    );
    /// Called after a state has been expanded. `enqueued` is the number of
    /// children that survived pruning and were pushed onto the frontier.
    fn on_expanded(
        &mut self,
        state: &SearchState<T>,
        enqueued: usize,
        statistics: &BnbSolverStatistics<T>,
    );
    /// Called when a complete tour replaces the incumbent.
    fn on_solution_found(&mut self, tour: &Tour<T>, statistics: &BnbSolverStatistics<T>);
}

impl<T, M> TreeSearchMonitor<T> for &mut M
where
    T: PrimInt + Signed,
    M: TreeSearchMonitor<T> + ?Sized,
{
    #[inline(always)]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline(always)]
    fn on_enter_search(&mut self, model: &Model<T>, statistics: &BnbSolverStatistics<T>) {
        (**self).on_enter_search(model, statistics)
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>) {
        (**self).on_exit_search(statistics)
    }

    #[inline(always)]
    fn search_command(&mut self, statistics: &BnbSolverStatistics<T>) -> SearchCommand {
        (**self).search_command(statistics)
    }

    #[inline(always)]
    fn on_step(&mut self, state: &SearchState<T>, statistics: &BnbSolverStatistics<T>) {
        (**self).on_step(state, statistics)
    }

    #[inline(always)]
    fn on_prune(
        &mut self,
        state: &SearchState<T>,
        reason: PruneReason,
        statistics: &BnbSolverStatistics<T>,
    ) {
        (**self).on_prune(state, reason, statistics)
    }

    #[inline(always)]
    fn on_expanded(
        &mut self,
        state: &SearchState<T>,
        enqueued: usize,
        statistics: &BnbSolverStatistics<T>,
    ) {
        (**self).on_expanded(state, enqueued, statistics)
    }

    #[inline(always)]
    fn on_solution_found(&mut self, tour: &Tour<T>, statistics: &BnbSolverStatistics<T>) {
        (**self).on_solution_found(tour, statistics)
    }
}

impl<'a, T> std::fmt::Debug for dyn TreeSearchMonitor<T> + 'a
where
    T: PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl<'a, T> std::fmt::Display for dyn TreeSearchMonitor<T> + 'a
where
    T: PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}
