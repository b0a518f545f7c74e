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

//! Monitoring combinators for tree search
//!
//! Provides `CompositeTreeSearchMonitor`, a fan-out monitor that forwards every
//! event to its children. This lets you mix logging and early stopping without
//! coupling them to the solver.
//!
//! Behavior
//! - Events are dispatched to child monitors in insertion order.
//! - `search_command` short-circuits on the first non-`Continue` response;
//!   put stricter stop conditions first.
//! - Other callbacks always fan out to all children.

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    state::SearchState,
    stats::BnbSolverStatistics,
};
use num_traits::{PrimInt, Signed};
use voyage_model::{model::Model, tour::Tour};
use voyage_search::command::SearchCommand;

/// A tree search monitor that aggregates multiple monitors and forwards events to all of them.
pub struct CompositeTreeSearchMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    monitors: Vec<Box<dyn TreeSearchMonitor<T> + 'a>>,
}

impl<'a, T> Default for CompositeTreeSearchMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> CompositeTreeSearchMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    /// Creates a new empty `CompositeTreeSearchMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeTreeSearchMonitor` with room for `capacity` monitors.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a monitor to the end of the dispatch order.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: TreeSearchMonitor<T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor to the end of the dispatch order.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn TreeSearchMonitor<T> + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns the monitors in dispatch order.
    #[inline(always)]
    pub fn monitors(&self) -> &[Box<dyn TreeSearchMonitor<T> + 'a>] {
        &self.monitors
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, T> std::fmt::Debug for CompositeTreeSearchMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeTreeSearchMonitor")
            .field(
                "monitors",
                &self.monitors.iter().map(|m| m.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<'a, T> FromIterator<Box<dyn TreeSearchMonitor<T> + 'a>> for CompositeTreeSearchMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    #[inline(always)]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn TreeSearchMonitor<T> + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> TreeSearchMonitor<T> for CompositeTreeSearchMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "CompositeTreeSearchMonitor"
    }

    #[inline(always)]
    fn on_enter_search(&mut self, model: &Model<T>, statistics: &BnbSolverStatistics<T>) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(model, statistics);
        }
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(statistics);
        }
    }

    #[inline(always)]
    fn search_command(&mut self, statistics: &BnbSolverStatistics<T>) -> SearchCommand {
        for monitor in &mut self.monitors {
            let cmd = monitor.search_command(statistics);
            if cmd.is_terminate() {
                return cmd;
            }
        }
        SearchCommand::Continue
    }

    #[inline(always)]
    fn on_step(&mut self, state: &SearchState<T>, statistics: &BnbSolverStatistics<T>) {
        for monitor in &mut self.monitors {
            monitor.on_step(state, statistics);
        }
    }

    #[inline(always)]
    fn on_prune(
        &mut self,
        state: &SearchState<T>,
        reason: PruneReason,
        statistics: &BnbSolverStatistics<T>,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_prune(state, reason, statistics);
        }
    }

    #[inline(always)]
    fn on_expanded(
        &mut self,
        state: &SearchState<T>,
        enqueued: usize,
        statistics: &BnbSolverStatistics<T>,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_expanded(state, enqueued, statistics);
        }
    }

    #[inline(always)]
    fn on_solution_found(&mut self, tour: &Tour<T>, statistics: &BnbSolverStatistics<T>) {
        for monitor in &mut self.monitors {
            monitor.on_solution_found(tour, statistics);
        }
    }
}
