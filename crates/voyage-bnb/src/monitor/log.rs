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

//! Periodic progress reporting.
//!
//! `LogTreeSearchMonitor` writes a progress line through the `log` facade at
//! most once per interval. Reading the clock on every step is measurable in
//! the hot loop, so the clock is only consulted when the iteration counter
//! masked with `clock_check_mask` is zero.

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    state::SearchState,
    stats::BnbSolverStatistics,
};
use num_traits::{PrimInt, Signed};
use std::time::{Duration, Instant};
use voyage_model::{model::Model, tour::Tour};

#[derive(Debug, Clone)]
pub struct LogTreeSearchMonitor<T> {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_objective: Option<T>,
}

impl<T> LogTreeSearchMonitor<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    /// Creates a monitor that logs at most every `log_interval`, checking the
    /// clock when `iterations & clock_check_mask == 0`.
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_log_time: now,
            log_interval,
            clock_check_mask,
            best_objective: None,
        }
    }

    /// Returns the objective of the best tour reported so far.
    #[inline]
    pub fn best_objective(&self) -> Option<T> {
        self.best_objective
    }

    fn log_line(&mut self, state: &SearchState<T>, stats: &BnbSolverStatistics<T>) {
        let now = Instant::now();
        let best = match self.best_objective {
            Some(obj) => obj.to_string(),
            None => "seed".to_string(),
        };

        ::log::info!(
            "{:>8.1}s | iterations {:>10} | created {:>10} | pruned {:>10} | depth {:>4} | bound {:>10} | best {:>10}",
            now.duration_since(self.start_time).as_secs_f32(),
            stats.iterations,
            stats.states_created,
            stats.states_pruned,
            state.depth(),
            state.lower_bound(),
            best
        );

        self.last_log_time = now;
    }
}

impl<T> Default for LogTreeSearchMonitor<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl<T> std::fmt::Display for LogTreeSearchMonitor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogTreeSearchMonitor(log_interval: {:?}, clock_check_mask: {})",
            self.log_interval, self.clock_check_mask
        )
    }
}

impl<T> TreeSearchMonitor<T> for LogTreeSearchMonitor<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn name(&self) -> &str {
        "LogTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, model: &Model<T>, statistics: &BnbSolverStatistics<T>) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_objective = None;
        ::log::info!(
            "searching {} locations, root lower bound {}",
            model.num_locations(),
            statistics.root_lower_bound
        );
    }

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>) {
        ::log::info!(
            "search finished after {} iterations, {} states created, {} pruned",
            statistics.iterations,
            statistics.states_created,
            statistics.states_pruned
        );
    }

    fn on_step(&mut self, state: &SearchState<T>, statistics: &BnbSolverStatistics<T>) {
        if (statistics.iterations & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(state, statistics);
        }
    }

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

    fn on_solution_found(&mut self, tour: &Tour<T>, _statistics: &BnbSolverStatistics<T>) {
        self.best_objective = Some(tour.objective_value());
        ::log::info!("new incumbent with cost {}", tour.objective_value());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voyage_model::index::LocationIndex;

    #[test]
    fn test_tracks_best_objective_and_resets_on_enter() {
        let mut monitor = LogTreeSearchMonitor::<i64>::new(Duration::from_secs(3600), 0);
        let stats = BnbSolverStatistics::default();
        let tour = Tour::new(42, vec![LocationIndex::new(0), LocationIndex::new(1)]);

        monitor.on_solution_found(&tour, &stats);
        assert_eq!(monitor.best_objective(), Some(42));

        let model = voyage_model::model::ModelBuilder::<i64>::new(2).build();
        monitor.on_enter_search(&model, &stats);
        assert_eq!(monitor.best_objective(), None);
    }

    #[test]
    fn test_display() {
        let monitor = LogTreeSearchMonitor::<i32>::default();
        assert_eq!(
            format!("{}", monitor),
            "LogTreeSearchMonitor(log_interval: 1s, clock_check_mask: 4095)"
        );
    }
}
