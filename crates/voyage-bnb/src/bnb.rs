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

//! Branch-and-bound solver for the asymmetric traveling salesperson problem.
//!
//! The solver keeps a frontier of open `SearchState`s ordered by the
//! configured `PriorityPolicy`. Each state carries a fully reduced cost
//! matrix whose accumulated reduction is an admissible lower bound on every
//! tour extending the state's path. Popping the best state either prunes it
//! against the incumbent, closes it as a complete tour, or expands it into
//! one child per unvisited location.
//!
//! A run starts from a seed tour supplied by a `SeedGenerator`. Without a
//! seed there is no finite upper bound, and the run reports the instance as
//! infeasible. The wall-clock budget of `BnbConfig` covers the search loop
//! only: its clock starts once the root is on the frontier, so a slow seed
//! generator does not eat into it. The budget is checked once per loop
//! iteration, before the next state is popped; expanding a single state is
//! never interrupted.
//!
//! A search session object encapsulates per-run state, statistics, and
//! timing. The solver itself only keeps the frontier, so its allocation is
//! reused across runs.

use crate::{
    config::BnbConfig,
    frontier::Frontier,
    incumbent::{IncumbentStore, NoSharedIncumbent, SharedIncumbentAdapter},
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    result::{BnbSolverOutcome, BnbTerminationReason},
    state::{self, SearchState},
    stats::BnbSolverStatistics,
};
use std::time::Instant;
use voyage_model::{model::Model, tour::Tour};
use voyage_search::{
    command::SearchCommand, incumbent::SharedIncumbent, num::SolverNumeric, seed::SeedGenerator,
};

/// An exact branch-and-bound solver based on reduced cost matrices.
///
/// This is just the execution engine; the initial tour comes from a
/// `SeedGenerator` and observation of the run is left to a
/// `TreeSearchMonitor`.
pub struct BnbSolver<T> {
    config: BnbConfig,
    frontier: Frontier<T>,
}

impl<T> Default for BnbSolver<T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BnbSolver<T>
where
    T: SolverNumeric,
{
    /// Creates a solver with the default configuration.
    #[inline]
    pub fn new() -> Self {
        Self::with_config(BnbConfig::default())
    }

    /// Creates a solver with the given configuration.
    #[inline]
    pub fn with_config(config: BnbConfig) -> Self {
        Self {
            config,
            frontier: Frontier::new(config.priority_policy()),
        }
    }

    /// Returns the configuration used for every run.
    #[inline]
    pub fn config(&self) -> &BnbConfig {
        &self.config
    }

    /// Solves `model` starting from the tour produced by `seed`.
    ///
    /// This variant does not use a shared incumbent and thus acts as a
    /// standalone, single threaded solver.
    ///
    /// # Panics
    ///
    /// Panics if the configured start location is not a location of `model`.
    #[inline]
    pub fn solve<S, M>(&mut self, model: &Model<T>, seed: S, monitor: M) -> BnbSolverOutcome<T>
    where
        S: SeedGenerator<T>,
        M: TreeSearchMonitor<T>,
    {
        self.solve_internal(model, seed, monitor, NoSharedIncumbent::new())
    }

    /// Solves `model` starting from the tour produced by `seed`, publishing
    /// every improving tour to `incumbent` and pruning against the best
    /// objective any other search has published there.
    ///
    /// States are pruned against the shared bound. If the frontier empties
    /// while the shared bound is below every tour this run found, the
    /// shared tour is the proven optimum and the outcome carries it.
    #[inline]
    pub fn solve_with_incumbent<S, M>(
        &mut self,
        model: &Model<T>,
        seed: S,
        monitor: M,
        incumbent: &SharedIncumbent<T>,
    ) -> BnbSolverOutcome<T>
    where
        S: SeedGenerator<T>,
        M: TreeSearchMonitor<T>,
    {
        self.solve_internal(model, seed, monitor, SharedIncumbentAdapter::new(incumbent))
    }

    fn solve_internal<S, M, I>(
        &mut self,
        model: &Model<T>,
        mut seed: S,
        mut monitor: M,
        backing: I,
    ) -> BnbSolverOutcome<T>
    where
        S: SeedGenerator<T>,
        M: TreeSearchMonitor<T>,
        I: IncumbentStore<T>,
    {
        assert!(
            self.config.start_location().get() < model.num_locations(),
            "called `BnbSolver::solve` with start location out of bounds: the len is {} but the index is {}",
            model.num_locations(),
            self.config.start_location().get()
        );

        let start_time = Instant::now();

        let Some(seed_tour) = seed.generate(model) else {
            log::debug!(
                "seed generator '{}' found no finite tour for {} locations",
                seed.name(),
                model.num_locations()
            );
            let mut stats = BnbSolverStatistics::default();
            stats.set_total_time(start_time.elapsed());
            return BnbSolverOutcome::infeasible(stats);
        };

        debug_assert!(
            model.is_permutation(seed_tour.order()),
            "called `BnbSolver::solve` with seed generator '{}' returning a tour that is not a permutation",
            seed.name()
        );
        debug_assert_eq!(
            model.tour_cost(seed_tour.order()),
            Some(seed_tour.objective_value()),
            "called `BnbSolver::solve` with seed generator '{}' returning a tour with a wrong objective value",
            seed.name()
        );

        log::debug!(
            "seed generator '{}' produced a tour with cost {}",
            seed.name(),
            seed_tour.objective_value()
        );

        let session = BnbSolverSearchSession::new(
            &mut self.frontier,
            &self.config,
            model,
            &mut monitor,
            backing,
            seed_tour,
            start_time,
        );
        let outcome = session.run();
        self.reset();
        outcome
    }

    /// Clears the frontier while keeping its allocation.
    #[inline]
    fn reset(&mut self) {
        self.frontier.clear();
    }
}

impl<T> std::fmt::Debug for BnbSolver<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BnbSolver")
            .field("config", &self.config)
            .field("frontier", &self.frontier)
            .finish()
    }
}

impl<T> std::fmt::Display for BnbSolver<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BnbSolver({})", self.config)
    }
}

/// A search session for the branch-and-bound solver.
/// This struct encapsulates the state and logic of a single search run.
struct BnbSolverSearchSession<'a, T, M, I>
where
    T: SolverNumeric,
    I: IncumbentStore<T>,
{
    frontier: &'a mut Frontier<T>,
    config: &'a BnbConfig,
    model: &'a Model<T>,
    monitor: &'a mut M,
    incumbent: I,
    best_objective: T,
    best_tour: Tour<T>,
    stats: BnbSolverStatistics<T>,
    start_time: Instant,
    search_start_time: Instant,
}

impl<'a, T, M, I> std::fmt::Debug for BnbSolverSearchSession<'a, T, M, I>
where
    T: SolverNumeric,
    I: IncumbentStore<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("model", &self.model)
            .field("frontier", &self.frontier)
            .field("best_objective", &self.best_objective)
            .field("best_tour", &self.best_tour)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, T, M, I> std::fmt::Display for BnbSolverSearchSession<'a, T, M, I>
where
    T: SolverNumeric,
    I: IncumbentStore<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchSession(best_objective: {}, open: {}, created: {})",
            self.best_objective,
            self.frontier.len(),
            self.stats.states_created
        )
    }
}

impl<'a, T, M, I> BnbSolverSearchSession<'a, T, M, I>
where
    T: SolverNumeric,
    M: TreeSearchMonitor<T>,
    I: IncumbentStore<T>,
{
    /// Create a new search session around a seed tour.
    #[inline]
    fn new(
        frontier: &'a mut Frontier<T>,
        config: &'a BnbConfig,
        model: &'a Model<T>,
        monitor: &'a mut M,
        incumbent: I,
        seed: Tour<T>,
        start_time: Instant,
    ) -> Self {
        debug_assert!(
            frontier.is_empty(),
            "called `BnbSolverSearchSession::new` with a non-empty frontier: the len is {}",
            frontier.len()
        );

        incumbent.on_solution_found(&seed);
        let best_objective = incumbent.tighten(seed.objective_value());

        Self {
            frontier,
            config,
            model,
            monitor,
            incumbent,
            best_objective,
            best_tour: seed,
            stats: BnbSolverStatistics::default(),
            start_time,
            search_start_time: Instant::now(),
        }
    }

    /// Run the search session.
    fn run(mut self) -> BnbSolverOutcome<T> {
        let root = SearchState::root(
            self.model,
            self.config.start_location(),
            self.stats.states_created,
        );
        self.stats.on_state_created();
        self.stats.set_root_lower_bound(root.lower_bound());
        self.frontier.push(root);

        self.monitor.on_enter_search(self.model, &self.stats);
        self.search_start_time = Instant::now();

        let termination_reason = loop {
            if self.frontier.is_empty() {
                break BnbTerminationReason::OptimalityProven;
            }
            if self.search_start_time.elapsed() >= self.config.time_limit() {
                break BnbTerminationReason::TimeLimitReached;
            }
            if let SearchCommand::Terminate(msg) = self.monitor.search_command(&self.stats) {
                break BnbTerminationReason::Aborted(msg);
            }

            self.stats.on_iteration();
            self.stats.on_queue_size(self.frontier.len());

            let Some(state) = self.frontier.pop_best() else {
                break BnbTerminationReason::OptimalityProven;
            };
            self.step(&state);
        };

        self.stats.set_search_time(self.search_start_time.elapsed());
        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);

        log::debug!(
            "search terminated ({}) with cost {} after {} iterations",
            termination_reason,
            self.best_tour.objective_value(),
            self.stats.iterations
        );

        self.finalize_result(termination_reason)
    }

    /// Processes one state popped from the frontier.
    #[inline]
    fn step(&mut self, state: &SearchState<T>) {
        self.best_objective = self.incumbent.tighten(self.best_objective);
        self.monitor.on_step(state, &self.stats);

        if state.lower_bound() >= self.best_objective {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(state, PruneReason::BoundDominated, &self.stats);
            return;
        }

        if state.is_complete() {
            self.handle_complete_tour(state);
            return;
        }

        self.expand(state);
    }

    /// Evaluates a complete path with its exact cost and installs it if it
    /// beats the incumbent.
    #[inline]
    fn handle_complete_tour(&mut self, state: &SearchState<T>) {
        let Some(cost) = self.model.tour_cost(state.path()) else {
            // The closing edge does not exist.
            self.stats.on_pruning_infeasible();
            self.monitor
                .on_prune(state, PruneReason::Infeasible, &self.stats);
            return;
        };

        if cost >= self.best_objective {
            return;
        }

        self.best_objective = cost;
        self.best_tour = Tour::new(cost, state.path().to_vec());
        self.stats.on_solution_found();
        self.incumbent.on_solution_found(&self.best_tour);
        self.monitor
            .on_solution_found(&self.best_tour, &self.stats);

        log::debug!(
            "new incumbent with cost {} after {} iterations",
            cost,
            self.stats.iterations
        );
    }

    /// Creates one child per unvisited location and pushes the children
    /// whose bound is below the incumbent.
    #[inline]
    fn expand(&mut self, state: &SearchState<T>) {
        self.stats.on_state_expanded();

        let mut enqueued = 0;
        for to in state.unvisited() {
            let child = state::expand(state, to, self.stats.states_created);
            self.stats.on_state_created();

            if child.is_infeasible() {
                self.stats.on_pruning_infeasible();
                self.monitor
                    .on_prune(&child, PruneReason::Infeasible, &self.stats);
            } else if child.lower_bound() >= self.best_objective {
                self.stats.on_pruning_bound();
                self.monitor
                    .on_prune(&child, PruneReason::BoundDominated, &self.stats);
            } else {
                self.frontier.push(child);
                enqueued += 1;
            }
        }

        self.monitor.on_expanded(state, enqueued, &self.stats);
    }

    /// Finalize the solver result based on the best tour and the
    /// termination reason.
    ///
    /// # Note
    ///
    /// This consumes self.
    #[inline]
    fn finalize_result(self, reason: BnbTerminationReason) -> BnbSolverOutcome<T> {
        match reason {
            BnbTerminationReason::OptimalityProven => self.finalize_proven(),
            BnbTerminationReason::InfeasibilityProven => BnbSolverOutcome::infeasible(self.stats),
            BnbTerminationReason::TimeLimitReached => {
                BnbSolverOutcome::time_limit_reached(self.best_tour, self.stats)
            }
            BnbTerminationReason::Aborted(msg) => {
                BnbSolverOutcome::aborted(self.best_tour, msg, self.stats)
            }
        }
    }

    /// Picks the tour the exhausted frontier proves optimal.
    ///
    /// States may have been pruned against a shared bound below the local
    /// incumbent. The proof then covers the shared tour, not the local one.
    fn finalize_proven(self) -> BnbSolverOutcome<T> {
        let bound = self.incumbent.tighten(self.best_objective);
        if bound >= self.best_tour.objective_value() {
            return BnbSolverOutcome::optimal(self.best_tour, self.stats);
        }

        match self.incumbent.snapshot() {
            Some(shared) if shared.objective_value() <= bound => {
                debug_assert!(
                    self.model.is_permutation(shared.order()),
                    "called `BnbSolver::solve_with_incumbent` with a shared tour that is not a permutation of the model"
                );
                log::debug!(
                    "frontier exhausted against the shared bound {}, adopting the shared tour",
                    shared.objective_value()
                );
                BnbSolverOutcome::optimal(shared, self.stats)
            }
            _ => BnbSolverOutcome::dominated(self.best_tour, self.stats),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        frontier::PriorityPolicy,
        monitor::{no_op::NoOperationMonitor, solution::SolutionLimitMonitor},
    };
    use std::time::Duration;
    use voyage_model::{index::LocationIndex, model::ModelBuilder};
    use voyage_search::seed::{fixed::FixedTourSeed, nearest::NearestNeighborSeed};

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
    fn test_solve_four_city_from_worse_seed() {
        let model = four_city();
        let mut solver = BnbSolver::new();
        let seed = FixedTourSeed::from_indices([0, 1, 2, 3]);

        let outcome = solver.solve(&model, seed, NoOperationMonitor::new());

        assert!(outcome.is_optimal());
        assert_eq!(
            outcome.termination_reason(),
            &BnbTerminationReason::OptimalityProven
        );
        assert_eq!(outcome.cost(), Some(35));
        assert_eq!(outcome.tour(), &[li(0), li(1), li(3), li(2)]);

        let stats = outcome.statistics();
        assert_eq!(stats.root_lower_bound, 35);
        assert!(stats.states_created >= 5);
        assert!(stats.solutions_found >= 1);
        assert!(stats.max_queue_size >= 1);
    }

    #[test]
    fn test_optimal_seed_is_kept_without_new_solutions() {
        let model = four_city();
        let mut solver = BnbSolver::new();

        let outcome = solver.solve(&model, NearestNeighborSeed::new(), NoOperationMonitor::new());

        assert!(outcome.is_optimal());
        assert_eq!(outcome.cost(), Some(35));
        // The root bound equals the seed cost, so the root itself is pruned.
        assert_eq!(outcome.statistics().solutions_found, 0);
        assert_eq!(outcome.statistics().states_created, 1);
        assert_eq!(outcome.statistics().states_pruned, 1);
    }

    #[test]
    fn test_zero_budget_returns_seed() {
        let model = four_city();
        let config = BnbConfig::builder().time_limit(Duration::ZERO).build();
        let mut solver = BnbSolver::with_config(config);

        let outcome = solver.solve(
            &model,
            FixedTourSeed::from_indices([0, 1, 2, 3]),
            NoOperationMonitor::new(),
        );

        assert_eq!(
            outcome.termination_reason(),
            &BnbTerminationReason::TimeLimitReached
        );
        assert!(!outcome.is_optimal());
        assert_eq!(outcome.cost(), Some(39));
        assert_eq!(outcome.tour(), &[li(0), li(1), li(2), li(3)]);
        assert_eq!(outcome.statistics().solutions_found, 0);
        assert_eq!(outcome.statistics().iterations, 0);
    }

    #[test]
    fn test_monitor_can_abort() {
        let model = four_city();
        let mut solver = BnbSolver::new();

        let outcome = solver.solve(
            &model,
            FixedTourSeed::from_indices([0, 1, 2, 3]),
            SolutionLimitMonitor::new(0),
        );

        assert_eq!(
            outcome.termination_reason(),
            &BnbTerminationReason::Aborted("Solution limit reached".to_string())
        );
        assert_eq!(outcome.cost(), Some(39));
    }

    /// A store that knows a bound but not the tour behind it.
    struct BoundOnlyStore(IntegerType);

    impl IncumbentStore<IntegerType> for BoundOnlyStore {
        fn tighten(&self, current_local_best: IntegerType) -> IntegerType {
            self.0.min(current_local_best)
        }

        fn on_solution_found(&self, _: &Tour<IntegerType>) {}

        fn snapshot(&self) -> Option<Tour<IntegerType>> {
            None
        }
    }

    #[test]
    fn test_foreign_bound_without_tour_is_not_reported_optimal() {
        let model = four_city();
        let mut solver = BnbSolver::new();

        let outcome = solver.solve_internal(
            &model,
            FixedTourSeed::from_indices([0, 1, 2, 3]),
            NoOperationMonitor::new(),
            BoundOnlyStore(35),
        );

        assert_eq!(
            outcome.termination_reason(),
            &BnbTerminationReason::OptimalityProven
        );
        assert!(!outcome.is_optimal());
        assert_eq!(outcome.cost(), Some(39));
    }

    #[test]
    fn test_solver_is_reusable() {
        let model = four_city();
        let config = BnbConfig::builder()
            .priority_policy(PriorityPolicy::BestFirst)
            .build();
        let mut solver = BnbSolver::with_config(config);

        let first = solver.solve(
            &model,
            FixedTourSeed::from_indices([0, 1, 2, 3]),
            NoOperationMonitor::new(),
        );
        let second = solver.solve(
            &model,
            FixedTourSeed::from_indices([0, 1, 2, 3]),
            NoOperationMonitor::new(),
        );

        assert_eq!(first.cost(), second.cost());
        assert_eq!(
            first.statistics().states_created,
            second.statistics().states_created
        );
        assert_eq!(format!("{}", solver.config().priority_policy()), "BestFirst");
    }
}
