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

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use voyage_bnb::{
    bnb::BnbSolver,
    config::BnbConfig,
    frontier::PriorityPolicy,
    monitor::{
        composite::CompositeTreeSearchMonitor, log::LogTreeSearchMonitor,
        no_op::NoOperationMonitor, solution::SolutionLimitMonitor,
    },
    result::BnbTerminationReason,
};
use voyage_model::{
    generate::InstanceGenerator,
    index::LocationIndex,
    loading::ProblemLoader,
    model::{Model, ModelBuilder},
    tour::Tour,
};
use voyage_search::{
    incumbent::SharedIncumbent,
    result::SolverResult,
    seed::{
        SeedGenerator, fixed::FixedTourSeed, nearest::NearestNeighborSeed,
        random::RandomTourSeed,
    },
};

const FOUR_CITIES: &str = "\
# A B C D
4
-  10 15 20
5  -  9  10
6  13 -  12
8  8  9  -
";

fn li(i: usize) -> LocationIndex {
    LocationIndex::new(i)
}

fn four_city() -> Model<i64> {
    ProblemLoader::new()
        .from_str(FOUR_CITIES)
        .expect("four city instance should load")
}

#[test]
fn test_four_city_optimum_from_worse_seed() {
    let model = four_city();
    let mut solver = BnbSolver::new();

    let outcome = solver.solve(
        &model,
        FixedTourSeed::from_indices([0, 1, 2, 3]),
        NoOperationMonitor::new(),
    );

    assert_eq!(
        outcome.termination_reason(),
        &BnbTerminationReason::OptimalityProven
    );
    assert!(matches!(outcome.result(), SolverResult::Optimal(_)));
    assert_eq!(outcome.cost(), Some(35));
    assert_eq!(outcome.tour(), &[li(0), li(1), li(3), li(2)]);

    let stats = outcome.statistics();
    assert!(stats.states_created >= 5);
    assert!(stats.solutions_found >= 1);
    assert!(stats.max_queue_size >= 1);
    assert!(stats.states_pruned >= stats.prunings_infeasible);
    assert!(outcome.elapsed() >= Duration::ZERO);
}

#[test]
fn test_four_city_with_random_seed() {
    let model = four_city();
    let mut solver = BnbSolver::new();
    let seed = RandomTourSeed::new(ChaCha8Rng::seed_from_u64(11));

    let outcome = solver.solve(&model, seed, NoOperationMonitor::new());

    assert!(outcome.is_optimal());
    assert_eq!(outcome.cost(), Some(35));
}

#[test]
fn test_infeasible_instance_has_no_tour() {
    let model = ModelBuilder::<i64>::new(3).build();
    let mut solver = BnbSolver::new();
    let seed = RandomTourSeed::new(ChaCha8Rng::seed_from_u64(3)).with_max_attempts(100);

    let outcome = solver.solve(&model, seed, NoOperationMonitor::new());

    assert!(outcome.is_infeasible());
    assert_eq!(
        outcome.termination_reason(),
        &BnbTerminationReason::InfeasibilityProven
    );
    assert_eq!(outcome.cost(), None);
    assert!(outcome.tour().is_empty());
    assert_eq!(outcome.statistics().states_created, 0);
    assert_eq!(outcome.statistics().solutions_found, 0);
}

#[test]
fn test_infeasible_instance_with_greedy_seed() {
    let model = ModelBuilder::<i64>::new(3).build();
    let outcome = BnbSolver::new().solve(&model, NearestNeighborSeed::new(), NoOperationMonitor::new());

    assert_eq!(outcome.cost(), None);
    assert!(outcome.tour().is_empty());
}

#[test]
fn test_zero_budget_keeps_seed_unchanged() {
    let mut rng = ChaCha8Rng::seed_from_u64(20);
    let model = InstanceGenerator::<i64>::new(1, 100).generate(20, &mut rng);

    let expected = RandomTourSeed::new(ChaCha8Rng::seed_from_u64(5))
        .generate(&model)
        .expect("complete instance has a tour");

    let config = BnbConfig::builder().time_limit(Duration::ZERO).build();
    let mut solver = BnbSolver::with_config(config);
    let outcome = solver.solve(
        &model,
        RandomTourSeed::new(ChaCha8Rng::seed_from_u64(5)),
        NoOperationMonitor::new(),
    );

    assert_eq!(
        outcome.termination_reason(),
        &BnbTerminationReason::TimeLimitReached
    );
    assert!(matches!(outcome.result(), SolverResult::Feasible(_)));
    assert_eq!(outcome.cost(), Some(expected.objective_value()));
    assert_eq!(outcome.tour(), expected.order());
    assert_eq!(outcome.statistics().solutions_found, 0);
}

#[test]
fn test_single_location_costs_nothing() {
    let model = ModelBuilder::<i64>::new(1).build();
    let outcome = BnbSolver::new().solve(
        &model,
        FixedTourSeed::from_indices([0]),
        NoOperationMonitor::new(),
    );

    assert!(outcome.is_optimal());
    assert_eq!(outcome.cost(), Some(0));
    assert_eq!(outcome.tour(), &[li(0)]);
}

#[test]
fn test_two_locations() {
    let model = ModelBuilder::<i64>::from_rows(&[vec![None, Some(3)], vec![Some(4), None]]).build();
    let outcome = BnbSolver::new().solve(&model, NearestNeighborSeed::new(), NoOperationMonitor::new());

    assert!(outcome.is_optimal());
    assert_eq!(outcome.cost(), Some(7));
}

#[test]
fn test_best_first_policy_finds_the_same_optimum() {
    let model = four_city();
    let config = BnbConfig::builder()
        .priority_policy(PriorityPolicy::BestFirst)
        .build();

    let outcome = BnbSolver::with_config(config).solve(
        &model,
        FixedTourSeed::from_indices([0, 3, 2, 1]),
        NoOperationMonitor::new(),
    );

    assert!(outcome.is_optimal());
    assert_eq!(outcome.cost(), Some(35));
}

#[test]
fn test_start_location_does_not_change_the_optimum() {
    let model = four_city();
    let config = BnbConfig::builder().start_location(li(2)).build();

    let outcome = BnbSolver::with_config(config).solve(
        &model,
        FixedTourSeed::from_indices([0, 1, 2, 3]),
        NoOperationMonitor::new(),
    );

    assert_eq!(outcome.cost(), Some(35));
    assert_eq!(outcome.tour()[0], li(2));
}

#[test]
fn test_shared_incumbent_receives_improvements() {
    let model = four_city();
    let incumbent = SharedIncumbent::<i64>::new();

    let outcome = BnbSolver::new().solve_with_incumbent(
        &model,
        FixedTourSeed::from_indices([0, 1, 2, 3]),
        NoOperationMonitor::new(),
        &incumbent,
    );

    assert_eq!(outcome.cost(), Some(35));
    assert_eq!(incumbent.upper_bound(), 35);
    let snapshot = incumbent.snapshot().expect("incumbent installed");
    assert_eq!(snapshot.order(), &[li(0), li(1), li(3), li(2)]);
}

#[test]
fn test_shared_incumbent_bound_prunes_the_root() {
    let model = four_city();
    let incumbent = SharedIncumbent::<i64>::new();
    let mut optimal = FixedTourSeed::from_indices([0, 1, 3, 2]);
    let best = optimal.generate(&model).expect("valid tour");
    assert!(incumbent.try_install(&best));

    let outcome = BnbSolver::new().solve_with_incumbent(
        &model,
        FixedTourSeed::from_indices([0, 1, 2, 3]),
        NoOperationMonitor::new(),
        &incumbent,
    );

    assert_eq!(
        outcome.termination_reason(),
        &BnbTerminationReason::OptimalityProven
    );
    assert_eq!(outcome.statistics().states_created, 1);
    assert_eq!(outcome.statistics().states_pruned, 1);
    assert_eq!(incumbent.upper_bound(), 35);

    // The root was pruned against the shared tour, so that tour is the
    // proven optimum and the seed must not be reported as optimal.
    assert!(outcome.is_optimal());
    assert_eq!(outcome.cost(), Some(35));
    assert_eq!(outcome.tour(), &[li(0), li(1), li(3), li(2)]);
}

/// Sleeps before handing out a fixed tour.
struct SlowSeed {
    inner: FixedTourSeed,
    delay: Duration,
}

impl SeedGenerator<i64> for SlowSeed {
    fn name(&self) -> &str {
        "SlowSeed"
    }

    fn generate(&mut self, model: &Model<i64>) -> Option<Tour<i64>> {
        std::thread::sleep(self.delay);
        self.inner.generate(model)
    }
}

#[test]
fn test_seeding_time_does_not_count_against_the_budget() {
    let model = four_city();
    let config = BnbConfig::builder()
        .time_limit(Duration::from_millis(200))
        .build();
    let seed = SlowSeed {
        inner: FixedTourSeed::from_indices([0, 1, 2, 3]),
        delay: Duration::from_millis(300),
    };

    let outcome = BnbSolver::with_config(config).solve(&model, seed, NoOperationMonitor::new());

    assert_eq!(
        outcome.termination_reason(),
        &BnbTerminationReason::OptimalityProven
    );
    assert_eq!(outcome.cost(), Some(35));
    assert!(outcome.statistics().iterations > 0);
    assert!(outcome.elapsed() >= Duration::from_millis(300));
    assert!(outcome.search_elapsed() < outcome.elapsed());
}

#[test]
#[should_panic(expected = "called `BnbSolver::solve` with start location out of bounds")]
fn test_start_location_out_of_bounds_is_rejected() {
    let model = four_city();
    let config = BnbConfig::builder().start_location(li(4)).build();

    let _ = BnbSolver::with_config(config).solve(
        &model,
        FixedTourSeed::from_indices([0, 1, 2, 3]),
        NoOperationMonitor::new(),
    );
}

#[test]
fn test_composite_monitor_forwards_termination() {
    let model = four_city();
    let mut monitor = CompositeTreeSearchMonitor::<i64>::new();
    monitor.add_monitor(LogTreeSearchMonitor::<i64>::default());
    monitor.add_monitor(SolutionLimitMonitor::new(0));

    let outcome = BnbSolver::new().solve(
        &model,
        FixedTourSeed::from_indices([0, 1, 2, 3]),
        monitor,
    );

    assert_eq!(
        outcome.termination_reason(),
        &BnbTerminationReason::Aborted("Solution limit reached".to_string())
    );
    assert!(matches!(outcome.result(), SolverResult::Feasible(_)));
    assert_eq!(outcome.cost(), Some(39));
    assert_eq!(outcome.statistics().iterations, 0);
    assert_eq!(outcome.statistics().states_created, 1);
}
