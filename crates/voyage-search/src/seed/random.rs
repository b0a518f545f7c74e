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

use crate::{num::SolverNumeric, seed::SeedGenerator};
use rand::{Rng, seq::SliceRandom};
use std::time::{Duration, Instant};
use voyage_model::{index::LocationIndex, model::Model, tour::Tour};

/// Uniformly random permutations until one has a finite closed-tour cost.
///
/// The search is bounded by a wall-clock limit and an optional number of
/// attempts. Before sampling, the generator rejects models in which some
/// location has no finite outgoing or incoming edge, since no permutation
/// can close a tour through it.
#[derive(Debug, Clone)]
pub struct RandomTourSeed<R> {
    rng: R,
    time_limit: Duration,
    max_attempts: Option<u64>,
    attempts: u64,
}

impl<R> RandomTourSeed<R>
where
    R: Rng,
{
    /// The default wall-clock limit for sampling.
    pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(60);

    /// Creates a new generator drawing permutations from `rng`.
    #[inline]
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            time_limit: Self::DEFAULT_TIME_LIMIT,
            max_attempts: None,
            attempts: 0,
        }
    }

    /// Sets the wall-clock limit for sampling.
    #[inline]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Limits the number of permutations drawn per call to `generate`.
    #[inline]
    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Returns the number of permutations drawn by the last call to `generate`.
    #[inline]
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    fn has_isolated_location<T>(model: &Model<T>) -> bool
    where
        T: SolverNumeric,
    {
        model.num_locations() > 1
            && (0..model.num_locations()).map(LocationIndex::new).any(|l| {
                model.outgoing_degree(l) == 0 || model.incoming_degree(l) == 0
            })
    }
}

impl<T, R> SeedGenerator<T> for RandomTourSeed<R>
where
    T: SolverNumeric,
    R: Rng,
{
    fn name(&self) -> &str {
        "RandomTourSeed"
    }

    fn generate(&mut self, model: &Model<T>) -> Option<Tour<T>> {
        self.attempts = 0;

        if model.num_locations() == 0 {
            return None;
        }
        if Self::has_isolated_location(model) {
            log::debug!("random seed rejected the model: some location has no finite edge");
            return None;
        }

        let start = Instant::now();
        let mut order: Vec<LocationIndex> =
            (0..model.num_locations()).map(LocationIndex::new).collect();

        while start.elapsed() < self.time_limit
            && self.max_attempts.is_none_or(|max| self.attempts < max)
        {
            order.shuffle(&mut self.rng);
            self.attempts += 1;

            if let Some(cost) = model.tour_cost(&order) {
                log::debug!(
                    "random seed found a tour of cost {} after {} attempts",
                    cost,
                    self.attempts
                );
                return Some(Tour::new(cost, order));
            }
        }

        log::debug!("random seed gave up after {} attempts", self.attempts);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use voyage_model::{generate::InstanceGenerator, model::ModelBuilder};

    fn li(i: usize) -> LocationIndex {
        LocationIndex::new(i)
    }

    #[test]
    fn test_finds_tour_on_complete_instance() {
        let model = InstanceGenerator::<i64>::new(1, 100)
            .generate(12, &mut ChaCha8Rng::seed_from_u64(1));
        let mut seed = RandomTourSeed::new(ChaCha8Rng::seed_from_u64(2));

        let tour = seed.generate(&model).expect("complete instance has a tour");
        assert!(model.is_permutation(tour.order()));
        assert_eq!(model.tour_cost(tour.order()), Some(tour.objective_value()));
        assert_eq!(seed.attempts(), 1);
    }

    #[test]
    fn test_quick_reject_on_isolated_location() {
        let mut builder = ModelBuilder::<i64>::new(3);
        builder.set_cost(li(0), li(1), 1).set_cost(li(1), li(0), 1);
        let model = builder.build();

        let mut seed = RandomTourSeed::new(ChaCha8Rng::seed_from_u64(2));
        assert!(seed.generate(&model).is_none());
        assert_eq!(seed.attempts(), 0);
    }

    #[test]
    fn test_respects_attempt_limit() {
        // Every location has edges, but the only tours are 0 -> 1 -> 2 -> 3 -> 0
        // and rotations, which is unlikely to appear in very few attempts.
        let mut builder = ModelBuilder::<i64>::new(4);
        builder
            .set_cost(li(0), li(1), 1)
            .set_cost(li(1), li(2), 1)
            .set_cost(li(2), li(3), 1)
            .set_cost(li(3), li(0), 1);
        let model = builder.build();

        let mut seed = RandomTourSeed::new(ChaCha8Rng::seed_from_u64(5)).with_max_attempts(500);
        let tour = seed.generate(&model).expect("500 draws find one of 4 good orders of 24");
        assert_eq!(tour.objective_value(), 4);
        assert!(seed.attempts() <= 500);
    }

    #[test]
    fn test_zero_time_limit_draws_nothing() {
        let model = InstanceGenerator::<i64>::new(1, 9)
            .generate(5, &mut ChaCha8Rng::seed_from_u64(1));
        let mut seed =
            RandomTourSeed::new(ChaCha8Rng::seed_from_u64(2)).with_time_limit(Duration::ZERO);
        assert!(seed.generate(&model).is_none());
        assert_eq!(seed.attempts(), 0);
    }

    #[test]
    fn test_single_location_costs_zero() {
        let model = ModelBuilder::<i64>::new(1).build();
        let mut seed = RandomTourSeed::new(ChaCha8Rng::seed_from_u64(0));
        let tour = seed.generate(&model).expect("tour");
        assert_eq!(tour.objective_value(), 0);
    }
}
