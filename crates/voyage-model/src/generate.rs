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

//! Random instance generation.
//!
//! `InstanceGenerator` draws asymmetric cost tables with uniformly
//! distributed costs. Edges can be dropped with a fixed probability to produce
//! sparse, harder instances. When edges are dropped, the generator can plant a
//! random Hamiltonian cycle first so that at least one tour always exists.
//! Generation is fully determined by the supplied random number generator.

use crate::{
    index::LocationIndex,
    model::{Model, ModelBuilder},
};
use num_traits::{PrimInt, Signed};
use rand::{Rng, distr::uniform::SampleUniform, seq::SliceRandom};

/// A builder-style generator for random instances.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceGenerator<T> {
    min_cost: T,
    max_cost: T,
    drop_probability: f64,
    plant_tour: bool,
    symmetric: bool,
}

impl<T> InstanceGenerator<T>
where
    T: PrimInt + Signed + SampleUniform + std::fmt::Display,
{
    /// Creates a generator drawing every cost uniformly from `min_cost..=max_cost`.
    ///
    /// # Panics
    ///
    /// This function will panic if the range is empty, negative, or reaches
    /// the unreachable sentinel.
    pub fn new(min_cost: T, max_cost: T) -> Self {
        assert!(
            min_cost >= T::zero() && min_cost <= max_cost && max_cost < T::max_value(),
            "called `InstanceGenerator::new` with an invalid cost range: {}..={}",
            min_cost,
            max_cost
        );

        Self {
            min_cost,
            max_cost,
            drop_probability: 0.0,
            plant_tour: true,
            symmetric: false,
        }
    }

    /// Sets the probability with which each off-diagonal edge is removed.
    ///
    /// # Panics
    ///
    /// This function will panic if `p` is not within `[0, 1]`.
    #[inline]
    pub fn drop_probability(mut self, p: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&p),
            "called `InstanceGenerator::drop_probability` with a value outside [0, 1]: {}",
            p
        );
        self.drop_probability = p;
        self
    }

    /// Controls whether a random Hamiltonian cycle is kept intact when edges
    /// are dropped. Enabled by default.
    #[inline]
    pub fn plant_tour(mut self, yes: bool) -> Self {
        self.plant_tour = yes;
        self
    }

    /// Mirrors every cost so that `cost(a, b) == cost(b, a)`.
    #[inline]
    pub fn symmetric(mut self, yes: bool) -> Self {
        self.symmetric = yes;
        self
    }

    /// Generates an instance with `num_locations` locations.
    pub fn generate<R>(&self, num_locations: usize, rng: &mut R) -> Model<T>
    where
        R: Rng,
    {
        let mut builder = ModelBuilder::new(num_locations);

        for i in 0..num_locations {
            let first_to = if self.symmetric { i + 1 } else { 0 };
            for j in first_to..num_locations {
                if i == j {
                    continue;
                }

                let keep = self.drop_probability == 0.0 || !rng.random_bool(self.drop_probability);
                if !keep {
                    continue;
                }

                let cost = rng.random_range(self.min_cost..=self.max_cost);
                builder.set_cost(LocationIndex::new(i), LocationIndex::new(j), cost);
                if self.symmetric {
                    builder.set_cost(LocationIndex::new(j), LocationIndex::new(i), cost);
                }
            }
        }

        if self.plant_tour && self.drop_probability > 0.0 && num_locations > 1 {
            let mut order: Vec<usize> = (0..num_locations).collect();
            order.shuffle(rng);

            for k in 0..num_locations {
                let from = LocationIndex::new(order[k]);
                let to = LocationIndex::new(order[(k + 1) % num_locations]);
                let cost = rng.random_range(self.min_cost..=self.max_cost);
                builder.set_cost(from, to, cost);
                if self.symmetric {
                    builder.set_cost(to, from, cost);
                }
            }
        }

        builder.build()
    }
}
