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

//! # Seed Generators
//!
//! Strategies that produce a first complete tour before an exact search
//! starts. The seed's cost becomes the initial upper bound, so a good seed
//! lets the search prune more aggressively from the very first expansion.
//!
//! ## Submodules
//!
//! - `random`: Uniformly random permutations until one has finite cost.
//! - `nearest`: Nearest-neighbor construction from every start location.
//! - `fixed`: A caller-supplied tour, validated against the model.

use crate::num::SolverNumeric;
use voyage_model::{model::Model, tour::Tour};

pub mod fixed;
pub mod nearest;
pub mod random;

/// A strategy producing an initial tour for a model.
pub trait SeedGenerator<T>
where
    T: SolverNumeric,
{
    /// Returns the name of the strategy.
    fn name(&self) -> &str;

    /// Produces a complete tour with finite cost, or `None` if the strategy
    /// could not find one. Every returned tour visits each location exactly
    /// once and carries its exact cost as objective value.
    fn generate(&mut self, model: &Model<T>) -> Option<Tour<T>>;
}

impl<T> std::fmt::Debug for dyn SeedGenerator<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SeedGenerator({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn SeedGenerator<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SeedGenerator({})", self.name())
    }
}

impl<T, S> SeedGenerator<T> for &mut S
where
    T: SolverNumeric,
    S: SeedGenerator<T> + ?Sized,
{
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn generate(&mut self, model: &Model<T>) -> Option<Tour<T>> {
        (**self).generate(model)
    }
}

impl<T> SeedGenerator<T> for Box<dyn SeedGenerator<T>>
where
    T: SolverNumeric,
{
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn generate(&mut self, model: &Model<T>) -> Option<Tour<T>> {
        (**self).generate(model)
    }
}
