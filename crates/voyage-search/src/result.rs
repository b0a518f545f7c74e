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

use num_traits::{PrimInt, Signed};
use voyage_model::tour::Tour;

/// The answer a solver gives for an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult<T> {
    /// No tour with finite cost exists, or none could be found to start from.
    Infeasible,
    /// We have found a tour and proven its optimality.
    Optimal(Tour<T>),
    /// We have found a tour, but not proven its optimality.
    Feasible(Tour<T>),
}

impl<T> SolverResult<T> {
    /// Returns the tour carried by this result, if any.
    #[inline]
    pub fn tour(&self) -> Option<&Tour<T>> {
        match self {
            SolverResult::Optimal(tour) | SolverResult::Feasible(tour) => Some(tour),
            SolverResult::Infeasible => None,
        }
    }

    /// Consumes the result and returns its tour, if any.
    #[inline]
    pub fn into_tour(self) -> Option<Tour<T>> {
        match self {
            SolverResult::Optimal(tour) | SolverResult::Feasible(tour) => Some(tour),
            SolverResult::Infeasible => None,
        }
    }
}

impl<T> std::fmt::Display for SolverResult<T>
where
    T: PrimInt + Signed + Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Infeasible => write!(f, "Infeasible"),
            SolverResult::Optimal(tour) => {
                write!(f, "Optimal(objective={})", tour.objective_value())
            }
            SolverResult::Feasible(tour) => {
                write!(f, "Feasible(objective={})", tour.objective_value())
            }
        }
    }
}
