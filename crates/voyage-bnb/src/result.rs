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

use crate::stats::BnbSolverStatistics;
use num_traits::{PrimInt, Signed};
use std::time::Duration;
use voyage_model::{index::LocationIndex, tour::Tour};
use voyage_search::result::SolverResult;

/// Why the branch-and-bound search stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BnbTerminationReason {
    /// The frontier was exhausted; the incumbent is optimal.
    OptimalityProven,
    /// No initial tour could be found, so there was nothing to search against.
    InfeasibilityProven,
    /// The time budget ran out before the frontier was exhausted.
    TimeLimitReached,
    /// A monitor asked the search to stop. The string carries its reason.
    Aborted(String),
}

impl std::fmt::Display for BnbTerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BnbTerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            BnbTerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            BnbTerminationReason::TimeLimitReached => write!(f, "Time Limit Reached"),
            BnbTerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// Result of the solver after termination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BnbSolverOutcome<T> {
    result: SolverResult<T>,
    termination_reason: BnbTerminationReason,
    statistics: BnbSolverStatistics<T>,
}

impl<T> BnbSolverOutcome<T>
where
    T: PrimInt + Signed,
{
    #[inline]
    pub fn optimal(tour: Tour<T>, statistics: BnbSolverStatistics<T>) -> Self {
        Self {
            result: SolverResult::Optimal(tour),
            termination_reason: BnbTerminationReason::OptimalityProven,
            statistics,
        }
    }

    /// The frontier was exhausted against a shared bound whose tour could
    /// not be read back. The local tour is feasible but not proven optimal.
    #[inline]
    pub fn dominated(tour: Tour<T>, statistics: BnbSolverStatistics<T>) -> Self {
        Self {
            result: SolverResult::Feasible(tour),
            termination_reason: BnbTerminationReason::OptimalityProven,
            statistics,
        }
    }

    #[inline]
    pub fn infeasible(statistics: BnbSolverStatistics<T>) -> Self {
        Self {
            result: SolverResult::Infeasible,
            termination_reason: BnbTerminationReason::InfeasibilityProven,
            statistics,
        }
    }

    #[inline]
    pub fn time_limit_reached(tour: Tour<T>, statistics: BnbSolverStatistics<T>) -> Self {
        Self {
            result: SolverResult::Feasible(tour),
            termination_reason: BnbTerminationReason::TimeLimitReached,
            statistics,
        }
    }

    #[inline]
    pub fn aborted<R>(tour: Tour<T>, reason: R, statistics: BnbSolverStatistics<T>) -> Self
    where
        R: Into<String>,
    {
        Self {
            result: SolverResult::Feasible(tour),
            termination_reason: BnbTerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    /// Returns the solver result.
    #[inline]
    pub fn result(&self) -> &SolverResult<T> {
        &self.result
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> &BnbTerminationReason {
        &self.termination_reason
    }

    /// Returns the solver statistics.
    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics<T> {
        &self.statistics
    }

    /// Returns the cost of the best tour, or `None` if there is none.
    #[inline]
    pub fn cost(&self) -> Option<T> {
        self.result.tour().map(|t| t.objective_value())
    }

    /// Returns the best tour's visiting order, or an empty slice if there is none.
    #[inline]
    pub fn tour(&self) -> &[LocationIndex] {
        self.result.tour().map(|t| t.order()).unwrap_or(&[])
    }

    /// Returns the total time spent in the solver.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.statistics.time_total
    }

    /// Returns the time spent in the budgeted search loop.
    #[inline]
    pub fn search_elapsed(&self) -> Duration {
        self.statistics.time_search
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolverResult::Optimal(_))
    }

    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self.result, SolverResult::Infeasible)
    }

    /// Consumes the outcome and returns its parts.
    #[inline]
    pub fn into_parts(self) -> (SolverResult<T>, BnbTerminationReason, BnbSolverStatistics<T>) {
        (self.result, self.termination_reason, self.statistics)
    }
}

impl<T> std::fmt::Display for BnbSolverOutcome<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result:      {}", self.result)?;
        writeln!(f, "Termination: {}", self.termination_reason)?;
        write!(f, "{}", self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type I = i64;

    fn tour() -> Tour<I> {
        Tour::new(35, [0, 1, 3, 2].map(LocationIndex::new).to_vec())
    }

    #[test]
    fn test_infeasible_has_no_cost_and_empty_tour() {
        let outcome = BnbSolverOutcome::<I>::infeasible(BnbSolverStatistics::default());
        assert!(outcome.is_infeasible());
        assert_eq!(outcome.cost(), None);
        assert!(outcome.tour().is_empty());
        assert_eq!(
            outcome.termination_reason(),
            &BnbTerminationReason::InfeasibilityProven
        );
    }

    #[test]
    fn test_optimal_exposes_tour() {
        let outcome = BnbSolverOutcome::optimal(tour(), BnbSolverStatistics::default());
        assert!(outcome.is_optimal());
        assert_eq!(outcome.cost(), Some(35));
        assert_eq!(outcome.tour().len(), 4);
    }

    #[test]
    fn test_time_limit_and_abort_are_feasible() {
        let timed = BnbSolverOutcome::time_limit_reached(tour(), BnbSolverStatistics::default());
        assert!(matches!(timed.result(), SolverResult::Feasible(_)));
        assert_eq!(
            timed.termination_reason(),
            &BnbTerminationReason::TimeLimitReached
        );

        let aborted = BnbSolverOutcome::aborted(tour(), "stop", BnbSolverStatistics::default());
        assert_eq!(
            aborted.termination_reason(),
            &BnbTerminationReason::Aborted("stop".to_string())
        );
        assert!(!aborted.is_optimal());
    }

    #[test]
    fn test_dominated_is_feasible_but_exhausted() {
        let outcome = BnbSolverOutcome::dominated(tour(), BnbSolverStatistics::default());
        assert!(!outcome.is_optimal());
        assert!(matches!(outcome.result(), SolverResult::Feasible(_)));
        assert_eq!(
            outcome.termination_reason(),
            &BnbTerminationReason::OptimalityProven
        );
        assert_eq!(outcome.cost(), Some(35));
    }

    #[test]
    fn test_termination_reason_display() {
        assert_eq!(
            format!("{}", BnbTerminationReason::TimeLimitReached),
            "Time Limit Reached"
        );
        assert_eq!(
            format!("{}", BnbTerminationReason::Aborted("limit".into())),
            "Aborted: limit"
        );
    }
}
