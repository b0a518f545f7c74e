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

//! # Shared Incumbent (Best Tour Holder)
//!
//! A concurrent container for the best tour discovered so far. It exposes a
//! lock-free upper bound via an atomic and stores the actual `Tour<T>` behind
//! a `Mutex` as the source of truth. Several searches running on different
//! threads can publish improvements through one instance and read each
//! other's bound cheaply.
//!
//! ## Highlights
//!
//! - `try_install(&Tour<T>) -> bool` installs strictly better candidates,
//!   updating both the snapshot and the atomic upper bound.
//! - `snapshot() -> Option<Tour<T>>` returns a clone of the current incumbent.
//! - `upper_bound() -> i64` starts at `i64::MAX`, meaning "no incumbent yet".
//!
//! ## Usage
//!
//! ```rust
//! use voyage_model::{index::LocationIndex, tour::Tour};
//! use voyage_search::incumbent::SharedIncumbent;
//!
//! let inc: SharedIncumbent<i64> = SharedIncumbent::new();
//! let candidate = Tour::new(100, vec![LocationIndex::new(0), LocationIndex::new(1)]);
//!
//! assert!(inc.try_install(&candidate));
//! assert_eq!(inc.upper_bound(), 100);
//! ```

use num_traits::{PrimInt, Signed};
use std::sync::{
    Mutex, MutexGuard, PoisonError,
    atomic::{AtomicI64, Ordering},
};
use voyage_model::tour::Tour;

/// A concurrent holder for the best (incumbent) tour found during search.
///
/// The upper bound is loaded and stored with `Ordering::Relaxed`. It only
/// short-circuits obviously worse candidates; the tour and its objective are
/// synchronized through the `Mutex`.
#[derive(Debug)]
pub struct SharedIncumbent<T> {
    /// Objective of the incumbent tour stored as `i64` for atomic access.
    upper_bound: AtomicI64,

    /// The incumbent tour.
    tour: Mutex<Option<Tour<T>>>,
}

impl<T> Default for SharedIncumbent<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Display for SharedIncumbent<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Incumbent(upper_bound: {})", self.upper_bound())
    }
}

impl<T> SharedIncumbent<T> {
    /// Creates a new shared incumbent with no tour installed.
    #[inline]
    pub fn new() -> Self {
        SharedIncumbent {
            upper_bound: AtomicI64::new(i64::MAX),
            tour: Mutex::new(None),
        }
    }

    /// Returns the current upper bound.
    #[inline]
    pub fn upper_bound(&self) -> i64 {
        self.upper_bound.load(Ordering::Relaxed)
    }

    /// Returns the current upper bound converted to type `T`.
    #[inline]
    pub fn upper_bound_as(&self) -> Result<T, <T as TryFrom<i64>>::Error>
    where
        T: TryFrom<i64>,
    {
        T::try_from(self.upper_bound())
    }

    // A panicking writer cannot leave the slot half-written, so a poisoned
    // lock still holds a consistent tour.
    #[inline]
    fn lock(&self) -> MutexGuard<'_, Option<Tour<T>>> {
        self.tour.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a snapshot of the current incumbent tour, if any.
    #[inline]
    pub fn snapshot(&self) -> Option<Tour<T>>
    where
        T: Clone,
    {
        self.lock().clone()
    }

    /// Attempts to install `candidate` as the new incumbent.
    /// Returns `true` if the candidate was strictly better and got installed.
    pub fn try_install(&self, candidate: &Tour<T>) -> bool
    where
        T: PrimInt + Signed + Into<i64>,
    {
        let candidate_objective: i64 = candidate.objective_value().into();
        if candidate_objective >= self.upper_bound() {
            return false;
        }

        let mut guard = self.lock();
        // The atomic may be stale; the tour under the lock is authoritative.
        if let Some(current) = guard.as_ref() {
            let current_objective: i64 = current.objective_value().into();
            if candidate_objective >= current_objective {
                return false;
            }
        }

        *guard = Some(candidate.clone());
        self.upper_bound
            .store(candidate_objective, Ordering::Relaxed);

        true
    }
}
