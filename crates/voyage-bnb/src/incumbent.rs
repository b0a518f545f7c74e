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

//! Incumbent management for branch-and-bound
//!
//! Declares `IncumbentStore<T>`, a minimal interface to read the best known
//! objective published by other searches and to publish new tours. This
//! abstracts over local (single-threaded) and shared (multi-solver) use.
//!
//! Implementations
//! - `NoSharedIncumbent<T>`: local only. `tighten(x) = x`,
//!   `on_solution_found` is a no-op and there is never a snapshot.
//! - `SharedIncumbentAdapter<'a, T>`: wraps `voyage_search::incumbent::SharedIncumbent<T>`;
//!   `tighten(x)` returns `min(shared, x)`, and `on_solution_found` attempts
//!   installation.
//!
//! During the search a bound tightened from the shared store only prunes.
//! The shared tour is read back once, when an exhausted frontier proves it
//! optimal.

use std::marker::PhantomData;
use voyage_model::tour::Tour;
use voyage_search::{incumbent::SharedIncumbent, num::SolverNumeric};

/// Access to the best objective known outside of the running search.
pub trait IncumbentStore<T>
where
    T: SolverNumeric,
{
    /// Returns the tighter of the store's bound and `current_local_best`.
    fn tighten(&self, current_local_best: T) -> T;
    /// Notifies the store that the search installed a new incumbent.
    fn on_solution_found(&self, tour: &Tour<T>);
    /// Returns the tour behind the store's bound, if the store holds one.
    fn snapshot(&self) -> Option<Tour<T>>;
}

/// An `IncumbentStore` that shares nothing. Use this for single-threaded
/// or isolated solving.
#[repr(transparent)]
#[derive(Debug, Clone, Copy)]
pub struct NoSharedIncumbent<T>(PhantomData<T>);

impl<T> Default for NoSharedIncumbent<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NoSharedIncumbent<T> {
    /// Creates a new `NoSharedIncumbent` instance.
    #[inline(always)]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> IncumbentStore<T> for NoSharedIncumbent<T>
where
    T: SolverNumeric,
{
    #[inline(always)]
    fn tighten(&self, current_local_best: T) -> T {
        current_local_best
    }

    #[inline(always)]
    fn on_solution_found(&self, _: &Tour<T>) {}

    #[inline(always)]
    fn snapshot(&self) -> Option<Tour<T>> {
        None
    }
}

/// An `IncumbentStore` backed by a `SharedIncumbent`.
#[repr(transparent)]
#[derive(Debug, Clone, Copy)]
pub struct SharedIncumbentAdapter<'a, T> {
    inner: &'a SharedIncumbent<T>,
}

impl<'a, T> SharedIncumbentAdapter<'a, T> {
    /// Creates a new `SharedIncumbentAdapter` wrapping `inner`.
    #[inline(always)]
    pub fn new(inner: &'a SharedIncumbent<T>) -> Self {
        Self { inner }
    }
}

impl<'a, T> IncumbentStore<T> for SharedIncumbentAdapter<'a, T>
where
    T: SolverNumeric,
{
    #[inline(always)]
    fn tighten(&self, current_local_best: T) -> T {
        // An empty store reports `i64::MAX`, which may not fit in `T`.
        match T::from_i64(self.inner.upper_bound()) {
            Some(shared) => shared.min(current_local_best),
            None => current_local_best,
        }
    }

    #[inline(always)]
    fn on_solution_found(&self, tour: &Tour<T>) {
        self.inner.try_install(tour);
    }

    #[inline]
    fn snapshot(&self) -> Option<Tour<T>> {
        self.inner.snapshot()
    }
}
