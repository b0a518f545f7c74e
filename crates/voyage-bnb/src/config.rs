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

//! Solver configuration.
//!
//! `BnbConfig` bundles the knobs of a branch-and-bound run: the wall-clock
//! budget, the frontier ordering, and the location every tour starts from.
//! Build one with `BnbConfigBuilder` or take `BnbConfig::default()`.

use crate::frontier::PriorityPolicy;
use std::time::Duration;
use voyage_model::index::LocationIndex;

/// Configuration of a branch-and-bound run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BnbConfig {
    time_limit: Duration,
    priority_policy: PriorityPolicy,
    start_location: LocationIndex,
}

impl BnbConfig {
    /// The default wall-clock budget.
    pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(60);

    /// Returns a builder initialized with the defaults.
    #[inline]
    pub fn builder() -> BnbConfigBuilder {
        BnbConfigBuilder::new()
    }

    /// Returns the wall-clock budget. The search loop checks it once per
    /// iteration, before popping the next state.
    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Returns the frontier ordering.
    #[inline]
    pub fn priority_policy(&self) -> PriorityPolicy {
        self.priority_policy
    }

    /// Returns the location every path starts from.
    #[inline]
    pub fn start_location(&self) -> LocationIndex {
        self.start_location
    }
}

impl Default for BnbConfig {
    fn default() -> Self {
        Self {
            time_limit: Self::DEFAULT_TIME_LIMIT,
            priority_policy: PriorityPolicy::default(),
            start_location: LocationIndex::new(0),
        }
    }
}

impl std::fmt::Display for BnbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BnbConfig(time_limit: {:.2?}, priority_policy: {}, start_location: {})",
            self.time_limit,
            self.priority_policy,
            self.start_location.get()
        )
    }
}

/// Builder for `BnbConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BnbConfigBuilder {
    config: BnbConfig,
}

impl BnbConfigBuilder {
    /// Creates a new `BnbConfigBuilder` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wall-clock budget. A zero budget stops the search before
    /// the first state is popped.
    #[inline]
    pub fn time_limit(mut self, time_limit: Duration) -> Self {
        self.config.time_limit = time_limit;
        self
    }

    /// Sets the frontier ordering.
    #[inline]
    pub fn priority_policy(mut self, policy: PriorityPolicy) -> Self {
        self.config.priority_policy = policy;
        self
    }

    /// Sets the location every path starts from.
    #[inline]
    pub fn start_location(mut self, start: LocationIndex) -> Self {
        self.config.start_location = start;
        self
    }

    /// Builds the `BnbConfig`.
    #[inline]
    pub fn build(self) -> BnbConfig {
        self.config
    }
}
