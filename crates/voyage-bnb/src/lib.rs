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

//! Voyage-BnB: branch-and-bound for the asymmetric traveling salesperson problem
//!
//! High-level crate that implements an exact, deterministic branch-and-bound
//! solver. Lower bounds come from reduced cost matrices: subtracting the
//! minimum of every row and then every column leaves a matrix with a zero in
//! each row and column, and the subtracted total is a lower bound on the cost
//! of every tour.
//!
//! Core flow
//! - Provide a `voyage_model::model::Model<T>`.
//! - Choose a `voyage_search::seed::SeedGenerator` for the initial tour.
//! - Optionally configure a `config::BnbConfig` and attach monitors.
//! - Run `bnb::BnbSolver`, optionally sharing an incumbent between runs.
//!
//! Assumptions and guarantees
//! - Edge costs are non-negative; unreachable edges are encoded by the model.
//! - Bounds are admissible and never decrease from a parent to its children.
//! - Deterministic for a deterministic seed generator and an unbounded budget.
//!
//! Module map
//! - `bnb`: the solver engine and session orchestration.
//! - `matrix`: cost matrices and their reduction.
//! - `state`: search states and their expansion.
//! - `frontier`: the priority queue of open states.
//! - `config`: run configuration.
//! - `monitor`: tree-search monitors (log, composite, limits).
//! - `result`: solver outcomes with termination reasons.
//! - `stats`: lightweight counters and timing.

pub mod bnb;
pub mod config;
pub mod frontier;
mod incumbent;
pub mod matrix;
pub mod monitor;
pub mod result;
pub mod state;
pub mod stats;
