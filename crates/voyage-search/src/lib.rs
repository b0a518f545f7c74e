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

//! # Voyage Search
//!
//! Shared infrastructure for the Voyage solvers: the numeric bound every
//! solver is generic over, result and command types, a thread-safe incumbent,
//! and the seed generators that provide a first upper bound.
//!
//! ## Modules
//!
//! - `num`: The `SolverNumeric` trait alias.
//! - `result`: `SolverResult`, the answer a solver gives for an instance.
//! - `command`: `SearchCommand`, the control signal observers return.
//! - `incumbent`: `SharedIncumbent`, a best-tour holder safe to share across threads.
//! - `seed`: The `SeedGenerator` trait and its random, greedy and fixed strategies.

pub mod command;
pub mod incumbent;
pub mod num;
pub mod result;
pub mod seed;
