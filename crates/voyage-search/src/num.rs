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

//! # Solver Numeric Trait
//!
//! Unified numeric bounds for search and solver components. `SolverNumeric`
//! collects the integer capabilities the solvers rely on into a single alias,
//! which keeps generic signatures short and overflow handling consistent.
//!
//! ## Highlights
//!
//! - Requires `PrimInt + Signed + FromPrimitive` for numeric fundamentals.
//!   `PrimInt` brings saturating addition, which every bound computation uses
//!   so that the unreachable sentinel absorbs additions instead of overflowing.
//! - Enforces `Into<i64>` so objectives can be published through the shared
//!   incumbent's atomic upper bound and widened for exact priority comparisons.
//! - Send + Sync for concurrent solver execution.
//!
//! The alias is satisfied by `i8`, `i16`, `i32` and `i64`. `i128` and `isize`
//! are excluded because they do not convert losslessly into `i64`.

use num_traits::{FromPrimitive, PrimInt, Signed};
use std::hash::Hash;

/// A trait alias for numeric types that can be used in the solver.
pub trait SolverNumeric:
    PrimInt
    + Signed
    + FromPrimitive
    + Into<i64>
    + std::fmt::Debug
    + std::fmt::Display
    + Send
    + Sync
    + Hash
{
}

impl<T> SolverNumeric for T where
    T: PrimInt
        + Signed
        + FromPrimitive
        + Into<i64>
        + std::fmt::Debug
        + std::fmt::Display
        + Send
        + Sync
        + Hash
{
}
