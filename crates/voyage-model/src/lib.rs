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

//! # Voyage Model
//!
//! **The Core Domain Model for the Voyage Traveling Salesperson Solver.**
//!
//! This crate defines the data structures used to represent an asymmetric
//! traveling salesperson instance and its solutions. It is the data
//! interchange layer between instance input and the solving engine
//! (`voyage_bnb`).
//!
//! ## Architecture
//!
//! * **`index`**: Strongly typed `LocationIndex` wrapper.
//! * **`cost`**: `EdgeCost`, a sentinel-encoded optional edge cost.
//! * **`model`**: The immutable `Model` and its mutable `ModelBuilder`.
//! * **`tour`**: A complete round trip with its objective value.
//! * **`loading`**: A whitespace-delimited text loader.
//! * **`generate`**: Random instance generation for tests and benchmarks.
//!
//! ## Design Philosophy
//!
//! 1.  **Type Safety**: Locations are typed indices, never bare integers.
//! 2.  **Memory Layout**: Costs are stored in a single flattened row-major vector.
//! 3.  **Fail-Fast**: Builders validate inputs eagerly so the solver never sees a negative cost.

pub mod cost;
pub mod generate;
pub mod index;
pub mod loading;
pub mod model;
pub mod tour;
