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

//! Reduced cost matrices.
//!
//! `CostMatrix` is the dense N×N working copy each search state owns. The
//! bounding function is the classic reduction: subtract every row's minimum
//! finite entry from that row, then every column's minimum from that column,
//! and add all subtracted amounts to the lower bound. Rows are always fully
//! reduced before any column is touched.
//!
//! A fully unreachable row or column has no minimum and is left unchanged. A
//! row or column whose minimum is already zero contributes nothing.
//!
//! Masking an entry sets it to the unreachable sentinel. Once an entry is
//! unreachable it never becomes finite again; subtraction leaves it alone.

use num_traits::{PrimInt, Signed};
use voyage_model::{cost::EdgeCost, index::LocationIndex, model::Model};

/// A dense, row-major matrix of edge costs used for bounding.
#[derive(Clone, PartialEq, Eq)]
pub struct CostMatrix<T> {
    costs: Vec<EdgeCost<T>>, // len = n * n
    n: usize,
}

impl<T> CostMatrix<T>
where
    T: PrimInt + Signed,
{
    /// Creates an unreduced copy of the model's cost table.
    #[inline]
    pub fn from_model(model: &Model<T>) -> Self {
        Self {
            costs: model.costs().to_vec(),
            n: model.num_locations(),
        }
    }

    /// Creates a matrix from a flattened row-major table.
    ///
    /// # Panics
    ///
    /// This function will panic if `costs.len() != n * n`.
    pub fn from_costs(n: usize, costs: Vec<EdgeCost<T>>) -> Self {
        assert_eq!(
            costs.len(),
            n * n,
            "called `CostMatrix::from_costs` with a table of {} entries for {} locations",
            costs.len(),
            n
        );

        Self { costs, n }
    }

    /// Returns the number of locations.
    #[inline]
    pub fn num_locations(&self) -> usize {
        self.n
    }

    #[inline(always)]
    fn flat(&self, from: usize, to: usize) -> usize {
        debug_assert!(
            from < self.n && to < self.n,
            "called `CostMatrix::flat` with index out of bounds: the len is {} but the indices are ({}, {})",
            self.n,
            from,
            to
        );

        from * self.n + to
    }

    /// Returns the entry for the edge `from -> to`.
    #[inline]
    pub fn get(&self, from: LocationIndex, to: LocationIndex) -> EdgeCost<T> {
        self.costs[self.flat(from.get(), to.get())]
    }

    /// Returns all entries of the row `from`.
    #[inline]
    pub fn row(&self, from: LocationIndex) -> &[EdgeCost<T>] {
        let start = from.get() * self.n;
        &self.costs[start..start + self.n]
    }

    /// Returns the smallest finite entry of row `from`, or `None` if the row
    /// is fully unreachable.
    #[inline]
    pub fn row_min(&self, from: LocationIndex) -> Option<T> {
        self.row(from)
            .iter()
            .copied()
            .min()
            .and_then(|c| c.into_option())
    }

    /// Returns the smallest finite entry of column `to`, or `None` if the
    /// column is fully unreachable.
    #[inline]
    pub fn column_min(&self, to: LocationIndex) -> Option<T> {
        (0..self.n)
            .map(|from| self.costs[self.flat(from, to.get())])
            .min()
            .and_then(|c| c.into_option())
    }

    /// Sets the entry for `from -> to` to unreachable.
    #[inline]
    pub fn mask(&mut self, from: LocationIndex, to: LocationIndex) {
        let index = self.flat(from.get(), to.get());
        self.costs[index] = EdgeCost::unreachable();
    }

    /// Sets every entry of row `from` to unreachable.
    #[inline]
    pub fn mask_row(&mut self, from: LocationIndex) {
        let start = from.get() * self.n;
        self.costs[start..start + self.n].fill(EdgeCost::unreachable());
    }

    /// Sets every entry of column `to` to unreachable.
    #[inline]
    pub fn mask_column(&mut self, to: LocationIndex) {
        for from in 0..self.n {
            let index = self.flat(from, to.get());
            self.costs[index] = EdgeCost::unreachable();
        }
    }

    /// Reduces every row by its minimum finite entry and returns the total
    /// amount subtracted.
    pub fn reduce_rows(&mut self) -> T {
        let mut total = T::zero();
        for from in 0..self.n {
            let from = LocationIndex::new(from);
            let Some(min) = self.row_min(from) else {
                continue;
            };
            if min.is_zero() {
                continue;
            }

            let start = from.get() * self.n;
            for cost in &mut self.costs[start..start + self.n] {
                *cost = cost.reduced_by(min);
            }
            total = total.saturating_add(min);
        }
        total
    }

    /// Reduces every column by its minimum finite entry and returns the total
    /// amount subtracted.
    pub fn reduce_columns(&mut self) -> T {
        let mut total = T::zero();
        for to in 0..self.n {
            let Some(min) = self.column_min(LocationIndex::new(to)) else {
                continue;
            };
            if min.is_zero() {
                continue;
            }

            for from in 0..self.n {
                let index = self.flat(from, to);
                self.costs[index] = self.costs[index].reduced_by(min);
            }
            total = total.saturating_add(min);
        }
        total
    }

    /// Reduces rows, then columns, and returns the total amount subtracted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use voyage_bnb::matrix::CostMatrix;
    /// # use voyage_model::model::ModelBuilder;
    ///
    /// let model = ModelBuilder::<i64>::from_rows(&[
    ///     vec![None, Some(3), Some(5)],
    ///     vec![Some(4), None, Some(8)],
    ///     vec![Some(6), Some(9), None],
    /// ])
    /// .build();
    ///
    /// let mut matrix = CostMatrix::from_model(&model);
    /// // Rows subtract 3, 4 and 6. Column 2 then still has minimum 2.
    /// assert_eq!(matrix.reduce(), 3 + 4 + 6 + 2);
    /// assert!(matrix.is_fully_reduced());
    /// assert_eq!(matrix.reduce(), 0);
    /// ```
    #[inline]
    pub fn reduce(&mut self) -> T {
        let rows = self.reduce_rows();
        let columns = self.reduce_columns();
        rows.saturating_add(columns)
    }

    /// Returns `true` if every row and every column either contains a zero
    /// or is fully unreachable.
    pub fn is_fully_reduced(&self) -> bool {
        let rows_ok = (0..self.n)
            .map(LocationIndex::new)
            .all(|i| self.row_min(i).is_none_or(|m| m.is_zero()));
        let columns_ok = (0..self.n)
            .map(LocationIndex::new)
            .all(|j| self.column_min(j).is_none_or(|m| m.is_zero()));
        rows_ok && columns_ok
    }
}

impl<T> std::fmt::Debug for CostMatrix<T>
where
    T: PrimInt + Signed + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CostMatrix")
            .field("n", &self.n)
            .field("costs", &self.costs)
            .finish()
    }
}

impl<T> std::fmt::Display for CostMatrix<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for from in 0..self.n {
            let row = self.row(LocationIndex::new(from));
            for (to, cost) in row.iter().enumerate() {
                if to > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>5}", cost.to_string())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
