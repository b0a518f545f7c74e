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

use num_traits::PrimInt;

/// The cost of traveling along a directed edge, or the absence of that edge.
///
/// Instead of using `Option<T>`, this type uses a sentinel encoding to avoid
/// the additional discriminant that `Option` typically introduces for integer
/// types. Cost matrices are copied for every search state, so keeping each
/// entry to a single machine word matters.
///
/// Encoding:
/// - Values in `0..T::max_value()` represent a concrete, finite cost.
/// - `T::max_value()` is reserved to indicate an unreachable edge (+∞).
///
/// Because the sentinel is the largest representable value, the derived
/// ordering ranks unreachable edges above every finite cost, and minimum
/// searches over a row or column need no special casing.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeCost<T>(T);

impl<T> EdgeCost<T>
where
    T: PrimInt,
{
    /// Creates an `EdgeCost` from an `Option<T>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use voyage_model::cost::EdgeCost;
    ///
    /// let cost = EdgeCost::from_option(Some(5i64));
    /// assert!(cost.is_reachable());
    /// assert_eq!(cost.raw(), 5);
    ///
    /// let missing: EdgeCost<i64> = EdgeCost::from_option(None);
    /// assert!(missing.is_unreachable());
    /// ```
    #[inline]
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => EdgeCost(v),
            None => Self::unreachable(),
        }
    }

    /// Creates an `EdgeCost` from a raw value without checking for the sentinel.
    /// Passing `T::max_value()` yields an unreachable edge.
    #[inline]
    pub const fn from_raw(value: T) -> Self {
        EdgeCost(value)
    }

    /// Creates a finite `EdgeCost`.
    ///
    /// # Panics
    ///
    /// This function will panic if `value` is negative or equal to the
    /// unreachable sentinel.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use voyage_model::cost::EdgeCost;
    ///
    /// let cost = EdgeCost::some(12i32);
    /// assert_eq!(cost.into_option(), Some(12));
    /// ```
    pub fn some(value: T) -> Self
    where
        T: std::fmt::Display,
    {
        assert!(
            value >= T::zero(),
            "called `EdgeCost::some` with a negative value: {}",
            value
        );
        assert!(
            value < T::max_value(),
            "called `EdgeCost::some` with the unreachable sentinel: {}",
            value
        );

        EdgeCost(value)
    }

    /// Creates an unreachable `EdgeCost`.
    #[inline(always)]
    pub fn unreachable() -> Self {
        EdgeCost(T::max_value())
    }

    /// Returns `true` if the edge does not exist.
    #[inline(always)]
    pub fn is_unreachable(&self) -> bool {
        self.0 == T::max_value()
    }

    /// Returns `true` if the edge has a finite cost.
    #[inline(always)]
    pub fn is_reachable(&self) -> bool {
        !self.is_unreachable()
    }

    /// Returns `true` if the edge has a finite cost of zero.
    #[inline(always)]
    pub fn is_zero(&self) -> bool {
        self.0 == T::zero()
    }

    /// Returns the raw value, including the sentinel if present.
    #[inline(always)]
    pub fn raw(&self) -> T {
        self.0
    }

    /// Converts the `EdgeCost` back into an `Option<T>`.
    #[inline]
    pub fn into_option(&self) -> Option<T> {
        if self.is_unreachable() {
            None
        } else {
            Some(self.0)
        }
    }

    /// Lowers a finite cost by `amount`. Unreachable edges stay unreachable.
    ///
    /// # Panics
    ///
    /// In debug builds, this function will panic if `amount` exceeds the cost,
    /// which would make the edge negative.
    #[inline(always)]
    pub fn reduced_by(self, amount: T) -> Self {
        if self.is_unreachable() {
            return self;
        }

        debug_assert!(
            amount <= self.0,
            "called `EdgeCost::reduced_by` with an amount larger than the cost"
        );

        EdgeCost(self.0 - amount)
    }
}

impl<T> From<Option<T>> for EdgeCost<T>
where
    T: PrimInt,
{
    #[inline]
    fn from(value: Option<T>) -> Self {
        EdgeCost::from_option(value)
    }
}

impl<T> From<EdgeCost<T>> for Option<T>
where
    T: PrimInt,
{
    #[inline]
    fn from(value: EdgeCost<T>) -> Self {
        value.into_option()
    }
}

impl<T> std::fmt::Display for EdgeCost<T>
where
    T: PrimInt + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.into_option() {
            Some(v) => write!(f, "{}", v),
            None => write!(f, "inf"),
        }
    }
}

impl<T> std::fmt::Debug for EdgeCost<T>
where
    T: PrimInt + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.into_option() {
            Some(v) => write!(f, "EdgeCost({:?})", v),
            None => write!(f, "EdgeCost(Unreachable)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_uses_max_value_sentinel() {
        let cost: EdgeCost<i64> = EdgeCost::unreachable();
        assert!(cost.is_unreachable());
        assert_eq!(cost.raw(), i64::MAX);
        assert_eq!(cost.into_option(), None);
    }

    #[test]
    fn test_unreachable_orders_above_every_finite_cost() {
        let unreachable: EdgeCost<i32> = EdgeCost::unreachable();
        assert!(EdgeCost::some(0) < unreachable);
        assert!(EdgeCost::some(i32::MAX - 1) < unreachable);
        assert_eq!(
            [EdgeCost::some(4), unreachable, EdgeCost::some(2)]
                .into_iter()
                .min(),
            Some(EdgeCost::some(2))
        );
    }

    #[test]
    fn test_reduced_by_keeps_unreachable_edges() {
        let unreachable: EdgeCost<i64> = EdgeCost::unreachable();
        assert!(unreachable.reduced_by(10).is_unreachable());
        assert_eq!(EdgeCost::some(10i64).reduced_by(4).raw(), 6);
        assert!(EdgeCost::some(3i64).reduced_by(3).is_zero());
    }

    #[test]
    #[should_panic(expected = "called `EdgeCost::some` with a negative value")]
    fn test_some_rejects_negative_costs() {
        let _ = EdgeCost::some(-1i64);
    }

    #[test]
    #[should_panic(expected = "called `EdgeCost::some` with the unreachable sentinel")]
    fn test_some_rejects_the_sentinel() {
        let _ = EdgeCost::some(i64::MAX);
    }

    #[test]
    fn test_display_prints_inf_for_missing_edges() {
        assert_eq!(format!("{}", EdgeCost::some(7i64)), "7");
        assert_eq!(format!("{}", EdgeCost::<i64>::unreachable()), "inf");
        assert_eq!(
            format!("{:?}", EdgeCost::<i64>::unreachable()),
            "EdgeCost(Unreachable)"
        );
    }

    #[test]
    fn test_option_conversions() {
        let a: EdgeCost<i16> = Some(9).into();
        assert_eq!(Option::<i16>::from(a), Some(9));
        let b: EdgeCost<i16> = None.into();
        assert_eq!(Option::<i16>::from(b), None);
    }
}
