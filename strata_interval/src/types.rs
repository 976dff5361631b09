// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types: intervals and the handles that refer to stored intervals.

use core::cmp::Ordering;
use core::fmt::Debug;

use crate::error::IntervalError;

/// A closed range `[low, high]` on one axis, tagged with the value that owns it.
///
/// Construction validates `low <= high`, so every `Interval` in circulation is well formed.
/// Zero-width intervals (`low == high`) are allowed and contain exactly one coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Interval<T, K> {
    low: T,
    high: T,
    owner: K,
}

impl<T: Copy + PartialOrd + Debug, K: Copy> Interval<T, K> {
    /// Create an interval, rejecting `low > high` and NaN bounds.
    ///
    /// Malformed bounds are never repaired by swapping.
    ///
    /// ```
    /// use strata_interval::{Interval, IntervalError};
    ///
    /// assert!(Interval::new(1.0, 2.0, ()).is_ok());
    /// assert_eq!(Interval::new(2.0, 1.0, ()), Err(IntervalError::InvalidBounds));
    /// assert_eq!(Interval::new(f64::NAN, 1.0, ()), Err(IntervalError::InvalidBounds));
    /// ```
    pub fn new(low: T, high: T, owner: K) -> Result<Self, IntervalError> {
        match low.partial_cmp(&high) {
            Some(Ordering::Less | Ordering::Equal) => Ok(Self { low, high, owner }),
            _ => Err(IntervalError::InvalidBounds),
        }
    }

    /// Lower bound (inclusive).
    #[inline]
    pub fn low(&self) -> T {
        self.low
    }

    /// Upper bound (inclusive).
    #[inline]
    pub fn high(&self) -> T {
        self.high
    }

    /// The owner tag this interval was created with.
    #[inline]
    pub fn owner(&self) -> K {
        self.owner
    }

    /// Returns true if `low <= point <= high`.
    #[inline]
    pub fn contains(&self, point: T) -> bool {
        self.low <= point && point <= self.high
    }
}

/// Handle to an interval stored in an [`IntervalTree`](crate::IntervalTree).
///
/// A key is a slot index plus a generation counter.
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any key that pointed at it is now stale.
/// - When a freed slot is reused its generation is incremented, producing a new, distinct key.
///
/// Stale keys therefore never alias a different live interval. Behavior on generation overflow
/// is unspecified; `u32` is ample for practical lifetimes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct IntervalKey(pub(crate) u32, pub(crate) u32);

impl IntervalKey {
    pub(crate) const fn new(slot: u32, generation: u32) -> Self {
        Self(slot, generation)
    }

    pub(crate) const fn slot(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_interval_contains_only_its_point() {
        let iv = Interval::new(5_i64, 5, 'a').unwrap();
        assert!(iv.contains(5));
        assert!(!iv.contains(4));
        assert!(!iv.contains(6));
    }

    #[test]
    fn endpoints_are_inclusive() {
        let iv = Interval::new(0.0_f32, 10.0, 0_u8).unwrap();
        assert!(iv.contains(0.0));
        assert!(iv.contains(10.0));
        assert!(!iv.contains(10.001));
        assert!(!iv.contains(f32::NAN));
    }

    #[test]
    fn inverted_bounds_are_rejected_not_swapped() {
        assert_eq!(
            Interval::new(3, 1, ()).unwrap_err(),
            IntervalError::InvalidBounds
        );
        assert_eq!(
            Interval::new(0.0, f64::NAN, ()).unwrap_err(),
            IntervalError::InvalidBounds
        );
    }
}
