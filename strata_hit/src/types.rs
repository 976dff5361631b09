// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget rectangles and axis tags.

use core::fmt::{self, Debug};
use core::ops::Add;

use strata_interval::{Interval, IntervalError};

use crate::error::HitTestError;

/// One of the two screen axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
        })
    }
}

/// Axis-aligned widget rectangle with closed edges.
///
/// Fields are public so layout code can fill them directly; they are validated when the
/// rectangle is handed to [`HitTestSystem`](crate::HitTestSystem).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bounds<T> {
    /// Left edge.
    pub min_x: T,
    /// Top edge.
    pub min_y: T,
    /// Right edge.
    pub max_x: T,
    /// Bottom edge.
    pub max_y: T,
}

impl<T: Copy + PartialOrd + Debug> Bounds<T> {
    /// Create bounds from its two corners.
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create bounds from an origin and a size, as layout usually reports them.
    pub fn from_xywh(x: T, y: T, width: T, height: T) -> Self
    where
        T: Add<Output = T>,
    {
        Self::new(x, y, x + width, y + height)
    }

    /// Returns true if `(x, y)` lies inside or on the edge of the rectangle.
    pub fn contains_point(&self, x: T, y: T) -> bool {
        self.min_x <= x && x <= self.max_x && self.min_y <= y && y <= self.max_y
    }

    /// Horizontal extent as an interval owned by `owner`.
    pub fn x_interval<K: Copy>(&self, owner: K) -> Result<Interval<T, K>, IntervalError> {
        Interval::new(self.min_x, self.max_x, owner)
    }

    /// Vertical extent as an interval owned by `owner`.
    pub fn y_interval<K: Copy>(&self, owner: K) -> Result<Interval<T, K>, IntervalError> {
        Interval::new(self.min_y, self.max_y, owner)
    }

    /// Both extents, or the first malformed axis.
    pub(crate) fn intervals<K: Copy>(
        &self,
        owner: K,
    ) -> Result<(Interval<T, K>, Interval<T, K>), HitTestError<K>> {
        let x = self
            .x_interval(owner)
            .map_err(|_| HitTestError::InvalidBounds { axis: Axis::X })?;
        let y = self
            .y_interval(owner)
            .map_err(|_| HitTestError::InvalidBounds { axis: Axis::Y })?;
        Ok((x, y))
    }
}
