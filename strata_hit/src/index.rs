// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two interval trees, one per axis, joined by owner.

use alloc::vec::Vec;
use core::fmt::{self, Debug};
use core::hash::Hash;

use hashbrown::HashSet;
use smallvec::SmallVec;
use strata_interval::{Interval, IntervalError, IntervalKey, IntervalTree};

/// The pair of tree handles that make up one rectangle in a [`DualAxisIndex`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AxisKeys {
    /// Handle into the x-axis tree.
    pub x: IntervalKey,
    /// Handle into the y-axis tree.
    pub y: IntervalKey,
}

/// Answers 2D point containment by intersecting two 1D stabbing queries.
///
/// An axis-aligned rectangle contains `(x, y)` exactly when its x-range contains `x` and its
/// y-range contains `y`, so the two axes can be indexed independently and joined by owner.
/// Both stabbing sets are bounded by the number of rectangles overlapping the point, so the join
/// is a small hash intersection.
///
/// The join matches on owner, so each owner must have at most one rectangle in the index at a
/// time. [`HitTestSystem`](crate::HitTestSystem) maintains that for you.
#[derive(Clone)]
pub struct DualAxisIndex<T, K> {
    x: IntervalTree<T, K>,
    y: IntervalTree<T, K>,
}

impl<T: Copy + PartialOrd + Debug, K: Copy> Debug for DualAxisIndex<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DualAxisIndex")
            .field("x", &self.x)
            .field("y", &self.y)
            .finish()
    }
}

impl<T, K> Default for DualAxisIndex<T, K>
where
    T: Copy + PartialOrd + Debug,
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K> DualAxisIndex<T, K>
where
    T: Copy + PartialOrd + Debug,
    K: Copy + Eq + Hash,
{
    /// Create an empty index.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty index with room for `capacity` rectangles per axis.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: IntervalTree::with_capacity(capacity),
            y: IntervalTree::with_capacity(capacity),
        }
    }

    /// Number of rectangles stored.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns true if no rectangles are stored.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// The x-axis tree.
    pub fn x_tree(&self) -> &IntervalTree<T, K> {
        &self.x
    }

    /// The y-axis tree.
    pub fn y_tree(&self) -> &IntervalTree<T, K> {
        &self.y
    }

    /// Insert a rectangle given as its two extents. Both intervals should carry the same owner.
    pub fn insert(&mut self, x: Interval<T, K>, y: Interval<T, K>) -> AxisKeys {
        debug_assert!(x.owner() == y.owner(), "x and y extents have different owners");
        AxisKeys {
            x: self.x.insert(x),
            y: self.y.insert(y),
        }
    }

    /// Remove both halves of a rectangle.
    ///
    /// Either both nodes are removed or, if either key is stale, neither is and
    /// [`IntervalError::NotFound`] is returned.
    pub fn remove(&mut self, keys: AxisKeys) -> Result<(), IntervalError> {
        if !self.x.contains_key(keys.x) || !self.y.contains_key(keys.y) {
            return Err(IntervalError::NotFound);
        }
        self.x.remove(keys.x)?;
        self.y.remove(keys.y)?;
        Ok(())
    }

    /// Remove every rectangle. Outstanding keys become stale.
    pub fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
    }

    /// Replace the contents with `rects`, building both trees balanced in one pass.
    ///
    /// Returns one [`AxisKeys`] per input rectangle, in input order.
    pub fn bulk_load<I>(&mut self, rects: I) -> Vec<AxisKeys>
    where
        I: IntoIterator<Item = (Interval<T, K>, Interval<T, K>)>,
    {
        let (xs, ys): (Vec<_>, Vec<_>) = rects.into_iter().unzip();
        let xk = self.x.bulk_load(xs);
        let yk = self.y.bulk_load(ys);
        xk.into_iter()
            .zip(yk)
            .map(|(x, y)| AxisKeys { x, y })
            .collect()
    }

    /// Call `f` with the owner of every rectangle containing `(x, y)`. Order is unspecified.
    pub fn visit_point<F: FnMut(K)>(&self, x: T, y: T, mut f: F) {
        let mut xs: SmallVec<[K; 16]> = SmallVec::new();
        self.x.visit_stab(x, |_, iv| xs.push(iv.owner()));
        if xs.is_empty() {
            return;
        }
        let mut ys: SmallVec<[K; 16]> = SmallVec::new();
        self.y.visit_stab(y, |_, iv| ys.push(iv.owner()));
        if ys.is_empty() {
            return;
        }
        // Hash the smaller side, probe with the larger.
        let (build, probe) = if xs.len() <= ys.len() {
            (&xs, &ys)
        } else {
            (&ys, &xs)
        };
        let set: HashSet<K> = build.iter().copied().collect();
        for owner in probe {
            if set.contains(owner) {
                f(*owner);
            }
        }
    }

    /// Owners of every rectangle containing `(x, y)`. Order is unspecified.
    pub fn query_point(&self, x: T, y: T) -> Vec<K> {
        let mut out = Vec::new();
        self.visit_point(x, y, |k| out.push(k));
        out
    }
}
