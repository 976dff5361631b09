// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kurbo conversions.
//!
//! ## Feature
//!
//! Enable with `kurbo`.
//!
//! A [`Rect`] converts to [`Bounds`] edge for edge. Rectangles with negative width or height are
//! passed through unchanged and rejected on insert; call [`Rect::abs`] first if your layout
//! can produce them.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use kurbo::{Point, Rect};

use crate::system::HitTestSystem;
use crate::types::Bounds;

impl From<Rect> for Bounds<f64> {
    fn from(r: Rect) -> Self {
        Self::new(r.x0, r.y0, r.x1, r.y1)
    }
}

impl From<Bounds<f64>> for Rect {
    fn from(b: Bounds<f64>) -> Self {
        Self::new(b.min_x, b.min_y, b.max_x, b.max_y)
    }
}

impl<K, Z> HitTestSystem<K, f64, Z>
where
    K: Copy + Eq + Hash + Debug,
    Z: Copy + Ord + Debug,
{
    /// [`widget_at`](Self::widget_at) for a Kurbo point.
    pub fn widget_at_point(&self, pt: Point) -> Option<K> {
        self.widget_at(pt.x, pt.y)
    }

    /// [`find_widgets_at`](Self::find_widgets_at) for a Kurbo point.
    pub fn find_widgets_at_point(&self, pt: Point) -> Vec<K> {
        self.find_widgets_at(pt.x, pt.y)
    }
}
