// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Interval: a balanced, augmented interval tree for one-dimensional stabbing queries.
//!
//! - Store closed intervals `[low, high]` tagged with an owner value.
//! - Remove them again through the [`IntervalKey`] returned on insert.
//! - Ask which stored intervals contain a coordinate ("stabbing" query).
//!
//! The tree is an AVL tree ordered by `low`. Each node caches the maximum `high` of its subtree,
//! so a stabbing query skips every subtree that ends before the query point and every right
//! subtree that starts after it. Insert and remove are `O(log n)`. A stab touches
//! `O(log n + k)` nodes in practice, where `k` is the number of matches.
//!
//! The tree rebalances on every structural change, so it keeps its shape under the kind of
//! continuous remove+insert churn a UI produces when it re-lays out every frame.
//! For whole-frame reloads, [`IntervalTree::bulk_load`] builds a perfectly balanced tree in one
//! pass.
//!
//! It is generic over the coordinate scalar `T` (anything `Copy + PartialOrd + Debug`, such as
//! `f32`, `f64`, or `i64`) and does not depend on any geometry crate.
//!
//! # Example
//!
//! ```rust
//! use strata_interval::{Interval, IntervalTree};
//!
//! let mut tree: IntervalTree<f64, u32> = IntervalTree::new();
//! let a = tree.insert(Interval::new(0.0, 100.0, 1).unwrap());
//! let _b = tree.insert(Interval::new(50.0, 150.0, 2).unwrap());
//!
//! let mut owners: Vec<u32> = tree.stab(60.0).iter().map(|iv| iv.owner()).collect();
//! owners.sort();
//! assert_eq!(owners, [1, 2]);
//!
//! tree.remove(a).unwrap();
//! assert!(tree.remove(a).is_err());
//! assert_eq!(tree.stab(10.0).len(), 0);
//! ```
//!
//! ### Float semantics
//!
//! Intervals whose bounds do not satisfy `low <= high` are rejected, and that includes NaN bounds.
//! A NaN query point matches nothing.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod tree;
mod types;

pub use error::IntervalError;
pub use tree::{IntervalTree, Iter};
pub use types::{Interval, IntervalKey};
