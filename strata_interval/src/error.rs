// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Errors reported by [`Interval::new`](crate::Interval::new) and
/// [`IntervalTree::remove`](crate::IntervalTree::remove).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum IntervalError {
    /// The lower bound exceeds the upper bound, or one of them is NaN.
    #[error("interval lower bound exceeds its upper bound")]
    InvalidBounds,
    /// The key no longer refers to a live node.
    #[error("interval key does not refer to a live node")]
    NotFound,
}
