// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned by hit-test mutations.

use core::fmt::Debug;

use thiserror::Error;

use crate::types::Axis;

/// Error returned by [`HitTestSystem`](crate::HitTestSystem) mutations.
///
/// Every error is local to the call that produced it: the system is left exactly as it was
/// before the call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum HitTestError<K> {
    /// A rectangle's minimum exceeds its maximum (or is NaN) on `axis`.
    ///
    /// Bounds are never repaired by swapping.
    #[error("widget bounds are inverted or NaN on the {axis} axis")]
    InvalidBounds {
        /// The offending axis. `X` is reported first when both are malformed.
        axis: Axis,
    },
    /// The widget has no live entry.
    ///
    /// This usually means the caller's mount bookkeeping raced with frame timing;
    /// treat it as a no-op worth a warning rather than a crash.
    #[error("no widget is registered as {0:?}")]
    NotFound(K),
}

impl<K> HitTestError<K> {
    /// Returns true for [`HitTestError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
