// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning knobs for [`HitTestSystem`](crate::HitTestSystem).

/// How [`HitTestSystem::sync_frame`](crate::HitTestSystem::sync_frame) absorbs a frame's changes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChurnPolicy {
    /// Remove and re-insert only the widgets whose bounds changed.
    #[default]
    Incremental,
    /// Rebuild both trees from scratch when at least `min_changed_percent` percent of the
    /// widgets were inserted, moved or removed this frame; otherwise behave as
    /// [`ChurnPolicy::Incremental`].
    Rebuild {
        /// Threshold in percent of the larger of the previous and the new widget count.
        min_changed_percent: u8,
    },
}

impl ChurnPolicy {
    pub(crate) fn wants_rebuild(self, changed: usize, population: usize) -> bool {
        match self {
            Self::Incremental => false,
            Self::Rebuild {
                min_changed_percent,
            } => {
                population > 0
                    && changed.saturating_mul(100)
                        >= population.saturating_mul(usize::from(min_changed_percent))
            }
        }
    }
}

/// Construction-time configuration for [`HitTestSystem`](crate::HitTestSystem).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct HitTestConfig {
    /// Strategy for whole-frame synchronization.
    pub churn: ChurnPolicy,
    /// Number of widgets to pre-allocate room for.
    pub capacity: usize,
}

impl HitTestConfig {
    /// Set the churn policy.
    #[must_use]
    pub const fn with_churn(mut self, churn: ChurnPolicy) -> Self {
        self.churn = churn;
        self
    }

    /// Set the capacity hint.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}
