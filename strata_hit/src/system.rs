// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The hit-test facade: widget bookkeeping on top of the dual-axis index.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::{self, Debug};
use core::hash::Hash;

use hashbrown::HashMap;
use strata_interval::Interval;
use tracing::{debug, trace};

use crate::config::HitTestConfig;
use crate::error::HitTestError;
use crate::index::{AxisKeys, DualAxisIndex};
use crate::types::Bounds;

/// Per-widget bookkeeping.
#[derive(Copy, Clone, Debug)]
struct WidgetEntry<T, Z> {
    bounds: Bounds<T>,
    keys: AxisKeys,
    z: Z,
    /// Registration order; only used to break z-order ties.
    seq: u64,
}

/// What [`HitTestSystem::insert_widget`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Registration {
    /// The widget was new and received a fresh sequence number.
    Inserted,
    /// The widget already had an entry; it was updated in place and kept its sequence number.
    Updated,
}

/// Summary of one [`HitTestSystem::sync_frame`] call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FrameReport {
    /// Widgets that were not registered before this frame.
    pub inserted: usize,
    /// Registered widgets whose bounds or z-order changed.
    pub updated: usize,
    /// Registered widgets reported with identical bounds and z-order.
    pub unchanged: usize,
    /// Registered widgets missing from this frame, now unmounted.
    pub removed: usize,
    /// Whether both trees were rebuilt from scratch instead of patched.
    pub rebuilt: bool,
}

/// A frame entry that passed validation.
struct Staged<K, T, Z> {
    id: K,
    bounds: Bounds<T>,
    z: Z,
    x: Interval<T, K>,
    y: Interval<T, K>,
}

/// Point hit testing for on-screen widgets.
///
/// Each widget is an axis-aligned rectangle with a z-order. Queries return every widget under a
/// point, or the single topmost one: highest z-order first and, among equal z-orders, the widget
/// registered last. That matches the overlay convention where a later child paints over its
/// earlier siblings.
///
/// The expected frame shape is a mutation phase (layout pushes bounds with
/// [`insert_widget`](Self::insert_widget), [`update_widget`](Self::update_widget),
/// [`remove_widget`](Self::remove_widget), or all at once with [`sync_frame`](Self::sync_frame))
/// followed by a query phase (input dispatch calls [`widget_at`](Self::widget_at)).
/// The system does not buffer frames. It is not internally synchronized; a multi-threaded host
/// serializes access itself.
///
/// Type parameters: `K` is the widget identifier, `T` the coordinate scalar and `Z` the z-order.
pub struct HitTestSystem<K, T = f64, Z = i32> {
    index: DualAxisIndex<T, K>,
    entries: HashMap<K, WidgetEntry<T, Z>>,
    next_seq: u64,
    config: HitTestConfig,
}

impl<K, T, Z> Debug for HitTestSystem<K, T, Z>
where
    K: Copy + Eq + Hash + Debug,
    T: Copy + PartialOrd + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HitTestSystem")
            .field("widgets", &self.entries.len())
            .field("next_seq", &self.next_seq)
            .field("config", &self.config)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl<K, T, Z> Default for HitTestSystem<K, T, Z>
where
    K: Copy + Eq + Hash + Debug,
    T: Copy + PartialOrd + Debug,
    Z: Copy + Ord + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T, Z> HitTestSystem<K, T, Z>
where
    K: Copy + Eq + Hash + Debug,
    T: Copy + PartialOrd + Debug,
    Z: Copy + Ord + Debug,
{
    /// Create an empty system with the default configuration.
    pub fn new() -> Self {
        Self::with_config(HitTestConfig::default())
    }

    /// Create an empty system.
    pub fn with_config(config: HitTestConfig) -> Self {
        Self {
            index: DualAxisIndex::with_capacity(config.capacity),
            entries: HashMap::with_capacity(config.capacity),
            next_seq: 0,
            config,
        }
    }

    /// The configuration this system was built with.
    pub fn config(&self) -> &HitTestConfig {
        &self.config
    }

    /// The underlying index.
    pub fn index(&self) -> &DualAxisIndex<T, K> {
        &self.index
    }

    /// Number of registered widgets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no widgets are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `id` is registered.
    pub fn contains(&self, id: K) -> bool {
        self.entries.contains_key(&id)
    }

    /// Current bounds of `id`.
    pub fn bounds(&self, id: K) -> Option<Bounds<T>> {
        self.entries.get(&id).map(|e| e.bounds)
    }

    /// Current z-order of `id`.
    pub fn z_order(&self, id: K) -> Option<Z> {
        self.entries.get(&id).map(|e| e.z)
    }

    /// Registration sequence number of `id`; larger means registered later.
    pub fn sequence(&self, id: K) -> Option<u64> {
        self.entries.get(&id).map(|e| e.seq)
    }

    /// Iterate registered widgets as `(id, bounds, z)`, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (K, Bounds<T>, Z)> + '_ {
        self.entries.iter().map(|(id, e)| (*id, e.bounds, e.z))
    }

    /// Register a widget, or update it if `id` is already registered.
    ///
    /// A new widget receives the next sequence number; an existing one keeps its own.
    pub fn insert_widget(
        &mut self,
        id: K,
        bounds: Bounds<T>,
        z: Z,
    ) -> Result<Registration, HitTestError<K>> {
        if self.entries.contains_key(&id) {
            self.update_widget(id, bounds, z)?;
            return Ok(Registration::Updated);
        }
        let (x, y) = bounds.intervals(id)?;
        let keys = self.index.insert(x, y);
        let seq = self.bump_seq();
        self.entries.insert(
            id,
            WidgetEntry {
                bounds,
                keys,
                z,
                seq,
            },
        );
        trace!(?id, seq, "inserted widget");
        Ok(Registration::Inserted)
    }

    /// Move a registered widget and set its z-order.
    ///
    /// The old rectangle stops matching immediately. The sequence number is preserved, so an
    /// update never changes how the widget breaks z-order ties.
    pub fn update_widget(
        &mut self,
        id: K,
        bounds: Bounds<T>,
        z: Z,
    ) -> Result<(), HitTestError<K>> {
        let Some(entry) = self.entries.get_mut(&id) else {
            debug!(?id, "update for unregistered widget");
            return Err(HitTestError::NotFound(id));
        };
        let (x, y) = bounds.intervals(id)?;
        if entry.bounds != bounds {
            let removed = self.index.remove(entry.keys);
            debug_assert!(removed.is_ok(), "index out of sync with widget entries");
            entry.keys = self.index.insert(x, y);
            entry.bounds = bounds;
        }
        entry.z = z;
        trace!(?id, "updated widget");
        Ok(())
    }

    /// Unregister a widget.
    pub fn remove_widget(&mut self, id: K) -> Result<(), HitTestError<K>> {
        let Some(entry) = self.entries.remove(&id) else {
            debug!(?id, "remove for unregistered widget");
            return Err(HitTestError::NotFound(id));
        };
        let removed = self.index.remove(entry.keys);
        debug_assert!(removed.is_ok(), "index out of sync with widget entries");
        trace!(?id, "removed widget");
        Ok(())
    }

    /// Unregister every widget.
    ///
    /// Sequence numbers keep counting up, so widgets registered afterwards still sort above
    /// anything registered before.
    pub fn clear(&mut self) {
        self.index.clear();
        self.entries.clear();
    }

    /// Call `f` with every widget whose rectangle contains `(x, y)`. Order is unspecified.
    pub fn visit_widgets_at<F: FnMut(K)>(&self, x: T, y: T, f: F) {
        self.index.visit_point(x, y, f);
    }

    /// Every widget whose rectangle contains `(x, y)`, in unspecified order.
    pub fn find_widgets_at(&self, x: T, y: T) -> Vec<K> {
        self.index.query_point(x, y)
    }

    /// The topmost widget containing `(x, y)`.
    ///
    /// Highest z-order wins; on equal z-order the widget registered later wins.
    pub fn widget_at(&self, x: T, y: T) -> Option<K> {
        let mut best: Option<(K, Z, u64)> = None;
        self.index.visit_point(x, y, |id| {
            let Some(e) = self.entries.get(&id) else {
                return;
            };
            let above = match best {
                None => true,
                Some((_, z, seq)) => stacking(e.z, e.seq, z, seq) == Ordering::Greater,
            };
            if above {
                best = Some((id, e.z, e.seq));
            }
        });
        best.map(|(id, _, _)| id)
    }

    /// Every widget containing `(x, y)`, topmost first.
    ///
    /// The first element is what [`widget_at`](Self::widget_at) returns; the rest follow in the
    /// order a bubbling dispatch would visit them.
    pub fn hits_at(&self, x: T, y: T) -> Vec<K> {
        let mut hits: Vec<(K, Z, u64)> = Vec::new();
        self.index.visit_point(x, y, |id| {
            if let Some(e) = self.entries.get(&id) {
                hits.push((id, e.z, e.seq));
            }
        });
        hits.sort_unstable_by(|a, b| stacking(b.1, b.2, a.1, a.2));
        hits.into_iter().map(|(id, _, _)| id).collect()
    }

    /// Reconcile the system with one frame's worth of visible widgets.
    ///
    /// Widgets listed in `frame` are inserted or updated, and registered widgets not listed are
    /// removed. New widgets receive sequence numbers in iteration order. If an id appears more
    /// than once, its last occurrence wins.
    ///
    /// The whole frame is validated before anything changes, so an
    /// [`InvalidBounds`](HitTestError::InvalidBounds) error leaves the system untouched.
    /// Depending on [`HitTestConfig::churn`], heavy churn rebuilds both trees instead of patching
    /// them; the result is the same either way.
    pub fn sync_frame<I>(&mut self, frame: I) -> Result<FrameReport, HitTestError<K>>
    where
        I: IntoIterator<Item = (K, Bounds<T>, Z)>,
    {
        let mut staged: Vec<Staged<K, T, Z>> = Vec::new();
        let mut position: HashMap<K, usize> = HashMap::new();
        for (id, bounds, z) in frame {
            let (x, y) = bounds.intervals(id)?;
            let item = Staged {
                id,
                bounds,
                z,
                x,
                y,
            };
            match position.get(&id) {
                Some(&i) => staged[i] = item,
                None => {
                    position.insert(id, staged.len());
                    staged.push(item);
                }
            }
        }

        let stale: Vec<K> = self
            .entries
            .keys()
            .filter(|id| !position.contains_key(*id))
            .copied()
            .collect();
        let moved = staged
            .iter()
            .filter(|s| self.entries.get(&s.id).is_none_or(|e| e.bounds != s.bounds))
            .count();
        let population = self.entries.len().max(staged.len());
        let rebuild = self
            .config
            .churn
            .wants_rebuild(moved + stale.len(), population);

        let mut report = FrameReport {
            removed: stale.len(),
            rebuilt: rebuild,
            ..FrameReport::default()
        };
        if rebuild {
            debug!(
                changed = moved + stale.len(),
                population, "rebuilding hit-test index for frame"
            );
            self.rebuild_with(staged, &mut report);
        } else {
            for id in stale {
                let removed = self.remove_widget(id);
                debug_assert!(removed.is_ok(), "stale id came from the entry map");
            }
            for s in staged {
                self.apply_incremental(s, &mut report);
            }
        }
        trace!(?report, "synchronized frame");
        Ok(report)
    }

    fn apply_incremental(&mut self, s: Staged<K, T, Z>, report: &mut FrameReport) {
        match self.entries.get_mut(&s.id) {
            Some(entry) => {
                if entry.bounds == s.bounds && entry.z == s.z {
                    report.unchanged += 1;
                    return;
                }
                if entry.bounds != s.bounds {
                    let removed = self.index.remove(entry.keys);
                    debug_assert!(removed.is_ok(), "index out of sync with widget entries");
                    entry.keys = self.index.insert(s.x, s.y);
                    entry.bounds = s.bounds;
                }
                entry.z = s.z;
                report.updated += 1;
            }
            None => {
                let keys = self.index.insert(s.x, s.y);
                let seq = self.bump_seq();
                self.entries.insert(
                    s.id,
                    WidgetEntry {
                        bounds: s.bounds,
                        keys,
                        z: s.z,
                        seq,
                    },
                );
                report.inserted += 1;
            }
        }
    }

    fn rebuild_with(&mut self, staged: Vec<Staged<K, T, Z>>, report: &mut FrameReport) {
        let mut next: Vec<(K, Bounds<T>, Z, u64)> = Vec::with_capacity(staged.len());
        let mut rects = Vec::with_capacity(staged.len());
        for s in staged {
            let previous = self.entries.get(&s.id).map(|e| (e.bounds, e.z, e.seq));
            let seq = match previous {
                Some((bounds, z, seq)) => {
                    if bounds == s.bounds && z == s.z {
                        report.unchanged += 1;
                    } else {
                        report.updated += 1;
                    }
                    seq
                }
                None => {
                    report.inserted += 1;
                    self.bump_seq()
                }
            };
            next.push((s.id, s.bounds, s.z, seq));
            rects.push((s.x, s.y));
        }
        let keys = self.index.bulk_load(rects);
        self.entries = next
            .into_iter()
            .zip(keys)
            .map(|((id, bounds, z, seq), keys)| {
                (
                    id,
                    WidgetEntry {
                        bounds,
                        keys,
                        z,
                        seq,
                    },
                )
            })
            .collect();
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

/// Stacking order of `(z_a, seq_a)` relative to `(z_b, seq_b)`; `Greater` means `a` is on top.
fn stacking<Z: Ord>(z_a: Z, seq_a: u64, z_b: Z, seq_b: u64) -> Ordering {
    z_a.cmp(&z_b).then(seq_a.cmp(&seq_b))
}
