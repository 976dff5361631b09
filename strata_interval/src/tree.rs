// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! AVL interval tree over an arena of slots.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::{self, Debug};

use smallvec::SmallVec;

use crate::error::IntervalError;
use crate::types::{Interval, IntervalKey};

type Link = Option<u32>;

#[derive(Clone)]
struct Node<T, K> {
    interval: Interval<T, K>,
    /// Maximum `high` over this node's subtree.
    max_high: T,
    left: Link,
    right: Link,
    height: u8,
    generation: u32,
    live: bool,
}

impl<T: Copy + PartialOrd + Debug, K: Copy> Node<T, K> {
    fn leaf(interval: Interval<T, K>, generation: u32) -> Self {
        Self {
            interval,
            max_high: interval.high(),
            left: None,
            right: None,
            height: 1,
            generation,
            live: true,
        }
    }
}

/// Balanced interval tree answering stabbing queries.
///
/// Nodes live in an arena indexed by slot; freed slots are recycled with a bumped generation so
/// that outstanding [`IntervalKey`]s go stale instead of aliasing new intervals.
/// The tree is ordered by `(low, slot)`, which makes every key unique even when many intervals
/// share a lower bound, and lets removal find its node by descending rather than by parent links.
#[derive(Clone)]
pub struct IntervalTree<T, K> {
    nodes: Vec<Node<T, K>>,
    free_list: Vec<u32>,
    root: Link,
    len: usize,
}

impl<T: Copy + PartialOrd + Debug, K: Copy> Default for IntervalTree<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + PartialOrd + Debug, K: Copy> Debug for IntervalTree<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntervalTree")
            .field("total_slots", &self.nodes.len())
            .field("alive", &self.len)
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

impl<T: Copy + PartialOrd + Debug, K: Copy> IntervalTree<T, K> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free_list: Vec::new(),
            root: None,
            len: 0,
        }
    }

    /// Create an empty tree with room for `capacity` intervals before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    /// Number of live intervals.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no intervals are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the tree (`0` when empty).
    pub fn height(&self) -> usize {
        usize::from(self.height_of(self.root))
    }

    /// Largest upper bound stored in the tree, if any.
    pub fn max_high(&self) -> Option<T> {
        self.root.map(|r| self.nodes[r as usize].max_high)
    }

    /// Insert an interval and return its key. `O(log n)`.
    pub fn insert(&mut self, interval: Interval<T, K>) -> IntervalKey {
        let key = self.alloc(interval);
        let root = self.insert_at(self.root, key.0);
        self.root = Some(root);
        self.len += 1;
        key
    }

    /// Remove the interval behind `key` and return it. `O(log n)`.
    ///
    /// Returns [`IntervalError::NotFound`] if `key` is stale or was never issued by this tree.
    pub fn remove(&mut self, key: IntervalKey) -> Result<Interval<T, K>, IntervalError> {
        if !self.contains_key(key) {
            return Err(IntervalError::NotFound);
        }
        let slot = key.0;
        self.root = self.remove_at(self.root, slot);
        let node = &mut self.nodes[slot as usize];
        node.live = false;
        node.left = None;
        node.right = None;
        self.free_list.push(slot);
        self.len -= 1;
        Ok(node.interval)
    }

    /// Returns true if `key` refers to a live interval.
    pub fn contains_key(&self, key: IntervalKey) -> bool {
        self.get(key).is_some()
    }

    /// Look up a live interval by key.
    pub fn get(&self, key: IntervalKey) -> Option<&Interval<T, K>> {
        self.nodes
            .get(key.slot())
            .filter(|n| n.live && n.generation == key.generation())
            .map(|n| &n.interval)
    }

    /// Remove every interval. Outstanding keys become stale.
    pub fn clear(&mut self) {
        self.free_list.clear();
        for (slot, node) in self.nodes.iter_mut().enumerate().rev() {
            node.live = false;
            node.left = None;
            node.right = None;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "IntervalKey uses 32-bit slot indices by design."
            )]
            self.free_list.push(slot as u32);
        }
        self.root = None;
        self.len = 0;
    }

    /// Replace the contents of the tree with `intervals`, built perfectly balanced.
    ///
    /// Outstanding keys become stale. The returned keys are in the same order as the input.
    /// This costs one sort, `O(n log n)`, and is cheaper than `n` separate inserts when a whole
    /// frame's worth of intervals changes at once.
    pub fn bulk_load<I>(&mut self, intervals: I) -> Vec<IntervalKey>
    where
        I: IntoIterator<Item = Interval<T, K>>,
    {
        self.clear();
        let keys: Vec<IntervalKey> = intervals.into_iter().map(|iv| self.alloc(iv)).collect();
        let mut order: Vec<u32> = keys.iter().map(|k| k.0).collect();
        order.sort_unstable_by(|&a, &b| self.cmp_slots(a, b));
        self.root = self.build_balanced(&order);
        self.len = keys.len();
        keys
    }

    /// Iterate live intervals with their keys, in slot order.
    pub fn iter(&self) -> Iter<'_, T, K> {
        Iter {
            inner: self.nodes.iter().enumerate(),
            remaining: self.len,
        }
    }

    /// Call `f` for every stored interval with `low <= point <= high`.
    ///
    /// Subtrees whose cached maximum ends before `point` are skipped, and so are right subtrees
    /// of nodes that start after `point`. Visit order is unspecified.
    pub fn visit_stab<F>(&self, point: T, mut f: F)
    where
        F: FnMut(IntervalKey, &Interval<T, K>),
    {
        let mut stack: SmallVec<[u32; 32]> = SmallVec::new();
        stack.extend(self.root);
        while let Some(n) = stack.pop() {
            let node = &self.nodes[n as usize];
            if !le(point, node.max_high) {
                continue;
            }
            if let Some(left) = node.left {
                stack.push(left);
            }
            // Everything to the right starts no earlier than this node.
            if le(node.interval.low(), point) {
                if le(point, node.interval.high()) {
                    f(IntervalKey::new(n, node.generation), &node.interval);
                }
                if let Some(right) = node.right {
                    stack.push(right);
                }
            }
        }
    }

    /// Collect every stored interval containing `point`.
    pub fn stab(&self, point: T) -> Vec<Interval<T, K>> {
        let mut out = Vec::new();
        self.visit_stab(point, |_, iv| out.push(*iv));
        out
    }

    fn alloc(&mut self, interval: Interval<T, K>) -> IntervalKey {
        if let Some(slot) = self.free_list.pop() {
            let node = &mut self.nodes[slot as usize];
            let generation = node.generation.saturating_add(1);
            *node = Node::leaf(interval, generation);
            IntervalKey::new(slot, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Node::leaf(interval, generation));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "IntervalKey uses 32-bit slot indices by design."
            )]
            IntervalKey::new((self.nodes.len() - 1) as u32, generation)
        }
    }

    fn cmp_slots(&self, a: u32, b: u32) -> Ordering {
        let la = self.nodes[a as usize].interval.low();
        let lb = self.nodes[b as usize].interval.low();
        match la.partial_cmp(&lb) {
            Some(Ordering::Equal) | None => a.cmp(&b),
            Some(ord) => ord,
        }
    }

    fn children(&self, n: u32) -> (Link, Link) {
        let node = &self.nodes[n as usize];
        (node.left, node.right)
    }

    fn height_of(&self, link: Link) -> u8 {
        link.map_or(0, |n| self.nodes[n as usize].height)
    }

    /// Recompute height and subtree maximum from the children.
    fn refresh(&mut self, n: u32) {
        let (left, right) = self.children(n);
        let mut max_high = self.nodes[n as usize].interval.high();
        for child in [left, right].into_iter().flatten() {
            let m = self.nodes[child as usize].max_high;
            if m > max_high {
                max_high = m;
            }
        }
        let height = 1 + self.height_of(left).max(self.height_of(right));
        let node = &mut self.nodes[n as usize];
        node.max_high = max_high;
        node.height = height;
    }

    fn rotate_right(&mut self, n: u32) -> u32 {
        let Some(l) = self.nodes[n as usize].left else {
            return n;
        };
        self.nodes[n as usize].left = self.nodes[l as usize].right;
        self.nodes[l as usize].right = Some(n);
        self.refresh(n);
        self.refresh(l);
        l
    }

    fn rotate_left(&mut self, n: u32) -> u32 {
        let Some(r) = self.nodes[n as usize].right else {
            return n;
        };
        self.nodes[n as usize].right = self.nodes[r as usize].left;
        self.nodes[r as usize].left = Some(n);
        self.refresh(n);
        self.refresh(r);
        r
    }

    /// Restore the AVL balance at `n` and return the new subtree root.
    fn rebalance(&mut self, n: u32) -> u32 {
        self.refresh(n);
        let (left, right) = self.children(n);
        let lh = self.height_of(left);
        let rh = self.height_of(right);
        if lh > rh + 1 {
            if let Some(l) = left {
                let (ll, lr) = self.children(l);
                if self.height_of(ll) < self.height_of(lr) {
                    let l = self.rotate_left(l);
                    self.nodes[n as usize].left = Some(l);
                }
            }
            return self.rotate_right(n);
        }
        if rh > lh + 1 {
            if let Some(r) = right {
                let (rl, rr) = self.children(r);
                if self.height_of(rr) < self.height_of(rl) {
                    let r = self.rotate_right(r);
                    self.nodes[n as usize].right = Some(r);
                }
            }
            return self.rotate_left(n);
        }
        n
    }

    fn insert_at(&mut self, at: Link, slot: u32) -> u32 {
        let Some(n) = at else {
            return slot;
        };
        let (left, right) = self.children(n);
        if self.cmp_slots(slot, n) == Ordering::Less {
            let child = self.insert_at(left, slot);
            self.nodes[n as usize].left = Some(child);
        } else {
            let child = self.insert_at(right, slot);
            self.nodes[n as usize].right = Some(child);
        }
        self.rebalance(n)
    }

    fn remove_at(&mut self, at: Link, slot: u32) -> Link {
        let n = at?;
        let (left, right) = self.children(n);
        if n == slot {
            return match (left, right) {
                (None, only) | (only, None) => only,
                (Some(_), Some(r)) => {
                    let (rest, min) = self.detach_min(r);
                    let node = &mut self.nodes[min as usize];
                    node.left = left;
                    node.right = rest;
                    Some(self.rebalance(min))
                }
            };
        }
        if self.cmp_slots(slot, n) == Ordering::Less {
            let child = self.remove_at(left, slot);
            self.nodes[n as usize].left = child;
        } else {
            let child = self.remove_at(right, slot);
            self.nodes[n as usize].right = child;
        }
        Some(self.rebalance(n))
    }

    /// Unlink the leftmost node under `n`; returns the remaining subtree and the detached slot.
    fn detach_min(&mut self, n: u32) -> (Link, u32) {
        let (left, right) = self.children(n);
        match left {
            None => (right, n),
            Some(l) => {
                let (rest, min) = self.detach_min(l);
                self.nodes[n as usize].left = rest;
                (Some(self.rebalance(n)), min)
            }
        }
    }

    fn build_balanced(&mut self, sorted: &[u32]) -> Link {
        if sorted.is_empty() {
            return None;
        }
        let mid = sorted.len() / 2;
        let n = sorted[mid];
        let left = self.build_balanced(&sorted[..mid]);
        let right = self.build_balanced(&sorted[mid + 1..]);
        let node = &mut self.nodes[n as usize];
        node.left = left;
        node.right = right;
        self.refresh(n);
        Some(n)
    }
}

#[inline]
fn le<T: PartialOrd>(a: T, b: T) -> bool {
    matches!(a.partial_cmp(&b), Some(Ordering::Less | Ordering::Equal))
}

/// Iterator over the live intervals of an [`IntervalTree`]; see [`IntervalTree::iter`].
pub struct Iter<'a, T, K> {
    inner: core::iter::Enumerate<core::slice::Iter<'a, Node<T, K>>>,
    remaining: usize,
}

impl<T, K> Debug for Iter<'_, T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

impl<'a, T, K> Iterator for Iter<'a, T, K> {
    type Item = (IntervalKey, &'a Interval<T, K>);

    fn next(&mut self) -> Option<Self::Item> {
        for (slot, node) in self.inner.by_ref() {
            if node.live {
                self.remaining -= 1;
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "IntervalKey uses 32-bit slot indices by design."
                )]
                return Some((IntervalKey::new(slot as u32, node.generation), &node.interval));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, K> ExactSizeIterator for Iter<'_, T, K> {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    type Tree = IntervalTree<i64, u32>;

    fn iv(low: i64, high: i64, owner: u32) -> Interval<i64, u32> {
        Interval::new(low, high, owner).unwrap()
    }

    fn owners_at(tree: &Tree, point: i64) -> Vec<u32> {
        let mut out: Vec<u32> = tree.stab(point).iter().map(|i| i.owner()).collect();
        out.sort_unstable();
        out
    }

    /// Walk the whole tree checking ordering, AVL balance, heights and the max-high cache.
    /// Returns `(count, height, max_high)` for the subtree.
    fn check(tree: &Tree, link: Link) -> (usize, u8, Option<i64>) {
        let Some(n) = link else {
            return (0, 0, None);
        };
        let node = &tree.nodes[n as usize];
        assert!(node.live, "dead node {n} reachable from the root");
        if let Some(l) = node.left {
            assert_eq!(tree.cmp_slots(l, n), Ordering::Less, "left child out of order");
        }
        if let Some(r) = node.right {
            assert_eq!(tree.cmp_slots(n, r), Ordering::Less, "right child out of order");
        }
        let (lc, lh, lm) = check(tree, node.left);
        let (rc, rh, rm) = check(tree, node.right);
        assert!(lh.abs_diff(rh) <= 1, "node {n} is out of balance: {lh} vs {rh}");
        assert_eq!(node.height, 1 + lh.max(rh), "stale height at node {n}");
        let expected = [Some(node.interval.high()), lm, rm]
            .into_iter()
            .flatten()
            .max();
        assert_eq!(Some(node.max_high), expected, "stale max_high at node {n}");
        (1 + lc + rc, node.height, expected)
    }

    fn assert_invariants(tree: &Tree) {
        let (count, _, _) = check(tree, tree.root);
        assert_eq!(count, tree.len(), "reachable node count differs from len");
    }

    #[test]
    fn empty_tree_stabs_nothing() {
        let tree = Tree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.max_high(), None);
        assert!(tree.stab(0).is_empty());
    }

    #[test]
    fn stab_is_inclusive_at_both_ends() {
        let mut tree = Tree::new();
        tree.insert(iv(0, 10, 1));
        tree.insert(iv(10, 20, 2));
        tree.insert(iv(21, 30, 3));
        assert_eq!(owners_at(&tree, 10), vec![1, 2]);
        assert_eq!(owners_at(&tree, 20), vec![2]);
        assert_eq!(owners_at(&tree, 21), vec![3]);
        assert_eq!(owners_at(&tree, -1), Vec::<u32>::new());
        assert_eq!(owners_at(&tree, 31), Vec::<u32>::new());
    }

    #[test]
    fn long_interval_in_left_subtree_is_found() {
        // The first interval sorts leftmost but spans past everything inserted after it.
        let mut tree = Tree::new();
        tree.insert(iv(0, 1000, 99));
        for i in 1..64 {
            tree.insert(iv(i * 10, i * 10 + 1, i as u32));
        }
        assert_invariants(&tree);
        assert_eq!(owners_at(&tree, 995), vec![99]);
        assert_eq!(owners_at(&tree, 500), vec![50, 99]);
    }

    #[test]
    fn sequential_inserts_stay_balanced() {
        let mut tree = Tree::new();
        for i in 0..1024 {
            tree.insert(iv(i, i + 5, i as u32));
        }
        assert_invariants(&tree);
        // An AVL tree with 1024 nodes is at most ~1.44 * log2(1024) high.
        assert!(tree.height() <= 15, "height {} too large", tree.height());
        assert_eq!(tree.max_high(), Some(1028));
    }

    #[test]
    fn duplicate_lows_are_distinct_entries() {
        let mut tree = Tree::new();
        let keys: Vec<_> = (0..20).map(|i| tree.insert(iv(5, 5 + i, i as u32))).collect();
        assert_invariants(&tree);
        assert_eq!(tree.stab(5).len(), 20);
        tree.remove(keys[7]).unwrap();
        tree.remove(keys[0]).unwrap();
        assert_invariants(&tree);
        assert_eq!(tree.stab(5).len(), 18);
        assert!(!owners_at(&tree, 5).contains(&7));
    }

    #[test]
    fn remove_returns_interval_and_stales_key() {
        let mut tree = Tree::new();
        let k = tree.insert(iv(0, 10, 1));
        assert_eq!(tree.get(k).map(|i| i.owner()), Some(1));
        assert_eq!(tree.remove(k), Ok(iv(0, 10, 1)));
        assert_eq!(tree.remove(k), Err(IntervalError::NotFound));
        assert!(tree.get(k).is_none());
        assert!(tree.is_empty());
    }

    #[test]
    fn reused_slot_does_not_alias_stale_key() {
        let mut tree = Tree::new();
        let old = tree.insert(iv(0, 10, 1));
        tree.remove(old).unwrap();
        let new = tree.insert(iv(20, 30, 2));
        assert_eq!(old.slot(), new.slot());
        assert_ne!(old, new);
        assert_eq!(tree.remove(old), Err(IntervalError::NotFound));
        assert!(tree.contains_key(new));
    }

    #[test]
    fn remove_every_shape_of_node() {
        let mut tree = Tree::new();
        let keys: Vec<_> = (0..200)
            .map(|i| tree.insert(iv((i * 37) % 200, (i * 37) % 200 + 3, i as u32)))
            .collect();
        // Remove in a scrambled order so leaves, single-child and two-child nodes all get hit.
        for (step, i) in (0..200).map(|i| (i * 71) % 200).enumerate() {
            tree.remove(keys[i]).unwrap();
            if step % 10 == 0 {
                assert_invariants(&tree);
            }
        }
        assert!(tree.is_empty());
        assert_eq!(tree.root, None);
    }

    #[test]
    fn clear_stales_keys_and_recycles_slots() {
        let mut tree = Tree::new();
        let a = tree.insert(iv(0, 1, 1));
        let _b = tree.insert(iv(2, 3, 2));
        tree.clear();
        assert!(tree.is_empty());
        assert!(!tree.contains_key(a));
        let c = tree.insert(iv(4, 5, 3));
        assert_eq!(c.slot(), a.slot());
        assert!(!tree.contains_key(a));
        assert_eq!(owners_at(&tree, 4), vec![3]);
        assert_invariants(&tree);
    }

    #[test]
    fn bulk_load_builds_a_balanced_tree() {
        let mut tree = Tree::new();
        let stale = tree.insert(iv(0, 1, 0));
        let keys = tree.bulk_load((0..1000).map(|i| iv(1000 - i, 1000 - i + 2, i as u32)));
        assert_eq!(keys.len(), 1000);
        assert_eq!(tree.len(), 1000);
        assert!(!tree.contains_key(stale));
        assert_eq!(tree.get(keys[10]).map(|i| i.owner()), Some(10));
        assert_invariants(&tree);
        assert_eq!(tree.height(), 10);
        // The loaded tree keeps working incrementally.
        tree.remove(keys[0]).unwrap();
        tree.insert(iv(-5, 5, 5000));
        assert_invariants(&tree);
        assert_eq!(owners_at(&tree, 0), vec![5000]);
    }

    #[test]
    fn iter_yields_live_intervals_only() {
        let mut tree = Tree::new();
        let keys: Vec<_> = (0..5).map(|i| tree.insert(iv(i, i, i as u32))).collect();
        tree.remove(keys[2]).unwrap();
        let it = tree.iter();
        assert_eq!(it.len(), 4);
        let owners: Vec<u32> = it.map(|(_, i)| i.owner()).collect();
        assert_eq!(owners, vec![0, 1, 3, 4]);
        for (k, i) in tree.iter() {
            assert_eq!(tree.get(k), Some(i));
        }
    }

    #[test]
    fn nan_point_matches_nothing() {
        let mut tree: IntervalTree<f64, u8> = IntervalTree::new();
        tree.insert(Interval::new(f64::NEG_INFINITY, f64::INFINITY, 1).unwrap());
        assert_eq!(tree.stab(0.0).len(), 1);
        assert!(tree.stab(f64::NAN).is_empty());
    }

    #[test]
    fn debug_reports_counts() {
        let mut tree = Tree::new();
        tree.insert(iv(0, 1, 1));
        let s = alloc::format!("{tree:?}");
        assert!(s.contains("alive: 1"), "{s}");
    }
}
