//! An addressable binary min-heap.
//!
//! Entries are `(key, priority)` pairs where `key` is a dense `usize` (a node
//! id). A position table maps every key to its slot in the heap array, which
//! lets the weighted strategies reposition an arbitrary element in
//! \(O(\log n)\) after a relaxation instead of removing it with a linear scan.
//!
//! Ordering is ascending priority (`f64::total_cmp`) with ties broken by
//! ascending key, so extraction order is fully deterministic.

use core::cmp::Ordering;
use core::fmt;

const ABSENT: usize = usize::MAX;

#[derive(Debug, Clone, Copy)]
struct Entry {
    key: usize,
    priority: f64,
}

impl Entry {
    #[inline(always)]
    fn order(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then(self.key.cmp(&other.key))
    }
}

/// A min-heap supporting lookup, reprioritisation and removal by key.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `push` | \(O(\log n)\) | Updates in place if the key is present |
/// | `pop` | \(O(\log n)\) | Smallest priority, then smallest key |
/// | `change_priority` | \(O(\log n)\) | Sifts up or down as needed |
/// | `remove` | \(O(\log n)\) | |
/// | `contains` / `priority` | \(O(1)\) | Position table lookup |
#[derive(Clone, Default)]
pub struct IndexedMinHeap {
    data: Vec<Entry>,
    positions: Vec<usize>,
}

impl IndexedMinHeap {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty heap with room for keys `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            positions: vec![ABSENT; capacity],
        }
    }

    /// Returns the number of entries in the heap.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if `key` is currently queued.
    pub fn contains(&self, key: usize) -> bool {
        self.slot(key).is_some()
    }

    /// Returns the queued priority of `key`.
    pub fn priority(&self, key: usize) -> Option<f64> {
        self.slot(key).map(|i| self.data[i].priority)
    }

    /// Returns the smallest entry without removing it.
    pub fn peek(&self) -> Option<(usize, f64)> {
        self.data.first().map(|e| (e.key, e.priority))
    }

    /// Inserts `key`, or repositions it if it is already queued.
    pub fn push(&mut self, key: usize, priority: f64) {
        if self.change_priority(key, priority) {
            return;
        }
        if key >= self.positions.len() {
            self.positions.resize(key + 1, ABSENT);
        }
        let idx = self.data.len();
        self.data.push(Entry { key, priority });
        self.positions[key] = idx;
        self.sift_up(idx);
    }

    /// Pops the entry with the smallest priority.
    pub fn pop(&mut self) -> Option<(usize, f64)> {
        if self.data.is_empty() {
            return None;
        }
        let entry = self.take(0);
        Some((entry.key, entry.priority))
    }

    /// Sets a new priority for a queued key.
    ///
    /// Returns `false` if `key` is not queued.
    pub fn change_priority(&mut self, key: usize, priority: f64) -> bool {
        let Some(idx) = self.slot(key) else {
            return false;
        };
        let old = self.data[idx].priority;
        self.data[idx].priority = priority;
        match priority.total_cmp(&old) {
            Ordering::Less => self.sift_up(idx),
            Ordering::Greater => self.sift_down(idx),
            Ordering::Equal => {}
        }
        true
    }

    /// Removes a queued key and returns its priority.
    pub fn remove(&mut self, key: usize) -> Option<f64> {
        let idx = self.slot(key)?;
        Some(self.take(idx).priority)
    }

    /// Clears the heap.
    pub fn clear(&mut self) {
        for e in &self.data {
            self.positions[e.key] = ABSENT;
        }
        self.data.clear();
    }

    /// Iterates all entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.data.iter().map(|e| (e.key, e.priority))
    }

    #[inline]
    fn slot(&self, key: usize) -> Option<usize> {
        match self.positions.get(key) {
            Some(&idx) if idx != ABSENT => Some(idx),
            _ => None,
        }
    }

    // Removes the entry at `idx`, restoring heap order around the hole.
    fn take(&mut self, idx: usize) -> Entry {
        let entry = self.data.swap_remove(idx);
        self.positions[entry.key] = ABSENT;
        if idx < self.data.len() {
            self.positions[self.data[idx].key] = idx;
            self.sift_down(idx);
            self.sift_up(idx);
        }
        entry
    }

    fn sift_up(&mut self, mut node: usize) {
        while node > 0 {
            let parent = (node - 1) / 2;
            if self.less(node, parent) {
                self.swap(parent, node);
                node = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut node: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * node + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut smaller = left;
            if right < len && self.less(right, left) {
                smaller = right;
            }

            if self.less(smaller, node) {
                self.swap(node, smaller);
                node = smaller;
            } else {
                break;
            }
        }
    }

    #[inline(always)]
    fn swap(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
        self.positions[self.data[a].key] = a;
        self.positions[self.data[b].key] = b;
    }

    // Helper to compare two elements in the heap
    #[inline(always)]
    fn less(&self, a: usize, b: usize) -> bool {
        self.data[a].order(&self.data[b]) == Ordering::Less
    }
}

impl fmt::Debug for IndexedMinHeap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedMinHeap")
            .field("len", &self.len())
            .field("min", &self.peek())
            .finish()
    }
}
