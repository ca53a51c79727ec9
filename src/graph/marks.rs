//! Per-node scratch fields for graph traversals.
//!
//! `NodeMarks` stores the visited flag and the topological counter of every
//! node in two dense vectors indexed by `NodeId`. Both are `Cell`s: the
//! driver marks nodes visited and the topological strategies bump counters
//! while the graph itself is only borrowed shared. The type is `!Sync`, which
//! matches the single-threaded contract of a traversal.

use std::cell::Cell;

/// Dense visited flags and counters, one slot per node.
#[derive(Debug, Default, Clone)]
pub struct NodeMarks {
    visited: Vec<Cell<bool>>,
    counter: Vec<Cell<usize>>,
}

impl NodeMarks {
    /// Creates cleared marks for `len` nodes.
    pub fn new(len: usize) -> Self {
        Self {
            visited: (0..len).map(|_| Cell::new(false)).collect(),
            counter: (0..len).map(|_| Cell::new(0)).collect(),
        }
    }

    /// Number of node slots.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.visited.len()
    }

    /// Returns `true` if there are no slots.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }

    /// Appends a cleared slot for a newly added node.
    pub fn push(&mut self) {
        self.visited.push(Cell::new(false));
        self.counter.push(Cell::new(0));
    }

    /// Resets every flag and counter.
    pub fn clear(&self) {
        for f in &self.visited {
            f.set(false);
        }
        for c in &self.counter {
            c.set(0);
        }
    }

    /// Returns the visited flag of `idx`.
    ///
    /// # Panics
    /// Panics if `idx` is out of bounds.
    #[inline(always)]
    pub fn is_visited(&self, idx: usize) -> bool {
        self.visited[idx].get()
    }

    /// Sets the visited flag of `idx`.
    #[inline(always)]
    pub fn set_visited(&self, idx: usize, visited: bool) {
        self.visited[idx].set(visited);
    }

    /// Returns the counter of `idx`.
    #[inline(always)]
    pub fn counter(&self, idx: usize) -> usize {
        self.counter[idx].get()
    }

    /// Overwrites the counter of `idx`.
    #[inline(always)]
    pub fn set_counter(&self, idx: usize, value: usize) {
        self.counter[idx].set(value);
    }

    /// Increments the counter of `idx` and returns the new value.
    #[inline(always)]
    pub fn bump_counter(&self, idx: usize) -> usize {
        let next = self.counter[idx].get() + 1;
        self.counter[idx].set(next);
        next
    }

    /// Number of nodes currently marked visited.
    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|f| f.get()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visit_and_clear() {
        let marks = NodeMarks::new(4);
        marks.set_visited(2, true);
        assert!(marks.is_visited(2));
        assert!(!marks.is_visited(1));
        assert_eq!(marks.visited_count(), 1);

        marks.set_counter(3, 7);
        marks.clear();
        assert!(!marks.is_visited(2));
        assert_eq!(marks.counter(3), 0);
        assert_eq!(marks.visited_count(), 0);
    }

    #[test]
    fn test_counters() {
        let mut marks = NodeMarks::new(2);
        assert_eq!(marks.bump_counter(0), 1);
        assert_eq!(marks.bump_counter(0), 2);
        assert_eq!(marks.counter(1), 0);

        marks.set_counter(0, 0);
        assert_eq!(marks.counter(0), 0);

        marks.push();
        assert_eq!(marks.len(), 3);
        assert!(!marks.is_visited(2));
    }
}
