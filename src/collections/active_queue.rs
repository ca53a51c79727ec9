//! The container of elements awaiting a visit.
//!
//! The discipline is chosen at construction:
//! - [`QueueKind::Fifo`] pops in insertion order (breadth-first)
//! - [`QueueKind::Lifo`] pops the most recent insertion (depth-first)
//!
//! Both are backed by a single `VecDeque`; only the pop end differs, so a
//! strategy can switch between breadth and depth semantics without any other
//! change.

use std::collections::VecDeque;

/// Pop discipline of an [`ActiveQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueKind {
    /// First in, first out.
    Fifo,
    /// Last in, first out.
    Lifo,
}

/// A FIFO or LIFO queue.
///
/// ### Performance Characteristics
/// | Operation | Complexity |
/// |-----------|------------|
/// | `push` | \(O(1)\) amortized |
/// | `pop` | \(O(1)\) |
/// | `clear` | \(O(n)\) |
#[derive(Debug, Clone)]
pub struct ActiveQueue<T> {
    kind: QueueKind,
    items: VecDeque<T>,
}

impl<T> ActiveQueue<T> {
    /// Creates an empty queue.
    pub fn new(kind: QueueKind) -> Self {
        Self {
            kind,
            items: VecDeque::new(),
        }
    }

    /// Creates an empty queue preallocated for `capacity` items.
    ///
    /// The capacity is advisory; the queue grows past it as needed.
    pub fn with_capacity(kind: QueueKind, capacity: usize) -> Self {
        Self {
            kind,
            items: VecDeque::with_capacity(capacity),
        }
    }

    /// Returns the pop discipline.
    #[inline]
    pub fn kind(&self) -> QueueKind {
        self.kind
    }

    /// Number of queued items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Enqueues an item.
    #[inline]
    pub fn push(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Dequeues the next item according to the discipline.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        match self.kind {
            QueueKind::Fifo => self.items.pop_front(),
            QueueKind::Lifo => self.items.pop_back(),
        }
    }

    /// Returns the item `pop` would return, without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        match self.kind {
            QueueKind::Fifo => self.items.front(),
            QueueKind::Lifo => self.items.back(),
        }
    }

    /// Removes every item, keeping the allocation.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T> Extend<T> for ActiveQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}
