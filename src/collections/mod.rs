//! Containers backing the traversal strategies.
//!
//! - `active_queue`: FIFO / LIFO queue of elements awaiting a visit
//! - `indexed_heap`: addressable min-heap with O(log n) reprioritisation

pub mod active_queue;
pub mod indexed_heap;

pub use active_queue::{ActiveQueue, QueueKind};
pub use indexed_heap::IndexedMinHeap;
