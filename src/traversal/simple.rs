//! Breadth-first and depth-first iteration.
//!
//! Both strategies share one implementation: a source-seeded
//! [`ActiveQueue`] that receives every unvisited neighbour of each expanded
//! node. A FIFO queue yields breadth-first order, a LIFO queue depth-first
//! order. Nodes may be enqueued more than once; `next` discards copies that
//! were visited in the meantime, so the first copy to surface wins.

use crate::collections::{ActiveQueue, QueueKind};
use crate::error::TraversalResult;
use crate::graph::{Adjacency, Graph, NodeId};
use crate::traversal::{ensure_node, GraphIterator, SourceIterator};

/// Queue-driven breadth-first / depth-first iterator.
#[derive(Debug, Clone)]
pub struct SimpleIterator {
    active: ActiveQueue<NodeId>,
    adjacency: Adjacency,
    source: Option<NodeId>,
}

impl SimpleIterator {
    /// Creates an iterator with an explicit queue discipline and neighbour mode.
    pub fn new(kind: QueueKind, adjacency: Adjacency) -> Self {
        Self {
            active: ActiveQueue::new(kind),
            adjacency,
            source: None,
        }
    }

    /// Breadth-first over every incident edge.
    pub fn breadth_first() -> Self {
        Self::new(QueueKind::Fifo, Adjacency::All)
    }

    /// Depth-first over every incident edge.
    pub fn depth_first() -> Self {
        Self::new(QueueKind::Lifo, Adjacency::All)
    }

    /// Breadth-first following outgoing edges only.
    pub fn directed_breadth_first() -> Self {
        Self::new(QueueKind::Fifo, Adjacency::Outgoing)
    }

    /// Depth-first following outgoing edges only.
    pub fn directed_depth_first() -> Self {
        Self::new(QueueKind::Lifo, Adjacency::Outgoing)
    }

    /// Returns the queue discipline.
    pub fn kind(&self) -> QueueKind {
        self.active.kind()
    }

    /// Returns the current start node.
    pub fn source(&self) -> Option<NodeId> {
        self.source
    }

    /// Returns the neighbour mode.
    pub fn adjacency(&self) -> Adjacency {
        self.adjacency
    }

    /// Number of queued entries, including stale copies.
    pub fn pending(&self) -> usize {
        self.active.len()
    }

    fn reseed(&mut self, capacity: usize) {
        self.active = ActiveQueue::with_capacity(self.active.kind(), capacity);
        if let Some(source) = self.source {
            self.active.push(source);
        }
    }
}

impl<G: Graph> GraphIterator<G> for SimpleIterator {
    fn init(&mut self, graph: &G) -> TraversalResult<()> {
        self.reseed(graph.node_count());
        Ok(())
    }

    fn next(&mut self, graph: &G) -> Option<NodeId> {
        while let Some(node) = self.active.pop() {
            if !graph.is_visited(node) {
                return Some(node);
            }
        }
        None
    }

    fn cont(&mut self, graph: &G, current: NodeId) -> TraversalResult<()> {
        ensure_node(graph, current)?;
        for adj in graph.neighbors(current, self.adjacency) {
            if !graph.is_visited(adj.node) {
                self.active.push(adj.node);
            }
        }
        Ok(())
    }

    fn kill_branch(&mut self, _graph: &G, _current: NodeId) {}
}

impl<G: Graph> SourceIterator<G> for SimpleIterator {
    fn set_source(&mut self, graph: &G, source: NodeId) -> TraversalResult<()> {
        ensure_node(graph, source)?;
        self.source = Some(source);
        self.reseed(graph.node_count());
        Ok(())
    }

    fn source(&self) -> Option<NodeId> {
        self.source
    }
}
