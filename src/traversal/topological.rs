//! Counter-driven topological iteration.
//!
//! Every node carries a scratch counter of "incoming edges processed so far".
//! Expanding a node bumps the counter of each unvisited neighbour once per
//! connecting edge; a neighbour becomes ready when its counter reaches its
//! threshold:
//!
//! | Variant | Follows | Threshold | Seeded at `init` |
//! |---------|---------|-----------|------------------|
//! | undirected | every incident edge | `degree - 1` | `degree < 2` |
//! | directed | outgoing edges | `in_degree` | `in_degree == 0` |
//!
//! Ready nodes are drained FIFO (breadth-first) or LIFO (depth-first).
//! Pruning a node with `kill_branch` withholds its increments, so nodes that
//! can only become ready through it are never yielded.

use crate::collections::{ActiveQueue, QueueKind};
use crate::error::TraversalResult;
use crate::graph::{Adjacency, Graph, NodeId};
use crate::traversal::{ensure_node, GraphIterator, SourceIterator};

/// Topological iterator over undirected or directed graphs.
#[derive(Debug, Clone)]
pub struct TopologicalIterator {
    ready: ActiveQueue<NodeId>,
    directed: bool,
}

impl TopologicalIterator {
    /// Creates an iterator with an explicit tie-break discipline.
    pub fn new(kind: QueueKind, directed: bool) -> Self {
        Self {
            ready: ActiveQueue::new(kind),
            directed,
        }
    }

    /// Undirected, ties broken in FIFO order.
    pub fn breadth_first() -> Self {
        Self::new(QueueKind::Fifo, false)
    }

    /// Undirected, ties broken in LIFO order.
    pub fn depth_first() -> Self {
        Self::new(QueueKind::Lifo, false)
    }

    /// In-degree driven, ties broken in FIFO order.
    pub fn directed_breadth_first() -> Self {
        Self::new(QueueKind::Fifo, true)
    }

    /// In-degree driven, ties broken in LIFO order.
    pub fn directed_depth_first() -> Self {
        Self::new(QueueKind::Lifo, true)
    }

    /// Returns `true` for the in-degree driven variants.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Number of nodes ready to be yielded.
    pub fn pending(&self) -> usize {
        self.ready.len()
    }

    #[inline]
    fn threshold<G: Graph>(&self, graph: &G, node: NodeId) -> usize {
        if self.directed {
            graph.in_degree(node)
        } else {
            graph.degree(node).saturating_sub(1)
        }
    }

    #[inline]
    fn is_seed<G: Graph>(&self, graph: &G, node: NodeId) -> bool {
        if self.directed {
            graph.in_degree(node) == 0
        } else {
            graph.degree(node) < 2
        }
    }
}

impl<G: Graph> GraphIterator<G> for TopologicalIterator {
    fn init(&mut self, graph: &G) -> TraversalResult<()> {
        let n = graph.node_count();
        self.ready = ActiveQueue::with_capacity(self.ready.kind(), n);
        for node in 0..n {
            graph.set_counter(node, 0);
            if !graph.is_visited(node) && self.is_seed(graph, node) {
                self.ready.push(node);
            }
        }
        tracing::trace!(seeds = self.ready.len(), directed = self.directed, "topological seeds");
        Ok(())
    }

    fn next(&mut self, graph: &G) -> Option<NodeId> {
        while let Some(node) = self.ready.pop() {
            if !graph.is_visited(node) {
                return Some(node);
            }
        }
        None
    }

    fn cont(&mut self, graph: &G, current: NodeId) -> TraversalResult<()> {
        ensure_node(graph, current)?;
        let adjacency = if self.directed {
            Adjacency::Outgoing
        } else {
            Adjacency::All
        };
        for adj in graph.neighbors(current, adjacency) {
            let related = adj.node;
            if graph.is_visited(related) {
                continue;
            }
            let count = graph.marks().bump_counter(related);
            if count == self.threshold(graph, related) {
                self.ready.push(related);
            }
        }
        Ok(())
    }

    fn kill_branch(&mut self, _graph: &G, _current: NodeId) {}
}

/// Topological order has no source; `set_source` only validates the node.
impl<G: Graph> SourceIterator<G> for TopologicalIterator {
    fn set_source(&mut self, graph: &G, source: NodeId) -> TraversalResult<()> {
        ensure_node(graph, source)
    }

    fn source(&self) -> Option<NodeId> {
        None
    }
}
