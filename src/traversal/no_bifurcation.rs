//! Chain walk that stops at the first branching node.

use crate::error::{TraversalError, TraversalResult};
use crate::graph::{Graph, NodeId};
use crate::traversal::{ensure_node, GraphIterator, SourceIterator};

/// Walks a simple chain from a node of degree at most two.
///
/// At most one candidate is pending at any time. Expanding a node considers
/// its first two neighbours and moves on to the first one that is unvisited
/// and itself of degree at most two. When neither qualifies the walk ends
/// quietly; reaching a branching node or looping back is normal termination.
///
/// `next` does not consume the candidate: until `cont` or `kill_branch`
/// replaces it, repeated calls return the same node as long as it is
/// unvisited.
#[derive(Debug, Clone, Default)]
pub struct NoBifurcationIterator {
    source: Option<NodeId>,
    candidate: Option<NodeId>,
}

impl NoBifurcationIterator {
    /// Creates an iterator with no source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current start node.
    pub fn source(&self) -> Option<NodeId> {
        self.source
    }

    /// The node `next` will yield, if any.
    pub fn candidate(&self) -> Option<NodeId> {
        self.candidate
    }
}

impl<G: Graph> GraphIterator<G> for NoBifurcationIterator {
    fn init(&mut self, _graph: &G) -> TraversalResult<()> {
        self.candidate = self.source;
        Ok(())
    }

    fn next(&mut self, graph: &G) -> Option<NodeId> {
        self.candidate.filter(|&node| !graph.is_visited(node))
    }

    fn cont(&mut self, graph: &G, current: NodeId) -> TraversalResult<()> {
        ensure_node(graph, current)?;
        self.candidate = graph
            .related(current)
            .take(2)
            .find(|&related| !graph.is_visited(related) && graph.degree(related) <= 2);
        if self.candidate.is_none() {
            tracing::trace!(node = current, "chain ends");
        }
        Ok(())
    }

    fn kill_branch(&mut self, _graph: &G, _current: NodeId) {
        self.candidate = None;
    }
}

impl<G: Graph> SourceIterator<G> for NoBifurcationIterator {
    fn set_source(&mut self, graph: &G, source: NodeId) -> TraversalResult<()> {
        ensure_node(graph, source)?;
        let degree = graph.degree(source);
        if degree > 2 {
            tracing::warn!(node = source, degree, "chain walk started on a branching node");
            return Err(TraversalError::Bifurcation {
                node: source,
                degree,
            });
        }
        self.source = Some(source);
        self.candidate = Some(source);
        Ok(())
    }

    fn source(&self) -> Option<NodeId> {
        self.source
    }
}
