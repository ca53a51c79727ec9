//! Dijkstra single-source shortest paths as an iterator.
//!
//! `init` creates one [`DijkstraNode`] per graph node (cost `+inf`, the
//! source `0`) and queues all of them in an [`IndexedMinHeap`] keyed by cost.
//! `next` settles the cheapest node; once the cheapest remaining cost is
//! `+inf` the rest of the graph is unreachable and the walk ends. `cont`
//! relaxes the edges of the node just settled.
//!
//! Costs are only optimal for non-negative weights. Negative weights are not
//! rejected; they yield a complete but possibly non-optimal walk.

use crate::collections::IndexedMinHeap;
use crate::error::{TraversalError, TraversalResult};
use crate::graph::{Adjacency, EdgeId, Graph, NodeId};
use crate::traversal::{ensure_node, EdgeWeigher, GraphIterator, NodeWeigher, SourceIterator};

/// Per-node search state owned by a [`DijkstraIterator`].
#[derive(Debug, Clone, PartialEq)]
pub struct DijkstraNode {
    /// The graph node this record shadows.
    pub node: NodeId,
    /// Best known path cost from the source.
    pub cost: f64,
    /// Predecessor on the best known path.
    pub parent: Option<NodeId>,
    /// Edge from `parent` to `node`.
    pub parent_edge: Option<EdgeId>,
}

impl DijkstraNode {
    fn unreached(node: NodeId) -> Self {
        Self {
            node,
            cost: f64::INFINITY,
            parent: None,
            parent_edge: None,
        }
    }
}

/// Shortest-path iterator.
///
/// ### Performance Characteristics
/// | Operation | Complexity |
/// |-----------|------------|
/// | `init` | \(O(n \log n)\) |
/// | `next` | \(O(\log n)\) |
/// | `cont` | \(O(d \log n)\) for a node of degree \(d\) |
pub struct DijkstraIterator<'w> {
    weigher: EdgeWeigher<'w>,
    node_weigher: Option<NodeWeigher<'w>>,
    adjacency: Adjacency,
    source: Option<NodeId>,
    nodes: Vec<DijkstraNode>,
    queue: IndexedMinHeap,
}

impl<'w> DijkstraIterator<'w> {
    /// Creates an iterator that follows every incident edge.
    pub fn new(weigher: impl Fn(EdgeId) -> f64 + 'w) -> Self {
        Self::from_boxed(Box::new(weigher))
    }

    /// Creates an iterator that follows outgoing edges only.
    pub fn directed(weigher: impl Fn(EdgeId) -> f64 + 'w) -> Self {
        Self::new(weigher).with_adjacency(Adjacency::Outgoing)
    }

    /// Creates an iterator from an already boxed weigher.
    pub fn from_boxed(weigher: EdgeWeigher<'w>) -> Self {
        Self {
            weigher,
            node_weigher: None,
            adjacency: Adjacency::All,
            source: None,
            nodes: Vec::new(),
            queue: IndexedMinHeap::new(),
        }
    }

    /// Adds a transit cost `(node, edge_in, edge_out)` charged when a path
    /// passes through an intermediate node.
    #[must_use]
    pub fn with_node_weigher(
        mut self,
        node_weigher: impl Fn(NodeId, EdgeId, EdgeId) -> f64 + 'w,
    ) -> Self {
        self.node_weigher = Some(Box::new(node_weigher));
        self
    }

    /// Sets which incident edges are relaxed.
    #[must_use]
    pub fn with_adjacency(mut self, adjacency: Adjacency) -> Self {
        self.adjacency = adjacency;
        self
    }

    /// Returns the current start node.
    pub fn source(&self) -> Option<NodeId> {
        self.source
    }

    /// Best known cost from the source to `node`; `+inf` if unreached.
    pub fn cost(&self, node: NodeId) -> f64 {
        self.nodes.get(node).map_or(f64::INFINITY, |rec| rec.cost)
    }

    /// Predecessor of `node` on its best known path.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|rec| rec.parent)
    }

    /// Edge used to reach `node` on its best known path.
    pub fn parent_edge(&self, node: NodeId) -> Option<EdgeId> {
        self.nodes.get(node).and_then(|rec| rec.parent_edge)
    }

    /// Read-only view of the search record of `node`.
    pub fn shadow(&self, node: NodeId) -> Option<&DijkstraNode> {
        self.nodes.get(node)
    }

    /// Number of nodes still waiting to be settled.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn rebuild(&mut self, node_count: usize, source: NodeId) {
        self.nodes = (0..node_count).map(DijkstraNode::unreached).collect();
        self.nodes[source].cost = 0.0;
        self.queue = IndexedMinHeap::with_capacity(node_count);
        for rec in &self.nodes {
            self.queue.push(rec.node, rec.cost);
        }
    }
}

impl<G: Graph> GraphIterator<G> for DijkstraIterator<'_> {
    fn init(&mut self, graph: &G) -> TraversalResult<()> {
        let source = self.source.ok_or(TraversalError::MissingSource)?;
        ensure_node(graph, source)?;
        self.rebuild(graph.node_count(), source);
        Ok(())
    }

    fn next(&mut self, graph: &G) -> Option<NodeId> {
        while let Some((node, cost)) = self.queue.peek() {
            if cost == f64::INFINITY {
                // Everything left is disconnected from the source.
                return None;
            }
            self.queue.pop();
            if !graph.is_visited(node) {
                return Some(node);
            }
        }
        None
    }

    fn cont(&mut self, graph: &G, current: NodeId) -> TraversalResult<()> {
        let Some(rec) = self.nodes.get(current) else {
            tracing::warn!(node = current, "cont() on a node with no dijkstra record");
            return Err(TraversalError::UnknownNode(current));
        };
        let base = rec.cost;
        let edge_in = rec.parent_edge;

        for adj in graph.neighbors(current, self.adjacency) {
            if graph.is_visited(adj.node) {
                continue;
            }
            let mut candidate = base + (self.weigher)(adj.edge);
            if let (Some(transit), Some(edge_in)) = (&self.node_weigher, edge_in) {
                candidate += transit(current, edge_in, adj.edge);
            }

            // Nodes added to the model after `init` have no record.
            let Some(related) = self.nodes.get_mut(adj.node) else {
                tracing::trace!(node = adj.node, from = current, "skipped node without record");
                continue;
            };
            if candidate < related.cost {
                tracing::trace!(node = adj.node, from = current, cost = candidate, "relaxed");
                related.cost = candidate;
                related.parent = Some(current);
                related.parent_edge = Some(adj.edge);
                self.queue.push(adj.node, candidate);
            }
        }
        Ok(())
    }

    fn kill_branch(&mut self, _graph: &G, _current: NodeId) {}
}

impl<G: Graph> SourceIterator<G> for DijkstraIterator<'_> {
    fn set_source(&mut self, graph: &G, source: NodeId) -> TraversalResult<()> {
        ensure_node(graph, source)?;
        self.source = Some(source);
        self.rebuild(graph.node_count(), source);
        Ok(())
    }

    fn source(&self) -> Option<NodeId> {
        self.source
    }
}

impl std::fmt::Debug for DijkstraIterator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DijkstraIterator")
            .field("source", &self.source)
            .field("adjacency", &self.adjacency)
            .field("node_weigher", &self.node_weigher.is_some())
            .field("pending", &self.queue.len())
            .finish()
    }
}
