//! Shortest-path finders built on [`BasicTraversal`].
//!
//! Both finders run a full walk once (`calculate`) and then rebuild paths by
//! following predecessor links from the destination back to the source.

use serde::{Deserialize, Serialize};

use crate::driver::{BasicTraversal, TraversalOutcome, WalkControl};
use crate::error::{TraversalError, TraversalResult};
use crate::graph::{Adjacency, EdgeId, Graph, NodeId};
use crate::traversal::{AStarFunctions, AStarIterator, DijkstraIterator};

/// A walk from a source to a destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    nodes: Vec<NodeId>,
    edges: Vec<EdgeId>,
    cost: f64,
}

impl Path {
    /// Nodes from source to destination, both included.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Edges in walking order; one fewer than the nodes.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Total cost reported by the search.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if source and destination coincide.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// First node of the path.
    pub fn source(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    /// Last node of the path.
    pub fn destination(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }
}

/// Follows `link` from `destination` until `source` is reached.
///
/// `limit` bounds the number of hops so corrupted predecessor links cannot
/// loop forever.
fn trace_back(
    source: NodeId,
    destination: NodeId,
    cost: f64,
    limit: usize,
    link: impl Fn(NodeId) -> Option<(NodeId, EdgeId)>,
) -> Option<Path> {
    let mut nodes = vec![destination];
    let mut edges = Vec::new();
    let mut current = destination;

    while current != source {
        if edges.len() >= limit {
            tracing::warn!(source, destination, "predecessor chain does not reach the source");
            return None;
        }
        let (parent, edge) = link(current)?;
        nodes.push(parent);
        edges.push(edge);
        current = parent;
    }

    nodes.reverse();
    edges.reverse();
    Some(Path { nodes, edges, cost })
}

/// Single-source shortest paths via Dijkstra.
///
/// ```
/// use graph_walk::driver::ShortestPathFinder;
/// use graph_walk::graph::{AdjListGraph, Directed};
///
/// let g: AdjListGraph<(), u32, Directed> =
///     AdjListGraph::from_edges(3, [(0, 1, 4), (0, 2, 1), (2, 1, 1)]);
/// let mut finder = ShortestPathFinder::new(&g, 0, g.edge_weigher());
/// finder.calculate().unwrap();
///
/// let path = finder.path(1).unwrap();
/// assert_eq!(path.nodes(), &[0, 2, 1]);
/// assert_eq!(path.cost(), 2.0);
/// ```
#[derive(Debug)]
pub struct ShortestPathFinder<'g, 'w, G> {
    traversal: BasicTraversal<'g, G, DijkstraIterator<'w>>,
    source: NodeId,
}

impl<'g, 'w, G: Graph> ShortestPathFinder<'g, 'w, G> {
    /// Creates a finder that follows outgoing edges on a directed graph and
    /// every edge otherwise.
    pub fn new(graph: &'g G, source: NodeId, weigher: impl Fn(EdgeId) -> f64 + 'w) -> Self {
        let adjacency = if graph.is_directed() {
            Adjacency::Outgoing
        } else {
            Adjacency::All
        };
        Self::from_iterator(graph, source, DijkstraIterator::new(weigher).with_adjacency(adjacency))
    }

    /// Creates a finder around a configured iterator.
    pub fn from_iterator(graph: &'g G, source: NodeId, iterator: DijkstraIterator<'w>) -> Self {
        Self {
            traversal: BasicTraversal::new(graph, iterator),
            source,
        }
    }

    /// Runs Dijkstra from the source over the whole reachable component.
    ///
    /// # Errors
    /// Fails with `NodeOutOfBounds` if the source is not in the graph.
    pub fn calculate(&mut self) -> TraversalResult<()> {
        self.traversal.set_source(self.source)?;
        self.traversal.init()?;
        self.traversal.traverse(&mut |_: &G, _: NodeId| WalkControl::Continue)?;
        tracing::debug!(
            source = self.source,
            settled = self.traversal.visits(),
            "shortest paths calculated"
        );
        Ok(())
    }

    /// Cost from the source to `destination`; `+inf` if unreachable.
    pub fn cost(&self, destination: NodeId) -> f64 {
        self.traversal.iterator().cost(destination)
    }

    /// Shortest path from the source to `destination`.
    ///
    /// # Errors
    /// Fails with `PathNotFound` if `destination` was not reached.
    pub fn path(&self, destination: NodeId) -> TraversalResult<Path> {
        let it = self.traversal.iterator();
        let not_found = TraversalError::PathNotFound {
            from: self.source,
            to: destination,
        };
        let cost = it.cost(destination);
        if cost.is_infinite() {
            return Err(not_found);
        }
        trace_back(
            self.source,
            destination,
            cost,
            self.traversal.graph().node_count(),
            |node| it.parent(node).zip(it.parent_edge(node)),
        )
        .ok_or(not_found)
    }

    /// The underlying iterator, for raw cost and predecessor queries.
    pub fn iterator(&self) -> &DijkstraIterator<'w> {
        self.traversal.iterator()
    }
}

/// Point-to-point shortest path via A*.
///
/// The walk stops as soon as the destination is yielded.
#[derive(Debug)]
pub struct AStarPathFinder<'g, 'w, G> {
    traversal: BasicTraversal<'g, G, AStarIterator<'w>>,
    source: NodeId,
    reached: bool,
}

impl<'g, 'w, G: Graph> AStarPathFinder<'g, 'w, G> {
    /// Creates a finder; the destination is taken from `funcs`.
    pub fn new(graph: &'g G, source: NodeId, funcs: impl AStarFunctions + 'w) -> Self {
        let iterator = if graph.is_directed() {
            AStarIterator::directed(funcs)
        } else {
            AStarIterator::new(funcs)
        };
        Self::from_iterator(graph, source, iterator)
    }

    /// Creates a finder around a configured iterator.
    pub fn from_iterator(graph: &'g G, source: NodeId, iterator: AStarIterator<'w>) -> Self {
        Self {
            traversal: BasicTraversal::new(graph, iterator),
            source,
            reached: false,
        }
    }

    /// The node the search aims at.
    pub fn destination(&self) -> NodeId {
        self.traversal.iterator().destination()
    }

    /// Searches until the destination is reached.
    ///
    /// # Errors
    /// Fails with `PathNotFound` if the search exhausts without reaching the
    /// destination, or `NodeOutOfBounds` if the source is not in the graph.
    pub fn calculate(&mut self) -> TraversalResult<()> {
        let destination = self.destination();
        self.reached = false;
        self.traversal.set_source(self.source)?;
        self.traversal.init()?;
        let outcome = self.traversal.traverse(&mut |_: &G, node: NodeId| {
            if node == destination {
                WalkControl::Stop
            } else {
                WalkControl::Continue
            }
        })?;

        tracing::debug!(
            source = self.source,
            destination,
            expanded = self.traversal.visits(),
            ?outcome,
            "astar search finished"
        );
        if outcome != TraversalOutcome::Stopped {
            return Err(TraversalError::PathNotFound {
                from: self.source,
                to: destination,
            });
        }
        self.reached = true;
        Ok(())
    }

    /// The path found by the last successful `calculate`.
    ///
    /// # Errors
    /// Fails with `PathNotFound` if no search has reached the destination.
    pub fn path(&self) -> TraversalResult<Path> {
        let destination = self.destination();
        let not_found = TraversalError::PathNotFound {
            from: self.source,
            to: destination,
        };
        if !self.reached {
            return Err(not_found);
        }
        let it = self.traversal.iterator();
        trace_back(
            self.source,
            destination,
            it.cost(destination),
            self.traversal.graph().node_count(),
            |node| it.parent(node).zip(it.parent_edge(node)),
        )
        .ok_or(not_found)
    }

    /// The underlying iterator.
    pub fn iterator(&self) -> &AStarIterator<'w> {
        self.traversal.iterator()
    }
}
