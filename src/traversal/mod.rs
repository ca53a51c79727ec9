//! The iterator protocol and every traversal strategy.
//!
//! A driver walks a graph by repeatedly asking an iterator for the next
//! node, marking it visited, and then either letting the iterator expand it
//! (`cont`) or pruning it (`kill_branch`):
//!
//! ```text
//! init ─▶ next ─▶ set_visited ─▶ visit ─┬─▶ cont ────────┐
//!          ▲                            └─▶ kill_branch ─┤
//!          └─────────────────────────────────────────────┘   until next == None
//! ```
//!
//! Strategies:
//! - `simple`: breadth-first and depth-first, undirected or directed
//! - `topological`: counter-driven topological order, undirected or directed
//! - `dijkstra`: single-source shortest paths
//! - `astar`: heuristic shortest path to a destination
//! - `no_bifurcation`: walk along a chain until it branches
//! - `strategy`: a closed enum over all of the above

pub mod astar;
pub mod dijkstra;
pub mod no_bifurcation;
pub mod simple;
pub mod strategy;
pub mod topological;

pub use astar::{AStarFns, AStarFunctions, AStarIterator, AStarNode};
pub use dijkstra::{DijkstraIterator, DijkstraNode};
pub use no_bifurcation::NoBifurcationIterator;
pub use simple::SimpleIterator;
pub use strategy::Strategy;
pub use topological::TopologicalIterator;

use crate::error::{TraversalError, TraversalResult};
use crate::graph::{EdgeId, Graph, NodeId};

/// Maps an edge to its traversal cost.
pub type EdgeWeigher<'w> = Box<dyn Fn(EdgeId) -> f64 + 'w>;

/// Extra cost of passing through a node, given the edge used to enter it and
/// the edge used to leave it: `(node, edge_in, edge_out)`.
pub type NodeWeigher<'w> = Box<dyn Fn(NodeId, EdgeId, EdgeId) -> f64 + 'w>;

/// The protocol every traversal strategy implements.
///
/// Iterators never own the graph; every call receives it by shared
/// reference. Visited flags are written by the driver between `next` and
/// `cont` and only read here.
pub trait GraphIterator<G: Graph> {
    /// One-time setup before iteration begins.
    fn init(&mut self, graph: &G) -> TraversalResult<()>;

    /// Returns the next node to visit, or `None` when the walk is exhausted.
    fn next(&mut self, graph: &G) -> Option<NodeId>;

    /// Expands `current`, which the driver has just marked visited.
    ///
    /// # Errors
    /// Fails if the iterator has no record of `current`.
    fn cont(&mut self, graph: &G, current: NodeId) -> TraversalResult<()>;

    /// Declines to expand `current`. Other pending nodes are still yielded.
    fn kill_branch(&mut self, graph: &G, current: NodeId);
}

/// A strategy rooted at a single source node.
pub trait SourceIterator<G: Graph>: GraphIterator<G> {
    /// Designates the start node and resets internal queues.
    ///
    /// May be called repeatedly to reuse one iterator for several runs.
    fn set_source(&mut self, graph: &G, source: NodeId) -> TraversalResult<()>;

    /// Returns the current start node.
    fn source(&self) -> Option<NodeId>;
}

/// Fails with `NodeOutOfBounds` unless `node` belongs to `graph`.
pub(crate) fn ensure_node<G: Graph>(graph: &G, node: NodeId) -> TraversalResult<()> {
    if graph.contains_node(node) {
        Ok(())
    } else {
        Err(TraversalError::NodeOutOfBounds {
            node,
            len: graph.node_count(),
        })
    }
}
