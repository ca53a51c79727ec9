//! The graph model consumed by every traversal strategy.
//!
//! Nodes and edges are indices into an arena owned by the model. The
//! per-node scratch fields used during a walk (`visited` and `counter`) live
//! in parallel arrays next to the topology and are written through shared
//! references, so a driver and an iterator can both hold `&G` while walking.
//!
//! - `marks`: the scratch field storage ([`NodeMarks`])
//! - `adj_list`: an arena-backed reference model ([`AdjListGraph`])

pub mod adj_list;
pub mod marks;

pub use adj_list::{AdjListGraph, Directed, EdgeType, GraphSpec, Undirected};
pub use marks::NodeMarks;

/// Index of a node in the graph arena.
pub type NodeId = usize;

/// Index of an edge in the graph arena.
pub type EdgeId = usize;

/// Which incident edges a neighbour query follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Adjacency {
    /// Every incident edge, regardless of direction.
    #[default]
    All,
    /// Edges leaving the node. Same as `All` on an undirected graph.
    Outgoing,
    /// Edges entering the node. Same as `All` on an undirected graph.
    Incoming,
}

/// A neighbour reached over a specific edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Adjacent {
    /// The node at the other end of `edge`.
    pub node: NodeId,
    /// The edge that connects the queried node to `node`.
    pub edge: EdgeId,
}

/// The capability set a graph model exposes to traversal strategies.
///
/// Implementations yield one [`Adjacent`] per incident edge, so a pair of
/// nodes joined by two parallel edges appears twice in a neighbour query.
///
/// ### Contract
/// | Method | Used by |
/// |--------|---------|
/// | `neighbors` / `related` | every strategy |
/// | `degree` | undirected topological, chain walk |
/// | `in_degree` | directed topological |
/// | `edge_between` | callers building weights or paths |
/// | `is_visited` / `set_visited` | driver writes, strategies read |
/// | `counter` / `set_counter` | topological strategies |
pub trait Graph {
    /// Number of nodes in the arena.
    fn node_count(&self) -> usize;

    /// Number of edges in the arena.
    fn edge_count(&self) -> usize;

    /// Returns `true` if edges have a direction.
    fn is_directed(&self) -> bool;

    /// Iterates the neighbours of `node` reachable under `adjacency`.
    fn neighbors(&self, node: NodeId, adjacency: Adjacency) -> impl Iterator<Item = Adjacent> + '_;

    /// Iterates every node related to `node` through any incident edge.
    fn related(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.neighbors(node, Adjacency::All).map(|adj| adj.node)
    }

    /// Iterates the targets of edges leaving `node`.
    fn out_related(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.neighbors(node, Adjacency::Outgoing).map(|adj| adj.node)
    }

    /// Iterates the sources of edges entering `node`.
    fn in_related(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.neighbors(node, Adjacency::Incoming).map(|adj| adj.node)
    }

    /// Number of incident edge ends.
    fn degree(&self, node: NodeId) -> usize;

    /// Number of edges entering `node` (equals `degree` when undirected).
    fn in_degree(&self, node: NodeId) -> usize;

    /// Number of edges leaving `node` (equals `degree` when undirected).
    fn out_degree(&self, node: NodeId) -> usize;

    /// Returns an edge from `a` to `b`, if one exists.
    ///
    /// On a directed graph only edges oriented `a -> b` qualify.
    fn edge_between(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        self.neighbors(a, Adjacency::Outgoing)
            .find(|adj| adj.node == b)
            .map(|adj| adj.edge)
    }

    /// Returns the `(source, target)` endpoints of an edge.
    fn edge_endpoints(&self, edge: EdgeId) -> (NodeId, NodeId);

    /// Returns the scratch field storage.
    fn marks(&self) -> &NodeMarks;

    /// Returns `true` if the driver has marked `node` visited.
    #[inline]
    fn is_visited(&self, node: NodeId) -> bool {
        self.marks().is_visited(node)
    }

    /// Sets the visited flag of `node`.
    #[inline]
    fn set_visited(&self, node: NodeId, visited: bool) {
        self.marks().set_visited(node, visited);
    }

    /// Reads the topological counter of `node`.
    #[inline]
    fn counter(&self, node: NodeId) -> usize {
        self.marks().counter(node)
    }

    /// Writes the topological counter of `node`.
    #[inline]
    fn set_counter(&self, node: NodeId, value: usize) {
        self.marks().set_counter(node, value);
    }

    /// Clears every visited flag and counter.
    fn clear_marks(&self) {
        self.marks().clear();
    }

    /// Returns `true` if `node` is a valid index.
    #[inline]
    fn contains_node(&self, node: NodeId) -> bool {
        node < self.node_count()
    }
}
