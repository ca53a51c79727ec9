//! Arena-backed adjacency list graph.
//!
//! Node payloads, edge records and incidence lists are stored in dense
//! vectors indexed by `NodeId` / `EdgeId`, with the scratch fields in a
//! parallel [`NodeMarks`]. This is the reference implementation of [`Graph`]
//! used by the drivers, tests and benches; any other model that implements
//! the trait works with every strategy.
//!
//! # Layout
//! - `edges`: `(source, target, weight)` records in insertion order
//! - `outgoing[n]`: edges leaving `n` (every incident edge when undirected)
//! - `incoming[n]`: edges entering `n` (empty when undirected)
//!
//! Undirected edges are registered in the incidence list of both endpoints;
//! a self-loop therefore contributes two to the degree of its node.

use std::marker::PhantomData;

use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{TraversalError, TraversalResult};
use crate::graph::{Adjacency, Adjacent, EdgeId, Graph, NodeId, NodeMarks};
use crate::traversal::EdgeWeigher;

/// Marker trait for graph edge directionality.
pub trait EdgeType {
    /// Returns true if the graph is directed.
    fn is_directed() -> bool;
}

/// Marker for directed graphs.
#[derive(Debug, Clone, Copy)]
pub struct Directed;
/// Marker for undirected graphs.
#[derive(Debug, Clone, Copy)]
pub struct Undirected;

impl EdgeType for Directed {
    fn is_directed() -> bool {
        true
    }
}
impl EdgeType for Undirected {
    fn is_directed() -> bool {
        false
    }
}

/// A stored edge.
#[derive(Debug, Clone)]
pub struct EdgeRecord<E> {
    /// Tail of the edge (either endpoint when undirected).
    pub source: NodeId,
    /// Head of the edge.
    pub target: NodeId,
    /// Edge payload.
    pub weight: E,
}

impl<E> EdgeRecord<E> {
    /// Returns the endpoint opposite to `node`.
    #[inline]
    fn other(&self, node: NodeId) -> NodeId {
        if self.source == node {
            self.target
        } else {
            self.source
        }
    }
}

/// Serializable edge list used to load fixtures.
///
/// ```
/// use graph_walk::graph::GraphSpec;
///
/// let spec: GraphSpec = serde_json::from_str(
///     r#"{ "nodes": 3, "edges": [ { "source": 0, "target": 1, "weight": 2.5 },
///                                 { "source": 1, "target": 2 } ] }"#,
/// ).unwrap();
/// assert_eq!(spec.edges[1].weight, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSpec {
    /// Number of nodes; ids are `0..nodes`.
    pub nodes: usize,
    /// Edges in insertion order.
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

/// One edge of a [`GraphSpec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    /// Tail node.
    pub source: NodeId,
    /// Head node.
    pub target: NodeId,
    /// Defaults to `1.0` when omitted.
    #[serde(default = "EdgeSpec::default_weight")]
    pub weight: f64,
}

impl EdgeSpec {
    fn default_weight() -> f64 {
        1.0
    }
}

/// An adjacency list graph over an index arena.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `add_node` | \(O(1)\) amortized | |
/// | `add_edge` | \(O(1)\) amortized | |
/// | `neighbors` | \(O(1)\) per item | Walks the incidence list |
/// | `degree` / `in_degree` | \(O(1)\) | Incidence list length |
/// | `edge_between` | \(O(\text{out-degree})\) | Linear scan |
#[derive(Debug, Clone)]
pub struct AdjListGraph<V, E, Ty = Undirected> {
    nodes: Vec<V>,
    edges: Vec<EdgeRecord<E>>,
    outgoing: Vec<Vec<EdgeId>>,
    incoming: Vec<Vec<EdgeId>>,
    marks: NodeMarks,
    _marker: PhantomData<Ty>,
}

impl<V, E> AdjListGraph<V, E, Undirected> {
    /// Creates a new empty undirected graph.
    pub fn new_undirected() -> Self {
        Self::with_capacity(0, 0)
    }
}

impl<V, E> AdjListGraph<V, E, Directed> {
    /// Creates a new empty directed graph.
    pub fn new_directed() -> Self {
        Self::with_capacity(0, 0)
    }
}

impl<V, E, Ty: EdgeType> AdjListGraph<V, E, Ty> {
    /// Creates an empty graph with room for `nodes` nodes and `edges` edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
            outgoing: Vec::with_capacity(nodes),
            incoming: Vec::with_capacity(nodes),
            marks: NodeMarks::new(0),
            _marker: PhantomData,
        }
    }

    /// Adds a node and returns its id.
    pub fn add_node(&mut self, value: V) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(value);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        self.marks.push();
        id
    }

    /// Adds an edge and returns its id.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is out of bounds.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, weight: E) -> EdgeId {
        match self.try_add_edge(source, target, weight) {
            Ok(id) => id,
            Err(err) => panic!("{err}"),
        }
    }

    /// Adds an edge, failing if either endpoint is out of bounds.
    pub fn try_add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        weight: E,
    ) -> TraversalResult<EdgeId> {
        let id = self.edges.len();
        let len = self.nodes.len();
        for node in [source, target] {
            if node >= len {
                return Err(TraversalError::DanglingEdge {
                    edge: id,
                    node,
                    len,
                });
            }
        }

        self.edges.push(EdgeRecord {
            source,
            target,
            weight,
        });
        self.outgoing[source].push(id);
        if Ty::is_directed() {
            self.incoming[target].push(id);
        } else {
            self.outgoing[target].push(id);
        }
        Ok(id)
    }

    /// Returns the payload of a node.
    pub fn node(&self, id: NodeId) -> Option<&V> {
        self.nodes.get(id)
    }

    /// Returns the stored record of an edge.
    pub fn edge(&self, id: EdgeId) -> Option<&EdgeRecord<E>> {
        self.edges.get(id)
    }

    /// Returns the payload of an edge.
    pub fn edge_weight(&self, id: EdgeId) -> Option<&E> {
        self.edges.get(id).map(|rec| &rec.weight)
    }

    /// Iterates all node ids.
    pub fn node_ids(&self) -> std::ops::Range<NodeId> {
        0..self.nodes.len()
    }

    /// Iterates all edge records.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &EdgeRecord<E>)> + '_ {
        self.edges.iter().enumerate()
    }

    /// Returns a weigher that reads each edge's numeric payload as `f64`.
    ///
    /// Payloads that cannot be represented (or unknown edge ids) weigh `+inf`,
    /// which makes the edge impassable for the weighted strategies.
    pub fn edge_weigher(&self) -> EdgeWeigher<'_>
    where
        E: ToPrimitive,
    {
        Box::new(move |edge| {
            self.edges
                .get(edge)
                .and_then(|rec| rec.weight.to_f64())
                .unwrap_or(f64::INFINITY)
        })
    }

    /// Builds a graph with `nodes` unit nodes from `(source, target, weight)` triples.
    ///
    /// # Panics
    ///
    /// Panics if an edge references a node index out of bounds.
    pub fn from_edges<I>(nodes: usize, edges: I) -> Self
    where
        V: Default,
        I: IntoIterator<Item = (NodeId, NodeId, E)>,
    {
        let mut graph = Self::with_capacity(nodes, 0);
        for _ in 0..nodes {
            graph.add_node(V::default());
        }
        for (a, b, w) in edges {
            graph.add_edge(a, b, w);
        }
        graph
    }
}

impl<Ty: EdgeType> AdjListGraph<(), f64, Ty> {
    /// Builds a graph from a serializable edge list.
    pub fn from_spec(spec: &GraphSpec) -> TraversalResult<Self> {
        let mut graph = Self::with_capacity(spec.nodes, spec.edges.len());
        for _ in 0..spec.nodes {
            graph.add_node(());
        }
        for edge in &spec.edges {
            graph.try_add_edge(edge.source, edge.target, edge.weight)?;
        }
        Ok(graph)
    }

    /// Parses a JSON [`GraphSpec`] and builds the graph.
    pub fn from_json(json: &str) -> TraversalResult<Self> {
        let spec: GraphSpec = serde_json::from_str(json)?;
        Self::from_spec(&spec)
    }

    /// Exports the topology as a [`GraphSpec`].
    pub fn to_spec(&self) -> GraphSpec {
        GraphSpec {
            nodes: self.nodes.len(),
            edges: self
                .edges
                .iter()
                .map(|rec| EdgeSpec {
                    source: rec.source,
                    target: rec.target,
                    weight: rec.weight,
                })
                .collect(),
        }
    }
}

impl<V, E> Default for AdjListGraph<V, E, Undirected> {
    fn default() -> Self {
        Self::new_undirected()
    }
}

/// Iterator over the neighbours of a node.
///
/// Walks up to two incidence lists back to back and resolves the far endpoint
/// of each edge.
pub struct Neighbors<'a, E> {
    edges: &'a [EdgeRecord<E>],
    node: NodeId,
    first: std::slice::Iter<'a, EdgeId>,
    second: std::slice::Iter<'a, EdgeId>,
}

impl<'a, E> Iterator for Neighbors<'a, E> {
    type Item = Adjacent;

    fn next(&mut self) -> Option<Self::Item> {
        let edge = *self.first.next().or_else(|| self.second.next())?;
        let node = self.edges[edge].other(self.node);
        Some(Adjacent { node, edge })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.first.len() + self.second.len();
        (n, Some(n))
    }
}

impl<V, E, Ty: EdgeType> Graph for AdjListGraph<V, E, Ty> {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn is_directed(&self) -> bool {
        Ty::is_directed()
    }

    fn neighbors(&self, node: NodeId, adjacency: Adjacency) -> impl Iterator<Item = Adjacent> + '_ {
        const EMPTY: &[EdgeId] = &[];
        let out = self.outgoing[node].as_slice();
        let inc = self.incoming[node].as_slice();
        let (first, second) = match adjacency {
            _ if !Ty::is_directed() => (out, EMPTY),
            Adjacency::All => (out, inc),
            Adjacency::Outgoing => (out, EMPTY),
            Adjacency::Incoming => (inc, EMPTY),
        };
        Neighbors {
            edges: &self.edges,
            node,
            first: first.iter(),
            second: second.iter(),
        }
    }

    fn degree(&self, node: NodeId) -> usize {
        self.outgoing[node].len() + self.incoming[node].len()
    }

    fn in_degree(&self, node: NodeId) -> usize {
        if Ty::is_directed() {
            self.incoming[node].len()
        } else {
            self.outgoing[node].len()
        }
    }

    fn out_degree(&self, node: NodeId) -> usize {
        self.outgoing[node].len()
    }

    fn edge_endpoints(&self, edge: EdgeId) -> (NodeId, NodeId) {
        let rec = &self.edges[edge];
        (rec.source, rec.target)
    }

    fn marks(&self) -> &NodeMarks {
        &self.marks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undirected_adjacency() {
        // 0 - 1 - 2, plus a parallel 1 - 2 edge
        let g: AdjListGraph<(), u32> =
            AdjListGraph::from_edges(3, [(0, 1, 1), (1, 2, 1), (2, 1, 5)]);

        let mut related: Vec<_> = g.related(1).collect();
        related.sort_unstable();
        assert_eq!(related, vec![0, 2, 2]);
        assert_eq!(g.degree(1), 3);
        assert_eq!(g.in_degree(1), 3);
        assert_eq!(g.out_related(2).count(), 2);
        assert_eq!(g.edge_between(2, 1), Some(1));
        assert!(!g.is_directed());
    }

    #[test]
    fn test_directed_adjacency() {
        // 0 -> 1 -> 2, 0 -> 2
        let g: AdjListGraph<(), u32, Directed> =
            AdjListGraph::from_edges(3, [(0, 1, 1), (1, 2, 1), (0, 2, 1)]);

        assert_eq!(g.out_related(0).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(g.in_related(2).collect::<Vec<_>>(), vec![1, 0]);
        assert_eq!(g.related(1).collect::<Vec<_>>(), vec![2, 0]);
        assert_eq!(g.in_degree(2), 2);
        assert_eq!(g.out_degree(2), 0);
        assert_eq!(g.degree(1), 2);
        assert_eq!(g.edge_between(0, 2), Some(2));
        assert_eq!(g.edge_between(2, 0), None);
    }

    #[test]
    fn test_self_loop_counts_twice() {
        let g: AdjListGraph<(), ()> = AdjListGraph::from_edges(1, [(0, 0, ())]);
        assert_eq!(g.degree(0), 2);
        assert_eq!(g.related(0).collect::<Vec<_>>(), vec![0, 0]);
    }

    #[test]
    fn test_dangling_edge_rejected() {
        let mut g: AdjListGraph<(), ()> = AdjListGraph::new_undirected();
        g.add_node(());
        let err = g.try_add_edge(0, 4, ()).unwrap_err();
        assert!(matches!(err, TraversalError::DanglingEdge { node: 4, len: 1, .. }));
    }

    #[test]
    fn test_spec_loading() {
        let g = AdjListGraph::<(), f64, Directed>::from_json(
            r#"{ "nodes": 2, "edges": [ { "source": 0, "target": 1, "weight": 3.5 } ] }"#,
        )
        .unwrap();
        assert_eq!(g.edge_weight(0), Some(&3.5));
        assert_eq!(g.to_spec().edges.len(), 1);

        let err = AdjListGraph::<(), f64>::from_json(
            r#"{ "nodes": 1, "edges": [ { "source": 0, "target": 1 } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, TraversalError::DanglingEdge { .. }));
    }

    #[test]
    fn test_edge_weigher() {
        let g: AdjListGraph<(), u8> = AdjListGraph::from_edges(2, [(0, 1, 7)]);
        let w = g.edge_weigher();
        assert_eq!(w(0), 7.0);
        assert_eq!(w(9), f64::INFINITY);
    }

    #[test]
    fn test_marks_follow_nodes() {
        let mut g: AdjListGraph<&str, ()> = AdjListGraph::new_undirected();
        let a = g.add_node("a");
        let b = g.add_node("b");
        g.set_visited(b, true);
        g.set_counter(a, 3);
        assert!(g.is_visited(b));
        assert_eq!(g.counter(a), 3);
        g.clear_marks();
        assert!(!g.is_visited(b));
        assert_eq!(g.counter(a), 0);
    }
}
