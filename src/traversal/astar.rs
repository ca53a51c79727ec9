//! A* heuristic search as an iterator.
//!
//! Records are created lazily: the source at `set_source`, every other node
//! the first time it is discovered from a settled neighbour. The open set is
//! an [`IndexedMinHeap`] keyed by `f = g + h`. Expanding a node closes it;
//! closed records are never relaxed again, which is sound for an admissible
//! and consistent heuristic.
//!
//! The iterator does not stop at the destination by itself. A driver (see
//! [`AStarPathFinder`](crate::driver::AStarPathFinder)) stops when the
//! destination is yielded.

use std::collections::HashMap;

use crate::collections::IndexedMinHeap;
use crate::error::{TraversalError, TraversalResult};
use crate::graph::{Adjacency, EdgeId, Graph, NodeId};
use crate::traversal::{ensure_node, EdgeWeigher, GraphIterator, SourceIterator};

/// Per-node search state owned by an [`AStarIterator`].
#[derive(Debug, Clone, PartialEq)]
pub struct AStarNode {
    /// The graph node this record shadows.
    pub node: NodeId,
    /// Best known path cost from the source.
    pub g: f64,
    /// Heuristic estimate of the remaining cost, computed at discovery.
    pub h: f64,
    /// Set once the node has been expanded.
    pub closed: bool,
    /// Predecessor on the best known path.
    pub parent: Option<NodeId>,
    /// Edge from `parent` to `node`.
    pub parent_edge: Option<EdgeId>,
}

impl AStarNode {
    fn discovered(node: NodeId, h: f64) -> Self {
        Self {
            node,
            g: f64::INFINITY,
            h,
            closed: false,
            parent: None,
            parent_edge: None,
        }
    }

    /// Priority key `g + h`.
    #[inline]
    pub fn f(&self) -> f64 {
        self.g + self.h
    }
}

/// Cost model and heuristic of an A* search.
pub trait AStarFunctions {
    /// True cost of moving from `from` to `to` over `edge`.
    fn cost(&self, from: &AStarNode, to: &AStarNode, edge: EdgeId) -> f64;

    /// Estimate of the remaining cost from `node` to the destination.
    ///
    /// Must never overestimate for the result to be optimal.
    fn h(&self, node: NodeId) -> f64;

    /// The node the heuristic aims at.
    fn destination(&self) -> NodeId;

    /// Retargets the heuristic.
    fn set_destination(&mut self, destination: NodeId);
}

/// Closure-backed [`AStarFunctions`].
///
/// ```
/// use graph_walk::traversal::AStarFns;
/// use graph_walk::traversal::AStarFunctions;
///
/// // Nodes on a line; the distance to the destination is admissible.
/// let fns = AStarFns::from_weigher(9, |_| 1.0, |node, dest| (dest as f64 - node as f64).abs());
/// assert_eq!(fns.h(4), 5.0);
/// ```
pub struct AStarFns<'w> {
    destination: NodeId,
    cost: Box<dyn Fn(&AStarNode, &AStarNode, EdgeId) -> f64 + 'w>,
    heuristic: Box<dyn Fn(NodeId, NodeId) -> f64 + 'w>,
}

impl<'w> AStarFns<'w> {
    /// Creates functions from a record-level cost and a heuristic
    /// `(node, destination) -> estimate`.
    pub fn new(
        destination: NodeId,
        cost: impl Fn(&AStarNode, &AStarNode, EdgeId) -> f64 + 'w,
        heuristic: impl Fn(NodeId, NodeId) -> f64 + 'w,
    ) -> Self {
        Self {
            destination,
            cost: Box::new(cost),
            heuristic: Box::new(heuristic),
        }
    }

    /// Creates functions whose cost is the weight of the connecting edge.
    pub fn from_weigher(
        destination: NodeId,
        weigher: impl Fn(EdgeId) -> f64 + 'w,
        heuristic: impl Fn(NodeId, NodeId) -> f64 + 'w,
    ) -> Self {
        Self::new(destination, move |_, _, edge| weigher(edge), heuristic)
    }

    /// Like [`from_weigher`](Self::from_weigher) with a boxed weigher.
    pub fn from_boxed_weigher(
        destination: NodeId,
        weigher: EdgeWeigher<'w>,
        heuristic: impl Fn(NodeId, NodeId) -> f64 + 'w,
    ) -> Self {
        Self::new(destination, move |_, _, edge| weigher(edge), heuristic)
    }

    /// Edge-weight cost with `h = 0`; the search degenerates to Dijkstra.
    pub fn uninformed(destination: NodeId, weigher: impl Fn(EdgeId) -> f64 + 'w) -> Self {
        Self::from_weigher(destination, weigher, |_, _| 0.0)
    }
}

impl AStarFunctions for AStarFns<'_> {
    fn cost(&self, from: &AStarNode, to: &AStarNode, edge: EdgeId) -> f64 {
        (self.cost)(from, to, edge)
    }

    fn h(&self, node: NodeId) -> f64 {
        (self.heuristic)(node, self.destination)
    }

    fn destination(&self) -> NodeId {
        self.destination
    }

    fn set_destination(&mut self, destination: NodeId) {
        self.destination = destination;
    }
}

/// Heuristic search iterator.
pub struct AStarIterator<'w> {
    funcs: Box<dyn AStarFunctions + 'w>,
    adjacency: Adjacency,
    source: Option<NodeId>,
    nodes: HashMap<NodeId, AStarNode>,
    open: IndexedMinHeap,
}

impl<'w> AStarIterator<'w> {
    /// Creates an iterator that follows every incident edge.
    pub fn new(funcs: impl AStarFunctions + 'w) -> Self {
        Self {
            funcs: Box::new(funcs),
            adjacency: Adjacency::All,
            source: None,
            nodes: HashMap::new(),
            open: IndexedMinHeap::new(),
        }
    }

    /// Creates an iterator that follows outgoing edges only.
    pub fn directed(funcs: impl AStarFunctions + 'w) -> Self {
        Self::new(funcs).with_adjacency(Adjacency::Outgoing)
    }

    /// Sets which incident edges are expanded.
    #[must_use]
    pub fn with_adjacency(mut self, adjacency: Adjacency) -> Self {
        self.adjacency = adjacency;
        self
    }

    /// Returns the current start node.
    pub fn source(&self) -> Option<NodeId> {
        self.source
    }

    /// The node the heuristic aims at.
    pub fn destination(&self) -> NodeId {
        self.funcs.destination()
    }

    /// Retargets the search.
    ///
    /// Heuristic values already computed keep their old target; call
    /// `set_source` again before the next run.
    pub fn set_destination(&mut self, destination: NodeId) {
        self.funcs.set_destination(destination);
    }

    /// Best known cost from the source to `node`; `+inf` if undiscovered.
    pub fn cost(&self, node: NodeId) -> f64 {
        self.nodes.get(&node).map_or(f64::INFINITY, |rec| rec.g)
    }

    /// Predecessor of `node` on its best known path.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|rec| rec.parent)
    }

    /// Edge used to reach `node` on its best known path.
    pub fn parent_edge(&self, node: NodeId) -> Option<EdgeId> {
        self.nodes.get(&node).and_then(|rec| rec.parent_edge)
    }

    /// Read-only view of the search record of `node`.
    pub fn shadow(&self, node: NodeId) -> Option<&AStarNode> {
        self.nodes.get(&node)
    }

    /// Number of discovered nodes (open and closed).
    pub fn discovered(&self) -> usize {
        self.nodes.len()
    }

    /// Number of nodes in the open set.
    pub fn pending(&self) -> usize {
        self.open.len()
    }

    fn reseed(&mut self, node_count: usize, source: NodeId) {
        self.nodes.clear();
        self.open = IndexedMinHeap::with_capacity(node_count);

        let mut rec = AStarNode::discovered(source, self.funcs.h(source));
        rec.g = 0.0;
        self.open.push(source, rec.f());
        self.nodes.insert(source, rec);
    }
}

impl<G: Graph> GraphIterator<G> for AStarIterator<'_> {
    fn init(&mut self, graph: &G) -> TraversalResult<()> {
        let source = self.source.ok_or(TraversalError::MissingSource)?;
        ensure_node(graph, source)?;
        self.reseed(graph.node_count(), source);
        Ok(())
    }

    fn next(&mut self, graph: &G) -> Option<NodeId> {
        while let Some((node, _)) = self.open.pop() {
            let closed = self.nodes.get(&node).is_some_and(|rec| rec.closed);
            if !closed && !graph.is_visited(node) {
                return Some(node);
            }
        }
        None
    }

    fn cont(&mut self, graph: &G, current: NodeId) -> TraversalResult<()> {
        let Some(rec) = self.nodes.get_mut(&current) else {
            tracing::warn!(node = current, "cont() on a node with no A* record");
            return Err(TraversalError::UnknownNode(current));
        };
        rec.closed = true;
        let cur = rec.clone();

        for adj in graph.neighbors(current, self.adjacency) {
            if graph.is_visited(adj.node) {
                continue;
            }
            match self.nodes.get_mut(&adj.node) {
                Some(related) if related.closed => {}
                Some(related) => {
                    let g = cur.g + self.funcs.cost(&cur, related, adj.edge);
                    if g < related.g {
                        tracing::trace!(node = adj.node, from = current, g, "relaxed");
                        related.g = g;
                        related.parent = Some(current);
                        related.parent_edge = Some(adj.edge);
                        self.open.push(adj.node, related.f());
                    }
                }
                None => {
                    let mut related = AStarNode::discovered(adj.node, self.funcs.h(adj.node));
                    related.g = cur.g + self.funcs.cost(&cur, &related, adj.edge);
                    related.parent = Some(current);
                    related.parent_edge = Some(adj.edge);
                    tracing::trace!(
                        node = adj.node,
                        from = current,
                        g = related.g,
                        h = related.h,
                        "discovered"
                    );
                    self.open.push(adj.node, related.f());
                    self.nodes.insert(adj.node, related);
                }
            }
        }
        Ok(())
    }

    fn kill_branch(&mut self, graph: &G, current: NodeId) {
        if graph.contains_node(current) && graph.is_visited(current) {
            if let Some(rec) = self.nodes.get_mut(&current) {
                rec.closed = true;
            }
        }
    }
}

impl<G: Graph> SourceIterator<G> for AStarIterator<'_> {
    fn set_source(&mut self, graph: &G, source: NodeId) -> TraversalResult<()> {
        ensure_node(graph, source)?;
        self.source = Some(source);
        self.reseed(graph.node_count(), source);
        Ok(())
    }

    fn source(&self) -> Option<NodeId> {
        self.source
    }
}

impl std::fmt::Debug for AStarIterator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AStarIterator")
            .field("source", &self.source)
            .field("destination", &self.funcs.destination())
            .field("adjacency", &self.adjacency)
            .field("discovered", &self.nodes.len())
            .field("open", &self.open.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{AdjListGraph, Directed};

    fn search<G: Graph>(graph: &G, it: &mut AStarIterator<'_>, source: NodeId) -> Vec<NodeId> {
        graph.clear_marks();
        it.set_source(graph, source).unwrap();
        it.init(graph).unwrap();
        let dest = it.destination();
        let mut order = Vec::new();
        while let Some(n) = it.next(graph) {
            graph.set_visited(n, true);
            order.push(n);
            if n == dest {
                break;
            }
            it.cont(graph, n).unwrap();
        }
        order
    }

    // A 4x4 grid, node = row * 4 + col, unit weights.
    fn grid() -> AdjListGraph<(), f64> {
        let mut edges = Vec::new();
        for r in 0..4 {
            for c in 0..4 {
                let n = r * 4 + c;
                if c < 3 {
                    edges.push((n, n + 1, 1.0));
                }
                if r < 3 {
                    edges.push((n, n + 4, 1.0));
                }
            }
        }
        AdjListGraph::from_edges(16, edges)
    }

    fn manhattan(node: NodeId, dest: NodeId) -> f64 {
        let (r1, c1) = (node / 4, node % 4);
        let (r2, c2) = (dest / 4, dest % 4);
        (r1.abs_diff(r2) + c1.abs_diff(c2)) as f64
    }

    #[test]
    fn test_grid_shortest_path() {
        let g = grid();
        let mut it = AStarIterator::new(AStarFns::from_weigher(15, g.edge_weigher(), manhattan));
        let order = search(&g, &mut it, 0);

        assert_eq!(order.last(), Some(&15));
        assert_eq!(it.cost(15), 6.0);

        let mut hops = 0;
        let mut cur = 15;
        while let Some(p) = it.parent(cur) {
            cur = p;
            hops += 1;
        }
        assert_eq!((cur, hops), (0, 6));
    }

    #[test]
    fn test_relaxation_prefers_cheaper_route() {
        // 0 -> 1 (1), 1 -> 3 (1), 0 -> 2 (0.5), 2 -> 1 (0.1)
        let g: AdjListGraph<(), f64, Directed> =
            AdjListGraph::from_edges(4, [(0, 1, 1.0), (1, 3, 1.0), (0, 2, 0.5), (2, 1, 0.1)]);
        let mut it = AStarIterator::directed(AStarFns::uninformed(3, g.edge_weigher()));
        search(&g, &mut it, 0);

        assert!((it.cost(1) - 0.6).abs() < 1e-12);
        assert_eq!(it.parent(1), Some(2));
        assert_eq!(it.parent_edge(1), Some(3));
        assert!((it.cost(3) - 1.6).abs() < 1e-12);
    }

    #[test]
    fn test_unreachable_destination_exhausts() {
        let g: AdjListGraph<(), f64> = AdjListGraph::from_edges(3, [(0, 1, 1.0)]);
        let mut it = AStarIterator::new(AStarFns::uninformed(2, g.edge_weigher()));
        assert_eq!(search(&g, &mut it, 0), vec![0, 1]);
        assert_eq!(it.cost(2), f64::INFINITY);
        assert!(it.shadow(2).is_none());
    }

    #[test]
    fn test_closed_records_and_errors() {
        let g: AdjListGraph<(), f64> = AdjListGraph::from_edges(2, [(0, 1, 1.0)]);
        let mut it = AStarIterator::new(AStarFns::uninformed(1, |_| 1.0));
        assert!(matches!(it.init(&g), Err(TraversalError::MissingSource)));

        it.set_source(&g, 0).unwrap();
        assert!(matches!(it.cont(&g, 1), Err(TraversalError::UnknownNode(1))));

        let n = it.next(&g).unwrap();
        g.set_visited(n, true);
        it.kill_branch(&g, n);
        assert!(it.shadow(0).is_some_and(|rec| rec.closed));
        assert_eq!(it.next(&g), None);
    }

    #[test]
    fn test_retarget() {
        let g = grid();
        let mut it = AStarIterator::new(AStarFns::from_weigher(15, g.edge_weigher(), manhattan));
        search(&g, &mut it, 0);
        it.set_destination(3);
        assert_eq!(it.destination(), 3);
        let order = search(&g, &mut it, 0);
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert_eq!(it.cost(3), 3.0);
    }
}
