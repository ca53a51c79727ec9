//! A closed enum over every strategy.
//!
//! Lets callers pick a strategy at runtime (for example from configuration)
//! and hand it to a driver without boxing a trait object. The enum itself
//! implements the iterator protocol by delegating to the wrapped strategy.

use crate::collections::QueueKind;
use crate::error::TraversalResult;
use crate::graph::{Adjacency, EdgeId, Graph, NodeId};
use crate::traversal::{
    AStarFunctions, AStarIterator, DijkstraIterator, GraphIterator, NoBifurcationIterator,
    SimpleIterator, SourceIterator, TopologicalIterator,
};

/// Any traversal strategy.
#[derive(Debug)]
pub enum Strategy<'w> {
    /// Breadth-first or depth-first.
    Simple(SimpleIterator),
    /// Counter-driven topological order.
    Topological(TopologicalIterator),
    /// Single-source shortest paths.
    Dijkstra(DijkstraIterator<'w>),
    /// Heuristic search towards a destination.
    AStar(AStarIterator<'w>),
    /// Chain walk.
    NoBifurcation(NoBifurcationIterator),
}

macro_rules! dispatch {
    ($strategy:expr, $it:ident => $body:expr) => {
        match $strategy {
            Strategy::Simple($it) => $body,
            Strategy::Topological($it) => $body,
            Strategy::Dijkstra($it) => $body,
            Strategy::AStar($it) => $body,
            Strategy::NoBifurcation($it) => $body,
        }
    };
}

impl<'w> Strategy<'w> {
    /// Breadth-first over every incident edge.
    pub fn breadth_first() -> Self {
        Self::Simple(SimpleIterator::breadth_first())
    }

    /// Depth-first over every incident edge.
    pub fn depth_first() -> Self {
        Self::Simple(SimpleIterator::depth_first())
    }

    /// Breadth-first over outgoing edges.
    pub fn directed_breadth_first() -> Self {
        Self::Simple(SimpleIterator::directed_breadth_first())
    }

    /// Depth-first over outgoing edges.
    pub fn directed_depth_first() -> Self {
        Self::Simple(SimpleIterator::directed_depth_first())
    }

    /// Undirected topological order with the given tie-break.
    pub fn topological(kind: QueueKind) -> Self {
        Self::Topological(TopologicalIterator::new(kind, false))
    }

    /// In-degree driven topological order with the given tie-break.
    pub fn directed_topological(kind: QueueKind) -> Self {
        Self::Topological(TopologicalIterator::new(kind, true))
    }

    /// Dijkstra over every incident edge.
    pub fn dijkstra(weigher: impl Fn(EdgeId) -> f64 + 'w) -> Self {
        Self::Dijkstra(DijkstraIterator::new(weigher))
    }

    /// A* over every incident edge.
    pub fn astar(funcs: impl AStarFunctions + 'w) -> Self {
        Self::AStar(AStarIterator::new(funcs))
    }

    /// Chain walk.
    pub fn no_bifurcation() -> Self {
        Self::NoBifurcation(NoBifurcationIterator::new())
    }

    /// Short name of the wrapped strategy, used in log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Simple(it) => match (it.kind(), it.adjacency()) {
                (QueueKind::Fifo, Adjacency::All) => "breadth_first",
                (QueueKind::Lifo, Adjacency::All) => "depth_first",
                (QueueKind::Fifo, _) => "directed_breadth_first",
                (QueueKind::Lifo, _) => "directed_depth_first",
            },
            Self::Topological(it) if it.is_directed() => "directed_topological",
            Self::Topological(_) => "topological",
            Self::Dijkstra(_) => "dijkstra",
            Self::AStar(_) => "astar",
            Self::NoBifurcation(_) => "no_bifurcation",
        }
    }

    /// Returns the current start node, if the strategy has one.
    pub fn source(&self) -> Option<NodeId> {
        match self {
            Self::Topological(_) => None,
            Self::Simple(it) => it.source(),
            Self::Dijkstra(it) => it.source(),
            Self::AStar(it) => it.source(),
            Self::NoBifurcation(it) => it.source(),
        }
    }

    /// Best known cost to `node` for the weighted strategies.
    pub fn cost(&self, node: NodeId) -> Option<f64> {
        match self {
            Self::Dijkstra(it) => Some(it.cost(node)),
            Self::AStar(it) => Some(it.cost(node)),
            _ => None,
        }
    }

    /// Predecessor of `node` for the weighted strategies.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        match self {
            Self::Dijkstra(it) => it.parent(node),
            Self::AStar(it) => it.parent(node),
            _ => None,
        }
    }
}

impl<G: Graph> GraphIterator<G> for Strategy<'_> {
    fn init(&mut self, graph: &G) -> TraversalResult<()> {
        dispatch!(self, it => it.init(graph))
    }

    fn next(&mut self, graph: &G) -> Option<NodeId> {
        dispatch!(self, it => it.next(graph))
    }

    fn cont(&mut self, graph: &G, current: NodeId) -> TraversalResult<()> {
        dispatch!(self, it => it.cont(graph, current))
    }

    fn kill_branch(&mut self, graph: &G, current: NodeId) {
        dispatch!(self, it => it.kill_branch(graph, current));
    }
}

impl<G: Graph> SourceIterator<G> for Strategy<'_> {
    fn set_source(&mut self, graph: &G, source: NodeId) -> TraversalResult<()> {
        dispatch!(self, it => it.set_source(graph, source))
    }

    fn source(&self) -> Option<NodeId> {
        Strategy::source(self)
    }
}

impl From<SimpleIterator> for Strategy<'_> {
    fn from(it: SimpleIterator) -> Self {
        Self::Simple(it)
    }
}

impl From<TopologicalIterator> for Strategy<'_> {
    fn from(it: TopologicalIterator) -> Self {
        Self::Topological(it)
    }
}

impl<'w> From<DijkstraIterator<'w>> for Strategy<'w> {
    fn from(it: DijkstraIterator<'w>) -> Self {
        Self::Dijkstra(it)
    }
}

impl<'w> From<AStarIterator<'w>> for Strategy<'w> {
    fn from(it: AStarIterator<'w>) -> Self {
        Self::AStar(it)
    }
}

impl From<NoBifurcationIterator> for Strategy<'_> {
    fn from(it: NoBifurcationIterator) -> Self {
        Self::NoBifurcation(it)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AdjListGraph;
    use crate::traversal::AStarFns;

    fn run<G: Graph>(graph: &G, strategy: &mut Strategy<'_>, source: NodeId) -> Vec<NodeId> {
        graph.clear_marks();
        strategy.set_source(graph, source).unwrap();
        strategy.init(graph).unwrap();
        let mut order = Vec::new();
        while let Some(n) = strategy.next(graph) {
            graph.set_visited(n, true);
            order.push(n);
            strategy.cont(graph, n).unwrap();
        }
        order
    }

    #[test]
    fn test_every_variant_walks_a_path() {
        // 0 - 1 - 2
        let g: AdjListGraph<(), f64> = AdjListGraph::from_edges(3, [(0, 1, 1.0), (1, 2, 1.0)]);
        let mut strategies = vec![
            Strategy::breadth_first(),
            Strategy::depth_first(),
            Strategy::dijkstra(g.edge_weigher()),
            Strategy::astar(AStarFns::uninformed(2, g.edge_weigher())),
            Strategy::no_bifurcation(),
        ];
        for strategy in &mut strategies {
            assert_eq!(run(&g, strategy, 0), vec![0, 1, 2], "{}", strategy.name());
        }

        let mut topo = Strategy::topological(QueueKind::Fifo);
        assert_eq!(run(&g, &mut topo, 0), vec![0, 2, 1]);
        assert_eq!(topo.source(), None);
    }

    #[test]
    fn test_names_and_accessors() {
        let g: AdjListGraph<(), f64> = AdjListGraph::from_edges(2, [(0, 1, 3.0)]);
        assert_eq!(Strategy::directed_depth_first().name(), "directed_depth_first");
        assert_eq!(Strategy::directed_topological(QueueKind::Lifo).name(), "directed_topological");

        let mut dijkstra: Strategy<'_> = DijkstraIterator::new(g.edge_weigher()).into();
        run(&g, &mut dijkstra, 0);
        assert_eq!(dijkstra.cost(1), Some(3.0));
        assert_eq!(dijkstra.parent(1), Some(0));
        assert_eq!(dijkstra.source(), Some(0));
        assert_eq!(Strategy::breadth_first().cost(0), None);
    }
}
