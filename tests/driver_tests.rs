use anyhow::Result;
use graph_walk::collections::QueueKind;
use graph_walk::config::TraversalConfig;
use graph_walk::driver::{
    AStarPathFinder, BasicTraversal, ShortestPathFinder, TraversalOutcome, WalkControl, Walker,
};
use graph_walk::graph::{AdjListGraph, Directed, Graph, GraphSpec, NodeId, Undirected};
use graph_walk::traversal::{AStarFns, Strategy};
use graph_walk::TraversalError;

const ROAD_NETWORK: &str = include_str!("fixtures/road_network.json");

type Road = AdjListGraph<(), f64, Undirected>;
type OneWay = AdjListGraph<(), f64, Directed>;

fn run(graph: &Road, strategy: Strategy<'_>, source: NodeId) -> Result<Vec<NodeId>> {
    let mut walk = BasicTraversal::new(graph, strategy);
    walk.set_source(source)?;
    walk.init()?;
    let mut order = Vec::new();
    walk.traverse(&mut |_: &Road, n: NodeId| {
        order.push(n);
        WalkControl::Continue
    })?;
    Ok(order)
}

#[test]
fn test_fixture_loads() -> Result<()> {
    let spec: GraphSpec = serde_json::from_str(ROAD_NETWORK)?;
    assert_eq!(spec.nodes, 8);
    assert_eq!(spec.edges[6].weight, 1.0);

    let g = Road::from_spec(&spec)?;
    assert_eq!(g.node_count(), 8);
    assert_eq!(g.edge_count(), 9);
    assert_eq!(g.degree(3), 4);
    assert_eq!(g.degree(7), 0);
    assert_eq!(g.to_spec(), spec);
    Ok(())
}

#[test]
fn test_fixture_shortest_paths() -> Result<()> {
    let g = Road::from_json(ROAD_NETWORK)?;
    let mut finder = ShortestPathFinder::new(&g, 0, g.edge_weigher());
    finder.calculate()?;

    let expected = [0.0, 3.0, 1.0, 8.0, 11.0, 12.0, 14.5];
    for (node, cost) in expected.iter().enumerate() {
        assert_eq!(finder.cost(node), *cost, "cost of node {node}");
    }

    let path = finder.path(6)?;
    assert_eq!(path.nodes(), &[0, 2, 1, 3, 4, 5, 6]);
    assert_eq!(path.edges(), &[1, 2, 3, 5, 6, 7]);

    let err = finder.path(7).unwrap_err();
    assert!(matches!(err, TraversalError::PathNotFound { from: 0, to: 7 }));
    assert!(!err.is_protocol_violation());
    Ok(())
}

#[test]
fn test_directed_fixture_matches_undirected_costs() -> Result<()> {
    let g = OneWay::from_json(ROAD_NETWORK)?;
    let mut finder = ShortestPathFinder::new(&g, 0, g.edge_weigher());
    finder.calculate()?;
    assert_eq!(finder.cost(6), 14.5);

    // Nothing leads back into the source.
    let mut finder = ShortestPathFinder::new(&g, 6, g.edge_weigher());
    finder.calculate()?;
    assert!(finder.cost(0).is_infinite());
    Ok(())
}

#[test]
fn test_directed_topological_build_order() -> Result<()> {
    let g = OneWay::from_json(ROAD_NETWORK)?;
    let mut walk = BasicTraversal::new(&g, Strategy::directed_topological(QueueKind::Fifo));
    walk.init()?;
    let mut order = Vec::new();
    let outcome = walk.traverse(&mut |_: &OneWay, n: NodeId| {
        order.push(n);
        WalkControl::Continue
    })?;
    assert_eq!(outcome, TraversalOutcome::Exhausted);
    assert_eq!(order, vec![0, 7, 2, 1, 3, 4, 5, 6]);
    Ok(())
}

#[test]
fn test_strategy_selected_at_runtime() -> Result<()> {
    let g = Road::from_json(ROAD_NETWORK)?;
    let reachable = 7;

    for name in ["breadth_first", "depth_first", "dijkstra", "astar"] {
        let strategy = match name {
            "breadth_first" => Strategy::breadth_first(),
            "depth_first" => Strategy::depth_first(),
            "dijkstra" => Strategy::dijkstra(g.edge_weigher()),
            _ => Strategy::astar(AStarFns::uninformed(6, g.edge_weigher())),
        };
        assert_eq!(strategy.name(), name);
        let order = run(&g, strategy, 0)?;
        assert_eq!(order.len(), reachable, "{name}");
        assert_eq!(order[0], 0, "{name}");
    }

    assert_eq!(run(&g, Strategy::no_bifurcation(), 4)?, vec![4, 5, 6]);
    assert_eq!(run(&g, Strategy::no_bifurcation(), 7)?, vec![7]);
    Ok(())
}

#[test]
fn test_config_limits_visits() -> Result<()> {
    let g = Road::from_json(ROAD_NETWORK)?;
    let config = TraversalConfig::from_json(r#"{ "max_visits": 3 }"#)?;
    let mut walk = BasicTraversal::with_config(&g, Strategy::breadth_first(), config)?;
    walk.set_source(0)?;
    walk.init()?;

    let outcome = walk.traverse(&mut |_: &Road, _: NodeId| WalkControl::Continue)?;
    assert_eq!(outcome, TraversalOutcome::LimitReached);
    assert_eq!(walk.visits(), 3);
    assert_eq!(g.marks().visited_count(), 3);

    // A fresh init clears the limit and the marks.
    walk.init()?;
    assert_eq!(g.marks().visited_count(), 0);
    Ok(())
}

/// Stops at the first node whose id satisfies a predicate and remembers it.
struct FindFirst<P> {
    predicate: P,
    found: Option<NodeId>,
    exhausted: bool,
}

impl<G: Graph, P: FnMut(NodeId) -> bool> Walker<G> for FindFirst<P> {
    fn visit(&mut self, _graph: &G, node: NodeId) -> WalkControl {
        if (self.predicate)(node) {
            self.found = Some(node);
            WalkControl::Stop
        } else {
            WalkControl::Continue
        }
    }

    fn finish(&mut self, _graph: &G) {
        self.exhausted = true;
    }
}

#[test]
fn test_custom_walker_search() -> Result<()> {
    let g = Road::from_json(ROAD_NETWORK)?;
    let mut walk = BasicTraversal::new(&g, Strategy::breadth_first());
    walk.set_source(0)?;
    walk.init()?;

    let mut finder = FindFirst {
        predicate: |n: NodeId| n >= 4,
        found: None,
        exhausted: false,
    };
    assert_eq!(walk.traverse(&mut finder)?, TraversalOutcome::Stopped);
    assert_eq!(finder.found, Some(4));
    assert!(!finder.exhausted);

    walk.init()?;
    let mut finder = FindFirst {
        predicate: |n: NodeId| n == 7,
        found: None,
        exhausted: false,
    };
    assert_eq!(walk.traverse(&mut finder)?, TraversalOutcome::Exhausted);
    assert_eq!(finder.found, None);
    assert!(finder.exhausted);
    Ok(())
}

#[test]
fn test_astar_grid_with_wall() -> Result<()> {
    // 5x5 grid, node = row * 5 + col; column 2 is walled off except row 4.
    const W: usize = 5;
    let mut g: Road = AdjListGraph::new_undirected();
    for _ in 0..W * W {
        g.add_node(());
    }
    let open = |n: usize| n % W != 2 || n / W == 4;
    for r in 0..W {
        for c in 0..W {
            let n = r * W + c;
            if c + 1 < W && open(n) && open(n + 1) {
                g.add_edge(n, n + 1, 1.0);
            }
            if r + 1 < W && open(n) && open(n + W) {
                g.add_edge(n, n + W, 1.0);
            }
        }
    }

    let manhattan =
        |a: NodeId, b: NodeId| ((a / W).abs_diff(b / W) + (a % W).abs_diff(b % W)) as f64;
    let fns = AStarFns::from_weigher(4, g.edge_weigher(), manhattan);
    let mut astar = AStarPathFinder::new(&g, 0, fns);
    astar.calculate()?;
    let path = astar.path()?;

    // Down to row 4, across, and back up.
    assert_eq!(path.cost(), 12.0);
    assert_eq!(path.len(), 12);
    assert!(path.nodes().contains(&22));

    let mut dijkstra = ShortestPathFinder::new(&g, 0, g.edge_weigher());
    dijkstra.calculate()?;
    assert_eq!(dijkstra.cost(4), path.cost());
    Ok(())
}

#[test]
fn test_bad_fixture_rejected() {
    let err = Road::from_json(r#"{ "nodes": 2, "edges": [ { "source": 0, "target": 5 } ] }"#)
        .unwrap_err();
    assert!(matches!(err, TraversalError::DanglingEdge { node: 5, len: 2, .. }));

    let err = Road::from_json("{ nodes: 2 }").unwrap_err();
    assert!(matches!(err, TraversalError::Json(_)));
}
