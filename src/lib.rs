//! # `graph-walk` - Interchangeable Graph Traversal Strategies
//!
//! A family of traversal strategies that operate over an abstract graph
//! model through one uniform iterator protocol. A driver owns the control
//! loop; a strategy only decides *which node comes next*.
//!
//! ## Key Features
//!
//! - **One protocol**: `init`, `next`, `cont`, `kill_branch`, plus
//!   `set_source` for source-rooted walks
//! - **Arena model**: nodes and edges are indices; the per-node scratch
//!   fields (`visited`, `counter`) live in parallel arrays
//! - **Addressable heap**: Dijkstra and A* reposition queued nodes in
//!   \(O(\log n)\)
//! - **Closed strategy enum**: choose a strategy at runtime without trait objects
//!
//! ## Architecture
//!
//! ```text
//! driver      BasicTraversal, Walker, ShortestPathFinder, AStarPathFinder
//!   │
//! traversal   GraphIterator / SourceIterator
//!   │           SimpleIterator        breadth-first, depth-first
//!   │           TopologicalIterator   counter / in-degree driven
//!   │           DijkstraIterator      single-source shortest paths
//!   │           AStarIterator         heuristic search
//!   │           NoBifurcationIterator chain walk
//!   │
//! collections ActiveQueue (FIFO / LIFO), IndexedMinHeap
//!   │
//! graph       Graph trait, NodeMarks, AdjListGraph
//! ```
//!
//! ### Strategies
//!
//! | Strategy | Order | Notes |
//! |----------|-------|-------|
//! | `SimpleIterator` (FIFO) | breadth-first | non-decreasing hop count |
//! | `SimpleIterator` (LIFO) | depth-first | backtracks in reverse discovery order |
//! | `TopologicalIterator` | dependencies first | undirected: `degree - 1`; directed: `in_degree` |
//! | `DijkstraIterator` | non-decreasing cost | stops at the first `+inf` |
//! | `AStarIterator` | non-decreasing `g + h` | needs an admissible heuristic |
//! | `NoBifurcationIterator` | along a chain | stops before a branching node |
//!
//! ## Example
//!
//! ```rust
//! use graph_walk::driver::{BasicTraversal, WalkControl};
//! use graph_walk::graph::AdjListGraph;
//! use graph_walk::traversal::DijkstraIterator;
//!
//! // 0 -(2)- 1 -(2)- 2
//! //  \-------(5)----/
//! let g: AdjListGraph<(), f64> =
//!     AdjListGraph::from_edges(3, [(0, 1, 2.0), (1, 2, 2.0), (0, 2, 5.0)]);
//!
//! let mut walk = BasicTraversal::new(&g, DijkstraIterator::new(g.edge_weigher()));
//! walk.set_source(0).unwrap();
//! walk.init().unwrap();
//! walk.traverse(&mut |_: &AdjListGraph<(), f64>, _: usize| WalkControl::Continue).unwrap();
//!
//! let dijkstra = walk.iterator();
//! assert_eq!(dijkstra.cost(2), 4.0);
//! assert_eq!(dijkstra.parent(2), Some(1));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod collections;
pub mod config;
pub mod driver;
pub mod error;
pub mod graph;
pub mod traversal;

pub use collections::{ActiveQueue, IndexedMinHeap, QueueKind};
pub use config::TraversalConfig;
pub use driver::{
    AStarPathFinder, BasicTraversal, Path, ShortestPathFinder, TraversalOutcome, WalkControl,
    Walker,
};
pub use error::{TraversalError, TraversalResult};
pub use graph::{AdjListGraph, Adjacency, Adjacent, Directed, EdgeId, Graph, NodeId, Undirected};
pub use traversal::{
    AStarFns, AStarFunctions, AStarIterator, DijkstraIterator, GraphIterator, NoBifurcationIterator,
    SimpleIterator, SourceIterator, Strategy, TopologicalIterator,
};
