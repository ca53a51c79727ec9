//! A reference traversal driver.
//!
//! [`BasicTraversal`] owns the control loop: it asks the iterator for the
//! next node, marks it visited, hands it to a [`Walker`], and then expands
//! (`cont`) or prunes (`kill_branch`) according to the walker's answer. The
//! path finders in [`path`] are built on top of it.

pub mod path;

pub use path::{AStarPathFinder, Path, ShortestPathFinder};

use crate::config::TraversalConfig;
use crate::error::TraversalResult;
use crate::graph::{Graph, NodeId};
use crate::traversal::{GraphIterator, SourceIterator};

/// What the driver does after a node has been visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkControl {
    /// Expand the node and keep walking.
    Continue,
    /// Expand the node, then return from `traverse`. Calling `traverse`
    /// again resumes where the walk left off.
    Suspend,
    /// Do not expand the node; keep walking other pending nodes.
    KillBranch,
    /// Return from `traverse` without expanding the node.
    Stop,
}

/// How a call to [`BasicTraversal::traverse`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalOutcome {
    /// The iterator ran out of nodes.
    Exhausted,
    /// The walker returned [`WalkControl::Suspend`].
    Suspended,
    /// The walker returned [`WalkControl::Stop`].
    Stopped,
    /// `max_visits` was reached.
    LimitReached,
}

/// Domain logic run for every visited node.
pub trait Walker<G: Graph> {
    /// Called once per node, after it has been marked visited.
    fn visit(&mut self, graph: &G, node: NodeId) -> WalkControl;

    /// Called when the iterator is exhausted.
    fn finish(&mut self, _graph: &G) {}
}

impl<G, F> Walker<G> for F
where
    G: Graph,
    F: FnMut(&G, NodeId) -> WalkControl,
{
    fn visit(&mut self, graph: &G, node: NodeId) -> WalkControl {
        self(graph, node)
    }
}

/// Drives an iterator over a borrowed graph.
///
/// ```
/// use graph_walk::driver::{BasicTraversal, WalkControl};
/// use graph_walk::graph::AdjListGraph;
/// use graph_walk::traversal::SimpleIterator;
///
/// let g: AdjListGraph<(), ()> = AdjListGraph::from_edges(3, [(0, 1, ()), (1, 2, ())]);
/// let mut walk = BasicTraversal::new(&g, SimpleIterator::breadth_first());
/// walk.set_source(0).unwrap();
/// walk.init().unwrap();
///
/// let mut seen = Vec::new();
/// walk.traverse(&mut |_: &AdjListGraph<(), ()>, n: usize| {
///     seen.push(n);
///     WalkControl::Continue
/// })
/// .unwrap();
/// assert_eq!(seen, vec![0, 1, 2]);
/// ```
#[derive(Debug)]
pub struct BasicTraversal<'g, G, I> {
    graph: &'g G,
    iterator: I,
    config: TraversalConfig,
    visits: usize,
}

impl<'g, G, I> BasicTraversal<'g, G, I>
where
    G: Graph,
    I: GraphIterator<G>,
{
    /// Creates a driver with the default configuration.
    pub fn new(graph: &'g G, iterator: I) -> Self {
        Self {
            graph,
            iterator,
            config: TraversalConfig::default(),
            visits: 0,
        }
    }

    /// Creates a driver with an explicit configuration.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the configuration does not validate.
    pub fn with_config(
        graph: &'g G,
        iterator: I,
        config: TraversalConfig,
    ) -> TraversalResult<Self> {
        config.validate()?;
        Ok(Self {
            graph,
            iterator,
            config,
            visits: 0,
        })
    }

    /// Prepares a new walk: optionally clears the scratch fields, resets the
    /// visit count and initialises the iterator.
    ///
    /// # Errors
    /// Propagates the iterator's `init` error.
    pub fn init(&mut self) -> TraversalResult<()> {
        if self.config.reset_marks {
            self.graph.clear_marks();
        }
        self.visits = 0;
        tracing::debug!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            max_visits = ?self.config.max_visits,
            "traversal init"
        );
        self.iterator.init(self.graph)
    }

    /// Runs the control loop until the iterator is exhausted or the walker
    /// (or the visit limit) interrupts it.
    ///
    /// # Errors
    /// Propagates `cont` errors from the iterator.
    pub fn traverse<W: Walker<G>>(&mut self, walker: &mut W) -> TraversalResult<TraversalOutcome> {
        let graph = self.graph;
        loop {
            if self.config.max_visits.is_some_and(|max| self.visits >= max) {
                tracing::debug!(visits = self.visits, "traversal limit reached");
                return Ok(TraversalOutcome::LimitReached);
            }

            let Some(current) = self.iterator.next(graph) else {
                walker.finish(graph);
                tracing::debug!(visits = self.visits, "traversal exhausted");
                return Ok(TraversalOutcome::Exhausted);
            };

            graph.set_visited(current, true);
            self.visits += 1;
            let control = walker.visit(graph, current);
            tracing::trace!(node = current, ?control, "visited");

            match control {
                WalkControl::Continue => self.iterator.cont(graph, current)?,
                WalkControl::Suspend => {
                    self.iterator.cont(graph, current)?;
                    return Ok(TraversalOutcome::Suspended);
                }
                WalkControl::KillBranch => self.iterator.kill_branch(graph, current),
                WalkControl::Stop => {
                    tracing::debug!(node = current, visits = self.visits, "traversal stopped");
                    return Ok(TraversalOutcome::Stopped);
                }
            }
        }
    }

    /// Number of nodes visited since the last `init`.
    pub fn visits(&self) -> usize {
        self.visits
    }

    /// The graph being walked.
    pub fn graph(&self) -> &'g G {
        self.graph
    }

    /// The active configuration.
    pub fn config(&self) -> &TraversalConfig {
        &self.config
    }

    /// The wrapped iterator.
    pub fn iterator(&self) -> &I {
        &self.iterator
    }

    /// Mutable access to the wrapped iterator.
    pub fn iterator_mut(&mut self) -> &mut I {
        &mut self.iterator
    }

    /// Consumes the driver and returns the iterator.
    pub fn into_iterator(self) -> I {
        self.iterator
    }
}

impl<G, I> BasicTraversal<'_, G, I>
where
    G: Graph,
    I: SourceIterator<G>,
{
    /// Sets the start node of a source-rooted iterator.
    ///
    /// # Errors
    /// Propagates the iterator's `set_source` error.
    pub fn set_source(&mut self, source: NodeId) -> TraversalResult<()> {
        self.iterator.set_source(self.graph, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TraversalError;
    use crate::graph::AdjListGraph;
    use crate::traversal::{DijkstraIterator, SimpleIterator};

    type G = AdjListGraph<(), ()>;

    // 0 - 1 - 2 - 3
    fn path4() -> G {
        AdjListGraph::from_edges(4, [(0, 1, ()), (1, 2, ()), (2, 3, ())])
    }

    struct Recorder {
        seen: Vec<NodeId>,
        finished: bool,
    }

    impl Walker<G> for Recorder {
        fn visit(&mut self, _graph: &G, node: NodeId) -> WalkControl {
            self.seen.push(node);
            WalkControl::Continue
        }

        fn finish(&mut self, _graph: &G) {
            self.finished = true;
        }
    }

    #[test]
    fn test_walker_sees_every_node_and_finishes() {
        let g = path4();
        let mut walk = BasicTraversal::new(&g, SimpleIterator::breadth_first());
        walk.set_source(0).unwrap();
        walk.init().unwrap();

        let mut recorder = Recorder {
            seen: Vec::new(),
            finished: false,
        };
        assert_eq!(walk.traverse(&mut recorder).unwrap(), TraversalOutcome::Exhausted);
        assert_eq!(recorder.seen, vec![0, 1, 2, 3]);
        assert!(recorder.finished);
        assert_eq!(walk.visits(), 4);
    }

    #[test]
    fn test_suspend_and_resume() {
        let g = path4();
        let mut walk = BasicTraversal::new(&g, SimpleIterator::breadth_first());
        walk.set_source(0).unwrap();
        walk.init().unwrap();

        let mut seen = Vec::new();
        let mut walker = |_: &G, n: NodeId| {
            seen.push(n);
            if n == 1 {
                WalkControl::Suspend
            } else {
                WalkControl::Continue
            }
        };
        assert_eq!(walk.traverse(&mut walker).unwrap(), TraversalOutcome::Suspended);
        assert_eq!(walk.traverse(&mut walker).unwrap(), TraversalOutcome::Exhausted);
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_kill_branch_and_stop() {
        let g = path4();
        let mut walk = BasicTraversal::new(&g, SimpleIterator::depth_first());
        walk.set_source(0).unwrap();
        walk.init().unwrap();
        let outcome = walk
            .traverse(&mut |_: &G, n: NodeId| {
                if n == 1 {
                    WalkControl::KillBranch
                } else {
                    WalkControl::Continue
                }
            })
            .unwrap();
        assert_eq!(outcome, TraversalOutcome::Exhausted);
        assert_eq!(walk.visits(), 2);
        assert!(!g.is_visited(2));

        walk.init().unwrap();
        let outcome = walk
            .traverse(&mut |_: &G, n: NodeId| {
                if n == 2 {
                    WalkControl::Stop
                } else {
                    WalkControl::Continue
                }
            })
            .unwrap();
        assert_eq!(outcome, TraversalOutcome::Stopped);
        assert_eq!(walk.visits(), 3);
    }

    #[test]
    fn test_visit_limit() {
        let g = path4();
        let config = TraversalConfig::default().with_max_visits(2);
        let mut walk =
            BasicTraversal::with_config(&g, SimpleIterator::breadth_first(), config).unwrap();
        walk.set_source(0).unwrap();
        walk.init().unwrap();
        let outcome = walk.traverse(&mut |_: &G, _: NodeId| WalkControl::Continue).unwrap();
        assert_eq!(outcome, TraversalOutcome::LimitReached);
        assert_eq!(walk.visits(), 2);
    }

    #[test]
    fn test_marks_kept_when_reset_disabled() {
        let g = path4();
        g.set_visited(2, true);
        let config = TraversalConfig::default().with_reset_marks(false);
        let mut walk =
            BasicTraversal::with_config(&g, SimpleIterator::breadth_first(), config).unwrap();
        walk.set_source(0).unwrap();
        walk.init().unwrap();
        walk.traverse(&mut |_: &G, _: NodeId| WalkControl::Continue).unwrap();
        // Node 2 blocks the only route to 3.
        assert_eq!(walk.visits(), 2);
        assert!(!g.is_visited(3));
    }

    #[test]
    fn test_errors_propagate() {
        let g: AdjListGraph<(), f64> = AdjListGraph::from_edges(2, [(0, 1, 1.0)]);
        let mut walk = BasicTraversal::new(&g, DijkstraIterator::new(g.edge_weigher()));
        assert!(matches!(walk.init(), Err(TraversalError::MissingSource)));

        let config = TraversalConfig::default().with_max_visits(0);
        assert!(BasicTraversal::with_config(&g, SimpleIterator::breadth_first(), config).is_err());
    }
}
