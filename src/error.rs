//! Error types for traversal operations.
//!
//! Two kinds of failure exist in this crate:
//! - protocol violations (a driver misusing an iterator), which are fatal and
//!   surface as [`TraversalError`];
//! - ordinary exhaustion, which is *not* an error and surfaces as `None`
//!   from `next`.

use thiserror::Error;

use crate::graph::{EdgeId, NodeId};

/// Result type alias for traversal operations.
pub type TraversalResult<T> = Result<T, TraversalError>;

/// Error type for every fallible operation in the crate.
#[derive(Error, Debug)]
pub enum TraversalError {
    // ========== Protocol violations ==========
    /// `cont` was called for a node the strategy never recorded.
    #[error("no traversal record for node {0}; was it returned by next()?")]
    UnknownNode(NodeId),

    /// A chain walk was started on a branching node.
    #[error("node {node} has degree {degree}; a chain walk must start at degree <= 2")]
    Bifurcation {
        /// The rejected start node.
        node: NodeId,
        /// Its number of incident edge ends.
        degree: usize,
    },

    /// A source-rooted strategy was initialised before `set_source`.
    #[error("no source node set; call set_source() before init()")]
    MissingSource,

    /// A node id does not belong to the graph.
    #[error("node {node} is out of bounds for a graph with {len} nodes")]
    NodeOutOfBounds {
        /// The offending id.
        node: NodeId,
        /// Number of nodes in the graph.
        len: usize,
    },

    // ========== Path finding ==========
    /// The destination was never reached from the source.
    #[error("no path from node {from} to node {to}")]
    PathNotFound {
        /// Start of the requested path.
        from: NodeId,
        /// Unreached end of the requested path.
        to: NodeId,
    },

    // ========== Model / configuration ==========
    /// An edge list references a node that does not exist.
    #[error("edge {edge} references node {node}, but the graph has {len} nodes")]
    DanglingEdge {
        /// Index of the edge in the input list.
        edge: EdgeId,
        /// The missing endpoint.
        node: NodeId,
        /// Number of nodes in the graph.
        len: usize,
    },

    /// A configuration value failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON (de)serialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TraversalError {
    /// Returns `true` for errors caused by a driver misusing the iterator protocol.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            Self::UnknownNode(_)
                | Self::Bifurcation { .. }
                | Self::MissingSource
                | Self::NodeOutOfBounds { .. }
        )
    }
}
