//! Error taxonomy
//!
//! `TreeError` is fatal: no query can run against a tree that failed to
//! finalize. `QueryError` rejects a single query before any node-indexed scratch
//! slot is touched, so the engine remains usable. `PathError` reports a
//! violated precondition of an ancestor-path query.

use crate::node::NodeId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("tree must contain at least one node")]
    Empty,
    #[error("node {node} is outside 1..={n}")]
    NodeOutOfRange { node: NodeId, n: usize },
    #[error("root {root} is outside 1..={n}")]
    RootOutOfRange { root: NodeId, n: usize },
    #[error("expected {expected} edges, got {actual}")]
    EdgeCount { expected: usize, actual: usize },
    #[error("cycle detected through edge {u}-{v}")]
    Cycle { u: NodeId, v: NodeId },
    #[error("node {node} is unreachable from root {root}")]
    Disconnected { node: NodeId, root: NodeId },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("query must mark at least one node")]
    Empty,
    #[error("marked node {node} is outside 1..={n}")]
    NodeOutOfRange { node: NodeId, n: usize },
    #[error("node {node} is marked more than once")]
    Duplicate { node: NodeId },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("node {node} is outside the tree")]
    NodeOutOfRange { node: NodeId },
    #[error("{ancestor} is not an ancestor of {node}")]
    NotAncestor { ancestor: NodeId, node: NodeId },
    #[error("min-edge aggregate was not built (enable track_min_edge)")]
    AggregateDisabled,
}
