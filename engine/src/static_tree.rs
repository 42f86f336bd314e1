//! The preprocessed static tree and its LCA oracle
//!
//! A `StaticTree` is immutable once built. Queries only take `&self`, so one
//! tree can back any number of query engines, on any number of threads.

use crate::config::EngineConfig;
use crate::error::{PathError, TreeError};
use crate::euler::{self, EulerTour};
use crate::lifting::AncestorTable;
use crate::node::{Adjacency, NodeId, Weight, SENTINEL};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct StaticTree {
    n: usize,
    root: NodeId,
    tour: EulerTour,
    table: AncestorTable,
    config: EngineConfig,
}

impl StaticTree {
    pub(crate) fn build(
        n: usize,
        root: NodeId,
        adjacency: &Adjacency,
        config: &EngineConfig,
    ) -> Result<Self, TreeError> {
        let start = Instant::now();
        let tour = euler::traverse(adjacency, n, root)?;
        let table = AncestorTable::build(&tour, config);
        tracing::debug!(
            nodes = n,
            root,
            levels = table.levels(),
            min_edge = table.tracks_min_edge(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "static tree finalized"
        );
        Ok(StaticTree {
            n,
            root,
            tour,
            table,
            config: config.clone(),
        })
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.n
    }

    /// Always false: finalize rejects empty trees
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Configuration the tree was finalized with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Check if `u` is a node id of this tree
    pub fn contains(&self, u: NodeId) -> bool {
        u != SENTINEL && (u as usize) <= self.n
    }

    /// Depth with the root at 1
    pub fn depth(&self, u: NodeId) -> u32 {
        self.tour.depth[u as usize]
    }

    /// Pre-order discovery index in `1..=n`
    pub fn discovery(&self, u: NodeId) -> u32 {
        self.tour.discovery[u as usize]
    }

    /// Largest discovery index inside the subtree of `u`
    pub fn exit(&self, u: NodeId) -> u32 {
        self.tour.exit[u as usize]
    }

    pub fn subtree_size(&self, u: NodeId) -> u32 {
        self.exit(u) - self.discovery(u) + 1
    }

    /// Direct parent, `None` for the root
    pub fn parent(&self, u: NodeId) -> Option<NodeId> {
        match self.tour.parent[u as usize] {
            SENTINEL => None,
            p => Some(p),
        }
    }

    /// Sum of edge weights from the root down to `u`
    pub fn root_distance(&self, u: NodeId) -> Weight {
        self.tour.root_dist[u as usize]
    }

    /// Node with the given discovery index
    pub fn node_at(&self, discovery: u32) -> NodeId {
        self.tour.order[discovery as usize]
    }

    /// Nodes in discovery order
    pub fn preorder(&self) -> &[NodeId] {
        &self.tour.order[1..]
    }

    pub fn tracks_min_edge(&self) -> bool {
        self.table.tracks_min_edge()
    }

    /// True if `a` is an ancestor of `b` (a node is its own ancestor). O(1).
    pub fn is_ancestor(&self, a: NodeId, b: NodeId) -> bool {
        self.discovery(a) <= self.discovery(b) && self.exit(b) <= self.exit(a)
    }

    /// Ancestor of `u` that sits `k` edges above it (the sentinel if `k` overshoots)
    pub fn ancestor(&self, u: NodeId, k: u32) -> NodeId {
        if k >= self.depth(u) {
            return SENTINEL;
        }
        self.table.lift(u, k)
    }

    /// Lowest common ancestor in O(log n).
    ///
    /// Raise the deeper node to the shallower depth, then step both pointers up
    /// by the largest powers of two that keep them apart.
    pub fn lca(&self, a: NodeId, b: NodeId) -> NodeId {
        debug_assert!(self.contains(a) && self.contains(b));
        let (mut a, mut b) = if self.depth(a) >= self.depth(b) { (a, b) } else { (b, a) };
        a = self.table.lift(a, self.depth(a) - self.depth(b));
        if a == b {
            return a;
        }
        for level in (0..self.table.levels()).rev() {
            let (ua, ub) = (self.table.ancestor(level, a), self.table.ancestor(level, b));
            if ua != ub {
                a = ua;
                b = ub;
            }
        }
        self.table.ancestor(0, a)
    }

    /// Weighted path length between `a` and `b`
    pub fn distance(&self, a: NodeId, b: NodeId) -> Weight {
        let l = self.lca(a, b);
        self.root_distance(a) + self.root_distance(b) - 2 * self.root_distance(l)
    }

    /// Minimum edge weight on the path from `ancestor` down to `u`.
    ///
    /// Returns `Weight::MAX` for the empty path (`u == ancestor`). The ancestor
    /// precondition is checked in O(1) on every call.
    pub fn min_on_ancestor_path(&self, u: NodeId, ancestor: NodeId) -> Result<Weight, PathError> {
        for node in [u, ancestor] {
            if !self.contains(node) {
                return Err(PathError::NodeOutOfRange { node });
            }
        }
        if !self.is_ancestor(ancestor, u) {
            return Err(PathError::NotAncestor { ancestor, node: u });
        }
        self.table
            .lift_min(u, self.depth(u) - self.depth(ancestor))
            .ok_or(PathError::AggregateDisabled)
    }
}
