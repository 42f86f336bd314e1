//! Node identifiers and the static tree store
//!
//! Nodes are numbered `1..=n`. Id `0` is reserved as the sentinel that sits
//! above the root: it is its own parent, has depth 0, and absorbs ancestor
//! jumps that overshoot the root. All per-node arrays are therefore sized
//! `n + 1` and indexed directly by `NodeId`.

use crate::config::EngineConfig;
use crate::error::TreeError;
use crate::static_tree::StaticTree;

/// Node ID type (index into flat per-node arrays)
pub type NodeId = u32;

/// Edge weight type. Path lengths are sums of edge weights from the root.
pub type Weight = i64;

/// Sentinel node above the root.
pub const SENTINEL: NodeId = 0;

pub(crate) const UNSET: u32 = u32::MAX;

/// Collects the undirected weighted edges of a tree before preprocessing.
///
/// Call `add_edge` exactly `n - 1` times, then `finalize` with the chosen root.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    n: usize,
    edges: Vec<(NodeId, NodeId, Weight)>,
}

impl TreeBuilder {
    /// Create a builder for a tree on nodes `1..=n`
    pub fn new(n: usize) -> Self {
        TreeBuilder {
            n,
            edges: Vec::with_capacity(n.saturating_sub(1)),
        }
    }

    /// Create a builder and add every edge of `edges`
    pub fn with_edges(
        n: usize,
        edges: impl IntoIterator<Item = (NodeId, NodeId, Weight)>,
    ) -> Result<Self, TreeError> {
        let mut builder = Self::new(n);
        for (u, v, w) in edges {
            builder.add_edge(u, v, w)?;
        }
        Ok(builder)
    }

    /// Add the undirected edge `u - v` with weight `w`.
    ///
    /// Only the endpoint range is checked here; structural problems (cycles,
    /// wrong edge count, disconnection) surface at `finalize`.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, w: Weight) -> Result<(), TreeError> {
        for node in [u, v] {
            if node == SENTINEL || node as usize > self.n {
                return Err(TreeError::NodeOutOfRange { node, n: self.n });
            }
        }
        self.edges.push((u, v, w));
        Ok(())
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.n
    }

    /// Check if the tree has no nodes
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Number of edges added so far
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Preprocess with the default configuration
    pub fn finalize(self, root: NodeId) -> Result<StaticTree, TreeError> {
        self.finalize_with(root, &EngineConfig::default())
    }

    /// Validate the edge set, run the Euler traversal and build the ancestor table.
    pub fn finalize_with(self, root: NodeId, config: &EngineConfig) -> Result<StaticTree, TreeError> {
        if self.n == 0 {
            return Err(TreeError::Empty);
        }
        if root == SENTINEL || root as usize > self.n {
            return Err(TreeError::RootOutOfRange { root, n: self.n });
        }
        if self.edges.len() != self.n - 1 {
            return Err(TreeError::EdgeCount {
                expected: self.n - 1,
                actual: self.edges.len(),
            });
        }
        let adjacency = Adjacency::from_edges(self.n, &self.edges);
        StaticTree::build(self.n, root, &adjacency, config)
    }
}

/// Compressed adjacency lists (CSR layout).
///
/// Each undirected edge appears twice, once per direction, and both copies
/// carry the same edge id so a traversal can skip exactly the edge it came in by.
pub(crate) struct Adjacency {
    offsets: Vec<u32>,
    targets: Vec<NodeId>,
    weights: Vec<Weight>,
    edge_ids: Vec<u32>,
}

impl Adjacency {
    pub(crate) fn from_edges(n: usize, edges: &[(NodeId, NodeId, Weight)]) -> Self {
        let mut offsets = vec![0u32; n + 2];
        for &(u, v, _) in edges {
            offsets[u as usize + 1] += 1;
            offsets[v as usize + 1] += 1;
        }
        for i in 1..offsets.len() {
            offsets[i] += offsets[i - 1];
        }

        let slots = 2 * edges.len();
        let mut cursor = offsets.clone();
        let mut targets = vec![SENTINEL; slots];
        let mut weights = vec![0; slots];
        let mut edge_ids = vec![UNSET; slots];
        for (id, &(u, v, w)) in edges.iter().enumerate() {
            for (from, to) in [(u, v), (v, u)] {
                let slot = cursor[from as usize] as usize;
                cursor[from as usize] += 1;
                targets[slot] = to;
                weights[slot] = w;
                edge_ids[slot] = id as u32;
            }
        }

        Adjacency {
            offsets,
            targets,
            weights,
            edge_ids,
        }
    }

    /// First adjacency slot of `u`
    pub(crate) fn start(&self, u: NodeId) -> u32 {
        self.offsets[u as usize]
    }

    /// One past the last adjacency slot of `u`
    pub(crate) fn end(&self, u: NodeId) -> u32 {
        self.offsets[u as usize + 1]
    }

    /// `(target, weight, edge id)` stored in `slot`
    pub(crate) fn slot(&self, slot: u32) -> (NodeId, Weight, u32) {
        let s = slot as usize;
        (self.targets[s], self.weights[s], self.edge_ids[s])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_rejects_out_of_range() {
        let mut b = TreeBuilder::new(3);
        assert_eq!(b.add_edge(1, 4, 1), Err(TreeError::NodeOutOfRange { node: 4, n: 3 }));
        assert_eq!(b.add_edge(0, 2, 1), Err(TreeError::NodeOutOfRange { node: 0, n: 3 }));
        assert_eq!(b.edge_count(), 0);
    }

    #[test]
    fn test_finalize_checks_edge_count() {
        let b = TreeBuilder::with_edges(4, [(1, 2, 1), (2, 3, 1)]).unwrap();
        assert_eq!(
            b.finalize(1).unwrap_err(),
            TreeError::EdgeCount { expected: 3, actual: 2 }
        );
    }

    #[test]
    fn test_finalize_checks_root() {
        let b = TreeBuilder::with_edges(2, [(1, 2, 1)]).unwrap();
        assert_eq!(b.finalize(3).unwrap_err(), TreeError::RootOutOfRange { root: 3, n: 2 });
        assert_eq!(TreeBuilder::new(0).finalize(1).unwrap_err(), TreeError::Empty);
    }

    #[test]
    fn test_adjacency_pairs_both_directions() {
        let adj = Adjacency::from_edges(3, &[(1, 2, 5), (2, 3, 7)]);
        assert_eq!(adj.end(1) - adj.start(1), 1);
        assert_eq!(adj.end(2) - adj.start(2), 2);
        let (t, w, id) = adj.slot(adj.start(1));
        assert_eq!((t, w, id), (2, 5, 0));
        let ids: Vec<u32> = (adj.start(2)..adj.end(2)).map(|s| adj.slot(s).2).collect();
        assert_eq!(ids, vec![0, 1]);
    }
}
