//! Deterministic fixture trees for tests and benchmarks
//!
//! Random shapes come from a small linear congruential generator so every run
//! (and every bench iteration) sees the same trees.
//!
//! Shapes:
//!   path_tree(n):     1 - 2 - 3 - ... - n
//!   star_tree(k):     1 at the center, leaves 2..=k+1
//!   caterpillar(n):   spine 1..=n/2, one leaf hanging off each spine node
//!   random_tree(n):   node i >= 2 attaches to a uniform earlier node

use crate::config::EngineConfig;
use crate::node::{NodeId, TreeBuilder, Weight, SENTINEL};
use crate::static_tree::StaticTree;
use std::collections::HashSet;

/// Simple LCG for deterministic random number generation
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Lcg { state: seed }
    }

    pub fn next(&mut self) -> u64 {
        self.state = (self.state.wrapping_mul(1103515245).wrapping_add(12345)) & 0x7fffffff;
        self.state
    }

    /// Uniform-ish value in `0..bound`
    pub fn below(&mut self, bound: u64) -> u64 {
        // mix two draws: a single 31-bit draw is too short for million-node trees
        ((self.next() << 31) | self.next()) % bound.max(1)
    }
}

/// Finalize a fixture; fixtures are valid by construction.
pub fn finalize(builder: TreeBuilder, root: NodeId, config: &EngineConfig) -> StaticTree {
    builder
        .finalize_with(root, config)
        .expect("fixture trees are well formed")
}

fn from_edges(n: usize, edges: Vec<(NodeId, NodeId, Weight)>) -> TreeBuilder {
    TreeBuilder::with_edges(n, edges).expect("fixture edges are in range")
}

/// Path 1 - 2 - ... - n with every edge weighing `weight`
pub fn path_tree(n: usize, weight: Weight) -> TreeBuilder {
    from_edges(n, (1..n as NodeId).map(|u| (u, u + 1, weight)).collect())
}

/// Node 1 joined to `leaves` leaves numbered from 2
pub fn star_tree(leaves: usize, weight: Weight) -> TreeBuilder {
    from_edges(
        leaves + 1,
        (2..=leaves as NodeId + 1).map(|v| (1, v, weight)).collect(),
    )
}

/// Spine `1..=n/2` with the other nodes as leaves; weights grow along the spine.
pub fn caterpillar(n: usize) -> TreeBuilder {
    let spine = (n / 2).max(1) as NodeId;
    let mut edges: Vec<_> = (1..spine).map(|u| (u, u + 1, u as Weight)).collect();
    for v in spine + 1..=n as NodeId {
        edges.push(((v - spine - 1) % spine + 1, v, 1));
    }
    from_edges(n, edges)
}

/// Random recursive tree on `n` nodes, weights in `1..=max_weight`.
///
/// Edges are inserted in shuffled order with randomly oriented endpoints, so
/// adjacency order (and therefore discovery order) is not tied to node ids.
pub fn random_tree(n: usize, max_weight: Weight, seed: u64) -> TreeBuilder {
    let mut lcg = Lcg::new(seed);
    let mut edges: Vec<(NodeId, NodeId, Weight)> = (2..=n as NodeId)
        .map(|v| {
            let p = 1 + lcg.below(v as u64 - 1) as NodeId;
            let w = 1 + lcg.below(max_weight as u64) as Weight;
            if (lcg.next() >> 16) & 1 == 0 {
                (p, v, w)
            } else {
                (v, p, w)
            }
        })
        .collect();
    for i in (1..edges.len()).rev() {
        let j = lcg.below(i as u64 + 1) as usize;
        edges.swap(i, j);
    }
    from_edges(n, edges)
}

/// `k` distinct node ids from `1..=n`, in random order
pub fn sample_distinct(lcg: &mut Lcg, n: usize, k: usize) -> Vec<NodeId> {
    let k = k.min(n);
    if 2 * k > n {
        // dense: partial Fisher-Yates over all ids
        let mut all: Vec<NodeId> = (1..=n as NodeId).collect();
        for i in 0..k {
            let j = i + lcg.below((n - i) as u64) as usize;
            all.swap(i, j);
        }
        all.truncate(k);
        return all;
    }
    let mut seen = HashSet::with_capacity(k);
    let mut out = Vec::with_capacity(k);
    while out.len() < k {
        let u = 1 + lcg.below(n as u64) as NodeId;
        if seen.insert(u) {
            out.push(u);
        }
    }
    out
}

/// LCA by walking parent pointers; the reference answer for tests.
pub fn naive_lca(tree: &StaticTree, mut a: NodeId, mut b: NodeId) -> NodeId {
    while tree.depth(a) > tree.depth(b) {
        a = tree.parent(a).unwrap_or(SENTINEL);
    }
    while tree.depth(b) > tree.depth(a) {
        b = tree.parent(b).unwrap_or(SENTINEL);
    }
    while a != b {
        a = tree.parent(a).unwrap_or(SENTINEL);
        b = tree.parent(b).unwrap_or(SENTINEL);
    }
    a
}
