//! Binary-lifting ancestor table
//!
//! `up[p][u]` is the 2^p-th ancestor of `u`. The sentinel (id 0) is its own
//! ancestor at every level, so jumps past the root land on it and stay there.
//! The optional `min_edge[p][u]` holds the minimum edge weight over those same
//! 2^p edges.
//!
//! Level `p` depends only on level `p - 1`, so each level is filled with a
//! Rayon `par_iter` once the tree is large enough to amortise the fork.

use crate::config::EngineConfig;
use crate::euler::EulerTour;
use crate::node::{NodeId, Weight, SENTINEL};
use rayon::prelude::*;

#[derive(Debug, Clone)]
pub(crate) struct AncestorTable {
    up: Vec<Vec<NodeId>>,
    min_edge: Option<Vec<Vec<Weight>>>,
}

/// Levels needed so that any depth difference (at most `n - 1`) fits.
pub(crate) fn level_count(n: usize) -> usize {
    ((usize::BITS - n.leading_zeros()) as usize).max(1)
}

fn next_level<T, F>(len: usize, parallel: bool, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    if parallel {
        (0..len).into_par_iter().map(f).collect()
    } else {
        (0..len).map(f).collect()
    }
}

impl AncestorTable {
    pub(crate) fn build(tour: &EulerTour, config: &EngineConfig) -> Self {
        let len = tour.parent.len();
        let levels = level_count(len - 1);
        let parallel = len > config.parallel_threshold;

        let mut up: Vec<Vec<NodeId>> = Vec::with_capacity(levels);
        up.push(tour.parent.clone());
        for p in 1..levels {
            let prev = &up[p - 1];
            let level = next_level(len, parallel, |u| prev[prev[u] as usize]);
            up.push(level);
        }

        let min_edge = config.track_min_edge.then(|| {
            let mut table: Vec<Vec<Weight>> = Vec::with_capacity(levels);
            let mut base = tour.parent_weight.clone();
            // sentinel and root have no edge above them
            base[SENTINEL as usize] = Weight::MAX;
            for (u, &p) in tour.parent.iter().enumerate() {
                if p == SENTINEL {
                    base[u] = Weight::MAX;
                }
            }
            table.push(base);
            for p in 1..levels {
                let (prev_up, prev_min) = (&up[p - 1], &table[p - 1]);
                let level = next_level(len, parallel, |u| {
                    prev_min[u].min(prev_min[prev_up[u] as usize])
                });
                table.push(level);
            }
            table
        });

        AncestorTable { up, min_edge }
    }

    pub(crate) fn levels(&self) -> usize {
        self.up.len()
    }

    pub(crate) fn ancestor(&self, level: usize, u: NodeId) -> NodeId {
        self.up[level][u as usize]
    }

    pub(crate) fn tracks_min_edge(&self) -> bool {
        self.min_edge.is_some()
    }

    /// Climb `k` edges from `u`.
    pub(crate) fn lift(&self, mut u: NodeId, mut k: u32) -> NodeId {
        let mut level = 0;
        while k > 0 {
            if k & 1 == 1 {
                u = self.up[level][u as usize];
            }
            k >>= 1;
            level += 1;
        }
        u
    }

    /// Climb `k` edges from `u`, folding the minimum edge weight passed.
    /// Returns `None` if the aggregate was not built.
    pub(crate) fn lift_min(&self, mut u: NodeId, mut k: u32) -> Option<Weight> {
        let table = self.min_edge.as_ref()?;
        let mut acc = Weight::MAX;
        let mut level = 0;
        while k > 0 {
            if k & 1 == 1 {
                acc = acc.min(table[level][u as usize]);
                u = self.up[level][u as usize];
            }
            k >>= 1;
            level += 1;
        }
        Some(acc)
    }
}
