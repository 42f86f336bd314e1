//! Minimum edge cut separating marked nodes from the root
//!
//! Removing an edge costs its weight. The answer is the cheapest set of edges
//! whose removal leaves no marked node connected to the global root.
//!
//! The root is force-included in the marked set before the virtual tree is
//! built so the DP sees the whole path from it to every marked node. This is
//! a payload policy: the engine itself never adds nodes to a query.
//!
//! Along a virtual edge `p -> c` the cheapest single cut is the minimum edge
//! weight on the static path, read from the min-edge aggregate. A marked node
//! must be cut from above; any other node may instead rely on the cuts made
//! inside its own subtree.

use crate::{Payload, PayloadError};
use vtree_engine::{DpDriver, NodeId, PathError, QueryEngine, QueryError, StaticTree, Weight};

#[derive(Debug, Clone, Copy, Default)]
struct CutState {
    node: NodeId,
    /// cost of separating every marked node below from this node
    cost: Weight,
    /// must be cut off from above
    target: bool,
}

/// Refill `out` with `marked` plus the tree root. Returns true if the root
/// was already marked (and so not added again).
pub fn with_root_into(tree: &StaticTree, marked: &[NodeId], out: &mut Vec<NodeId>) -> bool {
    out.clear();
    out.extend_from_slice(marked);
    let root_marked = marked.contains(&tree.root());
    if !root_marked {
        out.push(tree.root());
    }
    root_marked
}

/// The marked set with the tree root added, unless already present.
pub fn with_root(tree: &StaticTree, marked: &[NodeId]) -> Vec<NodeId> {
    let mut out = Vec::with_capacity(marked.len() + 1);
    with_root_into(tree, marked, &mut out);
    out
}

#[derive(Debug, Default)]
pub struct MinCut {
    driver: DpDriver<CutState>,
    scratch: Vec<NodeId>,
}

impl MinCut {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Payload for MinCut {
    /// `None` when the root itself is marked: no cut can separate it.
    type Answer = Option<Weight>;

    fn solve(&mut self, engine: &mut QueryEngine<'_>, marked: &[NodeId]) -> Result<Option<Weight>, PayloadError> {
        let tree = engine.tree();
        if !tree.tracks_min_edge() {
            return Err(PathError::AggregateDisabled.into());
        }
        if marked.is_empty() {
            return Err(QueryError::Empty.into());
        }
        let root = tree.root();

        let root_marked = with_root_into(tree, marked, &mut self.scratch);
        let vt = engine.run_query(&self.scratch)?;
        if root_marked {
            return Ok(None);
        }

        let mut failure = None;
        let answer = self.driver.run_up(
            vt,
            |node, is_marked| CutState {
                node,
                cost: 0,
                target: is_marked && node != root,
            },
            |mut parent, child, _| {
                let cut_here = match tree.min_on_ancestor_path(child.node, parent.node) {
                    Ok(w) => w,
                    Err(e) => {
                        failure.get_or_insert(e);
                        Weight::MAX
                    }
                };
                let need = if child.target { cut_here } else { cut_here.min(child.cost) };
                parent.cost = parent.cost.saturating_add(need);
                parent
            },
        );
        match failure {
            Some(e) => Err(e.into()),
            None => Ok(Some(answer.cost)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtree_engine::test_tree::{finalize, random_tree, sample_distinct, Lcg};
    use vtree_engine::{EngineConfig, TreeBuilder};

    fn config() -> EngineConfig {
        EngineConfig::default().with_min_edge(true)
    }

    /// Exhaustive search over edge subsets (tiny trees only).
    fn brute_force(tree: &StaticTree, marked: &[NodeId]) -> Weight {
        let edges: Vec<(NodeId, Weight)> = (1..=tree.len() as NodeId)
            .filter_map(|v| tree.parent(v).map(|p| (v, tree.root_distance(v) - tree.root_distance(p))))
            .collect();
        let mut best = Weight::MAX;
        for mask in 0u32..(1 << edges.len()) {
            let cut = |v: NodeId| edges.iter().enumerate().any(|(i, &(c, _))| c == v && mask >> i & 1 == 1);
            let separated = marked.iter().all(|&m| {
                let mut u = m;
                loop {
                    if cut(u) {
                        return true;
                    }
                    match tree.parent(u) {
                        Some(p) => u = p,
                        None => return false,
                    }
                }
            });
            if separated {
                let cost: Weight = edges.iter().enumerate().filter(|(i, _)| mask >> i & 1 == 1).map(|(_, &(_, w))| w).sum();
                best = best.min(cost);
            }
        }
        best
    }

    #[test]
    fn test_cut_shares_cheap_edge() {
        //   1 -(10)- 2 -(3)- 3 -(7)- 4
        //                    3 -(8)- 5
        let edges = [(1, 2, 10), (2, 3, 3), (3, 4, 7), (3, 5, 8)];
        let tree = TreeBuilder::with_edges(5, edges).unwrap().finalize_with(1, &config()).unwrap();
        let mut engine = QueryEngine::new(&tree);
        let mut cut = MinCut::new();
        assert_eq!(cut.solve(&mut engine, &[4, 5]).unwrap(), Some(3));
        assert_eq!(cut.solve(&mut engine, &[4]).unwrap(), Some(3));
        assert_eq!(cut.solve(&mut engine, &[2]).unwrap(), Some(10));
    }

    #[test]
    fn test_separate_branches_add_up() {
        let edges = [(1, 2, 4), (1, 3, 6), (2, 4, 9), (3, 5, 1)];
        let tree = TreeBuilder::with_edges(5, edges).unwrap().finalize_with(1, &config()).unwrap();
        let mut engine = QueryEngine::new(&tree);
        assert_eq!(MinCut::new().solve(&mut engine, &[4, 5]).unwrap(), Some(5));
    }

    #[test]
    fn test_marked_root_has_no_cut() {
        let tree = finalize(random_tree(10, 5, 1), 1, &config());
        let mut engine = QueryEngine::new(&tree);
        assert_eq!(MinCut::new().solve(&mut engine, &[1, 3]).unwrap(), None);
    }

    #[test]
    fn test_requires_min_edge_table() {
        let tree = finalize(random_tree(10, 5, 1), 1, &EngineConfig::default());
        let mut engine = QueryEngine::new(&tree);
        assert_eq!(
            MinCut::new().solve(&mut engine, &[3]).unwrap_err(),
            PayloadError::Path(PathError::AggregateDisabled)
        );
    }

    #[test]
    fn test_empty_query_rejected_before_root_is_added() {
        let config = EngineConfig::default().with_min_edge(true);
        let tree = finalize(random_tree(10, 5, 1), 1, &config);
        let mut engine = QueryEngine::new(&tree);
        let mut cut = MinCut::new();
        assert_eq!(
            cut.solve(&mut engine, &[]).unwrap_err(),
            PayloadError::Query(QueryError::Empty)
        );
        assert_eq!(engine.answered(), 0);
        assert!(cut.solve(&mut engine, &[3]).is_ok());
    }

    #[test]
    fn test_with_root_adds_once() {
        let tree = finalize(random_tree(5, 5, 2), 2, &config());
        assert_eq!(with_root(&tree, &[4, 5]), vec![4, 5, 2]);
        assert_eq!(with_root(&tree, &[2, 5]), vec![2, 5]);
    }

    #[test]
    fn test_matches_brute_force() {
        let mut cut = MinCut::new();
        for seed in 0..25u64 {
            let n = 4 + (seed % 9) as usize;
            let root = 1 + (seed % n as u64) as NodeId;
            let tree = finalize(random_tree(n, 20, seed), root, &config());
            let mut engine = QueryEngine::new(&tree);
            let mut lcg = Lcg::new(seed * 3 + 1);
            for k in 1..n.min(5) {
                let marked: Vec<NodeId> = sample_distinct(&mut lcg, n, k)
                    .into_iter()
                    .filter(|&u| u != root)
                    .collect();
                if marked.is_empty() {
                    continue;
                }
                let got = cut.solve(&mut engine, &marked).unwrap();
                assert_eq!(got, Some(brute_force(&tree, &marked)), "seed {seed} marked {marked:?}");
            }
        }
    }
}
