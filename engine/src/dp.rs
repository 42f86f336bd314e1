//! Generic tree DP over a virtual tree
//!
//! The driver knows nothing about any particular problem. It walks the
//! virtual tree with an explicit stack and calls back into the payload:
//!
//! - `init(node, is_marked)` creates the base state of a node when it is first
//!   entered,
//! - `combine(parent, &child, weight)` folds a finished child into its parent
//!   (post-order),
//! - `push(&parent, child, weight)` corrects a child from its finished parent
//!   (pre-order, optional second pass).
//!
//! States live in a positional arena owned by the driver and reused across
//! queries; only `len()` slots are reset per run.

use crate::node::{NodeId, Weight};
use crate::virtual_tree::VirtualTree;

#[derive(Debug, Clone)]
pub struct DpDriver<S> {
    states: Vec<S>,
    /// (position, next child index)
    stack: Vec<(u32, u32)>,
}

impl<S: Default> Default for DpDriver<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Default> DpDriver<S> {
    pub fn new() -> Self {
        DpDriver {
            states: Vec::new(),
            stack: Vec::new(),
        }
    }

    /// Bottom-up pass. Returns the root's final state.
    ///
    /// # Panics
    ///
    /// Panics if `vt` has never been built (`vt.is_empty()`), since there is
    /// no root state to return. `QueryEngine::run_query` never hands out such
    /// a tree.
    pub fn run_up<I, C>(&mut self, vt: &VirtualTree, mut init: I, mut combine: C) -> &S
    where
        I: FnMut(NodeId, bool) -> S,
        C: FnMut(S, &S, Weight) -> S,
    {
        self.states.clear();
        self.states.resize_with(vt.len(), S::default);
        self.stack.clear();

        let root = vt.root();
        self.states[root] = init(vt.node(root), vt.is_marked(root));
        self.stack.push((root as u32, 0));

        while let Some(top) = self.stack.last_mut() {
            let pos = top.0 as usize;
            if let Some(&child) = vt.children(pos).get(top.1 as usize) {
                top.1 += 1;
                let c = child as usize;
                self.states[c] = init(vt.node(c), vt.is_marked(c));
                self.stack.push((child, 0));
                continue;
            }
            self.stack.pop();
            if let Some(parent) = vt.parent(pos) {
                let child_state = std::mem::take(&mut self.states[pos]);
                let parent_state = std::mem::take(&mut self.states[parent]);
                self.states[parent] = combine(parent_state, &child_state, vt.weight(pos));
                self.states[pos] = child_state;
            }
        }

        &self.states[root]
    }

    /// Top-down pass over the states left by `run_up`: every child is
    /// replaced by `push(&parent, child, weight)`, parents before children.
    /// Does nothing on an empty tree.
    ///
    /// # Panics
    ///
    /// Panics if the stored states were not produced by `run_up` on `vt`.
    pub fn propagate_down<P>(&mut self, vt: &VirtualTree, mut push: P)
    where
        P: FnMut(&S, S, Weight) -> S,
    {
        if vt.is_empty() {
            self.states.clear();
            return;
        }
        assert_eq!(
            self.states.len(),
            vt.len(),
            "propagate_down needs the states of run_up on the same tree"
        );
        self.stack.clear();
        self.stack.push((vt.root() as u32, 0));

        while let Some((pos, _)) = self.stack.pop() {
            let pos = pos as usize;
            for &child in vt.children(pos) {
                let c = child as usize;
                let child_state = std::mem::take(&mut self.states[c]);
                self.states[c] = push(&self.states[pos], child_state, vt.weight(c));
                self.stack.push((child, 0));
            }
        }
    }

    /// Final states by virtual-tree position
    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn state(&self, pos: usize) -> &S {
        &self.states[pos]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::query::QueryEngine;
    use crate::test_tree::{finalize, path_tree, star_tree};

    #[test]
    fn test_subtree_marked_count() {
        let tree = finalize(star_tree(3, 1), 1, &EngineConfig::default());
        let mut engine = QueryEngine::new(&tree);
        let vt = engine.run_query(&[2, 3, 4]).unwrap();
        let mut driver = DpDriver::<u32>::new();
        let root = *driver.run_up(vt, |_, marked| marked as u32, |p, c, _| p + c);
        assert_eq!(root, 3);
    }

    #[test]
    fn test_combine_sees_edge_weights() {
        let tree = finalize(path_tree(5, 1), 1, &EngineConfig::default());
        let mut engine = QueryEngine::new(&tree);
        let vt = engine.run_query(&[2, 4]).unwrap();
        let mut driver = DpDriver::<i64>::new();
        let total = *driver.run_up(vt, |_, _| 0, |p, c, w| p + c + w);
        assert_eq!(total, 2);
    }

    #[test]
    fn test_single_node_base_case() {
        let tree = finalize(path_tree(3, 1), 1, &EngineConfig::default());
        let mut engine = QueryEngine::new(&tree);
        let vt = engine.run_query(&[3]).unwrap();
        let mut driver = DpDriver::<u64>::new();
        let mut calls = 0;
        let root = *driver.run_up(vt, |u, _| u as u64 * 10, |p, _, _| {
            calls += 1;
            p
        });
        assert_eq!(root, 30);
        assert_eq!(calls, 0);
        driver.propagate_down(vt, |_, c, _| c + 1);
        assert_eq!(driver.states(), &[30]);
    }

    #[test]
    fn test_propagate_down_depth_from_root() {
        let tree = finalize(path_tree(6, 2), 1, &EngineConfig::default());
        let mut engine = QueryEngine::new(&tree);
        let vt = engine.run_query(&[1, 3, 6]).unwrap();
        let mut driver = DpDriver::<i64>::new();
        driver.run_up(vt, |_, _| 0, |p, _, _| p);
        driver.propagate_down(vt, |p, _, w| p + w);
        for (pos, &d) in driver.states().iter().enumerate() {
            assert_eq!(d, tree.root_distance(vt.node(pos)));
        }
    }

    #[test]
    fn test_propagate_down_on_unbuilt_tree_is_noop() {
        let tree = finalize(path_tree(3, 1), 1, &EngineConfig::default());
        let engine = QueryEngine::new(&tree);
        let mut driver = DpDriver::<i64>::new();
        driver.propagate_down(engine.current(), |p, _, w| p + w);
        assert!(driver.states().is_empty());
    }

    #[test]
    #[should_panic]
    fn test_run_up_on_unbuilt_tree_panics() {
        let tree = finalize(path_tree(3, 1), 1, &EngineConfig::default());
        let engine = QueryEngine::new(&tree);
        let mut driver = DpDriver::<i64>::new();
        driver.run_up(engine.current(), |_, _| 0, |p, _, _| p);
    }

    #[test]
    fn test_deep_virtual_tree() {
        let n = 100_000;
        let tree = finalize(path_tree(n, 1), 1, &EngineConfig::default());
        let marked: Vec<NodeId> = (1..=n as NodeId).collect();
        let mut engine = QueryEngine::new(&tree);
        let vt = engine.run_query(&marked).unwrap();
        let mut driver = DpDriver::<i64>::new();
        let total = *driver.run_up(vt, |_, _| 0, |p, c, w| p + c + w);
        assert_eq!(total, n as i64 - 1);
    }
}
