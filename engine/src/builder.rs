//! Virtual tree construction
//!
//! Two interchangeable algorithms behind one trait. Both expect the marked
//! nodes already validated and sorted by discovery index, and both produce a
//! tree holding the marked nodes plus the LCAs of discovery-adjacent pairs,
//! which is closed under pairwise LCA and has at most `2k - 1` nodes.

use crate::config::BuildStrategy;
use crate::node::NodeId;
use crate::order::sort_by_discovery;
use crate::static_tree::StaticTree;
use crate::virtual_tree::VirtualTree;

pub trait VirtualTreeBuilder: Send {
    fn strategy(&self) -> BuildStrategy;

    /// Add every virtual node and edge for `marked` to the freshly reset `out`.
    fn connect(&mut self, tree: &StaticTree, marked: &[NodeId], out: &mut VirtualTree);

    /// Replace the contents of `out` with the virtual tree of `marked`.
    ///
    /// `marked` must be non-empty, duplicate free and sorted by discovery index.
    fn build(&mut self, tree: &StaticTree, marked: &[NodeId], out: &mut VirtualTree) {
        debug_assert!(!marked.is_empty());
        debug_assert!(crate::order::is_discovery_sorted(tree, marked));
        out.reset();
        self.connect(tree, marked, out);
        out.seal(marked);
    }
}

/// Builder for the given strategy
pub fn for_strategy(strategy: BuildStrategy) -> Box<dyn VirtualTreeBuilder> {
    match strategy {
        BuildStrategy::DoubleSort => Box::new(DoubleSort::default()),
        BuildStrategy::MonotonicStack => Box::new(MonotonicStack::default()),
    }
}

/// Insert the LCA of every discovery-adjacent pair, sort again and dedup.
/// The parent of each node is then the LCA of it and its predecessor.
#[derive(Debug, Default)]
pub struct DoubleSort {
    scratch: Vec<NodeId>,
}

impl VirtualTreeBuilder for DoubleSort {
    fn strategy(&self) -> BuildStrategy {
        BuildStrategy::DoubleSort
    }

    fn connect(&mut self, tree: &StaticTree, marked: &[NodeId], out: &mut VirtualTree) {
        self.scratch.clear();
        self.scratch.extend_from_slice(marked);
        for pair in marked.windows(2) {
            self.scratch.push(tree.lca(pair[0], pair[1]));
        }
        sort_by_discovery(tree, &mut self.scratch);
        self.scratch.dedup();

        out.intern(self.scratch[0]);
        for pair in self.scratch.windows(2) {
            let parent = tree.lca(pair[0], pair[1]);
            out.link(tree, parent, pair[1]);
        }
    }
}

/// Keep the rightmost root-to-leaf path of the partial tree on a stack. Each
/// new node pops the entries that are not its ancestors, linking them on the
/// way out, and splices in the LCA when it is not on the stack yet.
#[derive(Debug, Default)]
pub struct MonotonicStack {
    stack: Vec<NodeId>,
}

impl MonotonicStack {
    fn top(&self) -> NodeId {
        self.stack[self.stack.len() - 1]
    }
}

impl VirtualTreeBuilder for MonotonicStack {
    fn strategy(&self) -> BuildStrategy {
        BuildStrategy::MonotonicStack
    }

    fn connect(&mut self, tree: &StaticTree, marked: &[NodeId], out: &mut VirtualTree) {
        self.stack.clear();
        self.stack.push(marked[0]);
        out.intern(marked[0]);

        for &x in &marked[1..] {
            let l = tree.lca(x, self.top());
            // Entries strictly below l leave the rightmost path. Each hangs off
            // the entry beneath it; the last one popped hangs off l.
            let mut last = None;
            while let Some(&top) = self.stack.last() {
                if tree.discovery(top) <= tree.discovery(l) {
                    break;
                }
                self.stack.pop();
                if let Some(child) = last {
                    out.link(tree, top, child);
                }
                last = Some(top);
            }
            if let Some(child) = last {
                if self.stack.last() != Some(&l) {
                    self.stack.push(l);
                }
                out.link(tree, l, child);
            }
            self.stack.push(x);
            out.intern(x);
        }

        while let Some(child) = self.stack.pop() {
            match self.stack.last() {
                Some(&parent) => out.link(tree, parent, child),
                None => break,
            }
        }
    }
}
