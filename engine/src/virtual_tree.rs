//! Virtual tree arena
//!
//! Nodes are addressed by position (`0..len`) in the order the builder interned
//! them. The node-id to position map is the only array sized by the static
//! tree; `reset` clears exactly the slots the previous query set, so a query
//! over k marked nodes costs O(k) no matter how large the tree is.

use crate::node::{NodeId, Weight, UNSET};
use crate::static_tree::StaticTree;

#[derive(Debug, Clone)]
pub struct VirtualTree {
    /// node id -> position, `UNSET` when not in the current tree
    slot: Vec<u32>,
    nodes: Vec<NodeId>,
    parent: Vec<u32>,
    weight: Vec<Weight>,
    marked: Vec<bool>,
    marked_nodes: Vec<NodeId>,
    child_start: Vec<u32>,
    children: Vec<u32>,
    fill: Vec<u32>,
    root: u32,
}

impl VirtualTree {
    /// Create an empty arena for a static tree of `n` nodes
    pub fn with_capacity(n: usize) -> Self {
        VirtualTree {
            slot: vec![UNSET; n + 1],
            nodes: Vec::new(),
            parent: Vec::new(),
            weight: Vec::new(),
            marked: Vec::new(),
            marked_nodes: Vec::new(),
            child_start: Vec::new(),
            children: Vec::new(),
            fill: Vec::new(),
            root: UNSET,
        }
    }

    /// Forget the current tree, touching only its own slots.
    pub(crate) fn reset(&mut self) {
        for &u in &self.nodes {
            self.slot[u as usize] = UNSET;
        }
        self.nodes.clear();
        self.parent.clear();
        self.weight.clear();
        self.marked.clear();
        self.marked_nodes.clear();
        self.child_start.clear();
        self.children.clear();
        self.root = UNSET;
    }

    /// Position of `u`, adding it as a parentless node if unseen
    pub(crate) fn intern(&mut self, u: NodeId) -> u32 {
        let s = self.slot[u as usize];
        if s != UNSET {
            return s;
        }
        let pos = self.nodes.len() as u32;
        self.slot[u as usize] = pos;
        self.nodes.push(u);
        self.parent.push(UNSET);
        self.weight.push(0);
        self.marked.push(false);
        pos
    }

    /// Record `parent` as the virtual parent of `child`; `parent` must be a
    /// proper ancestor of `child` in `tree`.
    pub(crate) fn link(&mut self, tree: &StaticTree, parent: NodeId, child: NodeId) {
        debug_assert!(parent != child && tree.is_ancestor(parent, child));
        let p = self.intern(parent);
        let c = self.intern(child) as usize;
        self.parent[c] = p;
        self.weight[c] = tree.root_distance(child) - tree.root_distance(parent);
    }

    /// Flag marked nodes, locate the root and lay out child lists.
    pub(crate) fn seal(&mut self, marked: &[NodeId]) {
        self.marked_nodes.extend_from_slice(marked);
        for &u in marked {
            let pos = self.intern(u);
            self.marked[pos as usize] = true;
        }

        let len = self.nodes.len();
        self.child_start.resize(len + 1, 0);
        for pos in 0..len {
            match self.parent[pos] {
                UNSET => {
                    debug_assert_eq!(self.root, UNSET, "virtual tree has two roots");
                    self.root = pos as u32;
                }
                p => self.child_start[p as usize + 1] += 1,
            }
        }
        for pos in 1..=len {
            self.child_start[pos] += self.child_start[pos - 1];
        }

        self.children.resize(len.saturating_sub(1), 0);
        self.fill.clear();
        self.fill.extend_from_slice(&self.child_start[..len]);
        for pos in 0..len {
            let p = self.parent[pos];
            if p != UNSET {
                let at = &mut self.fill[p as usize];
                self.children[*at as usize] = pos as u32;
                *at += 1;
            }
        }
    }

    /// Number of virtual nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Position of the root
    pub fn root(&self) -> usize {
        self.root as usize
    }

    /// Static node id at `pos`
    pub fn node(&self, pos: usize) -> NodeId {
        self.nodes[pos]
    }

    /// Static node ids by position
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Position of static node `u`, if it is in the tree
    pub fn position(&self, u: NodeId) -> Option<usize> {
        match self.slot.get(u as usize) {
            Some(&s) if s != UNSET => Some(s as usize),
            _ => None,
        }
    }

    /// Position of the virtual parent, `None` for the root
    pub fn parent(&self, pos: usize) -> Option<usize> {
        match self.parent[pos] {
            UNSET => None,
            p => Some(p as usize),
        }
    }

    /// Weight of the edge from `pos` up to its virtual parent (0 for the root)
    pub fn weight(&self, pos: usize) -> Weight {
        self.weight[pos]
    }

    pub fn children(&self, pos: usize) -> &[u32] {
        let (lo, hi) = (self.child_start[pos], self.child_start[pos + 1]);
        &self.children[lo as usize..hi as usize]
    }

    /// Whether the node at `pos` was marked by the query (as opposed to an inserted LCA)
    pub fn is_marked(&self, pos: usize) -> bool {
        self.marked[pos]
    }

    /// The query's marked nodes in discovery order
    pub fn marked(&self) -> &[NodeId] {
        &self.marked_nodes
    }

    /// `(parent, child, weight)` in static node ids, one per virtual edge
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, Weight)> + '_ {
        (0..self.len()).filter_map(move |pos| {
            self.parent(pos)
                .map(|p| (self.nodes[p], self.nodes[pos], self.weight[pos]))
        })
    }

    /// Sum of all virtual edge weights (the Steiner tree weight)
    pub fn total_weight(&self) -> Weight {
        self.weight.iter().sum()
    }
}
