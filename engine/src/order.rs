//! Discovery-order sorting
//!
//! Every virtual tree build starts by sorting node ids by discovery index.
//! The buffer is sorted in place and never grown, so the same scratch vector
//! can be refilled for each query.

use crate::node::NodeId;
use crate::static_tree::StaticTree;

/// Sort `nodes` by discovery index.
pub fn sort_by_discovery(tree: &StaticTree, nodes: &mut [NodeId]) {
    nodes.sort_unstable_by_key(|&u| tree.discovery(u));
}

/// Check that `nodes` is strictly increasing in discovery order
pub fn is_discovery_sorted(tree: &StaticTree, nodes: &[NodeId]) -> bool {
    nodes
        .windows(2)
        .all(|w| tree.discovery(w[0]) < tree.discovery(w[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::test_tree::{finalize, star_tree};

    #[test]
    fn test_sort_follows_preorder() {
        let tree = finalize(star_tree(4, 1), 1, &EngineConfig::default());
        let mut nodes: Vec<NodeId> = tree.preorder().iter().rev().copied().collect();
        assert!(!is_discovery_sorted(&tree, &nodes));
        sort_by_discovery(&tree, &mut nodes);
        assert_eq!(nodes, tree.preorder());
        assert!(is_discovery_sorted(&tree, &nodes));
    }

    #[test]
    fn test_duplicates_are_not_strictly_sorted() {
        let tree = finalize(star_tree(2, 1), 1, &EngineConfig::default());
        assert!(!is_discovery_sorted(&tree, &[2, 2]));
        assert!(is_discovery_sorted(&tree, &[]));
    }
}
