//! Depth / discovery-order preprocessing
//!
//! One iterative depth-first traversal assigns every node its depth, pre-order
//! discovery index, exit index (last discovery index inside its subtree),
//! direct parent, parent-edge weight and weighted distance from the root.
//!
//! The traversal keeps an explicit stack of frames instead of recursing, so a
//! chain of a million nodes is as cheap as a star. Each frame remembers its
//! adjacency cursor and resumes exactly where it left off, so every adjacency
//! slot is read once.

use crate::error::TreeError;
use crate::node::{Adjacency, NodeId, Weight, SENTINEL, UNSET};

/// Per-node results of the traversal, indexed by `NodeId` (slot 0 is the sentinel).
#[derive(Debug, Clone)]
pub(crate) struct EulerTour {
    pub depth: Vec<u32>,
    pub discovery: Vec<u32>,
    pub exit: Vec<u32>,
    pub parent: Vec<NodeId>,
    pub parent_weight: Vec<Weight>,
    pub root_dist: Vec<Weight>,
    /// `order[d]` is the node with discovery index `d`; `order[0]` is the sentinel.
    pub order: Vec<NodeId>,
}

struct Frame {
    node: NodeId,
    /// Edge id used to enter `node` (`UNSET` for the root)
    via: u32,
    cursor: u32,
}

/// Traverse the tree from `root`.
///
/// Fails with `Cycle` when a non-parent edge reaches an already discovered
/// node, and with `Disconnected` when some node was never discovered.
pub(crate) fn traverse(adj: &Adjacency, n: usize, root: NodeId) -> Result<EulerTour, TreeError> {
    let mut tour = EulerTour {
        depth: vec![0; n + 1],
        discovery: vec![0; n + 1],
        exit: vec![0; n + 1],
        parent: vec![SENTINEL; n + 1],
        parent_weight: vec![0; n + 1],
        root_dist: vec![0; n + 1],
        order: Vec::with_capacity(n + 1),
    };
    tour.order.push(SENTINEL);

    let mut timer = 1u32;
    tour.discovery[root as usize] = timer;
    tour.depth[root as usize] = 1;
    tour.order.push(root);

    let mut stack = vec![Frame {
        node: root,
        via: UNSET,
        cursor: adj.start(root),
    }];
    while let Some(frame) = stack.last_mut() {
        let u = frame.node;
        if frame.cursor == adj.end(u) {
            tour.exit[u as usize] = timer;
            stack.pop();
            continue;
        }
        let (v, w, edge) = adj.slot(frame.cursor);
        frame.cursor += 1;
        if edge == frame.via {
            continue;
        }
        if tour.discovery[v as usize] != 0 {
            return Err(TreeError::Cycle { u, v });
        }

        timer += 1;
        let (ui, vi) = (u as usize, v as usize);
        tour.discovery[vi] = timer;
        tour.depth[vi] = tour.depth[ui] + 1;
        tour.parent[vi] = u;
        tour.parent_weight[vi] = w;
        tour.root_dist[vi] = tour.root_dist[ui] + w;
        tour.order.push(v);
        stack.push(Frame {
            node: v,
            via: edge,
            cursor: adj.start(v),
        });
    }

    if timer as usize != n {
        let node = (1..=n as NodeId)
            .find(|&u| tour.discovery[u as usize] == 0)
            .unwrap_or(SENTINEL);
        return Err(TreeError::Disconnected { node, root });
    }
    Ok(tour)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tour_of(n: usize, edges: &[(NodeId, NodeId, Weight)], root: NodeId) -> Result<EulerTour, TreeError> {
        traverse(&Adjacency::from_edges(n, edges), n, root)
    }

    #[test]
    fn test_path_depths_and_distances() {
        let tour = tour_of(4, &[(1, 2, 3), (2, 3, 4), (3, 4, 5)], 1).unwrap();
        assert_eq!(&tour.depth[1..], &[1, 2, 3, 4]);
        assert_eq!(&tour.root_dist[1..], &[0, 3, 7, 12]);
        assert_eq!(&tour.parent[1..], &[SENTINEL, 1, 2, 3]);
        assert_eq!(&tour.order[1..], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_exit_bounds_subtree() {
        // 1 -> {2 -> {4, 5}, 3}
        let tour = tour_of(5, &[(1, 2, 1), (1, 3, 1), (2, 4, 1), (2, 5, 1)], 1).unwrap();
        assert_eq!(tour.exit[1], 5);
        let size2 = tour.exit[2] - tour.discovery[2] + 1;
        assert_eq!(size2, 3);
        assert_eq!(tour.exit[3], tour.discovery[3]);
    }

    #[test]
    fn test_rerooting_changes_parents() {
        let tour = tour_of(3, &[(1, 2, 1), (2, 3, 1)], 3).unwrap();
        assert_eq!(tour.parent[3], SENTINEL);
        assert_eq!(tour.parent[2], 3);
        assert_eq!(tour.parent[1], 2);
        assert_eq!(tour.depth[1], 3);
    }

    #[test]
    fn test_cycle_detected() {
        // 4 nodes, 3 edges, but 1-2-3 is a triangle and 4 is isolated
        let err = tour_of(4, &[(1, 2, 1), (2, 3, 1), (3, 1, 1)], 1).unwrap_err();
        assert!(matches!(err, TreeError::Cycle { .. }));
    }

    #[test]
    fn test_parallel_edge_is_a_cycle() {
        let err = tour_of(3, &[(1, 2, 1), (2, 1, 1)], 1).unwrap_err();
        assert!(matches!(err, TreeError::Cycle { .. }));
    }

    #[test]
    fn test_disconnected_reports_node() {
        // the self loop sits on a node the traversal never reaches
        let err = tour_of(3, &[(1, 2, 1), (3, 3, 1)], 1).unwrap_err();
        assert_eq!(err, TreeError::Disconnected { node: 3, root: 1 });
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let n = 300_000;
        let edges: Vec<_> = (1..n as NodeId).map(|u| (u, u + 1, 1)).collect();
        let tour = tour_of(n, &edges, 1).unwrap();
        assert_eq!(tour.depth[n], n as u32);
        assert_eq!(tour.root_dist[n], n as Weight - 1);
    }
}
