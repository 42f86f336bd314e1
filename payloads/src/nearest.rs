//! Nearest-owner assignment
//!
//! Every marked node owns itself. Every other virtual node is assigned the
//! closest marked node, ties going to the smaller node id. Owners below a node
//! are found in the bottom-up pass; owners above or in sibling subtrees arrive
//! through the top-down pass.
//!
//! This is the multi-source spread over the virtual tree: every marked node
//! starts a front at distance 0 and each node keeps the first front to reach it.

use crate::{Payload, PayloadError};
use vtree_engine::{DpDriver, NodeId, QueryEngine, Weight};

/// (distance, owner), compared lexicographically
type Candidate = Option<(Weight, NodeId)>;

fn closer(a: Candidate, b: Candidate) -> Candidate {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (x, y) => x.or(y),
    }
}

fn shifted(c: Candidate, w: Weight) -> Candidate {
    c.map(|(d, owner)| (d + w, owner))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Assignment {
    pub node: NodeId,
    pub owner: NodeId,
    pub distance: Weight,
}

#[derive(Debug, Default)]
pub struct NearestOwner {
    driver: DpDriver<Candidate>,
}

impl NearestOwner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Payload for NearestOwner {
    /// One assignment per virtual-tree node, sorted by node id
    type Answer = Vec<Assignment>;

    fn solve(&mut self, engine: &mut QueryEngine<'_>, marked: &[NodeId]) -> Result<Vec<Assignment>, PayloadError> {
        let vt = engine.run_query(marked)?;
        self.driver.run_up(
            vt,
            |node, is_marked| is_marked.then_some((0, node)),
            |parent, child, w| closer(parent, shifted(*child, w)),
        );
        self.driver
            .propagate_down(vt, |parent, child, w| closer(child, shifted(*parent, w)));

        let mut out: Vec<Assignment> = self
            .driver
            .states()
            .iter()
            .enumerate()
            .filter_map(|(pos, c)| {
                c.map(|(distance, owner)| Assignment {
                    node: vt.node(pos),
                    owner,
                    distance,
                })
            })
            .collect();
        out.sort_unstable();
        tracing::trace!(assigned = out.len(), "nearest owners resolved");
        Ok(out)
    }
}
