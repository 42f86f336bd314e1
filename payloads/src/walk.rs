//! Treasure-collection walk length
//!
//! The shortest closed walk that starts at a marked node and visits every
//! marked node crosses each edge of their Steiner tree exactly twice. The
//! Steiner tree is the virtual tree with its edges expanded, so the answer is
//! twice the sum of virtual edge weights.

use crate::{Payload, PayloadError};
use vtree_engine::{DpDriver, NodeId, QueryEngine, Weight};

#[derive(Debug, Default)]
pub struct TreasureWalk {
    driver: DpDriver<Weight>,
}

impl TreasureWalk {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Payload for TreasureWalk {
    type Answer = Weight;

    fn solve(&mut self, engine: &mut QueryEngine<'_>, marked: &[NodeId]) -> Result<Weight, PayloadError> {
        let vt = engine.run_query(marked)?;
        let steiner = *self.driver.run_up(vt, |_, _| 0, |parent, child, w| parent + child + w);
        Ok(2 * steiner)
    }
}
