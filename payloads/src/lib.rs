//! vtree Payloads - Tree DPs attached to the virtual tree engine
//!
//! Each payload owns a `DpDriver` for its state type and answers one query at
//! a time through `Payload::solve`. Payloads only use the engine's public
//! hooks (`QueryEngine::run_query`, `DpDriver::run_up`,
//! `DpDriver::propagate_down`), so adding one never touches the engine.

pub mod min_cut;
pub mod nearest;
pub mod pairwise;
pub mod walk;

use thiserror::Error;
use vtree_engine::{NodeId, PathError, QueryEngine, QueryError};

pub use min_cut::MinCut;
pub use nearest::{Assignment, NearestOwner};
pub use pairwise::{PairwiseDistances, PairwiseStats};
pub use walk::TreasureWalk;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Path(#[from] PathError),
}

/// A DP answered over the virtual tree of one marked set
pub trait Payload {
    type Answer;

    fn solve(&mut self, engine: &mut QueryEngine<'_>, marked: &[NodeId]) -> Result<Self::Answer, PayloadError>;
}
