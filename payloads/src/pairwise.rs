//! Sum, minimum and maximum of pairwise distances among marked nodes
//!
//! Each state summarises the marked nodes already merged into a subtree: how
//! many there are, the sum of their distances to the subtree root, and the
//! nearest and farthest of them. When a child subtree is merged, every pair
//! with one end on each side meets at the parent, which is when it is counted.

use crate::{Payload, PayloadError};
use vtree_engine::{DpDriver, NodeId, QueryEngine, Weight};

#[derive(Debug, Clone, Copy, Default)]
struct Partial {
    count: i64,
    dist_sum: Weight,
    nearest: Option<Weight>,
    farthest: Option<Weight>,
}

impl Partial {
    fn marked() -> Self {
        Partial {
            count: 1,
            dist_sum: 0,
            nearest: Some(0),
            farthest: Some(0),
        }
    }
}

/// Distances over all unordered pairs of distinct marked nodes.
/// `min` and `max` are `None` when fewer than two nodes are marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairwiseStats {
    pub sum: Weight,
    pub min: Option<Weight>,
    pub max: Option<Weight>,
}

#[derive(Debug, Default)]
pub struct PairwiseDistances {
    driver: DpDriver<Partial>,
}

impl PairwiseDistances {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Payload for PairwiseDistances {
    type Answer = PairwiseStats;

    fn solve(&mut self, engine: &mut QueryEngine<'_>, marked: &[NodeId]) -> Result<PairwiseStats, PayloadError> {
        let vt = engine.run_query(marked)?;
        let mut stats = PairwiseStats {
            sum: 0,
            min: None,
            max: None,
        };

        self.driver.run_up(
            vt,
            |_, is_marked| if is_marked { Partial::marked() } else { Partial::default() },
            |mut parent, child, w| {
                let near = child.nearest.map(|d| d + w);
                let far = child.farthest.map(|d| d + w);

                stats.sum += parent.dist_sum * child.count + (child.dist_sum + w * child.count) * parent.count;
                if let (Some(a), Some(b)) = (parent.nearest, near) {
                    stats.min = Some(stats.min.map_or(a + b, |m| m.min(a + b)));
                }
                if let (Some(a), Some(b)) = (parent.farthest, far) {
                    stats.max = Some(stats.max.map_or(a + b, |m| m.max(a + b)));
                }

                parent.count += child.count;
                parent.dist_sum += child.dist_sum + w * child.count;
                parent.nearest = match (parent.nearest, near) {
                    (Some(a), Some(b)) => Some(a.min(b)),
                    (a, b) => a.or(b),
                };
                parent.farthest = match (parent.farthest, far) {
                    (Some(a), Some(b)) => Some(a.max(b)),
                    (a, b) => a.or(b),
                };
                parent
            },
        );
        Ok(stats)
    }
}
