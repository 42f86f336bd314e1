//! Per-query entry point
//!
//! A `QueryEngine` borrows a finalized `StaticTree` and owns every per-query
//! buffer: the sorted marked set, the builder's scratch and the virtual tree
//! arena. Queries run one at a time; independent engines over the same tree
//! can run on separate threads.

use crate::builder::{self, VirtualTreeBuilder};
use crate::config::BuildStrategy;
use crate::error::QueryError;
use crate::node::NodeId;
use crate::order::sort_by_discovery;
use crate::static_tree::StaticTree;
use crate::virtual_tree::VirtualTree;

pub struct QueryEngine<'t> {
    tree: &'t StaticTree,
    builder: Box<dyn VirtualTreeBuilder>,
    marked: Vec<NodeId>,
    vtree: VirtualTree,
    answered: u64,
}

impl<'t> QueryEngine<'t> {
    /// Engine using the strategy from the tree's configuration
    pub fn new(tree: &'t StaticTree) -> Self {
        Self::with_strategy(tree, tree.config().strategy)
    }

    pub fn with_strategy(tree: &'t StaticTree, strategy: BuildStrategy) -> Self {
        Self::with_builder(tree, builder::for_strategy(strategy))
    }

    pub fn with_builder(tree: &'t StaticTree, builder: Box<dyn VirtualTreeBuilder>) -> Self {
        QueryEngine {
            tree,
            builder,
            marked: Vec::new(),
            vtree: VirtualTree::with_capacity(tree.len()),
            answered: 0,
        }
    }

    pub fn tree(&self) -> &'t StaticTree {
        self.tree
    }

    pub fn strategy(&self) -> BuildStrategy {
        self.builder.strategy()
    }

    /// Number of queries answered so far
    pub fn answered(&self) -> u64 {
        self.answered
    }

    /// Build the virtual tree of `marked`.
    ///
    /// The query is validated before any node-indexed slot is written, so a
    /// rejected query leaves the previous virtual tree intact.
    pub fn run_query(&mut self, marked: &[NodeId]) -> Result<&VirtualTree, QueryError> {
        if marked.is_empty() {
            return Err(QueryError::Empty);
        }
        let n = self.tree.len();
        if let Some(&node) = marked.iter().find(|&&u| !self.tree.contains(u)) {
            return Err(QueryError::NodeOutOfRange { node, n });
        }

        self.marked.clear();
        self.marked.extend_from_slice(marked);
        sort_by_discovery(self.tree, &mut self.marked);
        if let Some(pair) = self.marked.windows(2).find(|w| w[0] == w[1]) {
            return Err(QueryError::Duplicate { node: pair[0] });
        }

        self.builder.build(self.tree, &self.marked, &mut self.vtree);
        self.answered += 1;
        tracing::trace!(
            marked = self.marked.len(),
            virtual_nodes = self.vtree.len(),
            strategy = %self.builder.strategy(),
            "virtual tree built"
        );
        Ok(&self.vtree)
    }

    /// The most recently built virtual tree
    pub fn current(&self) -> &VirtualTree {
        &self.vtree
    }
}

/// Benchmark helper for the CLI
///
/// Builds a random tree of `nodes` nodes, then answers `queries` random
/// queries whose marked sets together hold about `2 * nodes` ids.
/// Returns (queries_per_sec, duration_ms) for the query phase only.
pub fn benchmark_throughput(nodes: usize, queries: usize, strategy: BuildStrategy) -> (f64, u64) {
    use crate::config::EngineConfig;
    use crate::test_tree::{finalize, random_tree, sample_distinct, Lcg};
    use std::time::Instant;

    let tree = finalize(random_tree(nodes, 100, 12345), 1, &EngineConfig::default());
    let mut lcg = Lcg::new(777);
    let per_query = (2 * nodes / queries.max(1)).clamp(1, nodes);
    let batches: Vec<Vec<NodeId>> = (0..queries)
        .map(|_| sample_distinct(&mut lcg, nodes, per_query))
        .collect();

    let mut engine = QueryEngine::with_strategy(&tree, strategy);
    let start = Instant::now();
    let mut checksum = 0usize;
    for marked in &batches {
        if let Ok(vt) = engine.run_query(marked) {
            checksum += vt.len();
        }
    }
    let duration = start.elapsed();
    tracing::debug!(checksum, "benchmark finished");

    let per_sec = queries as f64 / duration.as_secs_f64();
    (per_sec, duration.as_millis() as u64)
}
