//! Criterion benchmarks for per-query virtual tree construction
//!
//! 10^5-node random tree, 1000 queries of 200 marked nodes each (2 * N marked in total).

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vtree_engine::test_tree::{finalize, random_tree, sample_distinct, Lcg};
use vtree_engine::{BuildStrategy, DpDriver, EngineConfig, NodeId, QueryEngine, StaticTree};

const NODES: usize = 100_000;
const QUERIES: usize = 1_000;

fn setup() -> (StaticTree, Vec<Vec<NodeId>>) {
    let tree = finalize(random_tree(NODES, 100, 12345), 1, &EngineConfig::default());
    let mut lcg = Lcg::new(777);
    let queries = (0..QUERIES)
        .map(|_| sample_distinct(&mut lcg, NODES, 2 * NODES / QUERIES))
        .collect();
    (tree, queries)
}

fn benchmark_builders(c: &mut Criterion) {
    let (tree, queries) = setup();
    for strategy in [BuildStrategy::DoubleSort, BuildStrategy::MonotonicStack] {
        c.bench_function(&format!("build_1000_queries_{strategy}"), |b| {
            let mut engine = QueryEngine::with_strategy(&tree, strategy);
            b.iter(|| {
                let mut sum = 0usize;
                for marked in black_box(&queries) {
                    if let Ok(vt) = engine.run_query(marked) {
                        sum += vt.len();
                    }
                }
                black_box(sum)
            })
        });
    }
}

fn benchmark_build_and_dp(c: &mut Criterion) {
    let (tree, queries) = setup();
    c.bench_function("build_and_steiner_dp_1000_queries", |b| {
        let mut engine = QueryEngine::new(&tree);
        let mut driver = DpDriver::<i64>::new();
        b.iter(|| {
            let mut sum = 0i64;
            for marked in black_box(&queries) {
                if let Ok(vt) = engine.run_query(marked) {
                    sum += *driver.run_up(vt, |_, _| 0, |p, c, w| p + c + w);
                }
            }
            black_box(sum)
        })
    });
}

criterion_group!(benches, benchmark_builders, benchmark_build_and_dp);
criterion_main!(benches);
