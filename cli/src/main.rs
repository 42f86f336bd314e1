//! vtree CLI - Batch front end for the virtual tree engine
//!
//! `vtree run` answers a batch of queries read from a file or stdin;
//! `vtree bench` measures raw query throughput on a random tree.

mod cli;
mod config;
mod input;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command, PayloadKind};
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use vtree_engine::query::benchmark_throughput;
use vtree_engine::{EngineConfig, NodeId, QueryEngine, Weight};
use vtree_payloads::{
    Assignment, MinCut, NearestOwner, PairwiseDistances, PairwiseStats, Payload, TreasureWalk,
};

fn setup_logs() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_env("VTREE_LOG")
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("a global tracing subscriber was already installed");
    }
}

fn main() -> anyhow::Result<()> {
    setup_logs();

    let args = Cli::parse();
    let mut config = config::load(args.config_path.as_deref())?;

    match args.command {
        Command::Run {
            payload,
            input,
            strategy,
        } => {
            if let Some(strategy) = strategy {
                config.strategy = strategy;
            }
            if payload == PayloadKind::MinCut {
                config.track_min_edge = true;
            }
            run(payload, input.as_deref(), &config)
        }
        Command::Bench {
            nodes,
            queries,
            strategy,
        } => {
            let strategy = strategy.unwrap_or(config.strategy);
            println!("Running virtual tree query benchmark...");
            println!("Tree: {} nodes, {} queries, {}", nodes, queries, strategy);
            let (per_sec, duration_ms) = benchmark_throughput(nodes, queries, strategy);
            println!("Results:");
            println!("  Duration: {} ms", duration_ms);
            println!("  Throughput: {:.2} queries/sec", per_sec);
            Ok(())
        }
    }
}

fn run(payload: PayloadKind, input: Option<&Path>, config: &EngineConfig) -> anyhow::Result<()> {
    let text = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            text
        }
    };
    let batch = input::parse(&text)?;
    let tree = batch
        .tree
        .finalize_with(batch.root, config)
        .context("malformed tree")?;
    tracing::info!(
        nodes = tree.len(),
        queries = batch.queries.len(),
        payload = ?payload,
        strategy = %config.strategy,
        "tree ready"
    );

    let mut engine = QueryEngine::new(&tree);
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let queries = &batch.queries;
    match payload {
        PayloadKind::Pairwise => {
            answer_all(&mut PairwiseDistances::new(), &mut engine, queries, &mut out, render_pairwise)
        }
        PayloadKind::MinCut => answer_all(&mut MinCut::new(), &mut engine, queries, &mut out, render_cut),
        PayloadKind::Nearest => {
            answer_all(&mut NearestOwner::new(), &mut engine, queries, &mut out, render_owners)
        }
        PayloadKind::Walk => answer_all(&mut TreasureWalk::new(), &mut engine, queries, &mut out, |w| {
            w.to_string()
        }),
    }
}

/// Answer every query in order. A rejected query is logged and reported on
/// its own output line; the remaining queries still run.
fn answer_all<P, W, R>(
    payload: &mut P,
    engine: &mut QueryEngine<'_>,
    queries: &[Vec<NodeId>],
    out: &mut W,
    render: R,
) -> anyhow::Result<()>
where
    P: Payload,
    W: Write,
    R: Fn(&P::Answer) -> String,
{
    let mut rejected = 0usize;
    for (i, marked) in queries.iter().enumerate() {
        match payload.solve(engine, marked) {
            Ok(answer) => writeln!(out, "{}", render(&answer))?,
            Err(e) => {
                rejected += 1;
                tracing::warn!(query = i + 1, error = %e, "query rejected");
                writeln!(out, "error: {e}")?;
            }
        }
    }
    out.flush()?;
    tracing::info!(answered = engine.answered(), rejected, "batch finished");
    Ok(())
}

fn render_optional(w: Option<Weight>) -> String {
    w.map_or_else(|| "-".to_string(), |w| w.to_string())
}

fn render_pairwise(stats: &PairwiseStats) -> String {
    format!(
        "{} {} {}",
        stats.sum,
        render_optional(stats.min),
        render_optional(stats.max)
    )
}

fn render_cut(cut: &Option<Weight>) -> String {
    cut.map_or_else(|| "-1".to_string(), |w| w.to_string())
}

#[allow(clippy::ptr_arg)]
fn render_owners(owners: &Vec<Assignment>) -> String {
    owners
        .iter()
        .map(|a| format!("{}:{}:{}", a.node, a.owner, a.distance))
        .collect::<Vec<_>>()
        .join(" ")
}
