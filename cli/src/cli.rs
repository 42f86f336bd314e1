use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use vtree_engine::BuildStrategy;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML engine config
    #[clap(short, long = "config")]
    pub config_path: Option<PathBuf>,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Read a tree and a batch of queries, print one answer per query
    Run {
        /// DP to run over each virtual tree
        #[clap(short, long, value_enum, default_value_t = PayloadKind::Pairwise)]
        payload: PayloadKind,
        /// [Optional] Input file. Reads stdin when omitted.
        #[clap(short, long)]
        input: Option<PathBuf>,
        /// [Optional] Overrides the configured build strategy
        /// (double-sort or monotonic-stack)
        #[clap(short, long)]
        strategy: Option<BuildStrategy>,
    },
    /// Measure query throughput on a random tree
    Bench {
        #[clap(default_value_t = 1_000_000)]
        nodes: usize,
        #[clap(default_value_t = 10_000)]
        queries: usize,
        #[clap(short, long)]
        strategy: Option<BuildStrategy>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PayloadKind {
    /// Sum, min and max of pairwise distances
    Pairwise,
    /// Cheapest edge cut separating the marked nodes from the root
    MinCut,
    /// Closest marked node for every virtual tree node
    Nearest,
    /// Shortest closed walk through all marked nodes
    Walk,
}
