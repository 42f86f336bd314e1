//! vtree Engine - Virtual tree queries over a large static tree
//!
//! A weighted tree is built once (`TreeBuilder` -> `StaticTree`) with an
//! iterative Euler traversal and a binary-lifting ancestor table. Each query
//! then compresses a small set of marked nodes into a virtual tree holding the
//! marked nodes and their pairwise LCAs, and a generic DP driver runs
//! caller-supplied callbacks over it.
//!
//! The engine has no knowledge of any particular DP; payloads attach through
//! `DpDriver`.

pub mod builder;
pub mod config;
pub mod dp;
pub mod error;
mod euler;
mod lifting;
pub mod node;
pub mod order;
pub mod query;
pub mod static_tree;
pub mod test_tree;
pub mod virtual_tree;

pub use builder::{DoubleSort, MonotonicStack, VirtualTreeBuilder};
pub use config::{BuildStrategy, EngineConfig};
pub use dp::DpDriver;
pub use error::{PathError, QueryError, TreeError};
pub use node::{NodeId, TreeBuilder, Weight};
pub use query::QueryEngine;
pub use static_tree::StaticTree;
pub use virtual_tree::VirtualTree;
