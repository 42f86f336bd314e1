//! Batch input format
//!
//! ```text
//! n q root
//! u v w        (n - 1 edge lines)
//! k x1 .. xk   (q query lines)
//! ```
//! Tokens may be split across lines arbitrarily.

use anyhow::{bail, Context};
use std::str::{FromStr, SplitAsciiWhitespace};
use vtree_engine::{NodeId, TreeBuilder, Weight};

#[derive(Debug)]
pub struct Batch {
    pub tree: TreeBuilder,
    pub root: NodeId,
    pub queries: Vec<Vec<NodeId>>,
}

struct Tokens<'a> {
    iter: SplitAsciiWhitespace<'a>,
}

impl Tokens<'_> {
    fn value<T: FromStr>(&mut self, what: &str) -> anyhow::Result<T>
    where
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let Some(token) = self.iter.next() else {
            bail!("unexpected end of input while reading {what}");
        };
        token
            .parse()
            .with_context(|| format!("invalid {what} `{token}`"))
    }
}

pub fn parse(text: &str) -> anyhow::Result<Batch> {
    let mut tokens = Tokens {
        iter: text.split_ascii_whitespace(),
    };
    let n: usize = tokens.value("node count")?;
    let q: usize = tokens.value("query count")?;
    let root: NodeId = tokens.value("root")?;

    let mut tree = TreeBuilder::new(n);
    for i in 0..n.saturating_sub(1) {
        let u: NodeId = tokens.value("edge endpoint")?;
        let v: NodeId = tokens.value("edge endpoint")?;
        let w: Weight = tokens.value("edge weight")?;
        tree.add_edge(u, v, w)
            .with_context(|| format!("edge {}", i + 1))?;
    }

    let mut queries = Vec::with_capacity(q);
    for _ in 0..q {
        let k: usize = tokens.value("marked count")?;
        let marked = (0..k)
            .map(|_| tokens.value::<NodeId>("marked node"))
            .collect::<anyhow::Result<Vec<_>>>()?;
        queries.push(marked);
    }
    Ok(Batch { tree, root, queries })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_batch() {
        let batch = parse("5 2 1\n1 2 1\n2 3 1\n3 4 1\n4 5 1\n2 2 4\n3 1 3 5\n").unwrap();
        assert_eq!(batch.root, 1);
        assert_eq!(batch.tree.len(), 5);
        assert_eq!(batch.tree.edge_count(), 4);
        assert_eq!(batch.queries, vec![vec![2, 4], vec![1, 3, 5]]);
    }

    #[test]
    fn test_truncated_input() {
        let err = parse("3 1 1\n1 2 1\n").unwrap_err();
        assert!(err.to_string().contains("end of input"));
    }

    #[test]
    fn test_bad_token() {
        let err = parse("3 x 1").unwrap_err();
        assert!(err.to_string().contains("query count"));
    }

    #[test]
    fn test_out_of_range_edge() {
        let err = parse("2 0 1\n1 3 1\n").unwrap_err();
        assert!(format!("{err:#}").contains("outside"));
    }

    #[test]
    fn test_empty_query_is_kept() {
        // rejected later, per query, by the engine
        let batch = parse("1 1 1\n0\n").unwrap();
        assert_eq!(batch.queries, vec![Vec::<NodeId>::new()]);
    }
}
