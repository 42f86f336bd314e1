//! Engine configuration

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Virtual tree construction algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStrategy {
    /// Sort, insert consecutive LCAs, sort again and dedup
    DoubleSort,
    /// Single pass keeping the rightmost path on a stack
    #[default]
    MonotonicStack,
}

impl fmt::Display for BuildStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BuildStrategy::DoubleSort => "double-sort",
            BuildStrategy::MonotonicStack => "monotonic-stack",
        })
    }
}

impl FromStr for BuildStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "double-sort" | "double_sort" => Ok(BuildStrategy::DoubleSort),
            "monotonic-stack" | "monotonic_stack" | "stack" => Ok(BuildStrategy::MonotonicStack),
            other => Err(format!("unknown build strategy `{other}`")),
        }
    }
}

/// Preprocessing and query options.
///
/// Deserializable so front ends can load it from a config file; missing
/// fields fall back to `Default`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Builder used by `QueryEngine::new`
    pub strategy: BuildStrategy,
    /// Build the min-edge aggregate next to the ancestor table.
    /// Needed by `StaticTree::min_on_ancestor_path`.
    pub track_min_edge: bool,
    /// Node count from which ancestor-table levels are filled in parallel
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            strategy: BuildStrategy::default(),
            track_min_edge: false,
            parallel_threshold: 1 << 16,
        }
    }
}

impl EngineConfig {
    pub fn with_strategy(mut self, strategy: BuildStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_min_edge(mut self, track: bool) -> Self {
        self.track_min_edge = track;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_parse_roundtrip() {
        for s in [BuildStrategy::DoubleSort, BuildStrategy::MonotonicStack] {
            assert_eq!(s.to_string().parse::<BuildStrategy>(), Ok(s));
        }
        assert!("bogus".parse::<BuildStrategy>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.strategy, BuildStrategy::MonotonicStack);
        assert!(!config.track_min_edge);
    }
}
