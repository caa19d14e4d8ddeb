//! Benchmark parameter types.

use std::fmt;

use cotree_core::ExecutionStrategy;

/// Parameters for a full gauge benchmark run.
#[derive(Clone, Debug)]
pub struct GaugeBenchParams {
    /// Cells per side of the grid.
    pub side: usize,
    /// Number of mesh edges.
    pub edges: usize,
    /// Strategy used for classification.
    pub strategy: ExecutionStrategy,
}

impl fmt::Display for GaugeBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strategy = match self.strategy {
            ExecutionStrategy::Auto => "auto",
            ExecutionStrategy::Sequential => "seq",
            ExecutionStrategy::Parallel => "par",
        };
        write!(f, "side={},E={},{strategy}", self.side, self.edges)
    }
}

/// Parameters for a single-stage benchmark run.
#[derive(Clone, Debug)]
pub struct StageBenchParams {
    /// Cells per side of the grid.
    pub side: usize,
    /// Number of mesh edges.
    pub edges: usize,
}

impl fmt::Display for StageBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "side={},E={}", self.side, self.edges)
    }
}
