use serde::Serialize;
use std::{fmt, time::Duration};

/// Counters accumulated over one whole search
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Statistics {
    /// Number of recursive calls
    pub nodes: usize,
    /// Number of unit clauses propagated
    pub unit_propagations: usize,
    /// Number of pure literals eliminated
    pub pure_literals: usize,
    /// Number of times the negative branch is tried after the positive one failed
    pub backtracks: usize,
    /// Deepest recursion reached, the root call is depth 1
    pub max_depth: usize,
    pub elapsed: Duration,
}

impl Statistics {
    pub(crate) fn enter(&mut self, depth: usize) {
        self.nodes += 1;
        self.max_depth = self.max_depth.max(depth);
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nodes:             {}", self.nodes)?;
        writeln!(f, "unit propagations: {}", self.unit_propagations)?;
        writeln!(f, "pure literals:     {}", self.pure_literals)?;
        writeln!(f, "backtracks:        {}", self.backtracks)?;
        writeln!(f, "max depth:         {}", self.max_depth)?;
        write!(f, "elapsed:           {:?}", self.elapsed)
    }
}
