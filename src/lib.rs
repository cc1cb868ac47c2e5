//! Davis-Putnam-Logemann-Loveland (DPLL) SAT solver for formulas in Conjunctive Normal Form
//!
//! ```rust
//! use dpll::{formula, DPLL};
//!
//! let f = formula![["A", "B"], ["-A", "C"], ["-B", "-C"]];
//! let report = DPLL::default().solve(&f);
//! assert!(report.is_satisfiable());
//! ```

mod dpll;
mod formula;
mod selector;
mod simplify;

#[cfg(test)]
mod testing;

pub use dpll::*;
pub use formula::*;
pub use selector::*;
pub use simplify::*;

use serde::Serialize;
use std::collections::BTreeMap;

/// Truth values of variables along one search path
pub type Assignment = BTreeMap<Variable, bool>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Solution {
    /// Find a satisfying assignment
    Sat(Assignment),
    /// Prove unsatisfiability
    UnSat,
}

impl Solution {
    pub fn as_sat(&self) -> Option<&Assignment> {
        match self {
            Solution::Sat(assignment) => Some(assignment),
            Solution::UnSat => None,
        }
    }
}
