//! Formulas in Conjunctive Normal Form (CNF)
//!
//! A [Formula] is a conjunction of [Clause]s, and a clause is a disjunction of [Literal]s.
//!
//! ```rust
//! use dpll::{formula, Formula};
//!
//! let f = formula![["A", "B"], ["-A", "C"], ["-B", "-C"]];
//! assert_eq!(f.to_string(), "(A ∨ B) ∧ (¬A ∨ C) ∧ (¬B ∨ ¬C)");
//! assert_eq!(f.variables().len(), 3);
//!
//! // Formulas can also be exchanged in DIMACS format
//! let g = Formula::from_dimacs(&f.to_dimacs()).unwrap();
//! assert_eq!(g.to_string(), "(x1 ∨ x2) ∧ (¬x1 ∨ x3) ∧ (¬x2 ∨ ¬x3)");
//! ```

mod clause;
mod cnf;
mod dimacs;
mod error;
mod literal;

pub use clause::Clause;
pub use cnf::{Formula, FormulaStats};
pub use error::{ValidationError, ValidationErrorKind};
pub use literal::{Literal, Variable};
