use crate::{simplify, Assignment, Formula, Heuristic, Literal, Solution};
use serde::Serialize;
use std::time::Instant;

mod conflict;
mod statistics;

pub use conflict::{conflict_analysis, ConflictAnalysis, UnitConflict};
pub use statistics::Statistics;

/// Outcome of [DPLL::solve]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub solution: Solution,
    pub statistics: Statistics,
}

impl Report {
    pub fn is_satisfiable(&self) -> bool {
        self.solution.as_sat().is_some()
    }

    pub fn assignment(&self) -> Option<&Assignment> {
        self.solution.as_sat()
    }
}

/// Davis-Putnam-Logemann-Loveland (DPLL) solver
///
/// Each recursive call
///
/// 1. returns SAT for the empty formula, and UNSAT if an empty clause exists,
/// 2. otherwise simplifies the formula, and restarts on the result if any assignment was forced,
/// 3. otherwise branches on the variable chosen by the [Heuristic], trying `true` before `false`.
///
/// Formulas and assignments are passed by value, so abandoning a branch needs no undo.
///
/// Assignments returned by [DPLL::solve] and [DPLL::find_all_solutions] cover every
/// variable of the input formula. Variables left unassigned by the search are set to `true`,
/// which is harmless since they no longer appear in any unsatisfied clause.
///
/// ```rust
/// use dpll::{formula, Heuristic, DPLL};
///
/// let f = formula![["A", "B"], ["-A", "C"], ["-B", "-C"]];
/// let report = DPLL::new(Heuristic::JeroslowWang).solve(&f);
/// assert!(report.is_satisfiable());
/// assert!(f.is_satisfied_by(report.assignment().unwrap()));
///
/// let report = DPLL::default().solve(&formula![["A"], ["-A"]]);
/// assert!(!report.is_satisfiable());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DPLL {
    heuristic: Heuristic,
}

impl DPLL {
    pub fn new(heuristic: Heuristic) -> Self {
        Self { heuristic }
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    pub fn name(&self) -> &'static str {
        "dpll"
    }

    /// Decide satisfiability of `formula`
    pub fn solve(&self, formula: &Formula) -> Report {
        let start = Instant::now();
        let mut statistics = Statistics::default();
        let found = self.search(formula.clone(), Assignment::new(), 1, &mut statistics);
        statistics.elapsed = start.elapsed();

        let solution = match found {
            Some(assignment) => Solution::Sat(backfill(formula, assignment)),
            None => Solution::UnSat,
        };
        log::info!(
            "{} in {:?} ({} nodes, {} backtracks, heuristic = {})",
            if solution.as_sat().is_some() { "SAT" } else { "UNSAT" },
            statistics.elapsed,
            statistics.nodes,
            statistics.backtracks,
            self.heuristic
        );
        Report {
            solution,
            statistics,
        }
    }

    fn search(
        &self,
        formula: Formula,
        mut assignment: Assignment,
        depth: usize,
        statistics: &mut Statistics,
    ) -> Option<Assignment> {
        statistics.enter(depth);

        if formula.is_empty() {
            return Some(assignment);
        }
        if formula.has_empty_clause() {
            return None;
        }

        let simplified = simplify(formula);
        if !simplified.is_unchanged() {
            statistics.unit_propagations += simplified.unit_propagations;
            statistics.pure_literals += simplified.pure_literals;
            assignment.extend(simplified.assignment);
            return self.search(simplified.formula, assignment, depth + 1, statistics);
        }
        let formula = simplified.formula;

        let Some(variable) = self.heuristic.select(&formula) else {
            return Some(assignment);
        };
        let lit = Literal::positive(variable);

        log::trace!("Decision: {}", lit);
        let mut positive = assignment.clone();
        positive.insert(lit.variable.clone(), true);
        if let Some(found) =
            self.search(formula.assign_literal(&lit), positive, depth + 1, statistics)
        {
            return Some(found);
        }

        statistics.backtracks += 1;
        let lit = !lit;
        log::debug!("Backtrack at depth {}, decision: {}", depth, lit);
        assignment.insert(lit.variable.clone(), false);
        self.search(formula.assign_literal(&lit), assignment, depth + 1, statistics)
    }

    /// Every satisfying assignment reached by this search
    ///
    /// Both branches are always explored. Since pure literals are fixed to a single value,
    /// this is not an enumeration of all models of the formula.
    ///
    /// Like [DPLL::solve], each returned assignment covers every variable of `formula`,
    /// and variables left unassigned by the search are set to `true`.
    ///
    /// ```rust
    /// use dpll::{formula, DPLL};
    ///
    /// let f = formula![["A", "B"], ["-A", "-B"]];
    /// let solutions = DPLL::default().find_all_solutions(&f);
    /// assert_eq!(solutions.len(), 2);
    /// assert!(solutions.iter().all(|a| f.is_satisfied_by(a)));
    /// ```
    pub fn find_all_solutions(&self, formula: &Formula) -> Vec<Assignment> {
        let mut solutions = Vec::new();
        self.enumerate(formula.clone(), Assignment::new(), &mut solutions);
        log::info!("{} solutions found", solutions.len());
        solutions
            .into_iter()
            .map(|assignment| backfill(formula, assignment))
            .collect()
    }

    fn enumerate(
        &self,
        formula: Formula,
        mut assignment: Assignment,
        solutions: &mut Vec<Assignment>,
    ) {
        if formula.is_empty() {
            solutions.push(assignment);
            return;
        }
        if formula.has_empty_clause() {
            return;
        }

        let simplified = simplify(formula);
        if !simplified.is_unchanged() {
            assignment.extend(simplified.assignment);
            self.enumerate(simplified.formula, assignment, solutions);
            return;
        }
        let formula = simplified.formula;

        let Some(variable) = self.heuristic.select(&formula) else {
            solutions.push(assignment);
            return;
        };
        for value in [true, false] {
            let lit = Literal::new(variable.clone(), value);
            log::trace!("Decision: {}", lit);
            let mut branch = assignment.clone();
            branch.insert(variable.clone(), value);
            self.enumerate(formula.assign_literal(&lit), branch, solutions);
        }
    }

    /// See [conflict_analysis]
    pub fn conflict_analysis(&self, formula: &Formula) -> ConflictAnalysis {
        conflict_analysis(formula)
    }
}

/// Set every variable of `formula` missing in `assignment` to `true`
fn backfill(formula: &Formula, mut assignment: Assignment) -> Assignment {
    for variable in formula.variables() {
        assignment.entry(variable.clone()).or_insert(true);
    }
    assignment
}
