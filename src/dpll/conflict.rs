use crate::{Formula, Variable};
use serde::Serialize;
use std::collections::BTreeMap;

/// Obvious reasons why a formula is unsatisfiable
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ConflictAnalysis {
    /// Indices of empty clauses
    pub empty_clauses: Vec<usize>,
    /// Variables asserted both true and false by unit clauses
    pub unit_conflicts: Vec<UnitConflict>,
}

impl ConflictAnalysis {
    /// Nothing found. The formula may still be unsatisfiable.
    pub fn is_empty(&self) -> bool {
        self.empty_clauses.is_empty() && self.unit_conflicts.is_empty()
    }
}

/// A pair of unit clauses `(x)` and `(¬x)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UnitConflict {
    pub variable: Variable,
    /// Index of the first unit clause `(x)`
    pub positive: usize,
    /// Index of the first unit clause `(¬x)`
    pub negative: usize,
}

/// Find empty clauses and contradicting unit clauses
///
/// This is a diagnostic and plays no role in the search.
/// Unit conflicts are listed in order of the first unit clause of each variable.
///
/// ```rust
/// use dpll::{conflict_analysis, formula};
///
/// let analysis = conflict_analysis(&formula![["A"], ["B", "C"], [], ["-A"]]);
/// assert_eq!(analysis.empty_clauses, vec![2]);
/// assert_eq!(analysis.unit_conflicts.len(), 1);
/// assert_eq!(analysis.unit_conflicts[0].positive, 0);
/// assert_eq!(analysis.unit_conflicts[0].negative, 3);
/// ```
pub fn conflict_analysis(formula: &Formula) -> ConflictAnalysis {
    let mut empty_clauses = Vec::new();
    // variable -> (first clause of x, first clause of ¬x, order of first unit)
    let mut units: BTreeMap<&Variable, (Option<usize>, Option<usize>, usize)> = BTreeMap::new();
    for (i, clause) in formula.clauses().iter().enumerate() {
        if clause.is_empty() {
            empty_clauses.push(i);
            continue;
        }
        let Some(lit) = clause.as_unit() else {
            continue;
        };
        let order = units.len();
        let entry = units.entry(&lit.variable).or_insert((None, None, order));
        let slot = if lit.positive {
            &mut entry.0
        } else {
            &mut entry.1
        };
        slot.get_or_insert(i);
    }

    let mut unit_conflicts: Vec<(usize, UnitConflict)> = units
        .into_iter()
        .filter_map(|(variable, seen)| match seen {
            (Some(positive), Some(negative), order) => Some((
                order,
                UnitConflict {
                    variable: variable.clone(),
                    positive,
                    negative,
                },
            )),
            _ => None,
        })
        .collect();
    unit_conflicts.sort_by_key(|(order, _)| *order);

    ConflictAnalysis {
        empty_clauses,
        unit_conflicts: unit_conflicts.into_iter().map(|(_, c)| c).collect(),
    }
}
