use crate::{Assignment, Formula, Literal};

/// Result of [simplify]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Simplified {
    /// Formula after every forced assignment
    pub formula: Formula,
    /// Assignments forced by unit propagation or pure-literal elimination
    pub assignment: Assignment,
    /// Number of unit clauses propagated
    pub unit_propagations: usize,
    /// Number of pure literals eliminated
    pub pure_literals: usize,
}

impl Simplified {
    /// No assignment has been forced
    pub fn is_unchanged(&self) -> bool {
        self.assignment.is_empty()
    }
}

/// Repeat unit propagation and pure-literal elimination until neither forces a new assignment
///
/// The loop stops as soon as an empty clause appears,
/// even if pure-literal elimination has not run in that round yet.
///
/// ```rust
/// use dpll::{formula, simplify};
///
/// let out = simplify(formula![["A"], ["-A", "B"], ["-B", "C"]]);
/// assert!(out.formula.is_empty());
/// assert_eq!(out.assignment.len(), 3);
/// assert_eq!(out.unit_propagations, 3);
/// ```
pub fn simplify(formula: Formula) -> Simplified {
    let mut out = Simplified {
        formula,
        ..Default::default()
    };
    loop {
        if out.formula.has_empty_clause() {
            break;
        }

        let (formula, units) = unit_propagation(std::mem::take(&mut out.formula));
        out.formula = formula;
        out.unit_propagations += units.len();
        let propagated = !units.is_empty();
        record(&mut out.assignment, units);
        if out.formula.has_empty_clause() {
            log::debug!("Empty clause found by unit propagation");
            break;
        }

        let (formula, pures) = pure_literal_elimination(std::mem::take(&mut out.formula));
        out.formula = formula;
        out.pure_literals += pures.len();
        let eliminated = !pures.is_empty();
        record(&mut out.assignment, pures);

        if !propagated && !eliminated {
            break;
        }
        log::debug!(
            "Simplification round: {} assignments so far, {} clauses left",
            out.assignment.len(),
            out.formula.num_clauses()
        );
    }
    out
}

/// Propagate the first unit clause in clause order until none is left or an empty clause appears
///
/// Returns the simplified formula and the propagated literals in order.
pub fn unit_propagation(mut formula: Formula) -> (Formula, Vec<Literal>) {
    let mut propagated = Vec::new();
    while !formula.has_empty_clause() {
        let Some(unit) = formula.unit_clauses().next().cloned() else {
            break;
        };
        log::trace!("Unit: {}", unit);
        formula = formula.assign_literal(&unit);
        propagated.push(unit);
    }
    (formula, propagated)
}

/// Assign every pure literal of `formula` at once, in sorted order
///
/// The pure literals are computed once and not re-derived after each assignment.
pub fn pure_literal_elimination(mut formula: Formula) -> (Formula, Vec<Literal>) {
    let pures: Vec<Literal> = formula.pure_literals().into_iter().collect();
    for pure in &pures {
        log::trace!("Pure: {}", pure);
        formula = formula.assign_literal(pure);
    }
    (formula, pures)
}

fn record(assignment: &mut Assignment, literals: Vec<Literal>) {
    for lit in literals {
        let value = lit.value();
        assignment.insert(lit.variable, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{formula, Variable};
    use maplit::btreemap;
    use proptest::prelude::*;

    fn var(s: &str) -> Variable {
        Variable::new(s).unwrap()
    }

    fn lit(s: &str) -> Literal {
        s.parse().unwrap()
    }

    #[test]
    fn unit_propagation_chain() {
        let (f, units) = unit_propagation(formula![["A"], ["-A", "B"], ["-B", "C"]]);
        assert!(f.is_empty());
        assert_eq!(units, vec![lit("A"), lit("B"), lit("C")]);
    }

    #[test]
    fn unit_propagation_takes_first_unit() {
        let (f, units) = unit_propagation(formula![["A", "B"], ["-B"], ["B", "C"], ["-A"]]);
        // ¬B comes first, then A from (A ∨ B), after which (¬A) becomes empty
        assert_eq!(units, vec![lit("-B"), lit("A")]);
        assert_eq!(f, formula![["C"], []]);
    }

    #[test]
    fn unit_propagation_stops_on_conflict() {
        let (f, units) = unit_propagation(formula![["A"], ["-A"], ["B"]]);
        assert_eq!(units, vec![lit("A")]);
        assert!(f.has_empty_clause());
    }

    #[test]
    fn pure_literals_in_batch() {
        let (f, pures) = pure_literal_elimination(formula![["A", "B"], ["-B", "C"], ["-C", "B"]]);
        assert_eq!(pures, vec![lit("A")]);
        assert_eq!(f, formula![["-B", "C"], ["-C", "B"]]);
    }

    #[test]
    fn simplify_alternates() {
        // A is propagated, which makes C and E pure
        let out = simplify(formula![["A"], ["-A", "B", "C"], ["B", "D"], ["-B", "-D"], ["E", "B"]]);
        assert_eq!(out.formula, formula![["B", "D"], ["-B", "-D"]]);
        assert_eq!(
            out.assignment,
            btreemap! { var("A") => true, var("C") => true, var("E") => true }
        );
        assert_eq!(out.unit_propagations, 1);
        assert_eq!(out.pure_literals, 2);
    }

    #[test]
    fn simplify_early_exit_on_conflict() {
        // B is pure but never eliminated since A conflicts first
        let out = simplify(formula![["A"], ["-A"], ["B", "C"]]);
        assert!(out.formula.has_empty_clause());
        assert_eq!(out.assignment, btreemap! { var("A") => true });
        assert_eq!(out.pure_literals, 0);
    }

    #[test]
    fn simplify_degenerate() {
        assert!(simplify(formula![]).is_unchanged());
        assert!(simplify(formula![["A"], []]).is_unchanged());
        assert!(simplify(formula![["A", "B"], ["-A", "-B"], ["A", "-B"], ["-A", "B"]]).is_unchanged());
    }

    proptest! {
        #[test]
        fn test_simplify_idempotence(f: Formula) {
            let once = simplify(f);
            let twice = simplify(once.formula.clone());
            prop_assert!(twice.is_unchanged());
            prop_assert_eq!(twice.formula, once.formula);
        }

        #[test]
        fn test_simplify_removes_assigned_variables(f: Formula) {
            let out = simplify(f);
            for v in out.assignment.keys() {
                prop_assert!(!out.formula.variables().contains(v));
            }
        }

        #[test]
        fn test_simplify_counts(f: Formula) {
            let out = simplify(f);
            prop_assert_eq!(out.assignment.len(), out.unit_propagations + out.pure_literals);
        }
    }
}
