use crate::{formula, Assignment, Clause, Formula, Literal, Variable};

/// Small formulas with known satisfiability
pub fn single_solution_cases() -> Vec<(Formula, bool)> {
    vec![
        // True
        (formula![], true),
        // False
        (formula![[]], false),
        (formula![["A"], []], false),
        // A
        (formula![["A"]], true),
        // ¬A
        (formula![["-A"]], true),
        // A ∧ ¬A
        (formula![["A"], ["-A"]], false),
        // (A ∨ B) ∧ (¬A ∨ C) ∧ (¬B ∨ ¬C)
        (formula![["A", "B"], ["-A", "C"], ["-B", "-C"]], true),
        // A ∧ (¬A ∨ B) ∧ (¬B ∨ C)
        (formula![["A"], ["-A", "B"], ["-B", "C"]], true),
        // All four clauses over A and B
        (formula![["A", "B"], ["-A", "B"], ["A", "-B"], ["-A", "-B"]], false),
        // Knuth 4B (112)
        (
            formula![
                ["x1", "x2", "x3", "x4"],
                ["x1", "-x2"],
                ["-x1", "-x2", "-x3"],
                ["-x1", "x3"],
                ["x2", "-x3"],
                ["x3", "-x4"],
            ],
            false
        ),
        (pigeonhole(2), false),
        (pigeonhole(3), false),
    ]
}

/// `n + 1` pigeons in `n` holes, unsatisfiable for every `n`
pub fn pigeonhole(n: u32) -> Formula {
    let var = |pigeon: u32, hole: u32| {
        Variable::new(&format!("p{pigeon}_{hole}")).expect("Valid identifier")
    };
    let mut clauses = Vec::new();
    // Every pigeon sits in some hole
    for p in 0..=n {
        clauses.push((0..n).map(|h| Literal::positive(var(p, h))).collect::<Clause>());
    }
    // No two pigeons share a hole
    for h in 0..n {
        for p in 0..=n {
            for q in (p + 1)..=n {
                clauses.push(Clause::new(vec![
                    Literal::negative(var(p, h)),
                    Literal::negative(var(q, h)),
                ]));
            }
        }
    }
    Formula::from_clauses(clauses)
}

/// Try every assignment of the variables of `formula`
pub fn brute_force(formula: &Formula) -> Option<Assignment> {
    let variables: Vec<&Variable> = formula.variables().iter().collect();
    assert!(variables.len() < 20, "Too many variables for brute force");
    (0u32..(1 << variables.len())).find_map(|bits| {
        let assignment: Assignment = variables
            .iter()
            .enumerate()
            .map(|(i, v)| ((*v).clone(), bits & (1 << i) != 0))
            .collect();
        formula.is_satisfied_by(&assignment).then_some(assignment)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cases_agree_with_brute_force() {
        for (f, satisfiable) in single_solution_cases() {
            assert_eq!(brute_force(&f).is_some(), satisfiable, "Failed on {f:?}");
        }
    }
}
