use crate::{Formula, Literal, Variable};
use serde::Serialize;
use std::{collections::HashMap, fmt};

/// Policy choosing the variable to branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Heuristic {
    /// Lexicographically smallest variable
    #[default]
    First,
    /// Variable of the literal occurring in the most clauses
    MostFrequent,
    /// Variable with the largest Jeroslow-Wang weight `Σ 2^(-|C|)` over clauses containing it
    JeroslowWang,
}

impl Heuristic {
    /// Choose a variable of `formula`, `None` iff the formula has no variables
    ///
    /// Ties are broken by the first occurrence in clause-then-literal order.
    ///
    /// ```rust
    /// use dpll::{formula, Heuristic};
    ///
    /// let f = formula![["C", "B"], ["-B", "A"], ["B"]];
    /// assert_eq!(Heuristic::First.select(&f).unwrap().as_str(), "A");
    /// assert_eq!(Heuristic::MostFrequent.select(&f).unwrap().as_str(), "B");
    /// assert_eq!(Heuristic::JeroslowWang.select(&f).unwrap().as_str(), "B");
    ///
    /// assert!(Heuristic::First.select(&formula![]).is_none());
    /// ```
    pub fn select(&self, formula: &Formula) -> Option<Variable> {
        match self {
            Self::First => take_minimal(formula),
            Self::MostFrequent => take_most_frequent(formula),
            Self::JeroslowWang => take_jeroslow_wang(formula),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::MostFrequent => "most-frequent",
            Self::JeroslowWang => "jeroslow-wang",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn take_minimal(formula: &Formula) -> Option<Variable> {
    formula.variables().first().cloned()
}

fn take_most_frequent(formula: &Formula) -> Option<Variable> {
    // Counts in order of first occurrence
    let mut counts: Vec<(&Literal, usize)> = Vec::new();
    let mut position: HashMap<&Literal, usize> = HashMap::new();
    for clause in formula.clauses() {
        let mut seen: Vec<&Literal> = Vec::with_capacity(clause.len());
        for lit in clause {
            // Count clauses, not occurrences
            if seen.contains(&lit) {
                continue;
            }
            seen.push(lit);
            let i = *position.entry(lit).or_insert_with(|| {
                counts.push((lit, 0));
                counts.len() - 1
            });
            counts[i].1 += 1;
        }
    }
    let mut best: Option<(&Literal, usize)> = None;
    for (lit, count) in counts {
        if best.map_or(true, |(_, max)| count > max) {
            best = Some((lit, count));
        }
    }
    best.map(|(lit, _)| lit.variable.clone())
}

fn take_jeroslow_wang(formula: &Formula) -> Option<Variable> {
    // Weights in order of first occurrence
    let mut weights: Vec<(&Variable, f64)> = Vec::new();
    let mut position: HashMap<&Variable, usize> = HashMap::new();
    for clause in formula.clauses() {
        let weight = 2f64.powi(-(clause.len().min(i32::MAX as usize) as i32));
        let mut seen: Vec<&Variable> = Vec::with_capacity(clause.len());
        for variable in clause.variables() {
            if seen.contains(&variable) {
                continue;
            }
            seen.push(variable);
            let i = *position.entry(variable).or_insert_with(|| {
                weights.push((variable, 0.0));
                weights.len() - 1
            });
            weights[i].1 += weight;
        }
    }
    let mut best: Option<(&Variable, f64)> = None;
    for (variable, weight) in weights {
        if best.map_or(true, |(_, max)| weight > max) {
            best = Some((variable, weight));
        }
    }
    best.map(|(variable, _)| variable.clone())
}
