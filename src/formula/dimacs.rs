use super::{Clause, Formula, Literal, Variable};
use anyhow::{bail, ensure, Context, Result};
use std::collections::BTreeMap;

impl Formula {
    /// Parse a formula from a DIMACS CNF string
    ///
    /// Integer `i` is mapped to the variable `x{i}`.
    ///
    /// ```rust
    /// use dpll::Formula;
    ///
    /// let f = Formula::from_dimacs("c example\np cnf 3 2\n1 -3 0\n2 0\n").unwrap();
    /// assert_eq!(f.to_string(), "(x1 ∨ ¬x3) ∧ (x2)");
    ///
    /// // Empty clause means a conflict
    /// let f = Formula::from_dimacs("p cnf 0 1\n0\n").unwrap();
    /// assert!(f.has_empty_clause());
    /// ```
    pub fn from_dimacs(s: &str) -> Result<Self> {
        let mut header: Option<(u32, usize)> = None;
        let mut clauses = Vec::new();

        for (n, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('c') {
                continue;
            }
            if line.starts_with('p') {
                ensure!(header.is_none(), "Duplicated problem line at line {}", n + 1);
                header = Some(parse_header(line).with_context(|| format!("At line {}", n + 1))?);
                continue;
            }
            let Some((num_variables, _)) = header else {
                bail!("Clause before problem line at line {}", n + 1);
            };
            let clause =
                parse_clause(line, num_variables).with_context(|| format!("At line {}", n + 1))?;
            clauses.push(clause);
        }

        let Some((_, num_clauses)) = header else {
            bail!("Missing problem line `p cnf <variables> <clauses>`");
        };
        if clauses.len() != num_clauses {
            log::warn!(
                "Problem line declares {} clauses, but {} found",
                num_clauses,
                clauses.len()
            );
        }
        Ok(Self::from_clauses(clauses))
    }

    /// Convert the formula to a DIMACS CNF string
    ///
    /// Variables are numbered from 1 in lexicographic order of their names.
    ///
    /// ```rust
    /// use dpll::formula;
    ///
    /// let f = formula![["b", "-a"], ["a"]];
    /// assert_eq!(f.to_dimacs(), "p cnf 2 2\n2 -1 0\n1 0");
    /// ```
    pub fn to_dimacs(&self) -> String {
        let index: BTreeMap<&Variable, usize> = self
            .variables()
            .iter()
            .enumerate()
            .map(|(i, v)| (v, i + 1))
            .collect();

        let mut lines = Vec::with_capacity(self.num_clauses() + 1);
        lines.push(format!("p cnf {} {}", index.len(), self.num_clauses()));
        for clause in self.clauses() {
            let literals: Vec<String> = clause
                .iter()
                .map(|lit| {
                    let i = index[&lit.variable];
                    if lit.positive {
                        i.to_string()
                    } else {
                        format!("-{i}")
                    }
                })
                .collect();
            lines.push(format!("{} 0", literals.join(" ")));
        }
        lines.join("\n")
    }
}

fn parse_header(line: &str) -> Result<(u32, usize)> {
    let mut tokens = line.split_whitespace();
    ensure!(tokens.next() == Some("p"), "Invalid problem line: {line}");
    ensure!(tokens.next() == Some("cnf"), "Missing `cnf` in problem line: {line}");
    let num_variables = tokens
        .next()
        .context("Missing number of variables")?
        .parse::<u32>()
        .context("Invalid number of variables")?;
    let num_clauses = tokens
        .next()
        .context("Missing number of clauses")?
        .parse::<usize>()
        .context("Invalid number of clauses")?;
    ensure!(tokens.next().is_none(), "Trailing tokens in problem line: {line}");
    Ok((num_variables, num_clauses))
}

fn parse_clause(line: &str, num_variables: u32) -> Result<Clause> {
    let mut literals = Vec::new();
    let mut tokens = line.split_whitespace();
    while let Some(token) = tokens.next() {
        let value: i64 = token
            .parse()
            .with_context(|| format!("Invalid literal `{token}`"))?;
        if value == 0 {
            // One clause per line
            ensure!(
                tokens.next().is_none(),
                "Trailing tokens after terminating `0`: {line}"
            );
            return Ok(Clause::new(literals));
        }
        let index = u32::try_from(value.unsigned_abs())
            .ok()
            .filter(|&i| i <= num_variables)
            .with_context(|| {
                format!("Literal `{token}` exceeds the declared {num_variables} variables")
            })?;
        literals.push(Literal::new(Variable::indexed(index), value > 0));
    }
    bail!("Clause is not terminated by `0`: {line}")
}
