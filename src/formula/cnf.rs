use super::{Clause, Literal, ValidationError, Variable};
use crate::Assignment;
use proptest::prelude::*;
use serde::Serialize;
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    hash::{Hash, Hasher},
    sync::OnceLock,
};

/// Formula in Conjunctive Normal Form
///
/// A formula never changes after construction. [Formula::assign_literal] returns a new,
/// independently owned formula, so a search can drop a branch without undoing anything.
///
/// ```rust
/// use dpll::Formula;
///
/// let f = Formula::new([vec!["A", "B"], vec!["-A", "C"]]).unwrap();
/// assert_eq!(f.to_string(), "(A ∨ B) ∧ (¬A ∨ C)");
///
/// let g = f.assign_literal(&"-A".parse().unwrap());
/// assert_eq!(g.to_string(), "B");
///
/// // Invalid identifier
/// let err = Formula::new([vec!["A"], vec!["B", "2C"]]).unwrap_err();
/// assert_eq!((err.clause, err.position, err.text.as_str()), (1, 1, "2C"));
/// ```
#[derive(Clone, Default)]
pub struct Formula {
    clauses: Vec<Clause>,
    /// Filled on the first call of [Formula::variables]
    variables: OnceLock<BTreeSet<Variable>>,
}

/// Build a [Formula] from literal tokens, panics on invalid tokens
///
/// ```rust
/// use dpll::formula;
///
/// let f = formula![["A", "-B"], ["B"], []];
/// assert_eq!(f.num_clauses(), 3);
/// assert!(f.has_empty_clause());
///
/// assert!(formula![].is_empty());
/// ```
#[macro_export]
macro_rules! formula {
    ($([$($lit:expr),* $(,)?]),* $(,)?) => {{
        let clauses: Vec<Vec<&str>> = vec![$(vec![$($lit),*]),*];
        $crate::Formula::new(clauses).expect("Invalid literal in formula!")
    }};
}

/// Summary numbers of a formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct FormulaStats {
    pub num_variables: usize,
    pub num_clauses: usize,
    pub num_literals: usize,
    pub num_unit_clauses: usize,
    pub num_pure_literals: usize,
    pub max_clause_length: usize,
    pub min_clause_length: usize,
}

impl Formula {
    /// Validate literal tokens and build a formula
    ///
    /// Each token is `<name>` or `-<name>` where `<name>` matches `[A-Za-z][A-Za-z0-9_]*`.
    pub fn new<I, C, S>(clauses: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let clauses = clauses
            .into_iter()
            .enumerate()
            .map(|(clause, tokens)| {
                tokens
                    .into_iter()
                    .enumerate()
                    .map(|(position, token)| {
                        let text = token.as_ref();
                        text.parse::<Literal>().map_err(|reason| ValidationError {
                            clause,
                            position,
                            text: text.to_string(),
                            reason,
                        })
                    })
                    .collect::<Result<Clause, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_clauses(clauses))
    }

    /// Formula from already validated clauses
    pub fn from_clauses(clauses: Vec<Clause>) -> Self {
        Self {
            clauses,
            variables: OnceLock::new(),
        }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Variables appearing in the formula
    pub fn variables(&self) -> &BTreeSet<Variable> {
        self.variables.get_or_init(|| {
            self.clauses
                .iter()
                .flat_map(Clause::variables)
                .cloned()
                .collect()
        })
    }

    /// Distinct literals appearing in the formula
    pub fn literals(&self) -> BTreeSet<Literal> {
        self.clauses.iter().flatten().cloned().collect()
    }

    /// No clauses, trivially true
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Contains the empty clause, trivially false
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    /// Literals of unit clauses in clause order
    pub fn unit_clauses(&self) -> impl Iterator<Item = &Literal> {
        self.clauses.iter().filter_map(Clause::as_unit)
    }

    /// Literals whose variable appears in only one polarity, sorted
    pub fn pure_literals(&self) -> BTreeSet<Literal> {
        // variable -> (appears positive, appears negative)
        let mut polarity: BTreeMap<&Variable, (bool, bool)> = BTreeMap::new();
        for lit in self.clauses.iter().flatten() {
            let entry = polarity.entry(&lit.variable).or_default();
            if lit.positive {
                entry.0 = true;
            } else {
                entry.1 = true;
            }
        }
        polarity
            .into_iter()
            .filter_map(|(variable, seen)| match seen {
                (true, false) => Some(Literal::positive(variable.clone())),
                (false, true) => Some(Literal::negative(variable.clone())),
                _ => None,
            })
            .collect()
    }

    /// New formula with `lit` set to true
    ///
    /// Clauses containing `lit` are dropped, and `¬lit` is removed from the rest.
    pub fn assign_literal(&self, lit: &Literal) -> Self {
        Self::from_clauses(
            self.clauses
                .iter()
                .filter_map(|clause| clause.assign(lit))
                .collect(),
        )
    }

    /// Every clause is satisfied. Variables missing in `assignment` satisfy nothing.
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause.is_satisfied_by(assignment))
    }

    pub fn stats(&self) -> FormulaStats {
        let lengths = self.clauses.iter().map(Clause::len);
        FormulaStats {
            num_variables: self.variables().len(),
            num_clauses: self.clauses.len(),
            num_literals: lengths.clone().sum(),
            num_unit_clauses: self.unit_clauses().count(),
            num_pure_literals: self.pure_literals().len(),
            max_clause_length: lengths.clone().max().unwrap_or(0),
            min_clause_length: lengths.min().unwrap_or(0),
        }
    }
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        self.clauses == other.clauses
    }
}

impl Eq for Formula {}

impl Hash for Formula {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.clauses.hash(state);
    }
}

impl From<Vec<Clause>> for Formula {
    fn from(clauses: Vec<Clause>) -> Self {
        Self::from_clauses(clauses)
    }
}

impl FromIterator<Clause> for Formula {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        Self::from_clauses(iter.into_iter().collect())
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.clauses.is_empty() {
            return write!(f, "⊤");
        }
        let parenthesize = self.clauses.len() > 1;
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                write!(f, " ∧ ")?;
            }
            if parenthesize {
                write!(f, "({})", clause)?;
            } else {
                write!(f, "{}", clause)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Arbitrary for Formula {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        proptest::collection::vec(any::<Clause>(), 0..8)
            .prop_map(Self::from_clauses)
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{formula, ValidationErrorKind};
    use maplit::btreeset;

    fn lit(s: &str) -> Literal {
        s.parse().unwrap()
    }

    fn var(s: &str) -> Variable {
        Variable::new(s).unwrap()
    }

    #[test]
    fn validation_error_position() {
        let err = Formula::new([vec!["A", "B"], vec!["-C", "-"]]).unwrap_err();
        assert_eq!(
            err,
            ValidationError {
                clause: 1,
                position: 1,
                text: "-".to_string(),
                reason: ValidationErrorKind::MissingName,
            }
        );
        insta::assert_snapshot!(err.to_string(), @r#"Invalid literal "-" at clause 1, position 1: missing variable name after `-`"#);
    }

    #[test]
    fn degenerate_formulas() {
        let empty = formula![];
        assert!(empty.is_empty());
        assert!(!empty.has_empty_clause());
        assert!(empty.variables().is_empty());

        let conflicted = formula![["A"], []];
        assert!(!conflicted.is_empty());
        assert!(conflicted.has_empty_clause());
    }

    #[test]
    fn queries() {
        let f = formula![["B", "-A"], ["C"], ["-A"], ["A", "B", "D"], ["C"]];
        assert_eq!(f.variables(), &btreeset! { var("A"), var("B"), var("C"), var("D") });
        assert_eq!(
            f.unit_clauses().cloned().collect::<Vec<_>>(),
            vec![lit("C"), lit("-A"), lit("C")]
        );
        assert_eq!(f.pure_literals(), btreeset! { lit("B"), lit("C"), lit("D") });
        assert_eq!(
            f.literals(),
            btreeset! { lit("A"), lit("-A"), lit("B"), lit("C"), lit("D") }
        );
    }

    #[test]
    fn assign_literal() {
        let f = formula![["A", "B"], ["-A", "C"], ["-B", "-C"], ["-A"]];
        assert_eq!(f.assign_literal(&lit("A")), formula![["C"], ["-B", "-C"], []]);
        assert_eq!(f.assign_literal(&lit("-A")), formula![["B"], ["-B", "-C"]]);
        // The original formula is untouched
        assert_eq!(f.num_clauses(), 4);
    }

    #[test]
    fn stats() {
        let f = formula![["A", "B", "-C"], ["-A"], ["B", "C"]];
        assert_eq!(
            f.stats(),
            FormulaStats {
                num_variables: 3,
                num_clauses: 3,
                num_literals: 6,
                num_unit_clauses: 1,
                num_pure_literals: 1,
                max_clause_length: 3,
                min_clause_length: 1,
            }
        );
        assert_eq!(formula![].stats(), FormulaStats::default());
        insta::assert_snapshot!(
            serde_json::to_string(&f.stats()).unwrap(),
            @r#"{"num_variables":3,"num_clauses":3,"num_literals":6,"num_unit_clauses":1,"num_pure_literals":1,"max_clause_length":3,"min_clause_length":1}"#
        );
    }

    #[test]
    fn display() {
        insta::assert_snapshot!(formula![["A", "B"], ["-A"], []].to_string(), @"(A ∨ B) ∧ (¬A) ∧ (⊥)");
        insta::assert_snapshot!(formula![["A", "-B"]].to_string(), @"A ∨ ¬B");
        insta::assert_snapshot!(formula![].to_string(), @"⊤");
    }

    proptest! {
        #[test]
        fn test_assign_literal_exactness(f: Formula, l: Literal) {
            let g = f.assign_literal(&l);
            let negated = !&l;
            let expected: Vec<Clause> = f
                .clauses()
                .iter()
                .filter(|c| !c.contains(&l))
                .map(|c| c.iter().filter(|x| **x != negated).cloned().collect())
                .collect();
            prop_assert_eq!(g.clauses(), expected.as_slice());
            prop_assert!(!g.variables().contains(&l.variable));
        }

        #[test]
        fn test_pure_literals_have_one_polarity(f: Formula) {
            let literals = f.literals();
            for pure in f.pure_literals() {
                prop_assert!(literals.contains(&pure));
                prop_assert!(!literals.contains(&!&pure));
            }
        }
    }
}
