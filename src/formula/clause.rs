use super::{Literal, Variable};
use crate::Assignment;
use proptest::prelude::*;
use std::fmt;

/// A clause in [Conjunctive Normal Form](https://en.wikipedia.org/wiki/Conjunctive_normal_form),
/// i.e. a disjunction of literals
///
/// Literals keep the order in which they were given, and duplicates are not merged.
/// A clause without literals is the empty clause, which can never be satisfied.
///
/// ```rust
/// use dpll::Clause;
///
/// let clause: Clause = ["A", "-B"].iter().map(|s| s.parse().unwrap()).collect();
/// assert_eq!(clause.to_string(), "A ∨ ¬B");
///
/// // Empty clause means a conflict
/// assert_eq!(Clause::empty().to_string(), "⊥");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Clause(Vec<Literal>);

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Self {
        Self(literals)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn literals(&self) -> &[Literal] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Literal> {
        self.0.iter()
    }

    /// Number of literals in the clause
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The empty clause
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_unit(&self) -> Option<&Literal> {
        match self.0.as_slice() {
            [lit] => Some(lit),
            _ => None,
        }
    }

    pub fn contains(&self, lit: &Literal) -> bool {
        self.0.contains(lit)
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.0.iter().map(|lit| &lit.variable)
    }

    /// Partially evaluate the clause with `lit` set to true
    ///
    /// Returns `None` if the clause is satisfied,
    /// otherwise the clause with every occurrence of `¬lit` removed.
    ///
    /// ```rust
    /// use dpll::{Clause, Literal};
    ///
    /// let lit = |s: &str| s.parse::<Literal>().unwrap();
    /// let clause = Clause::new(vec![lit("A"), lit("B")]);
    ///
    /// // A ∨ B is always true when A is true
    /// assert_eq!(clause.assign(&lit("A")), None);
    ///
    /// // A ∨ B becomes B when A is false
    /// assert_eq!(clause.assign(&lit("-A")), Some(Clause::new(vec![lit("B")])));
    ///
    /// // Untouched if neither A nor ¬A appears
    /// assert_eq!(clause.assign(&lit("C")), Some(clause.clone()));
    /// ```
    pub fn assign(&self, lit: &Literal) -> Option<Self> {
        if self.contains(lit) {
            return None;
        }
        let negated = !lit;
        if !self.contains(&negated) {
            return Some(self.clone());
        }
        Some(Self(
            self.0.iter().filter(|l| **l != negated).cloned().collect(),
        ))
    }

    /// Some literal is true under the assignment. Unassigned variables satisfy nothing.
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.0
            .iter()
            .any(|lit| assignment.get(&lit.variable) == Some(&lit.positive))
    }
}

impl From<Literal> for Clause {
    fn from(literal: Literal) -> Self {
        Self(vec![literal])
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Literal;
    type IntoIter = std::slice::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "⊥");
        }
        for (i, literal) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ∨ ")?;
            }
            write!(f, "{}", literal)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Arbitrary for Clause {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            1 => Just(Clause::empty()),
            19 => proptest::collection::vec(any::<Literal>(), 1..4).prop_map(Clause),
        ]
        .boxed()
    }
}
