use super::ValidationErrorKind;
use proptest::prelude::*;
use serde::{Serialize, Serializer};
use std::{borrow::Borrow, fmt, ops::Not, str::FromStr, sync::Arc};

/// Propositional variable identified by a name matching `[A-Za-z][A-Za-z0-9_]*`
///
/// Variables are ordered lexicographically by their names,
/// and cloning only bumps a reference count.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(Arc<str>);

impl Variable {
    pub fn new(name: &str) -> Result<Self, ValidationErrorKind> {
        let mut chars = name.chars();
        let Some(first) = chars.next() else {
            return Err(ValidationErrorKind::Empty);
        };
        if !first.is_ascii_alphabetic() {
            return Err(ValidationErrorKind::InvalidStart(first));
        }
        if let Some(c) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
            return Err(ValidationErrorKind::InvalidCharacter(c));
        }
        Ok(Self(Arc::from(name)))
    }

    /// Variable `x{index}` used for DIMACS indices
    pub fn indexed(index: u32) -> Self {
        Self(Arc::from(format!("x{index}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Variable {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for Variable {
    type Err = ValidationErrorKind;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Serialize for Variable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// A literal in [Conjunctive Normal Form](https://en.wikipedia.org/wiki/Conjunctive_normal_form)
///
/// # Order
///
/// - Literals are ordered by their variable
/// - If the variables are the same, positive literals are less than negative literals
///
/// ```rust
/// use dpll::Literal;
///
/// let a: Literal = "A".parse().unwrap();
/// let b: Literal = "-A".parse().unwrap();
/// let c: Literal = "B".parse().unwrap();
///
/// assert!(a < b); // A < ¬A
/// assert!(b < c); // ¬A < B
/// assert_eq!(!a.clone(), b);
/// assert_eq!(b.to_string(), "¬A");
/// assert_eq!(b.token(), "-A");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    pub variable: Variable,
    pub positive: bool,
}

impl Literal {
    pub fn new(variable: Variable, positive: bool) -> Self {
        Self { variable, positive }
    }

    pub fn positive(variable: Variable) -> Self {
        Self::new(variable, true)
    }

    pub fn negative(variable: Variable) -> Self {
        Self::new(variable, false)
    }

    /// Truth value the variable must take to make this literal true
    pub fn value(&self) -> bool {
        self.positive
    }

    /// Token form, `A` or `-A`
    pub fn token(&self) -> String {
        if self.positive {
            self.variable.to_string()
        } else {
            format!("-{}", self.variable)
        }
    }
}

impl FromStr for Literal {
    type Err = ValidationErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix('-') {
            Some("") => Err(ValidationErrorKind::MissingName),
            Some(name) => Ok(Self::negative(Variable::new(name)?)),
            None => Ok(Self::positive(Variable::new(s)?)),
        }
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::Output {
            positive: !self.positive,
            ..self
        }
    }
}

impl Not for &Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        !self.clone()
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Literal {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.variable.cmp(&other.variable) {
            std::cmp::Ordering::Equal => self.positive.cmp(&other.positive).reverse(),
            ordering => ordering,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.positive {
            write!(f, "{}", self.variable)
        } else {
            write!(f, "¬{}", self.variable)
        }
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Small pool of names so that generated formulas share variables
const VARIABLE_POOL: &[&str] = &["A", "B", "C", "D", "E", "F"];

impl Arbitrary for Variable {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop::sample::select(VARIABLE_POOL)
            .prop_map(|name| Self(Arc::from(name)))
            .boxed()
    }
}

impl Arbitrary for Literal {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (any::<Variable>(), any::<bool>())
            .prop_map(|(variable, positive)| Self { variable, positive })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_tokens() {
        let lit: Literal = "x_1".parse().unwrap();
        assert!(lit.positive);
        assert_eq!(lit.variable.as_str(), "x_1");

        let lit: Literal = "-Foo9".parse().unwrap();
        assert!(!lit.positive);
        assert_eq!(lit.variable.as_str(), "Foo9");
    }

    #[test]
    fn parse_invalid_tokens() {
        assert_eq!("".parse::<Literal>(), Err(ValidationErrorKind::Empty));
        assert_eq!("-".parse::<Literal>(), Err(ValidationErrorKind::MissingName));
        assert_eq!(
            "1A".parse::<Literal>(),
            Err(ValidationErrorKind::InvalidStart('1'))
        );
        assert_eq!(
            "--A".parse::<Literal>(),
            Err(ValidationErrorKind::InvalidStart('-'))
        );
        assert_eq!(
            "A-B".parse::<Literal>(),
            Err(ValidationErrorKind::InvalidCharacter('-'))
        );
        assert_eq!(
            " A".parse::<Literal>(),
            Err(ValidationErrorKind::InvalidStart(' '))
        );
        assert_eq!(
            "é".parse::<Literal>(),
            Err(ValidationErrorKind::InvalidStart('é'))
        );
    }

    #[test]
    fn variables_are_lexicographic() {
        let a = Variable::new("B").unwrap();
        let b = Variable::new("a").unwrap();
        let c = Variable::new("x10").unwrap();
        let d = Variable::new("x2").unwrap();
        assert!(a < b);
        assert!(c < d);
        assert_eq!(Variable::indexed(10), c);
    }

    proptest! {
        #[test]
        fn test_double_negation(lit: Literal) {
            prop_assert_eq!(!(!lit.clone()), lit);
        }

        #[test]
        fn test_order_of_negation(lit: Literal) {
            let negated = !&lit;
            if lit.positive {
                prop_assert!(negated > lit);
            } else {
                prop_assert!(lit > negated);
            }
        }

        #[test]
        fn test_token_parses_back(lit: Literal) {
            prop_assert_eq!(lit.token().parse::<Literal>(), Ok(lit));
        }
    }
}
