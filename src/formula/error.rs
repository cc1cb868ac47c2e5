use std::fmt;

/// Why a literal token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// The token is an empty string
    Empty,
    /// The token is a bare `-` without a variable name
    MissingName,
    /// The variable name does not start with an ASCII letter
    InvalidStart(char),
    /// The variable name contains a character other than ASCII letters, digits, or `_`
    InvalidCharacter(char),
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty literal"),
            Self::MissingName => write!(f, "missing variable name after `-`"),
            Self::InvalidStart(c) => write!(f, "variable name must start with a letter, found {c:?}"),
            Self::InvalidCharacter(c) => write!(f, "invalid character {c:?} in variable name"),
        }
    }
}

impl std::error::Error for ValidationErrorKind {}

/// A malformed literal token found while constructing a [Formula](crate::Formula).
///
/// `clause` and `position` are 0-based indices into the raw clause list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidationError {
    pub clause: usize,
    pub position: usize,
    pub text: String,
    pub reason: ValidationErrorKind,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid literal {:?} at clause {}, position {}: {}",
            self.text, self.clause, self.position, self.reason
        )
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.reason)
    }
}
