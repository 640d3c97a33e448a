//! Logical operators for composite specifications.

use serde::{Deserialize, Serialize};

/// Combination operator of a composite specification.
///
/// A closed two-case enum: evaluators can match on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Every child must hold.
    And,
    /// At least one child must hold.
    Or,
}

impl Operator {
    /// The result of combining zero children under this operator.
    ///
    /// `And` is vacuously true; `Or` is vacuously false.
    pub fn identity(self) -> bool {
        match self {
            Operator::And => true,
            Operator::Or => false,
        }
    }

    /// Combines child results, short-circuiting like `&&` / `||`.
    pub fn combine<I>(self, results: I) -> bool
    where
        I: IntoIterator<Item = bool>,
    {
        let mut results = results.into_iter();
        match self {
            Operator::And => results.all(|r| r),
            Operator::Or => results.any(|r| r),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
