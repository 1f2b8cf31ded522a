//! Predicates, joins and ordering keys accumulated by the writer.

use std::fmt;

use super::value::{Parameter, ToParameter};

/// Operators accepted in a WHERE predicate.
pub const OPERATORS: [&str; 10] = [
    "=", "<>", "!=", ">", "<", ">=", "<=", "BETWEEN", "LIKE", "IN",
];

/// Returns true if `operator` is one of the accepted predicate operators.
#[must_use]
pub fn verify_operator(operator: &str) -> bool {
    OPERATORS.contains(&operator)
}

/// A single `column operator value` test.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Column name.
    pub column: String,
    /// Comparison operator.
    pub operator: String,
    /// Right-hand value.
    pub value: Parameter,
}

impl Predicate {
    /// Creates a predicate.
    #[must_use]
    pub fn new<T: ToParameter>(column: &str, operator: &str, value: T) -> Self {
        Self {
            column: String::from(column),
            operator: String::from(operator),
            value: value.to_parameter(),
        }
    }
}

impl<C, O, V> From<(C, O, V)> for Predicate
where
    C: Into<String>,
    O: Into<String>,
    V: ToParameter,
{
    fn from((column, operator, value): (C, O, V)) -> Self {
        Self {
            column: column.into(),
            operator: operator.into(),
            value: value.to_parameter(),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl Order {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// LEFT JOIN.
    Left,
    /// RIGHT JOIN.
    Right,
    /// INNER JOIN.
    Inner,
    /// FULL JOIN.
    Full,
}

impl JoinKind {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Inner => "INNER JOIN",
            Self::Full => "FULL JOIN",
        }
    }
}

/// An equi-join of `right_table` onto `left_table`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    /// Table already in the query.
    pub left_table: String,
    /// Join column of the left table.
    pub left_column: String,
    /// Join type.
    pub kind: JoinKind,
    /// Table being joined.
    pub right_table: String,
    /// Join column of the right table.
    pub right_column: String,
}

impl Join {
    /// Creates a join specification.
    #[must_use]
    pub fn new(
        left_table: &str,
        left_column: &str,
        kind: JoinKind,
        right_table: &str,
        right_column: &str,
    ) -> Self {
        Self {
            left_table: String::from(left_table),
            left_column: String::from(left_column),
            kind,
            right_table: String::from(right_table),
            right_column: String::from(right_column),
        }
    }
}

impl From<(&str, &str, JoinKind, &str, &str)> for Join {
    fn from((lt, lc, kind, rt, rc): (&str, &str, JoinKind, &str, &str)) -> Self {
        Self::new(lt, lc, kind, rt, rc)
    }
}
