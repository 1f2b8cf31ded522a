//! Query kind and accumulated clause state.

use std::fmt;

use super::expr::{Join, Order, Predicate};
use super::value::Parameter;

/// The statement being composed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Nothing started yet, or reset.
    #[default]
    None,
    /// SELECT.
    Select,
    /// INSERT INTO.
    Insert,
    /// UPDATE.
    Update,
    /// DELETE FROM.
    Delete,
    /// INSERT ... ON DUPLICATE KEY UPDATE.
    Upsert,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "NONE",
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Upsert => "UPSERT",
        })
    }
}

/// A `(name, alias)` pair; an empty alias means none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aliased {
    /// Table, column or expression.
    pub name: String,
    /// Alias, possibly empty.
    pub alias: String,
}

impl Aliased {
    /// Creates a pair.
    #[must_use]
    pub fn new(name: &str, alias: &str) -> Self {
        Self {
            name: String::from(name),
            alias: String::from(alias),
        }
    }
}

/// Every clause accumulated for the current statement.
///
/// Starting a statement replaces the whole value, so fragments of one
/// statement never leak into the next.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClauseState {
    /// Active query kind.
    pub kind: QueryKind,
    /// Target of INSERT, UPDATE, DELETE and upsert.
    pub table: String,
    /// SELECT projection, or the INSERT column list.
    pub select_fields: Vec<String>,
    /// FROM sources.
    pub from_fields: Vec<Aliased>,
    /// JOIN clauses in call order.
    pub join_fields: Vec<Join>,
    /// WHERE predicates, joined with AND.
    pub where_fields: Vec<Predicate>,
    /// ORDER BY keys in call order.
    pub order_by_fields: Vec<(String, Order)>,
    /// SET assignments.
    pub set_fields: Vec<(String, Parameter)>,
    /// VALUES rows.
    pub value_fields: Vec<Vec<Parameter>>,
    /// Row limit.
    pub limit: Option<u64>,
    /// Row offset.
    pub offset: Option<u64>,
    /// COUNT expression.
    pub count: Option<String>,
    /// SELECT DISTINCT.
    pub distinct: bool,
    /// MAX projections.
    pub max_fields: Vec<Aliased>,
    /// MIN projections.
    pub min_fields: Vec<Aliased>,
}

impl ClauseState {
    /// A clean state for a new statement of `kind`.
    #[must_use]
    pub fn start(kind: QueryKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Returns true if the SELECT clause has something to project.
    #[must_use]
    pub const fn has_projection(&self) -> bool {
        !self.select_fields.is_empty()
            || self.count.is_some()
            || !self.max_fields.is_empty()
            || !self.min_fields.is_empty()
    }
}
