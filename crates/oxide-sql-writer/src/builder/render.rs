//! Clause renderers.
//!
//! Each function turns one part of a [`ClauseState`] into SQL text without
//! touching the state. The `*_query` functions compose them per query kind.

use tracing::warn;

use super::expr::{verify_operator, Join, Order, Predicate};
use super::state::{Aliased, ClauseState, QueryKind};
use super::value::Parameter;
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::schema::NameResolver;

/// Appends `clause` to `sql`, separated by a single space.
fn push_clause(sql: &mut String, clause: &str) {
    if clause.is_empty() {
        return;
    }
    if !sql.is_empty() && !sql.ends_with(' ') {
        sql.push(' ');
    }
    sql.push_str(clause);
}

fn aggregate(function: &str, field: &Aliased, names: &NameResolver<'_>) -> String {
    let mut sql = format!("{function}({})", names.column(&field.name));
    if !field.alias.is_empty() {
        sql.push_str(" AS ");
        sql.push_str(&field.alias);
    }
    sql
}

/// `SELECT [TOP n ][DISTINCT ]<projection>`
///
/// The projection lists plain fields, then COUNT, then MAX, then MIN.
#[must_use]
pub fn select_clause(state: &ClauseState, dialect: Dialect, names: &NameResolver<'_>) -> String {
    let mut sql = String::from("SELECT ");

    if dialect.limit_in_select() {
        if let Some(n) = state.limit {
            sql.push_str("TOP ");
            sql.push_str(&n.to_string());
            sql.push(' ');
        }
    }

    if state.distinct {
        sql.push_str("DISTINCT ");
    }

    let mut projection: Vec<String> = state
        .select_fields
        .iter()
        .map(|field| names.column(field))
        .collect();

    if let Some(ref count) = state.count {
        if count == "*" {
            projection.push(String::from("COUNT(*)"));
        } else {
            projection.push(format!("COUNT({})", names.column(count)));
        }
    }

    projection.extend(state.max_fields.iter().map(|f| aggregate("MAX", f, names)));
    projection.extend(state.min_fields.iter().map(|f| aggregate("MIN", f, names)));

    sql.push_str(&projection.join(", "));
    sql
}

/// `FROM t1, t2 AS a`
#[must_use]
pub fn from_clause(sources: &[Aliased], names: &NameResolver<'_>) -> String {
    let tables: Vec<String> = sources
        .iter()
        .map(|source| {
            let table = names.table(&source.name);
            if source.alias.is_empty() {
                table
            } else {
                format!("{table} AS {}", source.alias)
            }
        })
        .collect();
    format!("FROM {}", tables.join(", "))
}

/// `LEFT JOIN r ON l.lc=r.rc ...`, in call order. Empty if there are none.
#[must_use]
pub fn join_clause(joins: &[Join], names: &NameResolver<'_>) -> String {
    let clauses: Vec<String> = joins
        .iter()
        .map(|join| {
            let left = names.table(&join.left_table);
            let right = names.table(&join.right_table);
            let left_column = names.column_in(&join.left_table, &join.left_column);
            let right_column = names.column_in(&join.right_table, &join.right_column);
            format!(
                "{} {right} ON {left}.{left_column}={right}.{right_column}",
                join.kind.as_str()
            )
        })
        .collect();
    clauses.join(" ")
}

/// `WHERE (a = 1) AND (b = 'x')`. Empty if there are no predicates.
///
/// # Errors
///
/// Returns [`Error::InvalidOperator`] for operators outside the whitelist.
pub fn where_clause(predicates: &[Predicate], names: &NameResolver<'_>) -> Result<String> {
    if predicates.is_empty() {
        return Ok(String::new());
    }

    let tests = predicates
        .iter()
        .map(|p| {
            if verify_operator(&p.operator) {
                Ok(format!(
                    "({} {} {})",
                    names.column(&p.column),
                    p.operator,
                    p.value.to_sql_inline()
                ))
            } else {
                Err(Error::InvalidOperator(p.operator.clone()))
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(format!("WHERE {}", tests.join(" AND ")))
}

/// `ORDER BY a ASC, b DESC ` (with a trailing space). Empty if there are no
/// keys.
#[must_use]
pub fn order_by_clause(keys: &[(String, Order)], names: &NameResolver<'_>) -> String {
    if keys.is_empty() {
        return String::new();
    }
    let keys: Vec<String> = keys
        .iter()
        .map(|(column, order)| format!("{} {order}", names.column(column)))
        .collect();
    format!("ORDER BY {} ", keys.join(", "))
}

fn assignments(fields: &[(String, Parameter)], names: &NameResolver<'_>) -> String {
    fields
        .iter()
        .map(|(column, value)| format!("{} = {}", names.column(column), value.to_sql_inline()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `SET a = 1, b = 'x'`
#[must_use]
pub fn set_clause(fields: &[(String, Parameter)], names: &NameResolver<'_>) -> String {
    format!("SET {}", assignments(fields, names))
}

fn value_list<'a>(values: impl IntoIterator<Item = &'a Parameter>) -> String {
    values
        .into_iter()
        .map(Parameter::to_sql_inline)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `VALUES (1, 2), (3, 4)`
#[must_use]
pub fn values_clause(rows: &[Vec<Parameter>]) -> String {
    let rows: Vec<String> = rows
        .iter()
        .map(|row| format!("({})", value_list(row)))
        .collect();
    format!("VALUES {}", rows.join(", "))
}

/// Trailing row-limit clause for the dialect, with a trailing space.
///
/// `MySQL` writes `LIMIT offset, count` when an offset is set, filling in the
/// largest count if no limit is set. Microsoft puts the limit in the SELECT
/// clause instead. `PostgreSQL` has no rendering and yields an empty clause.
///
/// # Errors
///
/// Returns [`Error::UnknownDialect`] for dialects without limit support and
/// [`Error::UnsupportedOperation`] for an offset on Microsoft.
pub fn limit_clause(dialect: Dialect, limit: Option<u64>, offset: Option<u64>) -> Result<String> {
    match dialect {
        Dialect::MySql => Ok(match (limit, offset) {
            (limit, Some(offset)) => {
                format!("LIMIT {offset}, {} ", limit.unwrap_or(u64::MAX))
            }
            (Some(limit), None) => format!("LIMIT {limit} "),
            (None, None) => String::new(),
        }),
        Dialect::Microsoft => {
            if offset.is_some() {
                Err(Error::UnsupportedOperation(String::from(
                    "OFFSET is not available with the microsoft dialect",
                )))
            } else {
                Ok(String::new())
            }
        }
        Dialect::PostgreSql => {
            if limit.is_some() || offset.is_some() {
                warn!(?limit, ?offset, "limit/offset not rendered for postgresql");
            }
            Ok(String::new())
        }
        Dialect::Oracle => Err(Error::UnknownDialect(String::from(dialect.name()))),
    }
}

/// Renders a SELECT statement.
///
/// # Errors
///
/// Fails without a projection or FROM source, on an invalid operator, and on
/// the dialect errors of [`limit_clause`].
pub fn select_query(
    state: &ClauseState,
    dialect: Dialect,
    names: &NameResolver<'_>,
) -> Result<String> {
    if !state.has_projection() {
        return Err(Error::missing(QueryKind::Select, "SELECT"));
    }
    if state.from_fields.is_empty() {
        return Err(Error::missing(QueryKind::Select, "FROM"));
    }

    let mut sql = select_clause(state, dialect, names);
    push_clause(&mut sql, &from_clause(&state.from_fields, names));
    push_clause(&mut sql, &join_clause(&state.join_fields, names));
    push_clause(&mut sql, &where_clause(&state.where_fields, names)?);
    push_clause(&mut sql, &order_by_clause(&state.order_by_fields, names));
    push_clause(&mut sql, &limit_clause(dialect, state.limit, state.offset)?);
    Ok(sql)
}

/// Renders an INSERT statement.
///
/// # Errors
///
/// Fails without VALUES rows, or if a row does not match the column list.
pub fn insert_query(state: &ClauseState, names: &NameResolver<'_>) -> Result<String> {
    if state.value_fields.is_empty() {
        return Err(Error::missing(QueryKind::Insert, "VALUES"));
    }

    let columns = &state.select_fields;
    if !columns.is_empty() {
        if let Some((row, values)) = state
            .value_fields
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != columns.len())
        {
            return Err(Error::ArityMismatch {
                row,
                expected: columns.len(),
                found: values.len(),
            });
        }
    }

    let mut sql = format!("INSERT INTO {}", names.table(&state.table));
    if !columns.is_empty() {
        let columns: Vec<String> = columns.iter().map(|c| names.column(c)).collect();
        sql.push('(');
        sql.push_str(&columns.join(", "));
        sql.push(')');
    }
    push_clause(&mut sql, &values_clause(&state.value_fields));
    Ok(sql)
}

/// Renders an UPDATE statement.
///
/// # Errors
///
/// Fails without SET fields or on an invalid operator.
pub fn update_query(state: &ClauseState, names: &NameResolver<'_>) -> Result<String> {
    if state.set_fields.is_empty() {
        return Err(Error::missing(QueryKind::Update, "SET"));
    }

    let mut sql = format!("UPDATE {}", names.table(&state.table));
    push_clause(&mut sql, &set_clause(&state.set_fields, names));
    push_clause(&mut sql, &where_clause(&state.where_fields, names)?);
    Ok(sql)
}

/// Renders a DELETE statement.
///
/// # Errors
///
/// Fails on an invalid operator.
pub fn delete_query(state: &ClauseState, names: &NameResolver<'_>) -> Result<String> {
    let mut sql = format!("DELETE FROM {}", names.table(&state.table));
    push_clause(&mut sql, &where_clause(&state.where_fields, names)?);
    Ok(sql)
}

/// Checks that every upsert key predicate is a plain `=` test.
fn upsert_keys(predicates: &[Predicate]) -> Result<()> {
    for p in predicates {
        if !verify_operator(&p.operator) {
            return Err(Error::InvalidOperator(p.operator.clone()));
        }
        if p.operator != "=" {
            return Err(Error::UnsupportedOperation(format!(
                "upsert key '{}' must use '=', not '{}'",
                p.column, p.operator
            )));
        }
    }
    Ok(())
}

/// Renders an upsert as `INSERT ... ON DUPLICATE KEY UPDATE ...`.
///
/// The WHERE predicates supply the key columns and values; the SET fields are
/// inserted as well and form the update list.
///
/// # Errors
///
/// Fails on any dialect but `MySQL`, without SET fields, on an invalid
/// operator, and on a key predicate that is not an `=` test.
pub fn upsert_query(
    state: &ClauseState,
    dialect: Dialect,
    names: &NameResolver<'_>,
) -> Result<String> {
    if !dialect.supports_upsert() {
        return Err(Error::UnsupportedOperation(format!(
            "upsert is only available with the mysql dialect, not {dialect}"
        )));
    }
    if state.set_fields.is_empty() {
        return Err(Error::missing(QueryKind::Upsert, "SET"));
    }
    upsert_keys(&state.where_fields)?;

    let columns: Vec<String> = state
        .where_fields
        .iter()
        .map(|p| names.column(&p.column))
        .chain(state.set_fields.iter().map(|(column, _)| names.column(column)))
        .collect();
    let values = value_list(
        state
            .where_fields
            .iter()
            .map(|p| &p.value)
            .chain(state.set_fields.iter().map(|(_, value)| value)),
    );

    Ok(format!(
        "INSERT INTO {}({}) VALUES ({values}) ON DUPLICATE KEY UPDATE {}",
        names.table(&state.table),
        columns.join(", "),
        assignments(&state.set_fields, names)
    ))
}
