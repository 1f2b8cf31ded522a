//! The mutable statement writer.

use std::path::Path;

use tracing::debug;

use super::expr::{Join, Order, Predicate};
use super::render;
use super::state::{Aliased, ClauseState, QueryKind};
use super::value::{Parameter, ToParameter};
use crate::config::WriterConfig;
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::schema::{map_file, NameResolver, SchemaMapper};

/// Composes one SQL statement at a time.
///
/// Mutators return `&mut Self` so calls chain. Starting a statement with
/// [`select`](Self::select), [`insert_into`](Self::insert_into),
/// [`update`](Self::update), [`delete_from`](Self::delete_from) or
/// [`upsert`](Self::upsert) discards everything accumulated before, even when
/// the same kind of statement was already being written.
///
/// ```rust
/// use oxide_sql_writer::{Order, SqlWriter};
///
/// let mut writer = SqlWriter::new();
/// writer
///     .select_fields(["a", "b"])
///     .from("t1")
///     .order_by([("a", Order::Asc)]);
/// assert_eq!(writer.build().unwrap(), "SELECT a, b FROM t1 ORDER BY a ASC ");
///
/// writer.insert_into_columns("t", ["a", "b"]).values([vec![1, 2], vec![3, 4]]);
/// assert_eq!(writer.build().unwrap(), "INSERT INTO t(a, b) VALUES (1, 2), (3, 4)");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SqlWriter {
    config: WriterConfig,
    mapper: SchemaMapper,
    state: ClauseState,
}

impl SqlWriter {
    /// Creates a writer for the `MySQL` dialect with no name mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer with the given configuration.
    #[must_use]
    pub fn with_config(config: WriterConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Returns the active dialect.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.config.dialect
    }

    /// Changes the dialect used by subsequent renders.
    pub const fn set_dialect(&mut self, dialect: Dialect) -> &mut Self {
        self.config.dialect = dialect;
        self
    }

    /// Returns the kind of statement being written.
    #[must_use]
    pub const fn kind(&self) -> QueryKind {
        self.state.kind
    }

    /// Returns the accumulated clause state.
    #[must_use]
    pub const fn state(&self) -> &ClauseState {
        &self.state
    }

    // Schema mapping

    /// Returns the schema mapper.
    #[must_use]
    pub const fn mapper(&self) -> &SchemaMapper {
        &self.mapper
    }

    /// Returns the schema mapper for direct changes.
    pub const fn mapper_mut(&mut self) -> &mut SchemaMapper {
        &mut self.mapper
    }

    /// Declares a logical table. Returns false if it already exists.
    pub fn declare_table(&mut self, table: &str) -> bool {
        self.mapper.declare_table(table)
    }

    /// Declares a column of a declared table. Returns false if the table is
    /// unknown or the column already exists.
    pub fn declare_column(&mut self, table: &str, column: &str) -> bool {
        self.mapper.declare_column(table, column)
    }

    /// Loads physical names from a map file into the schema mapper.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileOpen`], [`Error::MapFileRead`] or
    /// [`Error::MapFileSyntax`]. After a failure the mapper may hold part of
    /// the file's mappings.
    pub fn load_map_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        map_file::load(path, &mut self.mapper)
    }

    // Statement kinds

    /// Replaces all clause state with a clean state for `kind`.
    fn transition_to(&mut self, kind: QueryKind) -> &mut Self {
        if self.state.kind != QueryKind::None {
            debug!(from = %self.state.kind, to = %kind, "discarding unfinished statement");
        }
        self.state = ClauseState::start(kind);
        self
    }

    /// Starts a SELECT with no fields; add projections with
    /// [`count`](Self::count), [`max`](Self::max) or [`min`](Self::min).
    pub fn select(&mut self) -> &mut Self {
        self.transition_to(QueryKind::Select)
    }

    /// Starts a SELECT of the given fields.
    pub fn select_fields<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.select();
        self.state
            .select_fields
            .extend(fields.into_iter().map(|f| String::from(f.as_ref())));
        self
    }

    /// Starts a SELECT of the given fields, each written as `table.field`.
    pub fn select_qualified<I, S>(&mut self, table: &str, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.select();
        self.state
            .select_fields
            .extend(fields.into_iter().map(|f| format!("{table}.{}", f.as_ref())));
        self
    }

    /// Starts an INSERT into `table` without a column list.
    pub fn insert_into(&mut self, table: &str) -> &mut Self {
        self.transition_to(QueryKind::Insert);
        self.state.table = String::from(table);
        self
    }

    /// Starts an INSERT into `table` with the given column list.
    ///
    /// Every row added with [`values`](Self::values) must have one value per
    /// column.
    pub fn insert_into_columns<I, S>(&mut self, table: &str, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.insert_into(table);
        self.state
            .select_fields
            .extend(columns.into_iter().map(|c| String::from(c.as_ref())));
        self
    }

    /// Starts an UPDATE of `table`.
    pub fn update(&mut self, table: &str) -> &mut Self {
        self.transition_to(QueryKind::Update);
        self.state.table = String::from(table);
        self
    }

    /// Starts a DELETE from `table`.
    pub fn delete_from(&mut self, table: &str) -> &mut Self {
        self.transition_to(QueryKind::Delete);
        self.state.table = String::from(table);
        self
    }

    /// Starts an upsert of `table` (`MySQL` only).
    ///
    /// The WHERE predicates name the key columns and their values; the SET
    /// fields are inserted and updated on a duplicate key.
    ///
    /// ```rust
    /// use oxide_sql_writer::SqlWriter;
    ///
    /// let mut writer = SqlWriter::new();
    /// writer
    ///     .upsert("tbl_scheduleModification")
    ///     .set("Value", true)
    ///     .and_where("ModificationType", "=", 1);
    /// assert_eq!(
    ///     writer.build().unwrap(),
    ///     "INSERT INTO tbl_scheduleModification(ModificationType, Value) VALUES (1, true) \
    ///      ON DUPLICATE KEY UPDATE Value = true"
    /// );
    /// ```
    pub fn upsert(&mut self, table: &str) -> &mut Self {
        self.transition_to(QueryKind::Upsert);
        self.state.table = String::from(table);
        self
    }

    // Clauses

    /// Adds a FROM source.
    pub fn from(&mut self, table: &str) -> &mut Self {
        self.from_as(table, "")
    }

    /// Adds a FROM source with an alias. An empty alias means none.
    pub fn from_as(&mut self, table: &str, alias: &str) -> &mut Self {
        self.state.from_fields.push(Aliased::new(table, alias));
        self
    }

    /// Adds several FROM sources.
    pub fn from_tables<I, S>(&mut self, tables: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.state
            .from_fields
            .extend(tables.into_iter().map(|t| Aliased::new(t.as_ref(), "")));
        self
    }

    /// Adds JOIN clauses, rendered in call order.
    pub fn join<I, J>(&mut self, joins: I) -> &mut Self
    where
        I: IntoIterator<Item = J>,
        J: Into<Join>,
    {
        self.state
            .join_fields
            .extend(joins.into_iter().map(Into::into));
        self
    }

    /// Adds WHERE predicates. All predicates are joined with AND.
    pub fn where_clause<I, P>(&mut self, predicates: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Predicate>,
    {
        self.state
            .where_fields
            .extend(predicates.into_iter().map(Into::into));
        self
    }

    /// Adds one WHERE predicate.
    pub fn and_where<T: ToParameter>(
        &mut self,
        column: &str,
        operator: &str,
        value: T,
    ) -> &mut Self {
        self.state
            .where_fields
            .push(Predicate::new(column, operator, value));
        self
    }

    /// Removes all WHERE predicates, leaving every other clause untouched.
    pub fn reset_where(&mut self) -> &mut Self {
        self.state.where_fields.clear();
        self
    }

    /// Adds a SET assignment.
    pub fn set<T: ToParameter>(&mut self, column: &str, value: T) -> &mut Self {
        self.state
            .set_fields
            .push((String::from(column), value.to_parameter()));
        self
    }

    /// Adds several SET assignments.
    pub fn set_many<I, S, T>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: ToParameter,
    {
        self.state.set_fields.extend(
            fields
                .into_iter()
                .map(|(column, value)| (String::from(column.as_ref()), value.to_parameter())),
        );
        self
    }

    /// Appends VALUES rows.
    pub fn values<R, T>(&mut self, rows: R) -> &mut Self
    where
        R: IntoIterator<Item = Vec<T>>,
        T: ToParameter,
    {
        self.state.value_fields.extend(
            rows.into_iter()
                .map(|row| row.into_iter().map(ToParameter::to_parameter).collect()),
        );
        self
    }

    /// Appends one VALUES row of already-built parameters.
    pub fn values_row(&mut self, row: Vec<Parameter>) -> &mut Self {
        self.state.value_fields.push(row);
        self
    }

    /// Adds ORDER BY keys, rendered in call order.
    pub fn order_by<I, S>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator<Item = (S, Order)>,
        S: AsRef<str>,
    {
        self.state.order_by_fields.extend(
            keys.into_iter()
                .map(|(column, order)| (String::from(column.as_ref()), order)),
        );
        self
    }

    /// Sets the maximum number of rows.
    pub const fn limit(&mut self, n: u64) -> &mut Self {
        self.state.limit = Some(n);
        self
    }

    /// Sets the number of rows to skip.
    pub const fn offset(&mut self, n: u64) -> &mut Self {
        self.state.offset = Some(n);
        self
    }

    /// Makes the SELECT DISTINCT.
    pub const fn distinct(&mut self) -> &mut Self {
        self.state.distinct = true;
        self
    }

    /// Adds `COUNT(expression)` to the projection; `"*"` gives `COUNT(*)`.
    pub fn count(&mut self, expression: &str) -> &mut Self {
        self.state.count = Some(String::from(expression));
        self
    }

    /// Adds `MAX(column)` to the projection.
    pub fn max(&mut self, column: &str) -> &mut Self {
        self.max_as(column, "")
    }

    /// Adds `MAX(column) AS alias` to the projection.
    pub fn max_as(&mut self, column: &str, alias: &str) -> &mut Self {
        self.state.max_fields.push(Aliased::new(column, alias));
        self
    }

    /// Adds `MIN(column)` to the projection.
    pub fn min(&mut self, column: &str) -> &mut Self {
        self.min_as(column, "")
    }

    /// Adds `MIN(column) AS alias` to the projection.
    pub fn min_as(&mut self, column: &str, alias: &str) -> &mut Self {
        self.state.min_fields.push(Aliased::new(column, alias));
        self
    }

    /// Clears all state, including the query kind.
    pub fn reset_query(&mut self) -> &mut Self {
        self.state = ClauseState::default();
        self
    }

    /// Renders the current statement.
    ///
    /// Rendering does not change the writer; calling it again gives the same
    /// text, and a failed render can be retried after fixing the state.
    ///
    /// # Errors
    ///
    /// - [`Error::NoActiveQuery`] if no statement was started.
    /// - [`Error::MissingRequiredClause`] for a SELECT without projection or
    ///   FROM, an UPDATE or upsert without SET, or an INSERT without rows.
    /// - [`Error::UnsupportedOperation`] for an upsert outside `MySQL`, an
    ///   upsert key predicate other than `=`, or an offset with the Microsoft
    ///   dialect.
    /// - [`Error::UnknownDialect`] for a SELECT with a dialect that has no
    ///   limit rendering.
    /// - [`Error::InvalidOperator`] and [`Error::ArityMismatch`].
    pub fn build(&self) -> Result<String> {
        let names = NameResolver::new(&self.mapper, self.config.resolve_names);
        let dialect = self.config.dialect;
        match self.state.kind {
            QueryKind::None => Err(Error::NoActiveQuery),
            QueryKind::Select => render::select_query(&self.state, dialect, &names),
            QueryKind::Insert => render::insert_query(&self.state, &names),
            QueryKind::Update => render::update_query(&self.state, &names),
            QueryKind::Delete => render::delete_query(&self.state, &names),
            QueryKind::Upsert => render::upsert_query(&self.state, dialect, &names),
        }
    }
}
