//! Logical to physical name mapping.
//!
//! Callers write statements against logical table and column names. A
//! [`SchemaMapper`] records, per logical table, the physical table name and the
//! physical name of each column. Tables and columns must be declared before
//! they can be mapped; a map file (see [`map_file`]) then fills in the
//! physical names.
//!
//! ```rust
//! use oxide_sql_writer::SchemaMapper;
//!
//! let mut mapper = SchemaMapper::new();
//! assert!(mapper.declare_table("Users"));
//! assert!(mapper.declare_column("Users", "Name"));
//! mapper.map_table("Users", "tbl_users");
//! mapper.map_column("Users", "Name", "user_name");
//!
//! assert_eq!(mapper.physical_table("Users"), Some("tbl_users"));
//! assert_eq!(mapper.physical_column("Users.Name").as_deref(), Some("tbl_users.user_name"));
//! ```

pub mod map_file;

use std::collections::BTreeMap;

/// A declared logical table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableEntry {
    name: String,
    alias: Option<String>,
    columns: BTreeMap<String, Option<String>>,
}

impl TableEntry {
    fn new(name: &str) -> Self {
        Self {
            name: String::from(name),
            alias: None,
            columns: BTreeMap::new(),
        }
    }

    /// Logical table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Physical table name, if mapped.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Returns true if the column has been declared.
    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Physical column name, if declared and mapped.
    #[must_use]
    pub fn column_map(&self, column: &str) -> Option<&str> {
        self.columns.get(column).and_then(Option::as_deref)
    }

    /// Declared column names, in sorted order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }
}

/// Registry of declared tables and their physical names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaMapper {
    tables: BTreeMap<String, TableEntry>,
}

impl SchemaMapper {
    /// Creates an empty mapper.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a logical table.
    ///
    /// Returns false, leaving the existing entry untouched, if the table was
    /// already declared.
    pub fn declare_table(&mut self, table: &str) -> bool {
        if self.tables.contains_key(table) {
            return false;
        }
        self.tables
            .insert(String::from(table), TableEntry::new(table));
        true
    }

    /// Declares a column under a declared table.
    ///
    /// Returns false if the table is unknown or the column already exists.
    pub fn declare_column(&mut self, table: &str, column: &str) -> bool {
        let Some(entry) = self.tables.get_mut(table) else {
            return false;
        };
        if entry.columns.contains_key(column) {
            return false;
        }
        entry.columns.insert(String::from(column), None);
        true
    }

    /// Sets the physical name of a declared table. Unknown tables are ignored.
    pub fn map_table(&mut self, table: &str, physical: &str) {
        if let Some(entry) = self.tables.get_mut(table) {
            entry.alias = Some(String::from(physical));
        }
    }

    /// Sets the physical name of a declared column. Unknown tables or columns
    /// are ignored.
    pub fn map_column(&mut self, table: &str, column: &str, physical: &str) {
        if let Some(slot) = self
            .tables
            .get_mut(table)
            .and_then(|entry| entry.columns.get_mut(column))
        {
            *slot = Some(String::from(physical));
        }
    }

    /// Returns the entry of a declared table.
    #[must_use]
    pub fn table(&self, table: &str) -> Option<&TableEntry> {
        self.tables.get(table)
    }

    /// Returns true if the table was declared.
    #[must_use]
    pub fn has_table(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    /// Returns true if the column was declared under the table.
    #[must_use]
    pub fn has_column(&self, table: &str, column: &str) -> bool {
        self.tables
            .get(table)
            .is_some_and(|entry| entry.has_column(column))
    }

    /// Number of declared tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if no table has been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Column name as it is written into statements by default: unchanged.
    #[must_use]
    pub fn resolve_column(&self, column: &str) -> String {
        String::from(column)
    }

    /// Table name as it is written into statements by default: unchanged.
    #[must_use]
    pub fn resolve_table(&self, table: &str) -> String {
        String::from(table)
    }

    /// Physical name of a mapped table.
    #[must_use]
    pub fn physical_table(&self, table: &str) -> Option<&str> {
        self.tables.get(table).and_then(TableEntry::alias)
    }

    /// Physical name of a column reference.
    ///
    /// `table.column` references resolve both parts against the named table.
    /// A bare column resolves only if exactly one table maps it to a single
    /// physical name. Returns `None` when nothing in the reference is mapped.
    #[must_use]
    pub fn physical_column(&self, column: &str) -> Option<String> {
        if let Some((table, name)) = column.split_once('.') {
            let entry = self.tables.get(table)?;
            let physical_table = entry.alias();
            let physical_name = entry.column_map(name);
            if physical_table.is_none() && physical_name.is_none() {
                return None;
            }
            return Some(format!(
                "{}.{}",
                physical_table.unwrap_or(table),
                physical_name.unwrap_or(name)
            ));
        }

        let mut found = self
            .tables
            .values()
            .filter_map(|entry| entry.column_map(column));
        let first = found.next()?;
        if found.all(|other| other == first) {
            Some(String::from(first))
        } else {
            None
        }
    }
}

/// Name substitution applied while rendering.
#[derive(Debug, Clone, Copy)]
pub struct NameResolver<'a> {
    mapper: &'a SchemaMapper,
    physical: bool,
}

impl<'a> NameResolver<'a> {
    /// Creates a resolver; `physical` selects mapped names over pass-through.
    #[must_use]
    pub const fn new(mapper: &'a SchemaMapper, physical: bool) -> Self {
        Self { mapper, physical }
    }

    /// Name to write for a table.
    #[must_use]
    pub fn table(&self, table: &str) -> String {
        if self.physical {
            if let Some(alias) = self.mapper.physical_table(table) {
                return String::from(alias);
            }
        }
        self.mapper.resolve_table(table)
    }

    /// Name to write for a column reference.
    #[must_use]
    pub fn column(&self, column: &str) -> String {
        if self.physical {
            if let Some(name) = self.mapper.physical_column(column) {
                return name;
            }
        }
        self.mapper.resolve_column(column)
    }

    /// Name to write for a column of a known table, without a table prefix.
    #[must_use]
    pub fn column_in(&self, table: &str, column: &str) -> String {
        if self.physical {
            if let Some(name) = self.mapper.table(table).and_then(|t| t.column_map(column)) {
                return String::from(name);
            }
        }
        self.mapper.resolve_column(column)
    }
}
