//! Error types for statement rendering and map-file loading.

use std::path::PathBuf;

use crate::builder::QueryKind;

/// A structural problem found on one line of a map file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxIssue {
    /// A TABLE or COLUMN directive without any `[...]` token.
    #[error("directive needs at least one token")]
    MissingToken,

    /// A COLUMN directive with no TABLE scope open.
    #[error("COLUMN directive found, but no TABLE directive in force")]
    ColumnOutsideTable,

    /// A COLUMN directive with an empty column name.
    #[error("COLUMN directive found without a column name")]
    MissingColumnName,

    /// The column was not declared under the open table.
    #[error("invalid column name '{0}'")]
    UnknownColumn(String),

    /// A TABLE directive while another TABLE scope is still open.
    #[error("TABLE directive found, but a TABLE directive is already in force")]
    TableAlreadyOpen,

    /// A TABLE directive with an empty table name.
    #[error("TABLE directive found without a table name")]
    MissingTableName,

    /// The table was not declared before the file was loaded.
    #[error("invalid table name '{0}'")]
    UnknownTable(String),

    /// An END line carrying tokens or an `=`.
    #[error("END directive must not carry tokens")]
    MalformedEnd,

    /// The leading word is not TABLE, COLUMN or END.
    #[error("invalid command '{0}'")]
    UnrecognizedDirective(String),
}

/// Errors raised by the writer and the map-file loader.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The dialect has no rendering for the requested construct.
    #[error("unknown dialect: {0}")]
    UnknownDialect(String),

    /// The construct exists but is not available for the active dialect.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A clause the active query kind cannot do without is absent.
    #[error("{kind} query is missing its {clause} clause")]
    MissingRequiredClause {
        /// The active query kind.
        kind: QueryKind,
        /// The clause that is absent.
        clause: &'static str,
    },

    /// A predicate uses an operator outside the whitelist.
    #[error("invalid operator '{0}'")]
    InvalidOperator(String),

    /// A VALUES row does not match the INSERT column list.
    #[error("value row {row} has {found} values, expected {expected}")]
    ArityMismatch {
        /// Zero-based row index.
        row: usize,
        /// Number of columns in the INSERT column list.
        expected: usize,
        /// Number of values in the row.
        found: usize,
    },

    /// `build()` was called before any query kind was started.
    #[error("no query has been started")]
    NoActiveQuery,

    /// A map file directive is malformed.
    #[error("error in SQL map file '{}', line {line}: {issue}", path.display())]
    MapFileSyntax {
        /// Path of the map file.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// What is wrong with the line.
        issue: SyntaxIssue,
    },

    /// The map file could not be opened.
    #[error("could not open SQL map file '{}': {source}", path.display())]
    FileOpen {
        /// Path of the map file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The map file could not be read after it was opened.
    #[error("could not read SQL map file '{}': {source}", path.display())]
    MapFileRead {
        /// Path of the map file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Creates a missing clause error.
    #[must_use]
    pub const fn missing(kind: QueryKind, clause: &'static str) -> Self {
        Self::MissingRequiredClause { kind, clause }
    }

    /// Returns true for map-file syntax errors.
    #[must_use]
    pub const fn is_map_file_syntax(&self) -> bool {
        matches!(self, Self::MapFileSyntax { .. })
    }

    /// Returns the map-file line number, if this error carries one.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::MapFileSyntax { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Returns the syntax issue, if this is a map-file syntax error.
    #[must_use]
    pub const fn syntax_issue(&self) -> Option<&SyntaxIssue> {
        match self {
            Self::MapFileSyntax { issue, .. } => Some(issue),
            _ => None,
        }
    }
}

/// Result type for writer operations.
pub type Result<T> = std::result::Result<T, Error>;
