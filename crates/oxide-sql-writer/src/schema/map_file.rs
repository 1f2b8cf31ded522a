//! Map-file loader.
//!
//! A map file assigns physical names to tables and columns that were declared
//! on a [`SchemaMapper`] beforehand. One directive per line:
//!
//! ```text
//! ; comment
//! TABLE [Users]=[tbl_users]
//! COLUMN [Name]=[user_name]
//! COLUMN [Email]
//! END
//! ```
//!
//! The `=[...]` part is optional. Loading stops at the first bad line; the
//! mapper may then hold some of the file's mappings and should be discarded.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::SchemaMapper;
use crate::error::{Error, Result, SyntaxIssue};

const TABLE: &str = "TABLE";
const COLUMN: &str = "COLUMN";
const END: &str = "END";

/// One parsed map-file line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `TABLE [logical]=[physical]`
    Table {
        /// Logical table name.
        name: String,
        /// Physical table name, empty if not given.
        physical: String,
    },
    /// `COLUMN [logical]=[physical]`
    Column {
        /// Logical column name.
        name: String,
        /// Physical column name, empty if not given.
        physical: String,
    },
    /// `END`
    End,
}

/// Returns the text between the first `[` at or after `from` and the first
/// `]` at or after `from`, if the bracket precedes the closing bracket.
fn bracketed(line: &str, from: usize) -> Option<&str> {
    let rest = &line[from..];
    let open = rest.find('[')?;
    let close = rest.find(']')?;
    (open < close).then(|| &rest[open + 1..close])
}

/// Parses a single line. Comments and blank lines yield `None`.
///
/// # Errors
///
/// Returns the [`SyntaxIssue`] describing a malformed line. Scope and
/// declaration checks happen when the directive is applied.
pub fn parse_line(line: &str) -> std::result::Result<Option<Directive>, SyntaxIssue> {
    if line.len() <= 1 || line.starts_with(';') || line.trim().is_empty() {
        return Ok(None);
    }

    let command = line.split(' ').next().unwrap_or_default().trim();
    let equals = line.find('=');

    match command {
        END => {
            if line.contains(['[', ']', '=']) {
                Err(SyntaxIssue::MalformedEnd)
            } else {
                Ok(Some(Directive::End))
            }
        }
        TABLE | COLUMN => {
            let name = bracketed(line, 0).ok_or(SyntaxIssue::MissingToken)?;
            let physical = equals
                .and_then(|pos| bracketed(line, pos))
                .unwrap_or_default();
            let name = String::from(name);
            let physical = String::from(physical);
            if command == TABLE {
                Ok(Some(Directive::Table { name, physical }))
            } else {
                Ok(Some(Directive::Column { name, physical }))
            }
        }
        other => Err(SyntaxIssue::UnrecognizedDirective(String::from(other))),
    }
}

/// Applies map-file directives to a [`SchemaMapper`], tracking the open TABLE
/// scope across lines.
#[derive(Debug)]
pub struct MapFileParser<'m> {
    mapper: &'m mut SchemaMapper,
    path: PathBuf,
    current_table: Option<String>,
}

impl<'m> MapFileParser<'m> {
    /// Creates a parser that reports errors against `path`.
    pub fn new(mapper: &'m mut SchemaMapper, path: impl Into<PathBuf>) -> Self {
        Self {
            mapper,
            path: path.into(),
            current_table: None,
        }
    }

    fn syntax(&self, line: usize, issue: SyntaxIssue) -> Error {
        Error::MapFileSyntax {
            path: self.path.clone(),
            line,
            issue,
        }
    }

    /// Parses and applies one line. `line_number` is one-based.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MapFileSyntax`] for malformed lines, undeclared names
    /// and scope violations.
    pub fn feed_line(&mut self, line_number: usize, line: &str) -> Result<()> {
        let Some(directive) =
            parse_line(line).map_err(|issue| self.syntax(line_number, issue))?
        else {
            return Ok(());
        };
        self.apply(directive)
            .map_err(|issue| self.syntax(line_number, issue))
    }

    fn apply(&mut self, directive: Directive) -> std::result::Result<(), SyntaxIssue> {
        match directive {
            Directive::Table { name, physical } => {
                if self.current_table.is_some() {
                    return Err(SyntaxIssue::TableAlreadyOpen);
                }
                if name.is_empty() {
                    return Err(SyntaxIssue::MissingTableName);
                }
                if !self.mapper.has_table(&name) {
                    return Err(SyntaxIssue::UnknownTable(name));
                }
                if !physical.is_empty() {
                    self.mapper.map_table(&name, &physical);
                }
                debug!(table = %name, physical = %physical, "map file: TABLE");
                self.current_table = Some(name);
            }
            Directive::Column { name, physical } => {
                let Some(table) = self.current_table.as_deref() else {
                    return Err(SyntaxIssue::ColumnOutsideTable);
                };
                if name.is_empty() {
                    return Err(SyntaxIssue::MissingColumnName);
                }
                if !self.mapper.has_column(table, &name) {
                    return Err(SyntaxIssue::UnknownColumn(name));
                }
                if !physical.is_empty() {
                    self.mapper.map_column(table, &name, &physical);
                }
                debug!(table, column = %name, physical = %physical, "map file: COLUMN");
            }
            Directive::End => {
                self.current_table = None;
            }
        }
        Ok(())
    }

    /// Applies every line of `source`.
    ///
    /// # Errors
    ///
    /// Stops at the first failing line; see [`MapFileParser::feed_line`].
    pub fn parse_str(mut self, source: &str) -> Result<()> {
        for (index, line) in source.lines().enumerate() {
            self.feed_line(index + 1, line)?;
        }
        self.finish();
        Ok(())
    }

    /// Reads and applies the file at the parser's path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileOpen`] if the file cannot be opened,
    /// [`Error::MapFileRead`] on read failures (including invalid UTF-8) and
    /// [`Error::MapFileSyntax`] at the first malformed line.
    pub fn load(mut self) -> Result<()> {
        let file = File::open(&self.path).map_err(|source| Error::FileOpen {
            path: self.path.clone(),
            source,
        })?;

        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| Error::MapFileRead {
                path: self.path.clone(),
                source,
            })?;
            self.feed_line(index + 1, &line)?;
        }

        self.finish();
        Ok(())
    }

    fn finish(self) {
        if let Some(table) = self.current_table {
            warn!(
                path = %self.path.display(),
                table = %table,
                "map file ended inside a TABLE scope"
            );
        }
        info!(path = %self.path.display(), tables = self.mapper.len(), "SQL map file loaded");
    }
}

/// Loads the map file at `path` into `mapper`.
///
/// # Errors
///
/// See [`MapFileParser::load`].
pub fn load(path: impl AsRef<Path>, mapper: &mut SchemaMapper) -> Result<()> {
    MapFileParser::new(mapper, path.as_ref()).load()
}
