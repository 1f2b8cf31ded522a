//! # oxide-sql-writer
//!
//! A mutable SQL statement composer.
//!
//! This crate provides:
//! - [`SqlWriter`], a fluent builder for SELECT, INSERT, UPDATE, DELETE and
//!   `MySQL` upsert statements, rendered per [`Dialect`]
//! - [`SchemaMapper`], which maps the logical table and column names used by
//!   callers to the physical names of a database
//! - a loader for the line-oriented map-file format that fills a
//!   [`SchemaMapper`]
//!
//! The writer only produces text. It never talks to a database, and values
//! are written inline: text is single-quoted, nothing else is escaped.
//!
//! ## Writing statements
//!
//! ```rust
//! use oxide_sql_writer::{Dialect, SqlWriter, WriterConfig};
//!
//! let mut writer = SqlWriter::new();
//! writer.select_fields(["a"]).from("t").limit(10).offset(5);
//! assert_eq!(writer.build().unwrap(), "SELECT a FROM t LIMIT 5, 10 ");
//!
//! let mut writer = SqlWriter::with_config(WriterConfig::new(Dialect::Microsoft));
//! writer.select_fields(["a"]).from("t").limit(10);
//! assert_eq!(writer.build().unwrap(), "SELECT TOP 10 a FROM t");
//! ```
//!
//! ## Starting a statement resets the writer
//!
//! Every statement-starting call discards all previously accumulated
//! clauses, including when the same kind of statement is started again:
//!
//! ```rust
//! use oxide_sql_writer::SqlWriter;
//!
//! let mut writer = SqlWriter::new();
//! writer.select_fields(["a"]).from("t").and_where("id", "=", 1);
//! writer.delete_from("t");
//! assert_eq!(writer.build().unwrap(), "DELETE FROM t");
//! ```
//!
//! ## Physical names
//!
//! ```rust
//! use oxide_sql_writer::{SqlWriter, WriterConfig};
//!
//! let mut writer = SqlWriter::with_config(WriterConfig::default().resolve_names(true));
//! writer.declare_table("Users");
//! writer.declare_column("Users", "Name");
//! writer.mapper_mut().map_table("Users", "tbl_users");
//! writer.mapper_mut().map_column("Users", "Name", "user_name");
//!
//! writer.select_fields(["Name"]).from("Users");
//! assert_eq!(writer.build().unwrap(), "SELECT user_name FROM tbl_users");
//! ```

pub mod builder;
pub mod config;
pub mod dialect;
pub mod error;
pub mod schema;

pub use builder::{
    bind, verify_operator, Join, JoinKind, Order, Parameter, Predicate, QueryKind, SqlWriter,
    ToParameter,
};
pub use config::WriterConfig;
pub use dialect::Dialect;
pub use error::{Error, Result, SyntaxIssue};
pub use schema::map_file::MapFileParser;
pub use schema::{NameResolver, SchemaMapper, TableEntry};
