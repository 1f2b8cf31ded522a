#![allow(dead_code)]

use std::io::Write;

use oxide_sql_writer::{Dialect, SqlWriter, WriterConfig};
use tempfile::NamedTempFile;

pub fn writer_for(dialect: Dialect) -> SqlWriter {
    SqlWriter::with_config(WriterConfig::new(dialect))
}

pub fn render(writer: &SqlWriter) -> String {
    writer
        .build()
        .unwrap_or_else(|e| panic!("Failed to render {:?}\nError: {e}", writer.state()))
}

/// Renders twice and checks both renders agree.
pub fn render_stable(writer: &SqlWriter) -> String {
    let first = render(writer);
    let second = render(writer);
    assert_eq!(first, second, "render is not repeatable");
    first
}

/// A writer with `Schedule(Id, Value, ModificationType)` and `Users(Id, Name)`
/// declared but not mapped.
pub fn declared_writer(config: WriterConfig) -> SqlWriter {
    let mut writer = SqlWriter::with_config(config);
    writer.declare_table("Schedule");
    for column in ["Id", "Value", "ModificationType"] {
        writer.declare_column("Schedule", column);
    }
    writer.declare_table("Users");
    for column in ["Id", "Name"] {
        writer.declare_column("Users", column);
    }
    writer
}

pub fn map_file(contents: &str) -> NamedTempFile {
    map_file_bytes(contents.as_bytes())
}

pub fn map_file_bytes(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp map file");
    file.write_all(contents)
        .expect("write temp map file");
    file.flush().expect("flush temp map file");
    file
}
