//! Map-file loading and physical name rendering.

mod common;
use common::*;

use oxide_sql_writer::{
    Dialect, Error, JoinKind, MapFileParser, SchemaMapper, SqlWriter, SyntaxIssue, WriterConfig,
};

const SCHEDULE_MAP: &str = "\
; physical names for the scheduler tables
TABLE [Schedule]=[tbl_scheduleModification]
COLUMN [ModificationType]=[mod_type]
COLUMN [Value]
END

TABLE [Users]=[tbl_users]
COLUMN [Name]=[user_name]
END
";

fn resolving_writer() -> SqlWriter {
    let mut writer = declared_writer(WriterConfig::new(Dialect::MySql).resolve_names(true));
    let file = map_file(SCHEDULE_MAP);
    writer.load_map_file(file.path()).expect("map file loads");
    writer
}

#[test]
fn load_populates_mapper() {
    let writer = resolving_writer();
    let mapper = writer.mapper();
    assert_eq!(
        mapper.physical_table("Schedule"),
        Some("tbl_scheduleModification")
    );
    assert_eq!(mapper.physical_table("Users"), Some("tbl_users"));

    let schedule = mapper.table("Schedule").expect("declared");
    assert_eq!(schedule.column_map("ModificationType"), Some("mod_type"));
    assert_eq!(schedule.column_map("Value"), None);
    assert!(schedule.has_column("Value"));
}

#[test]
fn column_before_table_reports_line() {
    let mut writer = declared_writer(WriterConfig::default());
    let file = map_file("; header\nCOLUMN [Id]=[id]\nTABLE [Users]\nEND\n");
    let err = writer.load_map_file(file.path()).unwrap_err();

    assert!(err.is_map_file_syntax());
    assert_eq!(err.line(), Some(2));
    assert_eq!(err.syntax_issue(), Some(&SyntaxIssue::ColumnOutsideTable));
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn undeclared_table_is_rejected() {
    let mut writer = declared_writer(WriterConfig::default());
    let file = map_file("TABLE [Users]\nEND\nTABLE [Orders]=[tbl_orders]\nEND\n");
    let err = writer.load_map_file(file.path()).unwrap_err();

    assert_eq!(err.line(), Some(3));
    assert_eq!(
        err.syntax_issue(),
        Some(&SyntaxIssue::UnknownTable(String::from("Orders")))
    );
}

#[test]
fn nested_table_is_rejected() {
    let mut writer = declared_writer(WriterConfig::default());
    let file = map_file("TABLE [Users]\nTABLE [Schedule]\nEND\n");
    let err = writer.load_map_file(file.path()).unwrap_err();

    assert_eq!(err.line(), Some(2));
    assert_eq!(err.syntax_issue(), Some(&SyntaxIssue::TableAlreadyOpen));
}

#[test]
fn missing_file_fails_to_open() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.map");
    let mut writer = SqlWriter::new();

    let err = writer.load_map_file(&path).unwrap_err();
    assert!(matches!(err, Error::FileOpen { path: ref p, .. } if *p == path));
    assert!(!err.is_map_file_syntax());
}

#[test]
fn invalid_utf8_fails_to_read() {
    let mut writer = declared_writer(WriterConfig::default());
    let file = map_file_bytes(b"TABLE [\xff]\nEND\n");

    let err = writer.load_map_file(file.path()).unwrap_err();
    assert!(matches!(err, Error::MapFileRead { ref path, .. } if path == file.path()));
    assert!(err.line().is_none());
}

#[test]
fn parser_accepts_in_memory_source() {
    let mut mapper = SchemaMapper::new();
    mapper.declare_table("Users");
    mapper.declare_column("Users", "Name");

    MapFileParser::new(&mut mapper, "inline.map")
        .parse_str("TABLE [Users]=[tbl_users]\r\nCOLUMN [Name]=[user_name]\r\nEND\r\n")
        .expect("valid source");

    assert_eq!(
        mapper.physical_column("Users.Name").as_deref(),
        Some("tbl_users.user_name")
    );
}

#[test]
fn pass_through_by_default() {
    let mut writer = declared_writer(WriterConfig::default());
    let file = map_file(SCHEDULE_MAP);
    writer.load_map_file(file.path()).expect("map file loads");

    writer.select_fields(["Name"]).from("Users");
    assert_eq!(render(&writer), "SELECT Name FROM Users");
}

#[test]
fn select_uses_physical_names() {
    let mut writer = resolving_writer();
    writer
        .select_fields(["Name"])
        .from("Users")
        .and_where("Users.Name", "=", "x");
    assert_eq!(
        render_stable(&writer),
        "SELECT user_name FROM tbl_users WHERE (tbl_users.user_name = 'x')"
    );
}

#[test]
fn update_uses_physical_names() {
    let mut writer = resolving_writer();
    writer
        .update("Schedule")
        .set("Value", 1)
        .and_where("ModificationType", "=", 2);
    assert_eq!(
        render(&writer),
        "UPDATE tbl_scheduleModification SET Value = 1 WHERE (mod_type = 2)"
    );
}

#[test]
fn join_uses_physical_names() {
    let mut writer = resolving_writer();
    writer
        .select_qualified("Users", ["Name"])
        .from("Users")
        .join([("Users", "Id", JoinKind::Inner, "Schedule", "Id")]);
    assert_eq!(
        render(&writer),
        "SELECT tbl_users.user_name FROM tbl_users \
         INNER JOIN tbl_scheduleModification ON tbl_users.Id=tbl_scheduleModification.Id"
    );
}

#[test]
fn upsert_uses_physical_names() {
    let mut writer = resolving_writer();
    writer
        .upsert("Schedule")
        .set("Value", true)
        .and_where("ModificationType", "=", 1);
    assert_eq!(
        render(&writer),
        "INSERT INTO tbl_scheduleModification(mod_type, Value) VALUES (1, true) \
         ON DUPLICATE KEY UPDATE Value = true"
    );
}
