//! INSERT, UPDATE, DELETE and upsert rendering.

mod common;
use common::*;

use oxide_sql_writer::{bind, Dialect, Error, Parameter, QueryKind, SqlWriter, ToParameter};

#[test]
fn insert_multiple_rows() {
    let mut writer = SqlWriter::new();
    writer
        .insert_into_columns("t", ["a", "b"])
        .values([vec![1, 2], vec![3, 4]]);
    assert_eq!(
        render_stable(&writer),
        "INSERT INTO t(a, b) VALUES (1, 2), (3, 4)"
    );
}

#[test]
fn insert_mixed_values() {
    let mut writer = SqlWriter::new();
    writer
        .insert_into_columns("users", ["name", "score", "active", "token", "note"])
        .values_row(vec![
            "O'Brien".to_parameter(),
            2.5_f64.to_parameter(),
            false.to_parameter(),
            bind("token"),
            None::<i32>.to_parameter(),
        ]);
    assert_eq!(
        render(&writer),
        "INSERT INTO users(name, score, active, token, note) VALUES ('O''Brien', 2.5, false, :token, NULL)"
    );
}

#[test]
fn insert_rows_accumulate_across_calls() {
    let mut writer = SqlWriter::new();
    writer
        .insert_into_columns("t", ["a"])
        .values([vec!["x"]])
        .values([vec!["y"]]);
    assert_eq!(render(&writer), "INSERT INTO t(a) VALUES ('x'), ('y')");
}

#[test]
fn insert_without_column_list() {
    let mut writer = SqlWriter::new();
    writer.insert_into("t").values([vec![1, 2, 3]]);
    assert_eq!(render(&writer), "INSERT INTO t VALUES (1, 2, 3)");
}

#[test]
fn insert_row_arity_is_checked() {
    let mut writer = SqlWriter::new();
    writer
        .insert_into_columns("t", ["a", "b"])
        .values([vec![1, 2], vec![3]]);
    assert!(matches!(
        writer.build(),
        Err(Error::ArityMismatch {
            row: 1,
            expected: 2,
            found: 1
        })
    ));
}

#[test]
fn insert_without_rows_fails() {
    let mut writer = SqlWriter::new();
    writer.insert_into_columns("t", ["a"]);
    assert!(matches!(
        writer.build(),
        Err(Error::MissingRequiredClause {
            kind: QueryKind::Insert,
            clause: "VALUES"
        })
    ));
}

#[test]
fn insert_after_select_does_not_leak() {
    let mut writer = SqlWriter::new();
    writer
        .select_fields(["leaked"])
        .from("leaked_table")
        .and_where("leaked", "=", 1)
        .limit(3);
    writer.insert_into_columns("t", ["a"]).values([vec![1]]);
    let sql = render(&writer);
    assert_eq!(sql, "INSERT INTO t(a) VALUES (1)");
    assert!(!sql.contains("leaked"));
}

#[test]
fn update_with_where() {
    let mut writer = SqlWriter::new();
    writer
        .update("users")
        .set("name", "Bob")
        .set_many([("age", 40), ("visits", 2)])
        .and_where("id", "=", 7);
    assert_eq!(
        render_stable(&writer),
        "UPDATE users SET name = 'Bob', age = 40, visits = 2 WHERE (id = 7)"
    );
}

#[test]
fn update_with_bind_values() {
    let mut writer = SqlWriter::new();
    writer
        .update("users")
        .set("name", bind(":name"))
        .and_where("id", "=", bind("id"));
    assert_eq!(
        render(&writer),
        "UPDATE users SET name = :name WHERE (id = :id)"
    );
}

#[test]
fn update_without_set_fails() {
    let mut writer = SqlWriter::new();
    writer.update("users").and_where("id", "=", 1);
    assert!(matches!(
        writer.build(),
        Err(Error::MissingRequiredClause {
            kind: QueryKind::Update,
            clause: "SET"
        })
    ));
}

#[test]
fn delete_with_where() {
    let mut writer = SqlWriter::new();
    writer
        .delete_from("sessions")
        .where_clause([("expired", "=", Parameter::Bool(true))])
        .and_where("user_id", "IN", bind("ids"));
    assert_eq!(
        render(&writer),
        "DELETE FROM sessions WHERE (expired = true) AND (user_id IN :ids)"
    );
}

#[test]
fn delete_without_where() {
    let mut writer = SqlWriter::new();
    writer.delete_from("sessions");
    assert_eq!(render(&writer), "DELETE FROM sessions");
}

#[test]
fn upsert_mysql() {
    let mut writer = writer_for(Dialect::MySql);
    writer
        .upsert("tbl_scheduleModification")
        .set("Value", true)
        .and_where("ModificationType", "=", 1);
    assert_eq!(
        render_stable(&writer),
        "INSERT INTO tbl_scheduleModification(ModificationType, Value) VALUES (1, true) \
         ON DUPLICATE KEY UPDATE Value = true"
    );
}

#[test]
fn upsert_several_keys_and_fields() {
    let mut writer = SqlWriter::new();
    writer
        .upsert("settings")
        .where_clause([("user_id", "=", 3), ("slot", "=", 1)])
        .set("name", "dark")
        .set("size", 12);
    assert_eq!(
        render(&writer),
        "INSERT INTO settings(user_id, slot, name, size) VALUES (3, 1, 'dark', 12) \
         ON DUPLICATE KEY UPDATE name = 'dark', size = 12"
    );
}

#[test]
fn upsert_rejected_outside_mysql() {
    for dialect in [Dialect::Microsoft, Dialect::PostgreSql, Dialect::Oracle] {
        let mut writer = writer_for(dialect);
        writer.upsert("t").set("a", 1).and_where("id", "=", 1);
        assert!(
            matches!(writer.build(), Err(Error::UnsupportedOperation(_))),
            "upsert should fail for {dialect}"
        );
    }
}

#[test]
fn upsert_without_set_fails() {
    let mut writer = SqlWriter::new();
    writer.upsert("t").and_where("id", "=", 1);
    assert!(matches!(
        writer.build(),
        Err(Error::MissingRequiredClause {
            kind: QueryKind::Upsert,
            ..
        })
    ));
}

#[test]
fn switching_dialect_after_failure_allows_retry() {
    let mut writer = writer_for(Dialect::PostgreSql);
    writer.upsert("t").set("a", 1).and_where("id", "=", 1);
    assert!(writer.build().is_err());
    writer.set_dialect(Dialect::MySql);
    assert_eq!(
        render(&writer),
        "INSERT INTO t(id, a) VALUES (1, 1) ON DUPLICATE KEY UPDATE a = 1"
    );
}

#[test]
fn upsert_invalid_operator_fails() {
    let mut writer = SqlWriter::new();
    writer.upsert("t").set("a", 1).and_where("id", "==", 1);
    assert!(matches!(
        writer.build(),
        Err(Error::InvalidOperator(ref op)) if op == "=="
    ));
}

#[test]
fn upsert_key_must_be_equality() {
    let mut writer = SqlWriter::new();
    writer.upsert("t").set("a", 1).and_where("id", "<", 5);
    assert!(matches!(
        writer.build(),
        Err(Error::UnsupportedOperation(ref message)) if message.contains("'<'")
    ));
}
