//! Scenarios against a live PostgreSQL database named by
//! `CLASSBASE_DATABASE_URL`. Run with `--features postgresql`.
#![cfg(feature = "postgresql")]

use classbase::Code;
use pretty_assertions::assert_eq;
use tests::postgresql::setup;

const TABLES: &[&str] = &["PgStudent", "_Join:friends:PgStudent"];

#[tokio::test]
async fn create_update_delete() {
    let db = setup(TABLES).await;

    let stored = db
        .create_from_json(
            r#"{
                "className": "PgStudent",
                "fields": {
                    "name": {"type": "String"},
                    "friends": {"type": "Relation", "targetClass": "PgStudent"}
                },
                "indexes": {"by_name": {"columns": ["name"], "unique": true}}
            }"#,
        )
        .await
        .unwrap();
    assert_eq!(stored.fields.len(), 7);

    let err = db
        .update_from_json(r#"{"className": "PgStudent", "fields": {"name": {"type": "Integer"}}}"#)
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::ChangedImmutableField);

    let stored = db
        .update_from_json(
            r#"{
                "className": "PgStudent",
                "fields": {
                    "friends": {"type": "Relation", "targetClass": "PgStudent"},
                    "age": {"type": "Integer"}
                }
            }"#,
        )
        .await
        .unwrap();
    assert!(stored.fields.contains_key("age"));
    assert!(!stored.fields.contains_key("name"));
    assert!(stored.indexes.is_empty());

    db.delete("PgStudent").await.unwrap();

    let err = db.find_by_class_name("PgStudent").await.unwrap_err();
    assert_eq!(err.code(), Code::DataNotFound);
}
