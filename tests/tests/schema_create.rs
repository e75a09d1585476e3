use classbase::{schema::FieldType, Code, Schema};
use classbase_core::schema::ColumnType;
use pretty_assertions::assert_eq;
use serde_json::json;
use tests::MemoryTest;

fn field_names(schema: &Schema) -> Vec<&str> {
    schema.fields.keys().map(|name| name.as_str()).collect()
}

#[tokio::test]
async fn create_student() {
    let test = MemoryTest::new().await;

    let schema = Schema::from_value(&json!({
        "className": "Student",
        "fields": {"name": {"type": "String"}}
    }))
    .unwrap();

    let stored = test.db.create(&schema).await.unwrap();
    assert_eq!(
        field_names(&stored),
        ["name", "objectId", "_rperm", "_wperm", "createdAt", "updatedAt"]
    );

    let all = test.db.all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all["Student"], stored);

    assert_eq!(
        test.columns("Student"),
        ["name", "objectId", "_rperm", "_wperm", "createdAt", "updatedAt"]
    );
    assert_eq!(
        test.memory.columns("Student").unwrap()[0],
        ("name".to_string(), ColumnType::Text)
    );
}

#[tokio::test]
async fn create_with_relations_and_indexes() {
    let test = MemoryTest::new().await;

    let stored = test
        .db
        .create_from_json(
            r#"{
                "className": "Student",
                "fields": {
                    "name": {"type": "String", "required": true},
                    "age": {"type": "Integer", "defaultValue": {"type": "Integer", "value": 18}},
                    "school": {"type": "Pointer", "targetClass": "School"},
                    "friends": {"type": "Relation", "targetClass": "Student"}
                },
                "indexes": {
                    "name_unique": {"columns": ["name"], "unique": true},
                    "by_creation": {"columns": ["createdAt"]}
                }
            }"#,
        )
        .await
        .unwrap();

    assert_eq!(stored.fields["friends"].ty, FieldType::Relation);
    assert_eq!(stored.indexes.len(), 2);

    // the relation has a join table, not a column
    assert!(test.memory.has_table("_Join:friends:Student"));
    assert!(!test.columns("Student").contains(&"friends".to_string()));
    assert_eq!(test.columns("_Join:friends:Student"), ["relatedId", "owningId"]);

    assert_eq!(
        test.memory.columns("Student").unwrap()[1],
        ("age".to_string(), ColumnType::BigInt)
    );

    assert!(test.memory.has_index("Student:name_unique"));
    assert!(test.memory.has_index("Student:by_creation"));
}

#[tokio::test]
async fn create_user_class() {
    let test = MemoryTest::new().await;

    let stored = test
        .db
        .create_from_json(r#"{"className": "_User"}"#)
        .await
        .unwrap();

    assert_eq!(stored.fields.len(), 10);
    assert!(stored.fields["username"].required);
    assert!(test.columns("_User").contains(&"authData".to_string()));
}

#[tokio::test]
async fn create_existing_class() {
    let test = MemoryTest::new().await;
    let json = r#"{"className": "Student", "fields": {"name": {"type": "String"}}}"#;

    test.db.create_from_json(json).await.unwrap();

    let err = test.db.create_from_json(json).await.unwrap_err();
    assert_eq!(err.code(), Code::DuplicateData);
    assert_eq!(err.to_string(), "duplicate data: class Student already exists");
}

#[tokio::test]
async fn invalid_payloads_never_reach_the_backend() {
    let test = MemoryTest::new().await;
    test.driver.clear_log();

    let cases = [
        (r#"{"className": "Stu dent"}"#, Code::InvalidClassName),
        (
            r#"{"className": "Student", "fields": {"1name": {"type": "String"}}}"#,
            Code::InvalidFieldName,
        ),
        (
            r#"{"className": "Student", "fields": {"school": {"type": "Pointer"}}}"#,
            Code::MissingRequiredField,
        ),
        (
            r#"{"className": "Student", "fields": {"age": {"type": "Number"}}}"#,
            Code::IncorrectFieldType,
        ),
        (
            r#"{"className": "Student", "indexes": {"by_age": {"columns": ["age"]}}}"#,
            Code::InvalidJson,
        ),
        (r#"{"className": "Student", "#, Code::InvalidJson),
    ];

    for (json, code) in cases {
        let err = test.db.create_from_json(json).await.unwrap_err();
        assert_eq!(err.code(), code, "{json}: {err}");
    }

    assert!(test.driver.ops_log().is_empty());
}
