use classbase::{schema::FieldType, Code};
use classbase_core::stmt::Statement;
use pretty_assertions::assert_eq;
use tests::MemoryTest;

const STUDENT: &str = r#"{
    "className": "Student",
    "fields": {
        "name": {"type": "String"},
        "age": {"type": "Integer"},
        "friends": {"type": "Relation", "targetClass": "Student"}
    },
    "indexes": {"by_name": {"columns": ["name"]}}
}"#;

async fn with_student() -> MemoryTest {
    let test = MemoryTest::new().await;
    test.db.create_from_json(STUDENT).await.unwrap();
    test
}

#[tokio::test]
async fn remove_field() {
    let test = with_student().await;

    let stored = test
        .db
        .update_from_json(
            r#"{
                "className": "Student",
                "fields": {
                    "age": {"type": "Integer"},
                    "friends": {"type": "Relation", "targetClass": "Student"}
                }
            }"#,
        )
        .await
        .unwrap();

    assert!(!stored.fields.contains_key("name"));
    assert!(!test.columns("Student").contains(&"name".to_string()));

    // the index went away with the column
    assert!(stored.indexes.is_empty());
    assert!(!test.memory.has_index("Student:by_name"));

    assert_eq!(test.db.find_by_class_name("Student").await.unwrap(), stored);
}

#[tokio::test]
async fn delete_operator_removes_field() {
    let test = with_student().await;

    let stored = test
        .db
        .update_from_json(
            r#"{
                "className": "Student",
                "fields": {
                    "name": {"type": "String"},
                    "age": {"__op": "delete"},
                    "friends": {"type": "Relation", "targetClass": "Student"}
                },
                "indexes": {"by_name": {"columns": ["name"]}}
            }"#,
        )
        .await
        .unwrap();

    assert!(!stored.fields.contains_key("age"));
    assert!(!test.columns("Student").contains(&"age".to_string()));
}

#[tokio::test]
async fn unknown_operator() {
    let test = with_student().await;

    let err = test
        .db
        .update_from_json(r#"{"className": "Student", "fields": {"age": {"__op": "increment"}}}"#)
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::IncorrectOperation);
}

#[tokio::test]
async fn add_fields_and_index() {
    let test = with_student().await;

    let stored = test
        .db
        .update_from_json(
            r#"{
                "className": "Student",
                "fields": {
                    "name": {"type": "String"},
                    "age": {"type": "Integer"},
                    "friends": {"type": "Relation", "targetClass": "Student"},
                    "teachers": {"type": "Relation", "targetClass": "Teacher"},
                    "nickname": {"type": "String"}
                },
                "indexes": {
                    "by_name": {"columns": ["name"]},
                    "by_nickname": {"columns": ["nickname"], "unique": true}
                }
            }"#,
        )
        .await
        .unwrap();

    assert_eq!(stored.fields["teachers"].ty, FieldType::Relation);
    assert!(test.memory.has_table("_Join:teachers:Student"));
    assert!(test.columns("Student").contains(&"nickname".to_string()));
    assert!(test.memory.has_index("Student:by_nickname"));

    // fields kept from the stored schema come first
    let names: Vec<_> = stored.fields.keys().map(|name| name.as_str()).collect();
    assert_eq!(names.last(), Some(&"nickname"));
}

#[tokio::test]
async fn remove_relation_drops_join_table() {
    let test = with_student().await;

    test.db
        .update_from_json(
            r#"{
                "className": "Student",
                "fields": {"name": {"type": "String"}, "age": {"type": "Integer"}},
                "indexes": {"by_name": {"columns": ["name"]}}
            }"#,
        )
        .await
        .unwrap();

    assert!(!test.memory.has_table("_Join:friends:Student"));
    assert!(test.memory.has_table("Student"));
}

#[tokio::test]
async fn changed_type_is_rejected() {
    let test = with_student().await;
    test.driver.clear_log();

    let err = test
        .db
        .update_from_json(
            r#"{
                "className": "Student",
                "fields": {
                    "name": {"type": "Integer"},
                    "age": {"type": "Integer"},
                    "friends": {"type": "Relation", "targetClass": "Student"}
                }
            }"#,
        )
        .await
        .unwrap_err();

    assert_eq!(err.code(), Code::ChangedImmutableField);
    assert!(err.to_string().contains("name"), "{err}");

    // nothing but reads reached the backend
    assert!(test
        .statements()
        .iter()
        .all(|stmt| matches!(stmt, Statement::Query(_) | Statement::Exists(_))));

    let stored = test.db.find_by_class_name("Student").await.unwrap();
    assert_eq!(stored.fields["name"].ty, FieldType::String);
}

#[tokio::test]
async fn changed_index_is_rejected() {
    let test = with_student().await;

    let err = test
        .db
        .update_from_json(
            r#"{
                "className": "Student",
                "fields": {
                    "name": {"type": "String"},
                    "age": {"type": "Integer"},
                    "friends": {"type": "Relation", "targetClass": "Student"}
                },
                "indexes": {"by_name": {"columns": ["name", "age"]}}
            }"#,
        )
        .await
        .unwrap_err();

    assert_eq!(err.code(), Code::ChangedImmutableField);
}

#[tokio::test]
async fn changed_required_flag_keeps_stored_definition() {
    let test = with_student().await;

    let stored = test
        .db
        .update_from_json(
            r#"{
                "className": "Student",
                "fields": {
                    "name": {"type": "String", "required": true},
                    "age": {"type": "Integer"},
                    "friends": {"type": "Relation", "targetClass": "Student"}
                },
                "indexes": {"by_name": {"columns": ["name"]}}
            }"#,
        )
        .await
        .unwrap();

    assert!(!stored.fields["name"].required);
}

#[tokio::test]
async fn permissions_follow_the_update() {
    let test = with_student().await;

    let stored = test
        .db
        .update_from_json(
            r#"{
                "className": "Student",
                "fields": {
                    "name": {"type": "String"},
                    "age": {"type": "Integer"},
                    "friends": {"type": "Relation", "targetClass": "Student"}
                },
                "indexes": {"by_name": {"columns": ["name"]}},
                "classLevelPermissions": {
                    "find": {"role:admin": true},
                    "protectedFields": {"*": ["age"]}
                }
            }"#,
        )
        .await
        .unwrap();

    let clp = &stored.class_level_permissions;
    assert_eq!(clp.find.get("role:admin"), Some(&true));
    assert_eq!(clp.find.get("*"), None);
    assert_eq!(clp.protected_fields["*"], ["age"]);
}

#[tokio::test]
async fn update_unknown_class() {
    let test = MemoryTest::new().await;

    let err = test
        .db
        .update_from_json(r#"{"className": "Teacher"}"#)
        .await
        .unwrap_err();

    assert_eq!(err.code(), Code::DataNotFound);
    assert!(err.to_string().contains("Teacher"));
}
