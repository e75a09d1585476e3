use classbase::Code;
use classbase_core::driver::{Operation, Transaction};
use tests::{drops_table, MemoryTest};

const STUDENT: &str = r#"{
    "className": "Student",
    "fields": {
        "name": {"type": "String"},
        "friends": {"type": "Relation", "targetClass": "Student"}
    }
}"#;

#[tokio::test]
async fn delete_drops_class_and_join_tables() {
    let test = MemoryTest::new().await;
    test.db.create_from_json(STUDENT).await.unwrap();
    assert!(test.memory.has_table("_Join:friends:Student"));

    test.db.delete("Student").await.unwrap();

    assert!(!test.memory.has_table("Student"));
    assert!(!test.memory.has_table("_Join:friends:Student"));
    assert!(!test.db.exists("Student").await.unwrap());
    assert!(test.db.all().await.unwrap().is_empty());
}

#[tokio::test]
async fn failed_join_table_drop_rolls_back() {
    let test = MemoryTest::new().await;
    let created = test.db.create_from_json(STUDENT).await.unwrap();

    test.driver.clear_log();
    test.driver.fail_when(|op| drops_table(op, "_Join:"));

    let err = test.db.delete("Student").await.unwrap_err();
    assert!(err.is_driver(), "{err}");

    // the class table was dropped before the failure, then restored
    let ops = test.driver.ops_log();
    assert!(ops.iter().any(|op| drops_table(op, "Student")));
    assert!(matches!(
        ops.last(),
        Some(Operation::Transaction(Transaction::Rollback))
    ));

    assert!(test.memory.has_table("Student"));
    assert!(test.memory.has_table("_Join:friends:Student"));
    assert_eq!(test.db.find_by_class_name("Student").await.unwrap(), created);

    test.driver.stop_failing();
    test.db.delete("Student").await.unwrap();
    assert!(!test.memory.has_table("Student"));
}

#[tokio::test]
async fn delete_unknown_class() {
    let test = MemoryTest::new().await;

    let err = test.db.delete("Teacher").await.unwrap_err();
    assert_eq!(err.code(), Code::DataNotFound);
}
