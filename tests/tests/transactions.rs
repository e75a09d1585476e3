use classbase::{Code, Config, IsolationLevel};
use classbase_core::driver::{Operation, Transaction};
use std::time::Duration;
use tests::MemoryTest;

const STUDENT: &str = r#"{
    "className": "Student",
    "fields": {
        "name": {"type": "String"},
        "friends": {"type": "Relation", "targetClass": "Student"}
    },
    "indexes": {"by_name": {"columns": ["name"]}}
}"#;

fn is_insert(op: &Operation) -> bool {
    matches!(
        op,
        Operation::Statement(classbase_core::stmt::Statement::Insert(_))
    )
}

#[tokio::test]
async fn migrations_start_with_configured_isolation() {
    let test = MemoryTest::new().await;
    test.db.create_from_json(STUDENT).await.unwrap();

    let starts: Vec<_> = test
        .driver
        .ops_log()
        .into_iter()
        .filter_map(|op| match op {
            Operation::Transaction(Transaction::Start { isolation }) => Some(isolation),
            _ => None,
        })
        .collect();
    assert_eq!(starts, [Some(IsolationLevel::Serializable)]);

    let test = MemoryTest::with_config(Config::default().isolation(None)).await;
    test.db.create_from_json(STUDENT).await.unwrap();
    assert!(test
        .driver
        .ops_log()
        .iter()
        .any(|op| matches!(op, Operation::Transaction(Transaction::Start { isolation: None }))));
}

#[tokio::test]
async fn failed_create_leaves_nothing_behind() {
    let test = MemoryTest::new().await;
    test.driver.fail_when(is_insert);

    let err = test.db.create_from_json(STUDENT).await.unwrap_err();
    assert!(err.is_driver());

    assert!(!test.memory.has_table("Student"));
    assert!(!test.memory.has_table("_Join:friends:Student"));
    assert!(!test.memory.has_index("Student:by_name"));

    test.driver.stop_failing();
    assert!(!test.db.exists("Student").await.unwrap());
}

#[tokio::test]
async fn failed_rollback_is_reported_with_the_original_error() {
    let test = MemoryTest::new().await;
    test.driver.fail_when(|op| {
        is_insert(op) || matches!(op, Operation::Transaction(Transaction::Rollback))
    });

    let err = test.db.create_from_json(STUDENT).await.unwrap_err();

    assert!(err.is_transaction_rollback());
    assert_eq!(err.code(), Code::Internal);
    assert!(
        err.to_string()
            .starts_with("transaction rollback failed (injected failure): "),
        "{err}"
    );

    // dropping the connection discarded the transaction anyway
    assert!(!test.memory.has_table("Student"));
}

#[tokio::test]
async fn concurrent_updates_serialize() {
    let test = MemoryTest::new().await;
    test.db.create_from_json(STUDENT).await.unwrap();

    let add = |field: &str| {
        format!(
            r#"{{
                "className": "Student",
                "fields": {{
                    "name": {{"type": "String"}},
                    "friends": {{"type": "Relation", "targetClass": "Student"}},
                    "{field}": {{"type": "String"}}
                }},
                "indexes": {{"by_name": {{"columns": ["name"]}}}}
            }}"#
        )
    };

    let nickname = add("nickname");
    let email = add("email");
    let (a, b) = tokio::join!(
        test.db.update_from_json(&nickname),
        test.db.update_from_json(&email)
    );
    a.unwrap();
    b.unwrap();

    // the second migration read the catalog written by the first and
    // removed the field the first one added
    let stored = test.db.find_by_class_name("Student").await.unwrap();
    let added = ["nickname", "email"]
        .into_iter()
        .filter(|field| stored.fields.contains_key(*field))
        .count();
    assert_eq!(added, 1);
}

#[tokio::test]
async fn slow_migration_times_out() {
    let test = MemoryTest::with_config(
        Config::default().transaction_timeout(Duration::from_millis(50)),
    )
    .await;
    test.driver.stall_when(is_insert);

    let err = test.db.create_from_json(STUDENT).await.unwrap_err();
    assert!(err.is_transaction_timed_out(), "{err}");
    assert_eq!(err.to_string(), "transaction timed out after 50ms");

    assert!(matches!(
        test.driver.ops_log().last(),
        Some(Operation::Transaction(Transaction::Rollback))
    ));
    assert!(!test.memory.has_table("Student"));
}
