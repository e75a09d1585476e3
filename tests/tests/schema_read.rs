use classbase::Code;
use pretty_assertions::assert_eq;
use tests::MemoryTest;

#[tokio::test]
async fn find_unknown_class() {
    let test = MemoryTest::new().await;

    let err = test.db.find_by_class_name("Teacher").await.unwrap_err();
    assert_eq!(err.code(), Code::DataNotFound);
    assert_eq!(err.to_string(), "data not found: class Teacher not exists");
}

#[tokio::test]
async fn find_with_invalid_name() {
    let test = MemoryTest::new().await;

    let err = test.db.find_by_class_name("Teach er").await.unwrap_err();
    assert_eq!(err.code(), Code::InvalidClassName);
}

#[tokio::test]
async fn all_in_creation_order() {
    let test = MemoryTest::new().await;
    assert!(test.db.all().await.unwrap().is_empty());

    for class in ["Student", "Teacher", "School"] {
        test.db
            .create_from_json(&format!(r#"{{"className": "{class}"}}"#))
            .await
            .unwrap();
    }

    let all = test.db.all().await.unwrap();
    let names: Vec<_> = all.keys().map(|name| name.as_str()).collect();
    assert_eq!(names, ["Student", "Teacher", "School"]);

    assert!(test.db.exists("Teacher").await.unwrap());
    assert!(!test.db.exists("Course").await.unwrap());
}

#[tokio::test]
async fn reconnecting_keeps_the_catalog() {
    let test = MemoryTest::new().await;
    test.db
        .create_from_json(r#"{"className": "Student"}"#)
        .await
        .unwrap();

    // a second Db over the same backend bootstraps without touching it
    let db = classbase::Db::new(test.memory.clone(), classbase::Config::default())
        .await
        .unwrap();
    assert!(db.exists("Student").await.unwrap());
}
