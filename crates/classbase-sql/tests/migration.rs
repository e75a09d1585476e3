use classbase_core::{
    schema::{ClassName, Field, FieldName, FieldType, Index},
    stmt::{Name, Statement as CoreStatement, Value},
};
use classbase_sql::{Params, Placeholder, Serializer, Statement};

struct NoParams;

impl Params for NoParams {
    fn push(&mut self, _: &Value) -> Placeholder {
        Placeholder(0)
    }
}

fn sql(stmt: &Statement) -> String {
    Serializer::postgresql().serialize(stmt, &mut NoParams)
}

fn student() -> ClassName {
    ClassName::new("Student").unwrap()
}

fn field_name(name: &str) -> FieldName {
    FieldName::new(name).unwrap()
}

#[test]
fn add_column() {
    let stmt = Statement::add_column(&student(), &field_name("age"), &Field::new(FieldType::Integer))
        .unwrap();

    assert_eq!(
        sql(&stmt),
        "ALTER TABLE \"Student\" ADD COLUMN IF NOT EXISTS \"age\" bigint;"
    );
}

#[test]
fn add_relation_column_fails() {
    let field = Field::new(FieldType::Relation).target_class(student());
    let err = Statement::add_column(&student(), &field_name("friends"), &field).unwrap_err();

    assert!(err.to_string().contains("no column type mapping"));
}

#[test]
fn drop_column() {
    assert_eq!(
        sql(&Statement::drop_column(&student(), &field_name("age"))),
        "ALTER TABLE \"Student\" DROP COLUMN IF EXISTS \"age\";"
    );
}

#[test]
fn create_index() {
    let index = Index::new(vec![field_name("name"), field_name("age")], false).unwrap();
    assert_eq!(
        sql(&Statement::create_index(&student(), "name_age", &index)),
        "CREATE INDEX IF NOT EXISTS \"Student:name_age\" ON \"Student\" (\"name\", \"age\");"
    );

    let index = Index::new(vec![field_name("name")], true).unwrap();
    assert_eq!(
        sql(&Statement::create_index(&student(), "name_unique", &index)),
        "CREATE UNIQUE INDEX IF NOT EXISTS \"Student:name_unique\" ON \"Student\" (\"name\");"
    );
}

#[test]
fn drop_indexes() {
    assert_eq!(
        sql(&Statement::drop_indexes_if_exists(&student(), ["a", "b"])),
        "DROP INDEX IF EXISTS \"Student:a\", \"Student:b\";"
    );
}

#[test]
fn quotes_are_doubled() {
    let stmt: CoreStatement = classbase_core::stmt::DropTable {
        names: vec![Name::from("we\"ird")],
        if_exists: false,
    }
    .into();

    assert_eq!(sql(&stmt), "DROP TABLE \"we\"\"ird\";");
}
