use super::{ColumnDef, Name, Statement, CATALOG_CLASS_NAME, CATALOG_SCHEMA, CATALOG_TABLE};
use crate::schema::{defaults, ClassName, ColumnType, FieldName, FieldType, Schema};
use crate::Result;

/// A statement to create a SQL table.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    /// Name of the table.
    pub name: Name,

    /// Column definitions.
    pub columns: Vec<ColumnDef>,

    /// Primary key columns.
    pub primary_key: Vec<Name>,

    /// Whether or not to add an `IF NOT EXISTS` clause.
    pub if_not_exists: bool,
}

impl Statement {
    /// Creates the catalog table if it does not exist yet.
    pub fn create_catalog_table() -> Self {
        CreateTable {
            name: Name::from(CATALOG_TABLE),
            columns: vec![
                ColumnDef::new(CATALOG_CLASS_NAME, ColumnType::VarChar(120)),
                ColumnDef::new(CATALOG_SCHEMA, ColumnType::Jsonb),
            ],
            primary_key: vec![Name::from(CATALOG_CLASS_NAME)],
            if_not_exists: true,
        }
        .into()
    }

    /// Creates the table storing the objects of a class.
    ///
    /// Every field except relations gets a column; the primary key is
    /// `objectId`.
    pub fn create_class_table(schema: &Schema) -> Result<Self> {
        let columns = schema
            .fields
            .iter()
            .filter(|(_, field)| field.ty != FieldType::Relation)
            .map(|(name, field)| ColumnDef::from_field(name, field))
            .collect::<Result<Vec<_>>>()?;

        Ok(CreateTable {
            name: Name::from(&schema.class_name),
            columns,
            primary_key: vec![Name::from(defaults::OBJECT_ID)],
            if_not_exists: true,
        }
        .into())
    }

    /// Creates the join table backing the relation `field` of `class`.
    pub fn create_join_table(class: &ClassName, field: &FieldName) -> Self {
        CreateTable {
            name: Name::from(&ClassName::join(field, class)),
            columns: vec![
                ColumnDef::new("relatedId", ColumnType::Uuid),
                ColumnDef::new("owningId", ColumnType::Uuid),
            ],
            primary_key: vec![Name::from("relatedId"), Name::from("owningId")],
            if_not_exists: true,
        }
        .into()
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Self::CreateTable(value)
    }
}
