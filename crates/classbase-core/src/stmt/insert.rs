use super::{Name, Statement, Value, CATALOG_CLASS_NAME, CATALOG_SCHEMA, CATALOG_TABLE};
use crate::schema::Schema;
use crate::Result;

/// A single row `INSERT`.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: Name,
    pub columns: Vec<Name>,
    pub values: Vec<Value>,
}

impl Statement {
    /// Inserts the catalog row of `schema`.
    pub fn insert_catalog(schema: &Schema) -> Result<Self> {
        Ok(Insert {
            table: Name::from(CATALOG_TABLE),
            columns: vec![Name::from(CATALOG_CLASS_NAME), Name::from(CATALOG_SCHEMA)],
            values: vec![
                Value::from(schema.class_name.as_str()),
                Value::Json(schema.to_value()?),
            ],
        }
        .into())
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
