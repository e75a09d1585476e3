use super::{Filter, Name, Statement, Value, CATALOG_CLASS_NAME, CATALOG_SCHEMA, CATALOG_TABLE};
use crate::schema::Schema;
use crate::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: Name,
    pub assignments: Vec<(Name, Value)>,
    pub filter: Filter,
}

impl Statement {
    /// Rewrites the catalog row of `schema`.
    pub fn update_catalog(schema: &Schema) -> Result<Self> {
        Ok(Update {
            table: Name::from(CATALOG_TABLE),
            assignments: vec![(Name::from(CATALOG_SCHEMA), Value::Json(schema.to_value()?))],
            filter: Filter::new(CATALOG_CLASS_NAME, schema.class_name.as_str()),
        }
        .into())
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}
