use super::{Filter, Name, Statement, CATALOG_CLASS_NAME, CATALOG_TABLE};
use crate::schema::ClassName;

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub table: Name,
    pub filter: Filter,
}

impl Statement {
    /// Deletes the catalog row of `class`.
    pub fn delete_catalog(class: &ClassName) -> Self {
        Delete {
            table: Name::from(CATALOG_TABLE),
            filter: Filter::new(CATALOG_CLASS_NAME, class.as_str()),
        }
        .into()
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
