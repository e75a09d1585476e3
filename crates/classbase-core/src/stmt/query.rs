use super::{Name, Statement, Value, CATALOG_CLASS_NAME, CATALOG_SCHEMA, CATALOG_TABLE};
use crate::schema::ClassName;

/// Equality filter on one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: Name,
    pub value: Value,
}

impl Filter {
    pub fn new(column: impl Into<Name>, value: impl Into<Value>) -> Filter {
        Filter {
            column: column.into(),
            value: value.into(),
        }
    }

    fn class_name(class: &ClassName) -> Filter {
        Filter::new(CATALOG_CLASS_NAME, class.as_str())
    }
}

/// A `SELECT` on a single table.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub table: Name,

    /// Returned columns, in order.
    pub columns: Vec<Name>,

    pub filter: Option<Filter>,

    /// Lock the selected rows until the end of the transaction.
    pub for_update: bool,
}

/// `SELECT EXISTS (...)` returning one boolean.
#[derive(Debug, Clone, PartialEq)]
pub struct Exists {
    pub table: Name,
    pub filter: Filter,
}

impl Statement {
    /// Selects every catalog row as `(className, schema)`.
    pub fn select_catalog() -> Self {
        Query {
            table: Name::from(CATALOG_TABLE),
            columns: catalog_columns(),
            filter: None,
            for_update: false,
        }
        .into()
    }

    /// Selects the catalog row of one class, optionally locking it.
    pub fn select_catalog_by_name(class: &ClassName, for_update: bool) -> Self {
        Query {
            table: Name::from(CATALOG_TABLE),
            columns: catalog_columns(),
            filter: Some(Filter::class_name(class)),
            for_update,
        }
        .into()
    }

    /// Checks whether the catalog has a row for `class`.
    pub fn class_exists(class: &ClassName) -> Self {
        Exists {
            table: Name::from(CATALOG_TABLE),
            filter: Filter::class_name(class),
        }
        .into()
    }
}

fn catalog_columns() -> Vec<Name> {
    vec![Name::from(CATALOG_CLASS_NAME), Name::from(CATALOG_SCHEMA)]
}

impl From<Query> for Statement {
    fn from(value: Query) -> Self {
        Self::Query(value)
    }
}

impl From<Exists> for Statement {
    fn from(value: Exists) -> Self {
        Self::Exists(value)
    }
}
