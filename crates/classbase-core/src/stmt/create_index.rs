use super::{Name, Statement};
use crate::schema::{ClassName, Index};

#[derive(Debug, Clone, PartialEq)]
pub struct CreateIndex {
    /// Name of the index
    pub name: Name,

    /// Which table to index
    pub on: Name,

    /// The columns to index
    pub columns: Vec<Name>,

    /// When true, the index is unique
    pub unique: bool,

    /// Whether or not to add an `IF NOT EXISTS` clause.
    pub if_not_exists: bool,
}

impl CreateIndex {
    /// Database name of the index `index` declared on `class`.
    ///
    /// Index names are global to a database, so the declared name is
    /// qualified with the class.
    pub fn name_for(class: &ClassName, index: &str) -> Name {
        Name(format!("{class}:{index}"))
    }
}

impl Statement {
    pub fn create_index(class: &ClassName, name: &str, index: &Index) -> Self {
        CreateIndex {
            name: CreateIndex::name_for(class, name),
            on: Name::from(class),
            columns: index.columns.iter().map(Name::from).collect(),
            unique: index.unique,
            if_not_exists: true,
        }
        .into()
    }
}

impl From<CreateIndex> for Statement {
    fn from(value: CreateIndex) -> Self {
        Self::CreateIndex(value)
    }
}
