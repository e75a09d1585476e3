use super::{CreateIndex, Name, Statement};
use crate::schema::ClassName;

/// A statement to drop one or more SQL indexes.
#[derive(Debug, Clone, PartialEq)]
pub struct DropIndex {
    /// Names of the indexes.
    pub names: Vec<Name>,

    /// Whether or not to add an `IF EXISTS` clause.
    pub if_exists: bool,
}

impl Statement {
    /// Drops indexes declared on `class` if they exist.
    pub fn drop_indexes_if_exists<'a>(
        class: &ClassName,
        indexes: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        DropIndex {
            names: indexes
                .into_iter()
                .map(|index| CreateIndex::name_for(class, index))
                .collect(),
            if_exists: true,
        }
        .into()
    }
}

impl From<DropIndex> for Statement {
    fn from(value: DropIndex) -> Self {
        Self::DropIndex(value)
    }
}
