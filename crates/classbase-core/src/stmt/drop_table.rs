use super::{Name, Statement};
use crate::schema::ClassName;

/// A statement to drop one or more SQL tables.
#[derive(Debug, Clone, PartialEq)]
pub struct DropTable {
    /// Names of the tables.
    pub names: Vec<Name>,

    /// Whether or not to add an `IF EXISTS` clause.
    pub if_exists: bool,
}

impl Statement {
    /// Drops tables if they exist, all in one statement.
    pub fn drop_tables_if_exists<'a>(classes: impl IntoIterator<Item = &'a ClassName>) -> Self {
        DropTable {
            names: classes.into_iter().map(Name::from).collect(),
            if_exists: true,
        }
        .into()
    }
}

impl From<DropTable> for Statement {
    fn from(value: DropTable) -> Self {
        Self::DropTable(value)
    }
}
