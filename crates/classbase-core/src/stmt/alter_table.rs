use super::{ColumnDef, Name, Statement};
use crate::schema::{ClassName, Field, FieldName};
use crate::Result;

/// A statement to alter a SQL table.
#[derive(Debug, Clone, PartialEq)]
pub struct AlterTable {
    /// Name of the table.
    pub name: Name,

    /// The alteration to apply.
    pub action: AlterTableAction,
}

/// The action to perform in an ALTER TABLE statement.
#[derive(Debug, Clone, PartialEq)]
pub enum AlterTableAction {
    AddColumn {
        column: ColumnDef,
        if_not_exists: bool,
    },
    DropColumn {
        name: Name,
        if_exists: bool,
    },
}

impl Statement {
    /// Adds the column storing `field` unless it already exists.
    ///
    /// Fails for relation fields, which have no column.
    pub fn add_column(class: &ClassName, name: &FieldName, field: &Field) -> Result<Self> {
        Ok(AlterTable {
            name: Name::from(class),
            action: AlterTableAction::AddColumn {
                column: ColumnDef::from_field(name, field)?,
                if_not_exists: true,
            },
        }
        .into())
    }

    /// Drops a column if it exists.
    pub fn drop_column(class: &ClassName, name: &FieldName) -> Self {
        AlterTable {
            name: Name::from(class),
            action: AlterTableAction::DropColumn {
                name: Name::from(name),
                if_exists: true,
            },
        }
        .into()
    }
}

impl From<AlterTable> for Statement {
    fn from(value: AlterTable) -> Self {
        Self::AlterTable(value)
    }
}
