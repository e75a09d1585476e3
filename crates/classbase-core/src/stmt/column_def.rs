use super::Name;
use crate::schema::{ColumnType, Field, FieldName};
use crate::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// Name of the column.
    pub name: Name,

    /// Storage type of the column.
    pub ty: ColumnType,
}

impl ColumnDef {
    pub fn new(name: impl Into<Name>, ty: ColumnType) -> ColumnDef {
        ColumnDef {
            name: name.into(),
            ty,
        }
    }

    /// Column storing `field`. Fails for relation fields.
    pub fn from_field(name: &FieldName, field: &Field) -> Result<ColumnDef> {
        Ok(ColumnDef::new(name, ColumnType::from_field_type(field.ty)?))
    }
}
