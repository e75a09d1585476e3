use super::FieldType;
use crate::{err, Result};

/// Relational storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Uuid,
    Boolean,
    Text,
    VarChar(u32),
    DoublePrecision,
    BigInt,
    TimestampTz,
    TextArray,
    Jsonb,
}

impl ColumnType {
    /// Maps a field type to the column storing it.
    ///
    /// Relation fields have no column of their own and return an error;
    /// callers materialize them as join tables instead.
    pub fn from_field_type(ty: FieldType) -> Result<ColumnType> {
        Ok(match ty {
            FieldType::Uuid => ColumnType::Uuid,
            FieldType::Boolean => ColumnType::Boolean,
            FieldType::String => ColumnType::Text,
            FieldType::Decimal => ColumnType::DoublePrecision,
            FieldType::Integer => ColumnType::BigInt,
            FieldType::Date => ColumnType::TimestampTz,
            FieldType::Array => ColumnType::TextArray,
            FieldType::Object => ColumnType::Jsonb,
            FieldType::Pointer => ColumnType::Uuid,
            FieldType::Relation => return Err(err!("no column type mapping for {ty}")),
        })
    }
}
