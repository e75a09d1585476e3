use super::{Formatter, Params, ToSql};

use classbase_core::schema::ColumnType;

impl ToSql for ColumnType {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        match self {
            ColumnType::Uuid => fmt!(f, "uuid"),
            ColumnType::Boolean => fmt!(f, "boolean"),
            ColumnType::Text => fmt!(f, "text"),
            ColumnType::VarChar(len) => fmt!(f, "varchar(", &len.to_string(), ")"),
            ColumnType::DoublePrecision => fmt!(f, "double precision"),
            ColumnType::BigInt => fmt!(f, "bigint"),
            ColumnType::TimestampTz => fmt!(f, "timestamp with time zone"),
            ColumnType::TextArray => fmt!(f, "text[]"),
            ColumnType::Jsonb => fmt!(f, "jsonb"),
        }
    }
}
