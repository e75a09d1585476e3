use classbase_core::stmt;
use tokio_postgres::types::{private::BytesMut, to_sql_checked, IsNull, ToSql, Type};

/// Statement parameter. The parameter type is inferred by the server from
/// the statement, so every type is accepted here and the value is encoded
/// for whatever the server asked for.
#[derive(Debug)]
pub struct Value(stmt::Value);

impl From<stmt::Value> for Value {
    fn from(value: stmt::Value) -> Self {
        Self(value)
    }
}

impl ToSql for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> std::result::Result<IsNull, Box<dyn std::error::Error + Sync + Send>>
    where
        Self: Sized,
    {
        match &self.0 {
            stmt::Value::Null => None::<String>.to_sql(ty, out),
            stmt::Value::Bool(value) => value.to_sql(ty, out),
            stmt::Value::String(value) => value.to_sql(ty, out),
            stmt::Value::Json(value) => value.to_sql(ty, out),
        }
    }

    fn accepts(_: &Type) -> bool {
        true
    }

    to_sql_checked!();
}
