#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::Comma;

mod ident;

mod params;
pub use params::{Params, Placeholder};

// Fragment serializers
mod statement;
mod ty;

use classbase_core::{
    driver::{IsolationLevel, Transaction},
    stmt::Statement,
};

/// Serialize a statement to a PostgreSQL string
#[derive(Debug, Default)]
pub struct Serializer {}

struct Formatter<'a, T> {
    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl Serializer {
    pub fn postgresql() -> Self {
        Serializer {}
    }

    /// Serializes `stmt`, pushing its values to `params` and referring to
    /// them with `$n` placeholders.
    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            dst: &mut ret,
            params,
        };

        stmt.to_sql(&mut fmt);

        ret.push(';');
        ret
    }

    /// Serialize a transaction control operation to a SQL string.
    pub fn serialize_transaction(&self, op: &Transaction) -> String {
        match op {
            Transaction::Start { isolation } => self.serialize_transaction_start(*isolation),
            Transaction::Commit => "COMMIT".to_string(),
            Transaction::Rollback => "ROLLBACK".to_string(),
        }
    }

    fn serialize_transaction_start(&self, isolation: Option<IsolationLevel>) -> String {
        let mut sql = String::from("BEGIN");
        if let Some(level) = isolation {
            sql.push_str(" ISOLATION LEVEL ");
            sql.push_str(level.sql_name());
        }
        sql
    }
}
