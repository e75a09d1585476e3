use crate::{Error, Result};

use std::fmt;

/// Operation requested on a field in an update payload, `{"__op": "delete"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Delete,
}

impl Operator {
    /// Key under which an operator appears in a field entry.
    pub const KEY: &'static str = "__op";

    pub fn parse(s: &str) -> Result<Operator> {
        match s {
            "delete" => Ok(Operator::Delete),
            _ => Err(Error::incorrect_operation(format!("invalid operator {s}"))),
        }
    }

    /// Extracts the operator from a field entry, if the entry carries one.
    pub fn from_field_entry(value: &serde_json::Value) -> Result<Option<Operator>> {
        match value.get(Operator::KEY) {
            None => Ok(None),
            Some(serde_json::Value::String(op)) => Operator::parse(op).map(Some),
            Some(other) => Err(Error::invalid_json(format!(
                "operator must be a string, got {other}"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Delete => "delete",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
