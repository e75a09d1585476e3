use super::FieldName;
use crate::{Error, Result};

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Index {
    /// Indexed fields, in order. Never empty.
    pub columns: Vec<FieldName>,

    pub unique: bool,
}

impl Index {
    pub fn new(columns: Vec<FieldName>, unique: bool) -> Result<Index> {
        let index = Index { columns, unique };
        index.validate()?;
        Ok(index)
    }

    pub fn from_value(value: &Value) -> Result<Index> {
        let columns = match value.get("columns") {
            Some(Value::Array(columns)) => columns
                .iter()
                .map(|column| match column {
                    Value::String(name) => FieldName::new(name.as_str()),
                    other => Err(Error::invalid_json(format!(
                        "index column must be a string, got {other}"
                    ))),
                })
                .collect::<Result<Vec<_>>>()?,
            None | Some(Value::Null) => vec![],
            Some(other) => {
                return Err(Error::invalid_json(format!(
                    "index columns must be an array, got {other}"
                )))
            }
        };

        let unique = match value.get("unique") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(unique)) => *unique,
            Some(other) => {
                return Err(Error::invalid_json(format!(
                    "unique must be a boolean, got {other}"
                )))
            }
        };

        Index::new(columns, unique)
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(Error::invalid_json("index columns can not be empty"));
        }
        Ok(())
    }
}
