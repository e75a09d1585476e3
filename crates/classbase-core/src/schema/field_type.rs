use crate::{Error, Result};

use serde::{Serialize, Serializer};
use std::{fmt, str::FromStr};

/// The closed set of types a field can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Uuid,
    Boolean,
    String,
    Decimal,
    Integer,
    Date,
    Array,
    Object,

    /// Many-to-one reference to another class, stored as a uuid column.
    Pointer,

    /// Many-to-many reference to another class, stored in a join table.
    Relation,
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Uuid => "UUID",
            FieldType::Boolean => "Boolean",
            FieldType::String => "String",
            FieldType::Decimal => "Decimal",
            FieldType::Integer => "Integer",
            FieldType::Date => "Date",
            FieldType::Array => "Array",
            FieldType::Object => "Object",
            FieldType::Pointer => "Pointer",
            FieldType::Relation => "Relation",
        }
    }

    /// Returns `true` for types referencing another class.
    pub fn is_relational(self) -> bool {
        matches!(self, FieldType::Pointer | FieldType::Relation)
    }

    /// Checks that a runtime value matches this type.
    ///
    /// Only the scalar primitives are checked: booleans, strings, floating
    /// point numbers and integers. Any other value, or a value of a different
    /// kind, is rejected.
    pub fn validate_value(self, value: &serde_json::Value) -> Result<()> {
        use serde_json::Value;

        let actual = match value {
            Value::Bool(_) => Some(FieldType::Boolean),
            Value::String(_) => Some(FieldType::String),
            Value::Number(n) if n.is_f64() => Some(FieldType::Decimal),
            Value::Number(_) => Some(FieldType::Integer),
            _ => None,
        };

        if actual == Some(self) {
            Ok(())
        } else {
            Err(Error::incorrect_field_type(format!(
                "invalid field type of: {value}"
            )))
        }
    }
}

impl FromStr for FieldType {
    type Err = Error;

    fn from_str(s: &str) -> Result<FieldType> {
        Ok(match s {
            "UUID" => FieldType::Uuid,
            "Boolean" => FieldType::Boolean,
            "String" => FieldType::String,
            "Decimal" => FieldType::Decimal,
            "Integer" => FieldType::Integer,
            "Date" => FieldType::Date,
            "Array" => FieldType::Array,
            "Object" => FieldType::Object,
            "Pointer" => FieldType::Pointer,
            "Relation" => FieldType::Relation,
            _ => return Err(Error::incorrect_field_type(format!("invalid field type {s}"))),
        })
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
