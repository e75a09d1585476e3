use super::{ClassName, FieldType};
use crate::{Error, Result};

use chrono::{DateTime, FixedOffset};
use serde::{ser::SerializeMap, Serialize, Serializer};
use serde_json::{Map, Value};

/// Default value of a field, tagged by the field type it applies to.
///
/// The JSON form is `{"type": <FieldType>, "value": <payload>}`, with an
/// extra `className` for pointers.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// No discriminant, or one without a default value representation.
    Unset,
    Boolean(bool),
    String(String),
    Decimal(f64),
    Integer(i64),
    Date(DateTime<FixedOffset>),
    Array(Vec<Value>),
    Object(Map<String, Value>),
    Pointer {
        target_class: ClassName,
        value: String,
    },
}

impl DefaultValue {
    /// The field type this value applies to, `None` when unset.
    pub fn field_type(&self) -> Option<FieldType> {
        Some(match self {
            DefaultValue::Unset => return None,
            DefaultValue::Boolean(_) => FieldType::Boolean,
            DefaultValue::String(_) => FieldType::String,
            DefaultValue::Decimal(_) => FieldType::Decimal,
            DefaultValue::Integer(_) => FieldType::Integer,
            DefaultValue::Date(_) => FieldType::Date,
            DefaultValue::Array(_) => FieldType::Array,
            DefaultValue::Object(_) => FieldType::Object,
            DefaultValue::Pointer { .. } => FieldType::Pointer,
        })
    }

    pub fn from_value(value: &Value) -> Result<DefaultValue> {
        let Value::Object(object) = value else {
            return Err(Error::invalid_json(format!(
                "default value must be an object, got {value}"
            )));
        };

        let ty = match object.get("type") {
            None | Some(Value::Null) => return Ok(DefaultValue::Unset),
            Some(Value::String(ty)) => ty.parse::<FieldType>()?,
            Some(other) => {
                return Err(Error::invalid_json(format!(
                    "default value type must be a string, got {other}"
                )))
            }
        };

        let payload = object.get("value").unwrap_or(&Value::Null);
        let mismatch = || Error::invalid_json(format!("invalid {ty} default value: {payload}"));

        Ok(match ty {
            FieldType::Boolean => DefaultValue::Boolean(payload.as_bool().ok_or_else(mismatch)?),
            FieldType::String => {
                DefaultValue::String(payload.as_str().ok_or_else(mismatch)?.to_string())
            }
            FieldType::Decimal => DefaultValue::Decimal(payload.as_f64().ok_or_else(mismatch)?),
            FieldType::Integer => DefaultValue::Integer(payload.as_i64().ok_or_else(mismatch)?),
            FieldType::Date => {
                let text = payload.as_str().ok_or_else(mismatch)?;
                DefaultValue::Date(DateTime::parse_from_rfc3339(text).map_err(|_| mismatch())?)
            }
            FieldType::Array => DefaultValue::Array(payload.as_array().ok_or_else(mismatch)?.clone()),
            FieldType::Object => {
                DefaultValue::Object(payload.as_object().ok_or_else(mismatch)?.clone())
            }
            FieldType::Pointer => {
                let target_class = match object.get("className") {
                    Some(Value::String(name)) => ClassName::new(name.as_str())?,
                    _ => {
                        return Err(Error::invalid_json(
                            "pointer default value requires a className",
                        ))
                    }
                };
                DefaultValue::Pointer {
                    target_class,
                    value: payload.as_str().ok_or_else(mismatch)?.to_string(),
                }
            }
            FieldType::Uuid | FieldType::Relation => DefaultValue::Unset,
        })
    }
}

impl Serialize for DefaultValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        let Some(ty) = self.field_type() else {
            return serializer.serialize_map(Some(0))?.end();
        };

        let len = if matches!(self, DefaultValue::Pointer { .. }) { 3 } else { 2 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("type", &ty)?;

        match self {
            DefaultValue::Unset => {}
            DefaultValue::Boolean(v) => map.serialize_entry("value", v)?,
            DefaultValue::String(v) => map.serialize_entry("value", v)?,
            DefaultValue::Decimal(v) => map.serialize_entry("value", v)?,
            DefaultValue::Integer(v) => map.serialize_entry("value", v)?,
            DefaultValue::Date(v) => map.serialize_entry("value", v)?,
            DefaultValue::Array(v) => map.serialize_entry("value", v)?,
            DefaultValue::Object(v) => map.serialize_entry("value", v)?,
            DefaultValue::Pointer {
                target_class,
                value,
            } => {
                map.serialize_entry("className", target_class)?;
                map.serialize_entry("value", value)?;
            }
        }

        map.end()
    }
}
