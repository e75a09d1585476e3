use super::{ClassName, DefaultValue, FieldType};
use crate::{Error, Result};

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    #[serde(rename = "type")]
    pub ty: FieldType,

    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,

    /// Class referenced by pointer and relation fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_class: Option<ClassName>,
}

impl Field {
    pub fn new(ty: FieldType) -> Field {
        Field {
            ty,
            required: false,
            default_value: None,
            target_class: None,
        }
    }

    pub fn required(mut self) -> Field {
        self.required = true;
        self
    }

    pub fn target_class(mut self, class: ClassName) -> Field {
        self.target_class = Some(class);
        self
    }

    /// Parses and validates a field declaration.
    pub fn from_value(value: &Value) -> Result<Field> {
        let Value::Object(object) = value else {
            return Err(Error::invalid_json(format!(
                "field declaration must be an object, got {value}"
            )));
        };

        let ty = match object.get("type") {
            Some(Value::String(ty)) => ty.parse::<FieldType>()?,
            Some(other) => {
                return Err(Error::invalid_json(format!(
                    "field type must be a string, got {other}"
                )))
            }
            None => return Err(Error::invalid_json("field type is missing")),
        };

        let required = match object.get("required") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(required)) => *required,
            Some(other) => {
                return Err(Error::invalid_json(format!(
                    "required must be a boolean, got {other}"
                )))
            }
        };

        let default_value = match object.get("defaultValue") {
            None | Some(Value::Null) => None,
            Some(value) => Some(DefaultValue::from_value(value)?),
        };

        let target_class = match object.get("targetClass") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) if name.is_empty() => None,
            Some(Value::String(name)) => Some(ClassName::new(name.as_str())?),
            Some(other) => {
                return Err(Error::invalid_json(format!(
                    "targetClass must be a string, got {other}"
                )))
            }
        };

        let field = Field {
            ty,
            required,
            default_value,
            target_class,
        };
        field.validate()?;
        Ok(field)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ty.is_relational() && self.target_class.is_none() {
            return Err(Error::missing_required_field(format!(
                "field type {} needs a class name",
                self.ty
            )));
        }

        if let Some(default_value) = &self.default_value {
            if default_value.field_type() != Some(self.ty) {
                return Err(Error::incorrect_field_type(
                    "invalid field type and default value field type",
                ));
            }
        }

        if self.required && self.ty == FieldType::Relation {
            return Err(Error::incorrect_field_type(format!(
                "the 'required' option is not applicable for {}",
                FieldType::Relation
            )));
        }

        Ok(())
    }

    /// Returns `true` when `other` stores the same kind of data, i.e. the
    /// type and referenced class match.
    pub fn same_shape(&self, other: &Field) -> bool {
        self.ty == other.ty && self.target_class == other.target_class
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Code;
    use serde_json::json;

    #[test]
    fn parse_scalar() {
        let field = Field::from_value(&json!({"type": "String", "required": true})).unwrap();
        assert_eq!(field, Field::new(FieldType::String).required());
    }

    #[test]
    fn relation_needs_target_class() {
        for value in [
            json!({"type": "Relation"}),
            json!({"type": "Pointer", "targetClass": ""}),
        ] {
            let err = Field::from_value(&value).unwrap_err();
            assert_eq!(err.code(), Code::MissingRequiredField, "{value}");
        }

        let field = Field::from_value(&json!({"type": "Relation", "targetClass": "Student"})).unwrap();
        assert_eq!(field.target_class.unwrap(), "Student");
    }

    #[test]
    fn default_value_must_match() {
        let err = Field::from_value(&json!({
            "type": "String",
            "defaultValue": {"type": "Integer", "value": 1}
        }))
        .unwrap_err();
        assert!(err.is_incorrect_field_type());

        let err = Field::from_value(&json!({
            "type": "String",
            "defaultValue": {"value": "x"}
        }))
        .unwrap_err();
        assert!(err.is_incorrect_field_type());

        let field = Field::from_value(&json!({
            "type": "Integer",
            "defaultValue": {"type": "Integer", "value": 1}
        }))
        .unwrap();
        assert_eq!(field.default_value, Some(DefaultValue::Integer(1)));
    }

    #[test]
    fn required_relation() {
        let err = Field::from_value(&json!({
            "type": "Relation",
            "targetClass": "Student",
            "required": true
        }))
        .unwrap_err();
        assert!(err.is_incorrect_field_type());
    }

    #[test]
    fn invalid_target_class() {
        let err = Field::from_value(&json!({"type": "Pointer", "targetClass": "1x"})).unwrap_err();
        assert_eq!(err.code(), Code::InvalidClassName);
    }

    #[test]
    fn serialize() {
        let json = json!({"type": "Pointer", "required": false, "targetClass": "Student"});
        let field = Field::from_value(&json).unwrap();
        assert_eq!(serde_json::to_value(&field).unwrap(), json);
    }
}
