mod column_type;
pub use column_type::ColumnType;

pub mod defaults;

mod default_value;
pub use default_value::DefaultValue;

mod diff;
pub use diff::{Conflict, SchemaDiff};

mod field;
pub use field::Field;

mod field_type;
pub use field_type::FieldType;

mod index;
pub use index::Index;

mod name;
pub use name::{is_identifier, ClassName, FieldName, MAX_IDENTIFIER_LEN, SYSTEM_CLASS_USER};

mod operator;
pub use operator::Operator;

mod permissions;
pub use permissions::{ClassLevelPermissions, Permission};

use crate::{stmt, Error, Result};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Definition of a class: its fields, indexes and access permissions.
///
/// A `Schema` is always valid. It is obtained through [`Schema::from_value`]
/// or [`Schema::from_json`], which validate the declaration and merge the
/// default columns into `fields`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub class_name: ClassName,

    pub fields: IndexMap<FieldName, Field>,

    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub indexes: IndexMap<String, Index>,

    pub class_level_permissions: ClassLevelPermissions,
}

/// Catalog snapshot, one schema per class.
pub type Schemas = IndexMap<ClassName, Schema>;

impl Schema {
    /// Parses a declaration from JSON text.
    pub fn from_json(json: &str) -> Result<Schema> {
        let value: Value =
            serde_json::from_str(json).map_err(|err| Error::invalid_json(err.to_string()))?;
        Schema::from_value(&value)
    }

    /// Parses a declaration.
    ///
    /// Field entries carrying `{"__op": "delete"}` are dropped from the
    /// declaration. After validation the default columns are merged in,
    /// replacing any declared field of the same name.
    pub fn from_value(value: &Value) -> Result<Schema> {
        let Value::Object(object) = value else {
            return Err(Error::invalid_json(format!(
                "schema must be an object, got {value}"
            )));
        };

        let class_name = match object.get("className") {
            Some(Value::String(name)) => ClassName::new(name.as_str())?,
            Some(other) => {
                return Err(Error::invalid_json(format!(
                    "className must be a string, got {other}"
                )))
            }
            None => return Err(Error::invalid_json("className is missing")),
        };

        let mut fields = IndexMap::new();
        for (name, entry) in entries(object, "fields")? {
            let name = FieldName::new(name.as_str())?;

            match Operator::from_field_entry(entry)? {
                Some(Operator::Delete) => continue,
                None => {
                    fields.insert(name, Field::from_value(entry)?);
                }
            }
        }

        let mut indexes = IndexMap::new();
        for (name, entry) in entries(object, "indexes")? {
            if !is_identifier(name) {
                return Err(Error::invalid_json(format!("invalid index name: {name}")));
            }
            indexes.insert(name.clone(), Index::from_value(entry)?);
        }

        let class_level_permissions = match object.get("classLevelPermissions") {
            None | Some(Value::Null) => ClassLevelPermissions::public(),
            Some(value) => ClassLevelPermissions::from_value(value)?,
        };

        let mut schema = Schema {
            class_name,
            fields,
            indexes,
            class_level_permissions,
        };

        schema.validate_protected_fields()?;
        schema.add_default_columns();
        schema.validate_index_columns()?;
        schema.validate_derived_names()?;

        Ok(schema)
    }

    /// Serializes the schema into the catalog payload.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Fields materialized as join tables.
    pub fn relations(&self) -> impl Iterator<Item = (&FieldName, &Field)> {
        self.fields
            .iter()
            .filter(|(_, field)| field.ty == FieldType::Relation)
    }

    /// Names of the join tables backing this class's relations.
    pub fn join_tables(&self) -> Vec<ClassName> {
        self.relations()
            .map(|(name, _)| ClassName::join(name, &self.class_name))
            .collect()
    }

    fn validate_protected_fields(&self) -> Result<()> {
        for (key, protected) in &self.class_level_permissions.protected_fields {
            if let Some(field) = protected.iter().find(|field| !self.fields.contains_key(*field)) {
                return Err(Error::invalid_json(format!(
                    "field '{field}' in protectedFields:{key} does not exist"
                )));
            }
        }
        Ok(())
    }

    fn validate_index_columns(&self) -> Result<()> {
        for (name, index) in &self.indexes {
            if let Some(column) = index.columns.iter().find(|column| !self.fields.contains_key(*column)) {
                return Err(Error::invalid_json(format!(
                    "field {column} does not exist, cannot add index {name}"
                )));
            }
        }
        Ok(())
    }

    /// Join table and index names are built from the class name and must
    /// still fit in a PostgreSQL identifier.
    fn validate_derived_names(&self) -> Result<()> {
        for join in self.join_tables() {
            if join.as_str().len() > MAX_IDENTIFIER_LEN {
                return Err(Error::invalid_field_name(format!(
                    "join table name {join} exceeds {MAX_IDENTIFIER_LEN} bytes"
                )));
            }
        }

        for name in self.indexes.keys() {
            let index = stmt::CreateIndex::name_for(&self.class_name, name);
            if index.as_str().len() > MAX_IDENTIFIER_LEN {
                return Err(Error::invalid_json(format!(
                    "index name {index} exceeds {MAX_IDENTIFIER_LEN} bytes"
                )));
            }
        }
        Ok(())
    }

    fn add_default_columns(&mut self) {
        for (name, field) in defaults::columns(&self.class_name) {
            self.fields.insert(name, field);
        }
    }
}

fn entries<'a>(
    object: &'a serde_json::Map<String, Value>,
    key: &str,
) -> Result<impl Iterator<Item = (&'a String, &'a Value)>> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None.into_iter().flatten()),
        Some(Value::Object(entries)) => Ok(Some(entries.iter()).into_iter().flatten()),
        Some(other) => Err(Error::invalid_json(format!(
            "{key} must be an object, got {other}"
        ))),
    }
}
