use super::{defaults, FieldName};
use crate::{Error, Result};

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static ROLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^role:.*").unwrap());

/// Grants for one operation, keyed by permission key.
pub type Permission = IndexMap<String, bool>;

/// Access rules for the objects of one class.
///
/// Permission keys are `*`, `role:<name>`, a user id (UUID), or
/// `requiresAuthentication` for operations and `authenticated` for
/// protected fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassLevelPermissions {
    pub get: Permission,
    pub find: Permission,
    pub count: Permission,
    pub create: Permission,
    pub update: Permission,
    pub delete: Permission,
    pub add_field: Permission,
    pub protected_fields: IndexMap<String, Vec<FieldName>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPermissions {
    #[serde(default)]
    get: Permission,
    #[serde(default)]
    find: Permission,
    #[serde(default)]
    count: Permission,
    #[serde(default)]
    create: Permission,
    #[serde(default)]
    update: Permission,
    #[serde(default)]
    delete: Permission,
    #[serde(default)]
    add_field: Permission,
    #[serde(default)]
    protected_fields: IndexMap<String, Vec<String>>,
}

impl ClassLevelPermissions {
    /// Permissions applied when a class declares none: every operation is
    /// open to everyone and no field is protected.
    pub fn public() -> ClassLevelPermissions {
        let public = || Permission::from([("*".to_string(), true)]);

        ClassLevelPermissions {
            get: public(),
            find: public(),
            count: public(),
            create: public(),
            update: public(),
            delete: public(),
            add_field: public(),
            protected_fields: IndexMap::from([("*".to_string(), vec![])]),
        }
    }

    pub fn from_value(value: &serde_json::Value) -> Result<ClassLevelPermissions> {
        let raw = RawPermissions::deserialize(value)
            .map_err(|err| Error::invalid_json(err.to_string()))?;

        let protected_fields = raw
            .protected_fields
            .into_iter()
            .map(|(key, fields)| {
                let fields = fields
                    .into_iter()
                    .map(FieldName::new)
                    .collect::<Result<Vec<_>>>()?;
                Ok((key, fields))
            })
            .collect::<Result<IndexMap<_, _>>>()?;

        let permissions = ClassLevelPermissions {
            get: raw.get,
            find: raw.find,
            count: raw.count,
            create: raw.create,
            update: raw.update,
            delete: raw.delete,
            add_field: raw.add_field,
            protected_fields,
        };
        permissions.validate()?;
        Ok(permissions)
    }

    pub fn validate(&self) -> Result<()> {
        self.validate_permissions()?;
        self.validate_protected_fields()
    }

    fn operations(&self) -> [&Permission; 7] {
        [
            &self.get,
            &self.find,
            &self.count,
            &self.create,
            &self.update,
            &self.delete,
            &self.add_field,
        ]
    }

    fn validate_permissions(&self) -> Result<()> {
        for key in self.operations().into_iter().flat_map(|op| op.keys()) {
            if !(is_common_key(key) || key == "requiresAuthentication") {
                return Err(invalid_key(key));
            }
        }
        Ok(())
    }

    fn validate_protected_fields(&self) -> Result<()> {
        for (key, fields) in &self.protected_fields {
            if !(is_common_key(key) || key == "authenticated") {
                return Err(invalid_key(key));
            }

            if let Some(field) = fields.iter().find(|field| defaults::is_default_column(field.as_str())) {
                return Err(Error::invalid_json(format!(
                    "default field {field} can not be protected"
                )));
            }
        }
        Ok(())
    }
}

impl Default for ClassLevelPermissions {
    fn default() -> Self {
        ClassLevelPermissions::public()
    }
}

fn is_common_key(key: &str) -> bool {
    key == "*" || ROLE.is_match(key) || uuid::Uuid::parse_str(key).is_ok()
}

fn invalid_key(key: &str) -> Error {
    Error::invalid_json(format!(
        "{key} is not a valid key for class level permissions"
    ))
}
