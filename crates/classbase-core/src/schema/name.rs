use super::defaults;
use crate::{Error, Result};

use regex::Regex;
use serde::{Serialize, Serializer};
use std::{borrow::Borrow, fmt, sync::LazyLock};

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").unwrap());

static JOIN_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^_Join:[A-Za-z0-9_]+:[A-Za-z0-9_]+$").unwrap());

/// Longest identifier PostgreSQL keeps without truncating, in bytes.
pub const MAX_IDENTIFIER_LEN: usize = 63;

/// Name of the built-in user class.
pub const SYSTEM_CLASS_USER: &str = "_User";

const SYSTEM_CLASSES: &[&str] = &[SYSTEM_CLASS_USER];

/// Returns `true` if `name` is a plain identifier: a letter followed by
/// letters, digits and underscores.
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// A validated field name.
///
/// Field names are interpolated into generated SQL as quoted identifiers,
/// so a `FieldName` can only be obtained through validation. Besides plain
/// identifiers, the default columns (`_rperm`, `_wperm`) are accepted so
/// stored catalog payloads parse again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldName(String);

impl FieldName {
    pub fn new(name: impl Into<String>) -> Result<FieldName> {
        let name = name.into();
        let valid = is_identifier(&name) || defaults::is_default_column(&name);

        if !valid || name.len() > MAX_IDENTIFIER_LEN {
            return Err(Error::invalid_field_name(format!(
                "invalid field name: {name}"
            )));
        }
        Ok(FieldName(name))
    }

    /// Builds one of the default column names.
    pub(crate) fn from_static(name: &'static str) -> FieldName {
        FieldName(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A validated class name.
///
/// Either a plain identifier, a join class name `_Join:<field>:<class>`, or
/// one of the system classes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName(String);

impl ClassName {
    pub fn new(name: impl Into<String>) -> Result<ClassName> {
        let name = name.into();
        let valid = SYSTEM_CLASSES.contains(&name.as_str())
            || JOIN_CLASS.is_match(&name)
            || is_identifier(&name);

        if !valid || name.len() > MAX_IDENTIFIER_LEN {
            return Err(Error::invalid_class_name(format!(
                "invalid class name: {name}"
            )));
        }
        Ok(ClassName(name))
    }

    /// Name of the join table backing the relation `field` declared on
    /// `owner`.
    ///
    /// The result may exceed [`MAX_IDENTIFIER_LEN`]; `Schema` parsing
    /// rejects relations whose join name is too long.
    pub fn join(field: &FieldName, owner: &ClassName) -> ClassName {
        ClassName(format!("_Join:{}:{}", field, owner))
    }

    pub fn is_system(&self) -> bool {
        SYSTEM_CLASSES.contains(&self.0.as_str())
    }

    pub fn is_join(&self) -> bool {
        JOIN_CLASS.is_match(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! impl_name {
    ($ty:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $ty {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $ty {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $ty {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl TryFrom<&str> for $ty {
            type Error = Error;

            fn try_from(value: &str) -> Result<Self> {
                $ty::new(value)
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }
    };
}

impl_name!(FieldName);
impl_name!(ClassName);
