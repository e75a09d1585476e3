use super::{defaults, Field, FieldName, Index, Schema};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::fmt;

/// Structural changes between the stored definition of a class and the
/// desired one.
///
/// All sets are computed up front; a diff is never observed partially.
#[derive(Debug)]
pub struct SchemaDiff<'a> {
    existing: Option<&'a Schema>,
    desired: &'a Schema,

    pub fields_to_add: Vec<(&'a FieldName, &'a Field)>,
    pub fields_to_delete: Vec<(&'a FieldName, &'a Field)>,
    pub indexes_to_add: Vec<(&'a str, &'a Index)>,
    pub indexes_to_delete: Vec<(&'a str, &'a Index)>,

    /// Fields and indexes present on both sides with a different definition.
    pub conflicts: Vec<Conflict<'a>>,
}

#[derive(Debug, PartialEq)]
pub enum Conflict<'a> {
    Field {
        name: &'a FieldName,
        existing: &'a Field,
        desired: &'a Field,
    },
    Index {
        name: &'a str,
        existing: &'a Index,
        desired: &'a Index,
    },
}

impl<'a> SchemaDiff<'a> {
    /// Computes the diff. A missing `existing` schema diffs as empty, so
    /// everything in `desired` is an addition.
    pub fn new(existing: Option<&'a Schema>, desired: &'a Schema) -> SchemaDiff<'a> {
        let mut diff = SchemaDiff {
            existing,
            desired,
            fields_to_add: vec![],
            fields_to_delete: vec![],
            indexes_to_add: vec![],
            indexes_to_delete: vec![],
            conflicts: vec![],
        };

        if let Some(existing) = existing {
            for (name, field) in &existing.fields {
                match desired.fields.get(name) {
                    Some(to) if !field.same_shape(to) => diff.conflicts.push(Conflict::Field {
                        name,
                        existing: field,
                        desired: to,
                    }),
                    Some(_) => {}
                    None => diff.fields_to_delete.push((name, field)),
                }
            }

            for (name, index) in &existing.indexes {
                match desired.indexes.get(name) {
                    Some(to) if index != to => diff.conflicts.push(Conflict::Index {
                        name: name.as_str(),
                        existing: index,
                        desired: to,
                    }),
                    Some(_) => {}
                    None => diff.indexes_to_delete.push((name.as_str(), index)),
                }
            }
        }

        for (name, field) in &desired.fields {
            if !existing.is_some_and(|existing| existing.fields.contains_key(name)) {
                diff.fields_to_add.push((name, field));
            }
        }

        for (name, index) in &desired.indexes {
            if !existing.is_some_and(|existing| existing.indexes.contains_key(name)) {
                diff.indexes_to_add.push((name.as_str(), index));
            }
        }

        diff
    }

    pub fn is_empty(&self) -> bool {
        self.fields_to_add.is_empty()
            && self.fields_to_delete.is_empty()
            && self.indexes_to_add.is_empty()
            && self.indexes_to_delete.is_empty()
            && self.conflicts.is_empty()
    }

    /// Checks that the diff only adds absent fields and removes present
    /// ones.
    ///
    /// Redefining an existing field or index, or adding or removing one of
    /// the class's default columns, fails with a changed immutable field
    /// error.
    pub fn check_mutable(&self) -> Result<()> {
        if let Some(conflict) = self.conflicts.first() {
            return Err(Error::changed_immutable_field(conflict.to_string()));
        }

        let class = &self.desired.class_name;
        let touched = self
            .fields_to_add
            .iter()
            .chain(&self.fields_to_delete)
            .find(|(name, _)| defaults::is_default_column_of(class, name.as_str()));

        if let Some((name, _)) = touched {
            return Err(Error::changed_immutable_field(format!(
                "default field {name} of class {class} cannot be changed"
            )));
        }

        Ok(())
    }

    /// The schema resulting from applying this diff to the existing one.
    ///
    /// Fields and indexes kept from the existing schema keep their stored
    /// definition. Permissions are taken from the desired schema.
    pub fn merged(&self) -> Schema {
        let mut merged = Schema {
            class_name: self.desired.class_name.clone(),
            fields: IndexMap::new(),
            indexes: IndexMap::new(),
            class_level_permissions: self.desired.class_level_permissions.clone(),
        };

        if let Some(existing) = self.existing {
            for (name, field) in &existing.fields {
                if self.desired.fields.contains_key(name) {
                    merged.fields.insert(name.clone(), field.clone());
                }
            }

            for (name, index) in &existing.indexes {
                if self.desired.indexes.contains_key(name) {
                    merged.indexes.insert(name.clone(), index.clone());
                }
            }
        }

        for (name, field) in &self.fields_to_add {
            merged.fields.insert((*name).clone(), (*field).clone());
        }

        for (name, index) in &self.indexes_to_add {
            merged.indexes.insert(name.to_string(), (*index).clone());
        }

        merged
    }
}

impl fmt::Display for Conflict<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::Field {
                name,
                existing,
                desired,
            } => {
                write!(f, "field {name} is {}", existing.ty)?;
                if let Some(target) = &existing.target_class {
                    write!(f, "<{target}>")?;
                }
                write!(f, " and cannot be changed to {}", desired.ty)?;
                if let Some(target) = &desired.target_class {
                    write!(f, "<{target}>")?;
                }
                Ok(())
            }
            Conflict::Index { name, .. } => write!(f, "index {name} cannot be redefined"),
        }
    }
}
