use super::{ClassName, Field, FieldName, FieldType, SYSTEM_CLASS_USER};

pub const OBJECT_ID: &str = "objectId";
pub const READ_PERMISSION: &str = "_rperm";
pub const WRITE_PERMISSION: &str = "_wperm";
pub const CREATED_AT: &str = "createdAt";
pub const UPDATED_AT: &str = "updatedAt";

const COLUMNS: &[(&str, FieldType)] = &[
    (OBJECT_ID, FieldType::Uuid),
    (READ_PERMISSION, FieldType::Array),
    (WRITE_PERMISSION, FieldType::Array),
    (CREATED_AT, FieldType::Date),
    (UPDATED_AT, FieldType::Date),
];

const USER_COLUMNS: &[(&str, FieldType)] = &[
    ("username", FieldType::String),
    ("password", FieldType::String),
    ("email", FieldType::String),
    ("emailVerified", FieldType::Boolean),
    ("authData", FieldType::Object),
];

/// Returns `true` if `name` is one of the columns present on every class.
pub fn is_default_column(name: &str) -> bool {
    COLUMNS.iter().any(|(column, _)| *column == name)
}

/// Returns `true` if `name` is a default column of `class`, including the
/// class specific ones.
pub fn is_default_column_of(class: &ClassName, name: &str) -> bool {
    is_default_column(name) || class_columns(class).iter().any(|(column, _)| *column == name)
}

/// Default columns of `class`, the common ones first.
pub fn columns(class: &ClassName) -> Vec<(FieldName, Field)> {
    let common = COLUMNS
        .iter()
        .map(|(name, ty)| (FieldName::from_static(*name), Field::new(*ty)));

    let specific = class_columns(class)
        .iter()
        .map(|(name, ty)| (FieldName::from_static(*name), Field::new(*ty).required()));

    common.chain(specific).collect()
}

fn class_columns(class: &ClassName) -> &'static [(&'static str, FieldType)] {
    match class.as_str() {
        SYSTEM_CLASS_USER => USER_COLUMNS,
        _ => &[],
    }
}
