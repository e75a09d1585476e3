use super::{Code, Error, ErrorKind};

/// Error raised while validating a caller supplied declaration.
///
/// Validation stops at the first violation, so an entity is either fully
/// valid or rejected with exactly one of these.
#[derive(Debug)]
pub(super) struct InvalidInput {
    kind: InvalidInputKind,
    message: Box<str>,
}

#[derive(Debug, Clone, Copy)]
pub(super) enum InvalidInputKind {
    /// Malformed payload, or a structural rule of the schema was violated.
    Json,
    ClassName,
    FieldName,
    /// A relational field lacks its target class.
    MissingRequiredField,
    /// Type/value mismatch, default value of the wrong type, or `required`
    /// on a relation.
    FieldType,
    /// Unknown `__op` token.
    Operation,
}

impl InvalidInput {
    pub(super) fn code(&self) -> Code {
        match self.kind {
            InvalidInputKind::Json => Code::InvalidJson,
            InvalidInputKind::ClassName => Code::InvalidClassName,
            InvalidInputKind::FieldName => Code::InvalidFieldName,
            InvalidInputKind::MissingRequiredField => Code::MissingRequiredField,
            InvalidInputKind::FieldType => Code::IncorrectFieldType,
            InvalidInputKind::Operation => Code::IncorrectOperation,
        }
    }
}

impl std::error::Error for InvalidInput {}

impl core::fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let prefix = match self.kind {
            InvalidInputKind::Json => "invalid JSON",
            InvalidInputKind::ClassName => "invalid class name",
            InvalidInputKind::FieldName => "invalid field name",
            InvalidInputKind::MissingRequiredField => "missing required field",
            InvalidInputKind::FieldType => "incorrect field type",
            InvalidInputKind::Operation => "incorrect operation",
        };
        write!(f, "{prefix}: {}", self.message)
    }
}

fn invalid_input(kind: InvalidInputKind, message: impl Into<String>) -> Error {
    Error::from(ErrorKind::InvalidInput(InvalidInput {
        kind,
        message: message.into().into(),
    }))
}

impl Error {
    /// Creates an invalid JSON error.
    ///
    /// Besides malformed payloads this covers structural schema rules: index
    /// columns and protected fields referencing unknown fields, empty index
    /// column lists, and invalid permission keys.
    pub fn invalid_json(message: impl Into<String>) -> Error {
        invalid_input(InvalidInputKind::Json, message)
    }

    pub fn invalid_class_name(message: impl Into<String>) -> Error {
        invalid_input(InvalidInputKind::ClassName, message)
    }

    pub fn invalid_field_name(message: impl Into<String>) -> Error {
        invalid_input(InvalidInputKind::FieldName, message)
    }

    pub fn missing_required_field(message: impl Into<String>) -> Error {
        invalid_input(InvalidInputKind::MissingRequiredField, message)
    }

    pub fn incorrect_field_type(message: impl Into<String>) -> Error {
        invalid_input(InvalidInputKind::FieldType, message)
    }

    pub fn incorrect_operation(message: impl Into<String>) -> Error {
        invalid_input(InvalidInputKind::Operation, message)
    }

    /// Returns `true` if this error was raised while validating input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidInput(_))
    }

    pub fn is_invalid_json(&self) -> bool {
        self.code() == Code::InvalidJson
    }

    pub fn is_missing_required_field(&self) -> bool {
        self.code() == Code::MissingRequiredField
    }

    pub fn is_incorrect_field_type(&self) -> bool {
        self.code() == Code::IncorrectFieldType
    }
}
