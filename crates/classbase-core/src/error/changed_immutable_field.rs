use super::{Error, ErrorKind};

/// Error when an update tries to redefine an existing field or index.
#[derive(Debug)]
pub(super) struct ChangedImmutableField {
    message: Box<str>,
}

impl std::error::Error for ChangedImmutableField {}

impl core::fmt::Display for ChangedImmutableField {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "changed immutable field: {}", self.message)
    }
}

impl Error {
    pub fn changed_immutable_field(message: impl Into<String>) -> Error {
        Error::from(ErrorKind::ChangedImmutableField(ChangedImmutableField {
            message: message.into().into(),
        }))
    }

    pub fn is_changed_immutable_field(&self) -> bool {
        self.code() == super::Code::ChangedImmutableField
    }
}
