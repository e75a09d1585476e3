use super::{Error, ErrorKind};

/// Error when creating a class that already exists.
#[derive(Debug)]
pub(super) struct DuplicateData {
    context: Box<str>,
}

impl std::error::Error for DuplicateData {}

impl core::fmt::Display for DuplicateData {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "duplicate data: {}", self.context)
    }
}

impl Error {
    pub fn duplicate_data(context: impl Into<String>) -> Error {
        Error::from(ErrorKind::DuplicateData(DuplicateData {
            context: context.into().into(),
        }))
    }

    pub fn is_duplicate_data(&self) -> bool {
        self.code() == super::Code::DuplicateData
    }
}
