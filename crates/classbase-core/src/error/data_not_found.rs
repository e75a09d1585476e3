use super::{Error, ErrorKind};

/// Error when an operation targets a class the catalog does not know.
#[derive(Debug)]
pub(super) struct DataNotFound {
    context: Box<str>,
}

impl std::error::Error for DataNotFound {}

impl core::fmt::Display for DataNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "data not found: {}", self.context)
    }
}

impl Error {
    pub fn data_not_found(context: impl Into<String>) -> Error {
        Error::from(ErrorKind::DataNotFound(DataNotFound {
            context: context.into().into(),
        }))
    }

    pub fn is_data_not_found(&self) -> bool {
        self.code() == super::Code::DataNotFound
    }
}
