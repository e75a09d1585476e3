use super::{Error, ErrorKind};

/// A rollback that itself failed.
///
/// Attached as context on top of the error that caused the rollback, so the
/// original error stays the root cause.
#[derive(Debug)]
pub(super) struct TransactionRollback {
    cause: Error,
}

impl std::error::Error for TransactionRollback {}

impl core::fmt::Display for TransactionRollback {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "transaction rollback failed ({})", self.cause)
    }
}

impl Error {
    pub fn transaction_rollback(cause: Error) -> Error {
        Error::from(ErrorKind::TransactionRollback(TransactionRollback { cause }))
    }

    /// Returns `true` if a rollback failure was layered onto this error.
    pub fn is_transaction_rollback(&self) -> bool {
        self.chain()
            .any(|err| matches!(err.kind(), ErrorKind::TransactionRollback(_)))
    }
}
