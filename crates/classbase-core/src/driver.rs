mod operation;
pub use operation::{IsolationLevel, Operation, Transaction};

mod response;
pub use response::{Response, Rows};

use crate::{async_trait, Result};

use std::fmt::Debug;

/// A database backend.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Opens a connection.
    ///
    /// Each migration runs on its own connection, which it owns exclusively
    /// until it is dropped.
    async fn connect(&self) -> Result<Box<dyn Connection>>;
}

/// A connection to a database backend.
///
/// Dropping a connection with an open transaction discards the transaction.
#[async_trait]
pub trait Connection: Debug + Send + 'static {
    /// Execute a database operation
    async fn exec(&mut self, op: Operation) -> Result<Response>;
}
