//! In-process backend interpreting classbase statements.
//!
//! Tables, columns and indexes are tracked structurally; rows are kept so
//! the catalog behaves like a real table. Transactions stage a copy of the
//! store and publish it on commit. Transactions are serialized: a
//! connection holds the store's transaction lock from `BEGIN` until commit,
//! rollback or drop.

mod store;
use store::Store;

use classbase_core::{
    async_trait,
    driver::{Connection as _, Operation, Response, Transaction},
    err,
    schema::ColumnType,
    Driver, Result,
};
use std::sync::{Arc, Mutex};
use tokio::sync::OwnedMutexGuard;

#[derive(Debug, Clone, Default)]
pub struct Memory {
    shared: Arc<Shared>,
}

#[derive(Debug, Default)]
struct Shared {
    store: Mutex<Store>,

    /// Held for the duration of a transaction.
    tx_lock: Arc<tokio::sync::Mutex<()>>,
}

impl Memory {
    pub fn new() -> Memory {
        Memory::default()
    }

    /// Names of the existing tables, in creation order.
    pub fn tables(&self) -> Vec<String> {
        self.with_store(|store| store.tables.keys().cloned().collect())
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.with_store(|store| store.tables.contains_key(name))
    }

    /// Columns of `table` with their types, `None` if the table does not
    /// exist.
    pub fn columns(&self, table: &str) -> Option<Vec<(String, ColumnType)>> {
        self.with_store(|store| {
            store.tables.get(table).map(|table| {
                table
                    .columns
                    .iter()
                    .map(|(name, ty)| (name.clone(), *ty))
                    .collect()
            })
        })
    }

    /// Names of the existing indexes.
    pub fn indexes(&self) -> Vec<String> {
        self.with_store(|store| store.indexes.keys().cloned().collect())
    }

    pub fn has_index(&self, name: &str) -> bool {
        self.with_store(|store| store.indexes.contains_key(name))
    }

    fn with_store<R>(&self, f: impl FnOnce(&Store) -> R) -> R {
        let store = self
            .shared
            .store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&store)
    }
}

#[async_trait]
impl Driver for Memory {
    async fn connect(&self) -> Result<Box<dyn classbase_core::Connection>> {
        Ok(Box::new(Connection {
            shared: self.shared.clone(),
            tx: None,
        }))
    }
}

#[derive(Debug)]
pub struct Connection {
    shared: Arc<Shared>,

    /// Open transaction, if any. Dropping it discards the staged changes.
    tx: Option<Tx>,
}

#[derive(Debug)]
struct Tx {
    staged: Store,
    _guard: OwnedMutexGuard<()>,
}

impl Connection {
    fn lock_store(&self) -> std::sync::MutexGuard<'_, Store> {
        self.shared
            .store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn transaction(&mut self, op: Transaction) -> Result<Response> {
        match op {
            Transaction::Start { .. } => {
                if self.tx.is_some() {
                    return Err(err!("there is already a transaction in progress"));
                }

                let guard = self.shared.tx_lock.clone().lock_owned().await;
                let staged = self.lock_store().clone();
                self.tx = Some(Tx {
                    staged,
                    _guard: guard,
                });
            }
            Transaction::Commit => {
                let tx = self
                    .tx
                    .take()
                    .ok_or_else(|| err!("there is no transaction in progress"))?;
                *self.lock_store() = tx.staged;
            }
            Transaction::Rollback => {
                if self.tx.take().is_none() {
                    return Err(err!("there is no transaction in progress"));
                }
            }
        }

        Ok(Response::empty())
    }
}

#[async_trait]
impl classbase_core::Connection for Connection {
    async fn exec(&mut self, op: Operation) -> Result<Response> {
        let stmt = match op {
            Operation::Transaction(op) => return self.transaction(op).await,
            Operation::Statement(stmt) => stmt,
        };

        tracing::debug!(?stmt, in_transaction = self.tx.is_some(), "memory exec");

        if let Some(tx) = &mut self.tx {
            return tx.staged.apply(&stmt);
        }

        // Autocommit statements wait for running transactions.
        let _guard = self.shared.tx_lock.lock().await;
        let mut store = self.lock_store();
        let mut staged = store.clone();
        let response = staged.apply(&stmt)?;
        *store = staged;
        Ok(response)
    }
}
