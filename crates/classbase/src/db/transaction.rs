use std::time::Duration;

use classbase_core::{
    driver::{IsolationLevel, Operation, Response, Transaction as TransactionOp},
    schema::ClassName,
    stmt::Statement,
    Connection, Driver, Error, Result, Schema,
};
use tokio::time::timeout;

/// An open migration transaction on a dedicated connection.
///
/// Dropping it without calling [`commit`](Self::commit) or
/// [`rollback`](Self::rollback) drops the connection, which discards the
/// transaction.
#[derive(Debug)]
pub struct Transaction {
    connection: Box<dyn Connection>,
}

impl Transaction {
    pub(crate) async fn begin(
        driver: &dyn Driver,
        isolation: Option<IsolationLevel>,
    ) -> Result<Transaction> {
        let mut connection = driver.connect().await?;
        connection
            .exec(TransactionOp::Start { isolation }.into())
            .await?;
        Ok(Transaction { connection })
    }

    pub async fn exec(&mut self, stmt: Statement) -> Result<Response> {
        self.connection.exec(Operation::Statement(stmt)).await
    }

    /// Reads and locks the catalog row of `class`.
    pub async fn find_for_update(&mut self, class: &ClassName) -> Result<Schema> {
        let rows = self
            .exec(Statement::select_catalog_by_name(class, true))
            .await?
            .rows
            .into_values()?;

        match rows.into_iter().next() {
            Some(row) => crate::repository::decode_catalog_row(row),
            None => Err(Error::data_not_found(format!("class {class} not exists"))),
        }
    }

    pub async fn commit(mut self) -> Result<()> {
        self.connection.exec(TransactionOp::Commit.into()).await?;
        Ok(())
    }

    pub async fn rollback(mut self) -> Result<()> {
        self.connection.exec(TransactionOp::Rollback.into()).await?;
        Ok(())
    }
}

/// Runs `fut` inside a transaction bounded by `duration`.
///
/// The transaction commits when `fut` succeeds. It is rolled back when `fut`
/// fails or runs out of time; a failed rollback is attached to the original
/// error as context.
pub(crate) async fn transaction_with_timeout<O>(
    driver: &dyn Driver,
    isolation: Option<IsolationLevel>,
    duration: Duration,
    fut: impl AsyncFnOnce(&mut Transaction) -> Result<O>,
) -> Result<O> {
    let mut tx = Transaction::begin(driver, isolation).await?;

    let res = match timeout(duration, fut(&mut tx)).await {
        Ok(res) => res,
        Err(_) => Err(Error::transaction_timed_out(duration)),
    };

    match res {
        Ok(value) => {
            tx.commit().await?;
            tracing::info!("migration committed");
            Ok(value)
        }
        Err(err) => {
            tracing::warn!(error = %err, "rolling back migration");

            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "migration rollback failed");
                return Err(err.context(Error::transaction_rollback(rollback_err)));
            }

            Err(err)
        }
    }
}
