use crate::{
    db::{transaction_with_timeout, Transaction},
    Config,
};

use classbase_core::{
    driver::IsolationLevel,
    err,
    schema::{ClassName, FieldType, SchemaDiff, Schemas},
    stmt::{Statement, Value, ValueRecord},
    Driver, Error, Result, Schema,
};
use std::{sync::Arc, time::Duration};

/// Migration orchestrator: applies class schemas to the backend and keeps
/// the catalog in step with the tables.
///
/// Every migration runs in one transaction on a dedicated connection.
#[derive(Debug, Clone)]
pub struct Repository {
    driver: Arc<dyn Driver>,
    isolation: Option<IsolationLevel>,
    transaction_timeout: Duration,
}

impl Repository {
    pub fn new(driver: Arc<dyn Driver>, config: &Config) -> Repository {
        Repository {
            driver,
            isolation: config.isolation,
            transaction_timeout: config.transaction_timeout,
        }
    }

    /// Creates the catalog table if it does not exist yet.
    pub async fn ensure_catalog(&self) -> Result<()> {
        let mut connection = self.driver.connect().await?;
        connection
            .exec(Statement::create_catalog_table().into())
            .await?;
        Ok(())
    }

    /// All stored schemas, keyed by class name.
    pub async fn all(&self) -> Result<Schemas> {
        let rows = self.query(Statement::select_catalog()).await?;

        let mut schemas = Schemas::new();
        for row in rows {
            let schema = decode_catalog_row(row)?;
            schemas.insert(schema.class_name.clone(), schema);
        }
        Ok(schemas)
    }

    pub async fn find_by_class_name(&self, class: &ClassName) -> Result<Schema> {
        let rows = self
            .query(Statement::select_catalog_by_name(class, false))
            .await?;

        match rows.into_iter().next() {
            Some(row) => decode_catalog_row(row),
            None => Err(Error::data_not_found(format!("class {class} not exists"))),
        }
    }

    pub async fn exists(&self, class: &ClassName) -> Result<bool> {
        let rows = self.query(Statement::class_exists(class)).await?;

        match rows.first().and_then(|row| row.fields.first()) {
            Some(Value::Bool(exists)) => Ok(*exists),
            other => Err(err!("unexpected result of an existence check: {other:?}")),
        }
    }

    /// Creates the class table, its join tables and indexes, and records
    /// the schema in the catalog.
    pub async fn create(&self, schema: &Schema) -> Result<()> {
        let class = &schema.class_name;

        self.transaction(async |tx| {
            tx.exec(Statement::create_catalog_table()).await?;
            tx.exec(Statement::create_class_table(schema)?).await?;

            for (name, _) in schema.relations() {
                tx.exec(Statement::create_join_table(class, name)).await?;
            }

            for (name, index) in &schema.indexes {
                tx.exec(Statement::create_index(class, name, index)).await?;
            }

            tx.exec(Statement::insert_catalog(schema)?).await?;
            Ok(())
        })
        .await?;

        tracing::info!(class = %class, "class created");
        Ok(())
    }

    /// Migrates the stored schema of the class towards `desired` and
    /// returns the schema now stored.
    ///
    /// Only additions of absent fields and indexes and removals of present
    /// ones are applied. Redefining an existing field or index fails with a
    /// changed immutable field error and leaves the class untouched.
    pub async fn update(&self, desired: &Schema) -> Result<Schema> {
        let class = &desired.class_name;

        // Reject redefinitions before taking any lock
        let existing = self.find_by_class_name(class).await?;
        SchemaDiff::new(Some(&existing), desired).check_mutable()?;

        let merged = self
            .transaction(async |tx| {
                let existing = tx.find_for_update(class).await?;
                let diff = SchemaDiff::new(Some(&existing), desired);
                diff.check_mutable()?;

                tracing::debug!(
                    class = %class,
                    fields_to_add = diff.fields_to_add.len(),
                    fields_to_delete = diff.fields_to_delete.len(),
                    indexes_to_add = diff.indexes_to_add.len(),
                    indexes_to_delete = diff.indexes_to_delete.len(),
                    "schema diff"
                );

                for (name, field) in &diff.fields_to_delete {
                    let stmt = if field.ty == FieldType::Relation {
                        Statement::drop_tables_if_exists([&ClassName::join(name, class)])
                    } else {
                        Statement::drop_column(class, name)
                    };
                    tx.exec(stmt).await?;
                }

                for (name, field) in &diff.fields_to_add {
                    let stmt = if field.ty == FieldType::Relation {
                        Statement::create_join_table(class, name)
                    } else {
                        Statement::add_column(class, name, field)?
                    };
                    tx.exec(stmt).await?;
                }

                if !diff.indexes_to_delete.is_empty() {
                    let names = diff.indexes_to_delete.iter().map(|(name, _)| *name);
                    tx.exec(Statement::drop_indexes_if_exists(class, names))
                        .await?;
                }

                for (name, index) in &diff.indexes_to_add {
                    tx.exec(Statement::create_index(class, name, index)).await?;
                }

                let merged = diff.merged();
                tx.exec(Statement::update_catalog(&merged)?).await?;
                Ok(merged)
            })
            .await?;

        tracing::info!(class = %class, "class updated");
        Ok(merged)
    }

    /// Drops the class table and its join tables, and removes the class
    /// from the catalog.
    pub async fn delete(&self, class: &ClassName) -> Result<()> {
        self.transaction(async |tx| {
            let existing = tx.find_for_update(class).await?;

            tx.exec(Statement::drop_tables_if_exists([class])).await?;

            for join in existing.join_tables() {
                tx.exec(Statement::drop_tables_if_exists([&join])).await?;
            }

            tx.exec(Statement::delete_catalog(class)).await?;
            Ok(())
        })
        .await?;

        tracing::info!(class = %class, "class deleted");
        Ok(())
    }

    async fn transaction<O>(
        &self,
        fut: impl AsyncFnOnce(&mut Transaction) -> Result<O>,
    ) -> Result<O> {
        transaction_with_timeout(
            self.driver.as_ref(),
            self.isolation,
            self.transaction_timeout,
            fut,
        )
        .await
    }

    /// Runs a read outside of any transaction.
    async fn query(&self, stmt: Statement) -> Result<Vec<ValueRecord>> {
        let mut connection = self.driver.connect().await?;
        connection.exec(stmt.into()).await?.rows.into_values()
    }
}

/// Decodes a `(className, schema)` catalog row.
pub(crate) fn decode_catalog_row(row: ValueRecord) -> Result<Schema> {
    let mut fields = row.into_iter();

    let (Some(Value::String(class)), Some(Value::Json(json))) = (fields.next(), fields.next())
    else {
        return Err(err!("malformed catalog row"));
    };

    Schema::from_value(&json).map_err(|e| e.context(err!("stored schema of class {class}")))
}
