mod builder;
pub use builder::Builder;

mod transaction;
pub(crate) use transaction::transaction_with_timeout;
pub use transaction::Transaction;

use crate::{Config, Repository, SchemaService};

use classbase_core::{
    schema::{ClassName, Schemas},
    Driver, Result, Schema,
};
use std::sync::Arc;

/// Entry point: owns the driver and exposes the schema operations.
///
/// Class names are accepted as strings and validated before anything is
/// sent to the backend.
#[derive(Debug, Clone)]
pub struct Db {
    service: SchemaService,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Assembles a `Db` over `driver` and makes sure the catalog table
    /// exists.
    pub async fn new(driver: impl Driver, config: Config) -> Result<Db> {
        Db::from_driver(Arc::new(driver), config).await
    }

    pub async fn from_driver(driver: Arc<dyn Driver>, config: Config) -> Result<Db> {
        let repository = Repository::new(driver, &config);
        repository.ensure_catalog().await?;

        Ok(Db {
            service: SchemaService::new(repository),
        })
    }

    pub fn service(&self) -> &SchemaService {
        &self.service
    }

    pub fn repository(&self) -> &Repository {
        self.service.repository()
    }

    pub async fn all(&self) -> Result<Schemas> {
        self.service.all().await
    }

    pub async fn find_by_class_name(&self, class: &str) -> Result<Schema> {
        self.service
            .find_by_class_name(&ClassName::new(class)?)
            .await
    }

    pub async fn exists(&self, class: &str) -> Result<bool> {
        self.repository().exists(&ClassName::new(class)?).await
    }

    pub async fn create(&self, schema: &Schema) -> Result<Schema> {
        self.service.create(schema).await
    }

    /// Parses `json` as a schema and creates it.
    pub async fn create_from_json(&self, json: &str) -> Result<Schema> {
        self.create(&Schema::from_json(json)?).await
    }

    pub async fn update(&self, schema: &Schema) -> Result<Schema> {
        self.service.update(schema).await
    }

    /// Parses `json` as a schema and migrates the stored one towards it.
    pub async fn update_from_json(&self, json: &str) -> Result<Schema> {
        self.update(&Schema::from_json(json)?).await
    }

    pub async fn delete(&self, class: &str) -> Result<()> {
        self.service.delete(&ClassName::new(class)?).await
    }
}
