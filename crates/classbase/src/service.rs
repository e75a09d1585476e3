use crate::Repository;

use classbase_core::{
    schema::{ClassName, Schemas},
    Error, Result, Schema,
};

/// Schema operations as offered to the transport layer.
///
/// Adds the existence checks around the [`Repository`] and answers with
/// the schema as stored, which includes the default columns and, after an
/// update, the definitions kept from the existing schema.
#[derive(Debug, Clone)]
pub struct SchemaService {
    repository: Repository,
}

impl SchemaService {
    pub fn new(repository: Repository) -> SchemaService {
        SchemaService { repository }
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub async fn all(&self) -> Result<Schemas> {
        self.repository.all().await
    }

    pub async fn find_by_class_name(&self, class: &ClassName) -> Result<Schema> {
        self.repository.find_by_class_name(class).await
    }

    pub async fn create(&self, schema: &Schema) -> Result<Schema> {
        let class = &schema.class_name;

        if self.repository.exists(class).await? {
            return Err(Error::duplicate_data(format!("class {class} already exists")));
        }

        self.repository.create(schema).await?;
        self.repository.find_by_class_name(class).await
    }

    pub async fn update(&self, schema: &Schema) -> Result<Schema> {
        let class = &schema.class_name;

        if !self.repository.exists(class).await? {
            return Err(Error::data_not_found(format!("class {class} not exists")));
        }

        self.repository.update(schema).await?;
        self.repository.find_by_class_name(class).await
    }

    pub async fn delete(&self, class: &ClassName) -> Result<()> {
        if !self.repository.exists(class).await? {
            return Err(Error::data_not_found(format!("class {class} not exists")));
        }

        self.repository.delete(class).await
    }
}
