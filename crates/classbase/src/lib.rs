mod config;
pub use config::Config;

pub mod db;
pub use db::Db;

mod repository;
pub use repository::Repository;

mod service;
pub use service::SchemaService;

pub use classbase_core::{
    driver::{self, Connection, Driver, IsolationLevel},
    schema::{self, ClassName, FieldName, Schemas},
    Code, Error, Result, Schema,
};
