use super::Db;
use crate::Config;

use classbase_core::{err, Driver, Result};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Replaces the whole configuration.
    pub fn config(&mut self, config: Config) -> &mut Self {
        self.config = config;
        self
    }

    /// Sets the PostgreSQL connection URL.
    pub fn url(&mut self, url: &str) -> &mut Self {
        self.config.url = Some(url.to_string());
        self
    }

    /// Connects to the database named by the configured URL.
    pub async fn connect(&self) -> Result<Db> {
        let url = self
            .config
            .url
            .as_deref()
            .ok_or_else(|| err!("no connection URL configured"))?;
        crate::config::validate_url(url)?;

        Db::from_driver(connect_postgresql(url)?, self.config.clone()).await
    }

    /// Uses `driver` instead of opening connections from the configured
    /// URL.
    pub async fn build(&self, driver: impl Driver) -> Result<Db> {
        Db::new(driver, self.config.clone()).await
    }
}

#[cfg(feature = "postgresql")]
fn connect_postgresql(url: &str) -> Result<Arc<dyn Driver>> {
    Ok(Arc::new(classbase_driver_postgresql::PostgreSQL::new(url)?))
}

#[cfg(not(feature = "postgresql"))]
fn connect_postgresql(_url: &str) -> Result<Arc<dyn Driver>> {
    Err(err!("`postgresql` feature not enabled"))
}
