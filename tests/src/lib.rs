mod logging_driver;
pub use logging_driver::{LoggingConnection, LoggingDriver};

use classbase::{Config, Db};
use classbase_core::{
    driver::Operation,
    stmt::{self, Statement},
};
use classbase_driver_memory::Memory;

pub use classbase_core::driver;

/// Installs a `tracing` subscriber honoring `RUST_LOG`. Safe to call from
/// every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A database over a fresh in-memory backend.
pub struct MemoryTest {
    pub db: Db,

    /// The backend, for inspecting tables and indexes.
    pub memory: Memory,

    /// The driver the database talks to.
    pub driver: LoggingDriver,
}

impl MemoryTest {
    pub async fn new() -> MemoryTest {
        MemoryTest::with_config(Config::default()).await
    }

    pub async fn with_config(config: Config) -> MemoryTest {
        init_tracing();

        let memory = Memory::new();
        let driver = LoggingDriver::new(memory.clone());
        let db = Db::new(driver.clone(), config).await.unwrap();

        MemoryTest { db, memory, driver }
    }

    /// Statements sent to the backend, in order, without transaction
    /// control.
    pub fn statements(&self) -> Vec<Statement> {
        self.driver
            .ops_log()
            .into_iter()
            .filter_map(|op| match op {
                Operation::Statement(stmt) => Some(stmt),
                Operation::Transaction(_) => None,
            })
            .collect()
    }

    /// Column names of `table`, in table order.
    pub fn columns(&self, table: &str) -> Vec<String> {
        self.memory
            .columns(table)
            .unwrap_or_default()
            .into_iter()
            .map(|(name, _)| name)
            .collect()
    }
}

/// Whether `op` drops a table whose name starts with `prefix`.
pub fn drops_table(op: &Operation, prefix: &str) -> bool {
    match op {
        Operation::Statement(Statement::DropTable(stmt::DropTable { names, .. })) => {
            names.iter().any(|name| name.as_str().starts_with(prefix))
        }
        _ => false,
    }
}

#[cfg(feature = "postgresql")]
pub mod postgresql;
