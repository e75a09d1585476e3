use classbase_core::{
    async_trait,
    driver::{Connection, Operation, Response},
    Driver, Error, Result,
};
use std::{
    fmt,
    sync::{Arc, Mutex},
};

type Predicate = Box<dyn Fn(&Operation) -> bool + Send + Sync>;

/// A driver wrapper recording every operation it forwards. Operations
/// matched by an injected predicate fail, or never complete.
#[derive(Debug, Clone)]
pub struct LoggingDriver {
    inner: Arc<dyn Driver>,
    shared: Arc<Shared>,
}

#[derive(Default)]
struct Shared {
    /// Log of all operations executed through this driver
    ops_log: Mutex<Vec<Operation>>,

    fail_when: Mutex<Option<Predicate>>,
    stall_when: Mutex<Option<Predicate>>,
}

impl LoggingDriver {
    pub fn new(driver: impl Driver) -> Self {
        Self {
            inner: Arc::new(driver),
            shared: Arc::default(),
        }
    }

    /// Operations forwarded so far, including the failed ones.
    pub fn ops_log(&self) -> Vec<Operation> {
        self.shared.ops_log.lock().unwrap().clone()
    }

    pub fn clear_log(&self) {
        self.shared.ops_log.lock().unwrap().clear();
    }

    /// Fails every later operation matching `predicate` with a driver
    /// error. The operation is not forwarded.
    pub fn fail_when(&self, predicate: impl Fn(&Operation) -> bool + Send + Sync + 'static) {
        *self.shared.fail_when.lock().unwrap() = Some(Box::new(predicate));
    }

    /// Makes every later operation matching `predicate` hang until its
    /// future is dropped.
    pub fn stall_when(&self, predicate: impl Fn(&Operation) -> bool + Send + Sync + 'static) {
        *self.shared.stall_when.lock().unwrap() = Some(Box::new(predicate));
    }

    pub fn stop_failing(&self) {
        *self.shared.fail_when.lock().unwrap() = None;
        *self.shared.stall_when.lock().unwrap() = None;
    }
}

impl Shared {
    fn matches(&self, predicate: &Mutex<Option<Predicate>>, operation: &Operation) -> bool {
        predicate
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|predicate| predicate(operation))
    }
}

impl fmt::Debug for Shared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shared")
            .field("ops_log", &self.ops_log)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Driver for LoggingDriver {
    async fn connect(&self) -> Result<Box<dyn Connection>> {
        Ok(Box::new(LoggingConnection {
            inner: self.inner.connect().await?,
            shared: self.shared.clone(),
        }))
    }
}

#[derive(Debug)]
pub struct LoggingConnection {
    /// The underlying connection that actually executes operations
    inner: Box<dyn Connection>,
    shared: Arc<Shared>,
}

#[async_trait]
impl Connection for LoggingConnection {
    async fn exec(&mut self, operation: Operation) -> Result<Response> {
        self.shared.ops_log.lock().unwrap().push(operation.clone());

        if self.shared.matches(&self.shared.fail_when, &operation) {
            return Err(Error::driver(std::io::Error::other("injected failure")));
        }

        if self.shared.matches(&self.shared.stall_when, &operation) {
            std::future::pending::<()>().await;
        }

        self.inner.exec(operation).await
    }
}
