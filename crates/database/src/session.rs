use crate::driver::Driver;
use crate::error::DbError;
use configuration::{ConnectionConfig, DriverConcurrency, QueryConfig};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// An authenticated, namespace-bound handle to a driver connection.
///
/// Only `establish` creates one, so holding a `Session` means both handshake
/// steps succeeded. Nothing inside it changes after construction; a session
/// stays usable after any query error or abandoned query.
pub struct Session<D: Driver> {
    pub(crate) driver: Arc<D>,
    /// Present under `DriverConcurrency::Serialized`.
    pub(crate) gate: Option<Arc<Mutex<()>>>,
    pub(crate) default_timeout: Option<Duration>,
    endpoint: String,
    namespace: String,
    database: String,
    auth: Value,
}

impl<D: Driver> Session<D> {
    pub(crate) fn new(driver: D, config: &ConnectionConfig, query: &QueryConfig, auth: Value) -> Self {
        let gate = match query.concurrency {
            DriverConcurrency::Serialized => Some(Arc::new(Mutex::new(()))),
            DriverConcurrency::Concurrent => None,
        };
        Self {
            driver: Arc::new(driver),
            gate,
            default_timeout: query.default_timeout(),
            endpoint: config.endpoint().to_string(),
            namespace: config.namespace().to_string(),
            database: config.database().to_string(),
            auth,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Whatever the driver returned from sign-in (typically a token).
    pub fn auth(&self) -> &Value {
        &self.auth
    }

    pub fn concurrency(&self) -> DriverConcurrency {
        if self.gate.is_some() {
            DriverConcurrency::Serialized
        } else {
            DriverConcurrency::Concurrent
        }
    }

    /// Closes the underlying connection.
    ///
    /// Under `DriverConcurrency::Serialized` this first waits for the session
    /// gate, so `close` never overlaps a driver call, including one abandoned
    /// after its deadline. Under `Concurrent` it runs immediately.
    pub async fn close(self) -> Result<(), DbError> {
        let permit = match &self.gate {
            Some(gate) => Some(Arc::clone(gate).lock_owned().await),
            None => None,
        };
        tracing::debug!(endpoint = %self.endpoint, "Closing session.");
        let driver = self.driver;
        tokio::task::spawn_blocking(move || {
            driver.close();
            drop(permit);
        })
        .await
        .map_err(|_| DbError::WorkerLost)
    }
}

impl<D: Driver> fmt::Debug for Session<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("endpoint", &self.endpoint)
            .field("namespace", &self.namespace)
            .field("database", &self.database)
            .field("concurrency", &self.concurrency())
            .field("default_timeout", &self.default_timeout)
            .finish_non_exhaustive()
    }
}
