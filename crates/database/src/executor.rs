//! Runs blocking driver calls under a caller-supplied deadline.
//!
//! Each call is dispatched to Tokio's blocking pool and reports back over a
//! oneshot channel. The caller waits on whichever comes first: that channel or
//! the deadline signal. The driver has no way to interrupt a call in flight, so
//! when the deadline wins the call is abandoned rather than stopped: it runs to
//! completion in the background and its result is dropped.

use crate::deadline::DeadlineSignal;
use crate::driver::{Driver, DriverError};
use crate::error::DbError;
use crate::request::QueryRequest;
use crate::session::Session;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::oneshot;

impl<D: Driver> Session<D> {
    /// Runs `request`, returning the driver's result or error unless `signal`
    /// fires first, in which case the signal's reason is returned.
    ///
    /// A `DeadlineExceeded` or `Cancelled` result means the outcome is unknown:
    /// the statement may still be executing on the server.
    pub async fn execute_with_deadline(
        &self,
        request: QueryRequest,
        signal: &DeadlineSignal,
    ) -> Result<Value, DbError> {
        let QueryRequest { statement, vars } = request;
        self.run_with_deadline("query", signal, move |driver| {
            driver.query(&statement, &vars)
        })
        .await
    }

    /// Runs `request` bounded by the session's default timeout, if any.
    pub async fn query(&self, request: QueryRequest) -> Result<Value, DbError> {
        let signal = match self.default_timeout {
            Some(timeout) => DeadlineSignal::after(timeout),
            None => DeadlineSignal::never(),
        };
        self.execute_with_deadline(request, &signal).await
    }

    /// Creates a record under `thing` with the same deadline semantics as
    /// `execute_with_deadline`.
    pub async fn create_with_deadline<T: Serialize>(
        &self,
        thing: &str,
        data: &T,
        signal: &DeadlineSignal,
    ) -> Result<Value, DbError> {
        let data = serde_json::to_value(data).map_err(|source| DbError::InvalidData {
            thing: thing.to_string(),
            source,
        })?;
        let thing = thing.to_string();
        self.run_with_deadline("create", signal, move |driver| driver.create(&thing, data))
            .await
    }

    async fn run_with_deadline<F>(
        &self,
        op: &'static str,
        signal: &DeadlineSignal,
        call: F,
    ) -> Result<Value, DbError>
    where
        F: FnOnce(&D) -> Result<Value, DriverError> + Send + 'static,
    {
        if let Some(reason) = signal.reason() {
            return Err(reason.into());
        }

        // Under the serialized policy the permit travels with the call and is
        // released only when the driver returns, even if nobody is waiting.
        let permit = match &self.gate {
            Some(gate) => {
                let gate = Arc::clone(gate);
                tokio::select! {
                    biased;
                    permit = gate.lock_owned() => Some(permit),
                    reason = signal.fired() => {
                        tracing::debug!(op, ?reason, "Signal fired while waiting for the session gate.");
                        return Err(reason.into());
                    }
                }
            }
            None => None,
        };

        let (tx, rx) = oneshot::channel();
        let driver = Arc::clone(&self.driver);
        tracing::debug!(op, "Dispatching driver call.");
        // Detached: nobody joins this task, so after a deadline it finishes unobserved.
        tokio::task::spawn_blocking(move || {
            let outcome = call(driver.as_ref());
            drop(permit);
            if tx.send(outcome).is_err() {
                tracing::debug!(op, "Driver call finished after its caller stopped waiting; result discarded.");
            }
        });

        tokio::select! {
            biased;
            outcome = rx => match outcome {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(e)) => Err(DbError::Query(e)),
                // The sender was dropped without sending: the driver panicked.
                Err(_) => Err(DbError::WorkerLost),
            },
            reason = signal.fired() => {
                tracing::debug!(op, ?reason, "Abandoning driver call; it keeps running in the background.");
                Err(reason.into())
            }
        }
    }
}
