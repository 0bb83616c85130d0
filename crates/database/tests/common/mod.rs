//! A recording in-memory driver for exercising the handshake and the executor.

#![allow(dead_code)]

use configuration::ConnectionConfig;
use database::{Capabilities, Credentials, Driver, DriverError, Vars};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Counters shared between a test and the driver it moved into a session.
#[derive(Debug, Default)]
pub struct CallLog {
    pub signin: AtomicUsize,
    pub use_namespace: AtomicUsize,
    pub query: AtomicUsize,
    pub create: AtomicUsize,
    pub close: AtomicUsize,
    /// Closes that arrived while a query was still running on the driver.
    pub close_while_busy: AtomicUsize,
    pub completed: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub last_scope: Mutex<Option<String>>,
    pub last_selection: Mutex<Option<(String, String)>>,
}

impl CallLog {
    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

/// Query behaviour can be steered per call through bound variables:
/// `delay_ms` overrides the default delay, `fail` returns its string as an
/// error and `panic` makes the driver panic.
#[derive(Debug, Default)]
pub struct MockDriver {
    pub log: Arc<CallLog>,
    signin_error: Option<String>,
    use_error: Option<String>,
    query_delay: Duration,
    scoped_signin: bool,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_signin(mut self, message: &str) -> Self {
        self.signin_error = Some(message.to_string());
        self
    }

    pub fn failing_use(mut self, message: &str) -> Self {
        self.use_error = Some(message.to_string());
        self
    }

    pub fn with_query_delay(mut self, delay: Duration) -> Self {
        self.query_delay = delay;
        self
    }

    pub fn with_scoped_signin(mut self) -> Self {
        self.scoped_signin = true;
        self
    }

    pub fn log(&self) -> Arc<CallLog> {
        Arc::clone(&self.log)
    }

    fn enter(&self) {
        let now = self.log.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.log.max_in_flight.fetch_max(now, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.log.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.log.completed.fetch_add(1, Ordering::SeqCst);
    }
}

impl Driver for MockDriver {
    fn signin(&self, credentials: &Credentials) -> Result<Value, DriverError> {
        self.log.signin.fetch_add(1, Ordering::SeqCst);
        *self.log.last_scope.lock().unwrap() = credentials.scope.clone();
        match &self.signin_error {
            Some(message) => Err(message.clone().into()),
            None => Ok(json!({ "token": format!("token-for-{}", credentials.username) })),
        }
    }

    fn use_namespace(&self, namespace: &str, database: &str) -> Result<(), DriverError> {
        self.log.use_namespace.fetch_add(1, Ordering::SeqCst);
        *self.log.last_selection.lock().unwrap() =
            Some((namespace.to_string(), database.to_string()));
        match &self.use_error {
            Some(message) => Err(message.clone().into()),
            None => Ok(()),
        }
    }

    fn query(&self, statement: &str, vars: &Vars) -> Result<Value, DriverError> {
        self.log.query.fetch_add(1, Ordering::SeqCst);
        self.enter();
        let delay = vars
            .get("delay_ms")
            .and_then(Value::as_u64)
            .map(Duration::from_millis)
            .unwrap_or(self.query_delay);
        std::thread::sleep(delay);
        self.leave();

        if vars.contains_key("panic") {
            panic!("driver panicked while running {statement}");
        }
        if let Some(message) = vars.get("fail").and_then(Value::as_str) {
            return Err(message.to_string().into());
        }
        Ok(json!({ "statement": statement, "vars": vars }))
    }

    fn create(&self, thing: &str, data: Value) -> Result<Value, DriverError> {
        self.log.create.fetch_add(1, Ordering::SeqCst);
        Ok(json!({ "id": format!("{thing}:1"), "data": data }))
    }

    fn close(&self) {
        if self.log.in_flight.load(Ordering::SeqCst) > 0 {
            self.log.close_while_busy.fetch_add(1, Ordering::SeqCst);
        }
        self.log.close.fetch_add(1, Ordering::SeqCst);
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            scoped_signin: self.scoped_signin,
        }
    }
}

pub fn app_config() -> ConnectionConfig {
    ConnectionConfig::new("app", "db:8000", "prod", "u", "p").with_scope("")
}
