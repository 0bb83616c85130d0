use serde_json::Value;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;

/// Any error a driver chooses to report. Kept boxed so it reaches the caller unchanged.
pub type DriverError = Box<dyn Error + Send + Sync + 'static>;

/// Bound query variables, keyed by name.
pub type Vars = HashMap<String, Value>;

/// The sign-in payload handed to the driver.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    /// Only populated when the driver advertises `Capabilities::scoped_signin`.
    pub scope: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .field("scope", &self.scope)
            .finish()
    }
}

/// Optional features a driver may or may not offer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// The sign-in call accepts a scope/tenant identifier.
    pub scoped_signin: bool,
}

/// The blocking client surface of a remote database driver.
///
/// Every call may block for as long as the remote side takes; none of them can
/// be interrupted. The `Send + Sync` bound is the driver's declaration that a
/// shared reference may be used from several threads at once. Whether a session
/// actually does so is governed separately by `DriverConcurrency`.
pub trait Driver: Send + Sync + 'static {
    /// Signs in and returns the driver's opaque authentication result (e.g. a token).
    fn signin(&self, credentials: &Credentials) -> Result<Value, DriverError>;

    /// Binds subsequent calls to a namespace/database pair.
    fn use_namespace(&self, namespace: &str, database: &str) -> Result<(), DriverError>;

    fn query(&self, statement: &str, vars: &Vars) -> Result<Value, DriverError>;

    /// Creates a record (or records) under `thing`.
    fn create(&self, thing: &str, data: Value) -> Result<Value, DriverError>;

    fn close(&self);

    fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }
}
