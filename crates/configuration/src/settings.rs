use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// The root configuration structure for the application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub connection: ConnectionConfig,
    #[serde(default)] // Use default values if the [query] section is missing
    pub query: QueryConfig,
}

/// Everything needed to sign in and bind a session to a namespace/database pair.
///
/// The value is read-only once built: fields are private and only exposed
/// through accessors, so a loaded config cannot drift from what was validated.
#[derive(Clone, Deserialize)]
pub struct ConnectionConfig {
    /// The database selected after sign-in.
    database: String,
    /// The address the driver connects to (e.g., "db:8000").
    endpoint: String,
    /// The namespace selected after sign-in.
    namespace: String,
    username: String,
    password: String,
    /// An optional scope/tenant identifier. An empty string means "no scope".
    #[serde(default)]
    scope: Option<String>,
}

impl ConnectionConfig {
    pub fn new(
        database: impl Into<String>,
        endpoint: impl Into<String>,
        namespace: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            endpoint: endpoint.into(),
            namespace: namespace.into(),
            username: username.into(),
            password: password.into(),
            scope: None,
        }
    }

    /// Returns a copy of this config carrying the given scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// The scope, if one is set and non-empty.
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref().filter(|s| !s.is_empty())
    }

    /// Returns the names of the required fields that are empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("database", &self.database),
            ("endpoint", &self.endpoint),
            ("namespace", &self.namespace),
            ("username", &self.username),
            ("password", &self.password),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

// The password never shows up in logs or panic messages.
impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("database", &self.database)
            .field("endpoint", &self.endpoint)
            .field("namespace", &self.namespace)
            .field("username", &self.username)
            .field("password", &"********")
            .field("scope", &self.scope)
            .finish()
    }
}

/// Settings applied to every query issued through a session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryConfig {
    /// Timeout used by `Session::query` when the caller supplies no signal.
    /// Absent means wait for the driver indefinitely.
    #[serde(default)]
    pub default_timeout_ms: Option<u64>,
    #[serde(default)]
    pub concurrency: DriverConcurrency,
}

impl QueryConfig {
    pub fn default_timeout(&self) -> Option<Duration> {
        self.default_timeout_ms.map(Duration::from_millis)
    }
}

/// How many driver calls a single session may have in flight at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverConcurrency {
    /// One call at a time. Safe for drivers that document no concurrency guarantees.
    #[default]
    Serialized,
    /// Calls are dispatched to the driver without any gate.
    Concurrent,
}
