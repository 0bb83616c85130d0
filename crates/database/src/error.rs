use crate::deadline::CancelReason;
use crate::driver::DriverError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Authentication failed: {0}")]
    Authentication(#[source] DriverError),

    #[error("Failed to select namespace/database: {0}")]
    NamespaceSelection(#[source] DriverError),

    #[error("The driver rejected the query: {0}")]
    Query(#[source] DriverError),

    #[error("Deadline exceeded before the driver responded; the outcome is unknown.")]
    DeadlineExceeded,

    #[error("Cancelled before the driver responded; the outcome is unknown.")]
    Cancelled,

    #[error("Scope '{scope}' is configured but the driver cannot sign in with a scope.")]
    ScopeUnsupported { scope: String },

    #[error("Variable '{name}' could not be converted to a driver value: {source}")]
    InvalidVariable {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Data for '{thing}' could not be converted to a driver value: {source}")]
    InvalidData {
        thing: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("The background driver call ended without reporting a result.")]
    WorkerLost,
}

impl DbError {
    /// True when the caller stopped waiting before the driver answered.
    ///
    /// The remote operation may have succeeded, failed, or still be running.
    pub fn is_outcome_unknown(&self) -> bool {
        matches!(self, DbError::DeadlineExceeded | DbError::Cancelled)
    }

    /// The error reported by the driver itself, if this error carries one.
    pub fn driver_error(&self) -> Option<&DriverError> {
        match self {
            DbError::Authentication(e) | DbError::NamespaceSelection(e) | DbError::Query(e) => {
                Some(e)
            }
            _ => None,
        }
    }
}

impl From<CancelReason> for DbError {
    fn from(reason: CancelReason) -> Self {
        match reason {
            CancelReason::DeadlineExceeded => DbError::DeadlineExceeded,
            CancelReason::Cancelled => DbError::Cancelled,
        }
    }
}
