use crate::error::ConfigError;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs the global `tracing` subscriber, filtered by `RUST_LOG`.
///
/// Library crates only emit events; binaries call this once at startup.
pub fn init_tracing() -> Result<(), ConfigError> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| ConfigError::TracingError(e.to_string()))
}
