//! # nsgate Configuration Crate
//!
//! Loads and validates the connection settings used to establish a database
//! session, plus the per-query defaults applied by the session.
//!
//! ## Public API
//!
//! - `load_config`: reads a TOML file, overlays `NSGATE__*` environment variables
//!   and validates the result.
//! - `load_config_from_str`: the same pipeline over an in-memory TOML document.
//! - `init_tracing`: installs the process-wide `tracing` subscriber.

use crate::error::ConfigError;
use crate::settings::Config;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{ConnectionConfig, DriverConcurrency, QueryConfig};

/// Prefix for environment overrides, e.g. `NSGATE__CONNECTION__PASSWORD`.
pub const ENV_PREFIX: &str = "NSGATE";

/// Loads the application configuration from the given TOML file.
///
/// Environment variables prefixed with `NSGATE__` take precedence over the file,
/// which keeps the password out of checked-in configuration.
pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name(path))
        // Values stay strings: `0123` must not turn into `123`. Numeric fields
        // are converted when the config is deserialized.
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));
    finish(builder)
}

/// Loads the configuration from a TOML document held in memory.
pub fn load_config_from_str(toml: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml));
    finish(builder)
}

fn finish(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<Config, ConfigError> {
    let config = builder.build()?.try_deserialize::<Config>()?;
    validate(&config)?;
    tracing::debug!(
        endpoint = config.connection.endpoint(),
        namespace = config.connection.namespace(),
        database = config.connection.database(),
        "Configuration loaded."
    );
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let missing = config.connection.missing_fields();
    if !missing.is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "connection fields must not be empty: {}",
            missing.join(", ")
        )));
    }
    if config.query.default_timeout_ms == Some(0) {
        return Err(ConfigError::ValidationError(
            "query.default_timeout_ms must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
