use crate::driver::{Credentials, Driver};
use crate::error::DbError;
use crate::session::Session;
use configuration::{ConnectionConfig, QueryConfig};

/// Establishes a session using the default query settings.
///
/// See `establish_with`.
pub fn establish<D: Driver>(driver: D, config: &ConnectionConfig) -> Result<Session<D>, DbError> {
    establish_with(driver, config, &QueryConfig::default())
}

/// Signs in and selects the namespace/database pair, in that order.
///
/// The first failing step is returned with the driver's error attached and no
/// later step runs. On failure the driver is closed before returning, so a
/// half-initialized connection never escapes. A non-empty scope is rejected up
/// front when the driver cannot sign in with one.
pub fn establish_with<D: Driver>(
    driver: D,
    config: &ConnectionConfig,
    query: &QueryConfig,
) -> Result<Session<D>, DbError> {
    let scope = config.scope().map(str::to_owned);
    if let Some(scope) = &scope {
        if !driver.capabilities().scoped_signin {
            driver.close();
            return Err(DbError::ScopeUnsupported {
                scope: scope.clone(),
            });
        }
    }

    let credentials = Credentials {
        username: config.username().to_string(),
        password: config.password().to_string(),
        scope,
    };

    tracing::debug!(
        endpoint = config.endpoint(),
        username = config.username(),
        "Signing in."
    );
    let auth = match driver.signin(&credentials) {
        Ok(auth) => auth,
        Err(e) => {
            driver.close();
            return Err(DbError::Authentication(e));
        }
    };

    tracing::debug!(
        namespace = config.namespace(),
        database = config.database(),
        "Selecting namespace."
    );
    if let Err(e) = driver.use_namespace(config.namespace(), config.database()) {
        driver.close();
        return Err(DbError::NamespaceSelection(e));
    }

    tracing::info!(
        endpoint = config.endpoint(),
        namespace = config.namespace(),
        database = config.database(),
        "Session established."
    );
    Ok(Session::new(driver, config, query, auth))
}
