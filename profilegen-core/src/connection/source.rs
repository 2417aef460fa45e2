//! Resolving connection definitions from text and the process environment.

use super::Connection;
use crate::{Result, error::ProfileError};

/// Prefix of the environment variables the orchestrator reads connections from.
pub const CONNECTION_ENV_PREFIX: &str = "AIRFLOW_CONN_";

/// Name of the environment variable holding the connection `conn_id`.
///
/// ```rust
/// use profilegen_core::connection::connection_env_var;
///
/// assert_eq!(connection_env_var("my_postgres"), "AIRFLOW_CONN_MY_POSTGRES");
/// ```
pub fn connection_env_var(conn_id: &str) -> String {
    format!("{}{}", CONNECTION_ENV_PREFIX, conn_id.to_uppercase())
}

/// Parses a connection definition in either JSON or URI form.
///
/// Definitions starting with `{` are treated as JSON, everything else as a URI.
///
/// # Errors
/// Returns an error if the definition cannot be parsed.
pub fn parse_connection(conn_id: &str, definition: &str) -> Result<Connection> {
    let definition = definition.trim();
    if definition.starts_with('{') {
        Connection::from_json(conn_id, definition)
    } else {
        Connection::from_uri(conn_id, definition)
    }
}

/// Reads the connection `conn_id` from its `AIRFLOW_CONN_*` environment variable.
///
/// # Errors
/// Returns an error if the variable is unset, not unicode, or unparsable.
pub fn connection_from_env(conn_id: &str) -> Result<Connection> {
    let var = connection_env_var(conn_id);
    let definition = std::env::var(&var).map_err(|e| {
        ProfileError::configuration(format!(
            "Connection '{}' not found: {} ({})",
            conn_id, var, e
        ))
    })?;

    tracing::debug!(conn_id, env_var = %var, "Resolved connection from environment");
    parse_connection(conn_id, &definition)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_connection_detects_json() {
        let conn = parse_connection("c", r#"  {"conn_type": "postgres", "host": "db"}"#).unwrap();
        assert_eq!(conn.host.as_deref(), Some("db"));
        assert_eq!(conn.conn_id, "c");
    }

    #[test]
    fn test_parse_connection_detects_uri() {
        let conn = parse_connection("c", "postgres://u:p@db:5432/d").unwrap();
        assert_eq!(conn.port, Some(5432));
    }

    #[test]
    fn test_env_connection_lookup() {
        temp_env::with_var(
            "AIRFLOW_CONN_ENV_LOOKUP_PG",
            Some("postgres://u:p@envhost:6543/envdb"),
            || {
                let conn = connection_from_env("env_lookup_pg").unwrap();
                assert_eq!(conn.conn_id, "env_lookup_pg");
                assert_eq!(conn.host.as_deref(), Some("envhost"));
                assert_eq!(conn.port, Some(6543));
            },
        );
    }

    #[test]
    fn test_env_connection_missing() {
        temp_env::with_var_unset("AIRFLOW_CONN_ENV_MISSING", || {
            let error = connection_from_env("env_missing").unwrap_err();
            assert!(error.to_string().contains("AIRFLOW_CONN_ENV_MISSING"));
        });
    }
}
