//! Postgres connection → dbt-postgres profile mapping.
//!
//! dbt requires `host`, `user`, `password`, `port`, `dbname` and `schema`
//! (<https://docs.getdbt.com/reference/warehouse-setups/postgres-setup>).
//! The password is written as an `env_var()` reference and exported through
//! [`ProfileMapping::env_vars`] instead.

use super::{EnvVars, Profile, ProfileArgs, ProfileMapping, is_present};
use crate::Connection;
use serde_json::Value;

/// Connection type handled by [`PostgresProfileMapping`].
pub const CONNECTION_TYPE: &str = "postgres";

/// Port used when the connection does not set one.
pub const DEFAULT_POSTGRES_PORT: u16 = 5432;

/// Maps Postgres connections to dbt-postgres profile targets.
///
/// # Example
/// ```rust
/// use profilegen_core::{Connection, profiles::{PostgresProfileMapping, ProfileArgs, ProfileMapping}};
///
/// let conn = Connection::new("pg", "postgres")
///     .with_host("db")
///     .with_login("u")
///     .with_password("p")
///     .with_schema("d");
///
/// let mapping = PostgresProfileMapping::new(conn, ProfileArgs::new());
/// assert!(!mapping.validate_connection()); // no port, no dbt schema
/// assert_eq!(mapping.profile()["port"], 5432);
/// ```
#[derive(Debug, Clone)]
pub struct PostgresProfileMapping {
    connection: Connection,
    profile_args: ProfileArgs,
}

impl PostgresProfileMapping {
    /// Creates a mapping for `connection`, with `profile_args` merged over
    /// the mapped fields.
    pub fn new(connection: Connection, profile_args: ProfileArgs) -> Self {
        Self {
            connection,
            profile_args,
        }
    }

    /// Database name: profile arg `dbname`, then `database`, then the
    /// connection's `schema` attribute. Non-string args are used as written,
    /// so `dbname=42` resolves to `"42"`.
    pub fn database(&self) -> Option<String> {
        ["dbname", "database"]
            .iter()
            .find_map(|key| self.profile_args.get(*key).and_then(scalar_string))
            .or_else(|| {
                self.connection
                    .schema
                    .clone()
                    .filter(|schema| !schema.is_empty())
            })
    }

    /// dbt schema: profile arg `schema`, then the `schema` extra.
    pub fn schema(&self) -> Option<String> {
        self.dbt_value("schema").as_ref().and_then(scalar_string)
    }

    /// Port when set and non-zero, else the Postgres default.
    pub fn port(&self) -> u16 {
        self.connection
            .port
            .filter(|port| *port != 0)
            .unwrap_or(DEFAULT_POSTGRES_PORT)
    }

    fn missing_field(&self) -> Option<&'static str> {
        let conn = &self.connection;
        if !conn.host.as_deref().is_some_and(|host| !host.is_empty()) {
            return Some("host");
        }
        if !conn.login().is_some_and(|login| !login.is_empty()) {
            return Some("login");
        }
        if !conn.credentials().has_password() {
            return Some("password");
        }
        if !conn.port.is_some_and(|port| port != 0) {
            return Some("port");
        }
        if self.database().is_none() {
            return Some("database");
        }
        if self.schema().is_none() {
            return Some("schema");
        }
        None
    }
}

/// Text form of a set scalar value; strings are taken verbatim.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        _ if !is_present(value) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn optional_string(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |s| Value::String(s.to_string()))
}

impl ProfileMapping for PostgresProfileMapping {
    fn connection_type(&self) -> &'static str {
        CONNECTION_TYPE
    }

    fn connection(&self) -> &Connection {
        &self.connection
    }

    fn profile_args(&self) -> &ProfileArgs {
        &self.profile_args
    }

    fn validate_connection(&self) -> bool {
        if self.connection.conn_type != CONNECTION_TYPE {
            tracing::debug!(
                conn_id = %self.connection.conn_id,
                conn_type = %self.connection.conn_type,
                "Connection type does not match postgres mapping"
            );
            return false;
        }

        match self.missing_field() {
            Some(field) => {
                tracing::debug!(
                    conn_id = %self.connection.conn_id,
                    field,
                    "Connection is missing a required field"
                );
                false
            }
            None => true,
        }
    }

    fn profile(&self) -> Profile {
        let conn = &self.connection;
        let extra = |key: &str| conn.extra.get(key).cloned().unwrap_or(Value::Null);

        let mut profile = Profile::new();
        profile.insert("type".to_string(), Value::from(CONNECTION_TYPE));
        profile.insert("host".to_string(), optional_string(conn.host.as_deref()));
        profile.insert("user".to_string(), optional_string(conn.login()));
        profile.insert(
            "password".to_string(),
            Value::String(self.env_var_format("password")),
        );
        profile.insert("port".to_string(), Value::from(self.port()));
        profile.insert(
            "dbname".to_string(),
            optional_string(self.database().as_deref()),
        );
        profile.insert(
            "schema".to_string(),
            optional_string(self.schema().as_deref()),
        );
        profile.insert("keepalives_idle".to_string(), extra("keepalives_idle"));
        profile.insert("sslmode".to_string(), extra("sslmode"));

        for (key, value) in &self.profile_args {
            profile.insert(key.clone(), value.clone());
        }
        profile
    }

    fn env_vars(&self) -> EnvVars {
        EnvVars::from([(
            self.env_var_name("password"),
            self.connection.password().unwrap_or_default().to_string(),
        )])
    }
}
