//! Connection → dbt profile mappings.
//!
//! Each supported connection type has a [`ProfileMapping`] that knows which
//! connection attributes dbt requires, how to translate them into a profile
//! target, and which secrets must travel through environment variables
//! instead of being written into `profiles.yml`.
//!
//! # Security Guarantees
//! - Rendered profiles reference secrets only through `env_var()` templates
//! - Secret values are only ever returned from [`ProfileMapping::env_vars`]

pub mod postgres;

pub use postgres::PostgresProfileMapping;

use crate::{Connection, Result, error::ProfileError};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Profile target contents: dbt field name → scalar or null.
pub type Profile = Map<String, Value>;

/// Caller-supplied overrides merged over the mapped profile fields.
pub type ProfileArgs = Map<String, Value>;

/// Environment variable name → secret value.
pub type EnvVars = BTreeMap<String, String>;

/// Target name used when the caller does not provide one.
pub const DEFAULT_TARGET_NAME: &str = "cosmos_target";

/// Prefix shared by every generated secret environment variable.
pub const ENV_VAR_PREFIX: &str = "COSMOS_CONN";

/// Maps one connection type onto a dbt profile target.
///
/// # Object Safety
/// The trait is object-safe so mappings can be selected at runtime through
/// [`find_profile_mapping`].
pub trait ProfileMapping: Send + Sync {
    /// Connection type this mapping accepts, e.g. `postgres`.
    fn connection_type(&self) -> &'static str;

    /// Connection being mapped.
    fn connection(&self) -> &Connection;

    /// Caller-supplied profile overrides.
    fn profile_args(&self) -> &ProfileArgs;

    /// Returns whether the connection carries everything the profile needs.
    fn validate_connection(&self) -> bool;

    /// Builds the profile target. Absent optional fields are null.
    fn profile(&self) -> Profile;

    /// Secret environment variables the profile references.
    fn env_vars(&self) -> EnvVars;

    /// Environment variable name for a profile field,
    /// e.g. `COSMOS_CONN_POSTGRES_PASSWORD`.
    fn env_var_name(&self, field_name: &str) -> String {
        format!(
            "{}_{}_{}",
            ENV_VAR_PREFIX,
            self.connection().conn_type.to_uppercase(),
            field_name.to_uppercase()
        )
    }

    /// dbt template that reads a profile field from its environment variable.
    fn env_var_format(&self, field_name: &str) -> String {
        format!("{{{{ env_var('{}') }}}}", self.env_var_name(field_name))
    }

    /// Looks a dbt setting up in the profile args first, then in the
    /// connection extras. Empty strings and nulls count as absent.
    fn dbt_value(&self, name: &str) -> Option<Value> {
        self.profile_args()
            .get(name)
            .filter(|value| is_present(value))
            .or_else(|| {
                self.connection()
                    .extra_value(name)
                    .filter(|value| is_present(value))
            })
            .cloned()
    }

    /// Renders a complete `profiles.yml` document holding this mapping's
    /// profile as the single output of `target_name`.
    ///
    /// Null fields are dropped so dbt falls back to its own defaults.
    ///
    /// # Errors
    /// Returns an error if YAML serialization fails.
    fn profile_file_contents(&self, profile_name: &str, target_name: &str) -> Result<String> {
        let outputs: Profile = self
            .profile()
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .collect();

        let mut document = BTreeMap::new();
        document.insert(
            profile_name,
            ProfileDocument {
                target: target_name,
                outputs: BTreeMap::from([(target_name, outputs)]),
            },
        );

        serde_yaml::to_string(&document)
            .map_err(|e| ProfileError::serialization("profiles.yml rendering", e))
    }
}

#[derive(Serialize)]
struct ProfileDocument<'a> {
    target: &'a str,
    outputs: BTreeMap<&'a str, Profile>,
}

/// Returns whether a value is truthy enough to count as set.
pub(crate) fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

type MappingFactory = fn(Connection, ProfileArgs) -> Box<dyn ProfileMapping>;

/// Registered mappings in lookup order.
const PROFILE_MAPPINGS: &[(&str, MappingFactory)] =
    &[(postgres::CONNECTION_TYPE, postgres_mapping)];

fn postgres_mapping(connection: Connection, profile_args: ProfileArgs) -> Box<dyn ProfileMapping> {
    Box::new(PostgresProfileMapping::new(connection, profile_args))
}

/// Connection types that have a registered mapping.
pub fn supported_connection_types() -> Vec<&'static str> {
    PROFILE_MAPPINGS.iter().map(|(conn_type, _)| *conn_type).collect()
}

/// Selects the mapping for a connection and checks it is usable.
///
/// # Errors
/// Returns [`ProfileError::UnsupportedConnectionType`] when no mapping handles
/// the connection type, and [`ProfileError::InvalidConnection`] when the
/// mapping rejects the connection.
///
/// # Example
/// ```rust
/// use profilegen_core::{Connection, profiles::{ProfileArgs, find_profile_mapping}};
///
/// let conn = Connection::new("pg", "postgres")
///     .with_host("db")
///     .with_login("u")
///     .with_password("p")
///     .with_port(5432)
///     .with_schema("d");
/// let mut args = ProfileArgs::new();
/// args.insert("schema".into(), "analytics".into());
///
/// let mapping = find_profile_mapping(&conn, &args)?;
/// assert_eq!(mapping.connection_type(), "postgres");
/// # Ok::<(), profilegen_core::ProfileError>(())
/// ```
pub fn find_profile_mapping(
    connection: &Connection,
    profile_args: &ProfileArgs,
) -> Result<Box<dyn ProfileMapping>> {
    let Some((conn_type, factory)) = PROFILE_MAPPINGS
        .iter()
        .find(|(conn_type, _)| *conn_type == connection.conn_type)
    else {
        tracing::warn!(
            conn_id = %connection.conn_id,
            conn_type = %connection.conn_type,
            "No profile mapping for connection type"
        );
        return Err(ProfileError::UnsupportedConnectionType {
            conn_type: connection.conn_type.clone(),
            supported: supported_connection_types()
                .into_iter()
                .map(str::to_string)
                .collect(),
        });
    };

    let mapping = factory(connection.clone(), profile_args.clone());
    if !mapping.validate_connection() {
        return Err(ProfileError::invalid_connection(
            connection.conn_id.clone(),
            *conn_type,
        ));
    }

    tracing::debug!(
        conn_id = %connection.conn_id,
        conn_type,
        "Selected profile mapping"
    );
    Ok(mapping)
}
