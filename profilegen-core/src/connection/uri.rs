//! Connection URI parsing.
//!
//! URIs follow the orchestrator's format:
//! `<conn_type>://<login>:<password>@<host>:<port>/<schema>?<extras>`.
//! Every component is percent-decoded. A `__extra__` query parameter holds a
//! JSON object merged into the extras; all other parameters become string
//! extras.

use super::{Connection, parse_extra};
use crate::{Result, error::ProfileError, security::Credentials};
use percent_encoding::percent_decode_str;
use serde_json::Value;

const EXTRA_QUERY_KEY: &str = "__extra__";

pub(super) fn parse_connection_uri(conn_id: &str, uri: &str) -> Result<Connection> {
    let url = url::Url::parse(uri).map_err(|e| {
        ProfileError::connection_parse(format!(
            "connection '{}' has an invalid URI: {}",
            conn_id, e
        ))
    })?;

    let host = non_empty(decode(url.host_str().unwrap_or_default())?);
    let login = non_empty(decode(url.username())?);
    let password = url.password().map(decode).transpose()?;
    let schema = non_empty(decode(url.path().trim_start_matches('/'))?);

    let mut extra = serde_json::Map::new();
    for (key, value) in url.query_pairs() {
        if key == EXTRA_QUERY_KEY {
            let parsed = parse_extra(Some(Value::String(value.into_owned())))?;
            extra.extend(parsed);
        } else {
            extra.insert(key.into_owned(), Value::String(value.into_owned()));
        }
    }

    tracing::debug!(
        conn_id,
        conn_type = %normalize_conn_type(url.scheme()),
        extras = extra.len(),
        "Parsed connection URI"
    );

    Ok(Connection {
        conn_id: conn_id.to_string(),
        conn_type: normalize_conn_type(url.scheme()),
        host,
        port: url.port(),
        schema,
        extra,
        credentials: Credentials::new(login, password),
    })
}

/// Maps URI schemes onto connection types (`postgresql` → `postgres`,
/// dashes → underscores).
fn normalize_conn_type(scheme: &str) -> String {
    let conn_type = scheme.replace('-', "_");
    if conn_type == "postgresql" {
        "postgres".to_string()
    } else {
        conn_type
    }
}

fn decode(component: &str) -> Result<String> {
    percent_decode_str(component)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ProfileError::serialization("connection URI component", e))
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
