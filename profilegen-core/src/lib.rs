//! Core types and mappings for profilegen.
//!
//! This crate turns orchestrator connection records into dbt profile targets
//! plus the environment variables those targets read their secrets from. It
//! also carries the static settings used to build the API documentation.
//!
//! # Security Guarantees
//! - Secrets are never written into rendered profiles
//! - Credentials are held in zeroizing containers and redacted from logs
//! - No network access; connections are read, never opened
//!
//! # Architecture
//! - `connection`: connection records from URIs, JSON and the environment
//! - `profiles`: the `ProfileMapping` trait, registry and Postgres mapping
//! - `docs`: documentation builder settings and member filter

pub mod connection;
pub mod docs;
pub mod error;
pub mod logging;
pub mod profiles;
pub mod security;

// Re-export commonly used types
pub use connection::Connection;
pub use error::{ProfileError, Result};
pub use logging::init_logging;
pub use profiles::{
    DEFAULT_TARGET_NAME, EnvVars, PostgresProfileMapping, Profile, ProfileArgs, ProfileMapping,
    find_profile_mapping, supported_connection_types,
};
