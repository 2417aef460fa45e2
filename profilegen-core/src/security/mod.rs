//! Security utilities for credential protection.
//!
//! # Security Guarantees
//! - Credentials are stored in `Zeroizing` containers for automatic memory clearing
//! - Passwords are redacted from `Debug` output, logs and error messages
//! - Rendered profiles only ever reference secrets through environment variables

mod credentials;

pub use credentials::Credentials;
