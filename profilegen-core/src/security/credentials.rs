//! Secure credential container with automatic memory zeroing.
//!
//! Login and password are held in `Zeroizing` containers so they are cleared
//! from memory when the owning connection is dropped. The password is never
//! exposed through `Debug`.

use zeroize::Zeroizing;

/// Secure credential container that automatically zeros memory on drop.
///
/// # Example
///
/// ```rust
/// use profilegen_core::security::Credentials;
///
/// let creds = Credentials::new(Some("admin".to_string()), Some("secret".to_string()));
/// assert_eq!(creds.login(), Some("admin"));
/// assert!(creds.has_password());
/// assert!(!format!("{:?}", creds).contains("secret"));
/// ```
#[derive(Clone, Default)]
pub struct Credentials {
    login: Zeroizing<Option<String>>,
    password: Zeroizing<Option<String>>,
}

impl Credentials {
    /// Creates new credentials with automatic memory zeroing.
    pub fn new(login: Option<String>, password: Option<String>) -> Self {
        Self {
            login: Zeroizing::new(login),
            password: Zeroizing::new(password),
        }
    }

    /// Gets the login name, if any.
    pub fn login(&self) -> Option<&str> {
        self.login.as_deref()
    }

    /// Gets the password, if any.
    ///
    /// Callers must not log the returned value.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Checks if a non-empty password is present without exposing it.
    pub fn has_password(&self) -> bool {
        self.password.as_deref().is_some_and(|p| !p.is_empty())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login())
            .field("password", &self.password.as_ref().map(|_| "****"))
            .finish()
    }
}
