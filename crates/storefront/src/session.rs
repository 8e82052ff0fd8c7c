//! Session types for authenticated backend access.
//!
//! The host application owns credential storage (an opaque key-value store
//! filled in at login). Core logic never reads it: callers build a [`Session`]
//! from whatever the store yields and pass it explicitly into every
//! authenticated call. No session value means no server cart.

use secrecy::{ExposeSecret, SecretString};

/// A logged-in user's identity and API token.
#[derive(Clone)]
pub struct Session {
    /// Display name of the logged-in user.
    pub username: String,
    /// Bearer token returned by the backend at login.
    token: SecretString,
}

impl Session {
    /// Create a session from stored credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: SecretString::from(token.into()),
        }
    }

    /// The bearer token to authenticate backend requests with.
    #[must_use]
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Keys under which the host application's credential store holds login data.
pub mod keys {
    /// Key for the API bearer token.
    pub const TOKEN: &str = "token";

    /// Key for the logged-in username.
    pub const USERNAME: &str = "username";

    /// Key for the user's wallet balance.
    pub const BALANCE: &str = "balance";
}
