use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity record issued by the remote provider.
///
/// A `User` is a transient projection of provider state, reconstructed on
/// every call and never persisted locally. `username` may be empty when it
/// has not been resolved on the current path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            username: username.into(),
        }
    }
}

/// Ephemeral output of a successful authentication.
///
/// Tokens are opaque strings whose meaning belongs to the identity provider;
/// this core only carries them. `expires_at` is fixed at authentication time,
/// the provider's own token lifetime is not introspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}
