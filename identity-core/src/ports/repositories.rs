use async_trait::async_trait;
use secrecy::Secret;

use crate::domain::{
    error::AppError,
    profile::Profile,
    user::{AuthResult, User},
};

/// Caller-supplied metadata attached to a signup request.
///
/// Schema-defined on purpose: only the fields named here are ever sent to
/// the provider, there is no open-ended metadata map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupMetadata {
    pub username: Option<String>,
}

/// Port to the remote identity provider.
///
/// Implementations perform single remote round trips with no local state and
/// no caching; classification of failures into [`AppError`] happens here and
/// is never altered above this boundary.
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Registers a new identity with the provider.
    async fn create(
        &self,
        email: &str,
        password: &Secret<String>,
        metadata: SignupMetadata,
    ) -> Result<User, AppError>;

    /// Exchanges credentials for a token pair.
    ///
    /// The returned user's `username` is left empty on this path; callers
    /// needing it resolve it through [`Self::get_current_user`].
    async fn authenticate(
        &self,
        email: &str,
        password: &Secret<String>,
    ) -> Result<AuthResult, AppError>;

    /// Resolves the user behind an access token, including its username.
    async fn get_current_user(&self, access_token: &str) -> Result<User, AppError>;

    /// Revokes the session scoped to the given token.
    async fn logout(&self, access_token: &str) -> Result<(), AppError>;

    // The operations below are contractually part of the port but have no
    // backing implementation yet; adapters must fail loudly, never no-op.

    async fn find_by_id(&self, id: &str) -> Result<User, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<User, AppError>;

    async fn update(&self, user: &User) -> Result<(), AppError>;

    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

/// Port to the remote tabular data store holding profile records.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetches the profile whose id matches exactly.
    ///
    /// Zero matching rows is `DomainCode::NotFound`, never an empty profile.
    async fn get_by_id(&self, id: &str) -> Result<Profile, AppError>;

    /// Inserts a new profile row and returns the stored representation.
    async fn create(&self, profile: &Profile) -> Result<Profile, AppError>;

    /// Updates the name of an existing row. Does not re-read the row.
    async fn update(&self, profile: &Profile) -> Result<(), AppError>;
}
