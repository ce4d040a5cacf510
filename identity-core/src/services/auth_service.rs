use secrecy::{ExposeSecret, Secret};

use crate::domain::{
    error::AppError,
    user::{AuthResult, User},
};
use crate::ports::repositories::{IdentityRepository, SignupMetadata};

/// Domain service enforcing identity policy in front of the provider port.
///
/// Credential checks run locally and in fixed order before any remote call
/// is made; the port's result is returned unchanged.
pub struct AuthService<R>
where
    R: IdentityRepository,
{
    identity_repo: R,
}

impl<R> AuthService<R>
where
    R: IdentityRepository,
{
    pub fn new(identity_repo: R) -> Self {
        Self { identity_repo }
    }

    #[tracing::instrument(name = "AuthService::signup", skip(self, password, metadata))]
    pub async fn signup(
        &self,
        email: &str,
        password: &Secret<String>,
        metadata: SignupMetadata,
    ) -> Result<User, AppError> {
        validate_credentials(email, password)?;
        self.identity_repo.create(email, password, metadata).await
    }

    #[tracing::instrument(name = "AuthService::login", skip(self, password))]
    pub async fn login(
        &self,
        email: &str,
        password: &Secret<String>,
    ) -> Result<AuthResult, AppError> {
        validate_credentials(email, password)?;
        self.identity_repo.authenticate(email, password).await
    }

    #[tracing::instrument(name = "AuthService::logout", skip_all)]
    pub async fn logout(&self, access_token: &str) -> Result<(), AppError> {
        validate_token(access_token)?;
        self.identity_repo.logout(access_token).await
    }

    #[tracing::instrument(name = "AuthService::current_user", skip_all)]
    pub async fn current_user(&self, access_token: &str) -> Result<User, AppError> {
        validate_token(access_token)?;
        self.identity_repo.get_current_user(access_token).await
    }
}

// Email before password, first violation wins.
fn validate_credentials(email: &str, password: &Secret<String>) -> Result<(), AppError> {
    if email.is_empty() {
        return Err(AppError::validation("email", "email is required"));
    }
    if password.expose_secret().is_empty() {
        return Err(AppError::validation("password", "password is required"));
    }
    Ok(())
}

fn validate_token(access_token: &str) -> Result<(), AppError> {
    if access_token.is_empty() {
        return Err(AppError::validation("token", "access token is required"));
    }
    Ok(())
}
