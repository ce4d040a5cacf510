use secrecy::Secret;
use serde::{Deserialize, Serialize};

use identity_core::{AppError, AuthResult, AuthService, IdentityRepository, SignupMetadata, User};

/// Signup request as parsed by the presentation layer.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: Secret<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: Secret<String>,
}

/// Projection of a [`User`] for the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
        }
    }
}

/// Projection of an [`AuthResult`]; `expires_at` is unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
}

impl From<AuthResult> for LoginResponse {
    fn from(result: AuthResult) -> Self {
        Self {
            user: result.user.into(),
            access_token: result.access_token,
            refresh_token: result.refresh_token,
            expires_at: result.expires_at.timestamp(),
        }
    }
}

/// Authentication use cases on top of the domain service.
pub struct AuthUsecase<R>
where
    R: IdentityRepository,
{
    auth_service: AuthService<R>,
}

impl<R> AuthUsecase<R>
where
    R: IdentityRepository,
{
    pub fn new(auth_service: AuthService<R>) -> Self {
        Self { auth_service }
    }

    #[tracing::instrument(name = "AuthUsecase::signup", skip(self, request), fields(email = %request.email))]
    pub async fn signup(&self, request: SignupRequest) -> Result<UserResponse, AppError> {
        let metadata = SignupMetadata {
            username: request.username,
        };

        let user = self
            .auth_service
            .signup(&request.email, &request.password, metadata)
            .await?;

        Ok(user.into())
    }

    #[tracing::instrument(name = "AuthUsecase::login", skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        let result = self
            .auth_service
            .login(&request.email, &request.password)
            .await?;

        Ok(result.into())
    }

    #[tracing::instrument(name = "AuthUsecase::logout", skip_all)]
    pub async fn logout(&self, access_token: &str) -> Result<(), AppError> {
        self.auth_service.logout(access_token).await
    }

    #[tracing::instrument(name = "AuthUsecase::current_user", skip_all)]
    pub async fn current_user(&self, access_token: &str) -> Result<UserResponse, AppError> {
        let user = self.auth_service.current_user(access_token).await?;
        Ok(user.into())
    }
}
