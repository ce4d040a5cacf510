use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use identity_core::{AppError, AuthResult, IdentityRepository, SignupMetadata, User};

use crate::config::SupabaseConfig;

pub(crate) const APIKEY_HEADER: &str = "apikey";

// Marker Supabase puts in the 400 body when the account exists but the
// confirmation link was never clicked.
const EMAIL_NOT_CONFIRMED_MARKER: &str = "email_not_confirmed";

/// Identity provider adapter speaking to the Supabase auth API.
///
/// Holds only immutable configuration and a shared HTTP client; every
/// operation is a fresh remote round trip with no caching.
pub struct SupabaseIdentityRepository {
    http_client: Client,
    config: SupabaseConfig,
}

impl SupabaseIdentityRepository {
    pub fn new(config: SupabaseConfig, http_client: Client) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Attempt 1 of the username fallback: the profiles table is the store
    /// of record for display names.
    async fn fetch_profile_name(&self, user_id: &str) -> Result<String, AppError> {
        let url = format!(
            "{}/rest/v1/profiles?id=eq.{}&select=name",
            self.config.base_url, user_id
        );

        let response = self
            .http_client
            .get(url)
            .header(APIKEY_HEADER, self.config.anon_key.expose_secret())
            .bearer_auth(self.config.anon_key.expose_secret())
            .send()
            .await
            .map_err(|e| AppError::unexpected(format!("failed to execute request: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::unexpected(format!("failed to read response: {e}")))?;

        if status != StatusCode::OK {
            return Err(AppError::unexpected(format!(
                "failed to get profile with status {status}: {body}"
            )));
        }

        let rows: Vec<ProfileNameRow> = serde_json::from_str(&body)
            .map_err(|e| AppError::unexpected(format!("failed to parse response: {e}")))?;

        match rows.into_iter().next() {
            Some(row) => Ok(row.name),
            None => Err(AppError::not_found("profile not found")),
        }
    }
}

#[async_trait]
impl IdentityRepository for SupabaseIdentityRepository {
    #[tracing::instrument(name = "Creating identity in Supabase", skip_all)]
    async fn create(
        &self,
        email: &str,
        password: &Secret<String>,
        metadata: SignupMetadata,
    ) -> Result<User, AppError> {
        let url = format!("{}/auth/v1/signup", self.config.base_url);
        let request_body = SignupBody {
            email,
            password: password.expose_secret(),
            data: SignupData {
                username: metadata.username.as_deref(),
            },
        };

        let response = self
            .http_client
            .post(url)
            .header(APIKEY_HEADER, self.config.service_role_key.expose_secret())
            .bearer_auth(self.config.service_role_key.expose_secret())
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::unexpected(format!("failed to execute request: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::unexpected(format!("failed to read response: {e}")))?;

        if status != StatusCode::OK && status != StatusCode::CREATED {
            return Err(AppError::unexpected(format!(
                "signup failed with status {status}: {body}"
            )));
        }

        let parsed: SignupResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::unexpected(format!("failed to parse response: {e}")))?;

        Ok(User::new(
            parsed.id,
            parsed.email,
            metadata.username.unwrap_or_default(),
        ))
    }

    #[tracing::instrument(name = "Authenticating against Supabase", skip_all)]
    async fn authenticate(
        &self,
        email: &str,
        password: &Secret<String>,
    ) -> Result<AuthResult, AppError> {
        let url = format!(
            "{}/auth/v1/token?grant_type=password",
            self.config.base_url
        );
        let request_body = PasswordGrantBody {
            email,
            password: password.expose_secret(),
        };

        let response = self
            .http_client
            .post(url)
            .header(APIKEY_HEADER, self.config.service_role_key.expose_secret())
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::unexpected(format!("failed to execute request: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::unexpected(format!("failed to read response: {e}")))?;

        if status != StatusCode::OK {
            if status == StatusCode::BAD_REQUEST && body.contains(EMAIL_NOT_CONFIRMED_MARKER) {
                return Err(AppError::EmailNotConfirmed);
            }
            return Err(AppError::unexpected(format!(
                "authentication failed with status {status}: {body}"
            )));
        }

        let parsed: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::unexpected(format!("failed to parse response: {e}")))?;

        Ok(AuthResult {
            // Username resolution needs a separate get_current_user call.
            user: User::new(parsed.user.id, parsed.user.email, ""),
            access_token: parsed.access_token,
            refresh_token: parsed.refresh_token,
            // The provider's own token lifetime is not introspected.
            expires_at: Utc::now() + Duration::hours(24),
        })
    }

    #[tracing::instrument(name = "Fetching current user from Supabase", skip_all)]
    async fn get_current_user(&self, access_token: &str) -> Result<User, AppError> {
        let url = format!("{}/auth/v1/user", self.config.base_url);

        let response = self
            .http_client
            .get(url)
            .header(APIKEY_HEADER, self.config.service_role_key.expose_secret())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::unexpected(format!("failed to execute request: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::unexpected(format!("failed to read response: {e}")))?;

        if status != StatusCode::OK {
            return Err(AppError::unexpected(format!(
                "failed to get user info with status {status}: {body}"
            )));
        }

        let parsed: CurrentUserResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::unexpected(format!("failed to parse response: {e}")))?;

        // Profile store of record wins; provider metadata is only consulted
        // when the profile lookup fails for any reason.
        let username = match self.fetch_profile_name(&parsed.id).await {
            Ok(name) => name,
            Err(_) => parsed.user_metadata.username.unwrap_or_default(),
        };

        Ok(User::new(parsed.id, parsed.email, username))
    }

    #[tracing::instrument(name = "Revoking Supabase session", skip_all)]
    async fn logout(&self, access_token: &str) -> Result<(), AppError> {
        let url = format!("{}/auth/v1/logout", self.config.base_url);

        let response = self
            .http_client
            .post(url)
            .header(APIKEY_HEADER, self.config.service_role_key.expose_secret())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::unexpected(format!("failed to execute request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| AppError::unexpected(format!("failed to read response: {e}")))?;
            return Err(AppError::unexpected(format!(
                "logout failed with status {status}: {body}"
            )));
        }

        Ok(())
    }

    async fn find_by_id(&self, _id: &str) -> Result<User, AppError> {
        Err(not_implemented("find_by_id"))
    }

    async fn find_by_email(&self, _email: &str) -> Result<User, AppError> {
        Err(not_implemented("find_by_email"))
    }

    async fn update(&self, _user: &User) -> Result<(), AppError> {
        Err(not_implemented("update"))
    }

    async fn delete(&self, _id: &str) -> Result<(), AppError> {
        Err(not_implemented("delete"))
    }
}

// Admin-API operations are a known gap; they fail loudly rather than no-op.
fn not_implemented(operation: &str) -> AppError {
    AppError::unexpected(format!("{operation} is not implemented"))
}

#[derive(Debug, Serialize)]
struct SignupBody<'a> {
    email: &'a str,
    password: &'a str,
    data: SignupData<'a>,
}

#[derive(Debug, Serialize)]
struct SignupData<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct PasswordGrantBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct SignupResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    email: String,
}

#[derive(Debug, Default, Deserialize)]
struct SessionUser {
    #[serde(default)]
    id: String,
    #[serde(default)]
    email: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    refresh_token: String,
    #[serde(default)]
    user: SessionUser,
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CurrentUserResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Debug, Deserialize)]
struct ProfileNameRow {
    #[serde(default)]
    name: String,
}
