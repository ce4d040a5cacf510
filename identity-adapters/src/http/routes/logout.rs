use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use identity_application::AuthUsecase;
use identity_core::IdentityRepository;

use super::{bearer_token, error::ApiError};

#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout<R>(
    State(usecase): State<Arc<AuthUsecase<R>>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError>
where
    R: IdentityRepository + 'static,
{
    let token = bearer_token(&headers)?;

    usecase.logout(token).await?;

    Ok(StatusCode::NO_CONTENT)
}
