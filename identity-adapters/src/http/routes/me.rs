use axum::{Json, extract::State, http::HeaderMap, response::IntoResponse};
use std::sync::Arc;

use identity_application::AuthUsecase;
use identity_core::IdentityRepository;

use super::{bearer_token, error::ApiError};

#[tracing::instrument(name = "Current user", skip_all)]
pub async fn me<R>(
    State(usecase): State<Arc<AuthUsecase<R>>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError>
where
    R: IdentityRepository + 'static,
{
    let token = bearer_token(&headers)?;

    let user = usecase.current_user(token).await?;

    Ok(Json(user))
}
