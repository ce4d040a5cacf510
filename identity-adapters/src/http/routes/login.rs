use axum::{Json, extract::State, response::IntoResponse};
use std::sync::Arc;

use identity_application::{AuthUsecase, LoginRequest};
use identity_core::IdentityRepository;

use super::error::ApiError;

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<R>(
    State(usecase): State<Arc<AuthUsecase<R>>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: IdentityRepository + 'static,
{
    let response = usecase.login(request).await?;

    Ok(Json(response))
}
