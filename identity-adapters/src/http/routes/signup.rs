use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use identity_application::{AuthUsecase, SignupRequest};
use identity_core::IdentityRepository;

use super::error::ApiError;

#[tracing::instrument(name = "Signup", skip_all)]
pub async fn signup<R>(
    State(usecase): State<Arc<AuthUsecase<R>>>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: IdentityRepository + 'static,
{
    let user = usecase.signup(request).await?;

    Ok((StatusCode::CREATED, Json(user)))
}
