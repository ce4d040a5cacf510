use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use identity_application::{CreateProfileRequest, ProfileUsecase, UpdateProfileRequest};
use identity_core::ProfileRepository;

use super::error::ApiError;

#[tracing::instrument(name = "Get profile", skip(usecase))]
pub async fn get_profile<P>(
    State(usecase): State<Arc<ProfileUsecase<P>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    P: ProfileRepository + 'static,
{
    let profile = usecase.get_profile(&id).await?;

    Ok(Json(profile))
}

#[tracing::instrument(name = "Create profile", skip_all)]
pub async fn create_profile<P>(
    State(usecase): State<Arc<ProfileUsecase<P>>>,
    Json(request): Json<CreateProfileRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    P: ProfileRepository + 'static,
{
    let profile = usecase.create_profile(request).await?;

    Ok((StatusCode::CREATED, Json(profile)))
}

#[tracing::instrument(name = "Update profile", skip(usecase, request))]
pub async fn update_profile<P>(
    State(usecase): State<Arc<ProfileUsecase<P>>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    P: ProfileRepository + 'static,
{
    let profile = usecase.update_profile(&id, request).await?;

    Ok(Json(profile))
}
