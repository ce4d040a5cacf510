use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use identity_core::{AppError, DomainCode};

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Boundary error for the HTTP edge.
///
/// Classification happens in the core; this type only chooses status codes
/// and adds the edge's own missing-token case.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing bearer token")]
    MissingToken,

    #[error(transparent)]
    Core(#[from] AppError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            ApiError::MissingToken => StatusCode::BAD_REQUEST,
            ApiError::Core(err) => match err {
                AppError::Validation { .. } => StatusCode::BAD_REQUEST,
                AppError::Domain { code, .. } => match code {
                    DomainCode::NotFound => StatusCode::NOT_FOUND,
                },
                AppError::EmailNotConfirmed => StatusCode::FORBIDDEN,
                AppError::Unexpected(message) => {
                    // The core stays quiet on the error path; opaque failures
                    // get logged here at the boundary.
                    tracing::error!(error = %message, "request failed with an unexpected error");
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status_code, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn validation_maps_to_400() {
        let err = ApiError::from(AppError::validation("name", "name is required"));
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::from(AppError::not_found("profile not found"));
        assert_eq!(status_of(err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unconfirmed_email_maps_to_403() {
        let err = ApiError::from(AppError::EmailNotConfirmed);
        assert_eq!(status_of(err), StatusCode::FORBIDDEN);
    }

    #[test]
    fn opaque_failures_map_to_500() {
        let err = ApiError::from(AppError::unexpected("connection reset"));
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_token_maps_to_400() {
        assert_eq!(status_of(ApiError::MissingToken), StatusCode::BAD_REQUEST);
    }
}
