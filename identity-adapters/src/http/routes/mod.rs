pub mod error;
pub mod login;
pub mod logout;
pub mod me;
pub mod profile;
pub mod signup;

pub use error::ApiError;
pub use login::login;
pub use logout::logout;
pub use me::me;
pub use profile::{create_profile, get_profile, update_profile};
pub use signup::signup;

use axum::http::{HeaderMap, header};

/// Pulls the bearer credential out of the `Authorization` header.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(ApiError::MissingToken)
}
