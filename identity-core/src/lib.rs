pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    error::{AppError, DomainCode},
    profile::Profile,
    user::{AuthResult, User},
};

pub use ports::repositories::{IdentityRepository, ProfileRepository, SignupMetadata};

pub use services::auth_service::AuthService;
