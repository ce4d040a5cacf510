pub mod use_cases;

pub use use_cases::auth::{
    AuthUsecase, LoginRequest, LoginResponse, SignupRequest, UserResponse,
};
pub use use_cases::profile::{
    CreateProfileRequest, ProfileResponse, ProfileUsecase, UpdateProfileRequest,
};
