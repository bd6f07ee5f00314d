use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request DTO for user registration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Request DTO for user login
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response DTO for login
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponseDto {
    /// Bearer token for subsequent requests
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponseDto {
    pub message: String,
}
