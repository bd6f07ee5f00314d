use std::sync::Arc;

use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::http::ApiClient;
use crate::features::auth::dtos::{
    LoginRequestDto, LoginResponseDto, RegisterRequestDto, RegisterResponseDto,
};

/// Login, registration and logout against the travel-note API
pub struct AuthClient {
    api: Arc<ApiClient>,
}

impl AuthClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Log in and keep the returned token for later requests
    pub async fn login(&self, dto: LoginRequestDto) -> Result<LoginResponseDto> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let response: LoginResponseDto = self
            .api
            .post_json("/auth/login", &dto)
            .await
            .map_err(|e| match e {
                // A rejected login is not an expired session
                AppError::SessionExpired { .. } => {
                    AppError::BadRequest("Invalid email or password".to_string())
                }
                other => other,
            })?;

        self.api
            .credentials()
            .store(response.token.clone())
            .await;
        tracing::info!("Logged in as {}", dto.email);
        Ok(response)
    }

    pub async fn register(&self, dto: RegisterRequestDto) -> Result<RegisterResponseDto> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let response: RegisterResponseDto = self.api.post_json("/auth/register", &dto).await?;
        tracing::info!("Registered {}", dto.email);
        Ok(response)
    }

    /// Forget the stored token. Purely local; the API is not contacted.
    pub async fn logout(&self) {
        self.api.credentials().clear().await;
        tracing::info!("User logged out");
    }
}
