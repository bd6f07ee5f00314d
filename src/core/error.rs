use thiserror::Error;

use crate::features::regions::RegionError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// No credential is stored; the caller should send the user to `redirect_to`.
    #[error("Unauthorized: login required at {redirect_to}")]
    Unauthorized { redirect_to: String },

    /// The API rejected the stored credential. The credential has already been cleared.
    #[error("Session expired: login required at {redirect_to}")]
    SessionExpired { redirect_to: String },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Region selection error: {0}")]
    Region(#[from] RegionError),
}

impl AppError {
    /// Login entry point to navigate to, if this error demands re-authentication
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            AppError::Unauthorized { redirect_to } | AppError::SessionExpired { redirect_to } => {
                Some(redirect_to)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
