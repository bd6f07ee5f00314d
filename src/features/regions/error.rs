use thiserror::Error;

/// Errors of the region directory and the selection resolver.
///
/// Cloneable so the same error can be returned to the caller and reported to
/// the selection observer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionError {
    #[error("Region not found: {0}")]
    NotFound(String),

    #[error("Region directory unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Region selector has been disposed")]
    Disposed,

    #[error("Invalid region directory: {0}")]
    InvalidDirectory(String),
}

pub type RegionResult<T> = std::result::Result<T, RegionError>;
