mod session;

pub mod dtos;
pub mod guards;
pub mod services;

pub use guards::require_session;
pub use services::AuthClient;
pub use session::{CredentialStore, MemoryCredentialStore};
