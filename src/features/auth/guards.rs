//! Session guard for pages that require a logged-in user.

use crate::core::error::{AppError, Result};
use crate::features::auth::session::CredentialStore;

/// Return the stored token, or `Unauthorized` pointing at the login page.
///
/// # Example
/// ```ignore
/// let token = require_session(store.as_ref(), &config.app.login_path).await?;
/// ```
pub async fn require_session(store: &dyn CredentialStore, login_path: &str) -> Result<String> {
    store.token().await.ok_or_else(|| {
        tracing::debug!("No stored credential; redirecting to {}", login_path);
        AppError::Unauthorized {
            redirect_to: login_path.to_string(),
        }
    })
}
