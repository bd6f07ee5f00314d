use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// Where the bearer credential lives between requests.
///
/// Injected into [`crate::core::http::ApiClient`] so nothing else in the
/// process touches the stored token.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn token(&self) -> Option<String>;
    async fn store(&self, token: String);
    async fn clear(&self);
}

struct StoredCredential {
    token: String,
    stored_at: DateTime<Utc>,
}

/// Process-local credential store
#[derive(Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<Option<StoredCredential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            inner: RwLock::new(Some(StoredCredential {
                token: token.into(),
                stored_at: Utc::now(),
            })),
        }
    }

    /// When the current credential was stored, if any
    pub async fn stored_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().await.as_ref().map(|c| c.stored_at)
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn token(&self) -> Option<String> {
        self.inner.read().await.as_ref().map(|c| c.token.clone())
    }

    async fn store(&self, token: String) {
        let mut inner = self.inner.write().await;
        *inner = Some(StoredCredential {
            token,
            stored_at: Utc::now(),
        });
    }

    async fn clear(&self) {
        let mut inner = self.inner.write().await;
        if inner.take().is_some() {
            tracing::debug!("Stored credential cleared");
        }
    }
}
