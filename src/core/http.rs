use std::sync::Arc;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::config::HttpConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::CredentialStore;

/// JSON client for the travel-note API.
///
/// Attaches the stored bearer credential to every request. An HTTP 401 clears
/// the credential and surfaces [`AppError::SessionExpired`] so the page layer
/// can send the user back to the login entry point.
pub struct ApiClient {
    base_url: String,
    http_client: reqwest::Client,
    credentials: Arc<dyn CredentialStore>,
    login_path: String,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        http: &HttpConfig,
        credentials: Arc<dyn CredentialStore>,
        login_path: impl Into<String>,
    ) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(http.user_agent.as_str())
            .timeout(http.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
            credentials,
            login_path: login_path.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.http_client.get(self.url(path));
        let response = self.send(request).await?;
        Self::parse(response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http_client.post(self.url(path)).json(body);
        let response = self.send(request).await?;
        Self::parse(response).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http_client.put(self.url(path)).json(body);
        let response = self.send(request).await?;
        Self::parse(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        let request = self.http_client.delete(self.url(path));
        self.send(request).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = match self.credentials.token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            tracing::error!("Request to {} failed: {}", self.base_url, e);
            AppError::ExternalServiceError(format!("Request failed: {}", e))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!("API error: HTTP {} - {}", status, body);

        Err(match status {
            StatusCode::UNAUTHORIZED => {
                tracing::warn!("401 Unauthorized: stored credential is invalid or expired");
                self.credentials.clear().await;
                AppError::SessionExpired {
                    redirect_to: self.login_path.clone(),
                }
            }
            StatusCode::FORBIDDEN => AppError::Forbidden(body),
            StatusCode::NOT_FOUND => AppError::NotFound(body),
            StatusCode::CONFLICT => AppError::Conflict(body),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                AppError::BadRequest(body)
            }
            _ => {
                tracing::error!("API error: HTTP {} - {}", status, body);
                AppError::ExternalServiceError(format!("HTTP {} - {}", status, body))
            }
        })
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse API response: {}", e);
            AppError::Internal(format!("Failed to parse API response: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::MemoryCredentialStore;
    use crate::shared::test_helpers::spawn_api;
    use axum::{http::HeaderMap, routing::get, Json, Router};

    async fn whoami(headers: HeaderMap) -> std::result::Result<Json<String>, StatusCode> {
        match headers.get("authorization").and_then(|v| v.to_str().ok()) {
            Some("Bearer good-token") => Ok(Json("traveller".to_string())),
            _ => Err(StatusCode::UNAUTHORIZED),
        }
    }

    fn client(base_url: String, store: Arc<MemoryCredentialStore>) -> ApiClient {
        ApiClient::new(base_url, &HttpConfig::default(), store, "/login").unwrap()
    }

    #[tokio::test]
    async fn test_bearer_token_attached() {
        let base_url = spawn_api(Router::new().route("/whoami", get(whoami))).await;
        let store = Arc::new(MemoryCredentialStore::with_token("good-token"));

        let name: String = client(base_url, store).get_json("/whoami").await.unwrap();
        assert_eq!(name, "traveller");
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session() {
        let base_url = spawn_api(Router::new().route("/whoami", get(whoami))).await;
        let store = Arc::new(MemoryCredentialStore::with_token("stale-token"));

        let err = client(base_url, Arc::clone(&store))
            .get_json::<String>("/whoami")
            .await
            .unwrap_err();

        assert_eq!(err.redirect_target(), Some("/login"));
        assert!(matches!(err, AppError::SessionExpired { .. }));
        assert_eq!(store.token().await, None);
    }

    #[tokio::test]
    async fn test_not_found_maps_to_app_error() {
        let base_url = spawn_api(Router::new()).await;
        let store = Arc::new(MemoryCredentialStore::new());

        let err = client(base_url, store)
            .get_json::<String>("/missing")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
