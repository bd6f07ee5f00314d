use std::sync::Arc;

use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::http::ApiClient;
use crate::features::posts::dtos::{CreatePostPayload, UpdatePostPayload};
use crate::features::posts::models::Post;

/// Travel-note CRUD over the API
pub struct PostClient {
    api: Arc<ApiClient>,
}

impl PostClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn create(&self, payload: &CreatePostPayload) -> Result<Post> {
        payload
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let post: Post = self.api.post_json("/posts", payload).await?;
        tracing::info!("Created post {} in region {}", post.id, post.region_code);
        Ok(post)
    }

    /// Posts attached to a province or district code
    pub async fn list_by_region(&self, region_code: &str) -> Result<Vec<Post>> {
        let path = format!("/posts/region/{}", urlencoding::encode(region_code));
        tracing::debug!("Fetching posts for region {}", region_code);
        self.api.get_json(&path).await
    }

    pub async fn get(&self, id: &str) -> Result<Post> {
        self.api.get_json(&Self::post_path(id)).await
    }

    pub async fn update(&self, id: &str, payload: &UpdatePostPayload) -> Result<Post> {
        payload
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        self.api.put_json(&Self::post_path(id), payload).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.api.delete(&Self::post_path(id)).await?;
        tracing::info!("Deleted post {}", id);
        Ok(())
    }

    fn post_path(id: &str) -> String {
        format!("/posts/{}", urlencoding::encode(id))
    }
}
