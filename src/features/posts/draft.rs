use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::posts::dtos::CreatePostPayload;
use crate::features::posts::models::{Post, PostType};
use crate::features::posts::services::PostClient;
use crate::features::regions::SelectionEvent;

pub const REGION_REQUIRED_MESSAGE: &str = "게시물을 작성하려면 지역을 선택해야 합니다.";

/// Post being written on the creation page.
///
/// Follows the region selector through its [`SelectionEvent`]s: the most
/// specific code the selector emitted is the region the post is filed under.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub post_type: PostType,
    region_code: String,
    region_name: String,
    region_error: Option<String>,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>, post_type: PostType) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            post_type,
            ..Default::default()
        }
    }

    /// Track one selector notification
    pub fn apply(&mut self, event: &SelectionEvent) {
        match event {
            SelectionEvent::Selected { code, name } => {
                self.region_code = code.clone();
                self.region_name = name.clone();
                self.region_error = None;
            }
            SelectionEvent::Failed(error) => {
                self.region_error = Some(error.to_string());
            }
        }
    }

    pub fn region_code(&self) -> &str {
        &self.region_code
    }

    pub fn region_name(&self) -> &str {
        &self.region_name
    }

    /// Last region error reported since the selection changed
    pub fn region_error(&self) -> Option<&str> {
        self.region_error.as_deref()
    }

    pub fn build_payload(&self) -> Result<CreatePostPayload> {
        if self.region_code.is_empty() {
            return Err(AppError::Validation(REGION_REQUIRED_MESSAGE.to_string()));
        }

        let payload = CreatePostPayload {
            title: self.title.trim().to_string(),
            content: self.content.clone(),
            region_code: self.region_code.clone(),
            post_type: self.post_type,
        };
        payload
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        Ok(payload)
    }

    pub async fn submit(&self, posts: &PostClient) -> Result<Post> {
        let payload = self.build_payload()?;
        posts.create(&payload).await
    }
}
