use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::posts::models::PostType;
use crate::shared::validation::REGION_CODE_REGEX;

/// Request DTO for creating a post. The cover image is assigned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostPayload {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    #[validate(regex(path = *REGION_CODE_REGEX, message = "Region code is invalid"))]
    pub region_code: String,

    #[serde(rename = "type")]
    pub post_type: PostType,
}

/// Request DTO for updating a post; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostPayload {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Content must not be empty"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub post_type: Option<PostType>,
}
