use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Audience of a travel note
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    #[default]
    Personal,
    Group,
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostType::Personal => write!(f, "personal"),
            PostType::Group => write!(f, "group"),
        }
    }
}

/// Travel note as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Cover image, chosen by the server from the region
    #[serde(default)]
    pub image_url: String,
    pub region_code: String,
    /// Display name, e.g. "서울특별시 강남구"
    #[serde(default)]
    pub region_name: String,
    pub author_id: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
