//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use beacon_core::domain::Post;

/// Request to log in as the operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login outcome for JSON callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// JSON body accepted by the add/edit blog endpoints. Multipart requests
/// carry the same fields plus the `image` file part.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// Raw image reference; accepted only as an absolute http(s) URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Optional creation-timestamp override (editorial republish).
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// A post as presented to readers: the image reference is normalized to the
/// placeholder when the stored value is unusable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            content: post.content.clone(),
            image_url: post.display_image_url().to_string(),
            created_at: post.created_at,
        }
    }
}

/// Response to a successful blog mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogMutationResponse {
    pub message: String,
    pub blog: PostResponse,
}

/// Bare acknowledgment (delete, logout).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Contact-form submission outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendResponse {
    pub success: bool,
    pub message: String,
}
