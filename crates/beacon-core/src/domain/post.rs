use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Fallback image shown for posts without a usable image reference.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://res.cloudinary.com/demo/image/upload/w_800,h_450,c_fill,e_blur:200/sample.jpg";

/// Post entity - a single blog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating or overwriting a post.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl PostDraft {
    fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation("title is required".into()));
        }
        if self.content.trim().is_empty() {
            return Err(DomainError::Validation("content is required".into()));
        }
        Ok(())
    }
}

impl Post {
    /// Create a new post with a generated id and default timestamp.
    pub fn create(draft: PostDraft) -> Result<Self, DomainError> {
        draft.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            title: draft.title,
            content: draft.content,
            image_url: draft.image_url,
            created_at: draft.created_at.unwrap_or_else(Utc::now),
        })
    }

    /// Overwrite every field from the draft. Fields the draft leaves unset
    /// (image, timestamp) retain their current values.
    pub fn apply(&mut self, draft: PostDraft) -> Result<(), DomainError> {
        draft.validate()?;
        self.title = draft.title;
        self.content = draft.content;
        if let Some(image_url) = draft.image_url {
            self.image_url = Some(image_url);
        }
        if let Some(created_at) = draft.created_at {
            self.created_at = created_at;
        }
        Ok(())
    }

    /// The image URL readers should see: the stored reference when it is a
    /// well-formed absolute URL, the placeholder otherwise. Applied at read
    /// time only; the stored value is never rewritten.
    pub fn display_image_url(&self) -> &str {
        match &self.image_url {
            Some(url) if is_absolute_http_url(url) => url,
            _ => PLACEHOLDER_IMAGE_URL,
        }
    }
}

/// True for `http://` and `https://` URLs, case-insensitive.
pub fn is_absolute_http_url(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    (lower.starts_with("http://") && lower.len() > "http://".len())
        || (lower.starts_with("https://") && lower.len() > "https://".len())
}
