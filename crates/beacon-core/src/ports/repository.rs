use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Post;
use crate::error::RepoError;

/// Post repository - the sole owner of post lifetime.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post by its unique id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// All posts ordered by creation time, newest first.
    /// An empty store yields an empty vector, never an error.
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError>;

    /// Persist a new post. The id must not already exist.
    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    /// Overwrite an existing post, `RepoError::NotFound` when the id is unknown.
    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    /// Permanently remove a post, `RepoError::NotFound` when the id is unknown.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}
