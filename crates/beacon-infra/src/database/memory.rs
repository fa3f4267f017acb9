//! In-memory post repositories: a working store for development and tests,
//! and a stub that surfaces the degraded state when the database is down.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use beacon_core::domain::Post;
use beacon_core::error::RepoError;
use beacon_core::ports::PostRepository;

/// HashMap-backed post store. Used when no database is configured and in
/// handler tests; contents are lost on restart.
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self.posts.read().await.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        match posts.get_mut(&post.id) {
            Some(existing) => {
                *existing = post.clone();
                Ok(post)
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        match posts.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

/// Repository used when the database was configured but unreachable at
/// startup: the process stays up and every store-backed call fails.
pub struct UnavailablePostRepository;

impl UnavailablePostRepository {
    fn unavailable() -> RepoError {
        RepoError::Connection("post store is unavailable".to_string())
    }
}

#[async_trait]
impl PostRepository for UnavailablePostRepository {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Post>, RepoError> {
        Err(Self::unavailable())
    }

    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        Err(Self::unavailable())
    }

    async fn insert(&self, _post: Post) -> Result<Post, RepoError> {
        Err(Self::unavailable())
    }

    async fn update(&self, _post: Post) -> Result<Post, RepoError> {
        Err(Self::unavailable())
    }

    async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
        Err(Self::unavailable())
    }
}
