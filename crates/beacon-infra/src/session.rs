//! Cache-backed operator session store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use beacon_core::ports::{Cache, SessionError, SessionStore};

const SESSION_KEY_PREFIX: &str = "session:";
const SESSION_MARKER: &str = "operator";

/// Session store layered on the [`Cache`] port, so sessions live in memory
/// for a single instance and in Redis when one is configured. The cache TTL
/// doubles as the idle expiry: every successful verification re-arms it.
pub struct CacheSessionStore {
    cache: Arc<dyn Cache>,
    ttl: Duration,
}

impl CacheSessionStore {
    pub fn new(cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    fn key(token: &str) -> String {
        format!("{SESSION_KEY_PREFIX}{token}")
    }
}

#[async_trait]
impl SessionStore for CacheSessionStore {
    async fn begin(&self) -> Result<String, SessionError> {
        let token = Uuid::new_v4().to_string();
        self.cache
            .set(&Self::key(&token), SESSION_MARKER, Some(self.ttl))
            .await
            .map_err(|e| SessionError::Backend(e.to_string()))?;

        tracing::debug!("Operator session opened");
        Ok(token)
    }

    async fn verify(&self, token: &str) -> bool {
        let key = Self::key(token);
        if self.cache.get(&key).await.is_none() {
            return false;
        }

        // Idle expiry: a live session gets its TTL re-armed on every check.
        if let Err(e) = self.cache.set(&key, SESSION_MARKER, Some(self.ttl)).await {
            tracing::warn!(error = %e, "Failed to refresh session TTL");
        }
        true
    }

    async fn revoke(&self, token: &str) -> Result<(), SessionError> {
        self.cache
            .delete(&Self::key(token))
            .await
            .map_err(|e| SessionError::Backend(e.to_string()))
    }
}
