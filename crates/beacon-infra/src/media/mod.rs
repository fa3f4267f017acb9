//! Image storage implementations.

mod http;

pub use http::{HttpMediaStore, HttpMediaStoreConfig};

use async_trait::async_trait;

use beacon_core::ports::{ImageUpload, MediaError, MediaStore};

/// Media store used when no upload endpoint is configured: file uploads fail
/// cleanly before any post is written.
pub struct UnconfiguredMediaStore;

#[async_trait]
impl MediaStore for UnconfiguredMediaStore {
    async fn store(&self, upload: ImageUpload) -> Result<String, MediaError> {
        tracing::warn!(
            filename = %upload.filename,
            "Image storage not configured, rejecting upload"
        );
        Err(MediaError::NotConfigured)
    }
}
