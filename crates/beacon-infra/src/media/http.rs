//! HTTP client for the external image host.

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use beacon_core::ports::{ImageUpload, MediaError, MediaStore};

/// Configuration for the external image host.
#[derive(Debug, Clone)]
pub struct HttpMediaStoreConfig {
    /// Full upload endpoint URL.
    pub upload_url: String,
    pub api_key: Option<String>,
    /// Folder/prefix the host files uploads under.
    pub folder: Option<String>,
}

/// Forwards accepted image bytes to the external host and returns the stable
/// URL the host assigns. No retry: a failed upload fails the write.
pub struct HttpMediaStore {
    client: reqwest::Client,
    config: HttpMediaStoreConfig,
}

#[derive(Debug, Deserialize)]
struct UploadReply {
    secure_url: Option<String>,
    url: Option<String>,
}

impl HttpMediaStore {
    pub fn new(config: HttpMediaStoreConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn store(&self, upload: ImageUpload) -> Result<String, MediaError> {
        let filename = upload.filename.clone();
        let part = multipart::Part::bytes(upload.bytes).file_name(upload.filename);

        let mut form = multipart::Form::new().part("file", part);
        if let Some(folder) = &self.config.folder {
            form = form.text("folder", folder.clone());
        }

        let mut request = self.client.post(&self.config.upload_url).multipart(form);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MediaError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MediaError::Transport(format!(
                "upload endpoint returned {status}"
            )));
        }

        let reply: UploadReply = response
            .json()
            .await
            .map_err(|e| MediaError::BadResponse(e.to_string()))?;

        let stored_url = reply
            .secure_url
            .or(reply.url)
            .ok_or_else(|| MediaError::BadResponse("response carries no url".to_string()))?;

        tracing::debug!(%filename, url = %stored_url, "Image stored");
        Ok(stored_url)
    }
}
