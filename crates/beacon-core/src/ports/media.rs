//! Image storage port and upload validation.

use async_trait::async_trait;

/// Extensions accepted without further configuration.
const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// One uploaded image, already read off the wire.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// External image storage. Returns the stable reference URL for an accepted
/// upload.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn store(&self, upload: ImageUpload) -> Result<String, MediaError>;
}

/// Media store errors - failures talking to the external host.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Image storage is not configured")]
    NotConfigured,

    #[error("Image storage request failed: {0}")]
    Transport(String),

    #[error("Image storage returned an unusable response: {0}")]
    BadResponse(String),
}

/// Upload rejection reasons. Rejection always happens before any store
/// mutation.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("File exceeds the {limit} byte upload limit")]
    TooLarge { limit: usize },

    #[error("File type '{0}' is not allowed")]
    UnsupportedFormat(String),

    #[error("Upload is missing a filename")]
    MissingFilename,
}

/// Allow-list and size limit applied to every incoming file.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_bytes: usize,
    pub allow_gif: bool,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            allow_gif: false,
        }
    }
}

impl UploadPolicy {
    /// Validate a candidate file before any bytes are forwarded or stored.
    pub fn validate(&self, filename: &str, size: usize) -> Result<(), UploadError> {
        if size > self.max_bytes {
            return Err(UploadError::TooLarge {
                limit: self.max_bytes,
            });
        }

        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .ok_or(UploadError::MissingFilename)?;

        let allowed = ALLOWED_EXTENSIONS.contains(&extension.as_str())
            || (self.allow_gif && extension == "gif");

        if !allowed {
            return Err(UploadError::UnsupportedFormat(extension));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_allowed_extensions() {
        let policy = UploadPolicy::default();
        for name in ["a.jpg", "b.JPEG", "c.png", "d.webp"] {
            assert!(policy.validate(name, 1024).is_ok(), "{name} rejected");
        }
    }

    #[test]
    fn rejects_disallowed_extension() {
        let policy = UploadPolicy::default();
        assert!(matches!(
            policy.validate("malware.exe", 10),
            Err(UploadError::UnsupportedFormat(ext)) if ext == "exe"
        ));
    }

    #[test]
    fn gif_is_configuration_dependent() {
        let strict = UploadPolicy::default();
        assert!(strict.validate("anim.gif", 10).is_err());

        let relaxed = UploadPolicy {
            allow_gif: true,
            ..UploadPolicy::default()
        };
        assert!(relaxed.validate("anim.gif", 10).is_ok());
    }

    #[test]
    fn rejects_oversized_file() {
        let policy = UploadPolicy {
            max_bytes: 100,
            allow_gif: false,
        };
        assert!(matches!(
            policy.validate("big.png", 101),
            Err(UploadError::TooLarge { limit: 100 })
        ));
        assert!(policy.validate("ok.png", 100).is_ok());
    }

    #[test]
    fn rejects_missing_extension() {
        let policy = UploadPolicy::default();
        assert!(matches!(
            policy.validate("noextension", 10),
            Err(UploadError::MissingFilename)
        ));
    }
}
