//! Outbound mail port.

use async_trait::async_trait;

/// A rendered email ready for the transport. The recipient and the sender
/// address are transport configuration; only the display label varies per
/// form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub sender_label: String,
    pub subject: String,
    pub html_body: String,
}

/// Mail transport. Synchronous from the caller's perspective: `send`
/// resolves once the transport has accepted or rejected the message. No
/// retry or queueing happens behind this trait.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: MailMessage) -> Result<(), MailError>;
}

/// Mail delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Mail transport is not configured")]
    NotConfigured,

    #[error("Mail transport failed: {0}")]
    Transport(String),

    #[error("Invalid mail configuration: {0}")]
    Config(String),
}
