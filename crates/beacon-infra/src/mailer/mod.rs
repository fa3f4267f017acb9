//! Mail transport implementations.

#[cfg(feature = "smtp")]
mod smtp;

#[cfg(feature = "smtp")]
pub use smtp::{SmtpMailer, SmtpMailerConfig};

use async_trait::async_trait;

use beacon_core::ports::{MailError, MailMessage, Mailer};

/// Mailer used when SMTP credentials are not configured: every submission
/// fails with a delivery error instead of silently dropping mail.
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        tracing::warn!(
            subject = %message.subject,
            "Mail transport not configured, dropping submission"
        );
        Err(MailError::NotConfigured)
    }
}
