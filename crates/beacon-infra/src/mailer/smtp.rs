//! SMTP mailer built on lettre.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use beacon_core::ports::{MailError, MailMessage, Mailer};

/// SMTP relay configuration. The sender address doubles as the relay login,
/// matching the upstream mail provider's setup.
#[derive(Debug, Clone)]
pub struct SmtpMailerConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    /// The single fixed recipient for every form submission.
    pub recipient: String,
}

/// lettre-based SMTP mailer. One pooled transport is built at startup and
/// shared by all handlers.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Address,
    recipient: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: SmtpMailerConfig) -> Result<Self, MailError> {
        let sender: Address = config
            .username
            .parse()
            .map_err(|e| MailError::Config(format!("sender address: {e}")))?;
        let recipient: Mailbox = config
            .recipient
            .parse()
            .map_err(|e| MailError::Config(format!("recipient address: {e}")))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| MailError::Config(e.to_string()))?
            .credentials(Credentials::new(config.username, config.password))
            .build();

        tracing::info!(host = %config.host, "SMTP mailer configured");

        Ok(Self {
            transport,
            sender,
            recipient,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        let from = Mailbox::new(Some(message.sender_label), self.sender.clone());

        let email = Message::builder()
            .from(from)
            .to(self.recipient.clone())
            .subject(message.subject)
            .header(ContentType::TEXT_HTML)
            .body(message.html_body)
            .map_err(|e| MailError::Config(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map(|_| ())
            .map_err(|e| MailError::Transport(e.to_string()))
    }
}
