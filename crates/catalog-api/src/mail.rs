//! # SMTP Mailer
//!
//! [`Mailer`] adapter delivering through an authenticated SMTP relay with
//! implicit TLS, using lettre's Tokio transport.

use async_trait::async_trait;
use catalog_core::{EmailMessage, MailError, Mailer};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;

/// Mailer backed by an SMTP relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer").finish_non_exhaustive()
    }
}

impl SmtpMailer {
    /// Build a relay transport from configuration. No connection is made
    /// until the first message is sent.
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| MailError::Transport(format!("invalid relay {}: {e}", config.host)))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();
        Ok(Self { transport })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), MailError> {
        let email = build_message(&message)?;
        self.transport
            .send(email)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;
        tracing::info!(to = %message.to, subject = %message.subject, "email sent");
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.parse().map_err(|e: lettre::address::AddressError| MailError::InvalidAddress {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

fn build_message(message: &EmailMessage) -> Result<Message, MailError> {
    Message::builder()
        .from(parse_mailbox(&message.from)?)
        .to(parse_mailbox(&message.to)?)
        .subject(message.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(message.body.clone())
        .map_err(|e| MailError::Build(e.to_string()))
}
