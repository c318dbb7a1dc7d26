//! # Mail
//!
//! The [`Mailer`] port, the enquiry email template, and [`OutboxMailer`],
//! an in-memory adapter that records messages instead of delivering them.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::MailError;

/// A plain-text email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Sender address.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Fixed sender/recipient pair for notification mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailRoute {
    /// Sender address.
    pub from: String,
    /// Recipient address.
    pub to: String,
}

/// Build the enquiry notification for `item_name`.
pub fn enquiry_email(item_name: &str, route: &MailRoute) -> EmailMessage {
    EmailMessage {
        from: route.from.clone(),
        to: route.to.clone(),
        subject: format!("Enquiry about: {item_name}"),
        body: format!("A user is interested in the item: {item_name}"),
    }
}

/// Delivers email.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message.
    async fn send(&self, message: EmailMessage) -> Result<(), MailError>;
}

/// Records every message in memory.
///
/// Used when no SMTP transport is configured, and by tests to observe what
/// would have been sent. Clones share the same outbox.
#[derive(Debug, Clone, Default)]
pub struct OutboxMailer {
    sent: Arc<RwLock<Vec<EmailMessage>>>,
}

impl OutboxMailer {
    /// Create an empty outbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages recorded so far, oldest first.
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.read().clone()
    }

    /// Number of recorded messages.
    pub fn len(&self) -> usize {
        self.sent.read().len()
    }

    /// Whether nothing has been sent.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Mailer for OutboxMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), MailError> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            "mail transport not configured; message kept in outbox"
        );
        self.sent.write().push(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route() -> MailRoute {
        MailRoute {
            from: "shop@example.com".into(),
            to: "owner@example.com".into(),
        }
    }

    #[test]
    fn enquiry_template() {
        let msg = enquiry_email("Chair", &route());
        assert_eq!(msg.subject, "Enquiry about: Chair");
        assert_eq!(msg.body, "A user is interested in the item: Chair");
        assert_eq!(msg.from, "shop@example.com");
        assert_eq!(msg.to, "owner@example.com");
    }

    #[tokio::test]
    async fn outbox_records_messages_in_order() {
        let outbox = OutboxMailer::new();
        assert!(outbox.is_empty());
        outbox.send(enquiry_email("Chair", &route())).await.unwrap();
        outbox.send(enquiry_email("Table", &route())).await.unwrap();

        let sent = outbox.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent[0].subject.contains("Chair"));
        assert!(sent[1].subject.contains("Table"));
    }

    #[tokio::test]
    async fn outbox_clones_share_messages() {
        let outbox = OutboxMailer::new();
        let handle = outbox.clone();
        outbox.send(enquiry_email("Lamp", &route())).await.unwrap();
        assert_eq!(handle.len(), 1);
    }
}
