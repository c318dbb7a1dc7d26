//! # Application State
//!
//! Shared state passed to every handler via the `State` extractor. Handlers
//! depend only on the `catalog-core` ports held here; which adapters sit
//! behind them is decided once at startup.

use std::sync::Arc;

use catalog_core::{
    DiskImageStore, ImageStore, InMemoryItemRepository, ItemRepository, MailRoute, Mailer,
    OutboxMailer,
};

use crate::config::AppConfig;
use crate::mail::SmtpMailer;
use crate::middleware::metrics::ApiMetrics;

/// Shared application state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Item storage.
    pub items: Arc<dyn ItemRepository>,
    /// Uploaded image storage.
    pub images: Arc<dyn ImageStore>,
    /// Enquiry mail delivery.
    pub mailer: Arc<dyn Mailer>,
    /// Sender and recipient of enquiry mail.
    pub mail_route: MailRoute,
    /// Prometheus metrics.
    pub metrics: ApiMetrics,
    /// Service configuration.
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("mail_route", &self.mail_route)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Sender/recipient used when no SMTP transport is configured.
fn outbox_route() -> MailRoute {
    MailRoute {
        from: "catalog@localhost".to_string(),
        to: "enquiries@localhost".to_string(),
    }
}

impl AppState {
    /// Wire the default adapters for `config`: in-memory items, disk images,
    /// and SMTP mail when configured (otherwise the in-memory outbox).
    pub fn from_config(config: AppConfig) -> Result<Self, catalog_core::MailError> {
        let images = DiskImageStore::new(&config.upload_dir, &config.public_base_url);

        let (mailer, mail_route): (Arc<dyn Mailer>, MailRoute) = match &config.smtp {
            Some(smtp) => {
                tracing::info!(host = %smtp.host, port = smtp.port, "SMTP mailer configured");
                (Arc::new(SmtpMailer::new(smtp)?), smtp.route())
            }
            None => {
                tracing::warn!(
                    "EMAIL_USER/EMAIL_PASS/EMAIL_TO not set; enquiry emails are kept in memory only"
                );
                (Arc::new(OutboxMailer::new()), outbox_route())
            }
        };

        Ok(Self::with_ports(
            config,
            Arc::new(InMemoryItemRepository::new()),
            Arc::new(images),
            mailer,
            mail_route,
        ))
    }

    /// Assemble state from explicit adapters.
    pub fn with_ports(
        config: AppConfig,
        items: Arc<dyn ItemRepository>,
        images: Arc<dyn ImageStore>,
        mailer: Arc<dyn Mailer>,
        mail_route: MailRoute,
    ) -> Self {
        Self {
            items,
            images,
            mailer,
            mail_route,
            metrics: ApiMetrics::new(),
            config: Arc::new(config),
        }
    }
}
