//! # catalog-core: Foundational Types for the Item Catalog
//!
//! Defines the [`Item`] record shared by the service and its clients, and the
//! three ports the service depends on:
//!
//! - [`ItemRepository`]: append/list storage for items.
//! - [`ImageStore`]: persists an uploaded image and returns its public URL.
//! - [`Mailer`]: delivers an [`EmailMessage`].
//!
//! Each port ships with an in-process adapter ([`InMemoryItemRepository`],
//! [`DiskImageStore`], [`OutboxMailer`]) so the service runs without any
//! external infrastructure. Handlers only ever see the traits, so a database
//! or object store can be substituted without touching them.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `catalog-*` crates.
//! - No `.unwrap()` outside tests.
//! - All port operations are async and return typed errors from [`error`].

pub mod error;
pub mod item;
pub mod mail;
pub mod repository;
pub mod storage;

pub use error::{MailError, RepositoryError, StorageError};
pub use item::{ImageUpload, Item, MAX_IMAGES};
pub use mail::{enquiry_email, EmailMessage, MailRoute, Mailer, OutboxMailer};
pub use repository::{InMemoryItemRepository, ItemRepository};
pub use storage::{DiskImageStore, ImageStore, UPLOADS_PATH};
