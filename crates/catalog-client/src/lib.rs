//! # catalog-client: Typed Client for the Catalog API
//!
//! - [`CatalogClient`]: reqwest client for `GET /items`, `POST /items`
//!   (multipart), and `POST /enquire`. Implements [`CatalogApi`] so user
//!   interfaces can be driven by fakes in tests.
//! - [`view`]: UI state independent of any rendering: the submission form,
//!   the item list, the detail modal, and its carousel.
//! - [`images`]: turns stored image references into displayable URLs.
//!
//! Only the list fetch is retried on transport failure; submissions and
//! enquiries are sent once.

pub mod carousel;
pub mod client;
pub mod config;
pub mod error;
pub mod images;
pub(crate) mod retry;
pub mod view;

pub use client::{CatalogApi, CatalogClient, ImageFile, ItemSubmission};
pub use config::ClientConfig;
pub use error::{ClientError, FormError};
pub use images::{resolve_image_url, PLACEHOLDER_IMAGE};
pub use view::{CatalogView, ItemForm};
