//! # HTTP Routes
//!
//! | Route              | Module        |
//! |--------------------|---------------|
//! | `GET/POST /items`  | [`items`]     |
//! | `POST /enquire`    | [`enquiry`]   |
//! | `GET /uploads/*`   | static files, mounted in [`crate::app`] |

pub mod enquiry;
pub mod items;

/// Path prefix under which stored images are served.
pub const UPLOADS_ROUTE: &str = "/uploads";
