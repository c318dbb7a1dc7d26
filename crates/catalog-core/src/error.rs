//! # Error Types
//!
//! One `thiserror` enum per port. Each variant carries enough context for an
//! operator to find the failing resource (path, address, backend message)
//! without the caller having to re-derive it.

use std::path::PathBuf;

use thiserror::Error;

/// Failures from an [`ItemRepository`](crate::ItemRepository) backend.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// The backing store cannot be reached or refused the operation.
    #[error("item repository unavailable: {0}")]
    Unavailable(String),
}

/// Failures while persisting an uploaded image.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The upload directory could not be created or is not a directory.
    #[error("upload directory {path} is not usable: {source}")]
    Directory {
        /// The configured upload directory.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// Writing the image bytes failed.
    #[error("failed to write image {path}: {source}")]
    Write {
        /// Destination file.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// Every candidate file name for the upload was already taken.
    #[error("no free file name for upload \"{original}\" after {attempts} attempts")]
    NameExhausted {
        /// The file name supplied by the client.
        original: String,
        /// Number of candidate names tried.
        attempts: u32,
    },
}

/// Failures while building or delivering an email.
#[derive(Error, Debug)]
pub enum MailError {
    /// A sender or recipient address could not be parsed.
    #[error("invalid email address \"{address}\": {reason}")]
    InvalidAddress {
        /// The offending address.
        address: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The message could not be assembled.
    #[error("failed to build email: {0}")]
    Build(String),

    /// The transport rejected the message or could not be reached.
    #[error("mail transport failed: {0}")]
    Transport(String),
}
