//! # Image Storage
//!
//! The [`ImageStore`] port persists one uploaded file and hands back the
//! absolute URL it will be served from. [`DiskImageStore`] writes into a
//! single directory that the service exposes under `/uploads`.
//!
//! ## Naming
//!
//! Stored names are `<unix-millis>-<sanitized original name>`. The file is
//! opened with `create_new`, so two uploads landing in the same millisecond
//! with the same name never overwrite each other: on conflict the timestamp
//! component is advanced and the open retried.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::io::AsyncWriteExt;

use crate::error::StorageError;
use crate::item::ImageUpload;

/// URL path segment under which stored images are served.
pub const UPLOADS_PATH: &str = "uploads";

/// Candidate names tried before giving up on a single upload.
const MAX_NAME_ATTEMPTS: u32 = 64;

/// Fallback when the client-supplied name sanitizes to nothing.
const DEFAULT_FILE_NAME: &str = "upload";

/// Persists uploaded images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store the upload and return the absolute URL it is served from.
    async fn save(&self, upload: ImageUpload) -> Result<String, StorageError>;

    /// Verify the store can accept writes. Used by the readiness probe.
    async fn check(&self) -> Result<(), StorageError>;
}

/// Filesystem-backed image store.
#[derive(Debug, Clone)]
pub struct DiskImageStore {
    dir: PathBuf,
    public_base_url: String,
}

impl DiskImageStore {
    /// Store files in `dir`, building URLs against `public_base_url`
    /// (e.g. `http://localhost:5000`).
    pub fn new(dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        let public_base_url = public_base_url.into().trim_end_matches('/').to_string();
        Self {
            dir: dir.into(),
            public_base_url,
        }
    }

    /// The directory files are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Public URL for a stored file name.
    pub fn url_for(&self, stored_name: &str) -> String {
        format!("{}/{UPLOADS_PATH}/{stored_name}", self.public_base_url)
    }

    async fn ensure_dir(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StorageError::Directory {
                path: self.dir.clone(),
                source,
            })
    }
}

#[async_trait]
impl ImageStore for DiskImageStore {
    async fn save(&self, upload: ImageUpload) -> Result<String, StorageError> {
        self.ensure_dir().await?;

        let safe_name = sanitize_file_name(&upload.original_name);
        let mut stamp = Utc::now().timestamp_millis();

        for _ in 0..MAX_NAME_ATTEMPTS {
            let stored_name = stored_file_name(stamp, &safe_name);
            let path = self.dir.join(&stored_name);

            let mut file = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    stamp += 1;
                    continue;
                }
                Err(source) => return Err(StorageError::Write { path, source }),
            };

            file.write_all(&upload.bytes)
                .await
                .map_err(|source| StorageError::Write {
                    path: path.clone(),
                    source,
                })?;
            file.flush()
                .await
                .map_err(|source| StorageError::Write {
                    path: path.clone(),
                    source,
                })?;

            tracing::debug!(
                stored_name = %stored_name,
                bytes = upload.bytes.len(),
                content_type = upload.content_type.as_deref().unwrap_or("unknown"),
                "stored uploaded image"
            );
            return Ok(self.url_for(&stored_name));
        }

        Err(StorageError::NameExhausted {
            original: upload.original_name,
            attempts: MAX_NAME_ATTEMPTS,
        })
    }

    async fn check(&self) -> Result<(), StorageError> {
        self.ensure_dir().await?;
        let meta = tokio::fs::metadata(&self.dir)
            .await
            .map_err(|source| StorageError::Directory {
                path: self.dir.clone(),
                source,
            })?;
        if !meta.is_dir() {
            return Err(StorageError::Directory {
                path: self.dir.clone(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "not a directory"),
            });
        }
        Ok(())
    }
}

/// `<millis>-<name>`.
pub fn stored_file_name(millis: i64, safe_name: &str) -> String {
    format!("{millis}-{safe_name}")
}

/// Reduce a client-supplied file name to a single safe path component.
///
/// Keeps only the final component (after `/` or `\`) and replaces anything
/// outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_file_name(original: &str) -> String {
    let last = original
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();
    let cleaned: String = last
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        DEFAULT_FILE_NAME.to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, bytes: &[u8]) -> ImageUpload {
        ImageUpload {
            original_name: name.to_string(),
            content_type: Some("image/png".to_string()),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn sanitize_keeps_plain_names() {
        assert_eq!(sanitize_file_name("chair-1_front.png"), "chair-1_front.png");
    }

    #[test]
    fn sanitize_strips_directories() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\photo.jpg"), "photo.jpg");
    }

    #[test]
    fn sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_file_name("my photo (1).jpg"), "my_photo__1_.jpg");
    }

    #[test]
    fn sanitize_empty_falls_back() {
        assert_eq!(sanitize_file_name(""), "upload");
        assert_eq!(sanitize_file_name("dir/"), "upload");
    }

    #[test]
    fn url_for_joins_base_and_uploads_path() {
        let store = DiskImageStore::new("/tmp/x", "http://localhost:5000/");
        assert_eq!(
            store.url_for("1-a.png"),
            "http://localhost:5000/uploads/1-a.png"
        );
    }

    #[tokio::test]
    async fn save_writes_file_and_returns_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskImageStore::new(dir.path(), "http://localhost:5000");

        let url = store.save(upload("chair.png", b"png-bytes")).await.unwrap();

        let prefix = "http://localhost:5000/uploads/";
        assert!(url.starts_with(prefix), "unexpected url {url}");
        let stored_name = &url[prefix.len()..];
        assert!(stored_name.ends_with("-chair.png"));
        let (millis, _) = stored_name.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());

        let contents = std::fs::read(dir.path().join(stored_name)).unwrap();
        assert_eq!(contents, b"png-bytes");
    }

    #[tokio::test]
    async fn save_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("uploads");
        let store = DiskImageStore::new(&nested, "http://h");
        store.save(upload("x.png", b"x")).await.unwrap();
        assert!(nested.is_dir());
    }

    #[tokio::test]
    async fn same_name_uploads_never_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskImageStore::new(dir.path(), "http://h");

        let mut urls = Vec::new();
        for i in 0..5u8 {
            urls.push(store.save(upload("dup.png", &[i])).await.unwrap());
        }

        let mut unique = urls.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 5);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 5);
    }

    #[tokio::test]
    async fn traversal_names_stay_inside_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskImageStore::new(dir.path(), "http://h");
        store.save(upload("../escape.png", b"x")).await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].ends_with("-escape.png"));
    }

    #[tokio::test]
    async fn check_succeeds_on_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskImageStore::new(dir.path().join("uploads"), "http://h");
        store.check().await.unwrap();
    }

    #[tokio::test]
    async fn check_fails_when_path_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, b"x").unwrap();
        let store = DiskImageStore::new(&file, "http://h");
        assert!(store.check().await.is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Sanitized names are always a single non-empty path component.
        #[test]
        fn sanitized_name_has_no_separators(name in ".{0,64}") {
            let safe = sanitize_file_name(&name);
            prop_assert!(!safe.is_empty());
            prop_assert!(!safe.contains('/'));
            prop_assert!(!safe.contains('\\'));
            prop_assert!(safe.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')));
        }
    }
}
