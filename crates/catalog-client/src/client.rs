//! HTTP client for the catalog API.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use catalog_core::Item;
use reqwest::multipart::{Form, Part};
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// One image file selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// File name sent to the service.
    pub file_name: String,
    /// MIME type, if known.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Read an image from disk, guessing the MIME type from its extension.
    pub async fn from_path(path: &Path) -> Result<Self, ClientError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ClientError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            content_type: mime_for(path).map(str::to_string),
            file_name,
            bytes,
        })
    }
}

fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// Everything sent in one `POST /items`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemSubmission {
    pub name: String,
    pub item_type: String,
    pub description: String,
    /// Cover image reference; omitted from the form when `None`.
    pub cover_image: Option<String>,
    /// Files sent under the `images` field, in order.
    pub images: Vec<ImageFile>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnquiryBody<'a> {
    item_name: &'a str,
}

/// Operations a catalog user interface needs.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch every item in insertion order.
    async fn list_items(&self) -> Result<Vec<Item>, ClientError>;

    /// Submit a new item with its images.
    async fn create_item(&self, submission: &ItemSubmission) -> Result<Item, ClientError>;

    /// Ask the service to email an enquiry about `item_name`. Returns the
    /// service's confirmation text.
    async fn enquire(&self, item_name: &str) -> Result<String, ClientError>;

    /// Base URL used to resolve bare image file names.
    fn base_url(&self) -> &str;
}

/// reqwest-backed [`CatalogApi`].
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl CatalogClient {
    /// Create a client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;
        Ok(Self { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base())
    }
}

async fn check_status(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<reqwest::Response, ClientError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Api {
        endpoint: endpoint.into(),
        status,
        body,
    })
}

fn build_form(submission: &ItemSubmission) -> Result<Form, ClientError> {
    let mut form = Form::new()
        .text("name", submission.name.clone())
        .text("type", submission.item_type.clone())
        .text("description", submission.description.clone());

    if let Some(cover) = submission.cover_image.as_ref().filter(|c| !c.is_empty()) {
        form = form.text("coverImage", cover.clone());
    }

    for image in &submission.images {
        let mut part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
        if let Some(content_type) = &image.content_type {
            part = part.mime_str(content_type).map_err(|e| ClientError::Http {
                endpoint: "POST /items".into(),
                source: e,
            })?;
        }
        form = form.part("images", part);
    }

    Ok(form)
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn list_items(&self) -> Result<Vec<Item>, ClientError> {
        let endpoint = "GET /items";
        let url = self.url("/items");

        let resp = crate::retry::retry_send(|| self.http.get(&url).send())
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;
        let resp = check_status(endpoint, resp).await?;

        resp.json().await.map_err(|e| ClientError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }

    async fn create_item(&self, submission: &ItemSubmission) -> Result<Item, ClientError> {
        let endpoint = "POST /items";
        let form = build_form(submission)?;

        let resp = self
            .http
            .post(self.url("/items"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;
        let resp = check_status(endpoint, resp).await?;

        let item: Item = resp.json().await.map_err(|e| ClientError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })?;
        tracing::info!(name = %item.name, images = item.images.len(), "item submitted");
        Ok(item)
    }

    async fn enquire(&self, item_name: &str) -> Result<String, ClientError> {
        let endpoint = "POST /enquire";

        let resp = self
            .http
            .post(self.url("/enquire"))
            .json(&EnquiryBody { item_name })
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;
        let resp = check_status(endpoint, resp).await?;

        resp.text().await.map_err(|e| ClientError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }

    fn base_url(&self) -> &str {
        self.config.base()
    }
}
