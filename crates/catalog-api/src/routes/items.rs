//! # Item API
//!
//! `POST /items` accepts a `multipart/form-data` submission with text fields
//! `name`, `type`, `description`, optional `coverImage`, and up to
//! [`MAX_IMAGES`] files under the `images` field. Files are stored through
//! the [`ImageStore`](catalog_core::ImageStore) port in the order they were
//! sent; the item records their public URLs in that same order.
//!
//! `GET /items` returns every stored item in insertion order.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use catalog_core::{ImageUpload, Item, MAX_IMAGES};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::{extract_multipart, multipart_error};
use crate::state::AppState;

/// Multipart form accepted by `POST /items`. Documentation only; the
/// handler reads fields from the stream directly.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemSubmissionForm {
    /// Display name.
    pub name: String,
    /// Free-form category.
    #[serde(rename = "type")]
    pub item_type: String,
    pub description: String,
    /// Cover image reference. Blank is treated as absent.
    pub cover_image: Option<String>,
    /// Up to ten image files, each sent as its own `images` part.
    #[schema(value_type = Vec<String>, format = Binary)]
    pub images: Vec<String>,
}

/// Fields collected from a submission before anything is stored.
#[derive(Debug, Default)]
struct Submission {
    name: String,
    item_type: String,
    description: String,
    cover_image: Option<String>,
    uploads: Vec<ImageUpload>,
}

/// Build the item router.
pub fn router() -> Router<AppState> {
    Router::new().route("/items", get(list_items).post(create_item))
}

/// Drain the multipart stream. Unknown fields are skipped. Rejects the
/// request as soon as an eleventh file arrives, before any file is written.
async fn read_submission(mut multipart: Multipart) -> Result<Submission, AppError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "images" => {
                if submission.uploads.len() == MAX_IMAGES {
                    return Err(AppError::Validation(format!(
                        "at most {MAX_IMAGES} images may be uploaded per item"
                    )));
                }
                let original_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;
                submission.uploads.push(ImageUpload {
                    original_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "name" => submission.name = field.text().await.map_err(multipart_error)?,
            "type" => submission.item_type = field.text().await.map_err(multipart_error)?,
            "description" => {
                submission.description = field.text().await.map_err(multipart_error)?
            }
            "coverImage" => {
                submission.cover_image = Some(field.text().await.map_err(multipart_error)?)
            }
            other => tracing::debug!(field = other, "ignoring unknown multipart field"),
        }
    }

    Ok(submission)
}

/// POST /items: create an item, storing its images.
#[utoipa::path(
    post,
    path = "/items",
    request_body(content = ItemSubmissionForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 422, description = "Malformed form or too many images", body = crate::error::ErrorBody),
        (status = 500, description = "Image or item storage failed", body = crate::error::ErrorBody),
    ),
    tag = "items"
)]
async fn create_item(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Item>), AppError> {
    let submission = read_submission(extract_multipart(multipart)?).await?;

    let mut urls = Vec::with_capacity(submission.uploads.len());
    for upload in submission.uploads {
        urls.push(state.images.save(upload).await?);
    }
    state.metrics.record_images(urls.len());

    let item = Item::new(
        submission.name,
        submission.item_type,
        submission.description,
        submission.cover_image,
        urls,
    );
    let item = state.items.add(item).await?;

    tracing::info!(name = %item.name, images = item.images.len(), "item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /items: list all items in insertion order.
#[utoipa::path(
    get,
    path = "/items",
    responses(
        (status = 200, description = "All items", body = Vec<Item>),
        (status = 500, description = "Item storage failed", body = crate::error::ErrorBody),
    ),
    tag = "items"
)]
async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, AppError> {
    Ok(Json(state.items.list().await?))
}
