//! # Request Extractors
//!
//! Helpers that turn axum extractor rejections into [`AppError`]s so every
//! malformed request body yields the same JSON error shape.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::extract::Multipart;
use axum::Json;

use crate::error::AppError;

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
///
/// ```ignore
/// async fn handler(body: Result<Json<T>, JsonRejection>) -> Result<..., AppError> {
///     let req = extract_json(body)?;
/// }
/// ```
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract a multipart body, mapping a missing or malformed
/// `Content-Type` to [`AppError::BadRequest`].
pub fn extract_multipart(
    result: Result<Multipart, MultipartRejection>,
) -> Result<Multipart, AppError> {
    result.map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Map an error raised while reading multipart fields.
pub fn multipart_error(err: MultipartError) -> AppError {
    AppError::BadRequest(err.body_text())
}
