//! # OpenAPI Specification
//!
//! Generated from the utoipa annotations on the route handlers and served
//! at `GET /openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// OpenAPI document for the catalog API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Item catalog: multipart item submission with image uploads, listing, and enquiry email."
    ),
    paths(
        crate::routes::items::create_item,
        crate::routes::items::list_items,
        crate::routes::enquiry::enquire,
    ),
    components(schemas(
        catalog_core::Item,
        crate::routes::items::ItemSubmissionForm,
        crate::routes::enquiry::EnquiryRequest,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "items", description = "Item submission and listing"),
        (name = "enquiries", description = "Enquiry emails about items"),
    )
)]
pub struct ApiDoc;

/// Router serving the OpenAPI document.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
