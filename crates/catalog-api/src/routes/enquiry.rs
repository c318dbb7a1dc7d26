//! # Enquiry API
//!
//! `POST /enquire` emails the configured recipient about an item. The
//! response is plain text; delivery failures are reported as a 500 with a
//! fixed message and logged with the underlying cause.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use catalog_core::enquiry_email;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Response body when the enquiry email was delivered.
pub const ENQUIRY_SENT: &str = "Enquiry email sent.";

/// Response body when delivery failed.
pub const ENQUIRY_FAILED: &str = "Failed to send enquiry email.";

/// Request to enquire about an item.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryRequest {
    /// Name of the item; not checked against stored items.
    pub item_name: String,
}

/// Build the enquiry router.
pub fn router() -> Router<AppState> {
    Router::new().route("/enquire", post(enquire))
}

/// POST /enquire: send an enquiry email for an item.
#[utoipa::path(
    post,
    path = "/enquire",
    request_body = EnquiryRequest,
    responses(
        (status = 200, description = "Enquiry email sent", body = String, content_type = "text/plain"),
        (status = 422, description = "Malformed JSON body", body = crate::error::ErrorBody),
        (status = 500, description = "Email delivery failed", body = String, content_type = "text/plain"),
    ),
    tag = "enquiries"
)]
async fn enquire(
    State(state): State<AppState>,
    body: Result<Json<EnquiryRequest>, JsonRejection>,
) -> Result<(StatusCode, &'static str), AppError> {
    let req = extract_json(body)?;
    let message = enquiry_email(&req.item_name, &state.mail_route);

    match state.mailer.send(message).await {
        Ok(()) => {
            state.metrics.record_enquiry(true);
            tracing::info!(item_name = %req.item_name, "enquiry email sent");
            Ok((StatusCode::OK, ENQUIRY_SENT))
        }
        Err(e) => {
            state.metrics.record_enquiry(false);
            tracing::error!(item_name = %req.item_name, error = %e, "enquiry email failed");
            Ok((StatusCode::INTERNAL_SERVER_ERROR, ENQUIRY_FAILED))
        }
    }
}
