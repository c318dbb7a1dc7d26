//! # catalog-api: HTTP Service for the Item Catalog
//!
//! ## API Surface
//!
//! | Route                     | Module                  |
//! |---------------------------|-------------------------|
//! | `GET/POST /items`         | [`routes::items`]       |
//! | `POST /enquire`           | [`routes::enquiry`]     |
//! | `GET /uploads/{file}`     | static files (`ServeDir`) |
//! | `GET /openapi.json`       | [`openapi`]             |
//! | `GET /health/*`           | liveness and readiness  |
//! | `GET /metrics`            | Prometheus scrape       |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → CORS → BodyLimit → Handler
//! ```

pub mod config;
pub mod error;
pub mod extractors;
pub mod mail;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::error::AppError;
use crate::routes::UPLOADS_ROUTE;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes and `/metrics` are mounted outside the request metrics so
/// scrapes do not count themselves.
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let mut api = Router::new()
        .merge(routes::items::router())
        .merge(routes::enquiry::router())
        .merge(openapi::router())
        .nest_service(UPLOADS_ROUTE, ServeDir::new(&config.upload_dir))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(CorsLayer::permissive());

    if config.metrics_enabled {
        api = api
            .layer(from_fn(middleware::metrics::metrics_middleware))
            .layer(Extension(state.metrics.clone()));
    }

    let api = api
        .layer(middleware::tracing_layer::layer())
        .with_state(state.clone());

    let mut probes = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    if config.metrics_enabled {
        probes = probes.route("/metrics", get(prometheus_metrics));
    }

    Router::new().merge(probes.with_state(state)).merge(api)
}

/// GET /metrics: Prometheus scrape endpoint.
///
/// Refreshes the item gauge from the repository on each scrape, then
/// encodes the registry in text exposition format.
async fn prometheus_metrics(State(state): State<AppState>) -> impl IntoResponse {
    match state.items.count().await {
        Ok(count) => state.metrics.set_items(count),
        Err(e) => tracing::warn!("item count unavailable for metrics: {e}"),
    }

    match state.metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode Prometheus metrics: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}

/// Liveness probe. Always 200 while the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: the upload directory is usable and the item store
/// answers. Returns 200 "ready" or 503 with a structured error body.
async fn readiness(State(state): State<AppState>) -> Result<&'static str, AppError> {
    state.images.check().await.map_err(|e| {
        tracing::warn!("image store health check failed: {e}");
        AppError::ServiceUnavailable("image store unavailable".into())
    })?;

    state.items.count().await.map_err(|e| {
        tracing::warn!("item store health check failed: {e}");
        AppError::ServiceUnavailable("item store unavailable".into())
    })?;

    Ok("ready")
}
