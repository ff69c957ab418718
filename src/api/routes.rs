//! API Routes
//!
//! Configures the Axum router with the catalog and operational endpoints.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

use super::handlers::{
    detail_handler, health_handler, list_handler, root_redirect, stats_handler, AppState,
};
use crate::error::INTERNAL_ERROR_MESSAGE;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Redirect to the list endpoint
/// - `GET /api/pokemon/` - Paginated list (`page`, `page_size`)
/// - `GET /api/pokemon/:id/` - Single item
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
/// - Panic catching: a panicking handler answers 500 instead of dropping the connection
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .route("/", get(root_redirect))
        .route("/api/pokemon", get(list_handler))
        .route("/api/pokemon/", get(list_handler))
        .route("/api/pokemon/:id", get(detail_handler))
        .route("/api/pokemon/:id/", get(detail_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!("Handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": INTERNAL_ERROR_MESSAGE })),
    )
        .into_response()
}
