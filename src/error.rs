//! Error types for the catalog proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Message returned to clients for any failure whose detail stays server-side.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred.";

// == Proxy Error Enum ==
/// Unified error type for the catalog proxy.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Path id could not be parsed as an integer
    #[error("Invalid Pokémon ID format: '{0}'.")]
    InvalidId(String),

    /// Upstream reported the item does not exist
    #[error("Pokémon with ID {0} not found in external API.")]
    ItemNotFound(i64),

    /// Network or transport failure talking to the upstream API
    #[error("Upstream API unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Upstream answered with a non-2xx status
    #[error("Upstream API returned {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    /// Upstream payload did not have the expected shape
    #[error("Malformed upstream payload: {0}")]
    MalformedUpstream(String),

    /// Cache refused to store an entry
    #[error("Cache rejected entry: {0}")]
    CacheRejected(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    /// True for failures caused by the upstream API rather than by the caller.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ProxyError::ItemNotFound(_)
                | ProxyError::UpstreamUnavailable(_)
                | ProxyError::UpstreamStatus { .. }
        )
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ProxyError::InvalidId(_) => (
                StatusCode::BAD_REQUEST,
                json!({ "detail": self.to_string() }),
            ),
            ProxyError::ItemNotFound(_) => (
                StatusCode::NOT_FOUND,
                json!({ "detail": self.to_string() }),
            ),
            ProxyError::UpstreamUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "error": self.to_string() }),
            ),
            ProxyError::UpstreamStatus { status, .. } => {
                let forwarded = StatusCode::from_u16(*status)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::SERVICE_UNAVAILABLE);
                (forwarded, json!({ "error": self.to_string() }))
            }
            ProxyError::MalformedUpstream(_)
            | ProxyError::CacheRejected(_)
            | ProxyError::Internal(_) => {
                error!("Request failed: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": INTERNAL_ERROR_MESSAGE }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the catalog proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;
