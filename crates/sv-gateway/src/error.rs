//! HTTP error mapping.
//!
//! Store and adapter errors arrive as typed results and leave as the
//! `{"success": false, "message": ...}` envelope the client API uses,
//! with a status code per error class. Internal detail (SQL text, codec
//! messages) is logged, not leaked.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sv_platforms::PlatformError;
use sv_types::StoreError;
use thiserror::Error;

/// Errors a route handler can surface.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Typed persistence-layer failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Unknown platform name.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// Credential verification failed.
    #[error("invalid credentials")]
    Unauthorized,

    /// Request shape was valid JSON but semantically unusable.
    #[error("{0}")]
    BadRequest(String),

    /// A referenced resource does not exist, keyed by something other
    /// than a row id (wallet address lookups).
    #[error("{0}")]
    NotFound(String),
}

/// Result alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(e) => match e {
                StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
                StoreError::SoldOut { .. } | StoreError::Conflict { .. } => StatusCode::CONFLICT,
                StoreError::Duplicate { .. }
                | StoreError::NotEligible { .. }
                | StoreError::InvalidOption { .. } => StatusCode::BAD_REQUEST,
                StoreError::CorruptState { .. } | StoreError::Write(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Platform(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Client-facing message. Server-side failures get a generic line;
    /// everything else is safe to echo.
    fn client_message(&self) -> String {
        match self {
            ApiError::Store(StoreError::CorruptState { .. })
            | ApiError::Store(StoreError::Write(_)) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "request rejected");
        }
        let body = Json(serde_json::json!({
            "success": false,
            "message": self.client_message(),
        }));
        (status, body).into_response()
    }
}

/// Gateway-level errors (server lifecycle, not per-request).
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Server socket bind error.
    #[error("server bind error: {0}")]
    Bind(String),

    /// Serve loop error.
    #[error("server error: {0}")]
    Serve(String),
}
